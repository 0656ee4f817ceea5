use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Postgres URL for the end-to-end suite; the suite is skipped without it.
pub const DATABASE_ENV: &str = "NOTESERVER_TEST_DATABASE_URL";

static SERVER: OnceLock<TestServer> = OnceLock::new();
static USER_SEQ: AtomicU32 = AtomicU32::new(0);

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn(database_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_noteserver"));
        cmd.env("PORT", port.to_string())
            .env("DATABASE_URL", database_url)
            .env("JWT_SECRET", "integration-test-secret")
            // Nothing listens on the discard port, so enrichment always fails fast
            .env("SPELLCHECK_URL", "http://127.0.0.1:9/checkText")
            .env("SPELLCHECK_TIMEOUT_SECS", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Shared server for the whole test binary, or `None` when no database is configured.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let Ok(database_url) = std::env::var(DATABASE_ENV) else {
        eprintln!("{} not set; skipping end-to-end test", DATABASE_ENV);
        return Ok(None);
    };

    let server = SERVER.get_or_init(|| {
        TestServer::spawn(&database_url).expect("failed to spawn server binary")
    });
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(Some(server))
}

/// Username that does not collide with earlier runs against the same database.
pub fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = USER_SEQ.fetch_add(1, Ordering::SeqCst);
    format!("{}_{}_{}", prefix, nanos, seq)
}

/// Register and log in, returning the session token.
pub async fn sign_up(server: &TestServer, client: &reqwest::Client, username: &str) -> Result<String> {
    let credentials = json!({"username": username, "password": "integration-pw"});

    let res = client
        .post(server.url("/v1/register"))
        .json(&credentials)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

    let body: Value = client
        .post(server.url("/v1/login"))
        .json(&credentials)
        .send()
        .await?
        .json()
        .await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response without token")
}
