use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Parser, Debug, Default)]
#[command(name = "noteserver")]
#[command(about = "Note-taking API server with spelling suggestions")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Server port number")]
    pub port: Option<u16>,

    #[arg(long = "jwt-secret", help = "JWT secret key")]
    pub jwt_secret: Option<String>,

    #[arg(long = "sql-server", help = "PostgreSQL connection URL")]
    pub sql_server: Option<String>,

    #[arg(long, help = "External API timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long = "log-file", help = "Write logs to this file instead of stdout")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags take precedence over environment variables and presets.
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(secret) = self.jwt_secret {
            config.security.jwt_secret = secret;
        }
        if let Some(url) = self.sql_server {
            config.database.url = url;
        }
        if let Some(timeout) = self.timeout {
            config.spellcheck.timeout_secs = timeout;
        }
        if let Some(path) = self.log_file {
            config.logging.file = Some(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "noteserver",
            "--port",
            "9090",
            "--jwt-secret",
            "s3cret",
            "--sql-server",
            "postgresql://u:p@db:5432/notes",
            "--timeout",
            "2",
        ]);
        let config = cli.apply(AppConfig::development());

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.security.jwt_secret, "s3cret");
        assert_eq!(config.database.url, "postgresql://u:p@db:5432/notes");
        assert_eq!(config.spellcheck.timeout_secs, 2);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn absent_flags_keep_config() {
        let config = Cli::default().apply(AppConfig::development());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.spellcheck.timeout_secs, 5);
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["noteserver", "--port", "70000"]).is_err());
    }
}
