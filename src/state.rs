use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::auth::{PasswordError, PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::database::{CredentialStore, NoteStore, PgCredentialStore, PgNoteStore};
use crate::spellcheck::{HttpSpellchecker, Spellchecker};

/// Everything a request handler needs, built once at startup and shared by reference.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub passwords: PasswordHasher,
    pub users: Arc<dyn CredentialStore>,
    pub notes: Arc<dyn NoteStore>,
    pub spellchecker: Arc<dyn Spellchecker>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn CredentialStore>,
        notes: Arc<dyn NoteStore>,
        spellchecker: Arc<dyn Spellchecker>,
    ) -> Result<Self, PasswordError> {
        let tokens = TokenService::new(&config.security);
        let passwords = PasswordHasher::new(&config.security.password)?;

        Ok(Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            passwords,
            users,
            notes,
            spellchecker,
        })
    }

    /// Postgres-backed stores and the HTTP speller named in `config`.
    pub fn with_pool(config: AppConfig, pool: PgPool) -> Result<Self, PasswordError> {
        let spellchecker = HttpSpellchecker::new(&config.spellcheck);
        Self::new(
            config,
            Arc::new(PgCredentialStore::new(pool.clone())),
            Arc::new(PgNoteStore::new(pool)),
            Arc::new(spellchecker),
        )
    }

    pub fn spellcheck_timeout(&self) -> Duration {
        self.config.spellcheck.timeout()
    }
}
