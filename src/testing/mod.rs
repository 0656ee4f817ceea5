//! In-memory stand-ins for the Postgres stores and the HTTP speller, so the
//! full router can be driven with `oneshot` requests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::config::{AppConfig, PasswordConfig};
use crate::database::{CredentialStore, DatabaseError, Mutation, NewUser, Note, NoteStore, User};
use crate::spellcheck::{SpellcheckError, SpellcheckSuggestion, Spellchecker};
use crate::state::AppState;


#[derive(Default)]
struct Tables {
    users: Vec<User>,
    notes: Vec<Note>,
    next_user_id: i64,
    next_note_id: i64,
}

/// Both stores over one set of tables, with the same uniqueness and
/// ownership rules as the Postgres schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_deletes: AtomicBool,
}

impl MemoryStore {
    /// Make `delete_cascade` fail like a rolled-back transaction.
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn note_count(&self) -> usize {
        self.tables.lock().unwrap().notes.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn save(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::UniqueViolation("users_username_key".to_string()));
        }
        tables.next_user_id += 1;
        let saved = User {
            id: tables.next_user_id,
            username: user.username,
            password_hash: user.password_hash,
        };
        tables.users.push(saved.clone());
        Ok(saved)
    }

    async fn delete_cascade(&self, user_id: i64) -> Result<bool, DatabaseError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        let mut tables = self.tables.lock().unwrap();
        tables.notes.retain(|n| n.user_id != user_id);
        let before = tables.users.len();
        tables.users.retain(|u| u.id != user_id);
        Ok(tables.users.len() < before)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(
        &self,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_note_id += 1;
        let id = tables.next_note_id;
        tables.notes.push(Note {
            id,
            user_id: owner_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn read(&self, note_id: i64, owner_id: i64) -> Result<Option<Note>, DatabaseError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .notes
            .iter()
            .find(|n| n.id == note_id && n.user_id == owner_id)
            .cloned())
    }

    async fn update(
        &self,
        note_id: i64,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> Result<Mutation, DatabaseError> {
        let mut tables = self.tables.lock().unwrap();
        match tables
            .notes
            .iter_mut()
            .find(|n| n.id == note_id && n.user_id == owner_id)
        {
            Some(note) => {
                note.title = title.to_string();
                note.content = content.to_string();
                Ok(Mutation::Applied)
            }
            None => Ok(Mutation::NotFound),
        }
    }

    async fn delete(&self, note_id: i64, owner_id: i64) -> Result<Mutation, DatabaseError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.notes.len();
        tables
            .notes
            .retain(|n| !(n.id == note_id && n.user_id == owner_id));
        if tables.notes.len() < before {
            Ok(Mutation::Applied)
        } else {
            Ok(Mutation::NotFound)
        }
    }

    async fn list_all(&self, owner_id: i64) -> Result<Vec<Note>, DatabaseError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .notes
            .iter()
            .filter(|n| n.user_id == owner_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone)]
pub enum SpellerBehaviour {
    Correct,
    Misspelled(Vec<SpellcheckSuggestion>),
    Failing(u16),
}

/// Canned speller that counts how often it was asked.
pub struct StubSpellchecker {
    behaviour: SpellerBehaviour,
    calls: AtomicUsize,
}

impl StubSpellchecker {
    pub fn new(behaviour: SpellerBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Spellchecker for StubSpellchecker {
    async fn check(
        &self,
        _text: &str,
        _timeout: Duration,
    ) -> Result<Vec<SpellcheckSuggestion>, SpellcheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            SpellerBehaviour::Correct => Ok(Vec::new()),
            SpellerBehaviour::Misspelled(suggestions) => Ok(suggestions.clone()),
            SpellerBehaviour::Failing(status) => Err(SpellcheckError::Status(*status)),
        }
    }
}

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub speller: Arc<StubSpellchecker>,
}

impl TestContext {
    pub fn new(behaviour: SpellerBehaviour) -> Self {
        let mut config = AppConfig::development();
        config.security.jwt_secret = "test-secret".to_string();
        // Minimal Argon2 costs keep the suite fast
        config.security.password = PasswordConfig {
            memory_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        };

        let store = Arc::new(MemoryStore::default());
        let speller = Arc::new(StubSpellchecker::new(behaviour));
        let state = AppState::new(config, store.clone(), store.clone(), speller.clone())
            .expect("test password parameters are valid");

        Self {
            state,
            store,
            speller,
        }
    }
}
