pub mod manager;
pub mod models;
pub mod notes;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{NewUser, Note, User};
pub use notes::{Mutation, NoteStore, PgNoteStore};
pub use users::{CredentialStore, PgCredentialStore};
