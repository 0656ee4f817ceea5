use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::Note;

/// Outcome of an update or delete filtered by `(note_id, user_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// No note with that id belongs to the caller.
    NotFound,
}

impl Mutation {
    fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            Mutation::NotFound
        } else {
            Mutation::Applied
        }
    }
}

/// Persistence of notes, always scoped to the owning user.
///
/// Every single-note operation filters on the note id and the owner id
/// together; an id that exists but belongs to someone else is reported
/// exactly like an id that does not exist.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note for `owner_id`, stamping the creation time server-side.
    async fn create(&self, owner_id: i64, title: &str, content: &str)
        -> Result<i64, DatabaseError>;

    async fn read(&self, note_id: i64, owner_id: i64) -> Result<Option<Note>, DatabaseError>;

    /// Replace title and content; id, owner and creation time never change.
    async fn update(
        &self,
        note_id: i64,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> Result<Mutation, DatabaseError>;

    async fn delete(&self, note_id: i64, owner_id: i64) -> Result<Mutation, DatabaseError>;

    /// All notes of `owner_id` in creation order; an empty list is not an error.
    async fn list_all(&self, owner_id: i64) -> Result<Vec<Note>, DatabaseError>;
}

pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn create(
        &self,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> Result<i64, DatabaseError> {
        let (note_id,): (i64,) = sqlx::query_as(
            "INSERT INTO notes (user_id, title, content, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING note_id",
        )
        .bind(owner_id)
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(note_id)
    }

    async fn read(&self, note_id: i64, owner_id: i64) -> Result<Option<Note>, DatabaseError> {
        let note = sqlx::query_as::<_, Note>(
            "SELECT note_id, user_id, title, content, created_at \
             FROM notes WHERE note_id = $1 AND user_id = $2",
        )
        .bind(note_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn update(
        &self,
        note_id: i64,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> Result<Mutation, DatabaseError> {
        // One filtered statement: existence, ownership and the write are decided together.
        let result = sqlx::query(
            "UPDATE notes SET title = $1, content = $2 WHERE note_id = $3 AND user_id = $4",
        )
        .bind(title)
        .bind(content)
        .bind(note_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(Mutation::from_rows_affected(result.rows_affected()))
    }

    async fn delete(&self, note_id: i64, owner_id: i64) -> Result<Mutation, DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE note_id = $1 AND user_id = $2")
            .bind(note_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(Mutation::from_rows_affected(result.rows_affected()))
    }

    async fn list_all(&self, owner_id: i64) -> Result<Vec<Note>, DatabaseError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT note_id, user_id, title, content, created_at \
             FROM notes WHERE user_id = $1 ORDER BY note_id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }
}
