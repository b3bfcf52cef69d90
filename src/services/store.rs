use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Internship, User};

/// Errors that can occur when reading or writing records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Parse a record identifier, rejecting anything that is not a UUID
pub fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

/// Persistence for users and internships.
///
/// Implementations must be safe to share across request handlers; reads
/// may run concurrently.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new user. Fails with `Conflict` if the email is taken.
    async fn insert_user(&self, user: User) -> Result<Uuid, StoreError>;

    async fn get_user(&self, id: Uuid) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Replace a user's profile, keeping its id
    async fn update_user(&self, user: User) -> Result<(), StoreError>;

    async fn insert_internship(&self, internship: Internship) -> Result<Uuid, StoreError>;

    /// Bulk insert, returns the number of rows written
    async fn insert_internships(&self, internships: Vec<Internship>) -> Result<usize, StoreError>;

    async fn get_internship(&self, id: Uuid) -> Result<Internship, StoreError>;

    /// All internships, in insertion order
    async fn list_internships(&self) -> Result<Vec<Internship>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
