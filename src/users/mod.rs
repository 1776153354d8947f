pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;

pub use sqlite::SqliteUserStore;

/// Trait for user-credential stores
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Register a new user; fails with `UsernameTaken` on duplicates
    async fn create(&self, username: &str, password: &str) -> Result<()>;

    /// Check credentials; false for unknown users or wrong passwords
    async fn verify(&self, username: &str, password: &str) -> Result<bool>;

    /// All registered users (admin/CLI listing)
    async fn list(&self) -> Result<Vec<UserRecord>>;

    /// Number of registered users
    async fn count(&self) -> Result<u64>;
}

/// One registered user (password hash never leaves the store)
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
