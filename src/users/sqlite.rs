use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{LookupError, Result};
use crate::users::{UserRecord, UserStore};

/// SQLite-backed user store.
///
/// Single-table schema, created on open:
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// Passwords are stored as `salt$sha256(salt || password)` hex; all SQL is
/// parameterized, so hostile usernames are just strings that don't match.
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    /// Open (or create) the user store at `db_path`
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(LookupError::Database)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Normalize usernames for consistent lookups
    fn normalize_username(username: &str) -> String {
        username.trim().to_lowercase()
    }
}

/// Salted hash in `salt$digest` form; the salt is a fresh UUID per user
fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest_with_salt(&salt, password))
}

/// Constant-shape comparison against a stored `salt$digest` value
fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => digest_with_salt(salt, password) == digest,
        None => false,
    }
}

fn digest_with_salt(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create(&self, username: &str, password: &str) -> Result<()> {
        let normalized = Self::normalize_username(username);
        if normalized.is_empty() {
            return Err(LookupError::Auth("Username must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(LookupError::Auth("Password must not be empty".to_string()));
        }

        let conn = self.conn.lock().unwrap();

        let exists: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE username = ?1",
                params![normalized],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(LookupError::UsernameTaken(normalized));
        }

        conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![normalized, hash_password(password), Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let normalized = Self::normalize_username(username);
        let conn = self.conn.lock().unwrap();

        let stored: Option<String> = conn
            .query_row(
                "SELECT password_hash FROM users WHERE username = ?1",
                params![normalized],
                |row| row.get(0),
            )
            .optional()?;

        Ok(stored
            .map(|hash| verify_password(password, &hash))
            .unwrap_or(false))
    }

    async fn list(&self) -> Result<Vec<UserRecord>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare("SELECT id, username, created_at FROM users ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            let created_raw: String = row.get(2)?;
            Ok(UserRecord {
                id: row.get(0)?,
                username: row.get(1)?,
                created_at: DateTime::parse_from_rfc3339(&created_raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    async fn count(&self) -> Result<u64> {
        let conn = self.conn.lock().unwrap();
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_create() {
        let store = SqliteUserStore::new(":memory:").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_signup_and_login() {
        let store = SqliteUserStore::new(":memory:").await.unwrap();

        store.create("hooper", "secret123").await.unwrap();
        assert!(store.verify("hooper", "secret123").await.unwrap());
        assert!(!store.verify("hooper", "wrong").await.unwrap());
        assert!(!store.verify("nobody", "secret123").await.unwrap());
    }

    #[tokio::test]
    async fn test_username_normalized() {
        let store = SqliteUserStore::new(":memory:").await.unwrap();

        store.create("  Hooper  ", "secret123").await.unwrap();
        assert!(store.verify("hooper", "secret123").await.unwrap());
        assert!(store.verify("HOOPER", "secret123").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = SqliteUserStore::new(":memory:").await.unwrap();

        store.create("hooper", "first").await.unwrap();
        let err = store.create("Hooper", "second").await.unwrap_err();
        assert!(matches!(err, LookupError::UsernameTaken(_)));
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let store = SqliteUserStore::new(":memory:").await.unwrap();

        assert!(store.create("", "pw").await.is_err());
        assert!(store.create("user", "").await.is_err());
    }

    #[tokio::test]
    async fn test_injection_payload_is_just_a_string() {
        let store = SqliteUserStore::new(":memory:").await.unwrap();
        store.create("hooper", "secret123").await.unwrap();

        // Classic bypass attempt must behave like ordinary bad credentials
        let payload = "' OR '1'='1";
        assert!(!store.verify(payload, payload).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[test]
    fn test_password_hash_is_salted() {
        let a = hash_password("secret");
        let b = hash_password("secret");

        assert_ne!(a, b);
        assert!(verify_password("secret", &a));
        assert!(verify_password("secret", &b));
        assert!(!verify_password("other", &a));
    }

    #[test]
    fn test_verify_rejects_malformed_stored_hash() {
        assert!(!verify_password("secret", "no-separator-here"));
    }

    #[tokio::test]
    async fn test_list_users() {
        let store = SqliteUserStore::new(":memory:").await.unwrap();

        store.create("alice", "pw1").await.unwrap();
        store.create("bob", "pw2").await.unwrap();

        let users = store.list().await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }
}
