use thiserror::Error;

/// Main error type for the lookup service
#[derive(Error, Debug)]
pub enum LookupError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream stats API errors
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    /// No roster entry matched the query
    #[error("No NBA player found matching '{0}'")]
    PlayerNotFound(String),

    /// Credential check failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Signup with an already-registered username
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for LookupError {
    fn from(s: String) -> Self {
        LookupError::Other(s)
    }
}

impl From<&str> for LookupError {
    fn from(s: &str) -> Self {
        LookupError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LookupError>;
