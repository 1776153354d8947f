use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the session cookie issued at login
pub const SESSION_COOKIE: &str = "session";

/// Extract the session token from a raw `Cookie` header value.
///
/// Cookies split on `;`, names and values on the first `=`, so a token that
/// itself contains `=` survives intact.
pub fn token_from_cookie_header(raw: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// One live login session
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory session registry.
///
/// Tokens are opaque UUIDs issued at login and revoked at logout; the
/// process owns its sessions, so a restart logs everyone out. The HTTP guard
/// resolves tokens on every gated request.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for a logged-in user
    pub async fn issue(&self, username: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let session = Session {
            username: username.to_string(),
            created_at: Utc::now(),
        };

        self.sessions.write().await.insert(token.clone(), session);
        tracing::debug!("Issued session for '{}'", username);
        token
    }

    /// Username behind a token, if the session is live
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(token)
            .map(|s| s.username.clone())
    }

    /// Guard decision for one request: username behind the request's
    /// `Cookie` header, or None when the request must be refused (no
    /// header, no session cookie, or a revoked/unknown token)
    pub async fn authenticate(&self, cookie_header: Option<&str>) -> Option<String> {
        let token = token_from_cookie_header(cookie_header?)?;
        self.resolve(&token).await
    }

    /// Drop a session; true if it existed
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of live sessions
    pub async fn active(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_and_resolve() {
        let registry = SessionRegistry::new();

        let token = registry.issue("hooper").await;
        assert_eq!(registry.resolve(&token).await.as_deref(), Some("hooper"));
        assert_eq!(registry.active().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_token_resolves_to_none() {
        let registry = SessionRegistry::new();
        assert!(registry.resolve("not-a-token").await.is_none());
    }

    #[tokio::test]
    async fn test_revoke() {
        let registry = SessionRegistry::new();

        let token = registry.issue("hooper").await;
        assert!(registry.revoke(&token).await);
        assert!(registry.resolve(&token).await.is_none());
        assert!(!registry.revoke(&token).await);
    }

    #[test]
    fn test_token_extracted_from_cookie_header() {
        assert_eq!(
            token_from_cookie_header("session=abc123").as_deref(),
            Some("abc123")
        );
        // Other cookies and whitespace around pairs don't matter
        assert_eq!(
            token_from_cookie_header("theme=dark; session=abc123 ;lang=en").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_token_with_equals_sign_survives() {
        assert_eq!(
            token_from_cookie_header("session=abc=def==").as_deref(),
            Some("abc=def==")
        );
    }

    #[test]
    fn test_no_session_cookie_yields_none() {
        assert!(token_from_cookie_header("").is_none());
        assert!(token_from_cookie_header("theme=dark; lang=en").is_none());
        // Name must match exactly
        assert!(token_from_cookie_header("session2=abc").is_none());
        assert!(token_from_cookie_header("session").is_none());
    }

    #[tokio::test]
    async fn test_authenticate_accepts_live_session() {
        let registry = SessionRegistry::new();
        let token = registry.issue("hooper").await;

        let header = format!("theme=dark; {}={}", SESSION_COOKIE, token);
        assert_eq!(
            registry.authenticate(Some(&header)).await.as_deref(),
            Some("hooper")
        );
    }

    #[tokio::test]
    async fn test_authenticate_refuses_unauthenticated_requests() {
        let registry = SessionRegistry::new();

        // No Cookie header at all
        assert!(registry.authenticate(None).await.is_none());
        // Header without a session cookie
        assert!(registry.authenticate(Some("theme=dark")).await.is_none());
        // Token that was never issued
        assert!(registry
            .authenticate(Some("session=forged-token"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_authenticate_refuses_revoked_session() {
        let registry = SessionRegistry::new();
        let token = registry.issue("hooper").await;
        registry.revoke(&token).await;

        let header = format!("{}={}", SESSION_COOKIE, token);
        assert!(registry.authenticate(Some(&header)).await.is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_login() {
        let registry = SessionRegistry::new();

        let a = registry.issue("hooper").await;
        let b = registry.issue("hooper").await;
        assert_ne!(a, b);
        assert_eq!(registry.active().await, 2);
    }
}
