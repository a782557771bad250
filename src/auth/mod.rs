//! Authentication: sessions, the session notification seam, and account services.
//!
//! The session source is always injected as an `Arc<dyn SessionProvider>`; nothing
//! in the crate reaches for a process-wide auth singleton.

use std::fmt;
use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod firebase;
pub mod flow;
pub mod hub;
pub mod local;

pub use firebase::FirebaseAuth;
pub use hub::SessionHub;
pub use local::LocalAuth;

// =============================================================================
// Session
// =============================================================================

/// Authentication status as seen by observers of the session source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No notification has been observed yet
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// A signed-in user as reported by the auth service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Stable user identifier (document key in `users/{uid}`)
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    /// Bearer token for the document store
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether the bearer token has passed its expiry
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Display name, or the local part of the email, for greetings
    pub fn greeting_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.email.as_deref().and_then(|e| e.split('@').next()))
    }
}

// =============================================================================
// Session notification source
// =============================================================================

/// Callback invoked with the current session (or `None` when signed out).
pub type SessionCallback = Box<dyn Fn(Option<&Session>) + Send + Sync>;

/// Handle returned by [`SessionProvider::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Explicitly unsubscribe
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// External session-change notification source.
pub trait SessionProvider: Send + Sync {
    /// Register a listener. Once the source has resolved its initial state the
    /// callback fires immediately with the current session, then on every change.
    fn subscribe(&self, callback: SessionCallback) -> Subscription;

    /// Last known session without subscribing
    fn current(&self) -> Option<Session>;
}

/// Bearer tokens for authorized requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// ID token of the signed-in user, `None` when signed out. Implementations
    /// that can refresh do so once the token has expired.
    async fn id_token(&self) -> Result<Option<String>, AuthError>;
}

// =============================================================================
// Account service
// =============================================================================

/// Errors surfaced by the auth service. Display text is what the user sees.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("The email or password is incorrect.")]
    InvalidCredentials,
    #[error("An account already exists for this email.")]
    EmailInUse,
    #[error("Password is too weak: {0}")]
    WeakPassword(String),
    #[error("The email address is badly formatted.")]
    InvalidEmail,
    #[error("Too many attempts. Try again later.")]
    TooManyAttempts,
    #[error("This account has been disabled.")]
    UserDisabled,
    #[error("{0} is required.")]
    MissingField(&'static str),
    #[error("Network error: {0}")]
    Network(String),
    #[error("{0}")]
    Service(String),
    #[error("Could not save profile: {0}")]
    Storage(String),
}

/// Sign-up form payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Local validation before hitting the network.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::MissingField("Email"));
    }
    if password.is_empty() {
        return Err(AuthError::MissingField("Password"));
    }
    match EMAIL_RE.as_ref() {
        Some(re) if !re.is_match(email.trim()) => Err(AuthError::InvalidEmail),
        _ => Ok(()),
    }
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::MissingField("Full name"));
        }
        validate_credentials(&self.email, &self.password)
    }
}

/// Account operations of the remote auth service.
///
/// Implementations publish every session change to their [`SessionProvider`].
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the initial session (restore a persisted one, or report signed out)
    async fn restore(&self) -> Result<Option<Session>, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Create the account and set its display name. The new account is signed in.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn session() -> Session {
        Session {
            uid: "u1".to_string(),
            email: Some("jane.doe@example.com".to_string()),
            display_name: None,
            photo_url: None,
            id_token: "token".to_string(),
            refresh_token: None,
            expires_at: None,
        }
    }

    #[test]
    fn test_greeting_name_falls_back_to_email() {
        let mut s = session();
        assert_eq!(s.greeting_name(), Some("jane.doe"));
        s.display_name = Some("Jane Doe".to_string());
        assert_eq!(s.greeting_name(), Some("Jane Doe"));
    }

    #[test]
    fn test_session_expiry() {
        let mut s = session();
        let now = Utc::now();
        assert!(!s.is_expired(now));
        s.expires_at = Some(now - chrono::Duration::seconds(1));
        assert!(s.is_expired(now));
    }

    #[test]
    fn test_subscription_releases_once() {
        let released = Arc::new(AtomicUsize::new(0));
        let r = released.clone();
        let sub = Subscription::new(move || {
            r.fetch_add(1, Ordering::SeqCst);
        });
        sub.unsubscribe();
        assert_eq!(released.load(Ordering::SeqCst), 1);

        let r = released.clone();
        {
            let _sub = Subscription::new(move || {
                r.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_validate_credentials() {
        assert_eq!(
            validate_credentials("", "pw"),
            Err(AuthError::MissingField("Email"))
        );
        assert_eq!(
            validate_credentials("a@b.co", ""),
            Err(AuthError::MissingField("Password"))
        );
        assert_eq!(
            validate_credentials("not-an-email", "pw"),
            Err(AuthError::InvalidEmail)
        );
        assert!(validate_credentials("a@b.co", "pw").is_ok());
    }

    #[test]
    fn test_sign_up_requires_name() {
        let req = SignUpRequest {
            name: "  ".to_string(),
            email: "a@b.co".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(req.validate(), Err(AuthError::MissingField("Full name")));
    }
}
