//! Firebase Authentication over the Identity Toolkit REST API.
//!
//! Endpoints used:
//! - `accounts:signInWithPassword` (log in)
//! - `accounts:signUp` + `accounts:update` (create account, set display name)
//! - `securetoken.googleapis.com/v1/token` (refresh an expired ID token)
//!
//! Every session change is published to the owned [`SessionHub`].

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{
    validate_credentials, AuthError, AuthService, Session, SessionHub, SessionProvider,
    SignUpRequest, TokenSource,
};

pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

const SESSION_FILE: &str = "session.json";

/// Tokens this close to expiry are refreshed before use
const REFRESH_MARGIN_SECS: i64 = 60;

/// Endpoint configuration
#[derive(Clone, Debug)]
pub struct FirebaseEndpoints {
    pub api_key: String,
    pub auth_url: String,
    pub token_url: String,
}

/// Firebase-backed account service.
pub struct FirebaseAuth {
    client: Client,
    endpoints: FirebaseEndpoints,
    hub: SessionHub,
    /// Where to persist the signed-in session (None = memory only)
    session_file: Option<PathBuf>,
    /// Held while refreshing so concurrent requests share one refresh
    refreshing: Mutex<()>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Seconds, as a decimal string
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

impl AccountResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .map(|secs| Utc::now() + Duration::seconds(secs));
        Session {
            uid: self.local_id,
            email: self.email,
            display_name: self.display_name.filter(|n| !n.is_empty()),
            photo_url: self.photo_url.filter(|u| !u.is_empty()),
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

/// Map an Identity Toolkit error code to a user-facing error.
///
/// Codes can carry a detail suffix: `"WEAK_PASSWORD : Password should be at least 6 characters"`.
pub fn map_error_code(message: &str) -> AuthError {
    let (code, detail) = match message.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (message.trim(), None),
    };
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "EMAIL_EXISTS" => AuthError::EmailInUse,
        "WEAK_PASSWORD" => AuthError::WeakPassword(
            detail
                .unwrap_or("Password should be at least 6 characters")
                .to_string(),
        ),
        "INVALID_EMAIL" | "MISSING_EMAIL" => AuthError::InvalidEmail,
        "MISSING_PASSWORD" => AuthError::MissingField("Password"),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        "USER_DISABLED" => AuthError::UserDisabled,
        other => AuthError::Service(other.to_string()),
    }
}

fn network(e: reqwest::Error) -> AuthError {
    AuthError::Network(e.to_string())
}

impl FirebaseAuth {
    pub fn new(endpoints: FirebaseEndpoints, hub: SessionHub) -> Self {
        Self {
            client: Client::new(),
            endpoints,
            hub,
            session_file: None,
            refreshing: Mutex::new(()),
        }
    }

    /// Persist the signed-in session under `data_dir`
    pub fn with_persistence(mut self, data_dir: PathBuf) -> Self {
        self.session_file = Some(data_dir.join(SESSION_FILE));
        self
    }

    pub fn hub(&self) -> &SessionHub {
        &self.hub
    }

    fn account_url(&self, method: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.endpoints.auth_url.trim_end_matches('/'),
            method,
            urlencoding::encode(&self.endpoints.api_key)
        )
    }

    async fn post_account<B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<AccountResponse, AuthError> {
        let response = self
            .client
            .post(self.account_url(method))
            .json(body)
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => map_error_code(&envelope.error.message),
                Err(_) => AuthError::Service(format!("HTTP {}", status.as_u16())),
            });
        }

        response
            .json::<AccountResponse>()
            .await
            .map_err(|e| AuthError::Service(format!("Unexpected response: {}", e)))
    }

    async fn refresh(&self, session: &Session) -> Result<Session, AuthError> {
        let refresh_token = session
            .refresh_token
            .as_deref()
            .ok_or_else(|| AuthError::Service("Session cannot be refreshed".to_string()))?;

        let url = format!(
            "{}/token?key={}",
            self.endpoints.token_url.trim_end_matches('/'),
            urlencoding::encode(&self.endpoints.api_key)
        );
        let response = self
            .client
            .post(url)
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => map_error_code(&envelope.error.message),
                Err(_) => AuthError::Service("Token refresh failed".to_string()),
            });
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Service(format!("Unexpected response: {}", e)))?;
        let expires_at = refreshed
            .expires_in
            .parse::<i64>()
            .ok()
            .map(|secs| Utc::now() + Duration::seconds(secs));

        Ok(Session {
            id_token: refreshed.id_token,
            refresh_token: Some(refreshed.refresh_token),
            expires_at,
            ..session.clone()
        })
    }

    async fn load_persisted(&self) -> Option<Session> {
        let path = self.session_file.as_ref()?;
        let content = tokio::fs::read_to_string(path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn persist(&self, session: Option<&Session>) {
        let Some(path) = self.session_file.as_ref() else {
            return;
        };
        let result = match session {
            Some(session) => {
                if let Some(parent) = path.parent() {
                    if let Err(e) = tokio::fs::create_dir_all(parent).await {
                        warn!("Failed to create data directory: {}", e);
                        return;
                    }
                }
                match serde_json::to_string_pretty(session) {
                    Ok(json) => tokio::fs::write(path, json).await,
                    Err(e) => Err(std::io::Error::other(e)),
                }
            }
            None => match tokio::fs::remove_file(path).await {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            warn!("Failed to update session file {}: {}", path.display(), e);
        }
    }

    async fn publish(&self, session: Option<Session>) {
        self.persist(session.as_ref()).await;
        self.hub.publish(session);
    }
}

#[async_trait]
impl AuthService for FirebaseAuth {
    async fn restore(&self) -> Result<Option<Session>, AuthError> {
        let restored = match self.load_persisted().await {
            Some(session) if session.is_expired(Utc::now()) => {
                debug!("Persisted session expired, refreshing");
                match self.refresh(&session).await {
                    Ok(fresh) => Some(fresh),
                    Err(e) => {
                        warn!("Could not refresh persisted session: {}", e);
                        None
                    }
                }
            }
            other => other,
        };
        if let Some(ref session) = restored {
            info!("Restored session for {}", session.uid);
        }
        self.publish(restored.clone()).await;
        Ok(restored)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate_credentials(email, password)?;

        let account = self
            .post_account(
                "signInWithPassword",
                &PasswordRequest {
                    email: email.trim(),
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        let session = account.into_session();
        info!("Signed in as {}", session.uid);
        self.publish(Some(session.clone())).await;
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<Session, AuthError> {
        request.validate()?;

        let created = self
            .post_account(
                "signUp",
                &PasswordRequest {
                    email: request.email.trim(),
                    password: &request.password,
                    return_secure_token: true,
                },
            )
            .await?
            .into_session();

        let named = self
            .post_account(
                "update",
                &json!({
                    "idToken": created.id_token,
                    "displayName": request.name.trim(),
                    "returnSecureToken": true,
                }),
            )
            .await;

        let session = match named {
            Ok(updated) => {
                let mut session = updated.into_session();
                // accounts:update omits the refresh token on some backends
                if session.refresh_token.is_none() {
                    session.refresh_token = created.refresh_token.clone();
                }
                session
            }
            Err(e) => {
                warn!("Account created but display name not set: {}", e);
                created
            }
        };

        info!("Created account {}", session.uid);
        self.publish(Some(session.clone())).await;
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        info!("Signing out");
        self.publish(None).await;
        Ok(())
    }
}

#[async_trait]
impl TokenSource for FirebaseAuth {
    async fn id_token(&self) -> Result<Option<String>, AuthError> {
        let due = || Utc::now() + Duration::seconds(REFRESH_MARGIN_SECS);
        let Some(session) = self.hub.current() else {
            return Ok(None);
        };
        if !session.is_expired(due()) {
            return Ok(Some(session.id_token));
        }

        let _refreshing = self.refreshing.lock().await;
        // Another request may have refreshed, or the user signed out, meanwhile
        let Some(session) = self.hub.current() else {
            return Ok(None);
        };
        if !session.is_expired(due()) {
            return Ok(Some(session.id_token));
        }

        debug!("ID token for {} expired, refreshing", session.uid);
        let fresh = self.refresh(&session).await.inspect_err(|e| {
            warn!("Token refresh for {} failed: {}", session.uid, e);
        })?;
        if !self.hub.current().is_some_and(|s| s.uid == fresh.uid) {
            debug!("Session changed during refresh, discarding token");
            return Ok(None);
        }
        let token = fresh.id_token.clone();
        self.publish(Some(fresh)).await;
        Ok(Some(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> FirebaseEndpoints {
        FirebaseEndpoints {
            api_key: "key with space".to_string(),
            auth_url: "http://127.0.0.1:9/v1/".to_string(),
            token_url: "http://127.0.0.1:9/v1".to_string(),
        }
    }

    fn session() -> Session {
        Session {
            uid: "u1".to_string(),
            email: Some("a@b.co".to_string()),
            display_name: Some("A".to_string()),
            photo_url: None,
            id_token: "id".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Some(Utc::now() + Duration::hours(1)),
        }
    }

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(
            map_error_code("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
        assert_eq!(map_error_code("EMAIL_EXISTS"), AuthError::EmailInUse);
        assert_eq!(
            map_error_code("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::WeakPassword("Password should be at least 6 characters".to_string())
        );
        assert_eq!(
            map_error_code("SOMETHING_NEW"),
            AuthError::Service("SOMETHING_NEW".to_string())
        );
    }

    #[test]
    fn test_account_url_encodes_key() {
        let auth = FirebaseAuth::new(endpoints(), SessionHub::new());
        assert_eq!(
            auth.account_url("signUp"),
            "http://127.0.0.1:9/v1/accounts:signUp?key=key%20with%20space"
        );
    }

    #[test]
    fn test_account_response_to_session() {
        let account: AccountResponse = serde_json::from_value(json!({
            "localId": "abc",
            "email": "a@b.co",
            "displayName": "",
            "idToken": "id",
            "refreshToken": "r",
            "expiresIn": "3600"
        }))
        .unwrap();
        let session = account.into_session();
        assert_eq!(session.uid, "abc");
        assert!(session.display_name.is_none());
        assert!(!session.is_expired(Utc::now()));
    }

    #[tokio::test]
    async fn test_restore_without_persistence_resolves_signed_out() {
        let hub = SessionHub::new();
        let auth = FirebaseAuth::new(endpoints(), hub.clone());
        assert!(auth.restore().await.unwrap().is_none());
        assert!(hub.is_resolved());
        assert!(hub.current().is_none());
    }

    #[tokio::test]
    async fn test_persisted_session_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let hub = SessionHub::new();
        let auth = FirebaseAuth::new(endpoints(), hub.clone())
            .with_persistence(dir.path().to_path_buf());

        auth.publish(Some(session())).await;
        assert!(dir.path().join(SESSION_FILE).exists());

        let restored = auth.restore().await.unwrap();
        assert_eq!(restored.map(|s| s.uid), Some("u1".to_string()));

        auth.sign_out().await.unwrap();
        assert!(!dir.path().join(SESSION_FILE).exists());
        assert!(hub.current().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_that_cannot_refresh_is_dropped() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut expired = session();
        expired.expires_at = Some(Utc::now() - Duration::minutes(5));
        expired.refresh_token = None;
        std::fs::write(
            dir.path().join(SESSION_FILE),
            serde_json::to_string(&expired).unwrap(),
        )
        .unwrap();

        let hub = SessionHub::new();
        let auth =
            FirebaseAuth::new(endpoints(), hub.clone()).with_persistence(dir.path().to_path_buf());
        assert!(auth.restore().await.unwrap().is_none());
        assert!(hub.is_resolved());
    }

    #[tokio::test]
    async fn test_fresh_token_is_used_without_refresh() {
        let hub = SessionHub::new();
        let auth = FirebaseAuth::new(endpoints(), hub.clone());
        assert_eq!(auth.id_token().await.unwrap(), None);

        hub.publish(Some(session()));
        assert_eq!(auth.id_token().await.unwrap(), Some("id".to_string()));
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token_fails() {
        let hub = SessionHub::new();
        let auth = FirebaseAuth::new(endpoints(), hub.clone());
        let mut expired = session();
        expired.expires_at = Some(Utc::now() - Duration::minutes(1));
        expired.refresh_token = None;
        hub.publish(Some(expired));

        assert!(auth.id_token().await.is_err());
    }

    #[tokio::test]
    async fn test_sign_in_validates_before_network() {
        let auth = FirebaseAuth::new(endpoints(), SessionHub::new());
        let err = auth.sign_in("", "pw").await.unwrap_err();
        assert_eq!(err, AuthError::MissingField("Email"));
    }
}
