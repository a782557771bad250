//! Offline account service.
//!
//! Used when no Firebase API key is configured. Accounts live in memory and, when a
//! data directory is given, in `accounts.json`. Passwords are stored as salted SHA-256.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{validate_credentials, AuthError, AuthService, Session, SessionHub, SignUpRequest};

const ACCOUNTS_FILE: &str = "accounts.json";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Account {
    uid: String,
    email: String,
    display_name: String,
    salt: String,
    password_hash: String,
}

pub struct LocalAuth {
    hub: SessionHub,
    /// Keyed by lowercased email
    accounts: Mutex<BTreeMap<String, Account>>,
    accounts_file: Option<PathBuf>,
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn random_hex(bytes: usize) -> String {
    let mut rng = rand::thread_rng();
    let buf: Vec<u8> = (0..bytes).map(|_| rng.gen()).collect();
    hex::encode(buf)
}

impl Account {
    fn session(&self) -> Session {
        Session {
            uid: self.uid.clone(),
            email: Some(self.email.clone()),
            display_name: Some(self.display_name.clone()),
            photo_url: None,
            id_token: format!("local-{}", self.uid),
            refresh_token: None,
            expires_at: None,
        }
    }
}

impl LocalAuth {
    pub fn new(hub: SessionHub) -> Self {
        Self {
            hub,
            accounts: Mutex::new(BTreeMap::new()),
            accounts_file: None,
        }
    }

    /// Load and persist accounts under `data_dir`
    pub fn with_data_dir(hub: SessionHub, data_dir: PathBuf) -> Self {
        let path = data_dir.join(ACCOUNTS_FILE);
        let accounts = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring unreadable {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            hub,
            accounts: Mutex::new(accounts),
            accounts_file: Some(path),
        }
    }

    pub fn hub(&self) -> &SessionHub {
        &self.hub
    }

    async fn save(&self, accounts: &BTreeMap<String, Account>) -> Result<(), AuthError> {
        let Some(path) = self.accounts_file.as_ref() else {
            return Ok(());
        };
        let storage = |e: std::io::Error| AuthError::Storage(e.to_string());
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(storage)?;
        }
        let json = serde_json::to_string_pretty(accounts)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        tokio::fs::write(path, json).await.map_err(storage)
    }
}

#[async_trait]
impl AuthService for LocalAuth {
    async fn restore(&self) -> Result<Option<Session>, AuthError> {
        // Sessions are not persisted offline; every launch starts signed out
        self.hub.publish(None);
        Ok(None)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate_credentials(email, password)?;
        let key = email.trim().to_lowercase();

        let session = {
            let accounts = self.accounts.lock().await;
            let account = accounts.get(&key).ok_or(AuthError::InvalidCredentials)?;
            if hash_password(&account.salt, password) != account.password_hash {
                return Err(AuthError::InvalidCredentials);
            }
            account.session()
        };

        info!("Signed in offline as {}", session.uid);
        self.hub.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<Session, AuthError> {
        request.validate()?;
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let key = request.email.trim().to_lowercase();

        let session = {
            let mut accounts = self.accounts.lock().await;
            if accounts.contains_key(&key) {
                return Err(AuthError::EmailInUse);
            }
            let salt = random_hex(16);
            let account = Account {
                uid: random_hex(14),
                email: request.email.trim().to_string(),
                display_name: request.name.trim().to_string(),
                password_hash: hash_password(&salt, &request.password),
                salt,
            };
            let session = account.session();
            accounts.insert(key.clone(), account);
            if let Err(e) = self.save(&accounts).await {
                accounts.remove(&key);
                return Err(e);
            }
            session
        };

        info!("Created offline account {}", session.uid);
        self.hub.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.hub.publish(None);
        Ok(())
    }
}
