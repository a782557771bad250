//! Profile payload, read from `users/{uid}` with auth-profile fallbacks.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{require_session, DataSource, FetchError};
use crate::auth::Session;
use crate::store::DocumentStore;

pub const GUEST_NAME: &str = "Guest User";
pub const NO_EMAIL: &str = "Not logged in";

/// Generated initials avatar for `name`.
pub fn default_avatar_url(name: &str) -> String {
    let name = name.trim();
    let name = if name.is_empty() { "User" } else { name };
    format!(
        "https://ui-avatars.com/api/?name={}&background=A020F0&color=FFFFFF&size=100",
        urlencoding::encode(name)
    )
}

/// `users/{uid}` document path
pub fn user_doc_path(uid: &str) -> String {
    format!("users/{}", uid)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image_url: String,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(GUEST_NAME)
    }

    pub fn display_email(&self) -> &str {
        self.email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(NO_EMAIL)
    }
}

/// Reads the signed-in user's profile document.
pub struct ProfileSource {
    store: Arc<dyn DocumentStore>,
}

impl ProfileSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DataSource<UserProfile> for ProfileSource {
    async fn load(&self, session: Option<&Session>) -> Result<UserProfile, FetchError> {
        let session = require_session(session)?;
        let document = self.store.get_document(&user_doc_path(&session.uid)).await?;

        let stored_name = document
            .as_ref()
            .and_then(|d| d.get_str("name"))
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string);
        let name = session.display_name.clone().or(stored_name);

        let image_url = document
            .as_ref()
            .and_then(|d| d.get_str("profileImageUrl"))
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .or_else(|| session.photo_url.clone())
            .unwrap_or_else(|| default_avatar_url(name.as_deref().unwrap_or_default()));

        debug!(
            "Loaded profile for {} (document: {})",
            session.uid,
            document.is_some()
        );

        Ok(UserProfile {
            name,
            email: session.email.clone(),
            image_url,
        })
    }
}
