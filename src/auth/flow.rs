//! Form flows: log in, sign up and log out, each ending in a navigation.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use super::{AuthError, AuthService, Session, SignUpRequest};
use crate::nav::{Navigator, Screen};
use crate::screens::profile::{default_avatar_url, user_doc_path};
use crate::store::DocumentStore;

/// Sign in and land on the tab stack.
pub async fn log_in(
    auth: &dyn AuthService,
    nav: &dyn Navigator,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let session = auth.sign_in(email, password).await?;
    nav.replace(Screen::Home);
    Ok(session)
}

/// Fields of a new `users/{uid}` document
pub fn profile_fields(request: &SignUpRequest) -> Map<String, Value> {
    let name = request.name.trim();
    let mut fields = Map::new();
    fields.insert("name".to_string(), json!(name));
    fields.insert("email".to_string(), json!(request.email.trim()));
    fields.insert(
        "createdAt".to_string(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    fields.insert(
        "profileImageUrl".to_string(),
        json!(default_avatar_url(name)),
    );
    fields
}

/// Create the account, write its profile document, then land on the tab stack.
///
/// The new account stays signed in. If the profile write fails the account still
/// exists; the error is returned so the form can report it.
pub async fn sign_up(
    auth: &dyn AuthService,
    store: &dyn DocumentStore,
    nav: &dyn Navigator,
    request: &SignUpRequest,
) -> Result<Session, AuthError> {
    let session = auth.sign_up(request).await?;

    let path = user_doc_path(&session.uid);
    if let Err(e) = store.set_document(&path, profile_fields(request)).await {
        warn!("Profile document {} not written: {}", path, e);
        return Err(AuthError::Storage(e.to_string()));
    }
    info!("Profile document written for {}", session.uid);

    nav.replace(Screen::Home);
    Ok(session)
}

/// Sign out and return to the login screen.
pub async fn log_out(auth: &dyn AuthService, nav: &dyn Navigator) -> Result<(), AuthError> {
    auth.sign_out().await?;
    nav.replace(Screen::Login);
    Ok(())
}
