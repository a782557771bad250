//! Mock Firebase backend for testing
//!
//! Serves three REST surfaces from one listener:
//! - `/identity/v1/accounts:{method}` (signUp, signInWithPassword, update)
//! - `/token/v1/token` (refresh-token grant)
//! - `/firestore/v1/projects/{project}/databases/(default)/documents/...`
//!
//! Firestore documents are kept in their typed-value encoding, as the real
//! service returns them.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub const API_KEY: &str = "test-api-key";
pub const PROJECT_ID: &str = "fitz-test";

/// Mock account record
#[derive(Debug, Clone)]
pub struct MockAccount {
    pub uid: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Default)]
struct MockFirebaseState {
    /// Keyed by lowercased email
    accounts: HashMap<String, MockAccount>,
    /// id token -> uid
    id_tokens: HashMap<String, String>,
    /// refresh token -> uid
    refresh_tokens: HashMap<String, String>,
    /// Document path -> typed fields
    documents: BTreeMap<String, Map<String, Value>>,
    /// Paths (prefixes) that answer 403
    denied: Vec<String>,
    /// Identity methods in call order
    calls: Vec<String>,
    next_id: u64,
}

impl MockFirebaseState {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn issue_tokens(&mut self, uid: &str) -> (String, String) {
        let n = self.next();
        let id_token = format!("id-{}-{}", uid, n);
        let refresh_token = format!("refresh-{}-{}", uid, n);
        self.id_tokens.insert(id_token.clone(), uid.to_string());
        self.refresh_tokens
            .insert(refresh_token.clone(), uid.to_string());
        (id_token, refresh_token)
    }

    fn account_by_uid(&self, uid: &str) -> Option<&MockAccount> {
        self.accounts.values().find(|a| a.uid == uid)
    }
}

/// Mock Firebase server
pub struct MockFirebase {
    addr: SocketAddr,
    state: Arc<RwLock<MockFirebaseState>>,
    handle: JoinHandle<()>,
}

impl MockFirebase {
    /// Start a mock Firebase server on a random port
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockFirebaseState::default()));

        let app = Router::new()
            .route("/identity/v1/{method}", post(handle_identity))
            .route("/token/v1/token", post(handle_token))
            .route(
                "/firestore/v1/{*path}",
                get(handle_get_document).patch(handle_patch_document),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn auth_url(&self) -> String {
        format!("http://{}/identity/v1", self.addr)
    }

    pub fn token_url(&self) -> String {
        format!("http://{}/token/v1", self.addr)
    }

    pub fn firestore_url(&self) -> String {
        format!("http://{}/firestore/v1", self.addr)
    }

    /// Register an account; returns its uid
    pub async fn add_account(&self, email: &str, password: &str, name: Option<&str>) -> String {
        let mut state = self.state.write().await;
        let uid = format!("uid-{}", state.next());
        state.accounts.insert(
            email.to_lowercase(),
            MockAccount {
                uid: uid.clone(),
                email: email.to_string(),
                password: password.to_string(),
                display_name: name.map(str::to_string),
            },
        );
        uid
    }

    pub async fn account(&self, email: &str) -> Option<MockAccount> {
        self.state
            .read()
            .await
            .accounts
            .get(&email.to_lowercase())
            .cloned()
    }

    /// Issue a refresh token for `uid` without signing in
    pub async fn issue_refresh_token(&self, uid: &str) -> String {
        self.state.write().await.issue_tokens(uid).1
    }

    /// Store a document in typed-value form
    pub async fn seed_document(&self, path: &str, typed_fields: Value) {
        let fields = typed_fields.as_object().cloned().unwrap_or_default();
        self.state
            .write()
            .await
            .documents
            .insert(path.trim_matches('/').to_string(), fields);
    }

    /// Typed fields of a stored document
    pub async fn document(&self, path: &str) -> Option<Map<String, Value>> {
        self.state
            .read()
            .await
            .documents
            .get(path.trim_matches('/'))
            .cloned()
    }

    /// Answer 403 for every document path starting with `prefix`
    pub async fn deny(&self, prefix: &str) {
        self.state.write().await.denied.push(prefix.to_string());
    }

    /// Identity methods called so far
    pub async fn calls(&self) -> Vec<String> {
        self.state.read().await.calls.clone()
    }

    /// Stop the mock server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

fn identity_error(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "code": 400, "message": message } })),
    )
}

fn account_response(account: &MockAccount, id_token: &str, refresh_token: Option<&str>) -> Value {
    let mut body = json!({
        "localId": account.uid,
        "email": account.email,
        "displayName": account.display_name.clone().unwrap_or_default(),
        "idToken": id_token,
        "expiresIn": "3600",
    });
    if let Some(refresh_token) = refresh_token {
        body["refreshToken"] = json!(refresh_token);
    }
    body
}

async fn handle_identity(
    State(state): State<Arc<RwLock<MockFirebaseState>>>,
    Path(method): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if query.get("key").map(String::as_str) != Some(API_KEY) {
        return identity_error("API key not valid. Please pass a valid API key.");
    }

    let mut state = state.write().await;
    let method = method.trim_start_matches("accounts:").to_string();
    state.calls.push(method.clone());

    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    match method.as_str() {
        "signUp" => {
            if email.is_empty() {
                return identity_error("MISSING_EMAIL");
            }
            if state.accounts.contains_key(&email.to_lowercase()) {
                return identity_error("EMAIL_EXISTS");
            }
            if password.len() < 6 {
                return identity_error("WEAK_PASSWORD : Password should be at least 6 characters");
            }
            let uid = format!("uid-{}", state.next());
            let account = MockAccount {
                uid: uid.clone(),
                email: email.clone(),
                password,
                display_name: None,
            };
            state.accounts.insert(email.to_lowercase(), account.clone());
            let (id_token, refresh_token) = state.issue_tokens(&uid);
            (
                StatusCode::OK,
                Json(account_response(&account, &id_token, Some(&refresh_token))),
            )
        }
        "signInWithPassword" => {
            let Some(account) = state.accounts.get(&email.to_lowercase()).cloned() else {
                return identity_error("EMAIL_NOT_FOUND");
            };
            if account.password != password {
                return identity_error("INVALID_PASSWORD");
            }
            let (id_token, refresh_token) = state.issue_tokens(&account.uid);
            (
                StatusCode::OK,
                Json(account_response(&account, &id_token, Some(&refresh_token))),
            )
        }
        "update" => {
            let id_token = body["idToken"].as_str().unwrap_or_default().to_string();
            let Some(uid) = state.id_tokens.get(&id_token).cloned() else {
                return identity_error("INVALID_ID_TOKEN");
            };
            let display_name = body["displayName"].as_str().map(str::to_string);
            let Some(account) = state.accounts.values_mut().find(|a| a.uid == uid) else {
                return identity_error("USER_NOT_FOUND");
            };
            account.display_name = display_name;
            let account = account.clone();
            // No refreshToken in the update response
            (
                StatusCode::OK,
                Json(account_response(&account, &id_token, None)),
            )
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

async fn handle_token(
    State(state): State<Arc<RwLock<MockFirebaseState>>>,
    Query(query): Query<HashMap<String, String>>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if query.get("key").map(String::as_str) != Some(API_KEY) {
        return identity_error("API key not valid. Please pass a valid API key.");
    }
    if form.get("grant_type").map(String::as_str) != Some("refresh_token") {
        return identity_error("INVALID_GRANT_TYPE");
    }

    let mut state = state.write().await;
    state.calls.push("token".to_string());
    let presented = form.get("refresh_token").cloned().unwrap_or_default();
    let Some(uid) = state.refresh_tokens.remove(&presented) else {
        return identity_error("INVALID_REFRESH_TOKEN");
    };
    if state.account_by_uid(&uid).is_none() {
        return identity_error("USER_NOT_FOUND");
    }
    let (id_token, refresh_token) = state.issue_tokens(&uid);
    (
        StatusCode::OK,
        Json(json!({
            "id_token": id_token,
            "refresh_token": refresh_token,
            "expires_in": "3600",
            "user_id": uid,
        })),
    )
}

/// Document path relative to the database root
fn relative(path: &str) -> Option<String> {
    path.find("documents/")
        .map(|idx| path[idx + "documents/".len()..].trim_matches('/').to_string())
}

fn document_name(path: &str) -> String {
    format!(
        "projects/{}/databases/(default)/documents/{}",
        PROJECT_ID, path
    )
}

fn firestore_error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "error": { "code": status.as_u16(), "message": message } })),
    )
}

/// Checks the bearer token and path rules. Err carries the response to send.
fn authorize(
    state: &MockFirebaseState,
    headers: &HeaderMap,
    path: &str,
) -> Result<(), (StatusCode, Json<Value>)> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    if !state.id_tokens.contains_key(token) {
        return Err(firestore_error(
            StatusCode::UNAUTHORIZED,
            "Request had invalid authentication credentials.",
        ));
    }
    if state.denied.iter().any(|prefix| path.starts_with(prefix)) {
        return Err(firestore_error(
            StatusCode::FORBIDDEN,
            "Missing or insufficient permissions.",
        ));
    }
    Ok(())
}

async fn handle_get_document(
    State(state): State<Arc<RwLock<MockFirebaseState>>>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let Some(path) = relative(&path) else {
        return firestore_error(StatusCode::BAD_REQUEST, "Invalid resource name");
    };
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers, &path) {
        return response;
    }

    let segments = path.split('/').count();
    if segments % 2 == 0 {
        return match state.documents.get(&path) {
            Some(fields) => (
                StatusCode::OK,
                Json(json!({ "name": document_name(&path), "fields": fields })),
            ),
            None => firestore_error(StatusCode::NOT_FOUND, "Document not found"),
        };
    }

    // Collection listing: direct children only, key order
    let page_size = query
        .get("pageSize")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    let prefix = format!("{}/", path);
    let documents: Vec<Value> = state
        .documents
        .iter()
        .filter(|(key, _)| {
            key.strip_prefix(&prefix)
                .is_some_and(|rest| !rest.contains('/'))
        })
        .take(page_size)
        .map(|(key, fields)| json!({ "name": document_name(key), "fields": fields }))
        .collect();

    if documents.is_empty() {
        return (StatusCode::OK, Json(json!({})));
    }
    (StatusCode::OK, Json(json!({ "documents": documents })))
}

async fn handle_patch_document(
    State(state): State<Arc<RwLock<MockFirebaseState>>>,
    Path(path): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(path) = relative(&path) else {
        return firestore_error(StatusCode::BAD_REQUEST, "Invalid resource name");
    };
    let mut state = state.write().await;
    if let Err(response) = authorize(&state, &headers, &path) {
        return response;
    }

    let fields = body["fields"].as_object().cloned().unwrap_or_default();
    state.documents.insert(path.clone(), fields.clone());
    (
        StatusCode::OK,
        Json(json!({ "name": document_name(&path), "fields": fields })),
    )
}
