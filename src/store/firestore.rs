//! Firestore REST client.
//!
//! Documents travel as typed values (`{"stringValue": "..."}`); this module converts
//! between that encoding and plain JSON so the rest of the crate only sees
//! `serde_json::Value`.
//!
//! API reference: https://firebase.google.com/docs/firestore/reference/rest

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Number, Value};
use tracing::{debug, warn};

use super::{Document, DocumentStore, StoreError};
use crate::auth::{AuthError, TokenSource};

pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Document store backed by Cloud Firestore, authorized with the current session's token.
pub struct FirestoreStore {
    client: Client,
    /// `{base}/projects/{project}/databases/(default)/documents`
    documents_url: String,
    tokens: Arc<dyn TokenSource>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
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

impl FirestoreStore {
    pub fn new(
        base_url: &str,
        project_id: &str,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self::with_client(Client::new(), base_url, project_id, tokens)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        project_id: &str,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let documents_url = format!(
            "{}/projects/{}/databases/(default)/documents",
            base_url.trim_end_matches('/'),
            project_id
        );
        Self {
            client,
            documents_url,
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.documents_url, path.trim_matches('/'))
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, StoreError> {
        let token = self
            .tokens
            .id_token()
            .await
            .map_err(|e| match e {
                AuthError::Network(message) => StoreError::Network(message),
                other => {
                    warn!("No usable ID token: {}", other);
                    StoreError::NotAuthenticated
                }
            })?
            .ok_or(StoreError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Strip the resource prefix from a document name
    fn relative_path(&self, name: &str) -> String {
        match name.find("/documents/") {
            Some(idx) => name[idx + "/documents/".len()..].to_string(),
            None => name.to_string(),
        }
    }

    fn into_document(&self, raw: RawDocument) -> Document {
        Document::new(self.relative_path(&raw.name), decode_fields(&raw.fields))
    }
}

async fn error_for(response: reqwest::Response, path: &str) -> StoreError {
    let status = response.status();
    if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
        return StoreError::PermissionDenied(path.to_string());
    }
    let message = match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => envelope.error.message,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    StoreError::Http {
        status: status.as_u16(),
        message,
    }
}

fn network(e: reqwest::Error) -> StoreError {
    StoreError::Network(e.to_string())
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get_document(&self, path: &str) -> Result<Option<Document>, StoreError> {
        let request = self.authorized(self.client.get(self.url(path))).await?;
        let response = request.send().await.map_err(network)?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Document {} not found", path);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_for(response, path).await);
        }

        let raw: RawDocument = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(self.into_document(raw)))
    }

    async fn set_document(
        &self,
        path: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let body = json!({ "fields": encode_fields(&fields) });
        let request = self.authorized(self.client.patch(self.url(path)).json(&body)).await?;
        let response = request.send().await.map_err(network)?;

        if !response.status().is_success() {
            let err = error_for(response, path).await;
            warn!("Failed to write {}: {}", path, err);
            return Err(err);
        }
        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let request = self
            .authorized(
                self.client
                    .get(self.url(collection))
                    .query(&[("pageSize", limit.to_string())]),
            )
            .await?;
        let response = request.send().await.map_err(network)?;

        // A collection that was never written reads as 404 on some backends
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(error_for(response, collection).await);
        }

        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(list
            .documents
            .into_iter()
            .map(|raw| self.into_document(raw))
            .collect())
    }
}

// =============================================================================
// Typed value codec
// =============================================================================

/// Plain JSON → Firestore typed value
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // int64 is carried as a string
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or(0.0) })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

/// Firestore typed value → plain JSON. Unknown encodings decode to `null`.
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or(false)),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                other => other.as_i64(),
            };
            parsed.map(Value::from).unwrap_or(Value::Null)
        }
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionHub;

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_value(&json!("x")), json!({"stringValue": "x"}));
        assert_eq!(encode_value(&json!(45)), json!({"integerValue": "45"}));
        assert_eq!(encode_value(&json!(2.5)), json!({"doubleValue": 2.5}));
        assert_eq!(encode_value(&json!(true)), json!({"booleanValue": true}));
        assert_eq!(encode_value(&Value::Null), json!({"nullValue": null}));
    }

    #[test]
    fn test_decode_nested_document() {
        let raw = json!({
            "name": {"stringValue": "Morning Energy Boost"},
            "tracks_count": {"integerValue": "45"},
            "rating": {"doubleValue": 4.5},
            "tags": {"arrayValue": {"values": [{"stringValue": "cardio"}]}},
            "owner": {"mapValue": {"fields": {"name": {"stringValue": "Fitness App"}}}},
            "empty": {"arrayValue": {}},
            "createdAt": {"timestampValue": "2024-10-23T10:00:00Z"}
        });
        let decoded = decode_fields(raw.as_object().unwrap());
        assert_eq!(
            Value::Object(decoded),
            json!({
                "name": "Morning Energy Boost",
                "tracks_count": 45,
                "rating": 4.5,
                "tags": ["cardio"],
                "owner": {"name": "Fitness App"},
                "empty": [],
                "createdAt": "2024-10-23T10:00:00Z"
            })
        );
    }

    #[test]
    fn test_unknown_encoding_is_null() {
        assert_eq!(decode_value(&json!({"mysteryValue": 1})), Value::Null);
        assert_eq!(decode_value(&json!("bare")), Value::Null);
    }

    #[test]
    fn test_relative_path() {
        let store = FirestoreStore::new(
            "http://localhost:8080/v1/",
            "demo",
            Arc::new(SessionHub::new()),
        );
        assert_eq!(
            store.relative_path("projects/demo/databases/(default)/documents/users/u1"),
            "users/u1"
        );
        assert_eq!(
            store.url("/users/u1"),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents/users/u1"
        );
    }

    #[tokio::test]
    async fn test_requests_require_session() {
        let store = FirestoreStore::new(
            "http://127.0.0.1:9",
            "demo",
            Arc::new(SessionHub::new()),
        );
        let err = store.get_document("users/u1").await.unwrap_err();
        assert_eq!(err, StoreError::NotAuthenticated);
        assert_eq!(err.to_string(), "No user logged in");
    }
}
