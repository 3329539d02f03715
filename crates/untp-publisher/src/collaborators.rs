//! # External Collaborator Boundaries
//!
//! The issuance engine and artifact storage service live outside this
//! system; only their boundary is specified here. Implementations wrap
//! the real services; tests substitute recording mocks. Collaborator
//! failures carry whatever message the service produced — the pipeline
//! propagates them unmodified, without retry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// What the issuance collaborator needs to sign and encode one
/// credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    /// JSON-LD context URIs.
    pub context: Vec<String>,
    /// Credential type array.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,
    /// Issuer DID.
    pub issuer: String,
    /// The subject data being attested.
    pub credential_subject: Value,
    /// Render template for human-readable presentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_template: Option<Value>,
    /// Optional credential id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Issuance API base URL.
    pub api_url: String,
    /// Custom headers forwarded on the issuance call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// Issuance failure, propagated unmodified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct IssuerError(pub String);

/// Storage failure, propagated unmodified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct StorageError(pub String);

/// Signs and encodes a credential document. The result is either an
/// expanded JSON-LD document or an enveloped token wrapper.
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    async fn issue(&self, request: IssueRequest) -> Result<Value, IssuerError>;
}

/// Persists an issued document under a key and returns a reference.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn upload(&self, document: &Value, key: &str) -> Result<StorageReference, StorageError>;
}

/// Client-local cache of the input payload, purged after a successful
/// digital-product-passport publish.
pub trait InputCache: Send + Sync {
    fn purge(&self, key: &str);
}

/// What the storage collaborator hands back: a bare URI or a
/// `{uri, key, hash}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StorageReference {
    /// Bare URI of the stored document.
    Uri(String),
    /// Structured reference including the storage key and content hash.
    Object {
        /// URI of the stored document.
        uri: String,
        /// Key the document was stored under.
        key: String,
        /// Content hash of the stored document.
        hash: String,
    },
}

impl StorageReference {
    /// URI of the stored document, whichever shape was returned.
    pub fn uri(&self) -> &str {
        match self {
            Self::Uri(uri) => uri,
            Self::Object { uri, .. } => uri,
        }
    }

    /// The `payload` object embedded in verification links.
    pub fn query_payload(&self) -> Value {
        match self {
            Self::Uri(uri) => serde_json::json!({ "uri": uri }),
            Self::Object { uri, key, hash } => {
                serde_json::json!({ "uri": uri, "key": key, "hash": hash })
            }
        }
    }
}
