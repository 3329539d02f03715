//! # Operation Contexts
//!
//! The per-request configuration bundle for one publish operation.
//! Constructed by the caller, validated once by
//! [`crate::validate::validate_context`], never mutated afterwards.
//!
//! Wire field names (`vckit`, `dlr`, `dlrLinkTitle`, ...) follow the
//! configuration format shared with the playground tooling; serde
//! renames keep the Rust names honest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use untp_core::IdentifierKeyPath;
use untp_resolver::{DlrConfig, PyxConfig};

/// Everything one publish run needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationContext {
    /// Credential issuance service configuration.
    #[serde(rename = "vckit")]
    pub issuance: IssuanceConfig,
    /// Kind-specific credential shape and link presentation.
    pub credential: CredentialTypeConfig,
    /// Artifact storage service configuration.
    pub storage: StorageConfig,
    /// Link resolver registration configuration.
    #[serde(rename = "dlr")]
    pub resolver: ResolverConfig,
    /// Where to find the identifier inside the payload data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_key_path: Option<IdentifierKeyPath>,
    /// Client-local cache key purged after a successful DPP publish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_cache_key: Option<String>,
}

/// Issuance collaborator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceConfig {
    /// Base URL of the issuance API.
    #[serde(rename = "vckitAPIUrl")]
    pub api_url: String,
    /// DID the credential is issued under.
    pub issuer: String,
    /// Extra headers forwarded on issuance calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// The sub-block of the context that varies per credential/event kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTypeConfig {
    /// JSON-LD context URIs for the credential.
    pub context: Vec<String>,
    /// Credential type array.
    #[serde(rename = "type")]
    pub type_: Vec<String>,
    /// Render template forwarded to the issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_template: Option<Value>,
    /// Expiry stamped on issued credentials of this kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Title for registered links.
    pub dlr_link_title: String,
    /// Human-facing verification page the default link points at.
    pub dlr_verification_page: String,
    /// Identification key type override (e.g. `gtin`); the primary AI
    /// is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlr_identification_key_type: Option<String>,
}

/// Storage collaborator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Base URL of the storage API.
    pub url: String,
    /// Provider-specific parameters (bucket, visibility, ...).
    #[serde(default)]
    pub params: Value,
}

/// Link resolver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Base URL of the resolver API.
    #[serde(rename = "dlrAPIUrl")]
    pub api_url: String,
    /// API key for registration calls.
    pub api_key: String,
    /// Namespace registrations live under.
    pub namespace: String,
    /// Registration path override; adapters default to `/resolver`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_register_path: Option<String>,
}

impl ResolverConfig {
    /// Adapter configuration for a Pyx identity resolver, honoring the
    /// registration path override.
    pub fn pyx_config(&self) -> PyxConfig {
        let config = PyxConfig::new(
            self.api_url.as_str(),
            self.api_key.as_str(),
            self.namespace.as_str(),
        );
        match &self.link_register_path {
            Some(path) => config.with_register_path(path.as_str()),
            None => config,
        }
    }

    /// Adapter configuration for a legacy DLR. The link title comes from
    /// the credential section of the context.
    pub fn dlr_config(&self, link_title: &str) -> DlrConfig {
        let config = DlrConfig::new(self.api_url.as_str(), self.api_key.as_str(), link_title);
        match &self.link_register_path {
            Some(path) => config.with_register_path(path.as_str()),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_deserializes_wire_names() {
        let context: OperationContext = serde_json::from_value(json!({
            "vckit": { "vckitAPIUrl": "https://vckit.example.com", "issuer": "did:web:issuer" },
            "credential": {
                "context": ["https://vocabulary.uncefact.org/untp/dpp/0.5.0/"],
                "type": ["DigitalProductPassport"],
                "dlrLinkTitle": "Passport",
                "dlrVerificationPage": "https://verify.example.com"
            },
            "storage": { "url": "https://storage.example.com", "params": { "bucket": "b" } },
            "dlr": {
                "dlrAPIUrl": "https://idr.example.com",
                "apiKey": "key",
                "namespace": "untp"
            },
            "identifierKeyPath": "/id"
        }))
        .expect("context deserializes");

        assert_eq!(context.issuance.api_url, "https://vckit.example.com");
        assert_eq!(context.credential.dlr_link_title, "Passport");
        assert_eq!(context.resolver.namespace, "untp");
        assert!(matches!(
            context.identifier_key_path,
            Some(IdentifierKeyPath::Pointer(ref p)) if p == "/id"
        ));
        assert!(context.local_cache_key.is_none());
    }

    #[test]
    fn register_path_override_reaches_adapter_configs() {
        let resolver: ResolverConfig = serde_json::from_value(json!({
            "dlrAPIUrl": "https://idr.example.com",
            "apiKey": "key",
            "namespace": "untp",
            "linkRegisterPath": "/api/1.0.0/resolver"
        }))
        .expect("resolver config deserializes");

        let pyx = resolver.pyx_config();
        assert_eq!(pyx.register_path.as_deref(), Some("/api/1.0.0/resolver"));
        assert_eq!(pyx.base_url, "https://idr.example.com");

        let dlr = resolver.dlr_config("Passport");
        assert_eq!(dlr.register_path.as_deref(), Some("/api/1.0.0/resolver"));
        assert_eq!(dlr.link_title, "Passport");
    }

    #[test]
    fn adapter_configs_leave_register_path_unset_by_default() {
        let resolver = ResolverConfig {
            api_url: "https://idr.example.com".to_string(),
            api_key: "key".to_string(),
            namespace: "untp".to_string(),
            link_register_path: None,
        };
        assert!(resolver.pyx_config().register_path.is_none());
        assert!(resolver.dlr_config("t").register_path.is_none());
    }
}
