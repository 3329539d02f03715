//! # The Publish Pipeline
//!
//! One generic pipeline for all nine credential/event kinds:
//!
//! validate context → check payload data → resolve identifier → issue
//! (external) → best-effort envelope decode → upload (external) →
//! construct verify link → register resolver links → optional local
//! cache purge.
//!
//! Steps are strictly sequential — each step's output feeds the next —
//! and the first failure aborts the run. Kind variation comes from
//! [`KindProfile`], never from per-kind control flow.

use serde_json::Value;
use untp_core::{qualifier_path, LinkDescriptor};
use untp_resolver::LinkRegistrar;
use url::Url;
use uuid::Uuid;

use crate::collaborators::{
    ArtifactStore, CredentialIssuer, InputCache, IssueRequest, StorageReference,
};
use crate::context::OperationContext;
use crate::envelope::decode_enveloped_credential;
use crate::error::PublishError;
use crate::kind::{CredentialKind, StorageKeyStrategy};
use crate::validate::validate_context;

/// What one successful publish run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    /// The issued credential document, as returned by the issuer.
    pub credential: Value,
    /// Decoded envelope payload, when the kind decodes and the document
    /// was a well-formed envelope.
    pub decoded_credential: Option<Value>,
    /// Where the registered links resolve.
    pub resolver_uri: String,
}

/// The orchestrator. Holds the collaborator seams; owns no state of its
/// own, so one instance can serve many concurrent publish runs.
pub struct Publisher<'a> {
    issuer: &'a dyn CredentialIssuer,
    store: &'a dyn ArtifactStore,
    registrar: &'a dyn LinkRegistrar,
    cache: Option<&'a dyn InputCache>,
}

impl<'a> Publisher<'a> {
    /// Wire up the collaborators. No local cache; see [`Self::with_cache`].
    pub fn new(
        issuer: &'a dyn CredentialIssuer,
        store: &'a dyn ArtifactStore,
        registrar: &'a dyn LinkRegistrar,
    ) -> Self {
        Self {
            issuer,
            store,
            registrar,
            cache: None,
        }
    }

    /// Attach a client-local input cache, purged after successful
    /// digital-product-passport runs.
    pub fn with_cache(mut self, cache: &'a dyn InputCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Run the full pipeline for one payload.
    ///
    /// The payload carries the credential subject under `data` and may
    /// carry a caller-assigned credential `id` alongside it.
    pub async fn publish(
        &self,
        kind: CredentialKind,
        context: &OperationContext,
        payload: &Value,
    ) -> Result<PublishResult, PublishError> {
        validate_context(context)?;

        let data = payload
            .get("data")
            .ok_or(PublishError::PayloadDataMissing(kind))?;
        // Optional caller-assigned credential id, alongside `data`.
        let credential_id = payload
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string);

        // Validation guarantees the key path is present.
        let key_path = context
            .identifier_key_path
            .as_ref()
            .ok_or_else(|| PublishError::InvalidContext("Invalid identifierKeyPath".to_string()))?;
        let identifier = untp_core::resolve_identifier(data, key_path)?;
        if !identifier.has_primary() {
            return Err(PublishError::IdentifierNotFound);
        }
        tracing::debug!(
            kind = %kind,
            ai = %identifier.primary.ai,
            identifier = %identifier.primary.value,
            "resolved identifier from payload"
        );

        let credential = self
            .issuer
            .issue(IssueRequest {
                context: context.credential.context.clone(),
                credential_type: context.credential.type_.clone(),
                issuer: context.issuance.issuer.clone(),
                credential_subject: data.clone(),
                render_template: context.credential.render_template.clone(),
                id: credential_id,
                valid_until: context.credential.valid_until,
                api_url: context.issuance.api_url.clone(),
                headers: context.issuance.headers.clone(),
            })
            .await
            .map_err(PublishError::Issuance)?;

        let profile = kind.profile();
        let decoded_credential = if profile.decode_envelope {
            decode_enveloped_credential(&credential)
        } else {
            None
        };

        let path = qualifier_path(Some(&identifier.qualifiers));
        let storage_key = match profile.storage_key {
            StorageKeyStrategy::IdentifierDerived => {
                let mut key =
                    format!("{}/{}", identifier.primary.ai, identifier.primary.value);
                if path != "/" {
                    key.push_str(&path);
                }
                key
            }
            StorageKeyStrategy::RandomUuid => Uuid::new_v4().to_string(),
        };
        let reference = self
            .store
            .upload(&credential, &storage_key)
            .await
            .map_err(PublishError::Storage)?;

        let verify_url =
            verification_link(&context.credential.dlr_verification_page, &reference)?;
        let title = context.credential.dlr_link_title.as_str();
        let links = vec![
            LinkDescriptor::new(verify_url.clone(), "verificationService", title)
                .with_type("text/plain"),
            LinkDescriptor::new(reference.uri(), "certificationInfo", title)
                .with_type("application/json"),
            LinkDescriptor::new(verify_url, "certificationInfo", title)
                .with_type("text/html")
                .as_default(),
        ];

        let identifier_scheme = context
            .credential
            .dlr_identification_key_type
            .clone()
            .unwrap_or_else(|| identifier.primary.ai.clone());
        let registered = self
            .registrar
            .register(
                &identifier_scheme,
                &identifier.primary.value,
                &links,
                Some(&path),
            )
            .await?;

        if profile.purge_cache {
            if let (Some(cache), Some(cache_key)) = (self.cache, &context.local_cache_key) {
                cache.purge(cache_key);
                tracing::debug!(cache_key, "purged local input cache");
            }
        }

        tracing::info!(
            kind = %kind,
            identifier = %identifier.primary.value,
            resolver_uri = %registered.resolver_uri,
            "published credential"
        );
        Ok(PublishResult {
            credential,
            decoded_credential,
            resolver_uri: registered.resolver_uri,
        })
    }
}

/// Build the human-facing verification URL embedding the storage
/// reference as the `q` query parameter.
fn verification_link(
    verification_page: &str,
    reference: &StorageReference,
) -> Result<String, PublishError> {
    let mut url =
        Url::parse(verification_page).map_err(|e| PublishError::VerifyLink(e.to_string()))?;
    let query = serde_json::json!({ "payload": reference.query_payload() });
    url.query_pairs_mut().append_pair("q", &query.to_string());
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_link_embeds_reference_payload() {
        let reference = StorageReference::Object {
            uri: "https://s.example.com/c.json".to_string(),
            key: "01/12345".to_string(),
            hash: "abc".to_string(),
        };
        let link = verification_link("https://verify.example.com", &reference)
            .expect("link builds");
        assert!(link.starts_with("https://verify.example.com/?q="));
        assert!(link.contains("s.example.com"));

        // The q parameter must decode back to the reference payload.
        let url = Url::parse(&link).expect("valid URL");
        let q = url
            .query_pairs()
            .find(|(name, _)| name == "q")
            .map(|(_, value)| value.into_owned())
            .expect("q parameter present");
        let decoded: Value = serde_json::from_str(&q).expect("q is JSON");
        assert_eq!(decoded["payload"]["uri"], "https://s.example.com/c.json");
        assert_eq!(decoded["payload"]["hash"], "abc");
    }

    #[test]
    fn verification_link_rejects_invalid_page() {
        let reference = StorageReference::Uri("https://s.example.com/c.json".to_string());
        let err = verification_link("not a url", &reference).unwrap_err();
        assert!(matches!(err, PublishError::VerifyLink(_)));
    }
}
