//! # Legacy DLR Protocol Adapter
//!
//! Registers against a legacy GS1 Digital Link Resolver. The protocol is
//! rigid: exactly one registration object carrying three canonical
//! responses (verification service, raw credential, human verification
//! page), each duplicated per hard-coded region with language fixed to
//! `en`. The human page carries the default flags so the resolver
//! redirects browsers there.
//!
//! The server's registration response body is not trusted; the resolver
//! URL returned to callers is synthesized client-side from the API base
//! and the identifier. This is a best-effort convenience value — the
//! legacy protocol does not guarantee it, but every known deployment
//! resolves it.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use untp_core::LinkDescriptor;

use crate::registrar::{
    ensure_inputs, normalize_register_path, post_registration, LinkRegistrar, RegistrarError,
    RegisteredLink, DEFAULT_REGISTER_PATH,
};
use crate::registration::{LinkRegistration, LinkResponse};

/// Namespace and link types fixed by the legacy protocol.
const DLR_NAMESPACE: &str = "gs1";
const VERIFICATION_SERVICE_LINK_TYPE: &str = "gs1:verificationService";
const CERTIFICATION_INFO_LINK_TYPE: &str = "gs1:certificationInfo";

/// Regions the legacy resolver fans every response out to.
const DLR_REGIONS: [&str; 2] = ["us", "au"];

/// Language fixed by the legacy protocol.
const DLR_LANGUAGE: &str = "en";

/// Configuration for the legacy DLR adapter.
#[derive(Debug, Clone)]
pub struct DlrConfig {
    /// Base URL of the DLR API (e.g. `https://dlr.example.com/api`).
    pub api_url: String,
    /// Bearer token, set on the client at construction.
    pub api_key: String,
    /// Title stamped on every response and on the registration itself.
    pub link_title: String,
    /// Registration path relative to `api_url`; `/resolver` when unset.
    pub register_path: Option<String>,
}

impl DlrConfig {
    /// Create a new configuration.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        link_title: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            link_title: link_title.into(),
            register_path: None,
        }
    }

    /// Override the registration path.
    pub fn with_register_path(mut self, path: impl Into<String>) -> Self {
        self.register_path = Some(path.into());
        self
    }
}

/// Legacy DLR protocol adapter.
#[derive(Debug)]
pub struct DlrRegistrar {
    client: reqwest::Client,
    api_url: String,
    link_title: String,
    register_path: String,
}

impl DlrRegistrar {
    /// Build the adapter, setting the bearer token and content type as
    /// default headers on the underlying client.
    pub fn new(config: DlrConfig) -> Result<Self, RegistrarError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| RegistrarError::Configuration("invalid API key characters".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RegistrarError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            link_title: config.link_title,
            register_path: normalize_register_path(config.register_path, DEFAULT_REGISTER_PATH),
        })
    }

    fn registration_url(&self) -> String {
        format!("{}{}", self.api_url, self.register_path)
    }

    /// Pick the three canonical targets out of the caller's link list.
    ///
    /// The human verification page is the link marked default (falling
    /// back to the last link); the raw credential is the first JSON
    /// link; the verification service is the first link whose relation
    /// mentions verification, falling back to the page.
    fn canonical_targets<'a>(links: &'a [LinkDescriptor]) -> (&'a str, &'a str, &'a str) {
        let page = links
            .iter()
            .find(|l| l.default == Some(true))
            .or_else(|| links.last())
            .map(|l| l.href.as_str())
            .unwrap_or_default();
        let credential = links
            .iter()
            .find(|l| l.link_type.as_deref() == Some("application/json"))
            .map(|l| l.href.as_str())
            .unwrap_or_else(|| links.first().map(|l| l.href.as_str()).unwrap_or_default());
        let service = links
            .iter()
            .find(|l| l.rel.to_ascii_lowercase().contains("verification"))
            .map(|l| l.href.as_str())
            .unwrap_or(page);
        (service, credential, page)
    }

    fn build_registration(
        &self,
        identifier_scheme: &str,
        identifier: &str,
        links: &[LinkDescriptor],
        qualifier_path: Option<&str>,
    ) -> LinkRegistration {
        let (service, credential, page) = Self::canonical_targets(links);

        // (link type, target, mime, carries the default flags)
        let canonical: [(&str, &str, &str, bool); 3] = [
            (VERIFICATION_SERVICE_LINK_TYPE, service, "text/plain", false),
            (CERTIFICATION_INFO_LINK_TYPE, credential, "application/json", false),
            (CERTIFICATION_INFO_LINK_TYPE, page, "text/html", true),
        ];

        let mut responses = Vec::with_capacity(canonical.len() * DLR_REGIONS.len());
        for (link_type, target, mime, is_default) in canonical {
            for region in DLR_REGIONS {
                let mut response = LinkResponse::new(
                    link_type,
                    target,
                    mime,
                    self.link_title.as_str(),
                    DLR_LANGUAGE,
                    region,
                );
                if is_default {
                    response.default_link_type = true;
                    response.default_iana_language = true;
                    response.default_mime_type = true;
                }
                responses.push(response);
            }
        }

        LinkRegistration {
            namespace: DLR_NAMESPACE.to_string(),
            identification_key_type: identifier_scheme.to_string(),
            identification_key: identifier.to_string(),
            item_description: self.link_title.clone(),
            qualifier_path: qualifier_path.unwrap_or("/").to_string(),
            active: true,
            responses,
        }
    }
}

#[async_trait]
impl LinkRegistrar for DlrRegistrar {
    async fn register(
        &self,
        identifier_scheme: &str,
        identifier: &str,
        links: &[LinkDescriptor],
        qualifier_path: Option<&str>,
    ) -> Result<RegisteredLink, RegistrarError> {
        ensure_inputs(identifier_scheme, identifier, links)?;

        let registration =
            self.build_registration(identifier_scheme, identifier, links, qualifier_path);
        let url = self.registration_url();
        post_registration(&self.client, &url, &registration, identifier).await?;

        // Synthesized, not read from the response body.
        let resolver_uri = format!(
            "{}/{identifier_scheme}/{identifier}?linkType=all",
            self.api_url
        );
        tracing::info!(identifier, resolver_uri, "registered links on legacy DLR");

        Ok(RegisteredLink {
            resolver_uri,
            identifier_scheme: identifier_scheme.to_string(),
            identifier: identifier.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registrar() -> DlrRegistrar {
        DlrRegistrar::new(DlrConfig::new(
            "https://dlr.example.com/api/",
            "test-key",
            "Livestock Passport",
        ))
        .expect("adapter builds")
    }

    fn canonical_links() -> Vec<LinkDescriptor> {
        vec![
            LinkDescriptor::new(
                "https://verify.example.com/api",
                "verificationService",
                "Verify",
            )
            .with_type("text/plain"),
            LinkDescriptor::new(
                "https://storage.example.com/credential.json",
                "certificationInfo",
                "Credential",
            )
            .with_type("application/json"),
            LinkDescriptor::new("https://verify.example.com/?q=x", "certificationInfo", "View")
                .with_type("text/html")
                .as_default(),
        ]
    }

    #[test]
    fn trailing_slash_trimmed_from_api_url() {
        assert_eq!(registrar().api_url, "https://dlr.example.com/api");
    }

    #[test]
    fn registration_url_defaults_to_resolver_path() {
        assert_eq!(
            registrar().registration_url(),
            "https://dlr.example.com/api/resolver"
        );
    }

    #[test]
    fn configured_register_path_overrides_default() {
        let registrar = DlrRegistrar::new(
            DlrConfig::new("https://dlr.example.com", "k", "t")
                .with_register_path("api/1.0.0/resolver"),
        )
        .expect("adapter builds");
        assert_eq!(
            registrar.registration_url(),
            "https://dlr.example.com/api/1.0.0/resolver"
        );
    }

    #[test]
    fn builds_six_responses_across_two_regions() {
        let registration =
            registrar().build_registration("01", "09359502000010", &canonical_links(), None);
        assert_eq!(registration.responses.len(), 6);
        assert!(registration
            .responses
            .iter()
            .all(|r| r.iana_language == "en" && r.active));
        let regions: Vec<&str> = registration
            .responses
            .iter()
            .map(|r| r.context.as_str())
            .collect();
        assert_eq!(regions, ["us", "au", "us", "au", "us", "au"]);
    }

    #[test]
    fn only_html_responses_carry_default_flags() {
        let registration =
            registrar().build_registration("01", "09359502000010", &canonical_links(), None);
        for response in &registration.responses {
            let is_html = response.mime_type == "text/html";
            assert_eq!(response.default_link_type, is_html);
            assert_eq!(response.default_iana_language, is_html);
            assert_eq!(response.default_mime_type, is_html);
            // defaultContext is never set by the legacy adapter.
            assert!(!response.default_context);
        }
    }

    #[test]
    fn qualifier_path_defaults_to_slash() {
        let registration =
            registrar().build_registration("01", "09359502000010", &canonical_links(), None);
        assert_eq!(registration.qualifier_path, "/");

        let with_path = registrar().build_registration(
            "01",
            "09359502000010",
            &canonical_links(),
            Some("/10/LOT42"),
        );
        assert_eq!(with_path.qualifier_path, "/10/LOT42");
    }

    #[tokio::test]
    async fn empty_inputs_fail_before_any_network_call() {
        // The API URL is unroutable; reaching the network would surface
        // a Registration error, not MissingInput.
        let registrar = DlrRegistrar::new(DlrConfig::new("http://127.0.0.1:1", "k", "t"))
            .expect("adapter builds");
        let links = canonical_links();

        let err = registrar.register("", "id", &links, None).await.unwrap_err();
        assert_eq!(err, RegistrarError::MissingInput("identifierScheme"));

        let err = registrar.register("01", "", &links, None).await.unwrap_err();
        assert_eq!(err, RegistrarError::MissingInput("identifier"));

        let err = registrar.register("01", "id", &[], None).await.unwrap_err();
        assert_eq!(err, RegistrarError::MissingInput("links"));
    }

    #[test]
    fn resolver_uri_is_synthesized_from_api_url() {
        // Shape check only; the HTTP round trip is covered by the stub
        // resolver integration test.
        let registrar = registrar();
        let uri = format!(
            "{}/{}/{}?linkType=all",
            registrar.api_url, "01", "09359502000010"
        );
        assert_eq!(
            uri,
            "https://dlr.example.com/api/01/09359502000010?linkType=all"
        );
    }
}
