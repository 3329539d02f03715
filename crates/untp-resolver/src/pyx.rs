//! # Pyx IDR Protocol Adapter
//!
//! Registers arbitrary caller-supplied link lists against a Pyx identity
//! resolver. Unlike the legacy DLR protocol there is no fixed response
//! shape: each [`LinkDescriptor`] maps to one wire response, with
//! namespace prefixing, locale defaults, and MIME fallback applied here.
//!
//! ## Default-Flag Policy
//!
//! A registration call must not silently become the resolver-wide
//! default for an identifier. A link's `default` marker therefore fans
//! out only into the wire flags the adapter was explicitly configured to
//! honor — and the [`DefaultFlagPolicy`] starts with all four flags
//! disabled.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use untp_core::LinkDescriptor;

use crate::registrar::{
    ensure_inputs, normalize_register_path, post_registration, LinkRegistrar, RegistrarError,
    RegisteredLink, DEFAULT_REGISTER_PATH,
};
use crate::registration::{LinkRegistration, LinkResponse};

/// Region applied when neither the link nor the adapter supplies one.
const DEFAULT_CONTEXT: &str = "au";

/// Language applied when a link carries no `hreflang`.
const DEFAULT_LANGUAGE: &str = "en";

/// MIME type applied when a link carries no `type`.
const DEFAULT_MIME_TYPE: &str = "application/json";

/// Which wire default-flags a link's `default` marker may set.
///
/// Immutable capability record, fixed at adapter construction. All four
/// flags are `false` by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultFlagPolicy {
    /// Allow `defaultLinkType`.
    pub link_type: bool,
    /// Allow `defaultIanaLanguage`.
    pub iana_language: bool,
    /// Allow `defaultContext`.
    pub context: bool,
    /// Allow `defaultMimeType`.
    pub mime_type: bool,
}

/// Configuration for the Pyx IDR adapter.
#[derive(Debug, Clone)]
pub struct PyxConfig {
    /// Base URL of the identity resolver.
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header value.
    pub api_key: String,
    /// Namespace prefixed onto un-namespaced link relations.
    pub namespace: String,
    /// Region applied to links without their own `context`; `"au"` when
    /// unset.
    pub default_context: Option<String>,
    /// Which default flags link `default` markers may set.
    pub default_flags: DefaultFlagPolicy,
    /// Registration path relative to `base_url`; `/resolver` when unset.
    pub register_path: Option<String>,
}

impl PyxConfig {
    /// Create a configuration with the default context and an
    /// all-disabled flag policy.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            namespace: namespace.into(),
            default_context: None,
            default_flags: DefaultFlagPolicy::default(),
            register_path: None,
        }
    }

    /// Override the fallback region.
    pub fn with_default_context(mut self, context: impl Into<String>) -> Self {
        self.default_context = Some(context.into());
        self
    }

    /// Override the default-flag policy.
    pub fn with_default_flags(mut self, policy: DefaultFlagPolicy) -> Self {
        self.default_flags = policy;
        self
    }

    /// Override the registration path.
    pub fn with_register_path(mut self, path: impl Into<String>) -> Self {
        self.register_path = Some(path.into());
        self
    }
}

/// Pyx IDR protocol adapter.
#[derive(Debug)]
pub struct PyxRegistrar {
    client: reqwest::Client,
    base_url: String,
    namespace: String,
    default_context: String,
    default_flags: DefaultFlagPolicy,
    register_path: String,
}

impl PyxRegistrar {
    /// Build the adapter. The API key is installed verbatim as the
    /// `Authorization` default header.
    pub fn new(config: PyxConfig) -> Result<Self, RegistrarError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&config.api_key)
                .map_err(|_| RegistrarError::Configuration("invalid API key characters".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RegistrarError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            namespace: config.namespace,
            default_context: config
                .default_context
                .unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
            default_flags: config.default_flags,
            register_path: normalize_register_path(config.register_path, DEFAULT_REGISTER_PATH),
        })
    }

    fn registration_url(&self) -> String {
        format!("{}{}", self.base_url, self.register_path)
    }

    /// Map one link descriptor to one wire response.
    fn link_response(&self, link: &LinkDescriptor) -> LinkResponse {
        let link_type = if link.rel.contains(':') {
            link.rel.clone()
        } else {
            format!("{}:{}", self.namespace, link.rel)
        };
        let iana_language = link
            .hreflang
            .as_ref()
            .and_then(|langs| langs.first())
            .cloned()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let context = link
            .context
            .clone()
            .unwrap_or_else(|| self.default_context.clone());
        let mime_type = link
            .link_type
            .clone()
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        let mut response = LinkResponse::new(
            link_type,
            link.href.clone(),
            mime_type,
            link.title.clone(),
            iana_language,
            context,
        );
        if link.default == Some(true) {
            response.default_link_type = self.default_flags.link_type;
            response.default_iana_language = self.default_flags.iana_language;
            response.default_context = self.default_flags.context;
            response.default_mime_type = self.default_flags.mime_type;
        }
        response
    }

    fn build_registration(
        &self,
        identifier_scheme: &str,
        identifier: &str,
        links: &[LinkDescriptor],
        qualifier_path: Option<&str>,
    ) -> LinkRegistration {
        let item_description = links
            .iter()
            .find(|l| l.default == Some(true))
            .or_else(|| links.first())
            .map(|l| l.title.clone())
            .unwrap_or_default();

        LinkRegistration {
            namespace: self.namespace.clone(),
            identification_key_type: identifier_scheme.to_string(),
            identification_key: identifier.to_string(),
            item_description,
            qualifier_path: qualifier_path.unwrap_or("/").to_string(),
            active: true,
            responses: links.iter().map(|l| self.link_response(l)).collect(),
        }
    }

    /// Resolver URI for a registered identifier. The qualifier path
    /// segment is appended only when supplied and not the bare `/`.
    fn resolver_uri(
        &self,
        identifier_scheme: &str,
        identifier: &str,
        qualifier_path: Option<&str>,
    ) -> String {
        let mut uri = format!(
            "{}/{}/{identifier_scheme}/{identifier}",
            self.base_url, self.namespace
        );
        if let Some(path) = qualifier_path {
            if path != "/" {
                uri.push_str(path);
            }
        }
        uri
    }
}

#[async_trait]
impl LinkRegistrar for PyxRegistrar {
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

        let resolver_uri = self.resolver_uri(identifier_scheme, identifier, qualifier_path);
        tracing::info!(identifier, resolver_uri, "registered links on Pyx IDR");

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

    fn registrar() -> PyxRegistrar {
        PyxRegistrar::new(PyxConfig::new(
            "https://idr.example.com/",
            "test-key",
            "untp",
        ))
        .expect("adapter builds")
    }

    #[test]
    fn configured_register_path_overrides_default() {
        assert_eq!(
            registrar().registration_url(),
            "https://idr.example.com/resolver"
        );
        let registrar = PyxRegistrar::new(
            PyxConfig::new("https://idr.example.com", "k", "untp")
                .with_register_path("/api/resolver"),
        )
        .expect("adapter builds");
        assert_eq!(
            registrar.registration_url(),
            "https://idr.example.com/api/resolver"
        );
    }

    #[test]
    fn rel_without_namespace_is_prefixed() {
        let response = registrar().link_response(&LinkDescriptor::new("https://x", "dpp", "t"));
        assert_eq!(response.link_type, "untp:dpp");
    }

    #[test]
    fn namespaced_rel_is_left_unchanged() {
        let response =
            registrar().link_response(&LinkDescriptor::new("https://x", "untp:dcc", "t"));
        assert_eq!(response.link_type, "untp:dcc");
    }

    #[test]
    fn locale_and_mime_fallbacks() {
        let response = registrar().link_response(&LinkDescriptor::new("https://x", "dpp", "t"));
        assert_eq!(response.iana_language, "en");
        assert_eq!(response.context, "au");
        assert_eq!(response.mime_type, "application/json");
        assert!(!response.fwqs);
    }

    #[test]
    fn link_locale_overrides_win() {
        let mut link = LinkDescriptor::new("https://x", "dpp", "t").with_type("text/html");
        link.hreflang = Some(vec!["fr".to_string(), "en".to_string()]);
        link.context = Some("us".to_string());
        let response = registrar().link_response(&link);
        assert_eq!(response.iana_language, "fr");
        assert_eq!(response.context, "us");
        assert_eq!(response.mime_type, "text/html");
    }

    #[test]
    fn configured_default_context_applies() {
        let registrar = PyxRegistrar::new(
            PyxConfig::new("https://idr.example.com", "k", "untp").with_default_context("nz"),
        )
        .expect("adapter builds");
        let response = registrar.link_response(&LinkDescriptor::new("https://x", "dpp", "t"));
        assert_eq!(response.context, "nz");
    }

    #[test]
    fn default_flags_all_false_when_link_default_unset() {
        let registrar = PyxRegistrar::new(
            PyxConfig::new("https://idr.example.com", "k", "untp").with_default_flags(
                DefaultFlagPolicy {
                    link_type: true,
                    iana_language: true,
                    context: true,
                    mime_type: true,
                },
            ),
        )
        .expect("adapter builds");
        let response = registrar.link_response(&LinkDescriptor::new("https://x", "dpp", "t"));
        assert!(!response.default_link_type);
        assert!(!response.default_iana_language);
        assert!(!response.default_context);
        assert!(!response.default_mime_type);
    }

    #[test]
    fn default_marker_fans_out_only_into_honored_flags() {
        let registrar = PyxRegistrar::new(
            PyxConfig::new("https://idr.example.com", "k", "untp").with_default_flags(
                DefaultFlagPolicy {
                    link_type: true,
                    mime_type: true,
                    ..DefaultFlagPolicy::default()
                },
            ),
        )
        .expect("adapter builds");
        let response =
            registrar.link_response(&LinkDescriptor::new("https://x", "dpp", "t").as_default());
        assert!(response.default_link_type);
        assert!(!response.default_iana_language);
        assert!(!response.default_context);
        assert!(response.default_mime_type);
    }

    #[test]
    fn default_marker_with_unconfigured_policy_sets_nothing() {
        // Even an explicit default link must not become resolver-wide
        // default unless the adapter was configured to allow it.
        let response =
            registrar().link_response(&LinkDescriptor::new("https://x", "dpp", "t").as_default());
        assert!(!response.default_link_type);
        assert!(!response.default_iana_language);
        assert!(!response.default_context);
        assert!(!response.default_mime_type);
    }

    #[test]
    fn resolver_uri_omits_bare_qualifier_path() {
        let registrar = registrar();
        assert_eq!(
            registrar.resolver_uri("01", "12345", Some("/")),
            "https://idr.example.com/untp/01/12345"
        );
        assert_eq!(
            registrar.resolver_uri("01", "12345", None),
            "https://idr.example.com/untp/01/12345"
        );
        assert_eq!(
            registrar.resolver_uri("01", "12345", Some("/10/LOT1")),
            "https://idr.example.com/untp/01/12345/10/LOT1"
        );
    }

    #[tokio::test]
    async fn empty_inputs_fail_before_any_network_call() {
        let registrar = PyxRegistrar::new(PyxConfig::new("http://127.0.0.1:1", "k", "untp"))
            .expect("adapter builds");
        let links = vec![LinkDescriptor::new("https://x", "dpp", "t")];

        let err = registrar.register("", "id", &links, None).await.unwrap_err();
        assert_eq!(err, RegistrarError::MissingInput("identifierScheme"));

        let err = registrar.register("01", "id", &[], None).await.unwrap_err();
        assert_eq!(err, RegistrarError::MissingInput("links"));
    }
}
