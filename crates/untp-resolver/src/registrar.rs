//! # Registrar Capability Trait and Error Contract
//!
//! One capability shared by both protocol adapters: given an identifier
//! and a set of links, build the provider-specific payload and register
//! it over HTTP.
//!
//! ## Error Contract
//!
//! Structural failures (empty scheme, identifier, or link list) are
//! reported before any network call. Every transport failure and every
//! non-2xx HTTP response surfaces as
//! `"Failed to register links with identity resolver for identifier <id>: <cause>"`,
//! with `<cause>` being the HTTP status line or the transport error
//! message. Callers and tests assert on this exact text.

use async_trait::async_trait;
use thiserror::Error;
use untp_core::LinkDescriptor;

use crate::registration::LinkRegistration;

/// What a successful registration yields.
///
/// The resolver URI is computed client-side by each adapter; the
/// server's own response body is not trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredLink {
    /// Where the registered links can now be resolved.
    pub resolver_uri: String,
    /// The identification key type the links were registered under.
    pub identifier_scheme: String,
    /// The identification key value.
    pub identifier: String,
}

/// Why a registration attempt failed at the network layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationCause {
    /// The resolver answered with a non-2xx status.
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical status text.
        text: String,
    },
    /// The request never produced an HTTP response.
    Transport(String),
}

impl std::fmt::Display for RegistrationCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, text } => write!(f, "HTTP {status}: {text}"),
            Self::Transport(message) => write!(f, "{message}"),
        }
    }
}

/// Errors from link registration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrarError {
    /// A required input was empty; detected before any network call.
    #[error("Link registration requires a non-empty {0}")]
    MissingInput(&'static str),

    /// The adapter could not be constructed from its configuration.
    #[error("Invalid registrar configuration: {0}")]
    Configuration(String),

    /// The registration call itself failed.
    #[error("{}", registration_message(.identifier, .cause))]
    Registration {
        /// The identification key the registration was for, when known.
        identifier: Option<String>,
        /// The underlying transport or HTTP failure.
        cause: RegistrationCause,
    },
}

impl RegistrarError {
    /// Wrap a network-layer failure with the identifier in context.
    pub fn registration(identifier: impl Into<String>, cause: RegistrationCause) -> Self {
        Self::Registration {
            identifier: Some(identifier.into()),
            cause,
        }
    }
}

fn registration_message(identifier: &Option<String>, cause: &RegistrationCause) -> String {
    match identifier {
        Some(id) => {
            format!("Failed to register links with identity resolver for identifier {id}: {cause}")
        }
        None => format!("Failed to register links with identity resolver: {cause}"),
    }
}

/// The shared registrar capability. Implemented by both protocol
/// adapters; selected at construction time, never by branching inside
/// call sites.
#[async_trait]
pub trait LinkRegistrar: Send + Sync {
    /// Register `links` against `identifier` (of `identifier_scheme`),
    /// optionally narrowed by a qualifier path.
    async fn register(
        &self,
        identifier_scheme: &str,
        identifier: &str,
        links: &[LinkDescriptor],
        qualifier_path: Option<&str>,
    ) -> Result<RegisteredLink, RegistrarError>;
}

/// Registration path used when the adapter configuration does not
/// override it.
pub const DEFAULT_REGISTER_PATH: &str = "/resolver";

/// Normalize a configured registration path to a single leading slash,
/// falling back when none was configured.
pub(crate) fn normalize_register_path(path: Option<String>, fallback: &str) -> String {
    match path {
        None => fallback.to_string(),
        Some(path) => format!("/{}", path.trim_start_matches('/')),
    }
}

/// Fail-fast input presence check shared by both adapters.
pub(crate) fn ensure_inputs(
    identifier_scheme: &str,
    identifier: &str,
    links: &[LinkDescriptor],
) -> Result<(), RegistrarError> {
    if identifier_scheme.is_empty() {
        return Err(RegistrarError::MissingInput("identifierScheme"));
    }
    if identifier.is_empty() {
        return Err(RegistrarError::MissingInput("identifier"));
    }
    if links.is_empty() {
        return Err(RegistrarError::MissingInput("links"));
    }
    Ok(())
}

/// POST a registration payload and map failures into the uniform error.
pub(crate) async fn post_registration(
    client: &reqwest::Client,
    url: &str,
    registration: &LinkRegistration,
    identifier: &str,
) -> Result<(), RegistrarError> {
    tracing::debug!(
        url,
        identifier,
        responses = registration.responses.len(),
        "posting link registration"
    );

    let response = client
        .post(url)
        .json(registration)
        .send()
        .await
        .map_err(|e| {
            RegistrarError::registration(identifier, RegistrationCause::Transport(e.to_string()))
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RegistrarError::registration(
            identifier,
            RegistrationCause::Http {
                status: status.as_u16(),
                text: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            },
        ));
    }
    Ok(())
}
