//! # Resolver Registration Wire Types
//!
//! The JSON payload POSTed to a link resolver's `/resolver` endpoint.
//! Field names follow the resolver wire format (camelCase) via serde
//! renames; both protocol adapters serialize through these types so the
//! payload shape lives in exactly one place.

use serde::{Deserialize, Serialize};

/// The wire-level unit sent to a resolver: one identifier plus the set
/// of link responses to associate with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRegistration {
    /// Resolver namespace the registration lives under.
    pub namespace: String,
    /// The identification key type — the primary AI (`01`) or a named
    /// scheme (`gtin`).
    pub identification_key_type: String,
    /// The primary identification key value.
    pub identification_key: String,
    /// Human-readable description shown in resolver UIs.
    pub item_description: String,
    /// Qualifier path segment, `"/"` when the identifier has no
    /// qualifiers.
    pub qualifier_path: String,
    /// Registrations produced by this system are always active.
    pub active: bool,
    /// The typed link responses.
    pub responses: Vec<LinkResponse>,
}

/// One typed, localized link response inside a registration.
///
/// The four `default*` flags are independent on the wire; a resolver
/// honors each separately when picking the default redirect for an
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    /// Namespaced link type (e.g. `untp:dpp`, `gs1:certificationInfo`).
    pub link_type: String,
    /// Target URL the resolver redirects to.
    pub target_url: String,
    /// MIME type of the target.
    pub mime_type: String,
    /// Human-readable link title.
    pub title: String,
    /// IANA language code for this response.
    pub iana_language: String,
    /// Region/context this response applies to.
    pub context: String,
    /// Whether this response is active.
    pub active: bool,
    /// This response is the default for its link type.
    pub default_link_type: bool,
    /// This response is the default for its language.
    pub default_iana_language: bool,
    /// This response is the default for its context.
    pub default_context: bool,
    /// This response is the default for its MIME type.
    pub default_mime_type: bool,
    /// Forward query strings from the resolver request to the target.
    pub fwqs: bool,
}

impl LinkResponse {
    /// An active response with every default flag and `fwqs` cleared.
    pub fn new(
        link_type: impl Into<String>,
        target_url: impl Into<String>,
        mime_type: impl Into<String>,
        title: impl Into<String>,
        iana_language: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            link_type: link_type.into(),
            target_url: target_url.into(),
            mime_type: mime_type.into(),
            title: title.into(),
            iana_language: iana_language.into(),
            context: context.into(),
            active: true,
            default_link_type: false,
            default_iana_language: false,
            default_context: false,
            default_mime_type: false,
            fwqs: false,
        }
    }
}
