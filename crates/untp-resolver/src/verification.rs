//! # Resolver Self-Description Checks
//!
//! Advisory checks run against a resolver's self-description before
//! trusting it with registrations. These never fail hard — callers
//! decide how severe a missing link type is.

use serde::{Deserialize, Serialize};

/// Link types this system depends on a resolver advertising.
pub const REQUIRED_UNTP_LINK_TYPES: [&str; 4] =
    ["untp:dpp", "untp:dcc", "untp:dte", "untp:idr"];

/// A resolver's self-description document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverDescription {
    /// Display name of the resolver.
    #[serde(default)]
    pub name: String,
    /// Root URL the resolver claims to resolve under.
    #[serde(rename = "resolverRoot", default, skip_serializing_if = "Option::is_none")]
    pub resolver_root: Option<String>,
    /// Link types the resolver advertises support for.
    #[serde(rename = "supportedLinkTypes", default)]
    pub supported_link_types: Vec<AdvertisedLinkType>,
}

/// One advertised link type from a resolver description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisedLinkType {
    /// Namespace of the link type (e.g. `untp`).
    pub namespace: String,
    /// Link type code within the namespace (e.g. `dpp`).
    #[serde(rename = "prefix")]
    pub code: String,
}

impl AdvertisedLinkType {
    /// The `"{namespace}:{code}"` form used for comparisons.
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.namespace, self.code)
    }
}

/// Advisory warning: a required link type is not advertised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTypeWarning {
    /// The missing required link type.
    pub link_type: String,
}

impl std::fmt::Display for LinkTypeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "resolver does not advertise required link type {}",
            self.link_type
        )
    }
}

/// Minimal sanity check of a resolver description: true iff it carries
/// a non-empty name.
pub fn verify_resolver_description(description: &ResolverDescription) -> bool {
    !description.name.is_empty()
}

/// One warning per required UNTP link type absent from the advertised
/// set. Never fails; an empty result means the resolver advertises
/// everything this system depends on.
pub fn verify_untp_link_types(link_types: &[AdvertisedLinkType]) -> Vec<LinkTypeWarning> {
    let advertised: Vec<String> = link_types.iter().map(AdvertisedLinkType::qualified).collect();
    REQUIRED_UNTP_LINK_TYPES
        .iter()
        .filter(|required| !advertised.iter().any(|a| a == *required))
        .map(|required| LinkTypeWarning {
            link_type: (*required).to_string(),
        })
        .collect()
}
