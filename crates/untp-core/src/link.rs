//! # Discoverable Link Model
//!
//! The caller-facing description of one thing to be made discoverable
//! through a link resolver. Adapters translate this into their own wire
//! formats; the descriptor itself is protocol-neutral.

use serde::{Deserialize, Serialize};

/// A logical link to register against an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    /// Target URL.
    pub href: String,
    /// Link relation. May already carry a namespace prefix
    /// (`untp:dpp`); adapters prepend their configured namespace
    /// otherwise.
    pub rel: String,
    /// MIME type of the target. Adapters default this when absent.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Human-readable title.
    pub title: String,
    /// Preferred languages, most preferred first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<Vec<String>>,
    /// Whether this link should be treated as the default for the
    /// identifier. How far this propagates is an adapter policy decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    /// Region/context hint for locale-aware resolvers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl LinkDescriptor {
    /// Minimal constructor; optional fields start unset.
    pub fn new(
        href: impl Into<String>,
        rel: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            link_type: None,
            title: title.into(),
            hreflang: None,
            default: None,
            context: None,
        }
    }

    /// Set the MIME type.
    pub fn with_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = Some(link_type.into());
        self
    }

    /// Mark this link as the default for its identifier.
    pub fn as_default(mut self) -> Self {
        self.default = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let link = LinkDescriptor::new("https://example.com/credential", "dpp", "Passport")
            .with_type("application/json")
            .as_default();
        assert_eq!(link.link_type.as_deref(), Some("application/json"));
        assert_eq!(link.default, Some(true));
        assert!(link.hreflang.is_none());
    }

    #[test]
    fn serializes_type_under_wire_name() {
        let link = LinkDescriptor::new("https://x", "dpp", "t").with_type("text/html");
        let value = serde_json::to_value(&link).expect("serializes");
        assert_eq!(value["type"], "text/html");
        assert!(value.get("hreflang").is_none());
    }
}
