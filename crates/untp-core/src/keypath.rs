//! # Identifier Key Paths
//!
//! The two supported shapes for locating an identifier inside a payload:
//!
//! 1. A JSON-pointer string selecting a GS1 Digital Link URL, which is
//!    then scanned for repeating `/{2-3 digit AI}/{value}` segments.
//! 2. An explicit `{primary, qualifiers}` descriptor naming the AI for
//!    each part and a JSON pointer to its value.
//!
//! The shape distinction is carried by the [`IdentifierKeyPath`] enum
//! (untagged on the wire); any other JSON shape fails deserialization.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::IdentifierError;
use crate::identifier::{AiPair, Identifier};

/// Repeating `/{ai}/{value}` segment pairs in a GS1 Digital Link URL.
/// AIs are 2 or 3 digits; values run to the next `/`, `?`, or `#`.
static AI_PAIR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d{2,3})/([^/?#]+)").expect("AI pair pattern is valid"));

/// Names the AI for one identifier part and the JSON pointer to its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPointer {
    /// The Application Identifier to assign to the dereferenced value.
    pub ai: String,
    /// JSON pointer into the payload data (e.g. `/registeredId`).
    pub path: String,
}

/// Where to find the identifier inside a credential payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentifierKeyPath {
    /// JSON pointer to a GS1 Digital Link URL string inside the payload.
    Pointer(String),
    /// Explicit per-part pointers.
    Descriptor {
        /// Pointer for the primary identification key.
        primary: AiPointer,
        /// Pointers for qualifier AIs; may be omitted.
        #[serde(default)]
        qualifiers: Vec<AiPointer>,
    },
}

/// Resolve the canonical identifier structure from a payload.
///
/// Pointer form: the first scanned AI pair becomes the primary, all
/// subsequent pairs become qualifiers in order of appearance. Zero pairs
/// fails with [`IdentifierError::NoAiPairsFound`]; a pointer that does
/// not select a string fails with
/// [`IdentifierError::InvalidIdentifierKeyPath`].
///
/// Descriptor form: each part's pointer is dereferenced against the
/// payload. A pointer that selects nothing yields an empty value rather
/// than an error — callers gate on [`Identifier::has_primary`] before
/// trusting the result.
pub fn resolve_identifier(
    payload: &Value,
    key_path: &IdentifierKeyPath,
) -> Result<Identifier, IdentifierError> {
    match key_path {
        IdentifierKeyPath::Pointer(path) => {
            let url = payload
                .pointer(path)
                .and_then(Value::as_str)
                .ok_or(IdentifierError::InvalidIdentifierKeyPath)?;
            scan_digital_link(url)
        }
        IdentifierKeyPath::Descriptor {
            primary,
            qualifiers,
        } => Ok(Identifier {
            primary: AiPair::new(primary.ai.clone(), pointer_value(payload, &primary.path)),
            qualifiers: qualifiers
                .iter()
                .map(|q| AiPair::new(q.ai.clone(), pointer_value(payload, &q.path)))
                .collect(),
        }),
    }
}

/// Scan a GS1 Digital Link URL for AI pairs, greedy left to right.
pub fn scan_digital_link(url: &str) -> Result<Identifier, IdentifierError> {
    let mut pairs = AI_PAIR_PATTERN
        .captures_iter(url)
        .map(|caps| AiPair::new(&caps[1], &caps[2]));

    let primary = pairs.next().ok_or(IdentifierError::NoAiPairsFound)?;
    Ok(Identifier {
        primary,
        qualifiers: pairs.collect(),
    })
}

/// Dereference a JSON pointer to a string value.
///
/// Strings pass through; numbers are stringified (registered identifiers
/// sometimes arrive as JSON numbers). Anything else — including a missing
/// target — yields the empty string.
fn pointer_value(payload: &Value, path: &str) -> String {
    match payload.pointer(path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
