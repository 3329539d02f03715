//! # GS1 Identifier Structure and Derived Strings
//!
//! The canonical `{primary, qualifiers}` identifier structure and the two
//! derived string forms used throughout the stack:
//!
//! - **Element string** — `"(ai)value"` pairs in GS1 syntax, primary
//!   first, qualifiers in order.
//! - **Qualifier path** — `"/ai/value"` concatenation over qualifiers,
//!   `"/"` when there are none. Appended to resolver URIs and storage
//!   keys.

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// One GS1 Application Identifier with its value, e.g. `01` / `09359502000010`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPair {
    /// The 2-3 digit Application Identifier code.
    pub ai: String,
    /// The value carried under that AI.
    pub value: String,
}

impl AiPair {
    /// Construct a pair from anything string-like.
    pub fn new(ai: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            ai: ai.into(),
            value: value.into(),
        }
    }
}

/// A resolved identifier: one primary AI pair plus ordered qualifiers.
///
/// Qualifier order is preserved from the input; it is significant for
/// both the element string and the qualifier path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// The primary identification key (e.g. a GTIN under AI `01`).
    pub primary: AiPair,
    /// Secondary AIs narrowing the primary (lot, serial, ...). May be empty.
    #[serde(default)]
    pub qualifiers: Vec<AiPair>,
}

impl Identifier {
    /// Whether the primary AI and value are both present.
    ///
    /// Resolution from a path descriptor can legitimately produce empty
    /// parts when the descriptor points at absent payload fields; callers
    /// gate on this before using the identifier.
    pub fn has_primary(&self) -> bool {
        !self.primary.ai.is_empty() && !self.primary.value.is_empty()
    }
}

/// Construct the canonical GS1 element string for an identifier.
///
/// `"(01)09359502000010(10)LOT42"` — primary first, then each qualifier
/// in order. Fails with [`IdentifierError::PrimaryAiOrValueMissing`] when
/// either primary part is empty.
pub fn element_string(identifier: &Identifier) -> Result<String, IdentifierError> {
    if !identifier.has_primary() {
        return Err(IdentifierError::PrimaryAiOrValueMissing);
    }
    let mut out = format!("({}){}", identifier.primary.ai, identifier.primary.value);
    for qualifier in &identifier.qualifiers {
        out.push_str(&format!("({}){}", qualifier.ai, qualifier.value));
    }
    Ok(out)
}

/// Construct the qualifier path for a qualifier sequence.
///
/// Returns `"/"` for `None` or an empty slice — never null, never an
/// error. Otherwise `"/ai/value"` for each qualifier in order.
pub fn qualifier_path(qualifiers: Option<&[AiPair]>) -> String {
    match qualifiers {
        None => "/".to_string(),
        Some([]) => "/".to_string(),
        Some(pairs) => pairs
            .iter()
            .map(|pair| format!("/{}/{}", pair.ai, pair.value))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gtin_with_lot() -> Identifier {
        Identifier {
            primary: AiPair::new("01", "09359502000010"),
            qualifiers: vec![AiPair::new("10", "LOT42"), AiPair::new("21", "SER9")],
        }
    }

    #[test]
    fn element_string_orders_primary_then_qualifiers() {
        let s = element_string(&gtin_with_lot()).expect("valid identifier");
        assert_eq!(s, "(01)09359502000010(10)LOT42(21)SER9");
    }

    #[test]
    fn element_string_without_qualifiers() {
        let id = Identifier {
            primary: AiPair::new("01", "12345"),
            qualifiers: vec![],
        };
        assert_eq!(element_string(&id).expect("valid identifier"), "(01)12345");
    }

    #[test]
    fn element_string_rejects_missing_value() {
        let id = Identifier {
            primary: AiPair::new("01", ""),
            qualifiers: vec![],
        };
        assert_eq!(
            element_string(&id),
            Err(IdentifierError::PrimaryAiOrValueMissing)
        );
    }

    #[test]
    fn element_string_rejects_missing_ai() {
        let id = Identifier {
            primary: AiPair::new("", "12345"),
            qualifiers: vec![],
        };
        assert_eq!(
            element_string(&id),
            Err(IdentifierError::PrimaryAiOrValueMissing)
        );
    }

    #[test]
    fn qualifier_path_defaults_to_slash() {
        assert_eq!(qualifier_path(None), "/");
        assert_eq!(qualifier_path(Some(&[])), "/");
    }

    #[test]
    fn qualifier_path_concatenates_in_order() {
        let id = gtin_with_lot();
        assert_eq!(qualifier_path(Some(&id.qualifiers)), "/10/LOT42/21/SER9");
    }
}
