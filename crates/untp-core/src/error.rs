//! # Identifier Error Types
//!
//! Structural failures of the identifier algebra. These are detected
//! synchronously, before any network activity, and carry fixed display
//! texts that downstream tests assert on.

use thiserror::Error;

/// Errors from identifier resolution and derived-string construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The `identifierKeyPath` value is neither a JSON-pointer string
    /// selecting a digital-link URL nor an explicit `{primary, qualifiers}`
    /// path descriptor, or a pointer dereferenced to nothing usable.
    #[error("Invalid identifierKeyPath")]
    InvalidIdentifierKeyPath,

    /// A digital-link URL was scanned but contained no `/{ai}/{value}`
    /// segment pairs.
    #[error("No AI pairs found in the digital link URL")]
    NoAiPairsFound,

    /// Element-string construction requires a non-empty primary AI and
    /// value.
    #[error("Primary AI or value is missing")]
    PrimaryAiOrValueMissing,
}
