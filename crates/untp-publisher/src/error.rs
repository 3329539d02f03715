//! # Publish Error Taxonomy
//!
//! Structural failures (context validation, payload shape, identifier
//! resolution) are detected before any network call; collaborator
//! failures propagate unmodified. Display texts are fixed — tests
//! assert on them.

use thiserror::Error;
use untp_core::IdentifierError;
use untp_resolver::RegistrarError;

use crate::collaborators::{IssuerError, StorageError};
use crate::kind::CredentialKind;

/// A context failed validation. Carries exactly one human-readable
/// message naming the first missing field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ContextError(pub String);

impl ContextError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors from one publish run. The first failure aborts the run.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The operation context failed validation.
    #[error("{0}")]
    InvalidContext(String),

    /// The payload carries no data section for this kind.
    #[error("Payload data is missing for {0}")]
    PayloadDataMissing(CredentialKind),

    /// The resolved identifier has an empty primary AI or value.
    #[error("Identifier not found in payload data")]
    IdentifierNotFound,

    /// Identifier resolution failed structurally.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The issuance collaborator failed; propagated unmodified.
    #[error(transparent)]
    Issuance(IssuerError),

    /// The storage collaborator failed; propagated unmodified.
    #[error(transparent)]
    Storage(StorageError),

    /// The verification link could not be constructed from the
    /// configured verification page.
    #[error("Failed to construct verification link: {0}")]
    VerifyLink(String),

    /// Resolver registration failed.
    #[error(transparent)]
    Registration(#[from] RegistrarError),
}

impl From<ContextError> for PublishError {
    fn from(err: ContextError) -> Self {
        Self::InvalidContext(err.0)
    }
}
