//! # untp-publisher — Credential Publishing Orchestration
//!
//! Sequences the full publish pipeline for verifiable supply-chain
//! records: validate the operation context, resolve the GS1 identifier
//! from the payload, issue the credential (external), store the issued
//! artifact (external), construct the verification link, and register
//! the discoverable links on an identity resolver.
//!
//! Nine credential/event kinds share one pipeline ([`publish::Publisher`]);
//! the variation between them is carried by a per-kind profile table
//! ([`kind::KindProfile`]), not by duplicated control flow.
//!
//! ## Failure Model
//!
//! Strictly sequential, fail-fast, no retries, no compensation: the
//! first error aborts the run and surfaces to the caller unmodified.
//! Partial progress (credential issued but not registered) is not
//! rolled back.

pub mod collaborators;
pub mod context;
pub mod envelope;
pub mod error;
pub mod kind;
pub mod publish;
pub mod validate;

pub use collaborators::{
    ArtifactStore, CredentialIssuer, InputCache, IssueRequest, IssuerError, StorageError,
    StorageReference,
};
pub use context::{
    CredentialTypeConfig, IssuanceConfig, OperationContext, ResolverConfig, StorageConfig,
};
pub use envelope::decode_enveloped_credential;
pub use error::{ContextError, PublishError};
pub use kind::{CredentialKind, KindProfile, StorageKeyStrategy};
pub use publish::{PublishResult, Publisher};
pub use validate::validate_context;
