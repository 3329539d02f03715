//! # Context Validation
//!
//! Fail-fast gate run before any network call. Checks are
//! short-circuiting in a fixed priority order and report exactly one
//! missing field with a fixed message — the message text is part of the
//! observable contract and is asserted on by tests.
//!
//! With typed contexts the nine per-kind validators collapse into one
//! function: the kind-specific sub-block has the same shape for every
//! kind, so the check sequence is shared.

use crate::context::OperationContext;
use crate::error::ContextError;

/// Validate an operation context.
///
/// Priority order: storage → dlr → vckit → identifierKeyPath, then the
/// credential sub-block (context, type, link title, verification page).
/// The first missing field wins; later fields are not inspected.
pub fn validate_context(context: &OperationContext) -> Result<(), ContextError> {
    if context.storage.url.is_empty() {
        return Err(ContextError::new("Invalid storage context"));
    }
    if context.resolver.api_url.is_empty()
        || context.resolver.api_key.is_empty()
        || context.resolver.namespace.is_empty()
    {
        return Err(ContextError::new("Invalid dlr context"));
    }
    if context.issuance.api_url.is_empty() || context.issuance.issuer.is_empty() {
        return Err(ContextError::new("Invalid vckit context"));
    }
    if context.identifier_key_path.is_none() {
        return Err(ContextError::new("Invalid identifierKeyPath"));
    }
    if context.credential.context.is_empty() {
        return Err(ContextError::new("Invalid credential context"));
    }
    if context.credential.type_.is_empty() {
        return Err(ContextError::new("Invalid credential type"));
    }
    if context.credential.dlr_link_title.is_empty() {
        return Err(ContextError::new("Invalid dlrLinkTitle"));
    }
    if context.credential.dlr_verification_page.is_empty() {
        return Err(ContextError::new("Invalid dlrVerificationPage"));
    }
    Ok(())
}
