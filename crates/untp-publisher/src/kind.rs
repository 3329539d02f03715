//! # Credential and Event Kinds
//!
//! The nine publishable record kinds and the per-kind profile that
//! parameterizes the shared pipeline. Kind variation is data, not
//! control flow: the pipeline reads the profile instead of branching on
//! the kind.

use serde::{Deserialize, Serialize};

/// The publishable credential/event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialKind {
    /// Digital product passport for a trade item.
    DigitalProductPassport,
    /// Conformity credential attesting certification results.
    ConformityCredential,
    /// Facility record for a production site.
    FacilityRecord,
    /// Identity anchor binding an identifier to its registrar.
    IdentityAnchor,
    /// EPCIS object event.
    ObjectEvent,
    /// EPCIS aggregation event.
    AggregationEvent,
    /// EPCIS transaction event.
    TransactionEvent,
    /// EPCIS transformation event.
    TransformationEvent,
    /// EPCIS association event.
    AssociationEvent,
}

impl CredentialKind {
    /// All nine kinds, useful for table-driven tests.
    pub const ALL: [CredentialKind; 9] = [
        Self::DigitalProductPassport,
        Self::ConformityCredential,
        Self::FacilityRecord,
        Self::IdentityAnchor,
        Self::ObjectEvent,
        Self::AggregationEvent,
        Self::TransactionEvent,
        Self::TransformationEvent,
        Self::AssociationEvent,
    ];

    /// The camelCase name used in payloads and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DigitalProductPassport => "digitalProductPassport",
            Self::ConformityCredential => "conformityCredential",
            Self::FacilityRecord => "facilityRecord",
            Self::IdentityAnchor => "identityAnchor",
            Self::ObjectEvent => "objectEvent",
            Self::AggregationEvent => "aggregationEvent",
            Self::TransactionEvent => "transactionEvent",
            Self::TransformationEvent => "transformationEvent",
            Self::AssociationEvent => "associationEvent",
        }
    }

    /// The pipeline profile for this kind.
    pub fn profile(&self) -> KindProfile {
        match self {
            Self::DigitalProductPassport => KindProfile {
                decode_envelope: true,
                purge_cache: true,
                storage_key: StorageKeyStrategy::IdentifierDerived,
            },
            Self::ConformityCredential => KindProfile {
                decode_envelope: true,
                purge_cache: false,
                storage_key: StorageKeyStrategy::RandomUuid,
            },
            Self::FacilityRecord | Self::IdentityAnchor => KindProfile {
                decode_envelope: true,
                purge_cache: false,
                storage_key: StorageKeyStrategy::IdentifierDerived,
            },
            Self::ObjectEvent
            | Self::AggregationEvent
            | Self::TransactionEvent
            | Self::TransformationEvent
            | Self::AssociationEvent => KindProfile {
                decode_envelope: false,
                purge_cache: false,
                storage_key: StorageKeyStrategy::RandomUuid,
            },
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the shared pipeline varies for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    /// Decode enveloped credentials for convenience metadata.
    pub decode_envelope: bool,
    /// Purge the client-local cached input after registration.
    pub purge_cache: bool,
    /// How the storage key is derived.
    pub storage_key: StorageKeyStrategy,
}

/// Storage key derivation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKeyStrategy {
    /// `{primary.ai}/{primary.value}` plus the qualifier path.
    IdentifierDerived,
    /// A freshly generated opaque UUID.
    RandomUuid,
}
