//! # untp-resolver — Link Resolver Registration
//!
//! Registers typed, localized links against GS1-style identifiers on a
//! link resolver, over two incompatible wire protocols:
//!
//! - **Legacy DLR** ([`dlr::DlrRegistrar`]): fixed three-response payload
//!   fanned out per region, bearer-token auth, client-synthesized
//!   resolver URL.
//! - **Pyx IDR** ([`pyx::PyxRegistrar`]): arbitrary link lists with
//!   namespace prefixing, locale defaults, and an explicit default-flag
//!   policy.
//!
//! Both adapters implement the [`registrar::LinkRegistrar`] capability
//! trait, fail fast on empty inputs before any network call, and wrap
//! every transport or HTTP failure into one uniform error message.
//!
//! [`verification`] holds advisory checks of a resolver's
//! self-description, used before trusting a resolver with registrations.

pub mod dlr;
pub mod pyx;
pub mod registrar;
pub mod registration;
pub mod verification;

pub use dlr::{DlrConfig, DlrRegistrar};
pub use pyx::{DefaultFlagPolicy, PyxConfig, PyxRegistrar};
pub use registrar::{
    LinkRegistrar, RegistrarError, RegisteredLink, RegistrationCause, DEFAULT_REGISTER_PATH,
};
pub use registration::{LinkRegistration, LinkResponse};
pub use verification::{
    verify_resolver_description, verify_untp_link_types, AdvertisedLinkType, LinkTypeWarning,
    ResolverDescription, REQUIRED_UNTP_LINK_TYPES,
};
