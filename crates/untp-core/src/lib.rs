//! # untp-core — Foundational Types for the UNTP Stack
//!
//! This crate is the leaf of the workspace DAG. It defines the GS1
//! identifier algebra that every other crate builds on: Application
//! Identifier (AI) pairs, digital-link parsing, element strings,
//! qualifier paths, and the discoverable-link model handed to the
//! resolver registration layer.
//!
//! ## Key Design Principles
//!
//! 1. **Identifier resolution is pure.** [`resolve_identifier`] and the
//!    derived constructors perform no I/O and are referentially
//!    transparent. Heterogeneous input shapes are handled by the
//!    [`IdentifierKeyPath`] enum, not by runtime type sniffing.
//!
//! 2. **Validated structure over bare strings.** An [`Identifier`] is a
//!    `{primary, qualifiers}` structure; derived strings (element string,
//!    qualifier path) are computed from it, never assembled ad hoc.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `untp-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identifier;
pub mod keypath;
pub mod link;

pub use error::IdentifierError;
pub use identifier::{element_string, qualifier_path, AiPair, Identifier};
pub use keypath::{resolve_identifier, AiPointer, IdentifierKeyPath};
pub use link::LinkDescriptor;
