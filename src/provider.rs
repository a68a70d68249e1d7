//! Provider compatibility profiles (data) and the checker that applies them (behavior).
//!
//! `profile` exposes [`ProviderProfile`] limits (maximum verifier and state lengths,
//! whether S256 is mandatory) and the [`ProviderTable`] that groups them. `builder`
//! validates profiles assembled in code; `compat` turns one profile plus one parameter set
//! into a [`ValidationResult`](crate::report::ValidationResult).

/// Builder API for assembling provider profiles.
pub mod builder;
/// Profile-vs-parameters compatibility checks.
pub mod compat;
/// Provider identifiers.
pub mod id;
/// Profile data and the provider table.
pub mod profile;

pub use builder::*;
pub use compat::*;
pub use id::*;
pub use profile::*;
