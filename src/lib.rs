//! Generate, validate, and security-score OAuth 2.0 PKCE parameters (RFC 7636) with static
//! rule tables, entropy heuristics, and provider compatibility profiles.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod analysis;
pub mod authorize;
pub mod config;
pub mod error;
pub mod generate;
pub mod obs;
pub mod params;
pub mod provider;
pub mod report;
pub mod rule;
pub mod security;
pub mod validator;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::AuditConfig, params::PkceParameters, provider::ProviderTable,
		validator::PkceValidator,
	};

	/// RFC 7636 Appendix B verifier.
	pub const RFC_VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
	/// RFC 7636 Appendix B challenge derived from [`RFC_VERIFIER`].
	pub const RFC_CHALLENGE: &str = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";
	/// High-entropy state fixture that passes every state rule.
	pub const GOOD_STATE: &str = "Xq3vR9tLmZ2wKp7YbN4sHd8FjC6gTe1U";

	/// Builds a validator backed by the default thresholds and the built-in provider table.
	pub fn test_validator() -> PkceValidator {
		PkceValidator::new(AuditConfig::default(), ProviderTable::builtin())
	}

	/// Parameters built from the RFC 7636 Appendix B vectors plus [`GOOD_STATE`].
	pub fn rfc_parameters() -> PkceParameters {
		PkceParameters::new(RFC_VERIFIER, RFC_CHALLENGE, "S256", GOOD_STATE)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::{Arc, OnceLock},
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use {color_eyre as _, tracing_subscriber as _};
