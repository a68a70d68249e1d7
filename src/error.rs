//! Crate-level error types shared across configuration, providers, and rule evaluation.
//!
//! Validation verdicts are never surfaced through these types; they travel as
//! [`ValidationResult`](crate::report::ValidationResult) data instead.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider profile failed validation.
	#[error(transparent)]
	Provider(#[from] crate::provider::ProviderProfileError),
	/// Identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::provider::IdentifierError),

	/// Callback `state` does not match the value sent with the authorization request.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and loading failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// JSON document could not be parsed into the expected shape.
	#[error("Configuration JSON is malformed at `{path}`.")]
	Parse {
		/// Path to the offending field inside the document.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A numeric threshold is outside its accepted range.
	#[error("Threshold `{name}` is invalid: {reason}.")]
	InvalidThreshold {
		/// Field name of the threshold.
		name: &'static str,
		/// Human-readable reason.
		reason: String,
	},
	/// Provider profile does not declare an authorization endpoint.
	#[error("Provider `{provider}` has no authorization endpoint.")]
	MissingAuthorizationEndpoint {
		/// Provider identifier string.
		provider: String,
	},
	/// Challenge method cannot be sent to a provider.
	#[error("Challenge method `{method}` is not supported.")]
	UnsupportedMethod {
		/// Raw method string.
		method: String,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a located JSON parsing failure.
	pub fn parse(source: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Parse { path: source.path().to_string(), source }
	}
}

/// Failure raised while evaluating a single rule check.
///
/// The rule engine converts these into `error` entries on the result instead of
/// propagating them.
#[derive(Debug, ThisError)]
pub enum RuleError {
	/// A built-in pattern could not be compiled.
	#[error("Pattern `{pattern}` failed to compile.")]
	Pattern {
		/// Source of the pattern.
		pattern: &'static str,
		/// Underlying regex failure.
		#[source]
		source: regex::Error,
	},
	/// The check needed context that was not supplied.
	#[error("Missing context field `{field}`.")]
	MissingContext {
		/// Name of the missing field.
		field: &'static str,
	},
	/// Custom check failure raised by a caller-registered rule.
	#[error("{0}")]
	Custom(String),
}
