//! Optional observability helpers for validation checks.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `pkce_audit.check` with the `check`
//!   (kind) and `subject` (parameter or provider) fields, plus `warn` events when a rule check
//!   fails to evaluate.
//! - Enable `metrics` to increment the `pkce_audit_check_total` counter for every verdict,
//!   labeled by `check` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, report::ValidationResult};

/// Check kinds observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckKind {
	/// Single-parameter rule evaluation.
	Parameter,
	/// Four-field aggregate validation.
	Aggregate,
	/// Security analyzer pass.
	Security,
	/// Provider compatibility pass.
	Compatibility,
}
impl CheckKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CheckKind::Parameter => "parameter",
			CheckKind::Aggregate => "aggregate",
			CheckKind::Security => "security",
			CheckKind::Compatibility => "compatibility",
		}
	}
}
impl Display for CheckKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Verdict labels recorded for each check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckOutcome {
	/// No errors or warnings.
	Pass,
	/// Warnings only.
	Warn,
	/// At least one error.
	Fail,
}
impl CheckOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CheckOutcome::Pass => "pass",
			CheckOutcome::Warn => "warn",
			CheckOutcome::Fail => "fail",
		}
	}
}
impl Display for CheckOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Classifies a result for span and metric labels.
pub fn outcome_of(result: &ValidationResult) -> CheckOutcome {
	if !result.errors.is_empty() {
		CheckOutcome::Fail
	} else if !result.warnings.is_empty() {
		CheckOutcome::Warn
	} else {
		CheckOutcome::Pass
	}
}
