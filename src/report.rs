//! Structured verdicts returned by every check in the crate.

// self
use crate::{
	_prelude::*,
	params::ParameterKind,
	provider::{CompatibilityCheck, ProviderId},
	rule::{RuleCategory, RuleSeverity},
	security::SecurityChecks,
};

/// Pass/fail verdict with a 0–100 score and categorized diagnostics.
///
/// `valid` is false exactly when `errors` is non-empty. Warnings never invalidate a result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
	/// True when no error-severity finding was recorded.
	pub valid: bool,
	/// Findings that invalidate the parameters.
	pub errors: Vec<String>,
	/// Findings worth fixing that do not invalidate the parameters.
	pub warnings: Vec<String>,
	/// Score in `0..=100`.
	pub score: u8,
	/// Check-specific breakdown.
	pub details: ValidationDetails,
}
impl ValidationResult {
	/// Builds a result, deriving `valid` from `errors`.
	pub fn new(
		errors: Vec<String>,
		warnings: Vec<String>,
		score: u8,
		details: ValidationDetails,
	) -> Self {
		Self { valid: errors.is_empty(), errors, warnings, score: score.min(100), details }
	}

	/// Returns true when the result carries neither errors nor warnings.
	pub fn is_clean(&self) -> bool {
		self.errors.is_empty() && self.warnings.is_empty()
	}
}

/// Check-specific detail payload attached to a [`ValidationResult`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationDetails {
	/// Per-rule outcomes for a single parameter.
	Parameter {
		/// Parameter that was evaluated.
		parameter: ParameterKind,
		/// One outcome per registered rule, in table order.
		rules: Vec<RuleOutcome>,
	},
	/// The caller asked for a parameter the engine does not know.
	UnknownParameter {
		/// Name as supplied.
		name: String,
	},
	/// Per-field results from the aggregate validator.
	Aggregate {
		/// Result for each of the four fields.
		fields: BTreeMap<ParameterKind, ValidationResult>,
	},
	/// Security analyzer breakdown.
	Security {
		/// Individual check outcomes.
		checks: SecurityChecks,
		/// Remediation advice for each failed check.
		recommendations: Vec<String>,
	},
	/// Provider compatibility breakdown.
	Compatibility {
		/// Provider that was checked.
		provider: ProviderId,
		/// Individual requirement outcomes.
		checks: Vec<CompatibilityCheck>,
	},
}

/// Outcome of a single rule evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
	/// Rule name.
	pub rule: String,
	/// Rule category.
	pub category: RuleCategory,
	/// Rule severity.
	pub severity: RuleSeverity,
	/// Whether the rule's check held.
	pub passed: bool,
	/// Message recorded when the check failed or could not be evaluated.
	pub message: Option<String>,
}

/// Rounds `100 * passed / total` to the nearest integer; an empty total scores 100.
pub fn percentage(passed: usize, total: usize) -> u8 {
	if total == 0 {
		return 100;
	}

	((passed.min(total) as f64 * 100. / total as f64).round()) as u8
}
