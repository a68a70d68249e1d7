//! Rule engine that evaluates a static, enumerable rule table per PKCE parameter.
//!
//! Each [`ValidationRule`] is plain data: a name, a category, a severity, and two function
//! pointers (the check and the failure message). The default tables live in [`table`] and
//! are loaded by [`RuleEngine::new`]; callers may append their own rules with
//! [`RuleEngine::register`].
//!
//! Severity decides what a failing rule does to the result:
//!
//! - `error` pushes into `errors` and invalidates the result;
//! - `warning` pushes into `warnings` only;
//! - `info` is recorded in the details and still counts as passed for scoring.
//!
//! A check that returns [`RuleError`] becomes an `error` entry naming the rule, and the
//! remaining rules are still evaluated.

pub mod table;

pub use table::*;

// self
use crate::{
	_prelude::*,
	config::AuditConfig,
	error::RuleError,
	obs::{self, CheckKind, CheckSpan},
	params::{ParameterKind, PkceParameters},
	report::{self, RuleOutcome, ValidationDetails, ValidationResult},
};

/// Signature of a rule check.
pub type RuleCheck = fn(&str, &RuleContext) -> Result<bool, RuleError>;
/// Signature of a rule failure message builder.
pub type RuleMessage = fn(&str, &RuleContext) -> String;

/// What aspect of a parameter a rule inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
	/// Character set or encoding.
	Format,
	/// Length bounds.
	Length,
	/// Entropy, predictability, or cross-field binding.
	Security,
	/// Interoperability hints.
	Compatibility,
}

/// How a failing rule affects the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
	/// Invalidates the result.
	Error,
	/// Reported, but the result stays valid.
	Warning,
	/// Recorded in the details only.
	Info,
}

/// A single named check registered against one parameter.
#[derive(Clone, Copy)]
pub struct ValidationRule {
	/// Stable rule name, unique within its parameter table.
	pub name: &'static str,
	/// What the rule enforces.
	pub description: &'static str,
	/// Rule category.
	pub category: RuleCategory,
	/// Rule severity.
	pub severity: RuleSeverity,
	/// Returns `Ok(true)` when the value satisfies the rule.
	pub check: RuleCheck,
	/// Builds the message recorded when the check fails.
	pub message: RuleMessage,
}
impl Debug for ValidationRule {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ValidationRule")
			.field("name", &self.name)
			.field("category", &self.category)
			.field("severity", &self.severity)
			.finish()
	}
}

/// Borrowed view of the other fields and the active thresholds, passed to every check.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
	/// Verifier the challenge should be bound to, when known.
	pub code_verifier: Option<&'a str>,
	/// Raw challenge method, when known.
	pub code_challenge_method: Option<&'a str>,
	/// Active thresholds.
	pub config: &'a AuditConfig,
}
impl<'a> RuleContext<'a> {
	/// Creates a context with no sibling fields.
	pub fn new(config: &'a AuditConfig) -> Self {
		Self { code_verifier: None, code_challenge_method: None, config }
	}

	/// Creates a context carrying every sibling field from `params`.
	pub fn from_parameters(params: &'a PkceParameters, config: &'a AuditConfig) -> Self {
		Self {
			code_verifier: Some(&params.code_verifier),
			code_challenge_method: Some(&params.code_challenge_method),
			config,
		}
	}

	/// Sets the verifier.
	pub fn with_verifier(mut self, verifier: &'a str) -> Self {
		self.code_verifier = Some(verifier);

		self
	}

	/// Sets the challenge method.
	pub fn with_method(mut self, method: &'a str) -> Self {
		self.code_challenge_method = Some(method);

		self
	}

	/// True when challenge rules should apply S256 semantics.
	///
	/// An absent method is treated as `S256`, the only method worth defaulting to.
	pub fn expects_s256(&self) -> bool {
		self.code_challenge_method.is_none_or(|method| method == "S256")
	}
}

/// Evaluates the registered rule tables.
///
/// The engine is immutable once built and holds no per-call state, so one instance can be
/// shared freely across threads.
#[derive(Clone, Debug)]
pub struct RuleEngine {
	config: AuditConfig,
	rules: BTreeMap<ParameterKind, Vec<ValidationRule>>,
}
impl RuleEngine {
	/// Creates an engine loaded with the default rule tables.
	pub fn new(config: AuditConfig) -> Self {
		let rules = ParameterKind::ALL
			.into_iter()
			.map(|kind| (kind, default_rules(kind).to_vec()))
			.collect();

		Self { config, rules }
	}

	/// Active thresholds.
	pub fn config(&self) -> &AuditConfig {
		&self.config
	}

	/// Returns a context bound to this engine's thresholds.
	pub fn context(&self) -> RuleContext<'_> {
		RuleContext::new(&self.config)
	}

	/// Rules registered for `kind`, in evaluation order.
	pub fn rules(&self, kind: ParameterKind) -> &[ValidationRule] {
		self.rules.get(&kind).map(Vec::as_slice).unwrap_or_default()
	}

	/// Appends a rule to the table for `kind`.
	pub fn register(&mut self, kind: ParameterKind, rule: ValidationRule) -> &mut Self {
		self.rules.entry(kind).or_default().push(rule);

		self
	}

	/// Runs every rule registered for the parameter called `name`.
	///
	/// Unknown names produce an invalid result with score 0.
	pub fn validate_parameter(
		&self,
		name: &str,
		value: &str,
		ctx: &RuleContext,
	) -> ValidationResult {
		match name.parse::<ParameterKind>() {
			Ok(kind) => self.validate_field(kind, value, ctx),
			Err(e) => {
				let result = ValidationResult::new(
					vec![e.to_string()],
					Vec::new(),
					0,
					ValidationDetails::UnknownParameter { name: name.to_owned() },
				);

				obs::record_check_outcome(CheckKind::Parameter, obs::outcome_of(&result));

				result
			},
		}
	}

	/// Runs every rule registered for `kind`.
	pub fn validate_field(
		&self,
		kind: ParameterKind,
		value: &str,
		ctx: &RuleContext,
	) -> ValidationResult {
		let _guard = CheckSpan::new(CheckKind::Parameter, kind.as_str()).entered();
		let rules = self.rules(kind);
		let mut errors = Vec::new();
		let mut warnings = Vec::new();
		let mut outcomes = Vec::with_capacity(rules.len());
		let mut passed = 0;

		for rule in rules {
			let (held, credited, message) = match (rule.check)(value, ctx) {
				Ok(true) => (true, true, None),
				Ok(false) => {
					let message = (rule.message)(value, ctx);

					match rule.severity {
						RuleSeverity::Error => errors.push(message.clone()),
						RuleSeverity::Warning => warnings.push(message.clone()),
						RuleSeverity::Info => {},
					}

					(false, rule.severity == RuleSeverity::Info, Some(message))
				},
				Err(e) => {
					obs::rule_evaluation_failed(kind, rule.name, &e);

					let message = format!("Rule `{}` failed to evaluate: {e}", rule.name);

					errors.push(message.clone());

					(false, false, Some(message))
				},
			};

			if credited {
				passed += 1;
			}

			outcomes.push(RuleOutcome {
				rule: rule.name.to_owned(),
				category: rule.category,
				severity: rule.severity,
				passed: held,
				message,
			});
		}

		let result = ValidationResult::new(
			errors,
			warnings,
			report::percentage(passed, rules.len()),
			ValidationDetails::Parameter { parameter: kind, rules: outcomes },
		);

		obs::record_check_outcome(CheckKind::Parameter, obs::outcome_of(&result));

		result
	}
}
impl Default for RuleEngine {
	fn default() -> Self {
		Self::new(AuditConfig::default())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn always_fails(_: &str, _: &RuleContext) -> Result<bool, RuleError> {
		Ok(false)
	}

	fn explodes(_: &str, _: &RuleContext) -> Result<bool, RuleError> {
		Err(RuleError::Custom("boom".into()))
	}

	fn fixed_message(_: &str, _: &RuleContext) -> String {
		"custom rule failed".into()
	}

	fn custom_rule(name: &'static str, severity: RuleSeverity, check: RuleCheck) -> ValidationRule {
		ValidationRule {
			name,
			description: "Test-only rule.",
			category: RuleCategory::Compatibility,
			severity,
			check,
			message: fixed_message,
		}
	}

	#[test]
	fn unknown_parameter_scores_zero() {
		let engine = RuleEngine::default();
		let result = engine.validate_parameter("nonce", "abc", &engine.context());

		assert!(!result.valid);
		assert_eq!(result.score, 0);
		assert_eq!(result.errors, vec!["Unknown parameter `nonce`.".to_owned()]);
		assert!(matches!(result.details, ValidationDetails::UnknownParameter { ref name } if name == "nonce"));
	}

	#[test]
	fn failing_check_is_captured_and_evaluation_continues() {
		let mut engine = RuleEngine::default();

		engine.register(
			ParameterKind::CodeChallengeMethod,
			custom_rule("explodes", RuleSeverity::Warning, explodes),
		);
		engine.register(
			ParameterKind::CodeChallengeMethod,
			custom_rule("trailing", RuleSeverity::Warning, always_fails),
		);

		let result = engine.validate_field(ParameterKind::CodeChallengeMethod, "S256", &engine.context());

		assert!(!result.valid);
		assert_eq!(result.errors, vec!["Rule `explodes` failed to evaluate: boom".to_owned()]);
		assert_eq!(result.warnings, vec!["custom rule failed".to_owned()]);
		// 2 built-in rules pass out of 4.
		assert_eq!(result.score, 50);
	}

	#[test]
	fn info_failures_count_as_passed() {
		let mut engine = RuleEngine::default();

		engine.register(ParameterKind::CodeChallengeMethod, custom_rule("hint", RuleSeverity::Info, always_fails));

		let result = engine.validate_field(ParameterKind::CodeChallengeMethod, "S256", &engine.context());

		assert!(result.is_clean());
		assert_eq!(result.score, 100);

		let ValidationDetails::Parameter { rules, .. } = &result.details else {
			panic!("Expected parameter details.");
		};
		let hint = rules.iter().find(|r| r.rule == "hint").expect("Custom rule should be reported.");

		assert!(!hint.passed);
		assert_eq!(hint.message.as_deref(), Some("custom rule failed"));
	}

	#[test]
	fn rule_tables_are_enumerable() {
		let engine = RuleEngine::default();

		assert_eq!(engine.rules(ParameterKind::CodeVerifier).len(), 5);
		assert_eq!(engine.rules(ParameterKind::CodeChallenge).len(), 4);
		assert_eq!(engine.rules(ParameterKind::CodeChallengeMethod).len(), 2);
		assert_eq!(engine.rules(ParameterKind::State).len(), 4);
	}

	#[test]
	fn absent_method_defaults_to_s256() {
		let config = AuditConfig::default();

		assert!(RuleContext::new(&config).expects_s256());
		assert!(!RuleContext::new(&config).with_method("plain").expects_s256());
		assert!(!RuleContext::new(&config).with_method("S512").expects_s256());
	}
}
