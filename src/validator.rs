//! Validator facade tying the rule engine, security analyzer, and provider table together.

// self
use crate::{
	_prelude::*,
	config::AuditConfig,
	obs::{self, CheckKind, CheckSpan},
	params::{ParameterKind, PkceParameters},
	provider::{self, ProviderId, ProviderTable},
	report::{ValidationDetails, ValidationResult},
	rule::{RuleContext, RuleEngine},
	security,
};

/// Entry point for every PKCE check.
///
/// The validator owns the rule engine (and therefore its thresholds) plus the provider
/// table. It carries no per-call state: build one at startup and share it by reference
/// or behind an [`Arc`].
#[derive(Clone, Debug)]
pub struct PkceValidator {
	/// Rule engine evaluating per-parameter tables.
	pub engine: RuleEngine,
	/// Provider profiles used by [`PkceValidator::test_provider_compatibility`].
	pub providers: ProviderTable,
}
impl PkceValidator {
	/// Creates a validator from explicit thresholds and providers.
	pub fn new(config: AuditConfig, providers: ProviderTable) -> Self {
		Self { engine: RuleEngine::new(config), providers }
	}

	/// Replaces the rule engine, e.g. one extended with custom rules.
	pub fn with_engine(mut self, engine: RuleEngine) -> Self {
		self.engine = engine;

		self
	}

	/// Active thresholds.
	pub fn config(&self) -> &AuditConfig {
		self.engine.config()
	}

	/// Returns an empty context bound to this validator's thresholds.
	pub fn context(&self) -> RuleContext<'_> {
		self.engine.context()
	}

	/// Runs the rule table for the parameter called `name`.
	///
	/// See [`RuleEngine::validate_parameter`].
	pub fn validate_parameter(
		&self,
		name: &str,
		value: &str,
		ctx: &RuleContext,
	) -> ValidationResult {
		self.engine.validate_parameter(name, value, ctx)
	}

	/// Validates all four fields and folds the per-field verdicts into one.
	///
	/// Errors and warnings are prefixed with the field name; the score is the unweighted mean
	/// of the four field scores.
	pub fn validate_pkce_parameters(&self, params: &PkceParameters) -> ValidationResult {
		let _guard = CheckSpan::new(CheckKind::Aggregate, "parameters").entered();
		let ctx = RuleContext::from_parameters(params, self.config());
		let mut errors = Vec::new();
		let mut warnings = Vec::new();
		let mut score_sum = 0_u32;
		let mut fields = BTreeMap::new();

		for kind in ParameterKind::ALL {
			let result = self.engine.validate_field(kind, params.get(kind), &ctx);

			errors.extend(result.errors.iter().map(|e| format!("{kind}: {e}")));
			warnings.extend(result.warnings.iter().map(|w| format!("{kind}: {w}")));
			score_sum += u32::from(result.score);
			fields.insert(kind, result);
		}

		let score = (f64::from(score_sum) / ParameterKind::ALL.len() as f64).round() as u8;
		let result =
			ValidationResult::new(errors, warnings, score, ValidationDetails::Aggregate { fields });

		obs::record_check_outcome(CheckKind::Aggregate, obs::outcome_of(&result));

		result
	}

	/// Scores how safe the parameters are, independent of format validity.
	///
	/// See [`security::analyze`].
	pub fn analyze_parameter_security(&self, params: &PkceParameters) -> ValidationResult {
		security::analyze(self.config(), params)
	}

	/// Checks the parameters against every provider in the table.
	pub fn test_provider_compatibility(
		&self,
		params: &PkceParameters,
	) -> BTreeMap<ProviderId, ValidationResult> {
		self.providers
			.iter()
			.map(|profile| (profile.id.clone(), provider::check_compatibility(profile, params)))
			.collect()
	}
}
impl Default for PkceValidator {
	fn default() -> Self {
		Self::new(AuditConfig::default(), ProviderTable::builtin())
	}
}
