//! Security analyzer: an independent six-check scoring pass over a full parameter set.
//!
//! Unlike the rule engine, which asks "is this well-formed?", the analyzer asks "is this
//! safe?". The two can disagree: `plain` parameters are format-valid but never secure.

// self
use crate::{
	_prelude::*,
	analysis::{self, VERIFIER_MIN_LEN},
	config::AuditConfig,
	obs::{self, CheckKind, CheckSpan},
	params::{ChallengeMethod, PkceParameters},
	report::{self, ValidationDetails, ValidationResult},
};

const CHECK_COUNT: usize = 6;

/// Outcome of each security check plus the entropy estimates behind them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecurityChecks {
	/// Estimated verifier entropy in bits.
	pub verifier_entropy_bits: f64,
	/// Estimated state entropy in bits.
	pub state_entropy_bits: f64,
	/// Verifier entropy meets the configured minimum.
	pub verifier_entropy: bool,
	/// State entropy meets the configured minimum.
	pub state_entropy: bool,
	/// Challenge method is `S256`.
	pub uses_s256: bool,
	/// Challenge is the transform of the verifier under the declared method.
	pub challenge_matches_verifier: bool,
	/// Neither verifier nor state contains a predictable pattern.
	pub no_predictable_patterns: bool,
	/// Verifier and state both meet their minimum lengths.
	pub meets_min_length: bool,
}
impl SecurityChecks {
	/// Number of checks that held.
	pub fn passed(&self) -> usize {
		[
			self.verifier_entropy,
			self.state_entropy,
			self.uses_s256,
			self.challenge_matches_verifier,
			self.no_predictable_patterns,
			self.meets_min_length,
		]
		.into_iter()
		.filter(|passed| *passed)
		.count()
	}
}

/// Runs the six security checks against `params`.
///
/// A method other than `S256` and a challenge that does not bind to the verifier are
/// errors; every other failure is a warning with a matching recommendation.
pub fn analyze(config: &AuditConfig, params: &PkceParameters) -> ValidationResult {
	let _guard = CheckSpan::new(CheckKind::Security, "parameters").entered();
	let mut errors = Vec::new();
	let mut warnings = Vec::new();
	let mut recommendations = Vec::new();
	let verifier_entropy_bits = analysis::estimate_entropy_bits(&params.code_verifier);
	let state_entropy_bits = analysis::estimate_entropy_bits(&params.state);
	let method = params.method();
	let verifier_entropy = verifier_entropy_bits >= config.verifier_min_entropy_bits;

	if !verifier_entropy {
		warnings.push(format!(
			"Code verifier entropy is {verifier_entropy_bits:.1} bits, below the {} bit minimum.",
			config.verifier_min_entropy_bits
		));
		recommendations.push(
			"Generate the code verifier from 32 bytes of OS randomness and base64url-encode it."
				.to_owned(),
		);
	}

	let state_entropy = state_entropy_bits >= config.state_min_entropy_bits;

	if !state_entropy {
		warnings.push(format!(
			"State entropy is {state_entropy_bits:.1} bits, below the {} bit minimum.",
			config.state_min_entropy_bits
		));
		recommendations
			.push("Generate state from at least 16 bytes of OS randomness.".to_owned());
	}

	let uses_s256 = matches!(method, Ok(ChallengeMethod::S256));

	if !uses_s256 {
		match &method {
			Ok(ChallengeMethod::Plain) => errors.push(
				"Code challenge method `plain` exposes the verifier; S256 is required.".to_owned(),
			),
			Ok(ChallengeMethod::S256) => {},
			Err(e) => errors.push(e.to_string()),
		}

		recommendations.push("Switch the code challenge method to S256.".to_owned());
	}

	let challenge_matches_verifier = method.as_ref().is_ok_and(|&method| {
		analysis::challenge_matches(&params.code_verifier, &params.code_challenge, method)
	});

	if !challenge_matches_verifier {
		errors.push("Code challenge does not match the code verifier.".to_owned());
		recommendations.push(
			"Derive the challenge as BASE64URL(SHA256(verifier)) immediately after generating the verifier."
				.to_owned(),
		);
	}

	let no_predictable_patterns =
		match scan_patterns(&params.code_verifier, &params.state, config.pattern_min_run) {
			Ok(findings) if findings.is_empty() => true,
			Ok(findings) => {
				warnings.extend(findings);

				false
			},
			Err(e) => {
				warnings.push(format!("Pattern analysis could not run: {e}"));

				false
			},
		};

	if !no_predictable_patterns {
		recommendations.push(
			"Avoid words, counters, and repeated characters in the verifier and state.".to_owned(),
		);
	}

	let meets_min_length = params.code_verifier.chars().count() >= VERIFIER_MIN_LEN
		&& params.state.chars().count() >= config.state_min_length;

	if !meets_min_length {
		warnings.push(format!(
			"Code verifier must be at least {VERIFIER_MIN_LEN} and state at least {} characters.",
			config.state_min_length
		));
		recommendations.push(
			"Use 32 random bytes for the verifier and at least 16 for the state.".to_owned(),
		);
	}

	let checks = SecurityChecks {
		verifier_entropy_bits,
		state_entropy_bits,
		verifier_entropy,
		state_entropy,
		uses_s256,
		challenge_matches_verifier,
		no_predictable_patterns,
		meets_min_length,
	};
	let result = ValidationResult::new(
		errors,
		warnings,
		report::percentage(checks.passed(), CHECK_COUNT),
		ValidationDetails::Security { checks, recommendations },
	);

	obs::record_check_outcome(CheckKind::Security, obs::outcome_of(&result));

	result
}

fn scan_patterns(
	verifier: &str,
	state: &str,
	min_run: usize,
) -> Result<Vec<String>, crate::error::RuleError> {
	let mut findings = Vec::new();

	if let Some(found) = analysis::find_predictable_pattern(verifier, min_run)? {
		findings.push(format!("Code verifier contains a predictable pattern: {found}."));
	}
	if let Some(found) = analysis::find_predictable_pattern(state, min_run)? {
		findings.push(format!("State contains a predictable pattern: {found}."));
	}

	Ok(findings)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
	const CHALLENGE: &str = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";
	const STATE: &str = "Xq3vR9tLmZ2wKp7YbN4sHd8FjC6gTe1U";

	fn checks(result: &ValidationResult) -> (&SecurityChecks, &[String]) {
		match &result.details {
			ValidationDetails::Security { checks, recommendations } => (checks, recommendations),
			other => panic!("Expected security details, got {other:?}."),
		}
	}

	#[test]
	fn strong_parameters_pass_every_check() {
		let params = PkceParameters::new(VERIFIER, CHALLENGE, "S256", STATE);
		let result = analyze(&AuditConfig::default(), &params);
		let (checks, recommendations) = checks(&result);

		assert!(result.is_clean(), "Unexpected findings: {result:?}.");
		assert_eq!(result.score, 100);
		assert_eq!(checks.passed(), 6);
		assert!(recommendations.is_empty());
	}

	#[test]
	fn plain_method_is_a_hard_error() {
		let params = PkceParameters::new(VERIFIER, VERIFIER, "plain", STATE);
		let result = analyze(&AuditConfig::default(), &params);
		let (checks, _) = checks(&result);

		assert!(!result.valid);
		assert_eq!(result.errors.len(), 1);
		assert!(!checks.uses_s256);
		assert!(checks.challenge_matches_verifier, "Plain binding should still be checked.");
		assert_eq!(result.score, 83);
	}

	#[test]
	fn mismatch_is_a_hard_error() {
		let params = PkceParameters::new(VERIFIER, VERIFIER, "S256", STATE);
		let result = analyze(&AuditConfig::default(), &params);

		assert!(!result.valid);
		assert!(result.errors.iter().any(|e| e.contains("does not match")));
	}

	#[test]
	fn weak_inputs_warn_with_recommendations() {
		let params = PkceParameters::new("aaaaaaaa", "x", "S256", "1234");
		let result = analyze(&AuditConfig::default(), &params);
		let (checks, recommendations) = checks(&result);

		assert_eq!(checks.passed(), 1, "Only the S256 check should hold.");
		assert_eq!(result.score, 17);
		assert_eq!(recommendations.len(), 5);
		assert!(result.warnings.iter().any(|w| w.contains("predictable pattern")));
	}
}
