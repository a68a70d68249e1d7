// self
use crate::{
	_prelude::*,
	obs::{self, CheckKind, CheckSpan},
	params::{ChallengeMethod, PkceParameters},
	provider::ProviderProfile,
	report::{ValidationDetails, ValidationResult},
	rule::RuleSeverity,
};

/// Score for a profile with warnings but no errors.
pub const WARNING_SCORE: u8 = 80;

/// Provider requirement evaluated by [`check_compatibility`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityRequirement {
	/// Verifier fits the provider's limit.
	VerifierLength,
	/// Challenge method is accepted by the provider.
	ChallengeMethod,
	/// State fits the provider's limit.
	StateLength,
}

/// Outcome of one provider requirement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityCheck {
	/// Requirement evaluated.
	pub requirement: CompatibilityRequirement,
	/// Whether the requirement held.
	pub passed: bool,
	/// Severity of the finding when it did not hold.
	pub severity: RuleSeverity,
	/// Finding text when it did not hold.
	pub message: Option<String>,
}

/// Checks one parameter set against one provider profile.
///
/// Scores are coarse: 0 with any error, [`WARNING_SCORE`] with warnings only, 100 when clean.
pub fn check_compatibility(profile: &ProviderProfile, params: &PkceParameters) -> ValidationResult {
	let _guard = CheckSpan::new(CheckKind::Compatibility, &profile.id).entered();
	let verifier_len = params.code_verifier.chars().count();
	let state_len = params.state.chars().count();
	let verifier = if verifier_len <= profile.max_verifier_length {
		pass(CompatibilityRequirement::VerifierLength)
	} else {
		fail(
			CompatibilityRequirement::VerifierLength,
			RuleSeverity::Error,
			format!(
				"{} accepts verifiers up to {} characters (got {verifier_len}).",
				profile.id, profile.max_verifier_length
			),
		)
	};
	let method = match params.method() {
		Ok(ChallengeMethod::S256) => pass(CompatibilityRequirement::ChallengeMethod),
		Ok(ChallengeMethod::Plain) if profile.requires_s256 => fail(
			CompatibilityRequirement::ChallengeMethod,
			RuleSeverity::Error,
			format!("{} requires the S256 challenge method.", profile.id),
		),
		Ok(ChallengeMethod::Plain) => fail(
			CompatibilityRequirement::ChallengeMethod,
			RuleSeverity::Warning,
			format!("{} accepts `plain`, but S256 is recommended.", profile.id),
		),
		Err(e) => fail(
			CompatibilityRequirement::ChallengeMethod,
			RuleSeverity::Error,
			format!("{} cannot use the method: {e}", profile.id),
		),
	};
	let state = if state_len <= profile.max_state_length {
		pass(CompatibilityRequirement::StateLength)
	} else {
		fail(
			CompatibilityRequirement::StateLength,
			RuleSeverity::Warning,
			format!(
				"{} may truncate state values longer than {} characters (got {state_len}).",
				profile.id, profile.max_state_length
			),
		)
	};
	let checks = vec![verifier, method, state];
	let mut errors = Vec::new();
	let mut warnings = Vec::new();

	for check in checks.iter().filter(|check| !check.passed) {
		let message = check.message.clone().unwrap_or_default();

		match check.severity {
			RuleSeverity::Error => errors.push(message),
			RuleSeverity::Warning => warnings.push(message),
			RuleSeverity::Info => {},
		}
	}

	let score = if !errors.is_empty() {
		0
	} else if !warnings.is_empty() {
		WARNING_SCORE
	} else {
		100
	};
	let result = ValidationResult::new(
		errors,
		warnings,
		score,
		ValidationDetails::Compatibility { provider: profile.id.clone(), checks },
	);

	obs::record_check_outcome(CheckKind::Compatibility, obs::outcome_of(&result));

	result
}

fn pass(requirement: CompatibilityRequirement) -> CompatibilityCheck {
	CompatibilityCheck { requirement, passed: true, severity: RuleSeverity::Info, message: None }
}

fn fail(
	requirement: CompatibilityRequirement,
	severity: RuleSeverity,
	message: String,
) -> CompatibilityCheck {
	CompatibilityCheck { requirement, passed: false, severity, message: Some(message) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::provider::{ProviderId, ProviderTable};

	const VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
	const CHALLENGE: &str = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";
	const STATE: &str = "Xq3vR9tLmZ2wKp7YbN4sHd8FjC6gTe1U";

	fn profile(id: &str) -> ProviderProfile {
		ProviderTable::builtin().get(id).cloned().expect("Built-in profile should exist.")
	}

	#[test]
	fn clean_parameters_score_full() {
		let params = PkceParameters::new(VERIFIER, CHALLENGE, "S256", STATE);
		let result = check_compatibility(&profile("google"), &params);

		assert!(result.is_clean());
		assert_eq!(result.score, 100);
	}

	#[test]
	fn plain_depends_on_provider() {
		let params = PkceParameters::new(VERIFIER, VERIFIER, "plain", STATE);
		let google = check_compatibility(&profile("google"), &params);
		let github = check_compatibility(&profile("github"), &params);

		assert!(!google.valid);
		assert_eq!(google.score, 0);
		assert!(github.valid);
		assert_eq!(github.score, WARNING_SCORE);
	}

	#[test]
	fn limits_are_provider_specific() {
		let tight = ProviderProfile::builder(ProviderId::new("tight").expect("Valid identifier."))
			.max_verifier_length(43)
			.max_state_length(16)
			.build()
			.expect("Tight profile should be valid.");
		let params = PkceParameters::new(VERIFIER.repeat(2), CHALLENGE, "S256", STATE);
		let result = check_compatibility(&tight, &params);

		assert_eq!(result.errors.len(), 1);
		assert_eq!(result.warnings.len(), 1);
		assert!(result.errors[0].contains("got 86"));
		assert_eq!(result.score, 0);
	}
}
