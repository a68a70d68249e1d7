//! Default rule tables, one per PKCE parameter.

// self
use crate::{
	analysis::{self, S256_CHALLENGE_LEN, VERIFIER_MAX_LEN, VERIFIER_MIN_LEN},
	error::RuleError,
	params::ParameterKind,
	rule::{RuleCategory, RuleContext, RuleSeverity, ValidationRule},
};

/// Code verifier rules (RFC 7636 §4.1).
pub static CODE_VERIFIER_RULES: [ValidationRule; 5] = [
	ValidationRule {
		name: "length",
		description: "Verifier must be 43 to 128 characters long.",
		category: RuleCategory::Length,
		severity: RuleSeverity::Error,
		check: |value, _| Ok((VERIFIER_MIN_LEN..=VERIFIER_MAX_LEN).contains(&char_len(value))),
		message: |value, _| {
			format!(
				"Code verifier must be {VERIFIER_MIN_LEN}-{VERIFIER_MAX_LEN} characters long (got {} chars).",
				char_len(value)
			)
		},
	},
	ValidationRule {
		name: "charset",
		description: "Verifier may only use unreserved characters [A-Za-z0-9-._~].",
		category: RuleCategory::Format,
		severity: RuleSeverity::Error,
		check: |value, _| Ok(is_unreserved_string(value)),
		message: |value, _| charset_message("Code verifier", value, analysis::is_unreserved, UNRESERVED),
	},
	ValidationRule {
		name: "entropy",
		description: "Verifier should carry enough entropy to resist guessing.",
		category: RuleCategory::Security,
		severity: RuleSeverity::Warning,
		check: |value, ctx| {
			Ok(analysis::estimate_entropy_bits(value) >= ctx.config.verifier_min_entropy_bits)
		},
		message: |value, ctx| {
			entropy_message("Code verifier", value, ctx.config.verifier_min_entropy_bits)
		},
	},
	ValidationRule {
		name: "predictable_pattern",
		description: "Verifier should not contain repeated runs, sequences, or common words.",
		category: RuleCategory::Security,
		severity: RuleSeverity::Warning,
		check: |value, ctx| {
			Ok(analysis::find_predictable_pattern(value, ctx.config.pattern_min_run)?.is_none())
		},
		message: |value, ctx| pattern_message("Code verifier", value, ctx),
	},
	ValidationRule {
		name: "base64url_compatible",
		description: "Verifier round-trips through unpadded base64url.",
		category: RuleCategory::Compatibility,
		severity: RuleSeverity::Info,
		check: |value, _| Ok(analysis::base64url_round_trips(value)),
		message: |_, _| "Code verifier is not canonical base64url; some libraries re-encode it.".into(),
	},
];

/// Code challenge rules (RFC 7636 §4.2).
pub static CODE_CHALLENGE_RULES: [ValidationRule; 4] = [
	ValidationRule {
		name: "s256_length",
		description: "An S256 challenge is exactly 43 characters long.",
		category: RuleCategory::Length,
		severity: RuleSeverity::Error,
		check: |value, ctx| Ok(!ctx.expects_s256() || char_len(value) == S256_CHALLENGE_LEN),
		message: |value, _| {
			format!(
				"S256 code challenge must be exactly {S256_CHALLENGE_LEN} characters long (got {} chars).",
				char_len(value)
			)
		},
	},
	ValidationRule {
		name: "charset",
		description: "Challenge may only use the base64url alphabet [A-Za-z0-9-_].",
		category: RuleCategory::Format,
		severity: RuleSeverity::Error,
		check: |value, _| Ok(!value.is_empty() && value.chars().all(analysis::is_base64url)),
		message: |value, _| charset_message("Code challenge", value, analysis::is_base64url, BASE64URL),
	},
	ValidationRule {
		name: "no_padding",
		description: "Challenge must be base64url without `=` padding.",
		category: RuleCategory::Format,
		severity: RuleSeverity::Warning,
		check: |value, _| Ok(!value.contains('=')),
		message: |_, _| "Code challenge carries `=` padding; strip it before sending.".into(),
	},
	ValidationRule {
		name: "matches_verifier",
		description: "An S256 challenge equals BASE64URL(SHA256(verifier)).",
		category: RuleCategory::Security,
		severity: RuleSeverity::Error,
		check: check_challenge_binding,
		message: |_, _| {
			"Code challenge does not match BASE64URL(SHA256(code verifier)) for method S256.".into()
		},
	},
];

/// Code challenge method rules (RFC 7636 §4.3).
pub static CODE_CHALLENGE_METHOD_RULES: [ValidationRule; 2] = [
	ValidationRule {
		name: "supported",
		description: "Method must be `S256` or `plain`.",
		category: RuleCategory::Format,
		severity: RuleSeverity::Error,
		check: |value, _| Ok(matches!(value, "S256" | "plain")),
		message: |value, _| {
			format!("Unsupported code challenge method `{value}`; expected `S256` or `plain`.")
		},
	},
	ValidationRule {
		name: "prefer_s256",
		description: "`plain` offers no protection once the challenge leaks.",
		category: RuleCategory::Security,
		severity: RuleSeverity::Warning,
		check: |value, _| Ok(value != "plain"),
		message: |_, _| "Code challenge method `plain` is discouraged; use `S256`.".into(),
	},
];

/// State rules (RFC 6749 §10.12).
pub static STATE_RULES: [ValidationRule; 4] = [
	ValidationRule {
		name: "recommended_length",
		description: "State should be long enough to resist guessing and short enough for URLs.",
		category: RuleCategory::Length,
		severity: RuleSeverity::Warning,
		check: |value, ctx| {
			Ok((ctx.config.state_min_length..=ctx.config.state_max_length).contains(&char_len(value)))
		},
		message: |value, ctx| {
			format!(
				"State should be {}-{} characters long (got {} chars).",
				ctx.config.state_min_length,
				ctx.config.state_max_length,
				char_len(value)
			)
		},
	},
	ValidationRule {
		name: "charset",
		description: "State may only use unreserved characters [A-Za-z0-9-._~].",
		category: RuleCategory::Format,
		severity: RuleSeverity::Error,
		check: |value, _| Ok(is_unreserved_string(value)),
		message: |value, _| charset_message("State", value, analysis::is_unreserved, UNRESERVED),
	},
	ValidationRule {
		name: "entropy",
		description: "State should carry enough entropy to defeat CSRF guessing.",
		category: RuleCategory::Security,
		severity: RuleSeverity::Warning,
		check: |value, ctx| {
			Ok(analysis::estimate_entropy_bits(value) >= ctx.config.state_min_entropy_bits)
		},
		message: |value, ctx| entropy_message("State", value, ctx.config.state_min_entropy_bits),
	},
	ValidationRule {
		name: "no_sensitive_data",
		description: "State must stay opaque and never embed personal or credential data.",
		category: RuleCategory::Security,
		severity: RuleSeverity::Warning,
		check: |value, _| Ok(analysis::find_sensitive_data(value)?.is_none()),
		message: |value, _| match analysis::find_sensitive_data(value) {
			Ok(Some(found)) => format!("State appears to contain {found}; keep it opaque."),
			_ => "State appears to contain sensitive data; keep it opaque.".into(),
		},
	},
];

const UNRESERVED: &str = "A-Z a-z 0-9 - . _ ~";
const BASE64URL: &str = "A-Z a-z 0-9 - _";

/// Returns the default table for `kind`.
pub fn default_rules(kind: ParameterKind) -> &'static [ValidationRule] {
	match kind {
		ParameterKind::CodeVerifier => &CODE_VERIFIER_RULES,
		ParameterKind::CodeChallenge => &CODE_CHALLENGE_RULES,
		ParameterKind::CodeChallengeMethod => &CODE_CHALLENGE_METHOD_RULES,
		ParameterKind::State => &STATE_RULES,
	}
}

fn check_challenge_binding(value: &str, ctx: &RuleContext) -> Result<bool, RuleError> {
	if !ctx.expects_s256() {
		return Ok(true);
	}

	// Standalone challenge validation has nothing to bind against.
	let Some(verifier) = ctx.code_verifier else {
		return Ok(true);
	};

	Ok(analysis::derive_s256_challenge(verifier) == value)
}

fn char_len(value: &str) -> usize {
	value.chars().count()
}

fn is_unreserved_string(value: &str) -> bool {
	!value.is_empty() && value.chars().all(analysis::is_unreserved)
}

fn charset_message(
	field: &str,
	value: &str,
	allowed: fn(char) -> bool,
	alphabet: &str,
) -> String {
	if value.is_empty() {
		return format!("{field} is empty.");
	}

	let offending = analysis::invalid_chars(value, allowed)
		.into_iter()
		.map(|c| format!("`{c}`"))
		.collect::<Vec<_>>()
		.join(", ");

	format!("{field} contains invalid characters: {offending} (allowed: {alphabet}).")
}

fn entropy_message(field: &str, value: &str, min_bits: f64) -> String {
	format!(
		"{field} entropy is {:.1} bits; at least {min_bits} bits recommended.",
		analysis::estimate_entropy_bits(value)
	)
}

fn pattern_message(field: &str, value: &str, ctx: &RuleContext) -> String {
	match analysis::find_predictable_pattern(value, ctx.config.pattern_min_run) {
		Ok(Some(found)) => format!("{field} contains a predictable pattern: {found}."),
		_ => format!("{field} contains a predictable pattern."),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{config::AuditConfig, rule::RuleEngine};

	const VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";

	fn engine() -> RuleEngine {
		RuleEngine::new(AuditConfig::default())
	}

	#[test]
	fn verifier_length_boundaries() {
		let engine = engine();
		let ctx = engine.context();

		for (len, valid) in [(42, false), (43, true), (128, true), (129, false)] {
			let value = VERIFIER.repeat(4)[..len].to_owned();
			let result = engine.validate_field(ParameterKind::CodeVerifier, &value, &ctx);

			assert_eq!(result.valid, valid, "Unexpected verdict for a {len}-char verifier.");
		}
	}

	#[test]
	fn verifier_charset_error_names_offenders() {
		let engine = engine();
		let value = format!("{}+/", &VERIFIER[..41]);
		let result = engine.validate_field(ParameterKind::CodeVerifier, &value, &engine.context());

		assert!(!result.valid);
		assert!(
			result.errors.iter().any(|e| e.contains("`+`") && e.contains("`/`")),
			"Errors should name the offending characters: {:?}.",
			result.errors
		);
	}

	#[test]
	fn weak_verifier_only_warns() {
		let engine = engine();
		let value = "a".repeat(50);
		let result = engine.validate_field(ParameterKind::CodeVerifier, &value, &engine.context());

		assert!(result.valid);
		assert_eq!(result.warnings.len(), 2, "Entropy and pattern rules should warn.");
		assert!(result.warnings[1].contains("repeated 50 times"));
		assert_eq!(result.score, 60);
	}

	#[test]
	fn challenge_binding_uses_context() {
		let engine = engine();
		let bound = engine.context().with_verifier(VERIFIER).with_method("S256");
		let good = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";
		let wrong = "F9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";

		assert!(engine.validate_field(ParameterKind::CodeChallenge, good, &bound).is_clean());

		let result = engine.validate_field(ParameterKind::CodeChallenge, wrong, &bound);

		assert!(!result.valid);
		assert_eq!(result.errors.len(), 1);
		assert!(result.errors[0].contains("does not match"));
		assert_eq!(result.score, 75);
	}

	#[test]
	fn plain_challenge_skips_s256_rules() {
		let engine = engine();
		let ctx = engine.context().with_verifier(VERIFIER).with_method("plain");
		let result = engine.validate_field(ParameterKind::CodeChallenge, VERIFIER, &ctx);

		assert!(result.is_clean());
	}

	#[test]
	fn padded_challenge_errors_and_warns() {
		let engine = engine();
		let result =
			engine.validate_field(ParameterKind::CodeChallenge, "abc=", &engine.context());

		assert!(!result.valid);
		assert!(result.warnings.iter().any(|w| w.contains("padding")));
		assert!(result.errors.iter().any(|e| e.contains("`=`")));
	}

	#[test]
	fn method_rules() {
		let engine = engine();
		let ctx = engine.context();
		let plain = engine.validate_field(ParameterKind::CodeChallengeMethod, "plain", &ctx);

		assert!(plain.valid);
		assert_eq!(plain.warnings.len(), 1);
		assert_eq!(plain.score, 50);

		let bogus = engine.validate_field(ParameterKind::CodeChallengeMethod, "S512", &ctx);

		assert!(!bogus.valid);
		assert!(bogus.errors[0].contains("`S512`"));
	}

	#[test]
	fn state_rules() {
		let engine = engine();
		let ctx = engine.context();
		let short = engine.validate_field(ParameterKind::State, "short", &ctx);

		assert!(short.valid);
		assert!(short.warnings.iter().any(|w| w.contains("(got 5 chars)")));

		let leaky = engine.validate_field(ParameterKind::State, "session-for-alice-9f8e7d", &ctx);

		assert!(leaky.warnings.iter().any(|w| w.contains("`session`")));

		let email = engine.validate_field(ParameterKind::State, "alice@example.com", &ctx);

		assert!(!email.valid, "`@` is outside the state alphabet.");
	}
}
