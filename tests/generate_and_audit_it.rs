// crates.io
use rand::{SeedableRng, rngs::StdRng};
// self
use pkce_audit::{
	authorize::AuthorizationRequest,
	config::AuditConfig,
	generate::{self, generate_optimal_pkce_parameters},
	params::PkceParameters,
	provider::{ProviderTable, WARNING_SCORE},
	report::ValidationDetails,
	validator::PkceValidator,
};

#[test]
fn generated_parameters_always_validate() {
	let validator = PkceValidator::default();

	for _ in 0..64 {
		let params = generate_optimal_pkce_parameters();

		assert_eq!(params.code_verifier.len(), 43);
		assert_eq!(params.code_challenge.len(), 43);

		let result = validator.validate_pkce_parameters(&params);

		assert!(result.valid, "Generated parameters should validate: {:?}.", result.errors);

		let security = validator.analyze_parameter_security(&params);

		assert!(security.valid, "Generated parameters should be secure: {:?}.", security.errors);
	}
}

#[test]
fn seeded_generation_passes_every_provider() {
	let validator = PkceValidator::default();
	let params = generate::generate_with(&mut StdRng::seed_from_u64(2_024));
	let results = validator.test_provider_compatibility(&params);

	assert_eq!(results.len(), 5);

	for (provider, result) in &results {
		assert!(result.valid, "{provider} rejected generated parameters: {:?}.", result.errors);
		assert_eq!(result.score, 100, "{provider} should score generated parameters fully.");
	}
}

#[test]
fn plain_parameters_split_providers() {
	let validator = PkceValidator::default();
	let verifier = generate_optimal_pkce_parameters().code_verifier;
	let params = PkceParameters::new(&verifier, &verifier, "plain", "Xq3vR9tLmZ2wKp7YbN4sHd8FjC6gTe1U");
	let results = validator.test_provider_compatibility(&params);

	for provider in ["google", "microsoft", "apple"] {
		let result = &results[provider];

		assert!(!result.valid);
		assert_eq!(result.score, 0);
	}
	for provider in ["github", "discord"] {
		let result = &results[provider];

		assert!(result.valid);
		assert_eq!(result.score, WARNING_SCORE);
	}
}

#[test]
fn custom_configuration_and_providers() {
	let config = AuditConfig::from_json_str("{\"state_min_length\":40,\"state_max_length\":64}")
		.expect("Custom thresholds should parse.");
	let providers = ProviderTable::from_json_str(
		r#"[{"id":"acme","max_verifier_length":128,"requires_s256":true,"max_state_length":32,
		    "authorization_endpoint":"https://id.acme.test/authorize","scope_delimiter":","}]"#,
	)
	.expect("Custom providers should parse.");
	let validator = PkceValidator::new(config, providers);
	let params = generate_optimal_pkce_parameters();
	let result = validator.validate_pkce_parameters(&params);

	assert!(result.valid);
	assert!(
		result.warnings.iter().any(|w| w.contains("State should be 40-64 characters")),
		"32-char generated state should trip the stricter bound: {:?}.",
		result.warnings
	);

	let acme = validator.providers.get("acme").expect("Custom provider should be present.");
	let request = AuthorizationRequest::new(
		acme,
		"client-acme",
		"https://app.acme.test/cb",
		["openid", "profile"],
		params.clone(),
	)
	.expect("Authorization request should build.");
	let scope = request
		.authorize_url
		.query_pairs()
		.find(|(key, _)| key == "scope")
		.map(|(_, value)| value.into_owned());

	assert_eq!(scope.as_deref(), Some("openid,profile"));
	assert_eq!(request.code_verifier(), params.code_verifier);
	request.validate_state(&params.state).expect("Own state should validate.");
}

#[test]
fn security_details_carry_entropy_estimates() {
	let validator = PkceValidator::default();
	let params = generate_optimal_pkce_parameters();
	let result = validator.analyze_parameter_security(&params);
	let ValidationDetails::Security { checks, .. } = &result.details else {
		panic!("Expected security details, got {:?}.", result.details);
	};

	assert!(checks.verifier_entropy_bits >= 128.);
	assert!(checks.state_entropy_bits >= 64.);
	assert!(checks.uses_s256 && checks.challenge_matches_verifier && checks.meets_min_length);
}
