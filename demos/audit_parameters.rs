//! Generates a fresh PKCE parameter set, audits it, and prints the authorize URL for the
//! built-in Google profile. Run with `RUST_LOG=pkce_audit=debug` to see check spans.

// crates.io
use color_eyre::{Result, eyre::eyre};
use tracing_subscriber::EnvFilter;
// self
use pkce_audit::{
	authorize::AuthorizationRequest, generate, params::PkceParameters, validator::PkceValidator,
};

fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

	let validator = PkceValidator::default();
	let params = generate::generate_optimal_pkce_parameters();
	let format = validator.validate_pkce_parameters(&params);
	let security = validator.analyze_parameter_security(&params);

	println!("Format: valid={} score={}.", format.valid, format.score);
	println!("Security: valid={} score={}.", security.valid, security.score);

	for (provider, result) in validator.test_provider_compatibility(&params) {
		println!("  {provider}: score={} warnings={:?}.", result.score, result.warnings);
	}

	let google = validator.providers.get("google").ok_or_else(|| eyre!("Missing Google profile."))?;
	let request = AuthorizationRequest::new(
		google,
		"demo-client",
		"https://app.example.com/oauth/callback",
		["openid", "email"],
		params.clone(),
	)?;

	println!("Send your user to {}.", request.authorize_url);

	// Contrast with a deliberately weak set: well-formed enough to pass some rules, but not
	// secure.
	let weak = PkceParameters::new("a".repeat(43), "a".repeat(43), "plain", "user-1234567890");
	let weak_security = validator.analyze_parameter_security(&weak);

	println!("Weak set: security score={} errors={:?}.", weak_security.score, weak_security.errors);

	Ok(())
}
