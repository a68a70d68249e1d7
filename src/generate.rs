//! Generation of fresh PKCE parameters that satisfy every length and charset rule by
//! construction.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::CryptoRng;
// self
use crate::{analysis, params::{ChallengeMethod, PkceParameters}};

/// Random bytes behind each verifier (43 base64url characters).
pub const VERIFIER_BYTES: usize = 32;
/// Random bytes behind each state (32 base64url characters).
pub const STATE_BYTES: usize = 24;

/// Generates a verifier, its S256 challenge, and a state using the thread-local CSPRNG.
pub fn generate_optimal_pkce_parameters() -> PkceParameters {
	generate_with(&mut rand::rng())
}

/// Generates parameters from the supplied cryptographically secure RNG.
pub fn generate_with<R>(rng: &mut R) -> PkceParameters
where
	R: ?Sized + CryptoRng,
{
	let verifier = URL_SAFE_NO_PAD.encode(random_bytes::<VERIFIER_BYTES, _>(rng));
	let challenge = analysis::derive_s256_challenge(&verifier);
	let state = generate_state_with(rng);

	PkceParameters::new(verifier, challenge, ChallengeMethod::S256.as_str(), state)
}

/// Generates a standalone state value from the supplied RNG.
pub fn generate_state_with<R>(rng: &mut R) -> String
where
	R: ?Sized + CryptoRng,
{
	URL_SAFE_NO_PAD.encode(random_bytes::<STATE_BYTES, _>(rng))
}

fn random_bytes<const N: usize, R>(rng: &mut R) -> [u8; N]
where
	R: ?Sized + CryptoRng,
{
	let mut bytes = [0_u8; N];

	rng.fill_bytes(&mut bytes);

	bytes
}
