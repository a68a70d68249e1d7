//! Pure helpers shared by the rule tables, the security analyzer, and the generator.
//!
//! `entropy` estimates how much randomness a string carries and `pattern` looks for
//! predictable or sensitive content. The functions here cover charsets and the S256
//! transform.

pub mod entropy;
pub mod pattern;

pub use entropy::*;
pub use pattern::*;

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::params::ChallengeMethod;

/// Shortest verifier RFC 7636 allows.
pub const VERIFIER_MIN_LEN: usize = 43;
/// Longest verifier RFC 7636 allows.
pub const VERIFIER_MAX_LEN: usize = 128;
/// Length of a base64url (no padding) encoded SHA-256 digest.
pub const S256_CHALLENGE_LEN: usize = 43;

/// RFC 3986 unreserved characters, the verifier and state alphabet.
pub fn is_unreserved(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Base64url alphabet without padding.
pub fn is_base64url(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '-' | '_')
}

/// Returns each character rejected by `allowed`, once, in order of first appearance.
pub fn invalid_chars(value: &str, allowed: impl Fn(char) -> bool) -> Vec<char> {
	let mut seen = Vec::new();

	for c in value.chars() {
		if !allowed(c) && !seen.contains(&c) {
			seen.push(c);
		}
	}

	seen
}

/// Computes `BASE64URL(SHA256(verifier))` without padding.
pub fn derive_s256_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(verifier.as_bytes());
	let digest = hasher.finalize();
	URL_SAFE_NO_PAD.encode(digest)
}

/// Checks that `challenge` is the transform of `verifier` under `method`.
pub fn challenge_matches(verifier: &str, challenge: &str, method: ChallengeMethod) -> bool {
	match method {
		ChallengeMethod::S256 => derive_s256_challenge(verifier) == challenge,
		ChallengeMethod::Plain => verifier == challenge,
	}
}

/// Returns true when `value` decodes as unpadded base64url and re-encodes to itself.
pub fn base64url_round_trips(value: &str) -> bool {
	URL_SAFE_NO_PAD
		.decode(value)
		.map(|bytes| URL_SAFE_NO_PAD.encode(bytes) == value)
		.unwrap_or(false)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rfc7636_appendix_b_vector() {
		assert_eq!(
			derive_s256_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
			"E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
		);
	}

	#[test]
	fn plain_challenge_requires_equality() {
		assert!(challenge_matches("abc", "abc", ChallengeMethod::Plain));
		assert!(!challenge_matches("abc", "abd", ChallengeMethod::Plain));
	}

	#[test]
	fn invalid_chars_are_deduplicated() {
		assert_eq!(invalid_chars("a+b+c/d=", is_unreserved), vec!['+', '/', '=']);
		assert!(invalid_chars("A-z_0.9~", is_unreserved).is_empty());
		assert_eq!(invalid_chars("abc.def", is_base64url), vec!['.']);
	}

	#[test]
	fn round_trip_rejects_non_alphabet() {
		assert!(base64url_round_trips("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"));
		assert!(!base64url_round_trips("has.dot~tilde"));
		assert!(!base64url_round_trips("padded=="));
	}
}
