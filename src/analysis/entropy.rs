//! Entropy estimation for verifier and state strings.
//!
//! The estimate is Shannon entropy of the observed character distribution multiplied by
//! the character count. It is a heuristic: a uniformly random 43-character base64url string
//! lands far above the 128-bit bar while repetitive input collapses towards zero.

/// Shannon entropy of the character distribution, in bits per character.
pub fn shannon_bits_per_char(value: &str) -> f64 {
	let mut counts = std::collections::HashMap::<char, usize>::new();
	let mut total = 0_usize;

	for c in value.chars() {
		*counts.entry(c).or_default() += 1;
		total += 1;
	}

	if total == 0 {
		return 0.;
	}

	let total = total as f64;

	counts
		.values()
		.map(|&count| {
			let p = count as f64 / total;

			-p * p.log2()
		})
		.sum()
}

/// Estimated total entropy of `value`, in bits.
pub fn estimate_entropy_bits(value: &str) -> f64 {
	shannon_bits_per_char(value) * value.chars().count() as f64
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn uniform_input_has_zero_entropy() {
		assert_eq!(estimate_entropy_bits(""), 0.);
		assert_eq!(estimate_entropy_bits(&"a".repeat(64)), 0.);
	}

	#[test]
	fn two_symbols_carry_one_bit_each() {
		let bits = estimate_entropy_bits("abababab");

		assert!((bits - 8.).abs() < 1e-9, "Expected 8 bits, got {bits}.");
	}

	#[test]
	fn rfc_verifier_clears_verifier_threshold() {
		assert!(estimate_entropy_bits("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk") >= 128.);
	}
}
