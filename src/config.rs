//! Tunable thresholds consumed by rules and the security analyzer.

// std
use std::io::Read;
// self
use crate::{_prelude::*, error::ConfigError};

/// Thresholds applied by the rule tables and security analyzer.
///
/// Every field has a default matching RFC 7636 guidance, so partial JSON documents are
/// accepted and missing keys fall back to [`AuditConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
	/// Minimum estimated entropy (bits) for a code verifier.
	pub verifier_min_entropy_bits: f64,
	/// Minimum estimated entropy (bits) for a state value.
	pub state_min_entropy_bits: f64,
	/// Recommended minimum state length.
	pub state_min_length: usize,
	/// Recommended maximum state length.
	pub state_max_length: usize,
	/// Shortest run of repeated or sequential characters treated as predictable.
	pub pattern_min_run: usize,
}
impl AuditConfig {
	/// Parses and validates a JSON document.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(json);
		let config: Self = serde_path_to_error::deserialize(&mut de).map_err(ConfigError::parse)?;

		config.validate()?;

		Ok(config)
	}

	/// Parses and validates a JSON document from any reader.
	pub fn from_json_reader(reader: impl Read) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_reader(reader);
		let config: Self = serde_path_to_error::deserialize(&mut de).map_err(ConfigError::parse)?;

		config.validate()?;

		Ok(config)
	}

	/// Checks that thresholds are usable.
	pub fn validate(&self) -> Result<(), ConfigError> {
		check_bits("verifier_min_entropy_bits", self.verifier_min_entropy_bits)?;
		check_bits("state_min_entropy_bits", self.state_min_entropy_bits)?;

		if self.state_min_length == 0 {
			return Err(ConfigError::InvalidThreshold {
				name: "state_min_length",
				reason: "must be at least 1".into(),
			});
		}
		if self.state_max_length < self.state_min_length {
			return Err(ConfigError::InvalidThreshold {
				name: "state_max_length",
				reason: format!("must not be below state_min_length ({})", self.state_min_length),
			});
		}
		if self.pattern_min_run < 2 {
			return Err(ConfigError::InvalidThreshold {
				name: "pattern_min_run",
				reason: "must be at least 2".into(),
			});
		}

		Ok(())
	}
}
impl Default for AuditConfig {
	fn default() -> Self {
		Self {
			verifier_min_entropy_bits: 128.,
			state_min_entropy_bits: 64.,
			state_min_length: 16,
			state_max_length: 255,
			pattern_min_run: 4,
		}
	}
}

fn check_bits(name: &'static str, value: f64) -> Result<(), ConfigError> {
	if value.is_finite() && value >= 0. {
		Ok(())
	} else {
		Err(ConfigError::InvalidThreshold {
			name,
			reason: format!("{value} is not a finite, non-negative bit count"),
		})
	}
}
