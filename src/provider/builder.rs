// self
use crate::{
	_prelude::*,
	analysis::{VERIFIER_MAX_LEN, VERIFIER_MIN_LEN},
	provider::{ProviderId, ProviderProfile},
};

/// Errors raised while constructing or validating provider profiles.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderProfileError {
	/// Verifier limit falls outside what RFC 7636 allows.
	#[error("Maximum verifier length must be between 43 and 128, got {max}.")]
	VerifierLimitOutOfRange {
		/// Rejected limit.
		max: usize,
	},
	/// A zero state limit would reject every request.
	#[error("Maximum state length must be at least 1.")]
	ZeroStateLimit,
	/// Endpoints must use HTTPS.
	#[error("The authorization endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Reject scope delimiters that are control characters.
	#[error("Scope delimiter must be a printable character.")]
	InvalidScopeDelimiter {
		/// Invalid delimiter that was supplied.
		delimiter: char,
	},
	/// Two profiles share an identifier.
	#[error("Provider `{id}` is already registered.")]
	Duplicate {
		/// Conflicting identifier.
		id: String,
	},
}

/// Builder for [`ProviderProfile`] values.
#[derive(Debug)]
pub struct ProviderProfileBuilder {
	/// Identifier for the profile being constructed.
	pub id: ProviderId,
	/// Longest accepted verifier (defaults to 128).
	pub max_verifier_length: usize,
	/// Whether `plain` is rejected (defaults to false).
	pub requires_s256: bool,
	/// Longest state value round-tripped intact (defaults to 255).
	pub max_state_length: usize,
	/// Optional authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Scope delimiter (defaults to a space).
	pub scope_delimiter: char,
}
impl ProviderProfileBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			max_verifier_length: VERIFIER_MAX_LEN,
			requires_s256: false,
			max_state_length: 255,
			authorization_endpoint: None,
			scope_delimiter: ' ',
		}
	}

	/// Sets the verifier limit.
	pub fn max_verifier_length(mut self, max: usize) -> Self {
		self.max_verifier_length = max;

		self
	}

	/// Marks S256 as mandatory.
	pub fn requires_s256(mut self, required: bool) -> Self {
		self.requires_s256 = required;

		self
	}

	/// Sets the state limit.
	pub fn max_state_length(mut self, max: usize) -> Self {
		self.max_state_length = max;

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Overrides the scope delimiter.
	pub fn scope_delimiter(mut self, delimiter: char) -> Self {
		self.scope_delimiter = delimiter;

		self
	}

	/// Consumes the builder and validates the resulting profile.
	pub fn build(self) -> Result<ProviderProfile, ProviderProfileError> {
		let profile = ProviderProfile {
			id: self.id,
			max_verifier_length: self.max_verifier_length,
			requires_s256: self.requires_s256,
			max_state_length: self.max_state_length,
			authorization_endpoint: self.authorization_endpoint,
			scope_delimiter: self.scope_delimiter,
		};

		profile.validate()?;

		Ok(profile)
	}
}

impl ProviderProfile {
	/// Validates invariants for the profile.
	pub fn validate(&self) -> Result<(), ProviderProfileError> {
		if !(VERIFIER_MIN_LEN..=VERIFIER_MAX_LEN).contains(&self.max_verifier_length) {
			return Err(ProviderProfileError::VerifierLimitOutOfRange {
				max: self.max_verifier_length,
			});
		}
		if self.max_state_length == 0 {
			return Err(ProviderProfileError::ZeroStateLimit);
		}
		if let Some(endpoint) = self.authorization_endpoint.as_ref() {
			validate_endpoint(endpoint)?;
		}

		validate_scope_delimiter(self.scope_delimiter)?;

		Ok(())
	}
}

fn validate_endpoint(url: &Url) -> Result<(), ProviderProfileError> {
	if url.scheme() != "https" {
		Err(ProviderProfileError::InsecureEndpoint { url: url.to_string() })
	} else {
		Ok(())
	}
}

fn validate_scope_delimiter(delimiter: char) -> Result<(), ProviderProfileError> {
	if delimiter.is_control() {
		Err(ProviderProfileError::InvalidScopeDelimiter { delimiter })
	} else {
		Ok(())
	}
}
