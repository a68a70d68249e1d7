//! Provider profile data and the table the compatibility checker iterates.

// self
use crate::{
	_prelude::*,
	analysis::VERIFIER_MAX_LEN,
	error::ConfigError,
	provider::{ProviderId, ProviderProfileBuilder, ProviderProfileError},
};

/// PKCE-relevant limits published (or observed) for one OAuth provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
	/// Profile identifier.
	pub id: ProviderId,
	/// Longest verifier the token endpoint accepts.
	pub max_verifier_length: usize,
	/// Whether the provider rejects `plain`.
	pub requires_s256: bool,
	/// Longest state value the provider round-trips intact.
	pub max_state_length: usize,
	/// Authorization endpoint used to build authorize URLs.
	#[serde(default)]
	pub authorization_endpoint: Option<Url>,
	/// Character used to join scopes in the `scope` parameter.
	#[serde(default = "default_scope_delimiter")]
	pub scope_delimiter: char,
}
impl ProviderProfile {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderProfileBuilder {
		ProviderProfileBuilder::new(id)
	}
}

/// Ordered collection of provider profiles with unique identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProviderTable {
	profiles: Vec<ProviderProfile>,
}
impl ProviderTable {
	/// Built-in profiles for widely used identity providers.
	pub fn builtin() -> Self {
		let profiles = [
			("google", 1024, true, "https://accounts.google.com/o/oauth2/v2/auth", ' '),
			("github", 255, false, "https://github.com/login/oauth/authorize", ' '),
			(
				"microsoft",
				2048,
				true,
				"https://login.microsoftonline.com/common/oauth2/v2.0/authorize",
				' ',
			),
			("discord", 255, false, "https://discord.com/oauth2/authorize", ' '),
			("apple", 255, true, "https://appleid.apple.com/auth/authorize", ' '),
		]
		.into_iter()
		.map(|(id, max_state_length, requires_s256, endpoint, scope_delimiter)| ProviderProfile {
			id: ProviderId::from_static(id),
			max_verifier_length: VERIFIER_MAX_LEN,
			requires_s256,
			max_state_length,
			authorization_endpoint: Url::parse(endpoint).ok(),
			scope_delimiter,
		})
		.collect();

		Self { profiles }
	}

	/// Parses a JSON array of profiles, validating each and rejecting duplicate identifiers.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(json);
		let profiles: Vec<ProviderProfile> =
			serde_path_to_error::deserialize(&mut de).map_err(ConfigError::parse)?;
		let mut table = Self::default();

		for profile in profiles {
			table.insert(profile)?;
		}

		Ok(table)
	}

	/// Validates and appends a profile.
	pub fn insert(&mut self, profile: ProviderProfile) -> Result<&mut Self, ProviderProfileError> {
		profile.validate()?;

		if self.get(&profile.id).is_some() {
			return Err(ProviderProfileError::Duplicate { id: profile.id.to_string() });
		}

		self.profiles.push(profile);

		Ok(self)
	}

	/// Looks up a profile by identifier.
	pub fn get(&self, id: &str) -> Option<&ProviderProfile> {
		self.profiles.iter().find(|profile| &*profile.id == id)
	}

	/// Iterates profiles in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &ProviderProfile> {
		self.profiles.iter()
	}

	/// Number of profiles.
	pub fn len(&self) -> usize {
		self.profiles.len()
	}

	/// Returns true when the table holds no profiles.
	pub fn is_empty(&self) -> bool {
		self.profiles.is_empty()
	}
}

fn default_scope_delimiter() -> char {
	' '
}
