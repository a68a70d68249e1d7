//! Authorization request assembly for a provider profile and a validated parameter set.
//!
//! The request keeps the verifier so the caller can stash it (keyed by `state`) until the
//! redirect handler performs the token exchange.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	params::{ChallengeMethod, PkceParameters},
	provider::ProviderProfile,
};

/// Authorize URL plus the PKCE material needed to finish the flow.
#[derive(Clone)]
pub struct AuthorizationRequest {
	/// Fully-formed HTTPS authorize URL that callers should send end-users to.
	pub authorize_url: Url,
	/// Redirect URI supplied when constructing the authorize URL.
	pub redirect_uri: Url,
	params: PkceParameters,
	method: ChallengeMethod,
}
impl AuthorizationRequest {
	/// Builds the authorize URL for `profile`.
	///
	/// Fails when the profile has no authorization endpoint or the parameters carry an
	/// unsupported challenge method.
	pub fn new<I, S>(
		profile: &ProviderProfile,
		client_id: &str,
		redirect_uri: &str,
		scopes: I,
		params: PkceParameters,
	) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let endpoint = profile.authorization_endpoint.as_ref().ok_or_else(|| {
			ConfigError::MissingAuthorizationEndpoint { provider: profile.id.to_string() }
		})?;
		let method = params.method().map_err(|e| ConfigError::UnsupportedMethod { method: e.0 })?;
		let redirect_uri =
			Url::parse(redirect_uri).map_err(|source| ConfigError::InvalidRedirect { source })?;
		let scope = format_scope(scopes, profile.scope_delimiter);
		let mut authorize_url = endpoint.clone();
		let mut pairs = authorize_url.query_pairs_mut();

		pairs.append_pair("response_type", "code");
		pairs.append_pair("client_id", client_id);
		pairs.append_pair("redirect_uri", redirect_uri.as_str());

		if let Some(scope_value) = scope {
			pairs.append_pair("scope", &scope_value);
		}

		pairs.append_pair("state", &params.state);
		pairs.append_pair("code_challenge", &params.code_challenge);
		pairs.append_pair("code_challenge_method", method.as_str());

		drop(pairs);

		Ok(Self { authorize_url, redirect_uri, params, method })
	}

	/// Opaque state value that must round-trip via the redirect handler.
	pub fn state(&self) -> &str {
		&self.params.state
	}

	/// PKCE challenge sent with the request.
	pub fn code_challenge(&self) -> &str {
		&self.params.code_challenge
	}

	/// PKCE challenge method sent with the request.
	pub fn code_challenge_method(&self) -> ChallengeMethod {
		self.method
	}

	/// Secret verifier for the token exchange. Callers must avoid logging this string.
	pub fn code_verifier(&self) -> &str {
		&self.params.code_verifier
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.params.state {
			Ok(())
		} else {
			Err(Error::StateMismatch)
		}
	}
}
impl Debug for AuthorizationRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationRequest")
			.field("authorize_url", &self.authorize_url)
			.field("redirect_uri", &self.redirect_uri)
			.field("state", &self.params.state)
			.field("code_challenge", &self.params.code_challenge)
			.field("code_challenge_method", &self.method)
			.finish()
	}
}

fn format_scope<I, S>(scopes: I, delimiter: char) -> Option<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let joined = scopes
		.into_iter()
		.filter(|scope| !scope.as_ref().is_empty())
		.map(|scope| scope.as_ref().to_owned())
		.collect::<Vec<_>>()
		.join(&delimiter.to_string());

	(!joined.is_empty()).then_some(joined)
}
