//! PKCE parameter records and the names used to address individual fields.

// self
use crate::_prelude::*;

/// PKCE challenge methods defined by RFC 7636.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
	/// Challenge equals the verifier; discouraged.
	#[serde(rename = "plain")]
	Plain,
}
impl ChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub const fn as_str(self) -> &'static str {
		match self {
			ChallengeMethod::S256 => "S256",
			ChallengeMethod::Plain => "plain",
		}
	}
}
impl Display for ChallengeMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ChallengeMethod {
	type Err = UnsupportedMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"S256" => Ok(ChallengeMethod::S256),
			"plain" => Ok(ChallengeMethod::Plain),
			_ => Err(UnsupportedMethod(s.to_owned())),
		}
	}
}

/// Raised when a challenge method string is neither `S256` nor `plain`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unsupported challenge method `{0}`.")]
pub struct UnsupportedMethod(pub String);

/// The four PKCE fields addressed by the rule engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterKind {
	/// `code_verifier`.
	CodeVerifier,
	/// `code_challenge`.
	CodeChallenge,
	/// `code_challenge_method`.
	CodeChallengeMethod,
	/// `state`.
	State,
}
impl ParameterKind {
	/// All parameters in evaluation order.
	pub const ALL: [ParameterKind; 4] = [
		ParameterKind::CodeVerifier,
		ParameterKind::CodeChallenge,
		ParameterKind::CodeChallengeMethod,
		ParameterKind::State,
	];

	/// Returns the camelCase name used by callers and reports.
	pub const fn as_str(self) -> &'static str {
		match self {
			ParameterKind::CodeVerifier => "codeVerifier",
			ParameterKind::CodeChallenge => "codeChallenge",
			ParameterKind::CodeChallengeMethod => "codeChallengeMethod",
			ParameterKind::State => "state",
		}
	}
}
impl Display for ParameterKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ParameterKind {
	type Err = UnknownParameter;

	/// Accepts both the camelCase and the RFC 6749 snake_case spellings.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"codeVerifier" | "code_verifier" => Ok(ParameterKind::CodeVerifier),
			"codeChallenge" | "code_challenge" => Ok(ParameterKind::CodeChallenge),
			"codeChallengeMethod" | "code_challenge_method" =>
				Ok(ParameterKind::CodeChallengeMethod),
			"state" => Ok(ParameterKind::State),
			_ => Err(UnknownParameter(s.to_owned())),
		}
	}
}

/// Raised when a name does not address one of the four PKCE fields.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown parameter `{0}`.")]
pub struct UnknownParameter(pub String);

/// One set of PKCE parameters, generated fresh for a single authorization attempt.
///
/// The method is kept as the raw string so unsupported values can be reported by the
/// rule engine instead of being rejected during construction.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PkceParameters {
	/// Secret verifier, revealed only at token exchange.
	pub code_verifier: String,
	/// Challenge derived from the verifier.
	pub code_challenge: String,
	/// Challenge method identifier (`S256` or `plain`).
	pub code_challenge_method: String,
	/// Opaque CSRF correlation value.
	pub state: String,
}
impl PkceParameters {
	/// Creates a parameter set from raw strings.
	pub fn new(
		code_verifier: impl Into<String>,
		code_challenge: impl Into<String>,
		code_challenge_method: impl Into<String>,
		state: impl Into<String>,
	) -> Self {
		Self {
			code_verifier: code_verifier.into(),
			code_challenge: code_challenge.into(),
			code_challenge_method: code_challenge_method.into(),
			state: state.into(),
		}
	}

	/// Returns the raw value of the requested field.
	pub fn get(&self, kind: ParameterKind) -> &str {
		match kind {
			ParameterKind::CodeVerifier => &self.code_verifier,
			ParameterKind::CodeChallenge => &self.code_challenge,
			ParameterKind::CodeChallengeMethod => &self.code_challenge_method,
			ParameterKind::State => &self.state,
		}
	}

	/// Parses the challenge method.
	pub fn method(&self) -> Result<ChallengeMethod, UnsupportedMethod> {
		self.code_challenge_method.parse()
	}
}
impl Debug for PkceParameters {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PkceParameters")
			.field("code_verifier", &"<redacted>")
			.field("code_challenge", &self.code_challenge)
			.field("code_challenge_method", &self.code_challenge_method)
			.field("state", &self.state)
			.finish()
	}
}
