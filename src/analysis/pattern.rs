//! Detection of predictable runs and sensitive content in PKCE strings.

// crates.io
use regex::Regex;
// self
use crate::{_prelude::*, error::RuleError};

const COMMON_WORDS: &str =
	r"(?i)(password|passwd|secret|admin|qwerty|letmein|welcome|changeme|default|login)";
const EMAIL: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}";
const SSN_LIKE: &str = r"\b\d{3}-\d{2}-\d{4}\b";
const CARD_LIKE: &str = r"\b(?:\d{4}[ \-]?){3}\d{4}\b";
const SENSITIVE_WORDS: &str = r"(?i)(user|token|secret|password|session|email)";

static COMMON_WORDS_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static SSN_LIKE_RE: OnceLock<Regex> = OnceLock::new();
static CARD_LIKE_RE: OnceLock<Regex> = OnceLock::new();
static SENSITIVE_WORDS_RE: OnceLock<Regex> = OnceLock::new();

/// A predictable fragment found in a verifier or state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictablePattern {
	/// The same character repeated `len` times in a row.
	RepeatedRun {
		/// Repeated character.
		ch: char,
		/// Run length.
		len: usize,
	},
	/// Consecutive ascending or descending characters such as `abcd` or `9876`.
	Sequence {
		/// Matched fragment.
		text: String,
	},
	/// A dictionary word commonly found in weak secrets.
	CommonWord {
		/// Matched word as it appears in the input.
		word: String,
	},
}
impl Display for PredictablePattern {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			PredictablePattern::RepeatedRun { ch, len } => {
				write!(f, "character `{ch}` repeated {len} times")
			},
			PredictablePattern::Sequence { text } => write!(f, "sequential run `{text}`"),
			PredictablePattern::CommonWord { word } => write!(f, "common word `{word}`"),
		}
	}
}

/// Sensitive content that must never travel inside a `state` value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensitiveData {
	/// Something shaped like an email address.
	Email,
	/// Something shaped like a US social security number.
	SsnLike,
	/// Something shaped like a payment card number.
	CardLike,
	/// A keyword hinting at identity or credential material.
	Keyword {
		/// Matched word as it appears in the input.
		word: String,
	},
}
impl Display for SensitiveData {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			SensitiveData::Email => f.write_str("an email address"),
			SensitiveData::SsnLike => f.write_str("an SSN-like number"),
			SensitiveData::CardLike => f.write_str("a card-like number"),
			SensitiveData::Keyword { word } => write!(f, "the keyword `{word}`"),
		}
	}
}

/// Returns the first predictable pattern in `value`, checking runs, sequences, then words.
///
/// `min_run` is the shortest repeated or sequential run reported.
pub fn find_predictable_pattern(
	value: &str,
	min_run: usize,
) -> Result<Option<PredictablePattern>, RuleError> {
	if let Some(found) = find_repeated_run(value, min_run) {
		return Ok(Some(found));
	}
	if let Some(found) = find_sequence(value, min_run) {
		return Ok(Some(found));
	}

	let words = compiled(&COMMON_WORDS_RE, COMMON_WORDS)?;

	Ok(words
		.find(value)
		.map(|m| PredictablePattern::CommonWord { word: m.as_str().to_owned() }))
}

/// Returns the first kind of sensitive data found in `value`.
pub fn find_sensitive_data(value: &str) -> Result<Option<SensitiveData>, RuleError> {
	if compiled(&EMAIL_RE, EMAIL)?.is_match(value) {
		return Ok(Some(SensitiveData::Email));
	}
	if compiled(&SSN_LIKE_RE, SSN_LIKE)?.is_match(value) {
		return Ok(Some(SensitiveData::SsnLike));
	}
	if compiled(&CARD_LIKE_RE, CARD_LIKE)?.is_match(value) {
		return Ok(Some(SensitiveData::CardLike));
	}

	Ok(compiled(&SENSITIVE_WORDS_RE, SENSITIVE_WORDS)?
		.find(value)
		.map(|m| SensitiveData::Keyword { word: m.as_str().to_owned() }))
}

fn find_repeated_run(value: &str, min_run: usize) -> Option<PredictablePattern> {
	let chars: Vec<char> = value.chars().collect();
	let mut start = 0;

	for i in 1..=chars.len() {
		if i < chars.len() && chars[i] == chars[start] {
			continue;
		}
		if i - start >= min_run {
			return Some(PredictablePattern::RepeatedRun { ch: chars[start], len: i - start });
		}

		start = i;
	}

	None
}

fn find_sequence(value: &str, min_run: usize) -> Option<PredictablePattern> {
	let chars: Vec<char> = value.chars().collect();

	for direction in [1_i32, -1] {
		let mut start = 0;

		for i in 1..=chars.len() {
			let continues = i < chars.len() && steps_by(chars[i - 1], chars[i], direction);

			if !continues {
				if i - start >= min_run {
					return Some(PredictablePattern::Sequence {
						text: chars[start..i].iter().collect(),
					});
				}

				start = i;
			}
		}
	}

	None
}

fn steps_by(prev: char, next: char, direction: i32) -> bool {
	let same_class = (prev.is_ascii_digit() && next.is_ascii_digit())
		|| (prev.is_ascii_lowercase() && next.is_ascii_lowercase())
		|| (prev.is_ascii_uppercase() && next.is_ascii_uppercase());

	same_class && next as i32 - prev as i32 == direction
}

fn compiled(
	cell: &'static OnceLock<Regex>,
	pattern: &'static str,
) -> Result<&'static Regex, RuleError> {
	if let Some(re) = cell.get() {
		return Ok(re);
	}

	let re = Regex::new(pattern).map_err(|source| RuleError::Pattern { pattern, source })?;

	Ok(cell.get_or_init(|| re))
}
