// self
use crate::{_prelude::*, error::RuleError, obs::CheckKind, params::ParameterKind};

/// A span builder used by validation checks.
#[derive(Clone, Debug)]
pub struct CheckSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CheckSpan {
	/// Creates a new span tagged with the provided check kind + subject.
	pub fn new(kind: CheckKind, subject: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!("pkce_audit.check", check = kind.as_str(), subject);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, subject);

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> CheckSpanGuard {
		#[cfg(feature = "tracing")]
		{
			CheckSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			CheckSpanGuard {}
		}
	}
}

/// RAII guard returned by [`CheckSpan::entered`].
pub struct CheckSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for CheckSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("CheckSpanGuard(..)")
	}
}

/// Emits a warning when a rule check returns an error instead of a verdict.
pub fn rule_evaluation_failed(parameter: ParameterKind, rule: &str, error: &RuleError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(parameter = parameter.as_str(), rule, %error, "Rule check failed to evaluate.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (parameter, rule, error);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn check_span_enters_without_subscriber() {
		let _guard = CheckSpan::new(CheckKind::Parameter, "codeVerifier").entered();
		// Compile-time smoke test ensures the guard exists even when tracing is disabled.
	}

	#[test]
	fn rule_failure_event_is_safe_without_subscriber() {
		rule_evaluation_failed(
			ParameterKind::State,
			"no_sensitive_data",
			&RuleError::MissingContext { field: "state" },
		);
	}
}
