use crate::diagnostics::{InvalidEmail, Warning};
use crate::parser::{ParsedAddress, Rejection};

/// Final decision of a strategy.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "status", content = "error", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(InvalidEmail),
    /// No fatal error, but the policy refuses any warning.
    RejectedWarnings,
}

/// Verdict plus the warnings of every step that ran.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    verdict: Verdict,
    warnings: Vec<Warning>,
}

impl ValidationOutcome {
    pub fn new(verdict: Verdict, warnings: Vec<Warning>) -> Self {
        Self { verdict, warnings }
    }

    pub fn valid(warnings: Vec<Warning>) -> Self {
        Self::new(Verdict::Valid, warnings)
    }

    pub fn invalid(error: InvalidEmail, warnings: Vec<Warning>) -> Self {
        Self::new(Verdict::Invalid(error), warnings)
    }

    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Valid
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn error(&self) -> Option<&InvalidEmail> {
        match &self.verdict {
            Verdict::Invalid(error) => Some(error),
            Verdict::Valid | Verdict::RejectedWarnings => None,
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Verdict, Vec<Warning>) {
        (self.verdict, self.warnings)
    }
}

impl From<Result<ParsedAddress, Rejection>> for ValidationOutcome {
    fn from(result: Result<ParsedAddress, Rejection>) -> Self {
        match result {
            Ok(parsed) => Self::valid(parsed.warnings),
            Err(rejection) => Self::invalid(rejection.error, rejection.warnings),
        }
    }
}
