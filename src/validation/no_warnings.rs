use super::{EmailValidation, RfcValidation, ValidationError, ValidationOutcome, Verdict};
use crate::parser::ParseOptions;

/// RFC validation that also fails on any advisory warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoRfcWarningsValidation {
    rfc: RfcValidation,
}

impl NoRfcWarningsValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            rfc: RfcValidation::with_options(options),
        }
    }
}

impl EmailValidation for NoRfcWarningsValidation {
    #[cfg_attr(feature = "with-tracing", tracing::instrument(level = "debug", skip(self)))]
    fn validate(&self, email: &str) -> Result<ValidationOutcome, ValidationError> {
        let (verdict, warnings) = self.rfc.validate(email)?.into_parts();
        let verdict = match verdict {
            Verdict::Valid if !warnings.is_empty() => Verdict::RejectedWarnings,
            other => other,
        };
        Ok(ValidationOutcome::new(verdict, warnings))
    }
}
