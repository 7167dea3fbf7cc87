use super::{EmailValidation, ValidationError, ValidationOutcome};
use crate::parser::{self, ParseOptions, ParsedAddress, Rejection};

/// Plain RFC 5321/5322 grammar check. Valid unless the parser raised a fatal
/// error; warnings are always reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RfcValidation {
    options: ParseOptions,
}

impl RfcValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub(crate) fn parse_address(&self, email: &str) -> Result<ParsedAddress, Rejection> {
        parser::parse(email, &self.options)
    }
}

impl EmailValidation for RfcValidation {
    #[cfg_attr(feature = "with-tracing", tracing::instrument(level = "debug", skip(self)))]
    fn validate(&self, email: &str) -> Result<ValidationOutcome, ValidationError> {
        Ok(self.parse_address(email).into())
    }
}
