//! Validation strategies.
//!
//! Every policy implements [`EmailValidation`]; [`Validation`] is the closed
//! set of them that callers configure and compose.

mod dns;
mod error;
mod multiple;
mod no_warnings;
mod outcome;
mod rfc;
mod spoof;

pub use dns::{DnsCheckValidation, DnsRecord, DomainResolver};
pub use error::{DnsError, ValidationError};
pub use multiple::{AndMode, MultipleValidationWithAnd};
pub use no_warnings::NoRfcWarningsValidation;
pub use outcome::{ValidationOutcome, Verdict};
pub use rfc::RfcValidation;
#[cfg(feature = "with-spoof-check")]
pub use spoof::ScriptOracle;
pub use spoof::{ConfusableOracle, SpoofCheckValidation};

/// One validation policy. Calls are independent: no state survives between
/// them.
pub trait EmailValidation {
    fn validate(&self, email: &str) -> Result<ValidationOutcome, ValidationError>;
}

#[derive(Debug, Clone)]
pub enum Validation {
    Rfc(RfcValidation),
    NoRfcWarnings(NoRfcWarningsValidation),
    SpoofCheck(SpoofCheckValidation),
    DnsCheck(DnsCheckValidation),
    All(MultipleValidationWithAnd),
}

impl EmailValidation for Validation {
    fn validate(&self, email: &str) -> Result<ValidationOutcome, ValidationError> {
        match self {
            Self::Rfc(v) => v.validate(email),
            Self::NoRfcWarnings(v) => v.validate(email),
            Self::SpoofCheck(v) => v.validate(email),
            Self::DnsCheck(v) => v.validate(email),
            Self::All(v) => v.validate(email),
        }
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::Rfc(RfcValidation::default())
    }
}

impl From<RfcValidation> for Validation {
    fn from(v: RfcValidation) -> Self {
        Self::Rfc(v)
    }
}

impl From<NoRfcWarningsValidation> for Validation {
    fn from(v: NoRfcWarningsValidation) -> Self {
        Self::NoRfcWarnings(v)
    }
}

impl From<SpoofCheckValidation> for Validation {
    fn from(v: SpoofCheckValidation) -> Self {
        Self::SpoofCheck(v)
    }
}

impl From<DnsCheckValidation> for Validation {
    fn from(v: DnsCheckValidation) -> Self {
        Self::DnsCheck(v)
    }
}

impl From<MultipleValidationWithAnd> for Validation {
    fn from(v: MultipleValidationWithAnd) -> Self {
        Self::All(v)
    }
}

#[cfg(test)]
mod tests;
