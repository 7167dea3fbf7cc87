#![forbid(unsafe_code)]
//! mailcheck_rfc: RFC 5321/5322 e-mail address validation.
//!
//! A [`Lexer`] turns the address into tokens, the [`parser`] applies the
//! grammar and collects diagnostics, and a [`Validation`] strategy turns the
//! result into a verdict. [`EmailValidator`] is the single entry point.
//!
//! ```
//! use mailcheck_rfc::{EmailValidator, RfcValidation};
//!
//! let mut validator = EmailValidator::new();
//! assert!(validator.is_valid("user@example.com", &RfcValidation::new()).unwrap());
//! assert!(validator.is_valid("user@localhost", &RfcValidation::new()).unwrap());
//! assert_eq!(validator.last_warnings()[0].code(), 9);
//! ```

pub mod diagnostics;
mod email_validator;
pub mod lexer;
pub mod parser;
pub mod validation;

pub use diagnostics::{InvalidEmail, Reason, Warning, WarningKind};
pub use email_validator::{EmailValidator, validate_email};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseOptions, ParsedAddress};
#[cfg(feature = "with-spoof-check")]
pub use validation::ScriptOracle;
pub use validation::{
    AndMode, ConfusableOracle, DnsCheckValidation, DnsError, DnsRecord, DomainResolver,
    EmailValidation, MultipleValidationWithAnd, NoRfcWarningsValidation, RfcValidation,
    SpoofCheckValidation, Validation, ValidationError, ValidationOutcome, Verdict,
};
