use crate::diagnostics::{InvalidEmail, Warning};
use crate::validation::{EmailValidation, ValidationError, ValidationOutcome};

/// Stable entry point over any strategy. Keeps the diagnostics of the most
/// recent call.
#[derive(Debug, Default)]
pub struct EmailValidator {
    last: Option<ValidationOutcome>,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `email` under `validation`. An operational error clears the
    /// previous diagnostics and is returned as `Err`, never as `false`.
    pub fn is_valid<V>(&mut self, email: &str, validation: &V) -> Result<bool, ValidationError>
    where
        V: EmailValidation + ?Sized,
    {
        self.last = None;
        let outcome = validation.validate(email)?;
        let valid = outcome.is_valid();
        self.last = Some(outcome);
        Ok(valid)
    }

    pub fn last_error(&self) -> Option<&InvalidEmail> {
        self.last.as_ref().and_then(ValidationOutcome::error)
    }

    pub fn last_warnings(&self) -> &[Warning] {
        self.last
            .as_ref()
            .map(ValidationOutcome::warnings)
            .unwrap_or(&[])
    }

    pub fn last_outcome(&self) -> Option<&ValidationOutcome> {
        self.last.as_ref()
    }
}

/// Stateless variant of [`EmailValidator::is_valid`].
pub fn validate_email<V>(email: &str, validation: &V) -> Result<ValidationOutcome, ValidationError>
where
    V: EmailValidation + ?Sized,
{
    validation.validate(email)
}
