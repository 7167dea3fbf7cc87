use super::{EmailValidation, Validation, ValidationError, ValidationOutcome, Verdict};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AndMode {
    /// Stop at the first invalid verdict.
    #[default]
    StopOnFirstError,
    /// Run every strategy; the first invalid verdict still wins.
    AllowAllErrors,
}

/// Logical AND over an ordered list of strategies.
#[derive(Debug, Clone)]
pub struct MultipleValidationWithAnd {
    validations: Vec<Validation>,
    mode: AndMode,
}

impl MultipleValidationWithAnd {
    pub fn new<I, V>(validations: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Validation>,
    {
        let validations: Vec<Validation> = validations.into_iter().map(Into::into).collect();
        if validations.is_empty() {
            return Err(ValidationError::EmptyValidationList);
        }
        Ok(Self {
            validations,
            mode: AndMode::default(),
        })
    }

    pub fn allow_all_errors(mut self) -> Self {
        self.mode = AndMode::AllowAllErrors;
        self
    }

    pub fn mode(&self) -> AndMode {
        self.mode
    }

    pub fn validations(&self) -> &[Validation] {
        &self.validations
    }
}

impl EmailValidation for MultipleValidationWithAnd {
    #[cfg_attr(feature = "with-tracing", tracing::instrument(level = "debug", skip(self)))]
    fn validate(&self, email: &str) -> Result<ValidationOutcome, ValidationError> {
        let mut warnings = Vec::new();
        let mut failure: Option<Verdict> = None;

        for validation in &self.validations {
            let (verdict, found) = validation.validate(email)?.into_parts();
            warnings.extend(found);
            if verdict == Verdict::Valid {
                continue;
            }
            if failure.is_none() {
                failure = Some(verdict);
            }
            if self.mode == AndMode::StopOnFirstError {
                break;
            }
        }

        Ok(ValidationOutcome::new(
            failure.unwrap_or(Verdict::Valid),
            warnings,
        ))
    }
}
