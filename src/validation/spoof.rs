use std::fmt;
use std::sync::Arc;

#[cfg(feature = "with-spoof-check")]
use unicode_script::{Script, UnicodeScript};

use super::{EmailValidation, ValidationError, ValidationOutcome};
use crate::diagnostics::{InvalidEmail, Reason};

/// Decides whether a string could pass for something it is not.
pub trait ConfusableOracle: Send + Sync {
    fn is_suspicious(&self, text: &str) -> bool;
}

/// Flags addresses mixing visually confusable scripts. Runs on the raw
/// string, independently of the grammar.
#[derive(Clone)]
pub struct SpoofCheckValidation {
    oracle: Arc<dyn ConfusableOracle>,
}

impl SpoofCheckValidation {
    /// Use the built-in [`ScriptOracle`]. Fails when the crate was built
    /// without it.
    pub fn new() -> Result<Self, ValidationError> {
        #[cfg(feature = "with-spoof-check")]
        {
            Ok(Self::with_oracle(ScriptOracle))
        }
        #[cfg(not(feature = "with-spoof-check"))]
        {
            Err(ValidationError::SpoofCheckUnavailable)
        }
    }

    pub fn with_oracle(oracle: impl ConfusableOracle + 'static) -> Self {
        Self {
            oracle: Arc::new(oracle),
        }
    }

    pub fn with_shared_oracle(oracle: Arc<dyn ConfusableOracle>) -> Self {
        Self { oracle }
    }
}

impl fmt::Debug for SpoofCheckValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpoofCheckValidation").finish_non_exhaustive()
    }
}

impl EmailValidation for SpoofCheckValidation {
    #[cfg_attr(feature = "with-tracing", tracing::instrument(level = "debug", skip(self)))]
    fn validate(&self, email: &str) -> Result<ValidationOutcome, ValidationError> {
        if self.oracle.is_suspicious(email) {
            return Ok(ValidationOutcome::invalid(
                InvalidEmail::new(Reason::SpoofedAddress),
                Vec::new(),
            ));
        }
        Ok(ValidationOutcome::valid(Vec::new()))
    }
}

/// Single-script policy: every letter must come from one script, where
/// Han with Hiragana/Katakana, Hangul or Bopomofo counts as one.
#[cfg(feature = "with-spoof-check")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptOracle;

#[cfg(feature = "with-spoof-check")]
const SCRIPT_FAMILIES: &[&[Script]] = &[
    &[Script::Han, Script::Hiragana, Script::Katakana],
    &[Script::Han, Script::Hangul],
    &[Script::Han, Script::Bopomofo],
];

#[cfg(feature = "with-spoof-check")]
impl ConfusableOracle for ScriptOracle {
    fn is_suspicious(&self, text: &str) -> bool {
        let mut scripts: Vec<Script> = Vec::new();
        for ch in text.chars() {
            match ch.script() {
                Script::Common | Script::Inherited | Script::Unknown => {}
                script => {
                    if !scripts.contains(&script) {
                        scripts.push(script);
                    }
                }
            }
        }
        if scripts.len() <= 1 {
            return false;
        }
        !SCRIPT_FAMILIES
            .iter()
            .any(|family| scripts.iter().all(|script| family.contains(script)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "with-spoof-check")]
    #[test]
    fn script_oracle_single_script_policy() {
        let oracle = ScriptOracle;
        assert!(!oracle.is_suspicious("user@example.com"));
        assert!(!oracle.is_suspicious("пользователь@пример.рф"));
        assert!(!oracle.is_suspicious("山田たろう@例え.日本"));
        // Cyrillic 'а' inside a Latin domain.
        assert!(oracle.is_suspicious("user@exаmple.com"));
        assert!(oracle.is_suspicious("ρaypal@example.com"));
    }

    #[cfg(feature = "with-spoof-check")]
    #[test]
    fn spoofed_address_is_invalid_without_warnings() {
        let validation = SpoofCheckValidation::new().expect("oracle available");
        let outcome = validation.validate("user@exаmple.com").expect("no operational error");
        assert!(!outcome.is_valid());
        assert_eq!(
            outcome.error().map(|e| e.reason),
            Some(Reason::SpoofedAddress)
        );
        assert!(outcome.warnings().is_empty());
    }

    #[cfg(not(feature = "with-spoof-check"))]
    #[test]
    fn missing_oracle_is_a_setup_error() {
        assert!(matches!(
            SpoofCheckValidation::new(),
            Err(ValidationError::SpoofCheckUnavailable)
        ));
    }

    #[test]
    fn injected_oracle_decides() {
        struct Always;
        impl ConfusableOracle for Always {
            fn is_suspicious(&self, _: &str) -> bool {
                true
            }
        }
        let outcome = SpoofCheckValidation::with_oracle(Always)
            .validate("user@example.com")
            .expect("no operational error");
        assert_eq!(
            outcome.error().map(|e| e.reason),
            Some(Reason::SpoofedAddress)
        );
    }
}
