use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

use super::*;
use crate::diagnostics::{Reason, WarningKind};

#[derive(Clone, Default)]
struct CountingOracle {
    calls: Arc<AtomicUsize>,
    suspicious: bool,
}

impl ConfusableOracle for CountingOracle {
    fn is_suspicious(&self, _text: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.suspicious
    }
}

struct FixedResolver(Vec<DnsRecord>);

impl DomainResolver for FixedResolver {
    fn resolve(&self, _domain: &str) -> Result<Vec<DnsRecord>, DnsError> {
        Ok(self.0.clone())
    }
}

struct TimeoutResolver;

impl DomainResolver for TimeoutResolver {
    fn resolve(&self, domain: &str) -> Result<Vec<DnsRecord>, DnsError> {
        Err(DnsError::timeout(domain))
    }
}

fn parser_strategies() -> Vec<Validation> {
    vec![
        RfcValidation::new().into(),
        NoRfcWarningsValidation::new().into(),
        DnsCheckValidation::new(FixedResolver(vec![DnsRecord::mx(10, "mx.example.com")])).into(),
        MultipleValidationWithAnd::new([RfcValidation::new()])
            .expect("non-empty")
            .into(),
    ]
}

fn codes(outcome: &ValidationOutcome) -> Vec<u16> {
    outcome.warnings().iter().map(|w| w.code()).collect()
}

#[test]
fn rfc_accepts_plain_address() {
    let outcome = RfcValidation::new().validate("user@example.com").unwrap();
    assert!(outcome.is_valid());
    assert!(outcome.error().is_none());
    assert!(outcome.warnings().is_empty());
}

#[test]
fn rfc_reports_warnings_on_valid_address() {
    let outcome = RfcValidation::new().validate("user@localhost").unwrap();
    assert!(outcome.is_valid());
    assert_eq!(codes(&outcome), vec![9]);
}

#[test]
fn no_warnings_policy_promotes_advisories() {
    let rfc = RfcValidation::new()
        .validate("user(comment)@example.com")
        .unwrap();
    assert!(rfc.is_valid());
    assert_eq!(codes(&rfc), vec![37]);

    let strict = NoRfcWarningsValidation::new()
        .validate("user(comment)@example.com")
        .unwrap();
    assert!(!strict.is_valid());
    assert!(strict.error().is_none());
    assert_eq!(strict.verdict(), &Verdict::RejectedWarnings);
    assert_eq!(codes(&strict), vec![37]);

    let clean = NoRfcWarningsValidation::new()
        .validate("user@example.com")
        .unwrap();
    assert!(clean.is_valid());
}

#[test]
fn fatal_errors_hold_under_every_parser_strategy() {
    let too_long = format!("{}@example.com", "a".repeat(65));
    for strategy in parser_strategies() {
        let outcome = strategy.validate(&too_long).unwrap();
        assert_eq!(
            outcome.error().map(|e| e.reason),
            Some(Reason::LocalPartTooLong),
            "{strategy:?}"
        );

        let outcome = strategy.validate("us..er@example.com").unwrap();
        assert_eq!(
            outcome.error().map(|e| e.reason),
            Some(Reason::ConsecutiveDots),
            "{strategy:?}"
        );
    }
}

#[test]
fn and_short_circuits_before_oracle() {
    let oracle = CountingOracle::default();
    let calls = Arc::clone(&oracle.calls);
    let combined = MultipleValidationWithAnd::new(vec![
        Validation::from(RfcValidation::new()),
        SpoofCheckValidation::with_oracle(oracle).into(),
    ])
    .unwrap();

    let outcome = combined.validate("us..er@example.com").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        outcome.error().map(|e| e.reason),
        Some(Reason::ConsecutiveDots)
    );

    let outcome = combined.validate("user@example.com").unwrap();
    assert!(outcome.is_valid());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn and_reports_first_failure_and_evaluated_warnings() {
    let oracle = CountingOracle {
        suspicious: true,
        ..CountingOracle::default()
    };
    let calls = Arc::clone(&oracle.calls);
    let combined = MultipleValidationWithAnd::new(vec![
        Validation::from(RfcValidation::new()),
        NoRfcWarningsValidation::new().into(),
        SpoofCheckValidation::with_oracle(oracle).into(),
    ])
    .unwrap();

    let outcome = combined.validate("user(c)@example.com").unwrap();
    assert_eq!(outcome.verdict(), &Verdict::RejectedWarnings);
    assert_eq!(codes(&outcome), vec![37, 37]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn and_allow_all_errors_runs_everything() {
    let oracle = CountingOracle {
        suspicious: true,
        ..CountingOracle::default()
    };
    let calls = Arc::clone(&oracle.calls);
    let combined = MultipleValidationWithAnd::new(vec![
        Validation::from(RfcValidation::new()),
        SpoofCheckValidation::with_oracle(oracle).into(),
    ])
    .unwrap()
    .allow_all_errors();

    let outcome = combined.validate("user.@example.com").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.error().map(|e| e.reason), Some(Reason::DotAtEnd));
}

#[test]
fn and_needs_at_least_one_strategy() {
    let err = MultipleValidationWithAnd::new(Vec::<Validation>::new()).unwrap_err();
    assert!(matches!(err, ValidationError::EmptyValidationList));
}

#[test]
fn operational_errors_propagate_through_and() {
    let combined = MultipleValidationWithAnd::new(vec![
        Validation::from(RfcValidation::new()),
        DnsCheckValidation::new(TimeoutResolver).into(),
    ])
    .unwrap();
    let err = combined.validate("user@example.com").unwrap_err();
    assert!(matches!(err, ValidationError::Dns(DnsError::Timeout { .. })));
}

#[test]
fn nested_composites() {
    let inner = MultipleValidationWithAnd::new([RfcValidation::new()]).unwrap();
    let outer = MultipleValidationWithAnd::new(vec![
        Validation::from(inner),
        DnsCheckValidation::new(FixedResolver(vec![DnsRecord::mx(5, "mx.example.org")])).into(),
    ])
    .unwrap();
    let outcome = outer.validate("user@example.org").unwrap();
    assert!(outcome.is_valid());
    assert!(outcome.warnings().iter().all(|w| w.kind != WarningKind::Tld));
}

proptest! {
    #[test]
    fn repeated_validation_is_identical(input in "\\PC{0,30}(@[a-z]{1,8}(\\.[a-z]{2,4})?)?") {
        let strategies = [
            Validation::from(RfcValidation::new()),
            NoRfcWarningsValidation::new().into(),
        ];
        for strategy in &strategies {
            let first = strategy.validate(&input).unwrap();
            let second = strategy.validate(&input).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
