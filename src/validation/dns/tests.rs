use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DnsCheckValidation, DnsRecord, DomainResolver, classify, is_reserved};
use crate::diagnostics::{Reason, WarningKind};
use crate::validation::{DnsError, EmailValidation, ValidationError};

type LookupResult = Result<Vec<DnsRecord>, DnsError>;
type LookupFn = dyn Fn(&str) -> LookupResult + Send + Sync;

struct StubResolver {
    on_lookup: Box<LookupFn>,
    calls: Arc<AtomicUsize>,
}

impl StubResolver {
    fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + Send + Sync + 'static,
    {
        Self {
            on_lookup: Box::new(f),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl DomainResolver for StubResolver {
    fn resolve(&self, domain: &str) -> LookupResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.on_lookup)(domain)
    }
}

fn mail_host(domain: &str) -> LookupResult {
    assert_eq!(domain, "example.com");
    Ok(vec![DnsRecord::mx(10, "mx1.example.com")])
}

#[test]
fn domain_with_mx_is_valid() {
    let outcome = DnsCheckValidation::new(StubResolver::new(mail_host))
        .validate("user@example.com")
        .expect("lookup succeeds");
    assert!(outcome.is_valid());
    assert!(outcome.warnings().is_empty());
}

#[test]
fn idn_domain_is_resolved_in_ascii() {
    let resolver = StubResolver::new(|domain| {
        assert_eq!(domain, "xn--exmple-cua.com");
        Ok(vec![DnsRecord::mx(10, "mx.xn--exmple-cua.com")])
    });
    let outcome = DnsCheckValidation::new(resolver)
        .validate("user@exämple.com")
        .expect("lookup succeeds");
    assert!(outcome.is_valid());
}

#[test]
fn rfc_failure_skips_lookup() {
    let resolver = StubResolver::new(mail_host);
    let calls = Arc::clone(&resolver.calls);
    let outcome = DnsCheckValidation::new(resolver)
        .validate("us..er@example.com")
        .expect("no lookup attempted");
    assert_eq!(outcome.error().map(|e| e.reason), Some(Reason::ConsecutiveDots));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn no_records_is_fatal() {
    let outcome = DnsCheckValidation::new(StubResolver::new(|_| Ok(Vec::new())))
        .validate("user@example.com")
        .expect("lookup succeeds");
    assert_eq!(outcome.error().map(|e| e.reason), Some(Reason::NoDnsRecord));
}

#[test]
fn address_only_records_warn() {
    let resolver = StubResolver::new(|_| Ok(vec![DnsRecord::A(Ipv4Addr::new(192, 0, 2, 1))]));
    let outcome = DnsCheckValidation::new(resolver)
        .validate("user@example.com")
        .expect("lookup succeeds");
    assert!(outcome.is_valid());
    assert_eq!(outcome.warnings().len(), 1);
    assert_eq!(outcome.warnings()[0].kind, WarningKind::NoDnsMxRecord);
    assert_eq!(outcome.warnings()[0].position, 5);
}

#[test]
fn null_mx_accepts_no_mail() {
    assert_eq!(
        classify(&[DnsRecord::mx(0, "")]),
        Err(Reason::DomainAcceptsNoMail)
    );
    assert_eq!(
        classify(&[DnsRecord::mx(0, "."), DnsRecord::mx(10, "mx.example.com")]),
        Ok(None)
    );
}

#[test]
fn reserved_domains_are_rejected_without_lookup() {
    assert!(is_reserved("localhost"));
    assert!(is_reserved("mail.test"));
    assert!(is_reserved("printer.LOCAL"));
    assert!(!is_reserved("example.com"));

    let resolver = StubResolver::new(mail_host);
    let calls = Arc::clone(&resolver.calls);
    let outcome = DnsCheckValidation::new(resolver)
        .validate("user@localhost")
        .expect("no lookup attempted");
    assert_eq!(
        outcome.error().map(|e| e.reason),
        Some(Reason::LocalOrReservedDomain)
    );
    assert_eq!(outcome.warnings()[0].kind, WarningKind::Tld);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn address_literal_needs_no_lookup() {
    let resolver = StubResolver::new(|_| panic!("literal domains are not resolved"));
    let outcome = DnsCheckValidation::new(resolver)
        .validate("user@[192.0.2.1]")
        .expect("no lookup attempted");
    assert!(outcome.is_valid());
}

#[test]
fn resolver_failure_is_operational() {
    let resolver = StubResolver::new(|domain| Err(DnsError::timeout(domain)));
    let err = DnsCheckValidation::new(resolver)
        .validate("user@example.com")
        .expect_err("timeout surfaces as an error");
    assert!(matches!(
        err,
        ValidationError::Dns(DnsError::Timeout { ref domain }) if domain == "example.com"
    ));
    insta::assert_snapshot!(err.to_string(), @"DNS lookup for example.com timed out");
}

#[cfg(feature = "with-dns")]
#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = super::resolver::normalize_exchange("Mail.EXAMPLE.com.".to_string());
    assert_eq!(out, "mail.example.com");
}
