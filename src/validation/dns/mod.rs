//! Domain record check on top of RFC validation.
//!
//! Lookups go through an injected [`DomainResolver`]; with the `with-dns`
//! feature the system resolver from `trust-dns-resolver` implements it.

#[cfg(feature = "with-dns")]
mod resolver;

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use phf::phf_set;

use super::{DnsError, EmailValidation, RfcValidation, ValidationError, ValidationOutcome};
use crate::diagnostics::{InvalidEmail, Reason, Warning, WarningKind};
use crate::parser::{DomainKind, ParseOptions};

/// RFC 2606 / RFC 6761 names that never receive mail.
static RESERVED_TLDS: phf::Set<&'static str> = phf_set! {
    "arpa",
    "example",
    "invalid",
    "local",
    "localhost",
    "onion",
    "test",
};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DnsRecord {
    Mx { preference: u16, exchange: String },
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
}

impl DnsRecord {
    pub fn mx(preference: u16, exchange: impl Into<String>) -> Self {
        Self::Mx {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Resolves the mail-relevant records of an ASCII domain. An empty list means
/// the domain has no records; `Err` is reserved for infrastructure failures.
pub trait DomainResolver: Send + Sync {
    fn resolve(&self, domain: &str) -> Result<Vec<DnsRecord>, DnsError>;
}

#[derive(Clone)]
pub struct DnsCheckValidation {
    rfc: RfcValidation,
    resolver: Arc<dyn DomainResolver>,
}

impl DnsCheckValidation {
    pub fn new(resolver: impl DomainResolver + 'static) -> Self {
        Self::with_shared_resolver(Arc::new(resolver))
    }

    pub fn with_shared_resolver(resolver: Arc<dyn DomainResolver>) -> Self {
        Self {
            rfc: RfcValidation::new(),
            resolver,
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.rfc = RfcValidation::with_options(options);
        self
    }

    /// Resolver built from the system configuration (`/etc/resolv.conf` or
    /// platform equivalent).
    #[cfg(feature = "with-dns")]
    pub fn from_system_conf() -> Result<Self, ValidationError> {
        let resolver = trust_dns_resolver::Resolver::from_system_conf()
            .map_err(DnsError::resolver_init)?;
        Ok(Self::new(resolver))
    }
}

impl fmt::Debug for DnsCheckValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsCheckValidation")
            .field("rfc", &self.rfc)
            .finish_non_exhaustive()
    }
}

impl EmailValidation for DnsCheckValidation {
    #[cfg_attr(feature = "with-tracing", tracing::instrument(level = "debug", skip(self)))]
    fn validate(&self, email: &str) -> Result<ValidationOutcome, ValidationError> {
        let parsed = match self.rfc.parse_address(email) {
            Ok(parsed) => parsed,
            Err(rejection) => {
                return Ok(ValidationOutcome::invalid(rejection.error, rejection.warnings));
            }
        };
        let mut warnings = parsed.warnings;
        if let DomainKind::Literal(_) = parsed.domain_kind {
            return Ok(ValidationOutcome::valid(warnings));
        }

        let Ok(ascii) = idna::domain_to_ascii(&parsed.domain) else {
            return Ok(ValidationOutcome::invalid(
                InvalidEmail::new(Reason::CharNotAllowed),
                warnings,
            ));
        };
        if is_reserved(&ascii) {
            return Ok(ValidationOutcome::invalid(
                InvalidEmail::new(Reason::LocalOrReservedDomain),
                warnings,
            ));
        }

        let records = match self.resolver.resolve(&ascii) {
            Ok(records) => records,
            Err(err) => {
                #[cfg(feature = "with-tracing")]
                tracing::warn!(domain = %ascii, error = %err, "domain lookup failed");
                return Err(err.into());
            }
        };

        match classify(&records) {
            Ok(None) => {}
            Ok(Some(kind)) => warnings.push(Warning::new(kind, parsed.domain_position)),
            Err(reason) => {
                return Ok(ValidationOutcome::invalid(
                    InvalidEmail::new(reason),
                    warnings,
                ));
            }
        }
        Ok(ValidationOutcome::valid(warnings))
    }
}

fn is_reserved(ascii_domain: &str) -> bool {
    let trimmed = ascii_domain.trim_end_matches('.');
    match trimmed.rsplit_once('.') {
        Some((_, tld)) => RESERVED_TLDS.contains(tld.to_ascii_lowercase().as_str()),
        None => true,
    }
}

/// Fatal reason, or an optional advisory warning.
fn classify(records: &[DnsRecord]) -> Result<Option<WarningKind>, Reason> {
    if records.is_empty() {
        return Err(Reason::NoDnsRecord);
    }
    let exchanges: Vec<&str> = records
        .iter()
        .filter_map(|record| match record {
            DnsRecord::Mx { exchange, .. } => Some(exchange.as_str()),
            DnsRecord::A(_) | DnsRecord::Aaaa(_) => None,
        })
        .collect();
    match exchanges.as_slice() {
        [] => Ok(Some(WarningKind::NoDnsMxRecord)),
        // RFC 7505 null MX.
        [only] if only.trim_end_matches('.').is_empty() => Err(Reason::DomainAcceptsNoMail),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests;
