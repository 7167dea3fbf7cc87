use std::net::IpAddr;

use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
};

use super::{DnsRecord, DomainResolver};
use crate::validation::DnsError;

/// MX records first, A/AAAA as the implicit MX fallback (RFC 5321 §5.1).
impl DomainResolver for Resolver {
    fn resolve(&self, domain: &str) -> Result<Vec<DnsRecord>, DnsError> {
        let records = lookup_mx(self, domain)?;
        if !records.is_empty() {
            return Ok(records);
        }
        lookup_ip(self, domain)
    }
}

fn lookup_mx(resolver: &Resolver, domain: &str) -> Result<Vec<DnsRecord>, DnsError> {
    let lookup = match Resolver::mx_lookup(resolver, domain) {
        Ok(lookup) => lookup,
        Err(err) => return empty_or_error(domain, err),
    };
    let mut records: Vec<DnsRecord> = lookup
        .iter()
        .map(|mx| DnsRecord::mx(mx.preference(), normalize_exchange(mx.exchange().to_utf8())))
        .collect();
    records.sort();
    records.dedup();
    Ok(records)
}

fn lookup_ip(resolver: &Resolver, domain: &str) -> Result<Vec<DnsRecord>, DnsError> {
    let lookup = match Resolver::lookup_ip(resolver, domain) {
        Ok(lookup) => lookup,
        Err(err) => return empty_or_error(domain, err),
    };
    Ok(lookup
        .iter()
        .map(|ip| match ip {
            IpAddr::V4(v4) => DnsRecord::A(v4),
            IpAddr::V6(v6) => DnsRecord::Aaaa(v6),
        })
        .collect())
}

fn empty_or_error(domain: &str, err: ResolveError) -> Result<Vec<DnsRecord>, DnsError> {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound {
            response_code: ResponseCode::Refused,
            ..
        } => Err(DnsError::refused(domain)),
        ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
        ResolveErrorKind::Timeout => Err(DnsError::timeout(domain)),
        _ => Err(DnsError::lookup(domain, err)),
    }
}

pub(super) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}
