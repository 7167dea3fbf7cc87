use thiserror::Error;

/// Operational failures. These say the validator could not do its job; they
/// never mean "the address is malformed".
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("spoof checking is unavailable: built without the `with-spoof-check` feature")]
    SpoofCheckUnavailable,
    #[error("a combined validation needs at least one strategy")]
    EmptyValidationList,
    #[error(transparent)]
    Dns(#[from] DnsError),
}

/// Errors raised by a [`DomainResolver`](super::DomainResolver).
#[derive(Debug, Error)]
pub enum DnsError {
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("DNS lookup for {domain} timed out")]
    Timeout { domain: String },
    #[error("DNS server refused the query for {domain}")]
    Refused { domain: String },
    #[error("DNS lookup failed for {domain}: {message}")]
    Lookup { domain: String, message: String },
}

impl DnsError {
    pub fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub fn timeout(domain: impl Into<String>) -> Self {
        Self::Timeout {
            domain: domain.into(),
        }
    }

    pub fn refused(domain: impl Into<String>) -> Self {
        Self::Refused {
            domain: domain.into(),
        }
    }

    pub fn lookup(domain: impl Into<String>, message: impl ToString) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.to_string(),
        }
    }
}
