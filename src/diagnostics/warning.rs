use std::fmt;

/// Advisory findings. The numeric codes are stable and may be relied upon by
/// callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    NoDnsMxRecord,
    Tld,
    QuotedString,
    Ipv6Deprecated,
    QuotedPart,
    DeprecatedCfws,
    EmailTooLong,
    DomainLiteral,
}

impl WarningKind {
    pub fn code(self) -> u16 {
        match self {
            Self::NoDnsMxRecord => 6,
            Self::Tld => 9,
            Self::QuotedString => 11,
            Self::Ipv6Deprecated => 13,
            Self::QuotedPart => 36,
            Self::DeprecatedCfws => 37,
            Self::EmailTooLong => 66,
            Self::DomainLiteral => 70,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NoDnsMxRecord => "no MX record for the domain, only A/AAAA",
            Self::Tld => "domain has no top-level label",
            Self::QuotedString => "quoted string in local part",
            Self::Ipv6Deprecated => "'::' used for a single IPv6 group",
            Self::QuotedPart => "obsolete local part mixing quoted and unquoted words",
            Self::DeprecatedCfws => "deprecated comment or folding whitespace",
            Self::EmailTooLong => "address exceeds the maximum total length",
            Self::DomainLiteral => "domain is an address literal",
        }
    }
}

/// A non-fatal finding, positioned at the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub position: usize,
}

impl Warning {
    pub fn new(kind: WarningKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn code(&self) -> u16 {
        self.kind.code()
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at {}", self.code(), self.message(), self.position)
    }
}

#[cfg(feature = "with-serde")]
impl serde::Serialize for Warning {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Warning", 3)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", self.message())?;
        state.serialize_field("position", &self.position)?;
        state.end()
    }
}
