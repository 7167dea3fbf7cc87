use thiserror::Error;

use crate::lexer::{Token, TokenSnapshot};

/// Why an address was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    #[error("no local part")]
    NoLocalPart,
    #[error("no domain part")]
    NoDomainPart,
    #[error("expecting '@'")]
    ExpectingAt,
    #[error("consecutive '@'")]
    ConsecutiveAt,
    #[error("atom text after comment or folding whitespace")]
    AtextAfterCfws,
    #[error("expecting atom text")]
    ExpectingAtext,
    #[error("backslash not followed by a quotable character")]
    ExpectingQpair,
    #[error("unclosed quoted string")]
    UnclosedQuotedString,
    #[error("unclosed comment")]
    UnclosedComment,
    #[error("closing parenthesis without an opening one")]
    UnopenedComment,
    #[error("nested comment")]
    NestedComment,
    #[error("malformed domain literal")]
    DomainLiteralMalformed,
    #[error("consecutive dots")]
    ConsecutiveDots,
    #[error("dot at start")]
    DotAtStart,
    #[error("dot at end")]
    DotAtEnd,
    #[error("CR not followed by LF")]
    CrNoLf,
    #[error("CRLF at end of folding whitespace")]
    CrlfAtEnd,
    #[error("two consecutive CRLF")]
    CrlfX2,
    #[error("comma in domain")]
    CommaInDomain,
    #[error("character not allowed")]
    CharNotAllowed,
    #[error("domain label starts or ends with a hyphen")]
    DomainHyphened,
    #[error("domain label longer than 63 octets")]
    LabelTooLong,
    #[error("local part longer than 64 octets")]
    LocalPartTooLong,
    #[error("domain longer than 255 octets")]
    DomainTooLong,
    #[error("invalid character encoding")]
    InvalidEncoding,
    #[error("address mixes confusable scripts")]
    SpoofedAddress,
    #[error("no DNS record for the domain")]
    NoDnsRecord,
    #[error("local or reserved domain")]
    LocalOrReservedDomain,
    #[error("domain accepts no mail (null MX)")]
    DomainAcceptsNoMail,
}

impl Reason {
    pub fn code(self) -> u16 {
        match self {
            Self::NoDnsRecord => 5,
            Self::ConsecutiveAt => 128,
            Self::NoLocalPart => 130,
            Self::NoDomainPart => 131,
            Self::ConsecutiveDots => 132,
            Self::AtextAfterCfws => 133,
            Self::DomainLiteralMalformed => 134,
            Self::ExpectingQpair => 136,
            Self::ExpectingAtext => 137,
            Self::DotAtStart => 141,
            Self::DotAtEnd => 142,
            Self::DomainHyphened => 144,
            Self::UnclosedQuotedString => 145,
            Self::UnclosedComment => 146,
            Self::NestedComment => 147,
            Self::CrlfX2 => 148,
            Self::CrlfAtEnd => 149,
            Self::CrNoLf => 150,
            Self::UnopenedComment => 152,
            Self::LocalOrReservedDomain => 153,
            Self::DomainAcceptsNoMail => 154,
            Self::CommaInDomain => 200,
            Self::CharNotAllowed => 201,
            Self::ExpectingAt => 202,
            Self::InvalidEncoding => 203,
            Self::LocalPartTooLong => 243,
            Self::DomainTooLong => 244,
            Self::LabelTooLong => 245,
            Self::SpoofedAddress => 298,
        }
    }
}

/// Fatal finding: exactly one per rejected address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct InvalidEmail {
    pub reason: Reason,
    pub token: Option<TokenSnapshot>,
}

impl InvalidEmail {
    pub fn new(reason: Reason) -> Self {
        Self {
            reason,
            token: None,
        }
    }

    pub fn at(reason: Reason, token: &Token<'_>) -> Self {
        Self {
            reason,
            token: Some(token.snapshot()),
        }
    }

    pub fn code(&self) -> u16 {
        self.reason.code()
    }

    pub fn position(&self) -> Option<usize> {
        self.token.as_ref().map(|token| token.position)
    }
}

#[cfg(feature = "with-serde")]
impl serde::Serialize for Reason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "with-serde")]
impl serde::Serialize for InvalidEmail {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("InvalidEmail", 3)?;
        state.serialize_field("reason", &self.reason)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("position", &self.position())?;
        state.end()
    }
}
