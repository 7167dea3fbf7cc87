#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// RFC 5321 §4.5.3.1.1: local part.
pub const LOCAL_PART_MAX_OCTETS: usize = 64;
/// RFC 5321 §4.5.3.1.2: domain.
pub const DOMAIN_MAX_OCTETS: usize = 255;
/// RFC 1035: single label.
pub const LABEL_MAX_OCTETS: usize = 63;
/// RFC 5321 path limit minus the angle brackets.
pub const TOTAL_MAX_OCTETS: usize = 254;

/// Configuration knobs for the parser.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Past this many octets the address gets an `EmailTooLong` warning.
    pub max_total_length: usize,
    /// Accept non-ASCII atom text in the local part (RFC 6531).
    pub allow_utf8_local_part: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_total_length: TOTAL_MAX_OCTETS,
            allow_utf8_local_part: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_total_length(mut self, value: usize) -> Self {
        self.max_total_length = value;
        self
    }

    pub fn allow_utf8_local_part(mut self, value: bool) -> Self {
        self.allow_utf8_local_part = value;
        self
    }
}
