//! RFC 5322 grammar over the lexer's token stream.
//!
//! Parsing runs in two phases, local part then domain, joined by the single
//! top-level `@`. Advisory findings accumulate as [`Warning`]s; the first
//! fatal condition aborts with an [`InvalidEmail`].

mod cfws;
mod domain;
mod literal;
mod local;
mod options;

use std::net::IpAddr;

use crate::diagnostics::{InvalidEmail, Reason, Warning, WarningKind};
use crate::lexer::{Lexer, Token, TokenKind};

pub use options::{
    DOMAIN_MAX_OCTETS, LABEL_MAX_OCTETS, LOCAL_PART_MAX_OCTETS, ParseOptions, TOTAL_MAX_OCTETS,
};

type PResult<T> = Result<T, InvalidEmail>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    Hostname,
    Literal(IpAddr),
}

/// A syntactically valid address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    /// Local part as written, quotes and escapes included, CFWS removed.
    pub local_part: String,
    pub domain: String,
    /// Byte offset just past the top-level `@`.
    pub domain_position: usize,
    pub domain_kind: DomainKind,
    pub warnings: Vec<Warning>,
}

/// A rejected address: the fatal finding plus the warnings raised before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub error: InvalidEmail,
    pub warnings: Vec<Warning>,
}

/// Parse `input` as a single address.
pub fn parse(input: &str, options: &ParseOptions) -> Result<ParsedAddress, Rejection> {
    let mut parser = Parser::new(input, options);
    match parser.address() {
        Ok(Parts {
            local_part,
            domain,
            domain_position,
            domain_kind,
        }) => Ok(ParsedAddress {
            local_part,
            domain,
            domain_position,
            domain_kind,
            warnings: parser.ctx.warnings,
        }),
        Err(error) => {
            #[cfg(feature = "with-tracing")]
            tracing::debug!(
                reason = %error.reason,
                position = ?error.position(),
                "address rejected by parser"
            );
            Err(Rejection {
                error,
                warnings: parser.ctx.warnings,
            })
        }
    }
}

#[derive(Debug, Default)]
struct ParseContext {
    warnings: Vec<Warning>,
    local_len: usize,
    domain_len: usize,
}

struct Parts {
    local_part: String,
    domain: String,
    domain_position: usize,
    domain_kind: DomainKind,
}

struct Parser<'a, 'o> {
    lexer: Lexer<'a>,
    options: &'o ParseOptions,
    ctx: ParseContext,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn new(input: &'a str, options: &'o ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(input),
            options,
            ctx: ParseContext::default(),
        }
    }

    fn address(&mut self) -> PResult<Parts> {
        let local_part = self.local_part()?;

        let at = self.lexer.next_token();
        if !at.is(TokenKind::At) {
            return Err(unexpected_after_local(&at));
        }

        let (domain, domain_kind) = self.domain_part(&at)?;

        let total = self.ctx.local_len + 1 + self.ctx.domain_len;
        if total > self.options.max_total_length {
            self.warn(WarningKind::EmailTooLong, 0);
        }
        Ok(Parts {
            local_part,
            domain,
            domain_position: at.end(),
            domain_kind,
        })
    }

    fn warn(&mut self, kind: WarningKind, position: usize) {
        self.ctx.warnings.push(Warning::new(kind, position));
    }

    fn count_local(&mut self, token: &Token<'a>) -> PResult<()> {
        self.ctx.local_len += token.text.len();
        if self.ctx.local_len > LOCAL_PART_MAX_OCTETS {
            return Err(InvalidEmail::at(Reason::LocalPartTooLong, token));
        }
        Ok(())
    }

    fn count_domain(&mut self, token: &Token<'a>) -> PResult<()> {
        self.count_domain_octets(token, token.text.len())
    }

    /// Non-ASCII labels are counted in their IDNA ASCII form.
    fn count_domain_octets(&mut self, token: &Token<'a>, octets: usize) -> PResult<()> {
        self.ctx.domain_len += octets;
        if self.ctx.domain_len > DOMAIN_MAX_OCTETS {
            return Err(InvalidEmail::at(Reason::DomainTooLong, token));
        }
        Ok(())
    }
}

fn unexpected_after_local(token: &Token<'_>) -> InvalidEmail {
    let reason = match token.kind {
        TokenKind::Eof => Reason::ExpectingAt,
        TokenKind::CloseParen => Reason::UnopenedComment,
        TokenKind::Invalid => Reason::InvalidEncoding,
        _ => Reason::ExpectingAtext,
    };
    InvalidEmail::at(reason, token)
}

/// RFC 5322 `atext`, extended to non-ASCII per RFC 6531.
fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || !c.is_ascii()
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
        )
}

/// Tokens allowed after a backslash in quoted strings and comments.
fn is_quotable(kind: TokenKind) -> bool {
    !matches!(
        kind,
        TokenKind::Eof | TokenKind::Cr | TokenKind::Lf | TokenKind::Crlf | TokenKind::Invalid
    )
}
