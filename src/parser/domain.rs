use super::{DomainKind, LABEL_MAX_OCTETS, PResult, Parser, is_atext};
use crate::diagnostics::{InvalidEmail, Reason, WarningKind};
use crate::lexer::{Token, TokenKind};

impl<'a> Parser<'a, '_> {
    /// Everything after the top-level `@`, through end of input.
    pub(super) fn domain_part(&mut self, at: &Token<'a>) -> PResult<(String, DomainKind)> {
        if self.lexer.peek().kind.starts_cfws() {
            self.cfws()?;
        }

        let token = self.lexer.peek();
        let parsed = match token.kind {
            TokenKind::Eof => return Err(InvalidEmail::at(Reason::NoDomainPart, at)),
            TokenKind::At => return Err(InvalidEmail::at(Reason::ConsecutiveAt, &token)),
            TokenKind::OpenBracket => self.domain_literal()?,
            _ => (self.dot_atom_domain()?, DomainKind::Hostname),
        };

        if self.lexer.peek().kind.starts_cfws() {
            self.cfws()?;
        }
        let end = self.lexer.next_token();
        if !end.is(TokenKind::Eof) {
            return Err(unexpected_in_domain(&end));
        }
        Ok(parsed)
    }

    fn dot_atom_domain(&mut self) -> PResult<String> {
        let start = self.lexer.peek().position;
        let mut value = String::new();
        let mut last_was_dot: Option<bool> = None;
        let mut last_dot: Option<Token<'a>> = None;
        let mut cfws_since_label = false;
        let mut dots = 0usize;

        loop {
            let token = self.lexer.peek();
            match token.kind {
                TokenKind::GenericChars => {
                    if last_was_dot == Some(false) && cfws_since_label {
                        return Err(InvalidEmail::at(Reason::AtextAfterCfws, &token));
                    }
                    let octets = check_label(&token)?;
                    self.lexer.next_token();
                    self.count_domain_octets(&token, octets)?;
                    value.push_str(token.text);
                    last_was_dot = Some(false);
                    cfws_since_label = false;
                }
                TokenKind::Dot => {
                    match last_was_dot {
                        None => return Err(InvalidEmail::at(Reason::DotAtStart, &token)),
                        Some(true) => {
                            return Err(InvalidEmail::at(Reason::ConsecutiveDots, &token));
                        }
                        Some(false) => {}
                    }
                    self.lexer.next_token();
                    self.count_domain(&token)?;
                    value.push('.');
                    dots += 1;
                    last_was_dot = Some(true);
                    last_dot = Some(token);
                }
                kind if kind.is_whitespace() || kind == TokenKind::OpenParen => {
                    // Trailing CFWS is left to the caller.
                    let mark = self.lexer.save();
                    let warnings = self.ctx.warnings.len();
                    self.cfws()?;
                    if !self.lexer.peek().is(TokenKind::GenericChars)
                        && !self.lexer.peek().is(TokenKind::Dot)
                    {
                        self.lexer.restore(mark);
                        self.ctx.warnings.truncate(warnings);
                        break;
                    }
                    cfws_since_label = true;
                }
                _ => break,
            }
        }

        match (last_was_dot, last_dot) {
            (None, _) => {
                let token = self.lexer.peek();
                if token.is(TokenKind::Eof) {
                    return Err(InvalidEmail::at(Reason::NoDomainPart, &token));
                }
                return Err(unexpected_in_domain(&token));
            }
            (Some(true), Some(dot)) => return Err(InvalidEmail::at(Reason::DotAtEnd, &dot)),
            _ => {}
        }

        if dots == 0 {
            self.warn(WarningKind::Tld, start);
        }
        Ok(value)
    }
}

/// Validate one label and return its length in octets of the ASCII form.
fn check_label(token: &Token<'_>) -> PResult<usize> {
    let label = token.text;
    if !label.chars().all(is_atext) {
        return Err(InvalidEmail::at(Reason::CharNotAllowed, token));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(InvalidEmail::at(Reason::DomainHyphened, token));
    }
    let ascii_len = if label.is_ascii() {
        label.len()
    } else {
        idna::domain_to_ascii(label)
            .map_err(|_| InvalidEmail::at(Reason::CharNotAllowed, token))?
            .len()
    };
    if ascii_len > LABEL_MAX_OCTETS {
        return Err(InvalidEmail::at(Reason::LabelTooLong, token));
    }
    Ok(ascii_len)
}

fn unexpected_in_domain(token: &Token<'_>) -> InvalidEmail {
    let reason = match token.kind {
        TokenKind::At => Reason::ConsecutiveAt,
        TokenKind::Comma => Reason::CommaInDomain,
        TokenKind::CloseParen => Reason::UnopenedComment,
        TokenKind::Invalid => Reason::InvalidEncoding,
        _ => Reason::CharNotAllowed,
    };
    InvalidEmail::at(reason, token)
}
