use super::{PResult, Parser, is_atext, is_quotable, unexpected_after_local};
use crate::diagnostics::{InvalidEmail, Reason, WarningKind};
use crate::lexer::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Word,
    Dot,
}

impl<'a> Parser<'a, '_> {
    /// Local part: words (atoms or quoted strings) separated by single dots,
    /// with optional CFWS around them. Stops before the token that ends it.
    pub(super) fn local_part(&mut self) -> PResult<String> {
        let start = self.lexer.peek().position;
        let mut value = String::new();
        let mut last: Option<Last> = None;
        let mut last_dot: Option<Token<'a>> = None;
        let mut cfws_since_word = false;
        let mut words = 0usize;
        let mut quoted_words = 0usize;

        loop {
            let token = self.lexer.peek();
            match token.kind {
                TokenKind::GenericChars | TokenKind::DoubleQuote => {
                    if last == Some(Last::Word) {
                        let reason = if cfws_since_word {
                            Reason::AtextAfterCfws
                        } else {
                            Reason::ExpectingAtext
                        };
                        return Err(InvalidEmail::at(reason, &token));
                    }
                    if token.is(TokenKind::DoubleQuote) {
                        value.push_str(&self.quoted_string()?);
                        quoted_words += 1;
                    } else {
                        self.atom(&token)?;
                        value.push_str(token.text);
                    }
                    words += 1;
                    last = Some(Last::Word);
                    cfws_since_word = false;
                }
                TokenKind::Dot => {
                    match last {
                        None => return Err(InvalidEmail::at(Reason::DotAtStart, &token)),
                        Some(Last::Dot) => {
                            return Err(InvalidEmail::at(Reason::ConsecutiveDots, &token));
                        }
                        Some(Last::Word) => {}
                    }
                    self.lexer.next_token();
                    self.count_local(&token)?;
                    value.push('.');
                    last = Some(Last::Dot);
                    last_dot = Some(token);
                }
                kind if kind.starts_cfws() => {
                    self.cfws()?;
                    cfws_since_word = true;
                }
                _ => break,
            }
        }

        match (last, last_dot) {
            (None, _) => {
                let token = self.lexer.peek();
                if token.is(TokenKind::At) || token.is(TokenKind::Eof) {
                    return Err(InvalidEmail::at(Reason::NoLocalPart, &token));
                }
                return Err(unexpected_after_local(&token));
            }
            (Some(Last::Dot), Some(dot)) => {
                return Err(InvalidEmail::at(Reason::DotAtEnd, &dot));
            }
            _ => {}
        }

        if quoted_words > 0 {
            self.warn(WarningKind::QuotedString, start);
            if words > 1 {
                self.warn(WarningKind::QuotedPart, start);
            }
        }
        Ok(value)
    }

    fn atom(&mut self, token: &Token<'a>) -> PResult<()> {
        let allow_utf8 = self.options.allow_utf8_local_part;
        if !token
            .text
            .chars()
            .all(|c| is_atext(c) && (allow_utf8 || c.is_ascii()))
        {
            return Err(InvalidEmail::at(Reason::ExpectingAtext, token));
        }
        self.lexer.next_token();
        self.count_local(token)
    }

    /// Quoted string, opening quote included. Folding line breaks are
    /// validated and dropped from the returned text.
    fn quoted_string(&mut self) -> PResult<String> {
        let open = self.lexer.next_token();
        self.count_local(&open)?;
        let mut value = String::from(open.text);

        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::DoubleQuote => {
                    self.count_local(&token)?;
                    value.push('"');
                    return Ok(value);
                }
                TokenKind::Eof => {
                    return Err(InvalidEmail::at(Reason::UnclosedQuotedString, &open));
                }
                TokenKind::Backslash => {
                    let escaped = self.lexer.next_token();
                    if !is_quotable(escaped.kind) {
                        return Err(InvalidEmail::at(Reason::ExpectingQpair, &escaped));
                    }
                    self.count_local(&token)?;
                    self.count_local(&escaped)?;
                    value.push('\\');
                    value.push_str(escaped.text);
                }
                TokenKind::Cr | TokenKind::Lf | TokenKind::Crlf => self.line_break(&token)?,
                TokenKind::Invalid => {
                    return Err(InvalidEmail::at(Reason::InvalidEncoding, &token));
                }
                _ => {
                    self.count_local(&token)?;
                    value.push_str(token.text);
                }
            }
        }
    }
}
