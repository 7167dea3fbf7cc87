use super::{PResult, Parser, is_quotable};
use crate::diagnostics::{InvalidEmail, Reason, WarningKind};
use crate::lexer::{Token, TokenKind};

impl<'a> Parser<'a, '_> {
    /// Consume a run of folding whitespace and comments. Each run raises one
    /// `DeprecatedCfws` warning.
    pub(super) fn cfws(&mut self) -> PResult<()> {
        let start = self.lexer.peek().position;
        loop {
            let token = self.lexer.peek();
            match token.kind {
                TokenKind::Space | TokenKind::HTab => {
                    self.lexer.next_token();
                }
                TokenKind::Cr | TokenKind::Lf | TokenKind::Crlf => {
                    self.lexer.next_token();
                    self.line_break(&token)?;
                }
                TokenKind::OpenParen => self.comment()?,
                _ => break,
            }
        }
        self.warn(WarningKind::DeprecatedCfws, start);
        Ok(())
    }

    /// A consumed line break is only legal as CRLF followed by WSP.
    pub(super) fn line_break(&mut self, token: &Token<'a>) -> PResult<()> {
        if !token.is(TokenKind::Crlf) {
            return Err(InvalidEmail::at(Reason::CrNoLf, token));
        }
        let next = self.lexer.peek();
        match next.kind {
            TokenKind::Space | TokenKind::HTab => Ok(()),
            TokenKind::Crlf => Err(InvalidEmail::at(Reason::CrlfX2, &next)),
            _ => Err(InvalidEmail::at(Reason::CrlfAtEnd, token)),
        }
    }

    fn comment(&mut self) -> PResult<()> {
        let open = self.lexer.next_token();
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::CloseParen => return Ok(()),
                TokenKind::OpenParen => {
                    return Err(InvalidEmail::at(Reason::NestedComment, &token));
                }
                TokenKind::Eof => return Err(InvalidEmail::at(Reason::UnclosedComment, &open)),
                TokenKind::Backslash => {
                    let escaped = self.lexer.next_token();
                    if !is_quotable(escaped.kind) {
                        return Err(InvalidEmail::at(Reason::ExpectingQpair, &escaped));
                    }
                }
                TokenKind::Cr | TokenKind::Lf | TokenKind::Crlf => self.line_break(&token)?,
                TokenKind::Invalid => {
                    return Err(InvalidEmail::at(Reason::InvalidEncoding, &token));
                }
                _ => {}
            }
        }
    }
}
