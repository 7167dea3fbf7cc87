//! Character-level lexer for e-mail addresses.
//!
//! RFC specials each get their own [`TokenKind`]; every other run of
//! characters is coalesced into a single [`TokenKind::GenericChars`] token so
//! the parser reasons about chunks of atom text.

mod token;

use std::borrow::Cow;

pub use token::{Token, TokenKind, TokenSnapshot};

/// Saved cursor position, see [`Lexer::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// On-demand tokenizer with one token of lookahead.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    offset: usize,
    lookahead: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            lookahead: None,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Consume and return the next token. `Eof` is returned forever once the
    /// input is exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => scan(self.input, self.offset),
        };
        self.offset = token.end();
        token
    }

    /// Return the next token without consuming it.
    pub fn peek(&mut self) -> Token<'a> {
        if let Some(token) = self.lookahead {
            return token;
        }
        let token = scan(self.input, self.offset);
        self.lookahead = Some(token);
        token
    }

    pub fn save(&self) -> Mark {
        Mark(self.offset)
    }

    pub fn restore(&mut self, mark: Mark) {
        self.offset = mark.0;
        self.lookahead = None;
    }
}

/// Decode raw bytes for lexing. Malformed sequences become U+FFFD, which the
/// lexer reports as [`TokenKind::Invalid`].
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn scan(input: &str, offset: usize) -> Token<'_> {
    let rest = &input[offset..];
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return Token::new(TokenKind::Eof, "", input.len());
    };

    let kind = match (first, chars.next()) {
        ('\r', Some('\n')) => TokenKind::Crlf,
        (ch, _) => classify(ch),
    };
    let len = match kind {
        TokenKind::Crlf => 2,
        TokenKind::GenericChars => rest
            .char_indices()
            .find(|&(_, ch)| classify(ch) != TokenKind::GenericChars)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len()),
        _ => first.len_utf8(),
    };
    Token::new(kind, &rest[..len], offset)
}

fn classify(ch: char) -> TokenKind {
    match ch {
        '@' => TokenKind::At,
        '.' => TokenKind::Dot,
        ':' => TokenKind::Colon,
        ',' => TokenKind::Comma,
        '"' => TokenKind::DoubleQuote,
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        '[' => TokenKind::OpenBracket,
        ']' => TokenKind::CloseBracket,
        '\\' => TokenKind::Backslash,
        ' ' => TokenKind::Space,
        '\t' => TokenKind::HTab,
        '\r' => TokenKind::Cr,
        '\n' => TokenKind::Lf,
        '\u{FFFD}' => TokenKind::Invalid,
        c if c.is_ascii_control() => TokenKind::Invalid,
        _ => TokenKind::GenericChars,
    }
}
