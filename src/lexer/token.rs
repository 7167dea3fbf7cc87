/// Kinds of tokens produced by the [`Lexer`](super::Lexer).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    At,
    Dot,
    Colon,
    Comma,
    DoubleQuote,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Backslash,
    Space,
    HTab,
    Cr,
    Lf,
    Crlf,
    /// One or more characters that are not RFC specials.
    GenericChars,
    /// Control character or replacement character left by a lossy decode.
    Invalid,
    Eof,
}

impl TokenKind {
    /// Folding-whitespace tokens (SP, HTAB and the line break forms).
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Space | Self::HTab | Self::Cr | Self::Lf | Self::Crlf)
    }

    /// Tokens that may open a CFWS run.
    pub fn starts_cfws(self) -> bool {
        self.is_whitespace() || self == Self::OpenParen
    }
}

/// A token borrowed from the lexed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token in the input.
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, position: usize) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }

    /// Owned copy kept by diagnostics once the input is gone.
    pub fn snapshot(&self) -> TokenSnapshot {
        TokenSnapshot {
            kind: self.kind,
            text: self.text.to_string(),
            position: self.position,
        }
    }
}

/// Owned form of a [`Token`], attached to an
/// [`InvalidEmail`](crate::InvalidEmail).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}
