//! Token types for the ABI lexer.
//!
//! Tokens are produced once by [`crate::tokenize`] and never modified. Paren
//! and comma tokens carry indices into their [`TokenList`]:
//!
//! - `match_index` pairs every `(` with its `)` and vice versa.
//! - `link_prev` / `link_next` chain an open paren, each comma directly inside
//!   it, and its close paren. Walking the chain splits a parameter list into
//!   items without looking inside nested groups.

use std::fmt;
use std::ops::Index;

use crate::Keyword;

/// A token with its position and link metadata.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text. For bracket tokens this is the merged suffix (`[3]`, `[]`).
    pub text: String,
    /// Byte offset of the token in the source.
    pub offset: usize,
    /// Paren nesting depth. A `)` has the same depth as its `(`.
    pub depth: u32,
    /// Index of the matching paren (parens only).
    pub match_index: Option<usize>,
    /// Previous open paren or comma at the same depth (commas and `)` only).
    pub link_prev: Option<usize>,
    /// Next comma or close paren at the same depth (`(` and commas only).
    pub link_next: Option<usize>,
}

impl Token {
    /// Check if this token is the given keyword.
    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Token kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Comma,
    At,
    Keyword(Keyword),
    /// Elementary type name such as `uint256` or `bytes`.
    Type,
    Ident,
    Number(u64),
    /// Array suffix: `None` for `[]`, `Some(n)` for `[n]`.
    Bracket(Option<usize>),
}

impl TokenKind {
    /// Get a display name for the token kind (used in error messages).
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Comma => "`,`",
            TokenKind::At => "`@`",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Type => "type",
            TokenKind::Ident => "identifier",
            TokenKind::Number(_) => "number",
            TokenKind::Bracket(_) => "array suffix",
        }
    }
}

/// An immutable, linked sequence of tokens.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenList {
    tokens: Box<[Token]>,
}

impl TokenList {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        TokenList {
            tokens: tokens.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
