//! Raw token from logos (before classification and linking).

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("@")]
    At,

    /// Keyword, elementary type name or identifier; the cooker decides which.
    #[regex(r"[A-Za-z$_][A-Za-z0-9$_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Number,
}
