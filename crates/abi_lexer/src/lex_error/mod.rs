//! Lexer error types.
//!
//! A `LexError` carries WHERE (`offset`, a byte offset into the source) and
//! WHAT (`kind`). Lexing stops at the first error.

use abi_diagnostic::ErrorCode;

/// A lexer error located in the source.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// WHERE it went wrong, as a byte offset.
    pub offset: usize,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    #[error("unexpected character {found:?}")]
    UnexpectedChar { found: char },
    /// `)` with no open paren to close.
    #[error("unmatched closing parenthesis")]
    UnmatchedParen,
    /// `(` still open at end of input.
    #[error("unclosed parenthesis")]
    UnclosedParen,
    /// `]` with no `[` to close.
    #[error("missing opening bracket")]
    MissingOpeningBracket,
    /// `[` that does not follow a type, a tuple or another array suffix.
    #[error("array suffix must follow a type")]
    DetachedBracket,
    /// `[` whose `]` never arrives (or anything but a length inside it).
    #[error("unclosed bracket")]
    UnclosedBracket,
    /// `,` at depth zero.
    #[error("comma outside of a parameter list")]
    StrayComma,
    /// An integer literal that does not fit the target width.
    #[error("numeric literal {text:?} is out of range")]
    NumberOutOfRange { text: String },
}

impl LexError {
    pub fn new(kind: LexErrorKind, offset: usize) -> Self {
        LexError { kind, offset }
    }

    /// The diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnexpectedChar { .. } => ErrorCode::E0001,
            LexErrorKind::UnmatchedParen => ErrorCode::E0002,
            LexErrorKind::UnclosedParen => ErrorCode::E0003,
            LexErrorKind::MissingOpeningBracket | LexErrorKind::DetachedBracket => {
                ErrorCode::E0004
            }
            LexErrorKind::UnclosedBracket => ErrorCode::E0005,
            LexErrorKind::StrayComma => ErrorCode::E0006,
            LexErrorKind::NumberOutOfRange { .. } => ErrorCode::E0007,
        }
    }
}
