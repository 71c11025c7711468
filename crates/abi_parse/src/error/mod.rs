//! Parse error types.
//!
//! `AbiError` is the only error the parse crate returns. Every variant is
//! raised at the point of detection and aborts the whole parse or walk; no
//! partially built fragment or type ever escapes.

use abi_diagnostic::ErrorCode;
use abi_lexer::{Keyword, LexError};

/// An error raised while parsing, formatting or walking ABI fragments.
#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    /// The source could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token of the wrong kind.
    #[error("expected {expected}, found {found:?} at offset {offset}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    /// The stream ran out while a token was still required.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    /// A production finished but tokens remain.
    #[error("unexpected tokens at offset {offset}: {remaining}")]
    LeftoverTokens { offset: usize, remaining: String },

    /// The same keyword twice in one modifier run.
    #[error("duplicate keyword `{keyword}`")]
    DuplicateKeyword { keyword: Keyword },

    /// Unknown elementary type or bad width.
    #[error("invalid type {ty:?}: {reason}")]
    InvalidType { ty: String, reason: &'static str },

    #[error("invalid identifier {name:?}")]
    InvalidIdentifier { name: String },

    /// `indexed` outside an event parameter list.
    #[error("parameter cannot be indexed")]
    NotIndexable,

    /// Tuples and arrays nested past [`MAX_NESTING_DEPTH`](crate::MAX_NESTING_DEPTH).
    #[error("type nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("conflicting modifiers: {}", .modifiers.join(", "))]
    ConflictingModifiers { modifiers: Vec<&'static str> },

    #[error("unsupported fragment kind {kind:?}")]
    UnsupportedFragmentKind { kind: String },

    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: &'static str },

    /// A rule specific to one fragment kind was broken.
    #[error("invalid fragment: {reason}")]
    InvalidFragment { reason: String },

    /// A walked value does not have the shape of its type.
    #[error("value does not match type {ty:?}: {reason}")]
    ShapeMismatch { ty: String, reason: String },

    /// Malformed interchange object.
    #[error("invalid interchange object: {0}")]
    Json(#[from] serde_json::Error),
}

impl AbiError {
    /// The diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AbiError::Lex(err) => err.code(),
            AbiError::UnexpectedToken { .. } => ErrorCode::E1001,
            AbiError::UnexpectedEnd { .. } => ErrorCode::E1002,
            AbiError::LeftoverTokens { .. } => ErrorCode::E1003,
            AbiError::DuplicateKeyword { .. } => ErrorCode::E1004,
            AbiError::InvalidType { .. } => ErrorCode::E2001,
            AbiError::InvalidIdentifier { .. } => ErrorCode::E2002,
            AbiError::NotIndexable => ErrorCode::E2003,
            AbiError::NestingTooDeep { .. } => ErrorCode::E2004,
            AbiError::ConflictingModifiers { .. } => ErrorCode::E3001,
            AbiError::UnsupportedFragmentKind { .. } => ErrorCode::E3002,
            AbiError::UnsupportedOperation { .. } => ErrorCode::E3003,
            AbiError::Json(_) => ErrorCode::E3004,
            AbiError::InvalidFragment { .. } => ErrorCode::E3005,
            AbiError::ShapeMismatch { .. } => ErrorCode::E4001,
        }
    }

    pub(crate) fn invalid_type(ty: impl Into<String>, reason: &'static str) -> Self {
        AbiError::InvalidType {
            ty: ty.into(),
            reason,
        }
    }

    pub(crate) fn invalid_fragment(reason: impl Into<String>) -> Self {
        AbiError::InvalidFragment {
            reason: reason.into(),
        }
    }

    pub(crate) fn shape(ty: &str, reason: impl Into<String>) -> Self {
        AbiError::ShapeMismatch {
            ty: ty.to_owned(),
            reason: reason.into(),
        }
    }
}
