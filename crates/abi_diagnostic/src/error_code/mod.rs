//! Error codes for all ABI fragment diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that raised it.

use std::fmt;

/// Error codes for all ABI fragment diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Syntax errors
/// - E2xxx: Type and identifier errors
/// - E3xxx: Fragment errors
/// - E4xxx: Value walker errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unexpected character in source
    E0001,
    /// Closing paren without a matching open paren
    E0002,
    /// Open paren never closed
    E0003,
    /// Array suffix without an opening bracket or type to attach to
    E0004,
    /// Array suffix never closed
    E0005,
    /// Comma outside a parameter list
    E0006,
    /// Numeric literal out of range
    E0007,

    // Syntax Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Unexpected end of input
    E1002,
    /// Leftover tokens after a complete production
    E1003,
    /// Keyword repeated in one modifier run
    E1004,

    // Type Errors (E2xxx)
    /// Invalid elementary type name or width
    E2001,
    /// Invalid identifier
    E2002,
    /// `indexed` used where parameters cannot be indexed
    E2003,
    /// Type nested deeper than the parser allows
    E2004,

    // Fragment Errors (E3xxx)
    /// Conflicting state mutability modifiers
    E3001,
    /// Unsupported fragment kind
    E3002,
    /// Unsupported operation on a fragment
    E3003,
    /// Malformed interchange (JSON) object
    E3004,
    /// Fragment-specific rule violated (e.g. fallback arity)
    E3005,

    // Walker Errors (E4xxx)
    /// Value shape does not match the parameter type
    E4001,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &[ErrorCode] = &[
        // Lexer
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        // Syntax
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        // Type
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        // Fragment
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        // Walker
        ErrorCode::E4001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E4001 => "E4001",
        }
    }

    /// One-line summary of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unexpected character",
            ErrorCode::E0002 => "unmatched closing parenthesis",
            ErrorCode::E0003 => "unclosed parenthesis",
            ErrorCode::E0004 => "missing opening bracket",
            ErrorCode::E0005 => "unclosed bracket",
            ErrorCode::E0006 => "comma outside of a parameter list",
            ErrorCode::E0007 => "numeric literal out of range",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "unexpected end of input",
            ErrorCode::E1003 => "unexpected trailing tokens",
            ErrorCode::E1004 => "duplicate keyword",
            ErrorCode::E2001 => "invalid type",
            ErrorCode::E2002 => "invalid identifier",
            ErrorCode::E2003 => "parameter cannot be indexed",
            ErrorCode::E2004 => "type nested too deeply",
            ErrorCode::E3001 => "conflicting modifiers",
            ErrorCode::E3002 => "unsupported fragment kind",
            ErrorCode::E3003 => "unsupported operation",
            ErrorCode::E3004 => "invalid interchange object",
            ErrorCode::E3005 => "invalid fragment",
            ErrorCode::E4001 => "value does not match the type shape",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a type or identifier error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is a fragment error (E3xxx range).
    pub fn is_fragment_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Check if this is a value walker error (E4xxx range).
    pub fn is_walker_error(&self) -> bool {
        matches!(self, ErrorCode::E4001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`.
///
/// Case-insensitive: `"e2001"` parses the same as `"E2001"`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
