//! Keyword and elementary-type classification.
//!
//! Every identifier-shaped word is resolved in this order:
//! 1. **Reserved keywords**: fragment kinds, parameter modifiers,
//!    visibility/mutability words, `tuple` and `returns`
//! 2. **Elementary type names**: `address`, `bool`, `string`, `bytes[0-9]*`,
//!    `u?int[0-9]*` (widths are validated later, by the parser)
//! 3. Anything else is a plain identifier.
//!
//! `anonymous` is not reserved: event parsing accepts it as a
//! trailing identifier so it remains usable as a parameter name.

use std::fmt;

/// A reserved word of the human-readable ABI grammar.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Keyword {
    // Fragment kinds
    Constructor,
    Error,
    Event,
    Fallback,
    Function,
    Receive,
    Struct,

    // Parameter modifiers
    Calldata,
    Memory,
    Storage,
    Indexed,

    // Visibility and state mutability
    Constant,
    External,
    Internal,
    Nonpayable,
    Override,
    Payable,
    Private,
    Public,
    Pure,
    View,

    // Other
    Tuple,
    Returns,
}

impl Keyword {
    /// Keywords that introduce a fragment.
    pub const FRAGMENT_KINDS: &'static [Keyword] = &[
        Keyword::Constructor,
        Keyword::Error,
        Keyword::Event,
        Keyword::Fallback,
        Keyword::Function,
        Keyword::Receive,
        Keyword::Struct,
    ];

    /// Keywords accepted (and, except `indexed`, ignored) after a parameter type.
    pub const MODIFIERS: &'static [Keyword] = &[
        Keyword::Calldata,
        Keyword::Memory,
        Keyword::Storage,
        Keyword::Payable,
        Keyword::Indexed,
    ];

    /// Keywords accepted after a function or fallback parameter list.
    pub const VISIBILITY: &'static [Keyword] = &[
        Keyword::Constant,
        Keyword::External,
        Keyword::Internal,
        Keyword::Nonpayable,
        Keyword::Override,
        Keyword::Payable,
        Keyword::Private,
        Keyword::Public,
        Keyword::Pure,
        Keyword::View,
    ];

    /// Keywords accepted after a constructor parameter list.
    pub const DEPLOY_VISIBILITY: &'static [Keyword] = &[
        Keyword::External,
        Keyword::Override,
        Keyword::Payable,
        Keyword::Public,
    ];

    /// Look up a reserved keyword by text.
    ///
    /// Uses the word's length as a first-pass filter (keywords are 4-11
    /// chars), then matches the keywords of that length.
    pub fn lookup(text: &str) -> Option<Keyword> {
        match text.len() {
            4 => match text {
                "pure" => Some(Keyword::Pure),
                "view" => Some(Keyword::View),
                _ => None,
            },
            5 => match text {
                "error" => Some(Keyword::Error),
                "event" => Some(Keyword::Event),
                "tuple" => Some(Keyword::Tuple),
                _ => None,
            },
            6 => match text {
                "memory" => Some(Keyword::Memory),
                "public" => Some(Keyword::Public),
                "struct" => Some(Keyword::Struct),
                _ => None,
            },
            7 => match text {
                "indexed" => Some(Keyword::Indexed),
                "payable" => Some(Keyword::Payable),
                "private" => Some(Keyword::Private),
                "receive" => Some(Keyword::Receive),
                "returns" => Some(Keyword::Returns),
                "storage" => Some(Keyword::Storage),
                _ => None,
            },
            8 => match text {
                "calldata" => Some(Keyword::Calldata),
                "constant" => Some(Keyword::Constant),
                "external" => Some(Keyword::External),
                "fallback" => Some(Keyword::Fallback),
                "function" => Some(Keyword::Function),
                "internal" => Some(Keyword::Internal),
                "override" => Some(Keyword::Override),
                _ => None,
            },
            10 => match text {
                "nonpayable" => Some(Keyword::Nonpayable),
                _ => None,
            },
            11 => match text {
                "constructor" => Some(Keyword::Constructor),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Constructor => "constructor",
            Keyword::Error => "error",
            Keyword::Event => "event",
            Keyword::Fallback => "fallback",
            Keyword::Function => "function",
            Keyword::Receive => "receive",
            Keyword::Struct => "struct",
            Keyword::Calldata => "calldata",
            Keyword::Memory => "memory",
            Keyword::Storage => "storage",
            Keyword::Indexed => "indexed",
            Keyword::Constant => "constant",
            Keyword::External => "external",
            Keyword::Internal => "internal",
            Keyword::Nonpayable => "nonpayable",
            Keyword::Override => "override",
            Keyword::Payable => "payable",
            Keyword::Private => "private",
            Keyword::Public => "public",
            Keyword::Pure => "pure",
            Keyword::View => "view",
            Keyword::Tuple => "tuple",
            Keyword::Returns => "returns",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether `text` has the shape of an elementary type name.
///
/// Only the shape is checked here: `uint7` and `bytes99` are accepted and
/// rejected later by the parser's width validation.
pub fn is_elementary_type(text: &str) -> bool {
    if matches!(text, "address" | "bool" | "string") {
        return true;
    }
    text.strip_prefix("bytes")
        .or_else(|| text.strip_prefix("uint"))
        .or_else(|| text.strip_prefix("int"))
        .is_some_and(|width| width.bytes().all(|b| b.is_ascii_digit()))
}
