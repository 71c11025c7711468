//! State mutability and the visibility-keyword resolver.

use std::fmt;
use std::str::FromStr;

use abi_lexer::Keyword;

use crate::json::JsonFragment;
use crate::stream::TokenStream;
use crate::AbiError;

/// How a function interacts with contract state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StateMutability {
    Payable,
    #[default]
    Nonpayable,
    View,
    Pure,
}

impl StateMutability {
    pub fn as_str(self) -> &'static str {
        match self {
            StateMutability::Payable => "payable",
            StateMutability::Nonpayable => "nonpayable",
            StateMutability::View => "view",
            StateMutability::Pure => "pure",
        }
    }

    /// `view` and `pure` functions cannot modify state.
    pub fn is_constant(self) -> bool {
        matches!(self, StateMutability::View | StateMutability::Pure)
    }

    pub fn is_payable(self) -> bool {
        self == StateMutability::Payable
    }

    /// Read from an interchange object, falling back to the legacy
    /// `constant`/`payable` flags when `stateMutability` is absent.
    pub(crate) fn from_json(json: &JsonFragment) -> Result<Self, AbiError> {
        if let Some(text) = &json.state_mutability {
            return text.parse();
        }
        Ok(if json.constant == Some(true) {
            StateMutability::View
        } else if json.payable == Some(true) {
            StateMutability::Payable
        } else {
            StateMutability::Nonpayable
        })
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateMutability {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payable" => Ok(StateMutability::Payable),
            "nonpayable" => Ok(StateMutability::Nonpayable),
            "view" => Ok(StateMutability::View),
            "pure" => Ok(StateMutability::Pure),
            _ => Err(AbiError::invalid_fragment(format!(
                "invalid state mutability {s:?}"
            ))),
        }
    }
}

const PAYMENT: &[Keyword] = &[Keyword::Constant, Keyword::Payable, Keyword::Nonpayable];
const ACCESS: &[Keyword] = &[
    Keyword::Pure,
    Keyword::View,
    Keyword::Payable,
    Keyword::Nonpayable,
];

/// Consume the run of visibility keywords and resolve the mutability.
///
/// At most one keyword of `{constant, payable, nonpayable}` and one of
/// `{pure, view, payable, nonpayable}` may appear. Visibility-only keywords
/// (`external`, `public`, …) are consumed and ignored.
pub fn consume_mutability(stream: &mut TokenStream<'_>) -> Result<StateMutability, AbiError> {
    let found = stream.pop_keywords(Keyword::VISIBILITY)?;
    let count = |set: &[Keyword]| found.iter().filter(|k| set.contains(k)).count();
    if count(PAYMENT) > 1 || count(ACCESS) > 1 {
        return Err(AbiError::ConflictingModifiers {
            modifiers: found.iter().map(|k| k.as_str()).collect(),
        });
    }

    let has = |keyword| found.contains(&keyword);
    Ok(if has(Keyword::View) {
        StateMutability::View
    } else if has(Keyword::Pure) {
        StateMutability::Pure
    } else if has(Keyword::Payable) {
        StateMutability::Payable
    } else if has(Keyword::Nonpayable) {
        StateMutability::Nonpayable
    } else if has(Keyword::Constant) {
        StateMutability::View
    } else {
        StateMutability::Nonpayable
    })
}
