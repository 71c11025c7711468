//! Output formats for fragments and parameter types.

use std::fmt;
use std::str::FromStr;

/// How a fragment or parameter type is rendered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum FormatType {
    /// Bare signature used for hashing: no keyword, names or modifiers.
    /// `transfer(address,uint256)`
    #[default]
    Sighash,
    /// Keyword prefix and modifiers, no names.
    /// `function transfer(address,uint256) returns (bool)`
    Minimal,
    /// Like `Minimal` plus parameter names and `", "` separators.
    /// `function transfer(address to, uint256 amount) returns (bool)`
    Full,
    /// Interchange object serialized as JSON.
    Json,
}

impl FormatType {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatType::Sighash => "sighash",
            FormatType::Minimal => "minimal",
            FormatType::Full => "full",
            FormatType::Json => "json",
        }
    }

    /// Separator between parameters.
    pub(crate) fn separator(self) -> &'static str {
        if self == FormatType::Full {
            ", "
        } else {
            ","
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sighash" => Ok(FormatType::Sighash),
            "minimal" => Ok(FormatType::Minimal),
            "full" => Ok(FormatType::Full),
            "json" => Ok(FormatType::Json),
            _ => Err(()),
        }
    }
}
