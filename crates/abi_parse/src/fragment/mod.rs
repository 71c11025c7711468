//! ABI fragments: constructors, errors, events, fallbacks, functions and
//! structs.
//!
//! [`Fragment`] is a closed sum over the six variants. Each variant parses
//! its own grammar from a [`TokenStream`] or its interchange object, and
//! renders itself in every [`FormatType`]. `Fragment` only dispatches.

mod constructor;
mod error;
mod event;
mod fallback;
mod function;
mod mutability;
mod structure;

use std::fmt;
use std::str::FromStr;

use abi_lexer::{tokenize, Keyword, TokenKind};
use tracing::debug;

use crate::json::{JsonFragment, JsonParam};
use crate::param_type::{verify_identifier, ParamType};
use crate::stream::TokenStream;
use crate::{AbiError, FormatType};

pub use constructor::ConstructorFragment;
pub use error::ErrorFragment;
pub use event::EventFragment;
pub use fallback::FallbackFragment;
pub use function::FunctionFragment;
pub use mutability::{consume_mutability, StateMutability};
pub use structure::StructFragment;

/// Which variant a [`Fragment`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Constructor,
    Error,
    Event,
    Fallback,
    Function,
    Struct,
}

impl FragmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FragmentKind::Constructor => "constructor",
            FragmentKind::Error => "error",
            FragmentKind::Event => "event",
            FragmentKind::Fallback => "fallback",
            FragmentKind::Function => "function",
            FragmentKind::Struct => "struct",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed ABI fragment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fragment {
    Constructor(ConstructorFragment),
    Error(ErrorFragment),
    Event(EventFragment),
    Fallback(FallbackFragment),
    Function(FunctionFragment),
    Struct(StructFragment),
}

impl Fragment {
    /// Parse a fragment from a JSON object or a human-readable signature.
    ///
    /// JSON is tried first. When that fails the input is parsed as text;
    /// the JSON error is logged at debug level and only returned if the text
    /// parse fails too and the input looks like JSON.
    pub fn parse(source: &str) -> Result<Self, AbiError> {
        let json_err = match serde_json::from_str::<JsonFragment>(source) {
            Ok(json) => return Self::from_json(&json),
            Err(err) => err,
        };
        debug!(error = %json_err, "not a JSON fragment, parsing as text");

        match Self::parse_text(source) {
            Ok(fragment) => Ok(fragment),
            Err(text_err) => {
                let trimmed = source.trim_start();
                if trimmed.starts_with('{') || trimmed.starts_with('[') {
                    Err(AbiError::Json(json_err))
                } else {
                    Err(text_err)
                }
            }
        }
    }

    /// Parse a human-readable signature. A leading kind keyword is required.
    pub fn parse_text(source: &str) -> Result<Self, AbiError> {
        let tokens = tokenize(source)?;
        Self::from_stream(&mut TokenStream::new(&tokens))
    }

    /// Dispatch on the leading kind keyword.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_stream(stream: &mut TokenStream<'_>) -> Result<Self, AbiError> {
        let Some(keyword) = stream.peek_keyword(Keyword::FRAGMENT_KINDS) else {
            let kind = stream.peek().map(|t| t.text.clone()).unwrap_or_default();
            return Err(AbiError::UnsupportedFragmentKind { kind });
        };
        Ok(match keyword {
            Keyword::Constructor => ConstructorFragment::from_stream(stream)?.into(),
            Keyword::Error => ErrorFragment::from_stream(stream)?.into(),
            Keyword::Event => EventFragment::from_stream(stream)?.into(),
            Keyword::Fallback | Keyword::Receive => FallbackFragment::from_stream(stream)?.into(),
            Keyword::Struct => StructFragment::from_stream(stream)?.into(),
            Keyword::Function => FunctionFragment::from_stream(stream)?.into(),
            other => {
                return Err(AbiError::UnsupportedFragmentKind {
                    kind: other.as_str().to_owned(),
                })
            }
        })
    }

    /// Dispatch on the `type` field; a missing `type` means `function`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_json(json: &JsonFragment) -> Result<Self, AbiError> {
        Ok(match json_kind(json) {
            "constructor" => ConstructorFragment::from_json(json)?.into(),
            "error" => ErrorFragment::from_json(json)?.into(),
            "event" => EventFragment::from_json(json)?.into(),
            "fallback" | "receive" => FallbackFragment::from_json(json)?.into(),
            "function" => FunctionFragment::from_json(json)?.into(),
            "struct" => StructFragment::from_json(json)?.into(),
            other => {
                return Err(AbiError::UnsupportedFragmentKind {
                    kind: other.to_owned(),
                })
            }
        })
    }

    pub fn kind(&self) -> FragmentKind {
        match self {
            Fragment::Constructor(_) => FragmentKind::Constructor,
            Fragment::Error(_) => FragmentKind::Error,
            Fragment::Event(_) => FragmentKind::Event,
            Fragment::Fallback(_) => FragmentKind::Fallback,
            Fragment::Function(_) => FragmentKind::Function,
            Fragment::Struct(_) => FragmentKind::Struct,
        }
    }

    /// The fragment's name; constructors and fallbacks have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Fragment::Constructor(_) | Fragment::Fallback(_) => None,
            Fragment::Error(f) => Some(f.name()),
            Fragment::Event(f) => Some(f.name()),
            Fragment::Function(f) => Some(f.name()),
            Fragment::Struct(f) => Some(f.name()),
        }
    }

    pub fn inputs(&self) -> &[ParamType] {
        match self {
            Fragment::Constructor(f) => f.inputs(),
            Fragment::Error(f) => f.inputs(),
            Fragment::Event(f) => f.inputs(),
            Fragment::Fallback(f) => f.inputs(),
            Fragment::Function(f) => f.inputs(),
            Fragment::Struct(f) => f.inputs(),
        }
    }

    /// Render in the given format. Only constructors can fail, on `Sighash`.
    pub fn format(&self, format: FormatType) -> Result<String, AbiError> {
        Ok(match self {
            Fragment::Constructor(f) => return f.format(format),
            Fragment::Error(f) => f.format(format),
            Fragment::Event(f) => f.format(format),
            Fragment::Fallback(f) => f.format(format),
            Fragment::Function(f) => f.format(format),
            Fragment::Struct(f) => f.format(format),
        })
    }

    pub fn to_json(&self) -> JsonFragment {
        match self {
            Fragment::Constructor(f) => f.to_json(),
            Fragment::Error(f) => f.to_json(),
            Fragment::Event(f) => f.to_json(),
            Fragment::Fallback(f) => f.to_json(),
            Fragment::Function(f) => f.to_json(),
            Fragment::Struct(f) => f.to_json(),
        }
    }
}

impl FromStr for Fragment {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fragment::parse(s)
    }
}

impl fmt::Display for Fragment {
    /// Formats as `FormatType::Full`, which every variant supports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(FormatType::Full).map_err(|_| fmt::Error)?)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Fragment {
                fn from(fragment: $ty) -> Self {
                    Fragment::$variant(fragment)
                }
            }
        )*
    };
}

impl_from_variant!(
    Constructor(ConstructorFragment),
    Error(ErrorFragment),
    Event(EventFragment),
    Fallback(FallbackFragment),
    Function(FunctionFragment),
    Struct(StructFragment),
);

// ─────────────────────────────────────────────────────────────────────────────
// Grammar pieces shared by the variants
// ─────────────────────────────────────────────────────────────────────────────

/// Pop an optional leading `keyword`, then the fragment name.
fn consume_name<'a>(stream: &mut TokenStream<'a>, keyword: Keyword) -> Result<&'a str, AbiError> {
    consume_kind(stream, keyword)?;
    stream.pop_ident()
}

/// Pop the kind keyword if it is present.
fn consume_kind(stream: &mut TokenStream<'_>, keyword: Keyword) -> Result<(), AbiError> {
    if stream.peek_keyword(&[keyword]).is_some() {
        stream.pop()?;
    }
    Ok(())
}

fn consume_params(
    stream: &mut TokenStream<'_>,
    allow_indexed: bool,
) -> Result<Box<[ParamType]>, AbiError> {
    stream
        .pop_params()?
        .iter_mut()
        .map(|item| ParamType::from_stream(item, allow_indexed))
        .collect()
}

/// `@<gas>`, if present.
fn consume_gas(stream: &mut TokenStream<'_>) -> Result<Option<u64>, AbiError> {
    if stream.check(TokenKind::At) {
        stream.pop()?;
        return stream.pop_number().map(Some);
    }
    Ok(None)
}

fn json_kind(json: &JsonFragment) -> &str {
    json.kind.as_deref().unwrap_or("function")
}

fn expect_json_kind(json: &JsonFragment, expected: &[&str]) -> Result<(), AbiError> {
    let kind = json_kind(json);
    if expected.contains(&kind) {
        Ok(())
    } else {
        Err(AbiError::invalid_fragment(format!(
            "expected a {} object, found {kind:?}",
            expected.join(" or ")
        )))
    }
}

fn json_name(json: &JsonFragment) -> Result<String, AbiError> {
    let name = json
        .name
        .as_deref()
        .ok_or_else(|| AbiError::invalid_fragment("missing name"))?;
    verify_identifier(name)?;
    Ok(name.to_owned())
}

fn json_params(
    params: Option<&[JsonParam]>,
    allow_indexed: bool,
) -> Result<Box<[ParamType]>, AbiError> {
    params
        .unwrap_or_default()
        .iter()
        .map(|param| ParamType::from_json(param, allow_indexed))
        .collect()
}

fn json_gas(json: &JsonFragment) -> Result<Option<u64>, AbiError> {
    json.gas.as_ref().map(|gas| gas.value()).transpose()
}

fn to_json_params(params: &[ParamType]) -> Vec<JsonParam> {
    params.iter().map(ParamType::to_json).collect()
}

/// `(p1,p2)` in the given format.
fn join_params(params: &[ParamType], format: FormatType) -> String {
    let items: Vec<String> = params.iter().map(|p| p.format(format)).collect();
    format!("({})", items.join(format.separator()))
}

fn gas_suffix(gas: Option<u64>) -> String {
    gas.map(|gas| format!(" @{gas}")).unwrap_or_default()
}
