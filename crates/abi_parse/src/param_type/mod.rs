//! The canonical parameter type tree.
//!
//! A [`ParamType`] is built once, either from human-readable text or from an
//! interchange object, and never mutated afterwards. Every node owns its
//! children outright; an array of tuples nests a tuple node under the array
//! node instead of mixing the two.

mod canonical;
mod format;

use std::str::FromStr;

use abi_lexer::{tokenize, Keyword, TokenKind};

use crate::json::JsonParam;
use crate::stream::TokenStream;
use crate::{AbiError, FormatType};

pub use canonical::{is_identifier, verify_basic_type};
pub(crate) use canonical::verify_identifier;

/// How many tuple and array levels a type may nest. Both parsers stop
/// descending here, so formatting and walking a parsed type stay bounded too.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The shape of a [`ParamType`] node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// `address`, `bool`, `bytesN`, `bytes`, `string`, `(u)intN`.
    Elementary,
    /// Ordered, possibly named components.
    Tuple { components: Box<[ParamType]> },
    /// `length` is `None` for a dynamic array.
    Array {
        length: Option<usize>,
        children: Box<ParamType>,
    },
}

/// Coarse classification of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseType {
    Elementary,
    Tuple,
    Array,
}

impl BaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            BaseType::Elementary => "elementary",
            BaseType::Tuple => "tuple",
            BaseType::Array => "array",
        }
    }
}

/// One parameter type, possibly named and (in event inputs) indexed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamType {
    name: String,
    /// Canonical type string, e.g. `tuple(address,uint256)[3][]`.
    ty: String,
    indexed: Option<bool>,
    /// 0 for elementary types, otherwise one more than the deepest child.
    height: usize,
    kind: ParamKind,
}

impl ParamType {
    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Parse a human-readable parameter such as `uint256[] memory amounts`.
    ///
    /// `indexed` is only accepted when `allow_indexed` is set.
    pub fn parse(source: &str, allow_indexed: bool) -> Result<Self, AbiError> {
        let tokens = tokenize(source)?;
        let mut stream = TokenStream::new(&tokens);
        Self::from_stream(&mut stream, allow_indexed)
    }

    /// Parse one parameter from `stream`, which must hold nothing else.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_stream(
        stream: &mut TokenStream<'_>,
        allow_indexed: bool,
    ) -> Result<Self, AbiError> {
        Self::param_at(stream, allow_indexed, 0)
    }

    /// A parameter declaration: type, modifiers, optional name.
    fn param_at(
        stream: &mut TokenStream<'_>,
        allow_indexed: bool,
        level: usize,
    ) -> Result<Self, AbiError> {
        let node = Self::type_at(stream, level)?;

        let modifiers = stream.pop_keywords(Keyword::MODIFIERS)?;
        let indexed = match (modifiers.contains(&Keyword::Indexed), allow_indexed) {
            (true, false) => return Err(AbiError::NotIndexable),
            (flag, true) => Some(flag),
            (false, false) => None,
        };

        let name = if stream.check(TokenKind::Ident) {
            stream.pop_ident()?
        } else {
            ""
        };
        stream.expect_end()?;
        Ok(node.bind(name.to_owned(), indexed))
    }

    /// A bare type: elementary or tuple, then any array suffixes.
    ///
    /// `level` counts the tuples already entered; tuple members are parsed
    /// one level down.
    fn type_at(stream: &mut TokenStream<'_>, level: usize) -> Result<Self, AbiError> {
        let mut node = if stream.peek_keyword(&[Keyword::Tuple]).is_some()
            || stream.check(TokenKind::OpenParen)
        {
            check_level(level + 1)?;
            if stream.peek_keyword(&[Keyword::Tuple]).is_some() {
                stream.pop()?;
            }
            let components = stream
                .pop_params()?
                .iter_mut()
                .map(|item| Self::param_at(item, false, level + 1))
                .collect::<Result<Vec<_>, _>>()?;
            Self::tuple(components)?
        } else {
            Self::elementary(verify_basic_type(stream.pop_type()?)?)
        };

        while let Some(TokenKind::Bracket(length)) = stream.peek_kind() {
            stream.pop()?;
            node = Self::array(node, length)?;
        }
        Ok(node)
    }

    /// Build from an interchange object.
    ///
    /// Array suffixes are read off the end of `type`; tuple types take their
    /// members from `components`, or from the type string itself when
    /// `components` is absent.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = %param.ty))]
    pub fn from_json(param: &JsonParam, allow_indexed: bool) -> Result<Self, AbiError> {
        Self::json_at(param, allow_indexed, 0)
    }

    fn json_at(param: &JsonParam, allow_indexed: bool, level: usize) -> Result<Self, AbiError> {
        let name = param.name.as_deref().unwrap_or("");
        if !name.is_empty() {
            verify_identifier(name)?;
        }
        let indexed = match (param.indexed, allow_indexed) {
            (Some(_), false) => return Err(AbiError::NotIndexable),
            (flag, true) => Some(flag.unwrap_or(false)),
            (None, false) => None,
        };
        let node = Self::json_node(&param.ty, param.components.as_deref(), level)?;
        Ok(node.bind(name.to_owned(), indexed))
    }

    fn json_node(
        ty: &str,
        components: Option<&[JsonParam]>,
        level: usize,
    ) -> Result<Self, AbiError> {
        if let Some((inner, length)) = split_array_suffix(ty)? {
            check_level(level + 1)?;
            return Self::array(Self::json_node(inner, components, level + 1)?, length);
        }
        if ty == "tuple" || ty.starts_with("tuple(") || ty.starts_with('(') {
            return match components {
                Some(components) => {
                    check_level(level + 1)?;
                    let components = components
                        .iter()
                        .map(|c| Self::json_at(c, false, level + 1))
                        .collect::<Result<Vec<_>, _>>()?;
                    Self::tuple(components)
                }
                None if ty != "tuple" => {
                    let tokens = tokenize(ty)?;
                    let mut stream = TokenStream::new(&tokens);
                    let node = Self::type_at(&mut stream, level)?;
                    stream.expect_end()?;
                    Ok(node)
                }
                None => Err(AbiError::invalid_type(ty, "tuple without components")),
            };
        }
        Ok(Self::elementary(verify_basic_type(ty)?))
    }

    pub(crate) fn elementary(ty: String) -> Self {
        ParamType {
            name: String::new(),
            ty,
            indexed: None,
            height: 0,
            kind: ParamKind::Elementary,
        }
    }

    fn tuple(components: Vec<ParamType>) -> Result<Self, AbiError> {
        let height = 1 + components.iter().map(|c| c.height).max().unwrap_or(0);
        check_level(height)?;
        let ty = format!(
            "tuple({})",
            components
                .iter()
                .map(|c| c.format(FormatType::Sighash))
                .collect::<Vec<_>>()
                .join(",")
        );
        Ok(ParamType {
            name: String::new(),
            ty,
            indexed: None,
            height,
            kind: ParamKind::Tuple {
                components: components.into_boxed_slice(),
            },
        })
    }

    fn array(children: ParamType, length: Option<usize>) -> Result<Self, AbiError> {
        let height = children.height + 1;
        check_level(height)?;
        let ty = format!("{}{}", children.ty, array_suffix(length));
        Ok(ParamType {
            name: String::new(),
            ty,
            indexed: None,
            height,
            kind: ParamKind::Array {
                length,
                children: Box::new(children),
            },
        })
    }

    fn bind(mut self, name: String, indexed: Option<bool>) -> Self {
        self.name = name;
        self.indexed = indexed;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Parameter name, empty when unnamed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical type string.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    pub fn base_type(&self) -> BaseType {
        match self.kind {
            ParamKind::Elementary => BaseType::Elementary,
            ParamKind::Tuple { .. } => BaseType::Tuple,
            ParamKind::Array { .. } => BaseType::Array,
        }
    }

    /// `None` outside an indexable context.
    pub fn indexed(&self) -> Option<bool> {
        self.indexed
    }

    /// Tuple members; `None` unless this is a tuple.
    pub fn components(&self) -> Option<&[ParamType]> {
        match &self.kind {
            ParamKind::Tuple { components } => Some(components),
            _ => None,
        }
    }

    /// Element type; `None` unless this is an array.
    pub fn array_children(&self) -> Option<&ParamType> {
        match &self.kind {
            ParamKind::Array { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Fixed length of an array. `None` for dynamic arrays and non-arrays.
    pub fn array_length(&self) -> Option<usize> {
        match self.kind {
            ParamKind::Array { length, .. } => length,
            _ => None,
        }
    }

    /// Array length with `-1` for dynamic arrays; `None` for non-arrays.
    pub fn array_length_signed(&self) -> Option<i64> {
        match self.kind {
            ParamKind::Array { length: Some(n), .. } => i64::try_from(n).ok(),
            ParamKind::Array { length: None, .. } => Some(-1),
            _ => None,
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self.kind, ParamKind::Tuple { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, ParamKind::Array { .. })
    }

    /// Whether an indexed event argument of this type is stored hashed.
    pub fn is_indexable(&self) -> bool {
        self.is_tuple() || self.is_array() || self.ty == "string" || self.ty == "bytes"
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamType::parse(s, false)
    }
}

fn check_level(level: usize) -> Result<(), AbiError> {
    if level > MAX_NESTING_DEPTH {
        return Err(AbiError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }
    Ok(())
}

pub(crate) fn array_suffix(length: Option<usize>) -> String {
    match length {
        Some(n) => format!("[{n}]"),
        None => "[]".to_owned(),
    }
}

/// Split `T[N]` / `T[]` into `T` and the length. `None` if `ty` has no
/// array suffix.
fn split_array_suffix(ty: &str) -> Result<Option<(&str, Option<usize>)>, AbiError> {
    let Some(body) = ty.strip_suffix(']') else {
        return Ok(None);
    };
    let Some(open) = body.rfind('[') else {
        return Ok(None);
    };
    let digits = &body[open + 1..];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    let length = if digits.is_empty() {
        None
    } else {
        Some(
            digits
                .parse()
                .map_err(|_| AbiError::invalid_type(ty, "array length out of range"))?,
        )
    };
    Ok(Some((&body[..open], length)))
}

#[cfg(test)]
mod tests;
