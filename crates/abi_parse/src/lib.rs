//! Parser, formatter and value walker for ABI fragments.
//!
//! Fragments arrive either as human-readable signatures
//! (`function transfer(address to, uint256 amount) returns (bool)`) or as JSON
//! ABI objects, and are normalized into one canonical tree:
//!
//! - [`TokenStream`]: cursor over the lexed signature with O(1) paren groups
//! - [`ParamType`]: canonical type tree, plus the value [walker](ParamType::walk)
//! - [`Fragment`]: the six fragment variants and their grammars
//! - [`FormatType`]: the four output formats
//!
//! Parsing never returns partially built values; every failure is an
//! [`AbiError`].

mod abi;
mod digest;
mod error;
mod format_type;
mod fragment;
pub mod json;
mod param_type;
mod stream;
mod walk;

pub use abi::{format_abi, parse_abi};
pub use digest::{Keccak256, SignatureDigest};
pub use error::AbiError;
pub use format_type::FormatType;
pub use fragment::{
    consume_mutability, ConstructorFragment, ErrorFragment, EventFragment, FallbackFragment,
    Fragment, FragmentKind, FunctionFragment, StateMutability, StructFragment,
};
pub use param_type::{
    is_identifier, verify_basic_type, BaseType, ParamKind, ParamType, MAX_NESTING_DEPTH,
};
pub use stream::TokenStream;
