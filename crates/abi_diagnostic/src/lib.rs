//! Error codes for ABI fragment diagnostics.
//!
//! Every error raised while lexing, parsing, formatting or walking an ABI
//! fragment carries one of these codes so callers can match on a stable
//! identifier instead of on message text.

mod error_code;

pub use error_code::ErrorCode;
