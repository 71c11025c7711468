//! Lexer for human-readable ABI signatures using logos.
//!
//! Lexing runs in two layers:
//! 1. **Raw scanning**: logos splits the source into punctuation,
//!    identifier-shaped words and integer literals.
//! 2. **Cooking**: words are classified as keywords, elementary type names or
//!    plain identifiers, parens and commas are linked to each other, and
//!    `[N]` / `[]` suffixes are merged into single bracket tokens.
//!
//! The resulting [`TokenList`] is immutable. The parser splits parameter lists
//! using the precomputed links instead of rescanning nested groups.

mod cooker;
mod keywords;
mod lex_error;
mod raw_token;
mod token;

pub use keywords::{is_elementary_type, Keyword};
pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind, TokenList};

use logos::Logos;

use cooker::Cooker;
use raw_token::RawToken;

/// Lex `source` into a linked, immutable token list.
///
/// Fails on the first character that cannot start a token, on unbalanced
/// parens and on malformed array suffixes.
pub fn tokenize(source: &str) -> Result<TokenList, LexError> {
    let mut cooker = Cooker::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        match raw {
            Ok(raw) => cooker.push(raw, lexer.slice(), span.start)?,
            Err(()) => {
                let found = source[span.start..].chars().next().unwrap_or('\0');
                return Err(LexError::new(
                    LexErrorKind::UnexpectedChar { found },
                    span.start,
                ));
            }
        }
    }

    cooker.finish()
}
