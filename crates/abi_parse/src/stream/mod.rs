//! Token stream for navigating a lexed signature.
//!
//! A `TokenStream` is a cursor over a window `[start, end)` of a shared
//! [`TokenList`]. Sub-streams popped from it borrow the same tokens with their
//! own window and cursor, so nothing is copied or re-lexed. Paren and comma
//! links stay absolute indices into the shared list.

use abi_lexer::{Keyword, Token, TokenKind, TokenList};
use smallvec::SmallVec;
use tracing::trace;

use crate::AbiError;

/// Cursor over a window of tokens.
#[derive(Clone, Debug)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    start: usize,
    end: usize,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a stream over the whole token list.
    pub fn new(tokens: &'a TokenList) -> Self {
        Self::window(tokens.as_slice(), 0, tokens.len())
    }

    fn window(tokens: &'a [Token], start: usize, end: usize) -> Self {
        TokenStream {
            tokens,
            start,
            end,
            pos: start,
        }
    }

    /// Number of tokens not yet consumed.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.end
    }

    /// Position of the cursor relative to the start of this stream.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos - self.start
    }

    /// Get the next token without consuming it.
    #[inline]
    pub fn peek(&self) -> Result<&'a Token, AbiError> {
        self.peek_expecting("token")
    }

    /// Consume and return the next token.
    pub fn pop(&mut self) -> Result<&'a Token, AbiError> {
        let token = self.peek()?;
        self.advance(token);
        Ok(token)
    }

    /// Get the next token's kind, or `None` at the end of the stream.
    #[inline]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Check if the next token has exactly `kind`.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Return the next token's keyword if it is one of `allowed`.
    pub fn peek_keyword(&self, allowed: &[Keyword]) -> Option<Keyword> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(keyword)) if allowed.contains(&keyword) => Some(keyword),
            _ => None,
        }
    }

    /// Consume the next token, which must be one of the `allowed` keywords.
    pub fn pop_keyword(&mut self, allowed: &[Keyword]) -> Result<Keyword, AbiError> {
        let token = self.peek_expecting("keyword")?;
        match token.kind {
            TokenKind::Keyword(keyword) if allowed.contains(&keyword) => {
                self.advance(token);
                Ok(keyword)
            }
            _ => Err(unexpected("keyword", token)),
        }
    }

    /// Consume the run of `allowed` keywords at the cursor.
    ///
    /// Stops at the first token outside `allowed`. A keyword repeated within
    /// the run is an error.
    pub fn pop_keywords(
        &mut self,
        allowed: &[Keyword],
    ) -> Result<SmallVec<[Keyword; 4]>, AbiError> {
        let mut found = SmallVec::new();
        while let Some(keyword) = self.peek_keyword(allowed) {
            if found.contains(&keyword) {
                return Err(AbiError::DuplicateKeyword { keyword });
            }
            self.pop()?;
            found.push(keyword);
        }
        Ok(found)
    }

    /// Consume an identifier and return its text.
    pub fn pop_ident(&mut self) -> Result<&'a str, AbiError> {
        self.pop_text(TokenKind::Ident, "identifier")
    }

    /// Consume an elementary type name and return its text.
    pub fn pop_type(&mut self) -> Result<&'a str, AbiError> {
        self.pop_text(TokenKind::Type, "type")
    }

    /// Consume an integer literal.
    pub fn pop_number(&mut self) -> Result<u64, AbiError> {
        let token = self.peek_expecting("number")?;
        if let TokenKind::Number(value) = token.kind {
            self.advance(token);
            Ok(value)
        } else {
            Err(unexpected("number", token))
        }
    }

    /// Consume a parenthesized group and return its contents as a sub-stream.
    ///
    /// O(1): the close paren comes from the precomputed match index.
    pub fn pop_paren(&mut self) -> Result<TokenStream<'a>, AbiError> {
        let (open, close) = self.paren_bounds("`(`")?;
        self.pos = close + 1;
        Ok(Self::window(self.tokens, open + 1, close))
    }

    /// Consume a parenthesized, comma-separated list and return one
    /// sub-stream per item.
    ///
    /// Follows the comma links of the group, so nested groups stay intact
    /// inside their item. `()` yields no items; an empty item (as in `(a,)`)
    /// yields an empty sub-stream, which the item parser rejects.
    pub fn pop_params(&mut self) -> Result<Vec<TokenStream<'a>>, AbiError> {
        let (open, close) = self.paren_bounds("parameter list")?;
        let mut items = Vec::new();
        if close > open + 1 {
            let mut from = open;
            while from < close {
                let next = self.tokens[from].link_next.unwrap_or(close).min(close);
                items.push(Self::window(self.tokens, from + 1, next));
                from = next;
            }
        }
        self.pos = close + 1;
        Ok(items)
    }

    /// Fail unless every token has been consumed.
    pub fn expect_end(&self) -> Result<(), AbiError> {
        match self.current() {
            None => Ok(()),
            Some(token) => Err(AbiError::LeftoverTokens {
                offset: token.offset,
                remaining: self.remaining_text(),
            }),
        }
    }

    /// The unconsumed tokens joined by spaces (used in error messages).
    pub fn remaining_text(&self) -> String {
        self.tokens[self.pos..self.end]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    fn current(&self) -> Option<&'a Token> {
        if self.pos < self.end {
            self.tokens.get(self.pos)
        } else {
            None
        }
    }

    fn peek_expecting(&self, expected: &'static str) -> Result<&'a Token, AbiError> {
        self.current().ok_or(AbiError::UnexpectedEnd { expected })
    }

    fn pop_text(&mut self, kind: TokenKind, expected: &'static str) -> Result<&'a str, AbiError> {
        let token = self.peek_expecting(expected)?;
        if token.kind == kind {
            self.advance(token);
            Ok(token.text.as_str())
        } else {
            Err(unexpected(expected, token))
        }
    }

    /// Indices of the open paren at the cursor and its matching close paren.
    fn paren_bounds(&self, expected: &'static str) -> Result<(usize, usize), AbiError> {
        let token = self.peek_expecting(expected)?;
        match (token.kind, token.match_index) {
            (TokenKind::OpenParen, Some(close)) if close < self.end => Ok((self.pos, close)),
            _ => Err(unexpected(expected, token)),
        }
    }

    #[inline]
    fn advance(&mut self, token: &Token) {
        trace!(
            pos = self.pos,
            kind = token.kind.display_name(),
            text = %token.text,
            offset = token.offset,
            "advance"
        );
        self.pos += 1;
    }
}

#[cold]
fn unexpected(expected: &'static str, token: &Token) -> AbiError {
    AbiError::UnexpectedToken {
        expected,
        found: token.text.clone(),
        offset: token.offset,
    }
}
