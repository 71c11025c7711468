//! Token cooking: classifies raw tokens and builds the paren/comma links.
//!
//! Two stacks are kept while scanning:
//! - `open_parens` holds the indices of unclosed `(` tokens so each `)` can
//!   record its match in O(1).
//! - `link_heads` holds, per open paren, the last `(` or `,` seen at that
//!   depth. Each new comma or close paren links back to it.
//!
//! Array suffixes arrive as `[`, an optional number and `]`. On `]` the number
//! (if any) is folded into the bracket token, so the parser only ever sees one
//! `Bracket` token per suffix.

use smallvec::SmallVec;

use crate::raw_token::RawToken;
use crate::{is_elementary_type, Keyword, LexError, LexErrorKind, Token, TokenKind, TokenList};

pub(crate) struct Cooker {
    tokens: Vec<Token>,
    open_parens: SmallVec<[usize; 8]>,
    link_heads: SmallVec<[usize; 8]>,
    depth: u32,
    /// Index of a `[` still waiting for its `]`.
    open_bracket: Option<usize>,
}

impl Cooker {
    pub(crate) fn new() -> Self {
        Cooker {
            tokens: Vec::new(),
            open_parens: SmallVec::new(),
            link_heads: SmallVec::new(),
            depth: 0,
            open_bracket: None,
        }
    }

    pub(crate) fn push(&mut self, raw: RawToken, text: &str, offset: usize) -> Result<(), LexError> {
        // Inside `[...]` only a single length literal may appear.
        if let Some(bracket) = self.open_bracket {
            let allowed = match raw {
                RawToken::RBracket => true,
                RawToken::Number => self.tokens.len() == bracket + 1,
                _ => false,
            };
            if !allowed {
                return Err(LexError::new(
                    LexErrorKind::UnclosedBracket,
                    self.tokens[bracket].offset,
                ));
            }
        }

        match raw {
            RawToken::LParen => {
                let index = self.emit(TokenKind::OpenParen, text, offset);
                self.open_parens.push(index);
                self.link_heads.push(index);
                self.depth += 1;
            }
            RawToken::RParen => {
                let Some(open) = self.open_parens.pop() else {
                    return Err(LexError::new(LexErrorKind::UnmatchedParen, offset));
                };
                self.depth -= 1;
                let index = self.tokens.len();
                let head = self.link_heads.pop().unwrap_or(open);
                self.tokens[open].match_index = Some(index);
                self.tokens[head].link_next = Some(index);
                let close = self.emit(TokenKind::CloseParen, text, offset);
                self.tokens[close].match_index = Some(open);
                self.tokens[close].link_prev = Some(head);
            }
            RawToken::Comma => {
                let Some(head) = self.link_heads.last_mut() else {
                    return Err(LexError::new(LexErrorKind::StrayComma, offset));
                };
                let previous = *head;
                let index = self.tokens.len();
                *head = index;
                self.tokens[previous].link_next = Some(index);
                self.emit(TokenKind::Comma, text, offset);
                self.tokens[index].link_prev = Some(previous);
            }
            RawToken::At => {
                self.emit(TokenKind::At, text, offset);
            }
            RawToken::LBracket => {
                let attachable = self.tokens.last().is_some_and(|last| {
                    matches!(
                        last.kind,
                        TokenKind::Type | TokenKind::CloseParen | TokenKind::Bracket(_)
                    )
                });
                if !attachable {
                    return Err(LexError::new(LexErrorKind::DetachedBracket, offset));
                }
                let index = self.emit(TokenKind::Bracket(None), text, offset);
                self.open_bracket = Some(index);
            }
            RawToken::RBracket => self.close_bracket(offset)?,
            RawToken::Number => {
                let value = text.parse::<u64>().map_err(|_| {
                    LexError::new(
                        LexErrorKind::NumberOutOfRange {
                            text: text.to_owned(),
                        },
                        offset,
                    )
                })?;
                self.emit(TokenKind::Number(value), text, offset);
            }
            RawToken::Word => {
                let kind = if let Some(keyword) = Keyword::lookup(text) {
                    TokenKind::Keyword(keyword)
                } else if is_elementary_type(text) {
                    TokenKind::Type
                } else {
                    TokenKind::Ident
                };
                self.emit(kind, text, offset);
            }
        }
        Ok(())
    }

    /// Fold `[`, an optional length and `]` into one bracket token.
    fn close_bracket(&mut self, offset: usize) -> Result<(), LexError> {
        let Some(bracket) = self.open_bracket.take() else {
            return Err(LexError::new(LexErrorKind::MissingOpeningBracket, offset));
        };

        let mut length = None;
        // `push` only lets a number land directly after the `[`.
        if self.tokens.len() == bracket + 2 {
            if let Some(Token {
                kind: TokenKind::Number(value),
                text,
                offset: at,
                ..
            }) = self.tokens.pop()
            {
                let value = usize::try_from(value).map_err(|_| {
                    LexError::new(LexErrorKind::NumberOutOfRange { text: text.clone() }, at)
                })?;
                length = Some(value);
                self.tokens[bracket].text.push_str(&text);
            }
        }

        let token = &mut self.tokens[bracket];
        token.kind = TokenKind::Bracket(length);
        token.text.push(']');
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, text: &str, offset: usize) -> usize {
        let index = self.tokens.len();
        self.tokens.push(Token {
            kind,
            text: text.to_owned(),
            offset,
            depth: self.depth,
            match_index: None,
            link_prev: None,
            link_next: None,
        });
        index
    }

    pub(crate) fn finish(self) -> Result<TokenList, LexError> {
        if let Some(bracket) = self.open_bracket {
            return Err(LexError::new(
                LexErrorKind::UnclosedBracket,
                self.tokens[bracket].offset,
            ));
        }
        if let Some(&open) = self.open_parens.last() {
            return Err(LexError::new(
                LexErrorKind::UnclosedParen,
                self.tokens[open].offset,
            ));
        }
        Ok(TokenList::new(self.tokens))
    }
}

#[cfg(test)]
mod tests;
