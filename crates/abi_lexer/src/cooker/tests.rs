use pretty_assertions::assert_eq;

use crate::{tokenize, Keyword, LexErrorKind, TokenKind, TokenList};

fn lex(source: &str) -> TokenList {
    match tokenize(source) {
        Ok(tokens) => tokens,
        Err(err) => panic!("failed to lex {source:?}: {err}"),
    }
}

fn lex_err(source: &str) -> (LexErrorKind, usize) {
    match tokenize(source) {
        Ok(tokens) => panic!("expected {source:?} to fail, got {tokens:?}"),
        Err(err) => (err.kind, err.offset),
    }
}

fn kinds(tokens: &TokenList) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

// === Classification ===

#[test]
fn classifies_words() {
    let tokens = lex("function foo(address payable to) view returns (bool)");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Keyword(Keyword::Function),
            TokenKind::Ident,
            TokenKind::OpenParen,
            TokenKind::Type,
            TokenKind::Keyword(Keyword::Payable),
            TokenKind::Ident,
            TokenKind::CloseParen,
            TokenKind::Keyword(Keyword::View),
            TokenKind::Keyword(Keyword::Returns),
            TokenKind::OpenParen,
            TokenKind::Type,
            TokenKind::CloseParen,
        ]
    );
    assert_eq!(tokens[1].text, "foo");
    assert_eq!(tokens[1].offset, 9);
}

#[test]
fn gas_suffix() {
    let tokens = lex("constructor() @29000");
    assert_eq!(tokens[3].kind, TokenKind::At);
    assert_eq!(tokens[4].kind, TokenKind::Number(29000));
}

// === Links ===

#[test]
fn flat_links() {
    // f ( a , b )
    // 0 1 2 3 4 5
    let tokens = lex("f(a,b)");
    assert_eq!(tokens[1].match_index, Some(5));
    assert_eq!(tokens[5].match_index, Some(1));
    assert_eq!(tokens[1].link_next, Some(3));
    assert_eq!(tokens[3].link_prev, Some(1));
    assert_eq!(tokens[3].link_next, Some(5));
    assert_eq!(tokens[5].link_prev, Some(3));
}

#[test]
fn nested_groups_are_skipped_by_links() {
    // ( a , ( b , c ) , d )
    // 0 1 2 3 4 5 6 7 8 9 10
    let tokens = lex("(a,(b,c),d)");
    assert_eq!(tokens[0].link_next, Some(2));
    assert_eq!(tokens[2].link_next, Some(8));
    assert_eq!(tokens[8].link_next, Some(10));
    assert_eq!(tokens[3].link_next, Some(5));
    assert_eq!(tokens[5].link_next, Some(7));
    assert_eq!(tokens[3].match_index, Some(7));
    assert_eq!(tokens[0].match_index, Some(10));
}

#[test]
fn empty_group_links_open_to_close() {
    let tokens = lex("()");
    assert_eq!(tokens[0].link_next, Some(1));
    assert_eq!(tokens[1].link_prev, Some(0));
}

#[test]
fn depth_tracks_nesting() {
    let tokens = lex("(a,(b))");
    let depths: Vec<u32> = tokens.iter().map(|t| t.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 1, 2, 1, 0]);
}

// === Array suffixes ===

#[test]
fn brackets_merge_into_one_token() {
    let tokens = lex("uint8[3][]");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Type,
            TokenKind::Bracket(Some(3)),
            TokenKind::Bracket(None),
        ]
    );
    assert_eq!(tokens[1].text, "[3]");
    assert_eq!(tokens[2].text, "[]");
}

#[test]
fn brackets_after_tuple() {
    let tokens = lex("(uint8,bool)[2] x");
    assert_eq!(tokens[5].kind, TokenKind::Bracket(Some(2)));
    assert_eq!(tokens[6].kind, TokenKind::Ident);
}

#[test]
fn bracket_errors() {
    assert_eq!(lex_err("uint8[3").0, LexErrorKind::UnclosedBracket);
    assert_eq!(lex_err("uint8[a]").0, LexErrorKind::UnclosedBracket);
    assert_eq!(lex_err("uint8[1 2]").0, LexErrorKind::UnclosedBracket);
    assert_eq!(lex_err("uint8]"), (LexErrorKind::MissingOpeningBracket, 5));
    assert_eq!(lex_err("foo[1]"), (LexErrorKind::DetachedBracket, 3));
    assert_eq!(lex_err("[1]").0, LexErrorKind::DetachedBracket);
}

// === Errors ===

#[test]
fn paren_errors() {
    assert_eq!(
        lex_err("function foo(uint8 a"),
        (LexErrorKind::UnclosedParen, 12)
    );
    assert_eq!(lex_err("a)"), (LexErrorKind::UnmatchedParen, 1));
}

#[test]
fn stray_comma() {
    assert_eq!(lex_err("a, b"), (LexErrorKind::StrayComma, 1));
}

#[test]
fn unexpected_character() {
    assert_eq!(
        lex_err("function foo{}"),
        (LexErrorKind::UnexpectedChar { found: '{' }, 12)
    );
}

#[test]
fn number_out_of_range() {
    let (kind, offset) = lex_err("uint8[99999999999999999999999]");
    assert!(matches!(kind, LexErrorKind::NumberOutOfRange { .. }));
    assert_eq!(offset, 6);
}
