//! Tokenizer behavior through the public API.

use msbuild::parser::{ExpressionError, LexErrorKind, TokenKind, Tokenizer, tokenize};
use rstest::rstest;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
}

// =============================================================================
// TOKEN KINDS
// =============================================================================

#[rstest]
#[case("==", TokenKind::Equal)]
#[case("=", TokenKind::Equal)]
#[case("!=", TokenKind::NotEqual)]
#[case("<", TokenKind::Less)]
#[case("<=", TokenKind::LessOrEqual)]
#[case(">", TokenKind::Greater)]
#[case(">=", TokenKind::GreaterOrEqual)]
#[case("AND", TokenKind::And)]
#[case("Or", TokenKind::Or)]
#[case("!", TokenKind::Not)]
#[case("-", TokenKind::Number)]
#[case("1.2.3", TokenKind::Number)]
#[case("-.5", TokenKind::Number)]
#[case("'quoted'", TokenKind::String)]
#[case("Identifier", TokenKind::String)]
fn test_single_token_kind(#[case] input: &str, #[case] expected: TokenKind) {
    assert_eq!(kinds(input), vec![expected]);
}

#[test]
fn test_item_transform_is_one_reference() {
    let tokens = tokenize("@(Foo->'%(Bar)')").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Item,
            TokenKind::LeftParen,
            TokenKind::String,
            TokenKind::Transform,
            TokenKind::String,
            TokenKind::RightParen,
        ]
    );
    assert_eq!(tokens[2].text(), "Foo");
    assert_eq!(tokens[4].text(), "%(Bar)");
    assert_eq!(u32::from(tokens[5].position), 15);
}

#[rstest]
#[case("'a'\u{a0}== 'b'")]
#[case("'a'\x0b== 'b'")]
#[case("'a'\u{2003}==\x0c'b'")]
fn test_unicode_whitespace_separates_tokens(#[case] input: &str) {
    assert_eq!(kinds(input), vec![TokenKind::String, TokenKind::Equal, TokenKind::String]);
}

#[test]
fn test_positions_after_unicode_whitespace_are_byte_offsets() {
    let tokens = tokenize("a\u{a0}== b").unwrap();
    let positions: Vec<u32> = tokens.iter().map(|t| u32::from(t.position)).collect();
    assert_eq!(positions, vec![0, 3, 6]);
}

#[test]
fn test_positions_are_byte_offsets() {
    let tokens = tokenize("'a' == 'b'").unwrap();
    let positions: Vec<u32> = tokens.iter().map(|t| u32::from(t.position)).collect();
    assert_eq!(positions, vec![0, 4, 7]);
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_unterminated_string() {
    let err = tokenize("'abc").unwrap_err();
    assert!(matches!(
        err,
        ExpressionError::Lex(ref lex) if lex.kind == LexErrorKind::UnterminatedString
    ));
}

#[test]
fn test_invalid_punctuation() {
    let err = tokenize("a # b").unwrap_err();
    let ExpressionError::Lex(lex) = err else {
        panic!("expected lex error");
    };
    assert_eq!(lex.kind, LexErrorKind::InvalidPunctuation);
    assert_eq!(lex.ch, Some('#'));
    assert_eq!(u32::from(lex.position), 2);
}

#[test]
fn test_next_after_end_fails() {
    let mut tokenizer = Tokenizer::new("a").unwrap();
    tokenizer.next_token().unwrap();
    assert!(tokenizer.is_eof());
    let err = tokenizer.next_token().unwrap_err();
    assert!(err.to_string().contains("ended abruptly"));
}
