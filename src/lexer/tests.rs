//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, primitive type names and identifiers
//! - Integer and string literals
//! - Operators and punctuation
//! - Comments and locations
//! - Lexical errors carried as tokens

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::{tokenize, Lexer},
    tokens::{TokenKind, TokenValue},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|t| t.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("fun var if then else for return yield of true false");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Fun,
            TokenKind::Var,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::For,
            TokenKind::Return,
            TokenKind::Yield,
            TokenKind::Of,
            TokenKind::True,
            TokenKind::False,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_type_names() {
    let tokens = kinds("Int Bool String Unit Integer");

    assert_eq!(tokens[0], TokenKind::TyInt);
    assert_eq!(tokens[1], TokenKind::TyBool);
    assert_eq!(tokens[2], TokenKind::TyString);
    assert_eq!(tokens[3], TokenKind::TyUnit);
    assert_eq!(tokens[4], TokenKind::Identifier);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 global_var funny");

    assert_eq!(tokens[0].text(), "foo");
    assert_eq!(tokens[1].text(), "bar");
    assert_eq!(tokens[2].text(), "baz_123");
    assert_eq!(tokens[3].text(), "global_var");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].text(), "funny");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 0 1337");

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, TokenValue::Int(42));
    assert_eq!(tokens[1].value, TokenValue::Int(0));
    assert_eq!(tokens[2].value, TokenValue::Int(1337));
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "multiple words" "a\nb""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text(), "hello");
    assert_eq!(tokens[1].text(), "multiple words");
    // No escape processing
    assert_eq!(tokens[2].text(), "a\\nb");
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("+ - * / == != < > = ! ->");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Arrow,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_adjacent_operators() {
    let tokens = kinds("a==b=!c-1");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Identifier,
            TokenKind::Minus,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_brackets_and_punctuation() {
    let tokens = kinds("( ) { } [ ] , ; :");

    assert_eq!(
        tokens,
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = kinds("# leading comment\nvar # trailing\n# another\n  x");

    assert_eq!(tokens, vec![TokenKind::Var, TokenKind::Identifier, TokenKind::EOF]);
}

#[test]
fn test_token_locations() {
    let tokens = tokenize("var x\n  = 10;");

    assert_eq!(tokens[0].location.line, 0);
    assert_eq!(tokens[0].location.column, 0);
    assert_eq!(tokens[1].location.column, 4);
    assert_eq!(tokens[2].location.line, 1);
    assert_eq!(tokens[2].location.column, 2);
    assert_eq!(tokens[2].location.offset, 8);
    assert_eq!(tokens[2].location.to_string(), "line 2, column 3");
}

#[test]
fn test_unrecognised_character_is_recoverable() {
    let tokens = tokenize("a @ b");

    assert_eq!(tokens[1].kind, TokenKind::Invalid);
    assert_eq!(
        tokens[1].lexical_error(),
        Some(&ErrorImpl::UnrecognisedToken { token: String::from("@") })
    );
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_unterminated_string() {
    let tokens = tokenize("var s = \"never closed;\nvar t = 1;");

    assert_eq!(tokens[3].kind, TokenKind::Invalid);
    assert_eq!(tokens[3].lexical_error(), Some(&ErrorImpl::UnterminatedString));
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_number_overflow() {
    let tokens = tokenize("99999999999999999999999");

    assert_eq!(tokens[0].kind, TokenKind::Invalid);
    assert!(matches!(
        tokens[0].lexical_error(),
        Some(ErrorImpl::NumberParseError { .. })
    ));
}

#[test]
fn test_lexer_peek_advance_matches() {
    let mut lexer = Lexer::new("var x;");

    assert_eq!(lexer.peek().kind, TokenKind::Var);
    assert!(!lexer.matches(TokenKind::Fun));
    assert!(lexer.matches(TokenKind::Var));
    assert_eq!(lexer.previous().kind, TokenKind::Var);

    let ident = lexer.advance();
    assert_eq!(ident.text(), "x");
    assert_eq!(lexer.previous().text(), "x");
    assert_eq!(lexer.peek().kind, TokenKind::Semicolon);

    lexer.advance();
    assert_eq!(lexer.peek().kind, TokenKind::EOF);
    lexer.advance();
    assert_eq!(lexer.peek().kind, TokenKind::EOF);
}
