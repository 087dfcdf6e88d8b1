use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{errors::errors::ErrorImpl, Location};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("fun", TokenKind::Fun);
        map.insert("var", TokenKind::Var);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("yield", TokenKind::Yield);
        map.insert("of", TokenKind::Of);

        map.insert("Int", TokenKind::TyInt);
        map.insert("Bool", TokenKind::TyBool);
        map.insert("String", TokenKind::TyString);
        map.insert("Unit", TokenKind::TyUnit);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Invalid,

    Number,
    String,
    Identifier,
    True,
    False,

    Plus,
    Minus,
    Star,
    Slash,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=
    Less,
    Greater,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,

    Comma,
    Semicolon,
    Colon,
    Arrow,

    // Reserved
    Fun,
    Var,
    If,
    Then,
    Else,
    For,
    Return,
    Yield,
    Of,

    // Primitive types
    TyInt,
    TyBool,
    TyString,
    TyUnit,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokenKind::EOF => "EOF",
            TokenKind::Invalid => "<invalid>",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Arrow => "->",
            TokenKind::Fun => "fun",
            TokenKind::Var => "var",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::Return => "return",
            TokenKind::Yield => "yield",
            TokenKind::Of => "of",
            TokenKind::TyInt => "Int",
            TokenKind::TyBool => "Bool",
            TokenKind::TyString => "String",
            TokenKind::TyUnit => "Unit",
        };

        write!(f, "{}", text)
    }
}

/// Payload of a token.
///
/// Numbers carry their parsed value, identifiers and strings their text, and
/// `Invalid` tokens the lexical error that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Int(i64),
    Text(String),
    Invalid(ErrorImpl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub location: Location,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            TokenValue::Int(value) => write!(f, "{}", value),
            TokenValue::Text(text) if self.kind == TokenKind::String => write!(f, "\"{}\"", text),
            TokenValue::Text(text) => write!(f, "{}", text),
            TokenValue::None | TokenValue::Invalid(_) => write!(f, "{}", self.kind),
        }
    }
}

impl Token {
    /// The identifier or string text, empty for every other token.
    pub fn text(&self) -> &str {
        match &self.value {
            TokenValue::Text(text) => text,
            _ => "",
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// The lexical error carried by an `Invalid` token.
    pub fn lexical_error(&self) -> Option<&ErrorImpl> {
        match &self.value {
            TokenValue::Invalid(error) => Some(error),
            _ => None,
        }
    }
}
