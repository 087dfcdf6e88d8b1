use std::mem;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::ErrorImpl, Location, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, TokenValue, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str) -> Token;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new("^[ \t\r\n]+").unwrap();
    static ref COMMENT: Regex = Regex::new("^#[^\n]*").unwrap();

    // Order matters: two-character operators come before their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals) },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals) },
        RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow) },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment) },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not) },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus) },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus) },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star) },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash) },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less) },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater) },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen) },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen) },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly) },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly) },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket) },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket) },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma) },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon) },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon) },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"[^\"]*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^\"[^\"]*\\z").unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
    ];
}

/// An on-demand lexer with a single token of lookahead.
///
/// The next token is always scanned ahead of time and available through
/// [`Lexer::peek`]; [`Lexer::advance`] consumes it.
pub struct Lexer {
    source: String,
    pos: usize,
    line: usize,
    column: usize,
    peeked: Token,
    previous: Token,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        let start = Location::default();
        let mut lexer = Lexer {
            source: String::from(source),
            pos: 0,
            line: 0,
            column: 0,
            peeked: MK_TOKEN!(TokenKind::EOF, TokenValue::None, start),
            previous: MK_TOKEN!(TokenKind::EOF, TokenValue::None, start),
        };

        lexer.peeked = lexer.scan();
        lexer
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.peeked
    }

    /// Returns the most recently consumed token.
    pub fn previous(&self) -> &Token {
        &self.previous
    }

    /// Consumes the peeked token and returns it.
    pub fn advance(&mut self) -> Token {
        let next = self.scan();
        self.previous = mem::replace(&mut self.peeked, next);
        self.previous.clone()
    }

    /// Consumes the peeked token iff it is of the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.peeked.kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn location(&self) -> Location {
        Location {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        for ch in self.source[self.pos..self.pos + n].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }

        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn skip_trivia(&mut self) {
        loop {
            let skipped = WHITESPACE
                .find(self.remainder())
                .or_else(|| COMMENT.find(self.remainder()))
                .map(|m| m.end());

            match skipped {
                Some(n) => self.advance_n(n),
                None => break,
            }
        }
    }

    fn scan(&mut self) -> Token {
        self.skip_trivia();

        for pattern in PATTERNS.iter() {
            let matched = pattern
                .regex
                .find(self.remainder())
                .map(|m| m.as_str().to_string());

            if let Some(matched) = matched {
                return (pattern.handler)(self, &matched);
            }
        }

        let location = self.location();
        match self.remainder().chars().next() {
            Some(ch) => {
                self.advance_n(ch.len_utf8());
                MK_TOKEN!(
                    TokenKind::Invalid,
                    TokenValue::Invalid(ErrorImpl::UnrecognisedToken { token: ch.to_string() }),
                    location
                )
            }
            None => MK_TOKEN!(TokenKind::EOF, TokenValue::None, location),
        }
    }
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Token {
    let location = lexer.location();
    lexer.advance_n(matched.len());

    match matched.parse::<i64>() {
        Ok(value) => MK_TOKEN!(TokenKind::Number, TokenValue::Int(value), location),
        Err(_) => MK_TOKEN!(
            TokenKind::Invalid,
            TokenValue::Invalid(ErrorImpl::NumberParseError { token: String::from(matched) }),
            location
        ),
    }
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Token {
    let location = lexer.location();
    lexer.advance_n(matched.len());

    let contents = &matched[1..matched.len() - 1];
    MK_TOKEN!(TokenKind::String, TokenValue::Text(String::from(contents)), location)
}

fn unterminated_string_handler(lexer: &mut Lexer, matched: &str) -> Token {
    let location = lexer.location();
    lexer.advance_n(matched.len());

    MK_TOKEN!(
        TokenKind::Invalid,
        TokenValue::Invalid(ErrorImpl::UnterminatedString),
        location
    )
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Token {
    let location = lexer.location();
    lexer.advance_n(matched.len());

    if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        MK_TOKEN!(*kind, TokenValue::None, location)
    } else {
        MK_TOKEN!(TokenKind::Identifier, TokenValue::Text(String::from(matched)), location)
    }
}

/// Lexes a whole source buffer, including the trailing `EOF` token.
///
/// Lexical errors show up as `Invalid` tokens in the result.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.advance();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
