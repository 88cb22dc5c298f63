use std::collections::HashMap;

use once_cell::sync::Lazy;
use thiserror::Error;
use tokens::{LiteralValue, Token, TokenType};

pub mod tokens;

/// Lexical errors. The scanner recovers after each one and keeps going, so a
/// single pass surfaces every error in the source.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ScanError {
    #[error("[line {line}] Error: Unterminated string at end of file.")]
    UnterminatedString { line: u32 },
    #[error("[line {line}] Error: Unexpected character: {character}")]
    UnexpectedCharacter { line: u32, character: char },
}

/// Sink for lexical diagnostics. The scanner never owns a destination; the
/// caller injects one (the driver uses stderr, tests record).
pub trait ErrorReporter {
    fn report(&mut self, error: &ScanError);
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenType>> = Lazy::new(|| {
    HashMap::from([
        ("and", TokenType::And),
        ("class", TokenType::Class),
        ("else", TokenType::Else),
        ("false", TokenType::False),
        ("for", TokenType::For),
        ("fun", TokenType::Fun),
        ("if", TokenType::If),
        ("nil", TokenType::Nil),
        ("or", TokenType::Or),
        ("print", TokenType::Print),
        ("return", TokenType::Return),
        ("super", TokenType::Super),
        ("this", TokenType::This),
        ("true", TokenType::True),
        ("var", TokenType::Var),
        ("while", TokenType::While),
    ])
});

fn is_digit(c: char) -> bool {
    c >= '0' && c <= '9'
}

// identifiers are ASCII-only
fn is_alpha(c: char) -> bool {
    (c >= 'a' && c <= 'z') || (c >= 'A' && c <= 'Z') || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

pub struct Scanner<'r> {
    source: Vec<char>,
    tokens: Vec<Token>,
    reporter: &'r mut dyn ErrorReporter,
    had_error: bool,
    // first character in current lexeme
    start: usize,
    // current character
    current: usize,
    // current line, 1-based
    line: u32,
}

impl<'r> Scanner<'r> {
    pub fn new(source: &str, reporter: &'r mut dyn ErrorReporter) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: vec![],
            reporter,
            had_error: false,
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scan the whole source in one pass and return the token sequence plus a
    /// flag telling the caller whether any lexical error occurred. The
    /// sequence always ends with exactly one Eof token.
    pub fn scan_tokens(mut self) -> (Vec<Token>, bool) {
        while !self.is_at_end() {
            self.start = self.current;
            match self.scan_token() {
                Ok(()) => continue,
                // report and carry on scanning so we catch as many errors as
                // possible in one pass
                Err(e) => {
                    self.reporter.report(&e);
                    self.had_error = true;
                }
            }
        }

        self.tokens
            .push(Token::new(TokenType::Eof, String::new(), None, self.line));
        (self.tokens, self.had_error)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            return '\0';
        }
        self.source[self.current]
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            return '\0';
        }
        self.source[self.current + 1]
    }

    /// a conditional advance: consume the next character only if it matches
    fn match_next(&mut self, target: char) -> bool {
        if self.is_at_end() {
            return false;
        }
        if self.source[self.current] != target {
            return false;
        }
        self.current += 1;
        true
    }

    // converts current lexeme from slice of chars to String
    fn current_to_string(&self) -> String {
        String::from_iter(&self.source[self.start..self.current])
    }

    fn add_token(&mut self, token_type: TokenType, literal: Option<LiteralValue>) {
        let lexeme = self.current_to_string();
        self.tokens
            .push(Token::new(token_type, lexeme, literal, self.line));
    }

    fn scan_token(&mut self) -> Result<(), ScanError> {
        let c = self.advance();
        match c {
            // single-character tokens
            '(' => self.add_token(TokenType::LeftParen, None),
            ')' => self.add_token(TokenType::RightParen, None),
            '{' => self.add_token(TokenType::LeftBrace, None),
            '}' => self.add_token(TokenType::RightBrace, None),
            ',' => self.add_token(TokenType::Comma, None),
            '.' => self.add_token(TokenType::Dot, None),
            '-' => self.add_token(TokenType::Minus, None),
            '+' => self.add_token(TokenType::Plus, None),
            ';' => self.add_token(TokenType::Semicolon, None),
            '*' => self.add_token(TokenType::Star, None),

            // one-or-two character tokens, longest match first
            '!' => {
                if self.match_next('=') {
                    self.add_token(TokenType::BangEqual, None)
                } else {
                    self.add_token(TokenType::Bang, None)
                };
            }
            '=' => {
                if self.match_next('=') {
                    self.add_token(TokenType::EqualEqual, None)
                } else {
                    self.add_token(TokenType::Equal, None)
                };
            }
            '>' => {
                if self.match_next('=') {
                    self.add_token(TokenType::GreaterEqual, None)
                } else {
                    self.add_token(TokenType::Greater, None)
                };
            }
            '<' => {
                if self.match_next('=') {
                    self.add_token(TokenType::LessEqual, None)
                } else {
                    self.add_token(TokenType::Less, None)
                };
            }

            '/' => {
                // double slash means comment, which runs to end of line
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash, None)
                }
            }

            '"' => self.string()?,

            // increment line number on new-line
            '\n' => self.line += 1,
            // ignore irrelevant chars
            '\r' | ' ' | '\t' => {}

            _ => {
                if is_digit(c) {
                    self.number();
                } else if is_alpha(c) {
                    self.identifier();
                } else {
                    return Err(ScanError::UnexpectedCharacter {
                        line: self.line,
                        character: c,
                    });
                }
            }
        }
        Ok(())
    }

    fn string(&mut self) -> Result<(), ScanError> {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(ScanError::UnterminatedString { line: self.line });
        }

        // account for closing quote mark
        self.advance();
        // the literal value drops the surrounding quotes, the lexeme keeps them
        let val = String::from_iter(&self.source[self.start + 1..self.current - 1]);
        self.add_token(TokenType::String, Some(LiteralValue::String(val)));
        Ok(())
    }

    fn number(&mut self) {
        while is_digit(self.peek()) {
            self.advance();
        }

        // a fractional part only counts if a digit follows the dot; a lone
        // trailing dot is left for the next token
        if self.peek() == '.' && is_digit(self.peek_next()) {
            self.advance();
            while is_digit(self.peek()) {
                self.advance();
            }
        }

        // lexeme is digits with at most one interior dot, parse cannot fail
        let val = self.current_to_string().parse::<f32>().unwrap();
        self.add_token(TokenType::Number, Some(LiteralValue::Number(val)));
    }

    fn identifier(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }

        let lexeme = self.current_to_string();
        let token_type = KEYWORDS
            .get(lexeme.as_str())
            .cloned()
            .unwrap_or(TokenType::Identifier);
        self.add_token(token_type, None);
    }
}
