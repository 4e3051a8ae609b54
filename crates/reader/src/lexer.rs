//! Tokenizer for Larch program text.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::ReadError;

/// A single token from program text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    /// A quoted string literal, escapes already applied.
    Str(String),
    /// An integer literal.
    Int(i64),
    /// A float literal.
    Float(f64),
    /// A bare word (`true`, `false`, `nil`).
    Word(String),
}

impl Token {
    /// Short rendering for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Str(s) => format!("{s:?}"),
            Token::Int(n) => n.to_string(),
            Token::Float(x) => format!("{x:?}"),
            Token::Word(w) => format!("'{w}'"),
        }
    }
}

/// A token tagged with the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Lexed {
    pub token: Token,
    pub line: usize,
}

/// Tokenize program text. `#` starts a comment running to end of line;
/// blank lines and other whitespace are insignificant.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Lexed>, ReadError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1usize;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' => {
                chars.next();
                let token = match c {
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    ',' => Token::Comma,
                    _ => Token::Colon,
                };
                tokens.push(Lexed { token, line });
            }
            '\'' | '"' => {
                let token = lex_string(&mut chars, line)?;
                tokens.push(Lexed { token, line });
            }
            c if c == '-' || c.is_ascii_digit() => {
                let token = lex_number(&mut chars, line)?;
                tokens.push(Lexed { token, line });
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        word.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Lexed {
                    token: Token::Word(word),
                    line,
                });
            }
            other => return Err(ReadError::UnexpectedChar { line, ch: other }),
        }
    }

    Ok(tokens)
}

fn lex_string(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<Token, ReadError> {
    let quote = chars.next().ok_or(ReadError::UnterminatedString { line })?;
    let mut text = String::new();
    loop {
        match chars.next() {
            None | Some('\n') => return Err(ReadError::UnterminatedString { line }),
            Some('\\') => match chars.next() {
                None => return Err(ReadError::UnterminatedString { line }),
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some('r') => text.push('\r'),
                Some('0') => text.push('\0'),
                Some(c @ ('\\' | '\'' | '"')) => text.push(c),
                Some(other) => return Err(ReadError::InvalidEscape { line, ch: other }),
            },
            Some(c) if c == quote => return Ok(Token::Str(text)),
            Some(c) => text.push(c),
        }
    }
}

fn lex_number(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<Token, ReadError> {
    let mut text = String::new();
    if chars.peek() == Some(&'-') {
        text.push('-');
        chars.next();
    }
    push_digits(chars, &mut text);
    let mut is_float = false;
    if chars.peek() == Some(&'.') {
        is_float = true;
        text.push('.');
        chars.next();
        push_digits(chars, &mut text);
    }
    if matches!(chars.peek(), Some('e' | 'E')) {
        is_float = true;
        text.push('e');
        chars.next();
        if matches!(chars.peek(), Some('+' | '-')) {
            text.push(chars.next().unwrap_or('+'));
        }
        push_digits(chars, &mut text);
    }

    let invalid = || ReadError::InvalidNumber {
        line,
        token: text.clone(),
    };
    if is_float {
        text.parse::<f64>().map(Token::Float).map_err(|_| invalid())
    } else {
        text.parse::<i64>().map(Token::Int).map_err(|_| invalid())
    }
}

fn push_digits(chars: &mut Peekable<Chars<'_>>, text: &mut String) {
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            text.push(c);
            chars.next();
        } else {
            break;
        }
    }
}
