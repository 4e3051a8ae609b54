//! Recursive-descent parser: tokens to instruction trees.
//!
//! The grammar is the nested literal format programs are written in:
//!
//! ```text
//! operand := tuple | list | map | scalar
//! tuple   := "(" string ("," operand)* ","? ")"     an instruction; the
//!                                                   string is its tag
//! list    := "[" (operand ("," operand)* ","?)? "]"
//! map     := "{" (key ":" operand ("," ...)? )? "}" keys are scalars or
//!                                                   variable references
//! ```
//!
//! Two resolutions happen at parse time, so the evaluator never re-examines
//! strings: instruction tags resolve to [`Op`], and string scalars starting
//! with `$` become variable-reference operands.

use larch_common::{Instr, Op, Operand};

use crate::error::ReadError;
use crate::lexer::{Lexed, Token};

pub(crate) struct Parser {
    tokens: Vec<Lexed>,
    pos: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Lexed>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the top-level program form: a `(...)` or `[...]` sequence of
    /// instructions.
    pub(crate) fn parse_program(&mut self) -> Result<Vec<Operand>, ReadError> {
        let lexed = self.advance().ok_or(ReadError::UnexpectedEof)?;
        let close = match lexed.token {
            Token::LParen => Token::RParen,
            Token::LBracket => Token::RBracket,
            _ => return Err(ReadError::NotASequence { line: lexed.line }),
        };
        self.parse_elements(&close)
    }

    /// Parse one operand.
    pub(crate) fn parse_operand(&mut self) -> Result<Operand, ReadError> {
        let lexed = self.advance().ok_or(ReadError::UnexpectedEof)?;
        match lexed.token {
            Token::Int(n) => Ok(Operand::Int(n)),
            Token::Float(x) => Ok(Operand::Float(x)),
            Token::Str(s) => Ok(string_operand(s)),
            Token::Word(word) => match word.as_str() {
                "true" => Ok(Operand::Bool(true)),
                "false" => Ok(Operand::Bool(false)),
                "nil" => Ok(Operand::Nil),
                _ => Err(ReadError::UnknownWord {
                    line: lexed.line,
                    word,
                }),
            },
            Token::LParen => self.parse_instruction(),
            Token::LBracket => self.parse_elements(&Token::RBracket).map(Operand::List),
            Token::LBrace => self.parse_map(),
            other => Err(ReadError::UnexpectedToken {
                line: lexed.line,
                found: other.describe(),
            }),
        }
    }

    /// Error if any tokens remain after the parsed form.
    pub(crate) fn expect_eof(&mut self) -> Result<(), ReadError> {
        match self.advance() {
            None => Ok(()),
            Some(lexed) => Err(ReadError::TrailingInput { line: lexed.line }),
        }
    }

    // The opening paren is already consumed.
    fn parse_instruction(&mut self) -> Result<Operand, ReadError> {
        let lexed = self.advance().ok_or(ReadError::UnexpectedEof)?;
        let tag = match lexed.token {
            Token::Str(s) => s,
            Token::RParen => return Err(ReadError::EmptyInstruction { line: lexed.line }),
            _ => return Err(ReadError::NonStringTag { line: lexed.line }),
        };
        let mut args = Vec::new();
        loop {
            let lexed = self.advance().ok_or(ReadError::UnexpectedEof)?;
            match lexed.token {
                Token::RParen => break,
                Token::Comma => {
                    if self.peek_token() == Some(&Token::RParen) {
                        self.advance();
                        break;
                    }
                    args.push(self.parse_operand()?);
                }
                other => {
                    return Err(ReadError::UnexpectedToken {
                        line: lexed.line,
                        found: other.describe(),
                    })
                }
            }
        }
        Ok(Operand::Instr(Instr::new(Op::from_tag(&tag), args)))
    }

    // Comma-separated operands up to `close`; trailing comma allowed. The
    // opening delimiter is already consumed.
    fn parse_elements(&mut self, close: &Token) -> Result<Vec<Operand>, ReadError> {
        let mut items = Vec::new();
        if self.peek_token() == Some(close) {
            self.advance();
            return Ok(items);
        }
        loop {
            items.push(self.parse_operand()?);
            let lexed = self.advance().ok_or(ReadError::UnexpectedEof)?;
            if lexed.token == *close {
                break;
            }
            match lexed.token {
                Token::Comma => {
                    if self.peek_token() == Some(close) {
                        self.advance();
                        break;
                    }
                }
                other => {
                    return Err(ReadError::UnexpectedToken {
                        line: lexed.line,
                        found: other.describe(),
                    })
                }
            }
        }
        Ok(items)
    }

    // The opening brace is already consumed.
    fn parse_map(&mut self) -> Result<Operand, ReadError> {
        let mut pairs = Vec::new();
        if self.peek_token() == Some(&Token::RBrace) {
            self.advance();
            return Ok(Operand::Map(pairs));
        }
        loop {
            let key_line = self.peek_line();
            let key = self.parse_operand()?;
            if !matches!(
                key,
                Operand::Int(_)
                    | Operand::Float(_)
                    | Operand::Str(_)
                    | Operand::Bool(_)
                    | Operand::Nil
                    | Operand::Var(_)
            ) {
                return Err(ReadError::InvalidMapKey { line: key_line });
            }

            let lexed = self.advance().ok_or(ReadError::UnexpectedEof)?;
            if lexed.token != Token::Colon {
                return Err(ReadError::UnexpectedToken {
                    line: lexed.line,
                    found: lexed.token.describe(),
                });
            }
            let value = self.parse_operand()?;
            pairs.push((key, value));

            let lexed = self.advance().ok_or(ReadError::UnexpectedEof)?;
            match lexed.token {
                Token::RBrace => break,
                Token::Comma => {
                    if self.peek_token() == Some(&Token::RBrace) {
                        self.advance();
                        break;
                    }
                }
                other => {
                    return Err(ReadError::UnexpectedToken {
                        line: lexed.line,
                        found: other.describe(),
                    })
                }
            }
        }
        Ok(Operand::Map(pairs))
    }

    fn advance(&mut self) -> Option<Lexed> {
        let lexed = self.tokens.get(self.pos).cloned();
        if lexed.is_some() {
            self.pos += 1;
        }
        lexed
    }

    fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|lexed| &lexed.token)
    }

    fn peek_line(&self) -> usize {
        self.tokens.get(self.pos).map_or(0, |lexed| lexed.line)
    }
}

// A string scalar beginning with `$` is a variable reference.
fn string_operand(s: String) -> Operand {
    match s.strip_prefix('$') {
        Some(name) if !name.is_empty() => Operand::Var(name.to_string()),
        _ => Operand::Str(s),
    }
}
