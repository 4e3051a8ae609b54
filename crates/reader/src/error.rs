//! Error types for the Larch reader.

use thiserror::Error;

/// Errors produced while turning program text into an instruction tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadError {
    /// A character that cannot start any token.
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { line: usize, ch: char },

    /// A string literal ran to end of line or end of input.
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    /// An escape sequence the reader does not recognize.
    #[error("line {line}: invalid escape '\\{ch}'")]
    InvalidEscape { line: usize, ch: char },

    /// A numeric literal that does not parse or is out of range.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A token that makes no sense where it appeared.
    #[error("line {line}: unexpected token {found}")]
    UnexpectedToken { line: usize, found: String },

    /// Input ended in the middle of a form.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A `()` with no operator tag.
    #[error("line {line}: empty instruction")]
    EmptyInstruction { line: usize },

    /// An instruction whose first element is not a string.
    #[error("line {line}: instruction tag must be a string")]
    NonStringTag { line: usize },

    /// A mapping key that is not a scalar or a variable reference.
    #[error("line {line}: map keys must be scalars or variable references")]
    InvalidMapKey { line: usize },

    /// A bare word other than `true`, `false`, or `nil`.
    #[error("line {line}: unknown word '{word}'")]
    UnknownWord { line: usize, word: String },

    /// A program file whose top level is not a sequence of instructions.
    #[error("line {line}: expected a program sequence wrapped in (...) or [...]")]
    NotASequence { line: usize },

    /// Leftover tokens after the top-level form.
    #[error("line {line}: trailing input after the program")]
    TrailingInput { line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unexpected_char() {
        let e = ReadError::UnexpectedChar { line: 3, ch: '@' };
        assert_eq!(e.to_string(), "line 3: unexpected character '@'");
    }

    #[test]
    fn error_display_unterminated_string() {
        let e = ReadError::UnterminatedString { line: 5 };
        assert_eq!(e.to_string(), "line 5: unterminated string literal");
    }

    #[test]
    fn error_display_invalid_number() {
        let e = ReadError::InvalidNumber {
            line: 2,
            token: "1.2.3".to_string(),
        };
        assert_eq!(e.to_string(), "line 2: invalid number '1.2.3'");
    }

    #[test]
    fn error_display_empty_instruction() {
        let e = ReadError::EmptyInstruction { line: 7 };
        assert_eq!(e.to_string(), "line 7: empty instruction");
    }

    #[test]
    fn error_clone_and_eq() {
        let e1 = ReadError::UnknownWord {
            line: 1,
            word: "frob".to_string(),
        };
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }
}
