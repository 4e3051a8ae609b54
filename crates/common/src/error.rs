//! Runtime errors for the Larch evaluator.
//!
//! Every variant renders as `<ErrorClass>: <description>`, which is exactly
//! what the top-level runner prints above the call-stack trace. Control
//! signals (return/break/continue) are not errors and never appear here.

use thiserror::Error;

/// Errors that abort a program run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Wrong number of arguments to a built-in instruction.
    #[error("SyntaxError: {op} takes {expected}, got {got}")]
    Arity {
        op: &'static str,
        expected: &'static str,
        got: usize,
    },

    /// Wrong number of arguments to a user function call.
    #[error("SyntaxError: {name} requires {expected} argument(s), got {got}")]
    CallArity {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A tag that is neither a built-in nor a function visible from the
    /// current scope.
    #[error("SyntaxError: unknown instruction: {0}")]
    UnknownInstruction(String),

    /// A construct received an operand of the wrong shape (non-list
    /// parameters, non-sequence body, and the like).
    #[error("SyntaxError: {0}")]
    Malformed(String),

    /// A control signal escaped to the program top level without meeting
    /// the construct that consumes it.
    #[error("SyntaxError: '{signal}' outside {construct}")]
    StraySignal {
        signal: &'static str,
        construct: &'static str,
    },

    /// Name not bound anywhere in the scope chain.
    #[error("NameError: name '{0}' is not defined")]
    Undefined(String),

    /// Value unusable in the requested operation.
    #[error("TypeError: {0}")]
    Type(String),

    /// `export` issued from the parentless program-root scope.
    #[error("ScopeError: {0}")]
    Scope(String),

    /// Invalid arity to `exit`, or an unparsable numeric string.
    #[error("ValueError: {0}")]
    Value(String),

    /// Division or modulo by zero.
    #[error("ZeroDivisionError: {kind} by zero")]
    DivisionByZero { kind: &'static str },

    /// Sequence index outside the valid range.
    #[error("IndexError: index {index} out of range (length {len})")]
    IndexOutOfRange { index: i64, len: usize },

    /// Mapping lookup with a key that is not present.
    #[error("KeyError: {0}")]
    MissingKey(String),

    /// Failure on the program input or output stream.
    #[error("IOError: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_the_error_class() {
        assert_eq!(
            RuntimeError::Arity {
                op: "var",
                expected: "2 arguments",
                got: 3
            }
            .to_string(),
            "SyntaxError: var takes 2 arguments, got 3"
        );
        assert_eq!(
            RuntimeError::Undefined("x".to_string()).to_string(),
            "NameError: name 'x' is not defined"
        );
        assert_eq!(
            RuntimeError::DivisionByZero { kind: "division" }.to_string(),
            "ZeroDivisionError: division by zero"
        );
        assert_eq!(
            RuntimeError::StraySignal {
                signal: "break",
                construct: "loop"
            }
            .to_string(),
            "SyntaxError: 'break' outside loop"
        );
    }

    #[test]
    fn display_call_arity() {
        let e = RuntimeError::CallArity {
            name: "add".to_string(),
            expected: 2,
            got: 3,
        };
        assert_eq!(e.to_string(), "SyntaxError: add requires 2 argument(s), got 3");
    }

    #[test]
    fn display_index_and_key_errors() {
        assert_eq!(
            RuntimeError::IndexOutOfRange { index: 7, len: 3 }.to_string(),
            "IndexError: index 7 out of range (length 3)"
        );
        assert_eq!(
            RuntimeError::MissingKey("\"k\"".to_string()).to_string(),
            "KeyError: \"k\""
        );
    }

    #[test]
    fn error_clone_and_eq() {
        let e1 = RuntimeError::Undefined("x".to_string());
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }
}
