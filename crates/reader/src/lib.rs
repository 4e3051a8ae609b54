//! Larch reader — turns program text into instruction trees.
//!
//! Programs are written in a nested literal format: a top-level `(...)` or
//! `[...]` sequence of instructions, where each instruction is a tuple
//! whose first element is its tag string. The reader resolves tags to
//! operations and `"$name"` strings to variable references at load time, so
//! the evaluator never compares strings per execution.
//!
//! Rendering an operand with `Display` produces this same syntax, and the
//! two directions round-trip.
//!
//! # Usage
//!
//! ```
//! let program = larch_reader::read_program(
//!     "(
//!         (\"var\", \"x\", 5),
//!         (\"print\", (\"get\", \"x\")),
//!     )",
//! )
//! .unwrap();
//! assert_eq!(program.len(), 2);
//! ```

pub mod error;
mod lexer;
mod parser;

pub use error::ReadError;

use larch_common::{Operand, Program};

/// Read a whole program: one top-level instruction sequence.
pub fn read_program(source: &str) -> Result<Program, ReadError> {
    let tokens = lexer::tokenize(source)?;
    let mut parser = parser::Parser::new(tokens);
    let code = parser.parse_program()?;
    parser.expect_eof()?;
    Ok(Program::new(code))
}

/// Read a single operand. Mostly useful for tests and tooling; programs go
/// through [`read_program`].
pub fn read_operand(source: &str) -> Result<Operand, ReadError> {
    let tokens = lexer::tokenize(source)?;
    let mut parser = parser::Parser::new(tokens);
    let operand = parser.parse_operand()?;
    parser.expect_eof()?;
    Ok(operand)
}
