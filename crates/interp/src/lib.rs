//! Larch evaluator — executes instruction trees.
//!
//! The evaluator walks an already-structured instruction tree, maintaining:
//! - a [`Scope`] chain for variable bindings with parent-lookup fallback
//! - a purely diagnostic [`CallStack`], rendered as a trace on failure
//! - explicit control signals ([`Unwind`]) for return/break/continue
//!
//! # Usage
//!
//! ```
//! use larch_common::{Instr, Op, Operand, Program, Value};
//! use larch_interp::run_program;
//!
//! let program = Program::new(vec![
//!     Operand::Instr(Instr::new(
//!         Op::Var,
//!         vec![Operand::Str("x".to_string()), Operand::Int(5)],
//!     )),
//!     Operand::Instr(Instr::new(
//!         Op::Get,
//!         vec![Operand::Str("x".to_string())],
//!     )),
//! ]);
//!
//! let mut out = Vec::new();
//! let mut input = std::io::empty();
//! let result = run_program(&program, "<demo>", &mut out, &mut input).unwrap();
//! assert_eq!(result, Value::Int(5));
//! ```

pub mod eval;
mod ops;
pub mod scope;
pub mod trace;
pub mod unwind;

pub use eval::Interp;
pub use scope::Scope;
pub use trace::{CallFrame, CallStack};
pub use unwind::{Fault, Outcome, Termination, Unwind};

use std::io::{BufRead, Write};

use larch_common::{Program, Value};

/// Execute a program against a fresh root scope and return its final value.
///
/// This is the primary entry point for the evaluator. `context` names the
/// program in call-stack traces; `out` and `input` are the program's I/O
/// streams.
///
/// # Errors
///
/// Returns [`Termination::Fault`] when a runtime error aborts the run (the
/// fault carries the trace rendered at the failure point), and
/// [`Termination::Exit`] when the program executes an `exit` instruction —
/// the caller decides what process termination means.
pub fn run_program(
    program: &Program,
    context: &str,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<Value, Termination> {
    let mut interp = Interp::new(context, out, input);
    interp.run(program)
}
