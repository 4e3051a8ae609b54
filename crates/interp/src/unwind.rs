//! Non-local exits: control signals, exit requests, and faults.
//!
//! Return, break, and continue are signals, not errors. They ride the `Err`
//! channel of [`Outcome`] so `?` re-propagates them through every nested
//! evaluation, and the construct that owns each signal — the function-call
//! boundary for return, the enclosing loop for break/continue — consumes
//! it by matching. This keeps control flow visible in signatures instead of
//! relying on a throw/catch mechanism.

use std::fmt;

use larch_common::{RuntimeError, Value};

/// Why an evaluation did not produce a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Unwind {
    /// Unwinding to the nearest function-call boundary with a value.
    Return(Value),
    /// Unwinding to the nearest enclosing loop, stopping it.
    Break,
    /// Unwinding to the nearest enclosing loop, re-checking its condition.
    Continue,
    /// An `exit` instruction requested process termination.
    Exit(i32),
    /// A runtime error, with the trace captured where it was raised.
    Fault(Fault),
}

/// Every evaluation step yields a value or unwinds.
pub type Outcome<T> = Result<T, Unwind>;

/// A runtime error paired with the call-stack trace rendered at the moment
/// it was raised — before unwinding pops the frames that describe it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    /// What went wrong.
    pub error: RuntimeError,
    /// Rendered call-stack trace at the failure point. May be empty when
    /// the failure happened outside any instruction frame.
    pub trace: String,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if !self.trace.is_empty() {
            write!(f, "\n{}", self.trace)?;
        }
        Ok(())
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<Fault> for Unwind {
    fn from(fault: Fault) -> Self {
        Unwind::Fault(fault)
    }
}

/// How a whole program run ends when it does not complete normally.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// The program executed `exit`; the process should terminate with this
    /// status.
    Exit(i32),
    /// A runtime error aborted the run.
    Fault(Fault),
}
