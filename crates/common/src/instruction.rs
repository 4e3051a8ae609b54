//! Instruction-tree nodes for Larch programs.
//!
//! A program is an ordered sequence of instructions. Each instruction is an
//! operator tag plus an ordered operand list, and operands may themselves be
//! nested instructions, scalar literals, variable references, sequences, or
//! mappings. Operands stay untyped until the evaluator resolves them.
//!
//! `Display` renders nodes in the textual literal syntax the reader parses,
//! so rendering and parsing round-trip.

use std::fmt;

use crate::op::Op;
use crate::value::Value;

/// How far an instruction rendering may run before the call stack
/// truncates it.
const SUMMARY_LIMIT: usize = 60;

/// One node of the instruction tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal. Doubles as a name where an instruction expects one
    /// (variable names, parameter lists, type tags).
    Str(String),
    /// Boolean literal.
    Bool(bool),
    /// The `nil` literal.
    Nil,
    /// Variable reference, written `"$name"` in source. The sigil is
    /// stripped when the tree is loaded.
    Var(String),
    /// Nested instruction, evaluated when the operand is resolved.
    Instr(Instr),
    /// Ordered sequence of operands.
    List(Vec<Operand>),
    /// Mapping with scalar-or-reference keys.
    Map(Vec<(Operand, Operand)>),
}

impl Operand {
    /// The literal value of a scalar operand, if it has one.
    ///
    /// Variable references convert back to their source spelling (`"$x"`
    /// becomes the string `$x`): when a mapping is resolved its keys are
    /// preserved literally, not looked up. Instructions, sequences, and
    /// mappings have no scalar value.
    pub fn scalar_value(&self) -> Option<Value> {
        match self {
            Operand::Int(n) => Some(Value::Int(*n)),
            Operand::Float(x) => Some(Value::Float(*x)),
            Operand::Str(s) => Some(Value::Str(s.clone())),
            Operand::Bool(b) => Some(Value::Bool(*b)),
            Operand::Nil => Some(Value::Nil),
            Operand::Var(name) => Some(Value::Str(format!("${name}"))),
            Operand::Instr(_) | Operand::List(_) | Operand::Map(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(n) => write!(f, "{n}"),
            Operand::Float(x) => write!(f, "{x:?}"),
            Operand::Str(s) => write!(f, "{s:?}"),
            Operand::Bool(b) => write!(f, "{b}"),
            Operand::Nil => f.write_str("nil"),
            Operand::Var(name) => write!(f, "\"${name}\""),
            Operand::Instr(instr) => write!(f, "{instr}"),
            Operand::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Operand::Map(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// A single instruction: operator tag plus ordered operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Instr {
    /// The operation, resolved from the source tag at load time.
    pub op: Op,
    /// Ordered operand list.
    pub args: Vec<Operand>,
}

impl Instr {
    /// Create a new instruction.
    pub fn new(op: Op, args: Vec<Operand>) -> Self {
        Self { op, args }
    }

    /// Rendering for call-stack frames, truncated past
    /// [`SUMMARY_LIMIT`] characters for readability.
    pub fn summary(&self) -> String {
        let rendered = self.to_string();
        if rendered.chars().count() <= SUMMARY_LIMIT {
            return rendered;
        }
        let mut truncated: String = rendered.chars().take(SUMMARY_LIMIT - 3).collect();
        truncated.push_str("...");
        truncated
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}", self.op.tag())?;
        for arg in &self.args {
            write!(f, ", {arg}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var_x_5() -> Instr {
        Instr::new(
            Op::Var,
            vec![Operand::Str("x".to_string()), Operand::Int(5)],
        )
    }

    #[test]
    fn display_instruction() {
        assert_eq!(var_x_5().to_string(), "(\"var\", \"x\", 5)");
    }

    #[test]
    fn display_zero_arg_instruction() {
        assert_eq!(Instr::new(Op::Break, vec![]).to_string(), "(\"break\")");
    }

    #[test]
    fn display_nested_instruction() {
        let instr = Instr::new(
            Op::Print,
            vec![Operand::Instr(Instr::new(
                Op::Get,
                vec![Operand::Str("x".to_string())],
            ))],
        );
        assert_eq!(instr.to_string(), "(\"print\", (\"get\", \"x\"))");
    }

    #[test]
    fn display_var_reference_keeps_sigil() {
        let instr = Instr::new(Op::Print, vec![Operand::Var("x".to_string())]);
        assert_eq!(instr.to_string(), "(\"print\", \"$x\")");
    }

    #[test]
    fn display_list_and_map_operands() {
        let instr = Instr::new(
            Op::Switch,
            vec![
                Operand::Int(2),
                Operand::Map(vec![(
                    Operand::Int(1),
                    Operand::List(vec![Operand::Str("one".to_string())]),
                )]),
            ],
        );
        assert_eq!(instr.to_string(), "(\"switch\", 2, {1: [\"one\"]})");
    }

    #[test]
    fn summary_passes_short_renderings_through() {
        assert_eq!(var_x_5().summary(), "(\"var\", \"x\", 5)");
    }

    #[test]
    fn summary_truncates_past_sixty_chars() {
        let long = Instr::new(
            Op::Print,
            vec![Operand::Str("a".repeat(80))],
        );
        let summary = long.summary();
        assert_eq!(summary.chars().count(), 60);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn scalar_value_of_literals() {
        assert_eq!(Operand::Int(5).scalar_value(), Some(Value::Int(5)));
        assert_eq!(Operand::Nil.scalar_value(), Some(Value::Nil));
        assert_eq!(
            Operand::Var("x".to_string()).scalar_value(),
            Some(Value::Str("$x".to_string()))
        );
        assert_eq!(Operand::List(vec![]).scalar_value(), None);
        assert_eq!(Operand::Instr(var_x_5()).scalar_value(), None);
    }
}
