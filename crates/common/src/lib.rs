//! Larch common types: the instruction tree and runtime values.
//!
//! This crate provides the foundational data structures shared by the
//! reader, the evaluator, and the CLI:
//!
//! - [`Op`] — the built-in operation set, resolved from source tags at load
//!   time, with [`Op::Call`] as the open extension point for user functions
//! - [`Operand`] / [`Instr`] — instruction-tree nodes
//! - [`Program`] — the top-level instruction sequence
//! - [`Value`] / [`Func`] / [`ValueMap`] — runtime values
//! - [`RuntimeError`] — the runtime error taxonomy
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod op;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::RuntimeError;
pub use instruction::{Instr, Operand};
pub use op::Op;
pub use program::Program;
pub use value::{Func, Value, ValueMap};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy that generates a scalar runtime value.
    fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::Int),
            prop::num::f64::NORMAL.prop_map(Value::Float),
            "[a-z0-9 ]{0,12}".prop_map(Value::Str),
            any::<bool>().prop_map(Value::Bool),
            Just(Value::Nil),
        ]
    }

    proptest! {
        /// Value equality is reflexive for every scalar we generate.
        #[test]
        fn scalar_equality_reflexive(v in arb_scalar()) {
            prop_assert_eq!(v.clone(), v);
        }

        /// An int always equals the float with the same numeric value.
        #[test]
        fn int_float_equality(n in -1_000_000i64..1_000_000) {
            prop_assert_eq!(Value::Int(n), Value::Float(n as f64));
        }

        /// Inserting twice with equal keys keeps one entry with the last
        /// value, and lookup finds it.
        #[test]
        fn map_insert_overwrite(key in arb_scalar(), a in arb_scalar(), b in arb_scalar()) {
            let mut map = ValueMap::new();
            map.insert(key.clone(), a);
            map.insert(key.clone(), b.clone());
            prop_assert_eq!(map.len(), 1);
            prop_assert_eq!(map.get(&key), Some(&b));
        }

        /// Map equality is insensitive to insertion order.
        #[test]
        fn map_equality_order_insensitive(
            entries in prop::collection::vec((arb_scalar(), arb_scalar()), 0..8)
        ) {
            let forward: ValueMap = entries.iter().cloned().collect();
            let reverse: ValueMap = entries.iter().rev().cloned().collect();
            // Reversed insertion keeps the FIRST of duplicate keys, so only
            // compare when all keys are distinct.
            let keys: Vec<_> = entries.iter().map(|(k, _)| k.clone()).collect();
            let distinct = keys
                .iter()
                .enumerate()
                .all(|(i, k)| keys.iter().skip(i + 1).all(|other| other != k));
            if distinct {
                prop_assert_eq!(forward, reverse);
            }
        }
    }
}
