//! Lexical scope chain: name bindings with parent-lookup fallback.
//!
//! The chain is a stack of frames. The top frame is the current scope and
//! the frame directly below it is its parent; the bottom frame is the
//! program-root scope. Function calls push a frame (parented, by
//! construction, to the scope active at the call site) and pop it when the
//! call returns, so the stack always *is* the current parent chain.

use std::collections::HashMap;

use larch_common::{RuntimeError, Value};

/// A chain of lexical environments.
#[derive(Debug, Default)]
pub struct Scope {
    frames: Vec<HashMap<String, Value>>,
}

impl Scope {
    /// Create a scope chain holding only the program-root scope.
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    /// Bind or overwrite `name` in the current scope only. Ancestor
    /// bindings of the same name are never touched.
    pub fn set(&mut self, name: &str, value: Value) {
        self.frames
            .last_mut()
            .expect("scope chain always has a root frame")
            .insert(name.to_string(), value);
    }

    /// Read a binding, searching the current scope then its ancestors.
    ///
    /// The returned value is a copy: cloning deep-copies every data value,
    /// while a function value clones only its shared handle, so call sites
    /// all see one canonical definition.
    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| RuntimeError::Undefined(name.to_string()))
    }

    /// Copy each named binding into the parent scope. Fails when the
    /// current scope is the program root, which has no parent.
    pub fn export(&mut self, names: &[&str]) -> Result<(), RuntimeError> {
        if self.frames.len() < 2 {
            return Err(RuntimeError::Scope(
                "cannot export from the global scope".to_string(),
            ));
        }
        for &name in names {
            let value = self.get(name)?;
            let parent_index = self.frames.len() - 2;
            self.frames[parent_index].insert(name.to_string(), value);
        }
        Ok(())
    }

    /// True iff `name` resolves somewhere in the chain to a function.
    pub fn has_callable(&self, name: &str) -> bool {
        matches!(self.lookup(name), Some(Value::Func(_)))
    }

    /// Enter a function-call scope with the given parameter bindings.
    pub fn push_frame(&mut self, bindings: HashMap<String, Value>) {
        self.frames.push(bindings);
    }

    /// Leave a function-call scope, discarding its bindings.
    pub fn pop_frame(&mut self) {
        debug_assert!(self.frames.len() > 1, "cannot pop the program-root scope");
        self.frames.pop();
    }

    /// Number of scopes in the chain (the root counts as one).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larch_common::Func;
    use std::rc::Rc;

    fn func_value(name: &str) -> Value {
        Value::Func(Rc::new(Func {
            name: name.to_string(),
            params: vec![],
            body: vec![],
        }))
    }

    #[test]
    fn set_and_get_in_root() {
        let mut scope = Scope::new();
        scope.set("x", Value::Int(5));
        assert_eq!(scope.get("x"), Ok(Value::Int(5)));
    }

    #[test]
    fn get_searches_ancestors() {
        let mut scope = Scope::new();
        scope.set("x", Value::Int(1));
        scope.push_frame(HashMap::new());
        assert_eq!(scope.get("x"), Ok(Value::Int(1)));
    }

    #[test]
    fn set_shadows_without_touching_the_ancestor() {
        let mut scope = Scope::new();
        scope.set("x", Value::Int(1));
        scope.push_frame(HashMap::new());
        scope.set("x", Value::Int(2));
        assert_eq!(scope.get("x"), Ok(Value::Int(2)));
        scope.pop_frame();
        assert_eq!(scope.get("x"), Ok(Value::Int(1)));
    }

    #[test]
    fn get_undefined_is_a_name_error() {
        let scope = Scope::new();
        assert_eq!(
            scope.get("missing"),
            Err(RuntimeError::Undefined("missing".to_string()))
        );
    }

    #[test]
    fn get_copies_data_values() {
        let mut scope = Scope::new();
        scope.set("xs", Value::List(vec![Value::Int(1)]));
        let mut read = scope.get("xs").unwrap();
        if let Value::List(items) = &mut read {
            items.push(Value::Int(2));
        }
        assert_eq!(scope.get("xs"), Ok(Value::List(vec![Value::Int(1)])));
    }

    #[test]
    fn get_shares_function_values() {
        let mut scope = Scope::new();
        scope.set("f", func_value("f"));
        let first = scope.get("f").unwrap();
        let second = scope.get("f").unwrap();
        assert_eq!(first, second); // function equality is identity
    }

    #[test]
    fn export_copies_into_the_parent() {
        let mut scope = Scope::new();
        scope.push_frame(HashMap::new());
        scope.set("x", Value::Int(1));
        scope.export(&["x"]).unwrap();
        scope.pop_frame();
        assert_eq!(scope.get("x"), Ok(Value::Int(1)));
    }

    #[test]
    fn export_from_root_is_a_scope_error() {
        let mut scope = Scope::new();
        scope.set("y", Value::Int(1));
        assert_eq!(
            scope.export(&["y"]),
            Err(RuntimeError::Scope(
                "cannot export from the global scope".to_string()
            ))
        );
    }

    #[test]
    fn export_of_undefined_name_is_a_name_error() {
        let mut scope = Scope::new();
        scope.push_frame(HashMap::new());
        assert_eq!(
            scope.export(&["missing"]),
            Err(RuntimeError::Undefined("missing".to_string()))
        );
    }

    #[test]
    fn has_callable_distinguishes_functions() {
        let mut scope = Scope::new();
        scope.set("f", func_value("f"));
        scope.set("x", Value::Int(5));
        assert!(scope.has_callable("f"));
        assert!(!scope.has_callable("x"));
        assert!(!scope.has_callable("missing"));
    }

    #[test]
    fn frames_nest_and_discard() {
        let mut scope = Scope::new();
        assert_eq!(scope.depth(), 1);
        scope.push_frame(HashMap::from([("a".to_string(), Value::Int(1))]));
        assert_eq!(scope.depth(), 2);
        assert_eq!(scope.get("a"), Ok(Value::Int(1)));
        scope.pop_frame();
        assert_eq!(scope.depth(), 1);
        assert!(scope.get("a").is_err());
    }
}
