//! Instruction dispatch: the evaluator itself.
//!
//! One [`Interp`] evaluates a program against a scope chain and a shared
//! diagnostic call stack. Every instruction evaluation pushes a call frame,
//! dispatches on the instruction's [`Op`], and pops the frame on every exit
//! path. Compound bodies (branches, loop bodies, switch cases, function
//! bodies) run as nested blocks in the same scope; only function calls get
//! a child scope, parented to the scope active at the call site.

use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, Write};
use std::mem;
use std::rc::Rc;

use larch_common::{Func, Instr, Op, Operand, Program, RuntimeError, Value, ValueMap};

use crate::ops;
use crate::scope::Scope;
use crate::trace::CallStack;
use crate::unwind::{Fault, Outcome, Termination, Unwind};

/// The tree-walking evaluator.
pub struct Interp<'io> {
    scope: Scope,
    stack: CallStack,
    context: String,
    out: &'io mut dyn Write,
    input: &'io mut dyn BufRead,
}

impl<'io> Interp<'io> {
    /// Create an evaluator with a fresh root scope.
    ///
    /// `context` names the program for call-stack frames (usually the
    /// source file). `out` and `input` are the program's I/O streams.
    pub fn new(
        context: &str,
        out: &'io mut dyn Write,
        input: &'io mut dyn BufRead,
    ) -> Self {
        Self {
            scope: Scope::new(),
            stack: CallStack::new(),
            context: context.to_string(),
            out,
            input,
        }
    }

    /// Run a whole program and return its final value.
    ///
    /// A control signal that reaches this boundary has no construct left to
    /// consume it and is reported as a syntax error instead of escaping
    /// unrecognized.
    pub fn run(&mut self, program: &Program) -> Result<Value, Termination> {
        self.stack.clear();
        match self.run_block(&program.code) {
            Ok(value) => Ok(value),
            Err(Unwind::Exit(status)) => Err(Termination::Exit(status)),
            Err(Unwind::Fault(fault)) => Err(Termination::Fault(fault)),
            Err(Unwind::Return(_)) => Err(self.stray("return", "function")),
            Err(Unwind::Break) => Err(self.stray("break", "loop")),
            Err(Unwind::Continue) => Err(self.stray("continue", "loop")),
        }
    }

    /// Evaluate an instruction sequence in order, threading the latest
    /// completed value. Signals re-propagate untouched.
    pub fn run_block(&mut self, code: &[Operand]) -> Outcome<Value> {
        let mut result = Value::Nil;
        for (i, element) in code.iter().enumerate() {
            result = self.eval_element(element, Some(i + 1))?;
        }
        Ok(result)
    }

    /// Evaluate one instruction. The diagnostic frame is pushed on entry
    /// and popped on every exit path, so the stack always mirrors the live
    /// nesting depth.
    pub fn eval(&mut self, instr: &Instr, line: Option<usize>) -> Outcome<Value> {
        self.stack.push(&self.context, instr, line);
        let result = self.dispatch(instr);
        self.stack.pop();
        result
    }

    // A sequence element is normally a nested instruction; a bare string is
    // shorthand for a zero-operand instruction.
    fn eval_element(&mut self, element: &Operand, line: Option<usize>) -> Outcome<Value> {
        match element {
            Operand::Instr(instr) => self.eval(instr, line),
            Operand::Str(tag) => self.eval(&Instr::new(Op::from_tag(tag), vec![]), line),
            other => Err(self.raise(RuntimeError::UnknownInstruction(other.to_string()))),
        }
    }

    fn dispatch(&mut self, instr: &Instr) -> Outcome<Value> {
        let args = &instr.args;
        match &instr.op {
            // Declarations & conversions
            Op::Var => self.exec_var(args),
            Op::Int | Op::Str | Op::Float | Op::Bool => self.exec_convert(&instr.op, args),

            // Functions & signals
            Op::Func => self.exec_func(args),
            Op::Return => self.exec_return(args),
            Op::Break => Err(Unwind::Break),
            Op::Continue => Err(Unwind::Continue),
            Op::Export => self.exec_export(args),

            // Branches & loops
            Op::If => self.exec_if(args),
            Op::While => self.exec_while(args),
            Op::For => self.exec_for(args),

            // Variables & I/O
            Op::Get => self.exec_get(args),
            Op::Print => self.exec_print(args),
            Op::Input => self.exec_input(args),

            // Collections
            Op::Array => self.exec_array(args),
            Op::Dict => self.exec_dict(args),
            Op::Index => self.exec_index(args),
            Op::Len => self.exec_len(args),
            Op::Switch => self.exec_switch(args),

            // Operators
            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Mod => {
                self.exec_arith(&instr.op, args)
            }
            Op::Eq | Op::Ne | Op::Lt | Op::Gt | Op::Le | Op::Ge | Op::And | Op::Or => {
                self.exec_fold(&instr.op, args)
            }
            Op::Not => self.exec_not(args),
            Op::NotIn => self.exec_not_in(args),

            // Process control & user calls
            Op::Exit => self.exec_exit(args),
            Op::Call(name) => self.exec_call(name, args),
        }
    }

    // ---- Operand resolution ----

    /// Turn an operand into a value: variable references read the scope
    /// chain, nested instructions evaluate, containers resolve element-wise,
    /// scalars pass through verbatim.
    pub fn resolve(&mut self, operand: &Operand) -> Outcome<Value> {
        match operand {
            Operand::Var(name) => self.scope.get(name).map_err(|e| self.raise(e)),
            Operand::Instr(instr) => self.eval(instr, None),
            Operand::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.resolve(item)?);
                }
                Ok(Value::List(values))
            }
            Operand::Map(pairs) => {
                let mut map = ValueMap::new();
                for (key, value) in pairs {
                    let key = self.literal_key(key)?;
                    let value = self.resolve(value)?;
                    map.insert(key, value);
                }
                Ok(Value::Map(map))
            }
            Operand::Int(n) => Ok(Value::Int(*n)),
            Operand::Float(x) => Ok(Value::Float(*x)),
            Operand::Str(s) => Ok(Value::Str(s.clone())),
            Operand::Bool(b) => Ok(Value::Bool(*b)),
            Operand::Nil => Ok(Value::Nil),
        }
    }

    // Keys of a literal mapping are preserved as written, never resolved.
    fn literal_key(&self, key: &Operand) -> Outcome<Value> {
        key.scalar_value().ok_or_else(|| {
            self.raise(RuntimeError::Type(format!(
                "map keys must be scalar values, got {key}"
            )))
        })
    }

    // ---- Declarations & conversions ----

    fn exec_var(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 2 {
            return Err(self.arity("var", "2 arguments", args.len()));
        }
        let name = self.name_arg(&args[0], "variable name")?.to_string();
        let value = self.resolve(&args[1])?;
        self.scope.set(&name, value.clone());
        Ok(value)
    }

    fn exec_convert(&mut self, op: &Op, args: &[Operand]) -> Outcome<Value> {
        let tag = match op {
            Op::Int => "int",
            Op::Float => "float",
            Op::Bool => "bool",
            _ => "str",
        };
        if args.len() != 1 {
            return Err(self.arity(tag, "1 argument", args.len()));
        }
        let value = self.resolve(&args[0])?;
        let converted = match op {
            Op::Int => convert_int(value),
            Op::Float => convert_float(value),
            Op::Bool => Ok(Value::Bool(value.is_truthy())),
            _ => Ok(Value::Str(value.to_string())),
        };
        converted.map_err(|e| self.raise(e))
    }

    // ---- Functions & signals ----

    fn exec_func(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 3 {
            return Err(self.arity("func", "3 arguments (name, params, body)", args.len()));
        }
        let name = self.name_arg(&args[0], "function name")?.to_string();
        let params = match &args[1] {
            Operand::List(items) => {
                let mut params = Vec::with_capacity(items.len());
                for item in items {
                    params.push(self.name_arg(item, "parameter name")?.to_string());
                }
                params
            }
            other => {
                return Err(self.raise(RuntimeError::Malformed(format!(
                    "func parameters must be a list of names, got {other}"
                ))))
            }
        };
        let body = match &args[2] {
            Operand::List(items) => items.clone(),
            other => {
                return Err(self.raise(RuntimeError::Malformed(format!(
                    "func body must be a sequence, got {other}"
                ))))
            }
        };
        let func = Rc::new(Func {
            name: name.clone(),
            params,
            body,
        });
        self.scope.set(&name, Value::Func(Rc::clone(&func)));
        Ok(Value::Func(func))
    }

    fn exec_return(&mut self, args: &[Operand]) -> Outcome<Value> {
        let value = match args.len() {
            0 => Value::Nil,
            1 => self.resolve(&args[0])?,
            _ => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.resolve(arg)?);
                }
                Value::List(values)
            }
        };
        Err(Unwind::Return(value))
    }

    fn exec_export(&mut self, args: &[Operand]) -> Outcome<Value> {
        let mut names = Vec::with_capacity(args.len());
        for arg in args {
            names.push(self.name_arg(arg, "export name")?);
        }
        self.scope.export(&names).map_err(|e| self.raise(e))?;
        Ok(Value::Nil)
    }

    // ---- Branches & loops ----

    fn exec_if(&mut self, args: &[Operand]) -> Outcome<Value> {
        if !(2..=3).contains(&args.len()) {
            return Err(self.arity(
                "if",
                "2 or 3 arguments (condition, then_body, [else_body])",
                args.len(),
            ));
        }
        if self.resolve(&args[0])?.is_truthy() {
            self.eval_body(&args[1])
        } else if let Some(else_body) = args.get(2) {
            self.eval_body(else_body)
        } else {
            Ok(Value::Nil)
        }
    }

    fn exec_while(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 2 {
            return Err(self.arity("while", "2 arguments (condition, body)", args.len()));
        }
        let condition = &args[0];
        let body = &args[1];
        let mut result = Value::Nil;
        loop {
            if !self.resolve(condition)?.is_truthy() {
                break;
            }
            match self.eval_body(body) {
                Ok(value) => result = value,
                Err(Unwind::Break) => break,
                Err(Unwind::Continue) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(result)
    }

    fn exec_for(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 3 {
            return Err(self.arity("for", "3 arguments (name, iterable, body)", args.len()));
        }
        let name = self.name_arg(&args[0], "loop variable")?.to_string();
        let iterable = self.resolve(&args[1])?;
        let items = self.iterate(iterable)?;
        let body = &args[2];
        let mut result = Value::Nil;
        for item in items {
            self.scope.set(&name, item);
            match self.eval_body(body) {
                Ok(value) => result = value,
                Err(Unwind::Break) => break,
                Err(Unwind::Continue) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(result)
    }

    /// A compound body runs as a nested block when it is a sequence, and
    /// as a single instruction otherwise — in the same scope either way.
    fn eval_body(&mut self, body: &Operand) -> Outcome<Value> {
        match body {
            Operand::List(items) => self.run_block(items),
            other => self.eval_element(other, None),
        }
    }

    fn iterate(&self, value: Value) -> Outcome<Vec<Value>> {
        match value {
            Value::List(items) => Ok(items),
            Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            Value::Map(map) => Ok(map.keys().cloned().collect()),
            other => Err(self.raise(RuntimeError::Type(format!(
                "'{}' is not iterable",
                other.type_name()
            )))),
        }
    }

    // ---- Variables & I/O ----

    fn exec_get(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 1 {
            return Err(self.arity("get", "1 argument", args.len()));
        }
        let name = self.name_arg(&args[0], "variable name")?;
        self.scope.get(name).map_err(|e| self.raise(e))
    }

    fn exec_print(&mut self, args: &[Operand]) -> Outcome<Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.resolve(arg)?);
        }
        let rendered = values
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.out
            .write_all(rendered.as_bytes())
            .map_err(|e| self.raise(RuntimeError::Io(e.to_string())))?;
        match values.len() {
            1 => Ok(values.swap_remove(0)),
            _ => Ok(Value::List(values)),
        }
    }

    fn exec_input(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() > 1 {
            return Err(self.arity("input", "no or one argument", args.len()));
        }
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| self.raise(RuntimeError::Io(e.to_string())))?;
        if read == 0 {
            return Err(self.raise(RuntimeError::Io(
                "end of input while reading a line".to_string(),
            )));
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        let Some(arg) = args.first() else {
            return Ok(Value::Str(line));
        };
        let tag = match arg {
            Operand::Str(tag) => tag.as_str(),
            other => {
                return Err(self.raise(RuntimeError::Type(format!(
                    "unknown data type: {other}"
                ))))
            }
        };
        match tag {
            "int" => line
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| {
                    self.raise(RuntimeError::Value(format!(
                        "invalid literal for int: '{line}'"
                    )))
                }),
            "float" => line
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| {
                    self.raise(RuntimeError::Value(format!(
                        "could not convert string to float: '{line}'"
                    )))
                }),
            "str" => Ok(Value::Str(line)),
            "bool" => Ok(Value::Bool(!line.is_empty())),
            other => Err(self.raise(RuntimeError::Type(format!(
                "unknown data type: {other}"
            )))),
        }
    }

    // ---- Collections ----

    fn exec_array(&mut self, args: &[Operand]) -> Outcome<Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.resolve(arg)?);
        }
        Ok(Value::List(values))
    }

    fn exec_dict(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() % 2 != 0 {
            return Err(self.raise(RuntimeError::Malformed(
                "dict requires an even number of arguments (key-value pairs)".to_string(),
            )));
        }
        let mut map = ValueMap::new();
        for pair in args.chunks_exact(2) {
            let key = self.resolve(&pair[0])?;
            let value = self.resolve(&pair[1])?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn exec_index(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 2 {
            return Err(self.arity("index", "2 arguments (container, index)", args.len()));
        }
        let container = self.resolve(&args[0])?;
        let index = self.resolve(&args[1])?;
        match container {
            Value::List(mut items) => {
                let i = self.sequence_index(&index, items.len())?;
                Ok(items.swap_remove(i))
            }
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let i = self.sequence_index(&index, chars.len())?;
                Ok(Value::Str(chars[i].to_string()))
            }
            Value::Map(map) => match map.get(&index) {
                Some(value) => Ok(value.clone()),
                None => Err(self.raise(RuntimeError::MissingKey(key_display(&index)))),
            },
            other => Err(self.raise(RuntimeError::Type(format!(
                "'{}' is not indexable",
                other.type_name()
            )))),
        }
    }

    // Negative indices count from the end of the sequence.
    fn sequence_index(&self, index: &Value, len: usize) -> Outcome<usize> {
        let raw = match index {
            Value::Int(n) => *n,
            other => {
                return Err(self.raise(RuntimeError::Type(format!(
                    "indices must be integers, got '{}'",
                    other.type_name()
                ))))
            }
        };
        let adjusted = if raw < 0 { raw + len as i64 } else { raw };
        if adjusted < 0 || adjusted as usize >= len {
            return Err(self.raise(RuntimeError::IndexOutOfRange { index: raw, len }));
        }
        Ok(adjusted as usize)
    }

    fn exec_len(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 1 {
            return Err(self.arity("len", "1 argument", args.len()));
        }
        let value = self.resolve(&args[0])?;
        let len = match &value {
            Value::List(items) => items.len(),
            Value::Map(map) => map.len(),
            Value::Str(s) => s.chars().count(),
            other => {
                return Err(self.raise(RuntimeError::Type(format!(
                    "'{}' has no length",
                    other.type_name()
                ))))
            }
        };
        Ok(Value::Int(len as i64))
    }

    fn exec_switch(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() < 2 {
            return Err(self.arity("switch", "at least 2 arguments (value, cases...)", args.len()));
        }
        let scrutinee = self.resolve(&args[0])?;
        let rest = &args[1..];
        // A trailing bare sequence is the default body; a trailing
        // case-mapping is scanned like any other case.
        let (cases, default) = match rest.last() {
            Some(Operand::List(items)) => (&rest[..rest.len() - 1], Some(items)),
            _ => (rest, None),
        };
        for case in cases {
            let pairs = match case {
                Operand::Map(pairs) => pairs,
                other => {
                    return Err(self.raise(RuntimeError::Type(format!(
                        "each case must be a map like {{value: [body]}}, got {other}"
                    ))))
                }
            };
            for (key, body) in pairs {
                let candidate = self.resolve(key)?;
                if candidate == scrutinee {
                    return self.eval_body(body);
                }
            }
        }
        match default {
            Some(items) => self.run_block(items),
            None => Ok(Value::Nil),
        }
    }

    // ---- Operators ----

    fn exec_arith(&mut self, op: &Op, args: &[Operand]) -> Outcome<Value> {
        let values = self.flatten(op, args)?;
        let mut iter = values.into_iter();
        let Some(mut acc) = iter.next() else {
            return Err(self.arity(operator_name(op), "at least 1 argument", 0));
        };
        for value in iter {
            acc = ops::arith(op, acc, value).map_err(|e| self.raise(e))?;
        }
        Ok(acc)
    }

    /// Splice nested same-operator instructions into one operand list before
    /// the reduction. `+` and `*` are associative and flatten at any
    /// position; `-`, `/`, and `%` only along the left spine, so flattening
    /// never changes the strictly left-to-right result.
    fn flatten(&mut self, op: &Op, args: &[Operand]) -> Outcome<Vec<Value>> {
        let associative = matches!(op, Op::Add | Op::Mul);
        let mut queue: VecDeque<&Operand> = args.iter().collect();
        let mut values = Vec::with_capacity(args.len());
        while let Some(item) = queue.pop_front() {
            match item {
                Operand::Instr(nested)
                    if nested.op == *op && (associative || values.is_empty()) =>
                {
                    for (i, arg) in nested.args.iter().enumerate() {
                        queue.insert(i, arg);
                    }
                }
                other => values.push(self.resolve(other)?),
            }
        }
        Ok(values)
    }

    // Left-fold for comparison and boolean operators. All operands resolve
    // first; `and`/`or` pick operand values by truthiness rather than
    // forcing booleans.
    fn exec_fold(&mut self, op: &Op, args: &[Operand]) -> Outcome<Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.resolve(arg)?);
        }
        let mut iter = values.into_iter();
        let Some(mut acc) = iter.next() else {
            return Err(self.arity(operator_name(op), "at least 1 argument", 0));
        };
        for value in iter {
            acc = match op {
                Op::Eq => Value::Bool(acc == value),
                Op::Ne => Value::Bool(acc != value),
                Op::And => {
                    if acc.is_truthy() {
                        value
                    } else {
                        acc
                    }
                }
                Op::Or => {
                    if acc.is_truthy() {
                        acc
                    } else {
                        value
                    }
                }
                other => ops::compare(other, acc, value).map_err(|e| self.raise(e))?,
            };
        }
        Ok(acc)
    }

    fn exec_not(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 1 {
            return Err(self.arity("not", "1 argument", args.len()));
        }
        Ok(Value::Bool(!self.resolve(&args[0])?.is_truthy()))
    }

    fn exec_not_in(&mut self, args: &[Operand]) -> Outcome<Value> {
        if args.len() != 2 {
            return Err(self.arity("!->", "2 arguments", args.len()));
        }
        let needle = self.resolve(&args[0])?;
        let haystack = self.resolve(&args[1])?;
        let contained = ops::contains(&needle, &haystack).map_err(|e| self.raise(e))?;
        Ok(Value::Bool(!contained))
    }

    // ---- Process control & user calls ----

    fn exec_exit(&mut self, args: &[Operand]) -> Outcome<Value> {
        match args.len() {
            0 => Err(Unwind::Exit(0)),
            1 => match self.resolve(&args[0])? {
                Value::Int(code) => Err(Unwind::Exit(code as i32)),
                other => Err(self.raise(RuntimeError::Type(format!(
                    "exit status must be an integer, got '{}'",
                    other.type_name()
                )))),
            },
            n => Err(self.raise(RuntimeError::Value(format!(
                "exit takes 1 optional argument, got {n}"
            )))),
        }
    }

    fn exec_call(&mut self, name: &str, args: &[Operand]) -> Outcome<Value> {
        if !self.scope.has_callable(name) {
            return Err(self.raise(RuntimeError::UnknownInstruction(name.to_string())));
        }
        let Value::Func(func) = self.scope.get(name).map_err(|e| self.raise(e))? else {
            return Err(self.raise(RuntimeError::UnknownInstruction(name.to_string())));
        };
        if args.len() != func.params.len() {
            return Err(self.raise(RuntimeError::CallArity {
                name: name.to_string(),
                expected: func.params.len(),
                got: args.len(),
            }));
        }
        // Arguments resolve in the caller's scope, before the call scope
        // exists. The call scope's parent is the scope active here at the
        // call site, not the one enclosing the definition.
        let mut bindings = HashMap::with_capacity(func.params.len());
        for (param, arg) in func.params.iter().zip(args) {
            bindings.insert(param.clone(), self.resolve(arg)?);
        }
        self.scope.push_frame(bindings);
        let saved_context = mem::replace(&mut self.context, func.name.clone());
        let result = self.run_block(&func.body);
        self.context = saved_context;
        self.scope.pop_frame();
        match result {
            Err(Unwind::Return(value)) => Ok(value),
            Ok(_) => Ok(Value::Nil),
            Err(other) => Err(other),
        }
    }

    // ---- Failure plumbing ----

    // The trace renders here, while the frames that describe the failure
    // are still on the stack.
    fn raise(&self, error: RuntimeError) -> Unwind {
        Unwind::Fault(Fault {
            error,
            trace: self.stack.trace(),
        })
    }

    fn arity(&self, op: &'static str, expected: &'static str, got: usize) -> Unwind {
        self.raise(RuntimeError::Arity { op, expected, got })
    }

    fn stray(&self, signal: &'static str, construct: &'static str) -> Termination {
        Termination::Fault(Fault {
            error: RuntimeError::StraySignal { signal, construct },
            trace: self.stack.trace(),
        })
    }

    fn name_arg<'a>(&self, operand: &'a Operand, what: &str) -> Outcome<&'a str> {
        match operand {
            Operand::Str(name) => Ok(name),
            other => Err(self.raise(RuntimeError::Type(format!(
                "{what} must be a string, got {other}"
            )))),
        }
    }
}

fn convert_int(value: Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Int(n) => Ok(Value::Int(n)),
        Value::Float(x) => Ok(Value::Int(x as i64)),
        Value::Bool(b) => Ok(Value::Int(b as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| RuntimeError::Value(format!("invalid literal for int: '{s}'"))),
        other => Err(RuntimeError::Type(format!(
            "cannot convert {} to int",
            other.type_name()
        ))),
    }
}

fn convert_float(value: Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Int(n) => Ok(Value::Float(n as f64)),
        Value::Float(x) => Ok(Value::Float(x)),
        Value::Bool(b) => Ok(Value::Float(b as i64 as f64)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| {
                RuntimeError::Value(format!("could not convert string to float: '{s}'"))
            }),
        other => Err(RuntimeError::Type(format!(
            "cannot convert {} to float",
            other.type_name()
        ))),
    }
}

fn key_display(key: &Value) -> String {
    match key {
        Value::Str(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}

fn operator_name(op: &Op) -> &'static str {
    match op {
        Op::Add => "+",
        Op::Sub => "-",
        Op::Mul => "*",
        Op::Div => "/",
        Op::Mod => "%",
        Op::Eq => "==",
        Op::Ne => "!=",
        Op::Lt => "<",
        Op::Gt => ">",
        Op::Le => "<=",
        Op::Ge => ">=",
        Op::And => "and",
        Op::Or => "or",
        Op::Not => "not",
        Op::NotIn => "!->",
        _ => "operator",
    }
}
