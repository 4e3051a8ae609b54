//! Binary value operators: arithmetic, ordering, and membership.
//!
//! These are the reduction steps the evaluator folds over resolved operand
//! lists. They know nothing about scopes or instructions; failures come
//! back as plain [`RuntimeError`]s for the evaluator to raise with a trace.

use larch_common::{Op, RuntimeError, Value};

/// Apply one arithmetic operator to a pair of values.
pub(crate) fn arith(op: &Op, a: Value, b: Value) -> Result<Value, RuntimeError> {
    match op {
        Op::Add => add(a, b),
        Op::Sub => sub(a, b),
        Op::Mul => mul(a, b),
        Op::Div => div(a, b),
        Op::Mod => rem(a, b),
        other => Err(RuntimeError::Type(format!(
            "'{}' is not an arithmetic operator",
            other.tag()
        ))),
    }
}

fn add(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x.wrapping_add(y))),
        (Value::Str(x), Value::Str(y)) => Ok(Value::Str(x + &y)),
        (Value::List(mut x), Value::List(y)) => {
            x.extend(y);
            Ok(Value::List(x))
        }
        (a, b) => match float_pair(&a, &b) {
            Some((x, y)) => Ok(Value::Float(x + y)),
            None => Err(unsupported("+", &a, &b)),
        },
    }
}

fn sub(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x.wrapping_sub(y))),
        (a, b) => match float_pair(&a, &b) {
            Some((x, y)) => Ok(Value::Float(x - y)),
            None => Err(unsupported("-", &a, &b)),
        },
    }
}

fn mul(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x.wrapping_mul(y))),
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            Ok(Value::Str(repeat_str(&s, n)))
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
            Ok(Value::List(repeat_list(&items, n)))
        }
        (a, b) => match float_pair(&a, &b) {
            Some((x, y)) => Ok(Value::Float(x * y)),
            None => Err(unsupported("*", &a, &b)),
        },
    }
}

// Division always yields a float, even for two integer operands.
fn div(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match all_float_pair(&a, &b) {
        Some((_, y)) if y == 0.0 => Err(RuntimeError::DivisionByZero { kind: "division" }),
        Some((x, y)) => Ok(Value::Float(x / y)),
        None => Err(unsupported("/", &a, &b)),
    }
}

fn rem(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (a, b) {
        (Value::Int(_), Value::Int(0)) => Err(RuntimeError::DivisionByZero { kind: "modulo" }),
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(floored_rem_i64(x, y))),
        (a, b) => match float_pair(&a, &b) {
            Some((_, y)) if y == 0.0 => Err(RuntimeError::DivisionByZero { kind: "modulo" }),
            Some((x, y)) => Ok(Value::Float(floored_rem_f64(x, y))),
            None => Err(unsupported("%", &a, &b)),
        },
    }
}

/// Apply one ordering operator (`< > <= >=`) to a pair of values.
///
/// Numbers compare numerically across int/float; strings compare
/// lexicographically. Booleans order as 0/1 so a chained fold like
/// `(< 1 2 3)` — whose intermediate result is a boolean — keeps working.
pub(crate) fn compare(op: &Op, a: Value, b: Value) -> Result<Value, RuntimeError> {
    use std::cmp::Ordering;

    let ordering = match (&a, &b) {
        (Value::Str(x), Value::Str(y)) => x.partial_cmp(y),
        _ => match (ordering_key(&a), ordering_key(&b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => return Err(unsupported(op.tag(), &a, &b)),
        },
    };

    let result = match op {
        Op::Lt => ordering == Some(Ordering::Less),
        Op::Gt => ordering == Some(Ordering::Greater),
        Op::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        Op::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        other => {
            return Err(RuntimeError::Type(format!(
                "'{}' is not an ordering operator",
                other.tag()
            )))
        }
    };
    Ok(Value::Bool(result))
}

/// Membership test: is `needle` contained in `haystack`?
pub(crate) fn contains(needle: &Value, haystack: &Value) -> Result<bool, RuntimeError> {
    match haystack {
        Value::List(items) => Ok(items.contains(needle)),
        Value::Map(map) => Ok(map.contains_key(needle)),
        Value::Str(s) => match needle {
            Value::Str(sub) => Ok(s.contains(sub.as_str())),
            other => Err(RuntimeError::Type(format!(
                "membership in a str requires a str, got '{}'",
                other.type_name()
            ))),
        },
        other => Err(RuntimeError::Type(format!(
            "'{}' is not a container",
            other.type_name()
        ))),
    }
}

// ---- helpers ----

/// Numeric pair with at least one float operand, as floats.
fn float_pair(a: &Value, b: &Value) -> Option<(f64, f64)> {
    match (a, b) {
        (Value::Int(x), Value::Float(y)) => Some((*x as f64, *y)),
        (Value::Float(x), Value::Int(y)) => Some((*x, *y as f64)),
        (Value::Float(x), Value::Float(y)) => Some((*x, *y)),
        _ => None,
    }
}

/// Any numeric pair, as floats.
fn all_float_pair(a: &Value, b: &Value) -> Option<(f64, f64)> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some((*x as f64, *y as f64)),
        _ => float_pair(a, b),
    }
}

fn ordering_key(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(x) => Some(*x),
        Value::Bool(b) => Some(*b as i64 as f64),
        _ => None,
    }
}

// The remainder takes the sign of the divisor.
fn floored_rem_i64(x: i64, y: i64) -> i64 {
    let r = x % y;
    if r != 0 && (r < 0) != (y < 0) {
        r + y
    } else {
        r
    }
}

fn floored_rem_f64(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r != 0.0 && (r < 0.0) != (y < 0.0) {
        r + y
    } else {
        r
    }
}

fn repeat_str(s: &str, n: i64) -> String {
    if n <= 0 {
        String::new()
    } else {
        s.repeat(n as usize)
    }
}

fn repeat_list(items: &[Value], n: i64) -> Vec<Value> {
    let mut out = Vec::new();
    for _ in 0..n.max(0) {
        out.extend(items.iter().cloned());
    }
    out
}

fn unsupported(op: &str, a: &Value, b: &Value) -> RuntimeError {
    RuntimeError::Type(format!(
        "unsupported operand types for {op}: '{}' and '{}'",
        a.type_name(),
        b.type_name()
    ))
}
