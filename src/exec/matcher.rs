//! Evaluates a [`Condition`] against a single object, producing a dynamic
//! [`Value`] (component G).
//!
//! Grounded on odex's `IndexedSet.match`/`BINOPS`/`UNARY_OPS`
//! (`odex/set.py`) for the operator set, adapted so `And`/`Or` return a
//! coerced `Value::Bool` rather than Python's short-circuit-on-*value*
//! result (`l and r` there returns `l` itself when falsy). Matching helium's
//! `exec::expr_eval::eval_value` split between "evaluate to a value" and
//! "evaluate to a boolean" still motivates returning `Value` rather than
//! `bool` here, since every other operator can still produce a non-boolean
//! (arithmetic, `+`, etc.); only `And`/`Or` are pinned to booleans.

use super::executor::Getter;
use crate::condition::{BinOpKind, Condition, UnaryOpKind};
use crate::value::Value;
use std::cmp::Ordering;

pub fn eval<T>(condition: &Condition, obj: &T, getter: &dyn Getter<T>) -> Value {
    match condition {
        Condition::Literal(value) => value.clone(),
        Condition::Attribute(name) => getter.get(obj, name),
        Condition::Array(items) => {
            Value::List(items.iter().map(|c| eval(c, obj, getter)).collect())
        }
        Condition::BinOp { kind, left, right } => eval_binop(*kind, left, right, obj, getter),
        Condition::UnaryOp { kind, operand } => eval_unaryop(*kind, operand, obj, getter),
    }
}

fn eval_binop<T>(
    kind: BinOpKind,
    left: &Condition,
    right: &Condition,
    obj: &T,
    getter: &dyn Getter<T>,
) -> Value {
    match kind {
        BinOpKind::And => {
            let l = eval(left, obj, getter);
            Value::Bool(l.is_truthy() && eval(right, obj, getter).is_truthy())
        }
        BinOpKind::Or => {
            let l = eval(left, obj, getter);
            Value::Bool(l.is_truthy() || eval(right, obj, getter).is_truthy())
        }
        BinOpKind::In => {
            let l = eval(left, obj, getter);
            let r = eval(right, obj, getter);
            let contains = match &r {
                Value::List(items) => items.contains(&l),
                _ => false,
            };
            Value::Bool(contains)
        }
        BinOpKind::Eq => Value::Bool(eval(left, obj, getter) == eval(right, obj, getter)),
        BinOpKind::Ne => Value::Bool(eval(left, obj, getter) != eval(right, obj, getter)),
        BinOpKind::Is => Value::Bool(eval(left, obj, getter) == eval(right, obj, getter)),
        BinOpKind::Lt | BinOpKind::Le | BinOpKind::Gt | BinOpKind::Ge => {
            let l = eval(left, obj, getter);
            let r = eval(right, obj, getter);
            let ord = l.partial_cmp_value(&r);
            let matched = match (kind, ord) {
                (BinOpKind::Lt, Some(Ordering::Less)) => true,
                (BinOpKind::Le, Some(Ordering::Less | Ordering::Equal)) => true,
                (BinOpKind::Gt, Some(Ordering::Greater)) => true,
                (BinOpKind::Ge, Some(Ordering::Greater | Ordering::Equal)) => true,
                _ => false,
            };
            Value::Bool(matched)
        }
        BinOpKind::Add | BinOpKind::Sub | BinOpKind::Mul | BinOpKind::Div | BinOpKind::FloorDiv
        | BinOpKind::Mod | BinOpKind::Pow => {
            arithmetic(kind, eval(left, obj, getter), eval(right, obj, getter))
        }
        BinOpKind::BitwiseAnd | BinOpKind::Xor | BinOpKind::BitwiseOr | BinOpKind::Lshift
        | BinOpKind::Rshift => bitwise(kind, eval(left, obj, getter), eval(right, obj, getter)),
    }
}

fn eval_unaryop<T>(kind: UnaryOpKind, operand: &Condition, obj: &T, getter: &dyn Getter<T>) -> Value {
    let v = eval(operand, obj, getter);
    match kind {
        UnaryOpKind::Not => Value::Bool(!v.is_truthy()),
        UnaryOpKind::Invert => match v {
            Value::Int(n) => Value::Int(!n),
            Value::Bool(b) => Value::Bool(!b),
            _ => Value::Null,
        },
    }
}

fn arithmetic(kind: BinOpKind, l: Value, r: Value) -> Value {
    use Value::{Float, Int};
    match (l, r) {
        (Int(a), Int(b)) => match kind {
            BinOpKind::Add => Int(a + b),
            BinOpKind::Sub => Int(a - b),
            BinOpKind::Mul => Int(a * b),
            BinOpKind::Div => Float(a as f64 / b as f64),
            BinOpKind::FloorDiv => Int(a.div_euclid(b)),
            BinOpKind::Mod => Int(a.rem_euclid(b)),
            BinOpKind::Pow => Int(a.pow(u32::try_from(b).unwrap_or(0))),
            _ => unreachable!("arithmetic() only called for arithmetic kinds"),
        },
        (a, b) => {
            let (a, b) = (as_f64(&a), as_f64(&b));
            match (a, b) {
                (Some(a), Some(b)) => match kind {
                    BinOpKind::Add => Float(a + b),
                    BinOpKind::Sub => Float(a - b),
                    BinOpKind::Mul => Float(a * b),
                    BinOpKind::Div => Float(a / b),
                    BinOpKind::FloorDiv => Float((a / b).floor()),
                    BinOpKind::Mod => Float(a.rem_euclid(b)),
                    BinOpKind::Pow => Float(a.powf(b)),
                    _ => unreachable!("arithmetic() only called for arithmetic kinds"),
                },
                _ => Value::Null,
            }
        }
    }
}

fn bitwise(kind: BinOpKind, l: Value, r: Value) -> Value {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => match kind {
            BinOpKind::BitwiseAnd => Value::Int(a & b),
            BinOpKind::Xor => Value::Int(a ^ b),
            BinOpKind::BitwiseOr => Value::Int(a | b),
            BinOpKind::Lshift => Value::Int(a << b),
            BinOpKind::Rshift => Value::Int(a >> b),
            _ => unreachable!("bitwise() only called for bitwise kinds"),
        },
        _ => Value::Null,
    }
}

fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}
