//! Logical conditions: the nodes of the filter syntax tree (component A).
//!
//! This module is the Rust analogue of helium's `ir::expr` (itself marked
//! FROZEN there): conditions are pure, immutable, structurally comparable
//! values with no identity beyond their shape.

mod builder;

pub use builder::{and_, attr, literal, or_, IntoCondition};

use crate::value::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitwiseAnd,
    Xor,
    BitwiseOr,
    Lshift,
    Rshift,
    Is,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    In,
}

impl BinOpKind {
    /// Canonical symbol used by the pretty-printer.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::BitwiseAnd => "&",
            Self::Xor => "^",
            Self::BitwiseOr => "|",
            Self::Lshift => "<<",
            Self::Rshift => ">>",
            Self::Is => "is",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::In => "IN",
        }
    }

    /// The operator with left/right swapped, used by `SortedIndex::match_condition`
    /// when the attribute appears on the right of a comparison.
    #[must_use]
    pub const fn inverse_comparison(self) -> Option<Self> {
        match self {
            Self::Lt => Some(Self::Gt),
            Self::Gt => Some(Self::Lt),
            Self::Le => Some(Self::Ge),
            Self::Ge => Some(Self::Le),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOpKind {
    Not,
    Invert,
}

impl UnaryOpKind {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Invert => "~",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Literal(Value),
    Attribute(String),
    Array(Vec<Condition>),
    BinOp {
        kind: BinOpKind,
        left: Box<Condition>,
        right: Box<Condition>,
    },
    UnaryOp {
        kind: UnaryOpKind,
        operand: Box<Condition>,
    },
}

impl Condition {
    #[must_use]
    pub fn bin_op(kind: BinOpKind, left: impl IntoCondition, right: impl IntoCondition) -> Self {
        Condition::BinOp {
            kind,
            left: Box::new(left.into_condition()),
            right: Box::new(right.into_condition()),
        }
    }

    #[must_use]
    pub fn unary_op(kind: UnaryOpKind, operand: impl IntoCondition) -> Self {
        Condition::UnaryOp {
            kind,
            operand: Box::new(operand.into_condition()),
        }
    }

    /// Attribute name this condition compares, if it is a bare `Attribute`.
    #[must_use]
    pub fn as_attribute(&self) -> Option<&str> {
        match self {
            Condition::Attribute(name) => Some(name.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Condition::Literal(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Condition]> {
        match self {
            Condition::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Literal(v) => write!(f, "{v}"),
            Condition::Attribute(name) => write!(f, "{name}"),
            Condition::Array(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "({})", parts.join(", "))
            }
            Condition::BinOp { kind, left, right } => {
                write!(f, "{left} {} {right}", kind.symbol())
            }
            Condition::UnaryOp { kind, operand } => {
                write!(f, "{} {operand}", kind.symbol())
            }
        }
    }
}
