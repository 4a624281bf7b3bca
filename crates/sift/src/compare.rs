//! Ordering comparisons between a field value and an operand.

use std::cmp::Ordering;
use std::fmt;

use crate::value::{Datum, Value};

/// Ordering operator of a comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Less than.
    Lt,
    /// Greater than.
    Gt,
    /// Less than or equal.
    LtOrEq,
    /// Greater than or equal.
    GtOrEq,
}

impl CompareOp {
    /// Evaluates this operator given the ordering of field against operand.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::LtOrEq => ordering != Ordering::Greater,
            CompareOp::GtOrEq => ordering != Ordering::Less,
        }
    }

    /// Returns the SQL spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::LtOrEq => "<=",
            CompareOp::GtOrEq => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares a field value against an operand.
///
/// Dispatch follows the field's reduced kind: signed and unsigned integers,
/// floats and strings are ordered natively. Any other kind, a kind mismatch,
/// or a NaN yields `false`.
///
/// # Example
///
/// ```
/// use sift::{compare, CompareOp, Datum, Value};
///
/// assert!(compare(&Value::Int(2), &Datum::Int(1), CompareOp::Gt));
/// assert!(compare(&Value::Str("a"), &Datum::String("b".into()), CompareOp::Lt));
/// assert!(!compare(&Value::Bool(true), &Datum::Bool(false), CompareOp::Gt));
/// ```
pub fn compare(field: &Value<'_>, operand: &Datum, op: CompareOp) -> bool {
    if !field.kind().is_ordered() {
        return false;
    }
    let ordering = match (field, operand) {
        (Value::Int(a), Datum::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Datum::Uint(b)) => Some(a.cmp(b)),
        (Value::Float(a), Datum::Float(b)) => a.partial_cmp(b),
        (Value::Str(a), Datum::String(b)) => Some((*a).cmp(b.as_str())),
        _ => None,
    };
    match ordering {
        Some(ordering) => op.eval_ordering(ordering),
        None => false,
    }
}
