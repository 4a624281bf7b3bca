//! Predicate evaluation against a single record.

use crate::compare::compare;
use crate::record::Record;
use crate::sanitize::{Bound, PatternBound, Plan};

impl<R: Record> Plan<R> {
    /// Evaluates the plan against `record`.
    ///
    /// Combinators short-circuit. An empty `And` is true and an empty `Or`
    /// is false.
    pub(crate) fn evaluate(&self, record: &R) -> bool {
        match self {
            Plan::And(children) => children.iter().all(|child| child.evaluate(record)),
            Plan::Or(children) => children.iter().any(|child| child.evaluate(record)),
            Plan::Eq(bounds) => bounds.iter().all(|bound| equals(record, bound)),
            Plan::NotEq(bounds) => bounds.iter().all(|bound| !equals(record, bound)),
            Plan::Compare(op, bounds) => bounds.iter().all(|bound| {
                record
                    .field_value(bound.position)
                    .is_some_and(|value| compare(&value, &bound.operand, *op))
            }),
            Plan::Like { negated, patterns } => patterns
                .iter()
                .all(|bound| like_matches(record, bound) != *negated),
            Plan::Custom(test) => test.accepts(record),
        }
    }
}

fn equals<R: Record>(record: &R, bound: &Bound) -> bool {
    record
        .field_value(bound.position)
        .is_some_and(|value| value == bound.operand)
}

fn like_matches<R: Record>(record: &R, bound: &PatternBound) -> bool {
    record
        .field_value(bound.position)
        .and_then(|value| value.as_str().map(|text| bound.pattern.is_match(text)))
        .unwrap_or(false)
}
