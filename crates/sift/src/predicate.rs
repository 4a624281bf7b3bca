//! The predicate tree.
//!
//! A [`Predicate`] is built by the caller and only ever read by the crate.
//! Field predicates hold [`Conditions`], a list of field name and operand
//! pairs that must all hold. Combinators nest predicates, and
//! [`Predicate::Custom`] carries an arbitrary whole-record test.

use std::fmt;
use std::sync::Arc;

use crate::operand::Operand;

/// A whole-record boolean test.
///
/// Implemented for every `Fn(&R) -> bool + Send + Sync`, so closures can be
/// used directly with [`Predicate::custom`].
pub trait RecordPredicate<R> {
    /// Returns `true` if `record` should be kept.
    fn accepts(&self, record: &R) -> bool;
}

impl<R, F> RecordPredicate<R> for F
where
    F: Fn(&R) -> bool,
{
    fn accepts(&self, record: &R) -> bool {
        self(record)
    }
}

/// Field name to operand pairs, implicitly AND-ed.
///
/// Names are matched case-insensitively against the record's external field
/// names. Pairs keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    entries: Vec<(String, Operand)>,
}

impl Conditions {
    /// Creates an empty set of conditions.
    pub fn new() -> Self {
        Conditions::default()
    }

    /// Adds a condition.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Operand>) -> Self {
        self.entries.push((field.into(), value.into()));
        self
    }

    /// Iterates over the conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operand)> {
        self.entries.iter().map(|(name, operand)| (name.as_str(), operand))
    }

    /// Returns the number of conditions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no conditions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Conditions
where
    K: Into<String>,
    V: Into<Operand>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Conditions {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A filter expression over records of type `R`.
///
/// # Example
///
/// ```
/// use sift::{Conditions, Predicate};
///
/// struct Row;
///
/// let predicate: Predicate<Row> = Predicate::and([
///     Predicate::gt("A", 1i64),
///     Predicate::Lt(Conditions::new().with("bar", "e")),
/// ]);
/// assert_eq!(predicate.name(), "And");
/// ```
pub enum Predicate<R> {
    /// Every child must match. No children matches everything.
    And(Vec<Predicate<R>>),
    /// At least one child must match. No children matches nothing.
    Or(Vec<Predicate<R>>),
    /// Fields equal their operands.
    Eq(Conditions),
    /// Fields differ from their operands.
    NotEq(Conditions),
    /// Fields are greater than their operands.
    Gt(Conditions),
    /// Fields are less than their operands.
    Lt(Conditions),
    /// Fields are greater than or equal to their operands.
    GtOrEq(Conditions),
    /// Fields are less than or equal to their operands.
    LtOrEq(Conditions),
    /// Fields match their `LIKE` patterns, case-sensitively.
    Like(Conditions),
    /// Fields do not match their `LIKE` patterns.
    NotLike(Conditions),
    /// Fields match their `LIKE` patterns, ignoring case.
    ILike(Conditions),
    /// Fields do not match their `LIKE` patterns, ignoring case.
    NotILike(Conditions),
    /// A caller-supplied test. Never checked against the schema.
    Custom(Arc<dyn RecordPredicate<R> + Send + Sync>),
}

impl<R> Predicate<R> {
    /// `field = value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Predicate::Eq(Conditions::new().with(field, value))
    }

    /// `field <> value`.
    pub fn not_eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Predicate::NotEq(Conditions::new().with(field, value))
    }

    /// `field > value`.
    pub fn gt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Predicate::Gt(Conditions::new().with(field, value))
    }

    /// `field < value`.
    pub fn lt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Predicate::Lt(Conditions::new().with(field, value))
    }

    /// `field >= value`.
    pub fn gt_or_eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Predicate::GtOrEq(Conditions::new().with(field, value))
    }

    /// `field <= value`.
    pub fn lt_or_eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Predicate::LtOrEq(Conditions::new().with(field, value))
    }

    /// `field LIKE pattern`.
    pub fn like(field: impl Into<String>, pattern: &str) -> Self {
        Predicate::Like(Conditions::new().with(field, pattern))
    }

    /// `field NOT LIKE pattern`.
    pub fn not_like(field: impl Into<String>, pattern: &str) -> Self {
        Predicate::NotLike(Conditions::new().with(field, pattern))
    }

    /// `field ILIKE pattern`.
    pub fn ilike(field: impl Into<String>, pattern: &str) -> Self {
        Predicate::ILike(Conditions::new().with(field, pattern))
    }

    /// `field NOT ILIKE pattern`.
    pub fn not_ilike(field: impl Into<String>, pattern: &str) -> Self {
        Predicate::NotILike(Conditions::new().with(field, pattern))
    }

    /// Conjunction of `children`.
    pub fn and(children: impl IntoIterator<Item = Predicate<R>>) -> Self {
        Predicate::And(children.into_iter().collect())
    }

    /// Disjunction of `children`.
    pub fn or(children: impl IntoIterator<Item = Predicate<R>>) -> Self {
        Predicate::Or(children.into_iter().collect())
    }

    /// Wraps a whole-record test.
    pub fn custom<F>(test: F) -> Self
    where
        F: RecordPredicate<R> + Send + Sync + 'static,
    {
        Predicate::Custom(Arc::new(test))
    }

    /// Returns the variant name.
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::And(_) => "And",
            Predicate::Or(_) => "Or",
            Predicate::Eq(_) => "Eq",
            Predicate::NotEq(_) => "NotEq",
            Predicate::Gt(_) => "Gt",
            Predicate::Lt(_) => "Lt",
            Predicate::GtOrEq(_) => "GtOrEq",
            Predicate::LtOrEq(_) => "LtOrEq",
            Predicate::Like(_) => "Like",
            Predicate::NotLike(_) => "NotLike",
            Predicate::ILike(_) => "ILike",
            Predicate::NotILike(_) => "NotILike",
            Predicate::Custom(_) => "Custom",
        }
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        match self {
            Predicate::And(children) => Predicate::And(children.clone()),
            Predicate::Or(children) => Predicate::Or(children.clone()),
            Predicate::Eq(c) => Predicate::Eq(c.clone()),
            Predicate::NotEq(c) => Predicate::NotEq(c.clone()),
            Predicate::Gt(c) => Predicate::Gt(c.clone()),
            Predicate::Lt(c) => Predicate::Lt(c.clone()),
            Predicate::GtOrEq(c) => Predicate::GtOrEq(c.clone()),
            Predicate::LtOrEq(c) => Predicate::LtOrEq(c.clone()),
            Predicate::Like(c) => Predicate::Like(c.clone()),
            Predicate::NotLike(c) => Predicate::NotLike(c.clone()),
            Predicate::ILike(c) => Predicate::ILike(c.clone()),
            Predicate::NotILike(c) => Predicate::NotILike(c.clone()),
            Predicate::Custom(test) => Predicate::Custom(Arc::clone(test)),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::And(children) | Predicate::Or(children) => {
                f.debug_tuple(self.name()).field(children).finish()
            }
            Predicate::Eq(c)
            | Predicate::NotEq(c)
            | Predicate::Gt(c)
            | Predicate::Lt(c)
            | Predicate::GtOrEq(c)
            | Predicate::LtOrEq(c)
            | Predicate::Like(c)
            | Predicate::NotLike(c)
            | Predicate::ILike(c)
            | Predicate::NotILike(c) => f.debug_tuple(self.name()).field(c).finish(),
            Predicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
