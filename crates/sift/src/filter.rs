//! Filter construction and execution.
//!
//! A [`Filter`] is a predicate that has been sanitized against the schema
//! of its record type. Build it once, then run it over as many collections
//! as needed. [`filter`] and [`filter_into`] are the one-shot entry points.

use log::debug;

use crate::error::Result;
use crate::options::FilterOptions;
use crate::predicate::Predicate;
use crate::record::Record;
use crate::sanitize::{sanitize, Plan};
use crate::schema::Schema;

/// A sanitized, reusable filter over records of type `R`.
///
/// # Example
///
/// ```
/// use sift::{Filter, Predicate, Record};
///
/// #[derive(Record, Clone, Debug, PartialEq)]
/// pub struct Row {
///     pub a: i64,
///     #[sift(rename = "bar")]
///     pub b: String,
/// }
///
/// let rows = vec![
///     Row { a: 1, b: "one".into() },
///     Row { a: 2, b: "two".into() },
///     Row { a: 3, b: "three".into() },
/// ];
///
/// let filter = Filter::new(&Predicate::gt("A", 1i64)).unwrap();
/// let matched = filter.filter(&rows);
/// assert_eq!(matched.len(), 2);
/// assert_eq!(matched[0].b, "two");
/// ```
pub struct Filter<R> {
    // `None` matches everything without evaluating.
    plan: Option<Plan<R>>,
}

impl<R: Record> Filter<R> {
    /// Sanitizes `predicate` with default options.
    pub fn new(predicate: &Predicate<R>) -> Result<Self> {
        Self::with_options(predicate, &FilterOptions::default())
    }

    /// Sanitizes `predicate` with the given options.
    pub fn with_options(predicate: &Predicate<R>, options: &FilterOptions) -> Result<Self> {
        let schema = Schema::resolve::<R>();
        let plan = sanitize(predicate, &schema, options)?;
        Ok(Filter { plan: Some(plan) })
    }

    /// Sanitizes an optional predicate. `None` builds a filter that keeps
    /// every record.
    pub fn from_option(predicate: Option<&Predicate<R>>) -> Result<Self> {
        match predicate {
            Some(predicate) => Self::new(predicate),
            None => Ok(Self::everything()),
        }
    }

    /// A filter that keeps every record.
    pub fn everything() -> Self {
        Filter { plan: None }
    }

    /// Returns `true` if this filter keeps every record without evaluating.
    pub fn is_everything(&self) -> bool {
        self.plan.is_none()
    }

    /// Tests a single record.
    pub fn matches(&self, record: &R) -> bool {
        match &self.plan {
            Some(plan) => plan.evaluate(record),
            None => true,
        }
    }

    /// Returns references to the matching records, in input order.
    pub fn filter<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        let matched: Vec<&'a R> = records.iter().filter(|r| self.matches(r)).collect();
        debug!("filter kept {} of {} records", matched.len(), records.len());
        matched
    }

    /// Returns clones of the matching records, in input order.
    pub fn filter_cloned(&self, records: &[R]) -> Vec<R>
    where
        R: Clone,
    {
        if self.is_everything() {
            return records.to_vec();
        }
        self.filter(records).into_iter().cloned().collect()
    }

    /// Keeps only the matching records, preserving their order.
    pub fn retain(&self, records: &mut Vec<R>) {
        if self.is_everything() {
            return;
        }
        let before = records.len();
        records.retain(|r| self.matches(r));
        debug!("retain kept {} of {} records", records.len(), before);
    }

    /// Counts the matching records.
    pub fn count(&self, records: &[R]) -> usize {
        records.iter().filter(|r| self.matches(r)).count()
    }

    /// Finds the first matching record.
    pub fn find<'a>(&self, records: &'a [R]) -> Option<&'a R> {
        records.iter().find(|r| self.matches(r))
    }

    /// Finds the index of the first matching record.
    pub fn position(&self, records: &[R]) -> Option<usize> {
        records.iter().position(|r| self.matches(r))
    }
}

/// Filters `records` with an optional predicate.
///
/// `None` returns a copy of the input. Sanitization errors are returned
/// before any record is evaluated.
///
/// # Example
///
/// ```
/// use sift::{filter, Predicate, Record};
///
/// #[derive(Record, Clone, Debug, PartialEq)]
/// pub struct Item {
///     pub a: i32,
/// }
///
/// let items = vec![Item { a: 1 }, Item { a: 2 }, Item { a: 3 }];
/// let out = filter(&items, Some(&Predicate::gt("A", 1i32))).unwrap();
/// assert_eq!(out, vec![Item { a: 2 }, Item { a: 3 }]);
///
/// let err = filter(&items, Some(&Predicate::eq("A", "value"))).unwrap_err();
/// assert_eq!(err.to_string(), "expected field 'A' to have type i32, got String");
/// ```
pub fn filter<R>(records: &[R], predicate: Option<&Predicate<R>>) -> Result<Vec<R>>
where
    R: Record + Clone,
{
    Ok(Filter::from_option(predicate)?.filter_cloned(records))
}

/// Filters `records` into `output`.
///
/// On success `output` holds exactly the matching records; on error it is
/// left untouched.
pub fn filter_into<R>(
    records: &[R],
    output: &mut Vec<R>,
    predicate: Option<&Predicate<R>>,
) -> Result<()>
where
    R: Record + Clone,
{
    let filter = Filter::from_option(predicate)?;
    output.clear();
    output.extend(records.iter().filter(|r| filter.matches(r)).cloned());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldDef;
    use crate::value::{FieldType, Value};
    use crate::{FieldValue, SiftError};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        a: u32,
    }

    impl Record for Row {
        fn fields() -> Vec<FieldDef> {
            vec![FieldDef::new("a", FieldType::U32)]
        }

        fn field_value(&self, position: usize) -> Option<Value<'_>> {
            (position == 0).then(|| self.a.to_value())
        }
    }

    fn rows() -> Vec<Row> {
        vec![Row { a: 3 }, Row { a: 1 }, Row { a: 2 }]
    }

    #[test]
    fn everything_keeps_input() {
        let filter = Filter::<Row>::everything();
        assert!(filter.is_everything());
        assert_eq!(filter.filter_cloned(&rows()), rows());
        assert_eq!(filter.count(&rows()), 3);
    }

    #[test]
    fn filter_preserves_order() {
        let filter = Filter::new(&Predicate::gt("a", 1u8)).unwrap();
        assert_eq!(filter.filter_cloned(&rows()), vec![Row { a: 3 }, Row { a: 2 }]);
    }

    #[test]
    fn retain_in_place() {
        let mut records = rows();
        Filter::new(&Predicate::lt("a", 3u32))
            .unwrap()
            .retain(&mut records);
        assert_eq!(records, vec![Row { a: 1 }, Row { a: 2 }]);
    }

    #[test]
    fn find_and_position() {
        let filter = Filter::new(&Predicate::eq("a", 2u32)).unwrap();
        assert_eq!(filter.find(&rows()), Some(&Row { a: 2 }));
        assert_eq!(filter.position(&rows()), Some(2));
        assert_eq!(filter.count(&rows()), 1);
    }

    #[test]
    fn filter_into_replaces_output() {
        let mut out = vec![Row { a: 99 }];
        filter_into(&rows(), &mut out, Some(&Predicate::gt_or_eq("a", 2u32))).unwrap();
        assert_eq!(out, vec![Row { a: 3 }, Row { a: 2 }]);
    }

    #[test]
    fn filter_into_leaves_output_on_error() {
        let mut out = vec![Row { a: 99 }];
        let err = filter_into(&rows(), &mut out, Some(&Predicate::gt("b", 2u32))).unwrap_err();
        assert!(matches!(err, SiftError::UnknownField { .. }));
        assert_eq!(out, vec![Row { a: 99 }]);
    }

    #[test]
    fn filter_without_predicate() {
        assert_eq!(filter(&rows(), None).unwrap(), rows());
    }
}
