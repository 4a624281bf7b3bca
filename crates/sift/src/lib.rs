//! Sift - SQL-style predicate filtering for in-memory record collections.
//!
//! Sift applies a query-builder style predicate to a slice of records that
//! has already been loaded, as if a database had evaluated the `WHERE`
//! clause. It supports:
//!
//! - Equality and inequality with deep structural comparison
//! - Ordering comparisons over integers, floats and strings
//! - SQL `LIKE` / `ILIKE` patterns with `%`, `_` and escapes
//! - `And` / `Or` combinators and caller-supplied whole-record tests
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{filter, Predicate, Record};
//!
//! #[derive(Record, Clone, Debug, PartialEq)]
//! pub struct Row {
//!     pub a: i64,
//!     #[sift(rename = "bar")]
//!     pub b: String,
//! }
//!
//! let rows = vec![
//!     Row { a: 2, b: "b".into() },
//!     Row { a: 4, b: "d".into() },
//!     Row { a: 1, b: "a".into() },
//!     Row { a: 5, b: "e".into() },
//!     Row { a: 3, b: "c".into() },
//! ];
//!
//! let predicate = Predicate::and([Predicate::gt("A", 1i64), Predicate::lt("bar", "e")]);
//! let matched = filter(&rows, Some(&predicate)).unwrap();
//!
//! let a: Vec<i64> = matched.iter().map(|r| r.a).collect();
//! assert_eq!(a, [2, 4, 3]);
//! ```
//!
//! # Two Phases
//!
//! Filtering happens in two steps:
//!
//! 1. **Sanitize**: every field name is resolved case-insensitively against
//!    the record schema and every operand is type-checked. Unknown fields
//!    and incompatible operands fail here, before any record is read.
//! 2. **Evaluate**: the sanitized predicate runs against each record and
//!    cannot fail. Matches keep their input order.
//!
//! # Type Compatibility
//!
//! | Field kind | Accepted operands |
//! |------------|-------------------|
//! | signed integers | any signed integer width |
//! | unsigned integers | any unsigned integer width |
//! | `f32` / `f64` | any float width |
//! | everything else | exactly the field's type |
//!
//! `Like`, `NotLike`, `ILike` and `NotILike` additionally require a
//! `String` field.

mod compare;
mod error;
mod eval;
mod field;
mod filter;
mod like;
mod operand;
mod options;
mod predicate;
mod record;
mod sanitize;
mod schema;
mod value;

// Re-export public API
pub use compare::{compare, CompareOp};
pub use error::{Result, SiftError};
pub use field::FieldValue;
pub use filter::{filter, filter_into, Filter};
pub use like::{like, Case, CaseFold, LikePattern, DEFAULT_ESCAPE};
pub use operand::Operand;
pub use options::FilterOptions;
pub use predicate::{Conditions, Predicate, RecordPredicate};
pub use record::{FieldDef, Record, Visibility};
pub use schema::{FieldInfo, Schema};
pub use value::{Datum, FieldType, Kind, Value};

#[cfg(feature = "derive")]
pub use sift_macros::Record;
