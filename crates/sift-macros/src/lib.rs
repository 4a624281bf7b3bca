//! Proc macros for Sift.
//!
//! # Available Macros
//!
//! - [`Record`] - Generate the schema table and field accessors used to
//!   filter a struct with `sift`
//!
//! The generated code refers to `::sift`, so the derive is meant to be used
//! through the `sift` crate's re-export (enabled by its default `derive`
//! feature).

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for filterable structs.
///
/// Every field of the struct is listed in declaration order. `pub` fields
/// are visible to predicates; other fields, and fields marked
/// `#[sift(skip)]`, are recorded as hidden and never read. Visible field
/// types must implement `sift::FieldValue`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Hide this field from predicates |
/// | `rename = "..."` | Use a custom external name in predicates |
///
/// External names are matched case-insensitively, so two visible fields
/// whose names differ only in case are rejected at compile time.
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Row::A`, `Row::BAR`)
/// 2. Implementation of `Record::fields()` and `Record::field_value()`
///
/// # Example
///
/// ```ignore
/// use sift::{filter, Predicate, Record};
///
/// #[derive(Record, Clone)]
/// pub struct Row {
///     pub a: i64,
///
///     #[sift(rename = "bar")]
///     pub b: String,
///
///     #[sift(skip)]
///     pub cache: Vec<u8>,
///
///     internal_id: u64,
/// }
///
/// let predicate = Predicate::and([
///     Predicate::gt(Row::A, 1i64),
///     Predicate::like(Row::BAR, "b%"),
/// ]);
/// let matched = filter(&rows, Some(&predicate))?;
/// ```
#[proc_macro_derive(Record, attributes(sift))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
