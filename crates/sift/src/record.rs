//! The record capability implemented by filterable types.
//!
//! [`Record`] is normally derived with `#[derive(Record)]`, which emits the
//! field table and a positional accessor. It can also be written by hand.

use crate::value::{FieldType, Value};

/// Whether a field is visible to predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// The field can be named in predicates.
    #[default]
    Public,
    /// The field is part of the record but never filterable.
    Hidden,
}

/// Static description of one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Declared Rust field name.
    pub name: &'static str,
    /// External name overriding `name` in predicates.
    pub rename: Option<&'static str>,
    /// Declared type.
    pub ty: FieldType,
    /// Visibility to predicates.
    pub visibility: Visibility,
}

impl FieldDef {
    /// Creates a public field.
    pub fn new(name: &'static str, ty: FieldType) -> Self {
        FieldDef {
            name,
            rename: None,
            ty,
            visibility: Visibility::Public,
        }
    }

    /// Creates a hidden field. Only its type name is recorded.
    pub fn hidden(name: &'static str, type_name: &'static str) -> Self {
        FieldDef {
            name,
            rename: None,
            ty: FieldType::Opaque(type_name),
            visibility: Visibility::Hidden,
        }
    }

    /// Sets the external name.
    pub fn rename(mut self, external: &'static str) -> Self {
        self.rename = Some(external);
        self
    }

    /// Returns the name predicates use for this field, before lower-casing.
    pub fn external_name(&self) -> &'static str {
        self.rename.unwrap_or(self.name)
    }

    /// Returns `true` if this field can be named in predicates.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A type whose values can be filtered.
///
/// The position passed to [`Record::field_value`] is the index of the field
/// in the table returned by [`Record::fields`].
///
/// # Manual Implementation
///
/// ```
/// use sift::{FieldDef, FieldValue, Record, Value};
///
/// struct Row {
///     a: i64,
///     b: String,
/// }
///
/// impl Record for Row {
///     fn fields() -> Vec<FieldDef> {
///         vec![
///             FieldDef::new("a", <i64 as FieldValue>::field_type()),
///             FieldDef::new("b", <String as FieldValue>::field_type()).rename("bar"),
///         ]
///     }
///
///     fn field_value(&self, position: usize) -> Option<Value<'_>> {
///         match position {
///             0 => Some(self.a.to_value()),
///             1 => Some(self.b.to_value()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns every field in declaration order, hidden ones included.
    fn fields() -> Vec<FieldDef>
    where
        Self: Sized;

    /// Returns the value of the field at `position`.
    ///
    /// Hidden fields and out-of-range positions return `None`.
    fn field_value(&self, position: usize) -> Option<Value<'_>>;
}
