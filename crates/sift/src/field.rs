//! Conversion of Rust field types into filterable values.
//!
//! [`FieldValue`] is the bridge between a concrete field type and the
//! runtime [`Value`]/[`Datum`] representation. The derive macro calls it for
//! every visible field, and [`Operand`](crate::Operand) conversions use it
//! to capture the operand's exact type.

use crate::value::{Datum, FieldType, Value};

/// A type that can be stored in a filterable record field.
///
/// # Example
///
/// ```
/// use sift::{FieldType, FieldValue, Value};
///
/// assert_eq!(<u16 as FieldValue>::field_type(), FieldType::U16);
/// assert_eq!(7u16.to_value(), Value::Uint(7));
/// ```
pub trait FieldValue {
    /// Returns the declared type used for compatibility checks.
    fn field_type() -> FieldType
    where
        Self: Sized;

    /// Borrows this field as a runtime value.
    fn to_value(&self) -> Value<'_>;

    /// Copies this field into an owned operand value.
    fn to_datum(&self) -> Datum;
}

macro_rules! impl_field_value {
    ($($ty:ty => $field_type:ident, $variant:ident as $wide:ty;)*) => {
        $(
            impl FieldValue for $ty {
                fn field_type() -> FieldType {
                    FieldType::$field_type
                }

                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self as $wide)
                }

                fn to_datum(&self) -> Datum {
                    Datum::$variant(*self as $wide)
                }
            }
        )*
    };
}

impl_field_value! {
    i8 => I8, Int as i64;
    i16 => I16, Int as i64;
    i32 => I32, Int as i64;
    i64 => I64, Int as i64;
    isize => Isize, Int as i64;
    u8 => U8, Uint as u64;
    u16 => U16, Uint as u64;
    u32 => U32, Uint as u64;
    u64 => U64, Uint as u64;
    usize => Usize, Uint as u64;
    f32 => F32, Float as f64;
    f64 => F64, Float as f64;
}

impl FieldValue for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }

    fn to_datum(&self) -> Datum {
        Datum::Bool(*self)
    }
}

impl FieldValue for char {
    fn field_type() -> FieldType {
        FieldType::Char
    }

    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }

    fn to_datum(&self) -> Datum {
        Datum::Char(*self)
    }
}

impl FieldValue for String {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }

    fn to_datum(&self) -> Datum {
        Datum::String(self.clone())
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::List(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value<'_> {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn to_datum(&self) -> Datum {
        Datum::List(self.iter().map(FieldValue::to_datum).collect())
    }
}

// Boxing is transparent: a `Box<i64>` field filters exactly like an `i64`.
impl<T: FieldValue> FieldValue for Box<T> {
    fn field_type() -> FieldType {
        T::field_type()
    }

    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }

    fn to_datum(&self) -> Datum {
        (**self).to_datum()
    }
}
