//! Typed operands stored in field predicates.

use crate::field::FieldValue;
use crate::value::{Datum, FieldType, Kind};

/// An owned operand value together with the exact type it was built from.
///
/// The type is what the sanitizer checks against the field's declared type:
/// `Operand::from(2u8)` is a `u8` operand and only compatible with unsigned
/// fields, while `Operand::from(vec!["a".to_string()])` is a `Vec<String>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    ty: FieldType,
    datum: Datum,
}

impl Operand {
    /// Creates an operand from any field value.
    pub fn of<T: FieldValue>(value: T) -> Self {
        Operand {
            ty: T::field_type(),
            datum: value.to_datum(),
        }
    }

    /// Creates an operand from its parts.
    ///
    /// Returns `None` unless `datum` has the reduced kind of `ty`.
    ///
    /// ```
    /// use sift::{Datum, FieldType, Operand};
    ///
    /// assert!(Operand::from_parts(FieldType::U16, Datum::Uint(2)).is_some());
    /// assert!(Operand::from_parts(FieldType::I64, Datum::Uint(2)).is_none());
    /// ```
    pub fn from_parts(ty: FieldType, datum: Datum) -> Option<Self> {
        ty.holds(&datum).then_some(Operand { ty, datum })
    }

    /// Returns the operand's declared type.
    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    /// Returns the operand's reduced kind.
    pub fn kind(&self) -> Kind {
        self.ty.kind()
    }

    /// Returns the operand value.
    pub fn datum(&self) -> &Datum {
        &self.datum
    }

    /// Narrows a float operand to `f32` precision.
    pub(crate) fn narrow_to_f32(self) -> Self {
        match self.datum {
            Datum::Float(f) => Operand {
                ty: FieldType::F32,
                datum: Datum::Float(f as f32 as f64),
            },
            _ => self,
        }
    }
}

macro_rules! impl_from_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::of(value)
                }
            }
        )*
    };
}

impl_from_field_value!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, String,
);

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand {
            ty: FieldType::String,
            datum: Datum::String(value.to_string()),
        }
    }
}

impl<T: FieldValue> From<Vec<T>> for Operand {
    fn from(value: Vec<T>) -> Self {
        Operand::of(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_keep_exact_type() {
        assert_eq!(Operand::from(2u8).field_type(), &FieldType::U8);
        assert_eq!(Operand::from(2u8).datum(), &Datum::Uint(2));
        assert_eq!(Operand::from(-2i32).kind(), Kind::Int);
        assert_eq!(Operand::from("two").field_type(), &FieldType::String);
        assert_eq!(Operand::from('x').datum(), &Datum::Char('x'));
    }

    #[test]
    fn vec_operands() {
        let operand = Operand::from(vec!["a1".to_string(), "a3".to_string()]);
        assert_eq!(
            operand.field_type(),
            &FieldType::List(Box::new(FieldType::String))
        );
        assert_eq!(
            operand.datum(),
            &Datum::List(vec![Datum::String("a1".into()), Datum::String("a3".into())])
        );
    }

    #[test]
    fn from_parts_rejects_mislabelled_data() {
        let operand = Operand::from_parts(FieldType::I32, Datum::Int(2)).unwrap();
        assert_eq!(operand, Operand::from(2i32));

        assert!(Operand::from_parts(FieldType::I64, Datum::Uint(2)).is_none());
        assert!(Operand::from_parts(FieldType::String, Datum::Int(7)).is_none());
        assert!(Operand::from_parts(
            FieldType::List(Box::new(FieldType::U8)),
            Datum::List(vec![Datum::Int(1)])
        )
        .is_none());
    }

    #[test]
    fn narrowing_rounds_to_f32() {
        let narrowed = Operand::from(0.1f64).narrow_to_f32();
        assert_eq!(narrowed.datum(), &Datum::Float(0.1f32 as f64));
        assert_eq!(narrowed.field_type(), &FieldType::F32);
    }
}
