//! Runtime value types for field comparison.
//!
//! A record hands out its fields as [`Value`]s, borrowed from the record.
//! Predicate operands are stored as owned [`Datum`]s. Both are classified by
//! [`Kind`], the reduced kind that hides integer and float widths, while
//! [`FieldType`] keeps the exact declared type for strict compatibility
//! checks and error messages.

use std::fmt;

/// Reduced kind of a value.
///
/// All signed integer widths collapse into [`Kind::Int`], all unsigned widths
/// into [`Kind::Uint`] and both float widths into [`Kind::Float`]. Every
/// other kind stands for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Signed integer of any width.
    Int,
    /// Unsigned integer of any width.
    Uint,
    /// `f32` or `f64`.
    Float,
    /// UTF-8 string.
    String,
    /// Boolean.
    Bool,
    /// Single Unicode scalar.
    Char,
    /// Homogeneous sequence.
    List,
    /// A type the crate knows nothing about.
    Opaque,
}

impl Kind {
    /// Returns `true` for the numeric kinds, which are compatible across
    /// widths.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Uint | Kind::Float)
    }

    /// Returns `true` for the kinds the comparator can order.
    pub fn is_ordered(self) -> bool {
        matches!(self, Kind::Int | Kind::Uint | Kind::Float | Kind::String)
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::List => "list",
            Kind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact declared type of a record field or operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
    Char,
    String,
    /// `Vec<T>` of the inner type.
    List(Box<FieldType>),
    /// A field whose type does not take part in filtering, named for
    /// diagnostics only.
    Opaque(&'static str),
}

impl FieldType {
    /// Collapses this type into its reduced kind.
    pub fn kind(&self) -> Kind {
        match self {
            FieldType::I8 | FieldType::I16 | FieldType::I32 | FieldType::I64 | FieldType::Isize => {
                Kind::Int
            }
            FieldType::U8 | FieldType::U16 | FieldType::U32 | FieldType::U64 | FieldType::Usize => {
                Kind::Uint
            }
            FieldType::F32 | FieldType::F64 => Kind::Float,
            FieldType::Bool => Kind::Bool,
            FieldType::Char => Kind::Char,
            FieldType::String => Kind::String,
            FieldType::List(_) => Kind::List,
            FieldType::Opaque(_) => Kind::Opaque,
        }
    }

    /// Returns `true` if an operand of type `operand` may be compared
    /// against a field of this type.
    ///
    /// Numeric kinds only need the same reduced kind; everything else must
    /// match exactly.
    pub fn accepts(&self, operand: &FieldType) -> bool {
        let kind = self.kind();
        if kind.is_numeric() {
            kind == operand.kind()
        } else {
            self == operand
        }
    }

    /// Returns `true` if `datum` is a value of this type's reduced kind.
    ///
    /// Lists are checked element by element. No datum is ever opaque.
    pub fn holds(&self, datum: &Datum) -> bool {
        match (self, datum) {
            (FieldType::List(inner), Datum::List(items)) => {
                items.iter().all(|item| inner.holds(item))
            }
            (FieldType::List(_), _) | (FieldType::Opaque(_), _) => false,
            _ => self.kind() == datum.kind(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::I8 => f.write_str("i8"),
            FieldType::I16 => f.write_str("i16"),
            FieldType::I32 => f.write_str("i32"),
            FieldType::I64 => f.write_str("i64"),
            FieldType::Isize => f.write_str("isize"),
            FieldType::U8 => f.write_str("u8"),
            FieldType::U16 => f.write_str("u16"),
            FieldType::U32 => f.write_str("u32"),
            FieldType::U64 => f.write_str("u64"),
            FieldType::Usize => f.write_str("usize"),
            FieldType::F32 => f.write_str("f32"),
            FieldType::F64 => f.write_str("f64"),
            FieldType::Bool => f.write_str("bool"),
            FieldType::Char => f.write_str("char"),
            FieldType::String => f.write_str("String"),
            FieldType::List(inner) => write!(f, "Vec<{}>", inner),
            FieldType::Opaque(name) => f.write_str(name),
        }
    }
}

/// Field value borrowed from a record.
///
/// Integers are widened to 64 bits and floats to `f64`, so a value carries
/// its reduced kind rather than its declared width.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point.
    Float(f64),
    /// String (borrowed).
    Str(&'a str),
    /// Boolean.
    Bool(bool),
    /// Character.
    Char(char),
    /// Sequence of values.
    List(Vec<Value<'a>>),
}

impl<'a> Value<'a> {
    /// Returns the reduced kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::Bool(_) => Kind::Bool,
            Value::Char(_) => Kind::Char,
            Value::List(_) => Kind::List,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(*s),
            _ => None,
        }
    }
}

/// Owned operand value stored inside a predicate.
///
/// Unlike [`Value`], which borrows from the record, `Datum` owns its data so
/// predicates can outlive the collections they filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point.
    Float(f64),
    /// String.
    String(String),
    /// Boolean.
    Bool(bool),
    /// Character.
    Char(char),
    /// Sequence of data.
    List(Vec<Datum>),
}

impl Datum {
    /// Returns the reduced kind of this datum.
    pub fn kind(&self) -> Kind {
        match self {
            Datum::Int(_) => Kind::Int,
            Datum::Uint(_) => Kind::Uint,
            Datum::Float(_) => Kind::Float,
            Datum::String(_) => Kind::String,
            Datum::Bool(_) => Kind::Bool,
            Datum::Char(_) => Kind::Char,
            Datum::List(_) => Kind::List,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

// Deep structural equality between a field value and an operand.
impl PartialEq<Datum> for Value<'_> {
    fn eq(&self, other: &Datum) -> bool {
        match (self, other) {
            (Value::Int(a), Datum::Int(b)) => a == b,
            (Value::Uint(a), Datum::Uint(b)) => a == b,
            (Value::Float(a), Datum::Float(b)) => a == b,
            (Value::Str(a), Datum::String(b)) => *a == b.as_str(),
            (Value::Bool(a), Datum::Bool(b)) => a == b,
            (Value::Char(a), Datum::Char(b)) => a == b,
            (Value::List(a), Datum::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_collapse_into_reduced_kinds() {
        for ty in [
            FieldType::I8,
            FieldType::I16,
            FieldType::I32,
            FieldType::I64,
            FieldType::Isize,
        ] {
            assert_eq!(ty.kind(), Kind::Int);
        }
        for ty in [
            FieldType::U8,
            FieldType::U16,
            FieldType::U32,
            FieldType::U64,
            FieldType::Usize,
        ] {
            assert_eq!(ty.kind(), Kind::Uint);
        }
        assert_eq!(FieldType::F32.kind(), Kind::Float);
        assert_eq!(FieldType::F64.kind(), Kind::Float);
        assert_eq!(FieldType::String.kind(), Kind::String);
        assert_eq!(FieldType::List(Box::new(FieldType::U8)).kind(), Kind::List);
    }

    #[test]
    fn numeric_types_accept_any_width_of_same_signedness() {
        assert!(FieldType::I8.accepts(&FieldType::I64));
        assert!(FieldType::U64.accepts(&FieldType::U16));
        assert!(FieldType::F32.accepts(&FieldType::F64));

        assert!(!FieldType::I64.accepts(&FieldType::U64));
        assert!(!FieldType::U32.accepts(&FieldType::F64));
        assert!(!FieldType::I32.accepts(&FieldType::String));
    }

    #[test]
    fn other_types_require_exact_match() {
        let strings = FieldType::List(Box::new(FieldType::String));
        assert!(strings.accepts(&FieldType::List(Box::new(FieldType::String))));
        assert!(!strings.accepts(&FieldType::List(Box::new(FieldType::Char))));
        // Element widths matter inside a list.
        let bytes = FieldType::List(Box::new(FieldType::U8));
        assert!(!bytes.accepts(&FieldType::List(Box::new(FieldType::U64))));
        assert!(FieldType::Bool.accepts(&FieldType::Bool));
        assert!(!FieldType::Bool.accepts(&FieldType::Char));
    }

    #[test]
    fn types_hold_data_of_their_kind() {
        assert!(FieldType::I8.holds(&Datum::Int(300)));
        assert!(!FieldType::I64.holds(&Datum::Uint(2)));
        assert!(!FieldType::String.holds(&Datum::Int(7)));
        let strings = FieldType::List(Box::new(FieldType::String));
        assert!(strings.holds(&Datum::List(vec![Datum::String("a".into())])));
        assert!(strings.holds(&Datum::List(vec![])));
        assert!(!strings.holds(&Datum::List(vec![Datum::Char('a')])));
        assert!(!strings.holds(&Datum::String("a".into())));
        assert!(!FieldType::Opaque("Mutex<u8>").holds(&Datum::Bool(true)));
    }

    #[test]
    fn field_type_display() {
        assert_eq!(FieldType::I64.to_string(), "i64");
        assert_eq!(FieldType::String.to_string(), "String");
        assert_eq!(
            FieldType::List(Box::new(FieldType::String)).to_string(),
            "Vec<String>"
        );
        assert_eq!(FieldType::Opaque("Mutex<u8>").to_string(), "Mutex<u8>");
    }

    #[test]
    fn value_equals_datum_deeply() {
        assert_eq!(Value::Int(3), Datum::Int(3));
        assert_ne!(Value::Int(3), Datum::Uint(3));
        assert_eq!(Value::Str("two"), Datum::String("two".into()));

        let list = Value::List(vec![Value::Str("a1"), Value::Str("a3")]);
        assert_eq!(
            list,
            Datum::List(vec![Datum::String("a1".into()), Datum::String("a3".into())])
        );
        assert_ne!(list, Datum::List(vec![Datum::String("a1".into())]));
    }

    #[test]
    fn nan_is_never_equal() {
        assert_ne!(Value::Float(f64::NAN), Datum::Float(f64::NAN));
    }
}
