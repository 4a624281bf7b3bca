//! Predicate sanitization.
//!
//! Sanitizing resolves every field name in a [`Predicate`] against the
//! record [`Schema`], checks operand types and compiles `LIKE` patterns. The
//! result is a [`Plan`], which the evaluator can run without failing.

use std::sync::Arc;

use log::debug;

use crate::compare::CompareOp;
use crate::error::{Result, SiftError};
use crate::like::{Case, LikePattern};
use crate::operand::Operand;
use crate::options::FilterOptions;
use crate::predicate::{Conditions, Predicate, RecordPredicate};
use crate::schema::{FieldInfo, Schema};
use crate::value::{Datum, FieldType, Kind};

/// A sanitized predicate.
pub(crate) enum Plan<R> {
    And(Vec<Plan<R>>),
    Or(Vec<Plan<R>>),
    Eq(Vec<Bound>),
    NotEq(Vec<Bound>),
    Compare(CompareOp, Vec<Bound>),
    Like {
        negated: bool,
        patterns: Vec<PatternBound>,
    },
    Custom(Arc<dyn RecordPredicate<R> + Send + Sync>),
}

/// A field position paired with its operand.
#[derive(Debug, Clone)]
pub(crate) struct Bound {
    pub(crate) position: usize,
    pub(crate) operand: Datum,
}

/// A field position paired with a compiled pattern.
#[derive(Debug, Clone)]
pub(crate) struct PatternBound {
    pub(crate) position: usize,
    pub(crate) pattern: LikePattern,
}

impl<R> Plan<R> {
    /// Number of field tests in the plan.
    pub(crate) fn size(&self) -> usize {
        match self {
            Plan::And(children) | Plan::Or(children) => children.iter().map(Plan::size).sum(),
            Plan::Eq(bounds) | Plan::NotEq(bounds) | Plan::Compare(_, bounds) => bounds.len(),
            Plan::Like { patterns, .. } => patterns.len(),
            Plan::Custom(_) => 1,
        }
    }
}

/// Sanitizes `predicate` against `schema`.
pub(crate) fn sanitize<R>(
    predicate: &Predicate<R>,
    schema: &Schema,
    options: &FilterOptions,
) -> Result<Plan<R>> {
    let plan = sanitize_node(predicate, schema, options)?;
    debug!(
        "sanitized {} predicate into {} field tests",
        predicate.name(),
        plan.size()
    );
    Ok(plan)
}

fn sanitize_node<R>(
    predicate: &Predicate<R>,
    schema: &Schema,
    options: &FilterOptions,
) -> Result<Plan<R>> {
    Ok(match predicate {
        Predicate::And(children) => Plan::And(sanitize_children(children, schema, options)?),
        Predicate::Or(children) => Plan::Or(sanitize_children(children, schema, options)?),
        Predicate::Eq(c) => Plan::Eq(bind(c, schema)?),
        Predicate::NotEq(c) => Plan::NotEq(bind(c, schema)?),
        Predicate::Gt(c) => Plan::Compare(CompareOp::Gt, bind(c, schema)?),
        Predicate::Lt(c) => Plan::Compare(CompareOp::Lt, bind(c, schema)?),
        Predicate::GtOrEq(c) => Plan::Compare(CompareOp::GtOrEq, bind(c, schema)?),
        Predicate::LtOrEq(c) => Plan::Compare(CompareOp::LtOrEq, bind(c, schema)?),
        Predicate::Like(c) => like_plan(c, schema, options, Case::Sensitive, false)?,
        Predicate::NotLike(c) => like_plan(c, schema, options, Case::Sensitive, true)?,
        Predicate::ILike(c) => like_plan(c, schema, options, Case::Insensitive, false)?,
        Predicate::NotILike(c) => like_plan(c, schema, options, Case::Insensitive, true)?,
        Predicate::Custom(test) => Plan::Custom(Arc::clone(test)),
    })
}

fn sanitize_children<R>(
    children: &[Predicate<R>],
    schema: &Schema,
    options: &FilterOptions,
) -> Result<Vec<Plan<R>>> {
    children
        .iter()
        .map(|child| sanitize_node(child, schema, options))
        .collect()
}

fn resolve<'s>(schema: &'s Schema, name: &str) -> Result<&'s FieldInfo> {
    schema
        .lookup(name)
        .ok_or_else(|| SiftError::UnknownField {
            field: name.to_string(),
        })
}

fn check(name: &str, field: &FieldInfo, operand: &Operand) -> Result<()> {
    if field.ty.accepts(operand.field_type()) {
        Ok(())
    } else {
        Err(SiftError::TypeMismatch {
            field: name.to_string(),
            expected: field.ty.clone(),
            actual: operand.field_type().clone(),
        })
    }
}

fn bind(conditions: &Conditions, schema: &Schema) -> Result<Vec<Bound>> {
    conditions
        .iter()
        .map(|(name, operand)| {
            let field = resolve(schema, name)?;
            check(name, field, operand)?;

            // Compare at the field's precision.
            let operand = if field.ty == FieldType::F32 {
                operand.clone().narrow_to_f32()
            } else {
                operand.clone()
            };

            Ok(Bound {
                position: field.position,
                operand: operand.datum().clone(),
            })
        })
        .collect()
}

fn like_plan<R>(
    conditions: &Conditions,
    schema: &Schema,
    options: &FilterOptions,
    case: Case,
    negated: bool,
) -> Result<Plan<R>> {
    let patterns = conditions
        .iter()
        .map(|(name, operand)| {
            let field = resolve(schema, name)?;
            if field.ty.kind() != Kind::String {
                return Err(SiftError::NotAString {
                    field: name.to_string(),
                    ty: field.ty.clone(),
                });
            }
            check(name, field, operand)?;

            let escape = options.escape_char();
            if escape == '%' || escape == '_' {
                return Err(SiftError::InvalidEscape {
                    field: name.to_string(),
                    escape,
                });
            }

            let source = operand.datum().as_str().ok_or_else(|| SiftError::TypeMismatch {
                field: name.to_string(),
                expected: field.ty.clone(),
                actual: operand.field_type().clone(),
            })?;
            let pattern = LikePattern::compile_with(source, case, escape, options.fold())
                    .map_err(|source| SiftError::InvalidPattern {
                        field: name.to_string(),
                        source,
                    })?;

            Ok(PatternBound {
                position: field.position,
                pattern,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Plan::Like { negated, patterns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldDef;

    struct Row;

    fn schema() -> Schema {
        Schema::from_defs(vec![
            FieldDef::new("A", FieldType::I32),
            FieldDef::new("B", FieldType::String).rename("bar"),
            FieldDef::new("tags", FieldType::List(Box::new(FieldType::String))),
            FieldDef::new("ratio", FieldType::F32),
            FieldDef::hidden("secret", "Secret"),
        ])
    }

    fn run(predicate: Predicate<Row>) -> Result<Plan<Row>> {
        sanitize(&predicate, &schema(), &FilterOptions::default())
    }

    #[test]
    fn field_names_are_case_insensitive() {
        let plan = run(Predicate::eq("a", 1i64)).unwrap();
        match plan {
            Plan::Eq(bounds) => {
                assert_eq!(bounds[0].position, 0);
                assert_eq!(bounds[0].operand, Datum::Int(1));
            }
            _ => panic!("expected Eq plan"),
        }
        assert!(run(Predicate::eq("BAR", "x")).is_ok());
    }

    #[test]
    fn unknown_field() {
        let err = run(Predicate::eq("nosuch", 1i64)).err().unwrap();
        assert!(matches!(&err, SiftError::UnknownField { field } if field == "nosuch"));
        assert_eq!(err.to_string(), "record has no field named 'nosuch'");
    }

    #[test]
    fn hidden_fields_are_unknown() {
        let err = run(Predicate::eq("secret", 1i64)).err().unwrap();
        assert!(matches!(err, SiftError::UnknownField { .. }));
    }

    #[test]
    fn declared_name_is_unknown_after_rename() {
        let err = run(Predicate::eq("B", "x")).err().unwrap();
        assert!(matches!(err, SiftError::UnknownField { .. }));
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let err = run(Predicate::eq("A", "value")).err().unwrap();
        assert_eq!(
            err.to_string(),
            "expected field 'A' to have type i32, got String"
        );
    }

    #[test]
    fn signedness_must_match() {
        assert!(run(Predicate::gt("A", 1u64)).is_err());
        assert!(run(Predicate::gt("A", 1i8)).is_ok());
        assert!(run(Predicate::gt("A", 1.0f64)).is_err());
    }

    #[test]
    fn composite_types_must_match_exactly() {
        assert!(run(Predicate::not_eq("tags", vec!["a".to_string()])).is_ok());
        assert!(run(Predicate::not_eq("tags", vec!['a'])).is_err());
        assert!(run(Predicate::not_eq("tags", "a")).is_err());
    }

    #[test]
    fn f32_operands_are_narrowed() {
        match run(Predicate::eq("ratio", 0.1f64)).unwrap() {
            Plan::Eq(bounds) => assert_eq!(bounds[0].operand, Datum::Float(0.1f32 as f64)),
            _ => panic!("expected Eq plan"),
        }
    }

    #[test]
    fn like_requires_string_field() {
        let err = run(Predicate::like("A", "1%")).err().unwrap();
        assert!(matches!(&err, SiftError::NotAString { ty, .. } if *ty == FieldType::I32));
        assert_eq!(
            err.to_string(),
            "LIKE needs a String field, but 'A' has type i32"
        );
        assert!(matches!(
            run(Predicate::like("tags", "a%")).err().unwrap(),
            SiftError::NotAString { .. }
        ));
    }

    #[test]
    fn like_operand_mismatch_names_field_type_first() {
        let err = run(Predicate::ILike(Conditions::new().with("bar", 3i64)))
            .err()
            .unwrap();
        match err {
            SiftError::TypeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, FieldType::String);
                assert_eq!(actual, FieldType::I64);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wildcard_escapes_are_rejected() {
        for escape in ['%', '_'] {
            let options = FilterOptions::new().escape(escape);
            let err = sanitize(&Predicate::<Row>::like("bar", "%"), &schema(), &options)
                .err()
                .unwrap();
            assert!(matches!(err, SiftError::InvalidEscape { escape: e, .. } if e == escape));
        }
        // Only LIKE predicates care about the escape character.
        let options = FilterOptions::new().escape('%');
        assert!(sanitize(&Predicate::<Row>::eq("bar", "x"), &schema(), &options).is_ok());
    }

    #[test]
    fn mislabelled_operands_cannot_be_built() {
        // Operands always hold data of their own type.
        assert!(Operand::from_parts(FieldType::I32, Datum::Uint(2)).is_none());
        assert!(Operand::from_parts(FieldType::String, Datum::Int(7)).is_none());
        let operand = Operand::from_parts(FieldType::I8, Datum::Int(2)).unwrap();
        let predicate = Predicate::Eq(Conditions::new().with("A", operand));
        match run(predicate).unwrap() {
            Plan::Eq(bounds) => assert_eq!(bounds[0].operand, Datum::Int(2)),
            _ => panic!("expected Eq plan"),
        }
    }

    #[test]
    fn like_compiles_patterns() {
        match run(Predicate::not_ilike("bar", "a_")).unwrap() {
            Plan::Like { negated, patterns } => {
                assert!(negated);
                assert_eq!(patterns[0].position, 1);
                assert_eq!(patterns[0].pattern.case(), Case::Insensitive);
            }
            _ => panic!("expected Like plan"),
        }
    }

    #[test]
    fn combinators_fail_on_any_bad_child() {
        let predicate = Predicate::and([
            Predicate::eq("A", 1i64),
            Predicate::or([Predicate::eq("bar", "x"), Predicate::eq("nope", 1i64)]),
        ]);
        let err = run(predicate).err().unwrap();
        assert_eq!(err.field(), "nope");
    }

    #[test]
    fn custom_predicates_skip_the_schema() {
        let plan = run(Predicate::custom(|_: &Row| true)).unwrap();
        assert!(matches!(plan, Plan::Custom(_)));
    }

    #[test]
    fn plan_size_counts_field_tests() {
        let plan = run(Predicate::and([
            Predicate::Eq(Conditions::new().with("A", 1i64).with("bar", "x")),
            Predicate::or([Predicate::lt("A", 3i64)]),
        ]))
        .unwrap();
        assert_eq!(plan.size(), 3);
    }
}
