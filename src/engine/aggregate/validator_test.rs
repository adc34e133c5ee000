use crate::engine::aggregate::plan::{FunctionKind, ReducerKind};
use crate::engine::aggregate::validator::validate;
use crate::engine::errors::PlanError;
use crate::engine::types::{PrimitiveCategory, TypeDescriptor};

fn ty(s: &str) -> TypeDescriptor {
    s.parse().unwrap()
}

#[test]
fn rejects_zero_and_two_arguments() {
    assert_eq!(
        validate("my_avg", FunctionKind::Average, &[]),
        Err(PlanError::Arity(0))
    );
    assert_eq!(
        validate("my_sum", FunctionKind::Sum, &[ty("int"), ty("int")]),
        Err(PlanError::Arity(2))
    );
}

#[test]
fn rejects_non_primitive_argument() {
    for raw in ["array<int>", "map<string,int>", "struct<a:int>", "uniontype<int,string>"] {
        let err = validate("my_avg", FunctionKind::Average, &[ty(raw)]).unwrap_err();
        assert_eq!(
            err,
            PlanError::TypeCategory {
                position: 0,
                type_name: raw.to_string(),
            }
        );
    }
}

#[test]
fn type_category_message_names_the_type() {
    let err = validate("my_avg", FunctionKind::Average, &[ty("array<int>")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Only primitive type arguments are accepted but array<int> is passed"
    );
}

#[test]
fn rejects_boolean_for_both_functions() {
    for kind in [FunctionKind::Sum, FunctionKind::Average] {
        let err = validate("f", kind, &[ty("boolean")]).unwrap_err();
        assert!(
            matches!(err, PlanError::UnsupportedType { ref type_name, .. } if type_name == "boolean")
        );
    }
}

#[test]
fn sum_rejects_string_and_timestamp() {
    for raw in ["string", "varchar(20)", "timestamp", "decimal(10,2)", "date", "binary"] {
        assert!(
            matches!(
                validate("my_sum", FunctionKind::Sum, &[ty(raw)]),
                Err(PlanError::UnsupportedType { .. })
            ),
            "{} should be rejected",
            raw
        );
    }
}

#[test]
fn average_accepts_string_and_timestamp() {
    for raw in ["string", "char(3)", "timestamp"] {
        let plan = validate("my_avg", FunctionKind::Average, &[ty(raw)]).unwrap();
        assert_eq!(plan.reducer, ReducerKind::Average);
    }
}

#[test]
fn sum_reducer_follows_argument_type() {
    for (raw, reducer) in [
        ("tinyint", ReducerKind::LongSum),
        ("smallint", ReducerKind::LongSum),
        ("int", ReducerKind::LongSum),
        ("bigint", ReducerKind::LongSum),
        ("float", ReducerKind::DoubleSum),
        ("double", ReducerKind::DoubleSum),
    ] {
        let plan = validate("my_sum", FunctionKind::Sum, &[ty(raw)]).unwrap();
        assert_eq!(plan.reducer, reducer, "{}", raw);
    }
}

#[test]
fn plan_records_call_site() {
    let plan = validate("my_avg2", FunctionKind::Average, &[ty("bigint")]).unwrap();
    assert_eq!(plan.function, "my_avg2");
    assert_eq!(plan.kind, FunctionKind::Average);
    assert_eq!(plan.argument, PrimitiveCategory::Long);
}
