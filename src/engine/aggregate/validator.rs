use tracing::debug;

use crate::engine::aggregate::plan::{AggregatePlan, FunctionKind, ReducerKind};
use crate::engine::errors::PlanError;
use crate::engine::types::TypeDescriptor;

/// Checks the declared argument types of an aggregate call site and picks the
/// reducer. Runs once per call site at plan time.
pub fn validate(
    function: &str,
    kind: FunctionKind,
    args: &[TypeDescriptor],
) -> Result<AggregatePlan, PlanError> {
    let [arg] = args else {
        return Err(PlanError::Arity(args.len()));
    };

    let Some(category) = arg.primitive() else {
        return Err(PlanError::TypeCategory {
            position: 0,
            type_name: arg.type_name(),
        });
    };

    if !kind.accepts(category) {
        return Err(PlanError::UnsupportedType {
            function: function.to_string(),
            position: 0,
            type_name: arg.type_name(),
        });
    }

    let reducer = ReducerKind::for_call(kind, category);
    debug!(
        target: "udafkit::aggregate",
        function,
        argument = category.type_name(),
        ?reducer,
        "validated aggregate call"
    );

    Ok(AggregatePlan {
        function: function.to_string(),
        kind,
        reducer,
        argument: category,
    })
}
