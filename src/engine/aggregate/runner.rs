use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::engine::aggregate::codec::{PartialFormat, PartialRecord};
use crate::engine::aggregate::evaluator::{Evaluator, StageInput};
use crate::engine::aggregate::mode::AggregationMode;
use crate::engine::aggregate::ops::AggregatorImpl;
use crate::engine::aggregate::plan::AggregatePlan;
use crate::engine::aggregate::registry::FunctionRegistry;
use crate::engine::errors::{PlanError, RunError};
use crate::engine::hooks::{HookChain, HookContext, HookPoint};
use crate::engine::types::{PrimitiveCategory, ScalarValue, TypeDescriptor};
use crate::shared::config::AggregateConfig;

/// Final value per group
pub type GroupedResult = BTreeMap<String, ScalarValue>;

/// Encoded partial record per group, as shipped from one stage to the next
type StagePartials = BTreeMap<String, Vec<u8>>;

type Buffers = BTreeMap<String, AggregatorImpl>;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub group: String,
    pub value: ScalarValue,
}

impl Row {
    pub fn new(group: impl Into<String>, value: ScalarValue) -> Self {
        Self {
            group: group.into(),
            value,
        }
    }

    /// Parses `group=value` or a bare `value` (empty group).
    pub fn parse(raw: &str, category: PrimitiveCategory) -> Result<Self, PlanError> {
        let (group, literal) = raw.split_once('=').unwrap_or(("", raw));
        Ok(Self::new(group, ScalarValue::parse_literal(literal, category)?))
    }
}

/// One aggregate call over an input, as seen by hooks
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateQuery {
    pub id: String,
    pub text: String,
    pub user: String,
    pub function: String,
    pub arg_types: Vec<TypeDescriptor>,
    pub inputs: Vec<String>,
}

impl AggregateQuery {
    pub fn new(id: impl Into<String>, function: &str, arg_types: Vec<TypeDescriptor>) -> Self {
        Self {
            id: id.into(),
            text: format!("SELECT grp, {}(val) FROM input GROUP BY grp", function),
            user: String::new(),
            function: function.to_string(),
            arg_types,
            inputs: vec!["input".to_string()],
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub partitions: usize,
    pub combine: bool,
    /// Skip partial states entirely and aggregate in one INGEST_TO_FINAL pass
    pub single_stage: bool,
    pub format: PartialFormat,
}

impl RunOptions {
    pub fn from_config(cfg: &AggregateConfig) -> Self {
        Self {
            partitions: cfg.default_partitions,
            combine: cfg.combine,
            single_stage: false,
            format: cfg.partial_format,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            partitions: 1,
            combine: false,
            single_stage: false,
            format: PartialFormat::Bincode,
        }
    }
}

/// Drives a grouped aggregation through map, optional combine, and reduce
/// stages in process, firing lifecycle hooks around it.
pub struct AggregationRunner<'a> {
    registry: &'a FunctionRegistry,
    hooks: &'a HookChain,
}

impl<'a> AggregationRunner<'a> {
    pub fn new(registry: &'a FunctionRegistry, hooks: &'a HookChain) -> Self {
        Self { registry, hooks }
    }

    pub fn run(
        &self,
        query: &AggregateQuery,
        rows: &[Row],
        opts: RunOptions,
    ) -> Result<GroupedResult, RunError> {
        let mut ctx = HookContext::new(&query.id, self.hooks.redact(&query.text))
            .with_user(&query.user);
        ctx.inputs = query.inputs.clone();

        info!(target: "udafkit::runner", query_id = %query.id, query = %ctx.query, "running aggregate query");
        self.hooks.fire(HookPoint::PreDriverRun, &ctx);

        let result = self.analyze_and_execute(query, rows, opts, &ctx);
        if let Err(e) = &result {
            e.log_error();
            ctx.error = Some(e.to_string());
            self.hooks.fire(HookPoint::OnFailure, &ctx);
        }

        self.hooks.fire(HookPoint::PostDriverRun, &ctx);
        result
    }

    fn analyze_and_execute(
        &self,
        query: &AggregateQuery,
        rows: &[Row],
        opts: RunOptions,
        ctx: &HookContext,
    ) -> Result<GroupedResult, RunError> {
        self.hooks.fire(HookPoint::PreAnalyze, ctx);
        let plan = self.registry.resolve(&query.function, &query.arg_types)?;
        self.hooks.fire(HookPoint::PostAnalyze, ctx);

        self.hooks.fire(HookPoint::PreExecute, ctx);
        let result = execute(&plan, rows, opts)?;
        self.hooks.fire(HookPoint::PostExecute, ctx);
        Ok(result)
    }
}

/// Runs a validated plan over `rows` without any hooks.
pub fn execute(
    plan: &AggregatePlan,
    rows: &[Row],
    opts: RunOptions,
) -> Result<GroupedResult, RunError> {
    if opts.single_stage {
        let mut evaluator = Evaluator::new(plan.clone(), AggregationMode::IngestToFinal);
        let buffers = ingest(&mut evaluator, rows.iter())?;
        return finish(&evaluator, &buffers);
    }

    let partitions = opts.partitions.max(1);
    let mut stage_outputs = Vec::with_capacity(partitions);
    for p in 0..partitions {
        let mut evaluator = Evaluator::new(plan.clone(), AggregationMode::IngestToPartial);
        let buffers = ingest(&mut evaluator, rows.iter().skip(p).step_by(partitions))?;
        debug!(
            target: "udafkit::runner",
            stage = "map",
            partition = p,
            groups = buffers.len(),
            suppressed = evaluator.suppressed_warnings(),
            "map stage done"
        );
        stage_outputs.push(encode(&evaluator, &buffers, opts.format)?);
    }

    if opts.combine {
        let mut combined = Vec::with_capacity(stage_outputs.len().div_ceil(2));
        for chunk in stage_outputs.chunks(2) {
            let evaluator = Evaluator::new(plan.clone(), AggregationMode::MergeToPartial);
            let buffers = merge(&evaluator, chunk, opts.format)?;
            debug!(target: "udafkit::runner", stage = "combine", inputs = chunk.len(), groups = buffers.len(), "combine stage done");
            combined.push(encode(&evaluator, &buffers, opts.format)?);
        }
        stage_outputs = combined;
    }

    let evaluator = Evaluator::new(plan.clone(), AggregationMode::MergeToFinal);
    let buffers = merge(&evaluator, &stage_outputs, opts.format)?;
    debug!(target: "udafkit::runner", stage = "reduce", inputs = stage_outputs.len(), groups = buffers.len(), "reduce stage done");
    finish(&evaluator, &buffers)
}

fn ingest<'r>(
    evaluator: &mut Evaluator,
    rows: impl Iterator<Item = &'r Row>,
) -> Result<Buffers, RunError> {
    let mut buffers = Buffers::new();
    for row in rows {
        let buffer = buffers
            .entry(row.group.clone())
            .or_insert_with(|| evaluator.new_buffer());
        evaluator.update(buffer, StageInput::Row(&row.value))?;
    }
    Ok(buffers)
}

fn merge(
    evaluator: &Evaluator,
    inputs: &[StagePartials],
    format: PartialFormat,
) -> Result<Buffers, RunError> {
    let mut buffers = Buffers::new();
    for input in inputs {
        for (group, bytes) in input {
            let record: PartialRecord = format.from_bytes(bytes)?;
            let buffer = buffers
                .entry(group.clone())
                .or_insert_with(|| evaluator.new_buffer());
            evaluator.merge(buffer, Some(&record))?;
        }
    }
    Ok(buffers)
}

fn encode(
    evaluator: &Evaluator,
    buffers: &Buffers,
    format: PartialFormat,
) -> Result<StagePartials, RunError> {
    let mut out = StagePartials::new();
    for (group, buffer) in buffers {
        let record = evaluator.terminate_partial(buffer)?;
        out.insert(group.clone(), format.to_bytes(&record)?);
    }
    Ok(out)
}

fn finish(evaluator: &Evaluator, buffers: &Buffers) -> Result<GroupedResult, RunError> {
    let mut out = GroupedResult::new();
    for (group, buffer) in buffers {
        out.insert(group.clone(), evaluator.terminate(buffer)?);
    }
    Ok(out)
}
