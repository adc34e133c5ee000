use clap::{Parser, Subcommand};
use serde_json::{Map, Value as JsonValue, json};
use tracing::info;

use udafkit::engine::aggregate::FunctionRegistry;
use udafkit::engine::aggregate::runner::{AggregateQuery, AggregationRunner, Row, RunOptions};
use udafkit::engine::errors::PlanError;
use udafkit::engine::hooks::HookChain;
use udafkit::engine::types::TypeDescriptor;
use udafkit::logging;
use udafkit::shared::config::CONFIG;

#[derive(Parser)]
#[command(name = "udafkit")]
#[command(about = "Run pluggable aggregate functions through a local map/combine/reduce pipeline", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered aggregate functions and the argument types they accept
    Functions,

    /// Aggregate literal values, grouped by an optional `group=` prefix
    Run {
        /// Registered function name, e.g. my_avg
        #[arg(short, long)]
        function: String,

        /// Declared SQL type of the argument, e.g. int, string, array<int>
        #[arg(short = 't', long, default_value = "double")]
        arg_type: String,

        /// Map-side partitions (defaults to aggregate.default_partitions)
        #[arg(short, long)]
        partitions: Option<usize>,

        /// Aggregate in a single INGEST_TO_FINAL pass
        #[arg(long)]
        single_stage: bool,

        /// Insert a combiner stage (defaults to aggregate.combine)
        #[arg(long)]
        combine: Option<bool>,

        /// Query text handed to hooks (redacted before use)
        #[arg(long)]
        query: Option<String>,

        /// Values as `value` or `group=value`; `null` is SQL NULL
        values: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = logging::init(&CONFIG.logging)?;
    info!("udafkit starting");

    let registry = FunctionRegistry::with_builtins();

    match args.command {
        Command::Functions => {
            let listing: Vec<JsonValue> = registry
                .functions()
                .map(|f| {
                    json!({
                        "name": f.name(),
                        "kind": f.kind().as_str(),
                        "accepts": f.kind().accepted().iter().map(|c| c.type_name()).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::Run {
            function,
            arg_type,
            partitions,
            single_stage,
            combine,
            query,
            values,
        } => {
            let hooks = HookChain::from_config(&CONFIG.hooks)?;
            let descriptor: TypeDescriptor = arg_type.parse()?;
            let rows = parse_rows(&values, &descriptor)?;

            let mut opts = RunOptions::from_config(&CONFIG.aggregate);
            opts.single_stage = single_stage;
            if let Some(p) = partitions {
                opts.partitions = p;
            }
            if let Some(c) = combine {
                opts.combine = c;
            }

            let mut aggregate_query =
                AggregateQuery::new(format!("udafkit_{}", std::process::id()), &function, vec![descriptor]);
            if let Some(text) = query {
                aggregate_query = aggregate_query.with_text(text);
            }
            if let Ok(user) = std::env::var("USER") {
                aggregate_query = aggregate_query.with_user(user);
            }

            let runner = AggregationRunner::new(&registry, &hooks);
            let result = runner.run(&aggregate_query, &rows, opts)?;

            let mut out = Map::new();
            for (group, value) in &result {
                out.insert(group.clone(), value.to_json());
            }
            println!("{}", serde_json::to_string_pretty(&JsonValue::Object(out))?);
        }
    }

    Ok(())
}

/// Values of a non-primitive argument type are not parsed; the validator
/// rejects such a call before any row is read.
fn parse_rows(values: &[String], descriptor: &TypeDescriptor) -> Result<Vec<Row>, PlanError> {
    let Some(category) = descriptor.primitive() else {
        return Ok(Vec::new());
    };
    values.iter().map(|v| Row::parse(v, category)).collect()
}
