use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Execution mode of one evaluator instance. Fixed for the instance's
/// lifetime; decides whether rows or partial states come in, and whether a
/// partial state or the final scalar goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationMode {
    /// Map side: raw rows in, partial state out.
    IngestToPartial,
    /// Single stage: raw rows in, scalar out.
    IngestToFinal,
    /// Combiner: partial states in, partial state out.
    MergeToPartial,
    /// Reduce side: partial states in, scalar out.
    MergeToFinal,
}

impl AggregationMode {
    pub const ALL: [AggregationMode; 4] = [
        AggregationMode::IngestToPartial,
        AggregationMode::IngestToFinal,
        AggregationMode::MergeToPartial,
        AggregationMode::MergeToFinal,
    ];

    pub fn consumes_rows(&self) -> bool {
        matches!(
            self,
            AggregationMode::IngestToPartial | AggregationMode::IngestToFinal
        )
    }

    pub fn emits_partial(&self) -> bool {
        matches!(
            self,
            AggregationMode::IngestToPartial | AggregationMode::MergeToPartial
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::IngestToPartial => "INGEST_TO_PARTIAL",
            AggregationMode::IngestToFinal => "INGEST_TO_FINAL",
            AggregationMode::MergeToPartial => "MERGE_TO_PARTIAL",
            AggregationMode::MergeToFinal => "MERGE_TO_FINAL",
        }
    }

    /// Name the host engine uses for the same mode.
    pub fn host_name(&self) -> &'static str {
        match self {
            AggregationMode::IngestToPartial => "PARTIAL1",
            AggregationMode::IngestToFinal => "COMPLETE",
            AggregationMode::MergeToPartial => "PARTIAL2",
            AggregationMode::MergeToFinal => "FINAL",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        AggregationMode::ALL
            .into_iter()
            .find(|m| m.as_str() == upper || m.host_name() == upper)
            .ok_or_else(|| format!("unknown aggregation mode: {}", s))
    }
}
