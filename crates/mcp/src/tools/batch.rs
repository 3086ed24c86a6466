// Batch fan-out and result reduction

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::future::Future;
use std::str::FromStr;

/// Outcome of one batch item: the remote response, or a rendered failure.
pub type ItemOutcome = Result<Value, String>;

/// How a batch turns per-item outcomes into a single envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPolicy {
    /// Any failed item fails the whole batch; other results are discarded.
    #[default]
    AllOrNothing,
    /// Every item is reported; failures become `{"error": "..."}` entries.
    PartialSuccess,
}

impl fmt::Display for BatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchPolicy::AllOrNothing => f.write_str("all-or-nothing"),
            BatchPolicy::PartialSuccess => f.write_str("partial-success"),
        }
    }
}

impl FromStr for BatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all-or-nothing" => Ok(BatchPolicy::AllOrNothing),
            "partial-success" => Ok(BatchPolicy::PartialSuccess),
            other => Err(format!(
                "unknown batch policy '{}', expected 'all-or-nothing' or 'partial-success'",
                other
            )),
        }
    }
}

/// Run one future per item concurrently and collect outcomes in input order.
pub async fn fan_out<T, F, Fut>(items: Vec<T>, run: F) -> Vec<ItemOutcome>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = ItemOutcome>,
{
    join_all(items.into_iter().map(run)).await
}

/// Reduce per-item outcomes according to `policy`.
///
/// Under [`BatchPolicy::AllOrNothing`] the first failure in input order is
/// returned. Output order always matches input order.
pub fn reduce_batch(policy: BatchPolicy, outcomes: Vec<ItemOutcome>) -> Result<Vec<Value>, String> {
    match policy {
        BatchPolicy::AllOrNothing => outcomes.into_iter().collect(),
        BatchPolicy::PartialSuccess => Ok(outcomes
            .into_iter()
            .map(|outcome| outcome.unwrap_or_else(|error| json!({ "error": error })))
            .collect()),
    }
}
