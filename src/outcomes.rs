use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{GateError, Result};

/// Result value GitHub Actions reports for a failed job.
const FAILURE: &str = "failure";

/// Outcome of one upstream job, as found in the `needs` context.
///
/// Only `result` is read; `outputs` and anything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobOutcome {
    pub result: String,
}

impl JobOutcome {
    pub fn is_failure(&self) -> bool {
        self.result == FAILURE
    }
}

/// Outcomes keyed by job name.
pub type Outcomes = BTreeMap<String, JobOutcome>;

/// Decodes the `needs` input, i.e. the JSON rendering of `${{ toJson(needs) }}`.
pub fn parse_outcomes(raw: &str) -> Result<Outcomes> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| GateError::Config(format!("needs is not a valid JSON: {e}")))?;

    serde_json::from_value(value).map_err(|e| {
        GateError::Config(format!(
            "needs must be a mapping of job names to objects with a string \"result\": {e}"
        ))
    })
}

/// Fails if any upstream job failed, naming every failed job in sorted order.
pub fn validate_outcomes(outcomes: &Outcomes) -> Result<()> {
    // BTreeMap iteration is already ordered by job name.
    let failed: Vec<String> = outcomes
        .iter()
        .filter(|(_, outcome)| outcome.is_failure())
        .map(|(name, _)| name.clone())
        .collect();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(GateError::JobsFailed(failed))
    }
}
