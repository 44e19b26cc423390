use std::collections::HashSet;

use crate::config::GateInput;
use crate::error::{GateError, Result};

use super::document::Workflow;

/// Checks the ambient values the coverage check depends on.
///
/// Fields are checked in a fixed order so the first missing one is reported.
pub fn validate_required_fields(input: &GateInput) -> Result<()> {
    if input.job.is_empty() {
        return Err(GateError::MissingField("GITHUB_JOB"));
    }
    if input.workflow_ref.is_empty() {
        return Err(GateError::MissingField("GITHUB_WORKFLOW_REF"));
    }
    if input.workflow_sha.is_empty() {
        return Err(GateError::MissingField("GITHUB_WORKFLOW_SHA"));
    }
    Ok(())
}

/// Fails when the workflow defines jobs the gate neither waits on nor ignores.
///
/// A job is covered when it is one of the gate's `needs`, listed in
/// `ignored_jobs`, or is the gate job itself. Only direct membership counts;
/// `needs` edges of other jobs are not followed.
pub fn validate_workflow(input: &GateInput, workflow: &Workflow) -> Result<()> {
    let covered: HashSet<&str> = input
        .outcomes
        .keys()
        .map(String::as_str)
        .chain(input.ignored_jobs.iter().map(String::as_str))
        .chain(std::iter::once(input.job.as_str()))
        .collect();

    let mut uncovered: Vec<String> = workflow
        .jobs
        .keys()
        .filter(|name| !covered.contains(name.as_str()))
        .cloned()
        .collect();

    if uncovered.is_empty() {
        return Ok(());
    }

    uncovered.sort();
    Err(GateError::UncoveredJobs {
        job: input.job.clone(),
        uncovered,
    })
}
