use log::info;

use crate::config::GateInput;
use crate::error::Result;
use crate::outcomes::validate_outcomes;
use crate::providers::GitHubProvider;
use crate::workflow::{validate_required_fields, validate_workflow, WorkflowRef};

/// Runs the gate once.
///
/// Upstream outcomes are always checked. The workflow file is only fetched
/// when `check_workflow` is set, and any failure aborts the remaining steps.
pub async fn run(input: &GateInput) -> Result<()> {
    log_parameters(input);

    validate_outcomes(&input.outcomes)?;
    if !input.check_workflow {
        return Ok(());
    }

    validate_required_fields(input)?;

    let workflow_ref = WorkflowRef::parse(&input.workflow_ref, &input.workflow_sha);
    let provider = GitHubProvider::new(&input.api_url, input.token.clone())?;
    let workflow = provider.fetch_workflow(&workflow_ref).await?;

    validate_workflow(input, &workflow)
}

fn log_parameters(input: &GateInput) {
    let needs: Vec<&str> = input.outcomes.keys().map(String::as_str).collect();
    info!(
        "parameters:\n  needs: {}\n  check_workflow: {}\n  job: {}\n  ignored_jobs: {}\n  workflow_ref: {}\n  workflow_sha: {}",
        needs.join(", "),
        input.check_workflow,
        input.job,
        input.ignored_jobs.join(", "),
        input.workflow_ref,
        input.workflow_sha
    );
}
