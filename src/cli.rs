use anyhow::Result;
use clap::{ArgAction, Parser};
use log::info;
use std::path::PathBuf;

use crate::auth::Token;
use crate::config::{
    parse_bool_input, parse_ignored_jobs, Config, GateInput, DEFAULT_GITHUB_API_URL,
};
use crate::gate;
use crate::outcomes::parse_outcomes;

/// Every argument also reads the variable GitHub Actions sets for it, so the
/// binary runs unchanged as an action step.
#[derive(Parser)]
#[command(name = "required-status-check")]
#[command(
    author,
    version,
    about = "Fail when an upstream job failed or a workflow job is missing from the gate's needs",
    long_about = None
)]
pub struct Cli {
    /// Outcomes of the gate's needs, i.e. `${{ toJson(needs) }}`
    #[arg(long, env = "INPUT_NEEDS")]
    needs: String,

    #[arg(long, env = "INPUT_GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    github_token: String,

    /// Also check that every job of the workflow is covered
    #[arg(
        long,
        env = "INPUT_CHECK_WORKFLOW",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_bool_input
    )]
    check_workflow: bool,

    /// Newline-separated jobs exempt from the coverage check
    #[arg(long, env = "INPUT_IGNORED_JOBS", default_value = "")]
    ignored_jobs: String,

    #[arg(long, env = "GITHUB_JOB", default_value = "")]
    job: String,

    #[arg(long, env = "GITHUB_WORKFLOW_REF", default_value = "")]
    workflow_ref: String,

    #[arg(long, env = "GITHUB_WORKFLOW_SHA", default_value = "")]
    workflow_sha: String,

    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Settings file, defaults to ./required-status-check.{toml,json,yaml,yml}
    #[arg(short, long, env = "REQUIRED_STATUS_CHECK_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Resolves arguments and the settings file into a single [`GateInput`].
    fn gate_input(&self) -> Result<GateInput> {
        let config = Config::load(self.config.as_deref())?;
        let outcomes = parse_outcomes(&self.needs)?;

        let mut ignored_jobs = parse_ignored_jobs(&self.ignored_jobs);
        for job in config.coverage.ignored_jobs {
            if !ignored_jobs.contains(&job) {
                ignored_jobs.push(job);
            }
        }

        let api_url = self
            .api_url
            .clone()
            .or(config.github.base_url)
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        Ok(GateInput {
            token: Token::from_input(&self.github_token),
            outcomes,
            check_workflow: self.check_workflow,
            job: self.job.clone(),
            workflow_ref: self.workflow_ref.clone(),
            workflow_sha: self.workflow_sha.clone(),
            ignored_jobs,
            api_url,
        })
    }

    pub async fn execute(&self) -> Result<()> {
        let input = self.gate_input()?;
        gate::run(&input).await?;

        info!("All checks passed");
        Ok(())
    }
}
