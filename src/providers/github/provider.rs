use log::{debug, info};

use crate::auth::Token;
use crate::error::Result;
use crate::workflow::{parse_workflow_data, Workflow, WorkflowRef};

use super::client::GitHubClient;

/// Reads workflow definitions from a GitHub repository.
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    /// Create a new provider against the given REST API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = GitHubClient::new(base_url, token)?;
        Ok(Self { client })
    }

    /// Fetch the workflow file at the pinned revision and decode its job graph.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request fails or GitHub answers with a non-success status
    /// - The path does not resolve to a file
    /// - The content is empty, not base64, not YAML, or not a workflow
    pub async fn fetch_workflow(&self, workflow_ref: &WorkflowRef) -> Result<Workflow> {
        info!(
            "fetching workflow file {} ({}) from {}/{}",
            workflow_ref.path, workflow_ref.ref_, workflow_ref.owner, workflow_ref.repo
        );

        let content = self.client.fetch_file_content(workflow_ref).await?;
        let workflow = parse_workflow_data(&content)?;

        info!("workflow defines {} jobs", workflow.jobs.len());
        for (name, job) in &workflow.jobs {
            if let Some(needs) = &job.needs {
                debug!("job {name} needs {}", needs.names().join(", "));
            }
        }
        Ok(workflow)
    }
}
