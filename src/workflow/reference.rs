use std::fmt;

/// Location of a workflow file inside a repository, pinned to a revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRef {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub ref_: String,
}

impl WorkflowRef {
    /// Parses a `GITHUB_WORKFLOW_REF` locator (`<owner>/<repo>/<path>@<ref>`).
    ///
    /// The ref suffix of the locator is discarded and `sha` is used instead,
    /// so the file is read at the exact revision that is running. Missing
    /// segments become empty strings; no validation happens here.
    pub fn parse(locator: &str, sha: &str) -> Self {
        let without_ref = locator.split('@').next().unwrap_or_default();
        let mut parts = without_ref.split('/');

        let owner = parts.next().unwrap_or_default().to_string();
        let repo = parts.next().unwrap_or_default().to_string();
        let path = parts.collect::<Vec<_>>().join("/");

        Self {
            owner,
            repo,
            path,
            ref_: sha.to_string(),
        }
    }
}

impl fmt::Display for WorkflowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}@{}", self.owner, self.repo, self.path, self.ref_)
    }
}
