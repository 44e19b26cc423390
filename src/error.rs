use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("{0}")]
    Config(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Jobs ({}) failed", .0.join(", "))]
    JobsFailed(Vec<String>),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("workflow file is empty")]
    EmptyWorkflow,

    #[error("the workflow file is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("the workflow file is not a valid YAML: {0}")]
    InvalidYaml(#[source] serde_yaml::Error),

    #[error("the workflow file is not a valid workflow: {0}")]
    InvalidWorkflow(#[source] serde_yaml::Error),

    #[error("Jobs ({}) must be added to {job}'s needs or ignored_jobs", .uncovered.join(", "))]
    UncoveredJobs { job: String, uncovered: Vec<String> },
}

/// Failures while reading the workflow file from the repository contents API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("workflow file is not a file: ({status}) {body}")]
    NotAFile { status: u16, body: String },

    #[error("GitHub API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
