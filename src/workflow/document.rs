use base64::{engine::general_purpose, Engine as _};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

/// The part of a GitHub Actions workflow file the gate cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    /// Jobs in document order.
    pub jobs: IndexMap<String, Job>,
}

/// A job definition. Everything except `needs` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<Needs>,
}

/// `needs:` accepts either a single job name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Needs {
    One(String),
    Many(Vec<String>),
}

impl Needs {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Needs::One(name) => vec![name.as_str()],
            Needs::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Decodes the base64 `content` field returned by the repository contents API.
///
/// GitHub wraps the payload at 60 columns, so whitespace is dropped before
/// decoding. YAML syntax and workflow shape are checked separately so the
/// error says which of the two is wrong.
pub fn parse_workflow_data(content: &str) -> Result<Workflow> {
    if content.is_empty() {
        return Err(GateError::EmptyWorkflow);
    }

    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = general_purpose::STANDARD.decode(compact)?;
    let text = String::from_utf8_lossy(&bytes);

    let value: serde_yaml::Value = serde_yaml::from_str(&text).map_err(GateError::InvalidYaml)?;
    check_job_bodies(&value).map_err(GateError::InvalidWorkflow)?;

    serde_yaml::from_value(value).map_err(GateError::InvalidWorkflow)
}

/// Every job must be a mapping. A bare `test:` decodes to null, which the
/// typed `Job` would otherwise accept as a job without `needs`.
fn check_job_bodies(value: &serde_yaml::Value) -> std::result::Result<(), serde_yaml::Error> {
    let Some(jobs) = value.get("jobs").and_then(serde_yaml::Value::as_mapping) else {
        return Ok(());
    };

    for (name, body) in jobs {
        if !body.is_mapping() {
            let name = name.as_str().unwrap_or("<non-string key>");
            return Err(serde::de::Error::custom(format!(
                "jobs.{name}: expected a mapping"
            )));
        }
    }
    Ok(())
}
