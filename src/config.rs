use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;

use crate::auth::Token;
use crate::outcomes::Outcomes;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Everything one gate run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GateInput {
    pub token: Option<Token>,
    /// Results of the jobs the gate declares in `needs`.
    pub outcomes: Outcomes,
    /// Whether to fetch the workflow file and check that every job is covered.
    pub check_workflow: bool,
    /// Name of the gate job itself (`GITHUB_JOB`).
    pub job: String,
    /// `GITHUB_WORKFLOW_REF`, e.g. `owner/repo/.github/workflows/ci.yml@refs/heads/main`.
    pub workflow_ref: String,
    /// `GITHUB_WORKFLOW_SHA`, the revision the workflow file is read at.
    pub workflow_sha: String,
    /// Jobs exempt from the coverage check.
    pub ignored_jobs: Vec<String>,
    pub api_url: String,
}

/// Optional settings file for the gate.
///
/// Lets a repository keep its exemption list next to the workflow instead
/// of inlining it in every `with:` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub coverage: CoverageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// GitHub API base URL, for GitHub Enterprise Server
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CoverageConfig {
    /// Jobs exempt from the coverage check, merged with the `ignored_jobs` input
    #[serde(default)]
    pub ignored_jobs: Vec<String>,
}

/// Settings files picked up from the working directory when no path is given.
const SETTINGS_FILES: [&str; 4] = [
    "required-status-check.toml",
    "required-status-check.json",
    "required-status-check.yaml",
    "required-status-check.yml",
];

impl Config {
    /// Reads the settings file at `path`, or the first of [`SETTINGS_FILES`]
    /// present in the working directory.
    ///
    /// Without either the gate runs on action inputs alone. A `path` that
    /// cannot be read is an error rather than a silent fallback.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let found = match path {
            Some(path) => Some(path),
            None => SETTINGS_FILES
                .iter()
                .copied()
                .map(Path::new)
                .find(|candidate| candidate.is_file()),
        };

        match found {
            Some(path) => {
                debug!("reading settings from {}", path.display());
                Self::load_from_path(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// The extension picks the format; anything else is tried as TOML, JSON
    /// and YAML in turn.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        let parsed: Result<Self> = match extension {
            "toml" => toml::from_str(&contents).map_err(Into::into),
            "json" => serde_json::from_str(&contents).map_err(Into::into),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(Into::into),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .map_err(Into::into),
        };

        parsed.with_context(|| format!("invalid settings file {}", path.display()))
    }
}

/// Splits the `ignored_jobs` input: one job per line, trimmed, blanks dropped.
pub fn parse_ignored_jobs(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a boolean action input using the YAML 1.2 core schema spellings
/// that GitHub Actions accepts.
pub fn parse_bool_input(raw: &str) -> std::result::Result<bool, String> {
    match raw.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(format!(
            "\"{other}\" is not a boolean: expected one of true | True | TRUE | false | False | FALSE"
        )),
    }
}
