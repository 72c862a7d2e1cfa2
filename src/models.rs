use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// LLM provider a project is configured for
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    #[default]
    Openai,
    Azure,
}

/// Retrieval strategy for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    Local,
    Global,
}

impl SearchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Local => "local",
            SearchMethod::Global => "global",
        }
    }
}

impl FromStr for SearchMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(SearchMethod::Local),
            "global" => Ok(SearchMethod::Global),
            other => Err(format!("Invalid search method: {other}")),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indexing pipeline variant passed through to the toolkit
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IndexingMethod {
    #[default]
    Standard,
    Fast,
    StandardUpdate,
    FastUpdate,
}

impl IndexingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexingMethod::Standard => "standard",
            IndexingMethod::Fast => "fast",
            IndexingMethod::StandardUpdate => "standard-update",
            IndexingMethod::FastUpdate => "fast-update",
        }
    }
}

/// Create-project request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub text_content: String,
    pub api_key: Option<String>,
    #[serde(default)]
    pub llm: LlmProvider,
    pub azure_api_base: Option<String>,
    pub azure_api_version: Option<String>,
    pub azure_deployment_name: Option<String>,
}

/// Index request; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndexRequest {
    pub method: IndexingMethod,
    pub memory_profile: bool,
    pub dry_run: bool,
    pub output_dir: Option<String>,
    pub verbose: bool,
}

/// Query request. `method` stays a raw string so unknown values
/// are reported as a bad request instead of a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "global".to_string()
}

/// Generic `{project_id, message}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMessage {
    pub project_id: String,
    pub message: String,
}

/// Query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub project_id: String,
    pub query: String,
    pub method: String,
    pub response: String,
    pub context_data: String,
}

/// A file that could not be stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailedUpload {
    pub filename: String,
    pub reason: String,
}

/// Per-file outcome of an upload batch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UploadResults {
    pub successful: Vec<String>,
    pub failed: Vec<FailedUpload>,
}

impl UploadResults {
    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len()
    }
}

/// Upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub project_id: String,
    pub message: String,
    pub results: UploadResults,
}

/// List-projects response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectList {
    pub projects: Vec<String>,
}

/// A file received in an upload request
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    /// Body of the part, or the reason it could not be read
    pub contents: Result<Vec<u8>, String>,
}
