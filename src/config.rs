use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory holding one subdirectory per project
    pub projects_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Program used to drive the GraphRAG toolkit
    pub graphrag_bin: PathBuf,
    /// Maximum request body size for uploads, in MB
    pub max_upload_mb: usize,
    /// Values used when a create request leaves provider fields empty
    pub fallbacks: ProviderFallbacks,
}

/// Process-wide provider settings consulted when a create request omits them.
///
/// Never serialized back to clients: the API key lives here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderFallbacks {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub azure_api_base: Option<String>,
    pub azure_api_version: Option<String>,
    pub azure_deployment_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("./api_projects"),
            bind_addr: "127.0.0.1:8000".to_string(),
            graphrag_bin: PathBuf::from("graphrag"),
            max_upload_mb: 64,
            fallbacks: ProviderFallbacks::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("GRAPHRAG_API_PROJECTS_DIR") {
            config.projects_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("GRAPHRAG_API_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(bin) = std::env::var("GRAPHRAG_BIN") {
            config.graphrag_bin = PathBuf::from(bin);
        }
        if let Ok(val) = std::env::var("GRAPHRAG_API_MAX_UPLOAD_MB") {
            if let Ok(v) = val.parse() {
                config.max_upload_mb = v;
            }
        }

        config.fallbacks = ProviderFallbacks {
            api_key: non_empty_var("GRAPHRAG_API_KEY"),
            azure_api_base: non_empty_var("AZURE_OPENAI_API_BASE"),
            azure_api_version: non_empty_var("AZURE_OPENAI_API_VERSION"),
            azure_deployment_name: non_empty_var("AZURE_OPENAI_DEPLOYMENT_NAME"),
        };

        config
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
