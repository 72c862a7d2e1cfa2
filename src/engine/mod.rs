//! Seam between the workspace and the external GraphRAG toolkit.
//!
//! Every method blocks until the toolkit finishes; async callers run them
//! through `tokio::task::spawn_blocking`.

pub mod cli;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::models::{IndexingMethod, SearchMethod};

pub use cli::GraphRagCli;

/// Community level used for every query.
pub const DEFAULT_COMMUNITY_LEVEL: u32 = 2;

/// Shape of the generated answer.
pub const DEFAULT_RESPONSE_TYPE: &str = "Multiple Paragraphs";

/// Options for an indexing run.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    pub method: IndexingMethod,
    pub memory_profile: bool,
    /// Validate configuration only; do not run the pipeline.
    pub dry_run: bool,
    pub output_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Parameters for a single query.
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub method: SearchMethod,
    pub query: String,
    pub community_level: u32,
    pub response_type: String,
    pub streaming: bool,
}

impl QueryParams {
    pub fn new(method: SearchMethod, query: impl Into<String>) -> Self {
        Self {
            method,
            query: query.into(),
            community_level: DEFAULT_COMMUNITY_LEVEL,
            response_type: DEFAULT_RESPONSE_TYPE.to_string(),
            streaming: false,
        }
    }
}

/// Operations the workspace needs from the indexing toolkit.
pub trait GraphEngine: Send + Sync {
    /// Write the toolkit's default configuration (`settings.yaml`, `.env`) into `root`.
    fn initialize(&self, root: &Path) -> Result<()>;

    /// Run (or, with `dry_run`, validate) the indexing pipeline for `root`.
    fn index(&self, root: &Path, options: &IndexOptions) -> Result<()>;

    /// Answer a query against the indexed artifacts under `root`.
    fn query(&self, root: &Path, params: &QueryParams) -> Result<String>;
}
