use std::sync::Arc;

use crate::config::Config;
use crate::engine::{GraphEngine, GraphRagCli};
use crate::workspace::Workspace;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub workspace: Workspace,
}

impl AppState {
    /// State backed by the `graphrag` program named in the config.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let engine = Arc::new(GraphRagCli::new(config.graphrag_bin.clone()));
        Self::with_engine(config, engine)
    }

    pub fn with_engine(config: Config, engine: Arc<dyn GraphEngine>) -> anyhow::Result<Self> {
        let workspace = Workspace::open(config.projects_dir.clone(), engine)?;
        Ok(Self {
            config: Arc::new(config),
            workspace,
        })
    }
}
