//! In-process stand-in for the GraphRAG toolkit.

#![allow(dead_code)]

use anyhow::{bail, Result};
use std::path::Path;
use std::sync::Mutex;

use graphrag_api::engine::{GraphEngine, IndexOptions, QueryParams};

/// Roughly what `graphrag init` writes.
pub const DEFAULT_SETTINGS: &str = "\
models:
  default_chat_model:
    type: openai_chat
    api_key: ${GRAPHRAG_API_KEY}
    model: gpt-4-turbo-preview
  default_embedding_model:
    type: openai_embedding
    api_key: ${GRAPHRAG_API_KEY}
    model: text-embedding-3-small
input:
  type: file
  file_type: text
  base_dir: input
output:
  type: file
  base_dir: output
";

pub struct FakeEngine {
    pub settings: String,
    pub fail_init: bool,
    pub fail_index: bool,
    pub index_calls: Mutex<Vec<IndexOptions>>,
    pub query_calls: Mutex<Vec<QueryParams>>,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            settings: DEFAULT_SETTINGS.to_string(),
            fail_init: false,
            fail_index: false,
            index_calls: Mutex::new(Vec::new()),
            query_calls: Mutex::new(Vec::new()),
        }
    }
}

impl GraphEngine for FakeEngine {
    fn initialize(&self, root: &Path) -> Result<()> {
        if self.fail_init {
            bail!("init exploded");
        }
        std::fs::write(root.join("settings.yaml"), &self.settings)?;
        std::fs::write(root.join(".env"), "GRAPHRAG_API_KEY=<API_KEY>\n")?;
        Ok(())
    }

    fn index(&self, root: &Path, options: &IndexOptions) -> Result<()> {
        self.index_calls.lock().unwrap().push(options.clone());
        if self.fail_index {
            bail!("pipeline crashed");
        }
        if !options.dry_run {
            std::fs::create_dir_all(root.join("output"))?;
            std::fs::write(root.join("output").join("entities.parquet"), b"fake")?;
        }
        Ok(())
    }

    fn query(&self, _root: &Path, params: &QueryParams) -> Result<String> {
        self.query_calls.lock().unwrap().push(params.clone());
        Ok(format!("{} answer to: {}", params.method, params.query))
    }
}
