use anyhow::{bail, Context, Result};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Provider fields written into the chat model block for Azure projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureChatModel {
    pub api_base: String,
    pub api_version: String,
    pub deployment_name: String,
}

/// The toolkit's generated `settings.yaml`, edited structurally.
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    path: PathBuf,
    doc: Value,
}

impl ProjectSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let doc: Value = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if !doc.is_mapping() {
            bail!("{} is not a YAML mapping", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    #[cfg(test)]
    fn value(&self) -> &Value {
        &self.doc
    }

    /// Point every chat model block at Azure OpenAI, keeping unrelated keys.
    ///
    /// Handles both `models.default_chat_model` and the older top-level `llm`.
    pub fn apply_azure(&mut self, azure: &AzureChatModel) -> Result<()> {
        let mut patched = 0;

        if let Some(block) = self
            .doc
            .get_mut("models")
            .and_then(|m| m.get_mut("default_chat_model"))
            .and_then(Value::as_mapping_mut)
        {
            patch_chat_block(block, azure);
            patched += 1;
        }
        if let Some(block) = self.doc.get_mut("llm").and_then(Value::as_mapping_mut) {
            patch_chat_block(block, azure);
            patched += 1;
        }

        if patched == 0 {
            bail!(
                "No chat model block found in {} (expected models.default_chat_model or llm)",
                self.path.display()
            );
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let data = serde_yaml::to_string(&self.doc).context("Failed to serialize settings")?;
        std::fs::write(&self.path, data)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

fn patch_chat_block(block: &mut Mapping, azure: &AzureChatModel) {
    block.insert("type".into(), "azure_openai_chat".into());
    block.insert("api_base".into(), azure.api_base.clone().into());
    block.insert("api_version".into(), azure.api_version.clone().into());
    block.insert("deployment_name".into(), azure.deployment_name.clone().into());
}

/// Write the project's `.env` holding the toolkit API key.
pub fn write_env_file(path: &Path, api_key: &str) -> Result<()> {
    std::fs::write(path, format!("GRAPHRAG_API_KEY={api_key}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))
}
