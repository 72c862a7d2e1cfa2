use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const INPUT_DIR: &str = "input";
pub const OUTPUT_DIR: &str = "output";
pub const ENV_FILE: &str = ".env";
pub const SETTINGS_FILE: &str = "settings.yaml";
pub const SOURCE_TEXT_FILE: &str = "source_text.txt";

/// A project workspace on disk.
///
/// `indexed` is captured when the record is loaded, so later checks do not
/// race with the toolkit writing into `output/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Uuid,
    pub root: PathBuf,
    pub indexed: bool,
}

impl Project {
    /// Load the record for `id` under `projects_dir`, or `None` if no such directory exists.
    pub fn load(projects_dir: &Path, id: Uuid) -> Option<Self> {
        let root = projects_dir.join(id.to_string());
        if !root.is_dir() {
            return None;
        }
        let mut project = Self {
            id,
            root,
            indexed: false,
        };
        project.indexed = project.output_dir().exists();
        Some(project)
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.join(INPUT_DIR)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    pub fn env_file(&self) -> PathBuf {
        self.root.join(ENV_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn is_queryable(&self) -> bool {
        self.indexed
    }
}

/// Owns a freshly created project directory until [`ProjectDirGuard::commit`].
///
/// Dropping an uncommitted guard removes the directory tree.
pub struct ProjectDirGuard {
    project: Project,
    committed: bool,
}

impl ProjectDirGuard {
    /// Create `<projects_dir>/<id>/input/`.
    pub fn create(projects_dir: &Path, id: Uuid) -> Result<Self> {
        let project = Project {
            id,
            root: projects_dir.join(id.to_string()),
            indexed: false,
        };
        // Guard exists before the first mkdir so a partial tree is still removed.
        let guard = Self {
            project,
            committed: false,
        };
        let input = guard.project.input_dir();
        std::fs::create_dir_all(&input)
            .with_context(|| format!("Failed to create {}", input.display()))?;
        Ok(guard)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn commit(mut self) -> Project {
        self.committed = true;
        self.project.clone()
    }
}

impl Drop for ProjectDirGuard {
    fn drop(&mut self) {
        if self.committed || !self.project.root.exists() {
            return;
        }
        match std::fs::remove_dir_all(&self.project.root) {
            Ok(()) => tracing::info!("Rolled back partial project {}", self.project.id),
            Err(e) => tracing::warn!(
                "Failed to clean up partial project {}: {e}",
                self.project.id
            ),
        }
    }
}
