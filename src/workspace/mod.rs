//! Project workspace manager.
//!
//! Each project is a directory `<root>/<uuid>/` holding `input/`, the
//! toolkit-generated `settings.yaml` and `.env`, and, once indexed, `output/`.
//! Directory presence is the only persisted state. Nothing here serializes
//! concurrent requests against the same project.

pub mod project;
pub mod settings;

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::config::ProviderFallbacks;
use crate::engine::{GraphEngine, IndexOptions, QueryParams};
use crate::error::WorkspaceError;
use crate::models::{
    CreateProjectRequest, FailedUpload, IncomingFile, IndexRequest, LlmProvider, QueryRequest,
    QueryResponse, SearchMethod, UploadResults,
};

pub use project::{Project, ProjectDirGuard};
use project::SOURCE_TEXT_FILE;
use settings::{write_env_file, AzureChatModel, ProjectSettings};

/// Placeholder returned in place of the toolkit's retrieval context.
pub const CONTEXT_DATA_NOTE: &str =
    "Context data is available but not serialized in this response.";

/// Owns the on-disk tree of every project under a single root directory.
#[derive(Clone)]
pub struct Workspace {
    root: PathBuf,
    engine: Arc<dyn GraphEngine>,
}

/// Provider settings after applying request values over fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedProvider {
    api_key: String,
    azure: Option<AzureChatModel>,
}

impl Workspace {
    pub fn open(root: impl Into<PathBuf>, engine: Arc<dyn GraphEngine>) -> anyhow::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create projects directory {}", root.display()))?;
        Ok(Self { root, engine })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a project by its path id.
    ///
    /// Only the canonical lowercase hyphenated UUID names a project, so each
    /// project is reachable under exactly one id.
    pub fn find(&self, project_id: &str) -> Result<Project, WorkspaceError> {
        let id = Uuid::parse_str(project_id).map_err(|_| WorkspaceError::NotFound)?;
        if id.to_string() != project_id {
            return Err(WorkspaceError::NotFound);
        }
        Project::load(&self.root, id).ok_or(WorkspaceError::NotFound)
    }

    /// Create a project and return its id. Blocks on the toolkit's `init`.
    pub fn create(
        &self,
        req: &CreateProjectRequest,
        fallbacks: &ProviderFallbacks,
    ) -> Result<Uuid, WorkspaceError> {
        let provider = resolve_provider(req, fallbacks)?;

        let id = Uuid::new_v4();
        let guard = ProjectDirGuard::create(&self.root, id)
            .map_err(|e| WorkspaceError::internal("Failed to create project", e))?;

        self.populate(guard.project(), req, &provider)
            .map_err(|e| WorkspaceError::internal("Failed to create project", e))?;

        let project = guard.commit();
        tracing::info!("Created project {} ({:?})", project.id, req.llm);
        Ok(project.id)
    }

    fn populate(
        &self,
        project: &Project,
        req: &CreateProjectRequest,
        provider: &ResolvedProvider,
    ) -> anyhow::Result<()> {
        if !req.text_content.trim().is_empty() {
            let path = project.input_dir().join(SOURCE_TEXT_FILE);
            std::fs::write(&path, &req.text_content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        self.engine
            .initialize(&project.root)
            .context("Project initialization failed")?;

        write_env_file(&project.env_file(), &provider.api_key)?;

        if let Some(azure) = &provider.azure {
            let mut settings = ProjectSettings::load(&project.settings_file())?;
            settings.apply_azure(azure)?;
            settings.save()?;
        }
        Ok(())
    }

    /// Run or validate the indexing pipeline. Blocks until the toolkit returns.
    pub fn index(&self, project_id: &str, req: &IndexRequest) -> Result<String, WorkspaceError> {
        let project = self.find(project_id)?;

        ProjectSettings::load(&project.settings_file())
            .map_err(|e| index_failure(&project, e))?;

        let options = IndexOptions {
            method: req.method,
            memory_profile: req.memory_profile,
            dry_run: req.dry_run,
            output_dir: req
                .output_dir
                .as_deref()
                .map(|dir| resolve_output_dir(&project, dir)),
            verbose: req.verbose,
        };

        tracing::info!(
            "Indexing project {} (method={}, dry_run={})",
            project.id,
            options.method.as_str(),
            options.dry_run
        );
        self.engine
            .index(&project.root, &options)
            .map_err(|e| index_failure(&project, e))?;

        if options.dry_run {
            tracing::info!("Dry run passed for project {}", project.id);
            Ok("Dry run completed. Configuration is valid.".to_string())
        } else {
            tracing::info!("Indexing finished for project {}", project.id);
            Ok("Indexing process started and completed.".to_string())
        }
    }

    /// Answer a query against an indexed project. Blocks until the toolkit returns.
    pub fn query(
        &self,
        project_id: &str,
        req: &QueryRequest,
    ) -> Result<QueryResponse, WorkspaceError> {
        let project = self.find(project_id)?;
        if !project.is_queryable() {
            return Err(WorkspaceError::NotIndexed);
        }
        let method: SearchMethod = req.method.parse().map_err(WorkspaceError::BadRequest)?;

        let params = QueryParams::new(method, req.query.clone());
        let response = self.engine.query(&project.root, &params).map_err(|e| {
            tracing::error!("Query failed for project {}: {e:#}", project.id);
            WorkspaceError::internal("Query failed", e)
        })?;

        Ok(QueryResponse {
            project_id: project.id.to_string(),
            query: req.query.clone(),
            method: method.to_string(),
            response,
            context_data: CONTEXT_DATA_NOTE.to_string(),
        })
    }

    /// Store each file in the project's `input/` under a unique name.
    ///
    /// Per-file failures are collected; the call only fails when nothing was stored.
    pub fn upload(
        &self,
        project_id: &str,
        files: Vec<IncomingFile>,
    ) -> Result<UploadResults, WorkspaceError> {
        let project = self.find(project_id)?;
        let input = project.input_dir();
        std::fs::create_dir_all(&input).map_err(|e| {
            WorkspaceError::internal("Failed to prepare input directory", e.into())
        })?;

        let mut results = UploadResults::default();
        for file in files {
            match store_upload(&input, &file) {
                Ok(stored) => {
                    tracing::info!(
                        "Stored {} as {stored} in project {}",
                        file.filename,
                        project.id
                    );
                    results.successful.push(file.filename);
                }
                Err(reason) => {
                    tracing::error!("Failed to upload {}: {reason}", file.filename);
                    results.failed.push(FailedUpload {
                        filename: file.filename,
                        reason,
                    });
                }
            }
        }

        if results.successful.is_empty() {
            return Err(WorkspaceError::UploadRejected(results));
        }
        Ok(results)
    }

    /// Remove a project's whole directory tree.
    pub fn delete(&self, project_id: &str) -> Result<(), WorkspaceError> {
        let project = self.find(project_id)?;
        std::fs::remove_dir_all(&project.root).map_err(|e| {
            WorkspaceError::internal("Failed to delete project", e.into())
        })?;
        tracing::info!("Deleted project {}", project.id);
        Ok(())
    }

    /// Names of every directory directly under the root, valid project or not.
    ///
    /// Directories whose name is not a canonical UUID are listed here but
    /// cannot be addressed by [`Workspace::find`], so the other operations
    /// report them as not found.
    pub fn list(&self) -> Result<Vec<String>, WorkspaceError> {
        let mut projects = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry
                .map_err(|e| WorkspaceError::internal("Failed to list projects", e.into()))?;
            if entry.file_type().is_dir() {
                projects.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        projects.sort();
        Ok(projects)
    }
}

fn resolve_provider(
    req: &CreateProjectRequest,
    fallbacks: &ProviderFallbacks,
) -> Result<ResolvedProvider, WorkspaceError> {
    let api_key = pick(&req.api_key, &fallbacks.api_key, "api_key", "GRAPHRAG_API_KEY")?;

    let azure = match req.llm {
        LlmProvider::Openai => None,
        LlmProvider::Azure => Some(AzureChatModel {
            api_base: pick(
                &req.azure_api_base,
                &fallbacks.azure_api_base,
                "azure_api_base",
                "AZURE_OPENAI_API_BASE",
            )?,
            api_version: pick(
                &req.azure_api_version,
                &fallbacks.azure_api_version,
                "azure_api_version",
                "AZURE_OPENAI_API_VERSION",
            )?,
            deployment_name: pick(
                &req.azure_deployment_name,
                &fallbacks.azure_deployment_name,
                "azure_deployment_name",
                "AZURE_OPENAI_DEPLOYMENT_NAME",
            )?,
        }),
    };

    Ok(ResolvedProvider { api_key, azure })
}

/// Request value if non-blank, else the fallback, else a validation error.
fn pick(
    requested: &Option<String>,
    fallback: &Option<String>,
    field: &str,
    env_var: &str,
) -> Result<String, WorkspaceError> {
    requested
        .iter()
        .chain(fallback.iter())
        .find(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| {
            WorkspaceError::BadRequest(format!(
                "{field} is required: provide it in the request or set {env_var}"
            ))
        })
}

fn resolve_output_dir(project: &Project, dir: &str) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project.root.join(path)
    }
}

fn index_failure(project: &Project, err: anyhow::Error) -> WorkspaceError {
    tracing::error!("Indexing failed for project {}: {err:#}", project.id);
    WorkspaceError::internal("Indexing failed", err)
}

/// Final path component of a client-supplied filename, if it names a file.
fn sanitize_filename(filename: &str) -> Option<&str> {
    let name = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or("")
        .trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

fn store_upload(input: &Path, file: &IncomingFile) -> Result<String, String> {
    let name = sanitize_filename(&file.filename)
        .ok_or_else(|| format!("Invalid filename: {:?}", file.filename))?;
    let bytes = file.contents.as_ref().map_err(|e| e.clone())?;

    let stored = format!("{}_{name}", Uuid::new_v4());
    std::fs::write(input.join(&stored), bytes).map_err(|e| e.to_string())?;
    Ok(stored)
}
