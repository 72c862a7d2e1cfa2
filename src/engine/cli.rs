use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{GraphEngine, IndexOptions, QueryParams};

/// Drives the `graphrag` command-line program as a child process.
#[derive(Debug, Clone)]
pub struct GraphRagCli {
    program: PathBuf,
}

impl GraphRagCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: Vec<OsString>) -> Result<String> {
        let subcommand = args
            .first()
            .map(|a| a.to_string_lossy().to_string())
            .unwrap_or_default();
        tracing::debug!("Running {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .with_context(|| format!("Failed to run {} {subcommand}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} {subcommand} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn init_args(root: &Path) -> Vec<OsString> {
    vec![
        "init".into(),
        "--root".into(),
        root.as_os_str().to_owned(),
        "--force".into(),
    ]
}

fn index_args(root: &Path, options: &IndexOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "index".into(),
        "--root".into(),
        root.as_os_str().to_owned(),
        "--method".into(),
        options.method.as_str().into(),
    ];
    if options.verbose {
        args.push("--verbose".into());
    }
    if options.memory_profile {
        args.push("--memprofile".into());
    }
    if options.dry_run {
        args.push("--dry-run".into());
    }
    if let Some(dir) = &options.output_dir {
        args.push("--output".into());
        args.push(dir.as_os_str().to_owned());
    }
    args
}

fn query_args(root: &Path, params: &QueryParams) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "query".into(),
        "--root".into(),
        root.as_os_str().to_owned(),
        "--method".into(),
        params.method.as_str().into(),
        "--community-level".into(),
        params.community_level.to_string().into(),
        "--response-type".into(),
        params.response_type.clone().into(),
    ];
    if params.streaming {
        args.push("--streaming".into());
    }
    args.push("--query".into());
    args.push(params.query.clone().into());
    args
}

impl GraphEngine for GraphRagCli {
    fn initialize(&self, root: &Path) -> Result<()> {
        self.run(init_args(root))?;
        Ok(())
    }

    fn index(&self, root: &Path, options: &IndexOptions) -> Result<()> {
        let stdout = self.run(index_args(root, options))?;
        if options.verbose && !stdout.is_empty() {
            tracing::info!("graphrag index output for {}:\n{stdout}", root.display());
        }
        Ok(())
    }

    fn query(&self, root: &Path, params: &QueryParams) -> Result<String> {
        self.run(query_args(root, params))
    }
}
