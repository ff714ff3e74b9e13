use crate::adapter::toolchain::ToolchainAdapter;
/// Classify, compile, and link orchestration for one shared artifact
use crate::config::types::{BuildError, Result};
use crate::exec::executor::{StepExecutor, StepKind, StepRecord};
use crate::utils::report::BuildReportV1;
use crate::utils::workspace::BuildWorkspace;
use std::fs;
use std::path::{Path, PathBuf};

/// One abstract build request: sources in, one shared artifact out.
#[derive(Clone, Debug, Default)]
pub struct BuildRequest {
    /// Source files to compile, in compile order
    pub sources: Vec<PathBuf>,
    /// Path of the shared artifact to produce
    pub output: PathBuf,
    /// Include directories appended after the adapter defaults
    pub include_dirs: Vec<PathBuf>,
    /// Library search directories for the link step
    pub library_dirs: Vec<PathBuf>,
    /// Libraries to link by name
    pub libraries: Vec<String>,
    /// Directory for intermediate objects; a temporary one is used when unset
    pub build_dir: Option<PathBuf>,
}

/// Drives one build step end to end through a toolchain adapter.
///
/// Single-threaded and blocking: each compile or link is one external
/// process invocation awaited before the next runs. The first failing tool
/// aborts the whole step; there is no retry and no partial-artifact cleanup.
pub struct BuildDriver {
    toolchain: Box<dyn ToolchainAdapter>,
    executor: StepExecutor,
}

impl BuildDriver {
    /// The executor inherits the verbosity/dry-run/force flags the adapter
    /// was constructed with.
    pub fn new(toolchain: Box<dyn ToolchainAdapter>) -> Self {
        let executor = StepExecutor::new(toolchain.options());
        Self { toolchain, executor }
    }

    pub fn toolchain(&self) -> &dyn ToolchainAdapter {
        self.toolchain.as_ref()
    }

    /// Build `request.sources` into one shared artifact at `request.output`.
    pub fn build(&self, request: &BuildRequest) -> Result<BuildReportV1> {
        if request.sources.is_empty() {
            return Err(BuildError::Config("no source files given".to_string()));
        }

        // Refuse unknown extensions before any tool runs.
        for source in &request.sources {
            let tag = self.toolchain.classify_source(source)?;
            log::debug!("classified {} as {}", source.display(), tag);
        }

        let mut workspace = match &request.build_dir {
            Some(dir) => BuildWorkspace::at(dir.clone()),
            None => BuildWorkspace::temp(),
        };

        match self.run_steps(request, &mut workspace) {
            Ok(report) => {
                workspace.finish();
                Ok(report)
            }
            Err(err) => {
                if workspace.is_ephemeral() {
                    log::warn!(
                        "build failed; leaving {} in place for inspection",
                        workspace.root().display()
                    );
                }
                Err(err)
            }
        }
    }

    fn run_steps(
        &self,
        request: &BuildRequest,
        workspace: &mut BuildWorkspace,
    ) -> Result<BuildReportV1> {
        let options = self.toolchain.options();
        let mut steps = Vec::new();
        let mut objects = Vec::new();

        for source in &request.sources {
            let object = workspace.object_path(source);
            let command =
                self.toolchain
                    .compile_command(source, &object, &request.include_dirs)?;

            let record = if !options.force && object_is_fresh(source, &object) {
                log::info!(
                    "skipping {}: object is newer than source",
                    source.display()
                );
                StepRecord::fresh(StepKind::Compile, command)
            } else {
                if !options.dry_run {
                    workspace.ensure_created()?;
                }
                ensure_success(self.executor.run(StepKind::Compile, &command)?)?
            };
            steps.push(record);
            objects.push(object);
        }

        if !options.dry_run {
            if let Some(parent) = request.output.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
        }
        let command = self.toolchain.link_shared_command(
            &objects,
            &request.library_dirs,
            &request.libraries,
            &request.output,
        )?;
        steps.push(ensure_success(self.executor.run(StepKind::Link, &command)?)?);

        Ok(BuildReportV1::new(
            self.toolchain.language(),
            request.output.clone(),
            objects,
            steps,
        ))
    }
}

/// Surface a nonzero tool exit as a build failure, stderr attached.
fn ensure_success(record: StepRecord) -> Result<StepRecord> {
    if record.success {
        return Ok(record);
    }
    Err(BuildError::ToolFailure {
        tool: record.command.first().cloned().unwrap_or_default(),
        status: record.status_label(),
        stderr: record.stderr.trim().to_string(),
    })
}

/// An object is fresh when it exists and is at least as new as its source.
fn object_is_fresh(source: &Path, object: &Path) -> bool {
    let source_mtime = fs::metadata(source).and_then(|m| m.modified());
    let object_mtime = fs::metadata(object).and_then(|m| m.modified());
    match (source_mtime, object_mtime) {
        (Ok(source_mtime), Ok(object_mtime)) => object_mtime >= source_mtime,
        _ => false,
    }
}
