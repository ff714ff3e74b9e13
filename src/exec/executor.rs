use crate::config::types::{BuildError, BuildOptions, Result};
/// Blocking execution of synthesized toolchain commands
use serde::{Deserialize, Serialize};
use std::process::{Command, Output, Stdio};
use std::time::Instant;

/// Pipeline stage a step belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Compile,
    Link,
}

/// How a step was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// The external tool ran to completion
    Completed,
    /// Dry run: command recorded, nothing spawned
    Planned,
    /// Compile skipped because the object is newer than its source
    Fresh,
}

/// Record of one compile or link step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepRecord {
    pub kind: StepKind,
    pub status: StepStatus,
    /// Full argv, program name first
    pub command: Vec<String>,
    /// Exit code (absent when signaled, planned, or fresh)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Signal that terminated the tool (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Wall clock time of the invocation (in seconds)
    pub wall_time: f64,
    pub success: bool,
}

impl StepRecord {
    fn from_output(kind: StepKind, command: Vec<String>, output: Output, wall_time: f64) -> Self {
        let signal = {
            #[cfg(unix)]
            {
                use std::os::unix::process::ExitStatusExt;
                output.status.signal()
            }
            #[cfg(not(unix))]
            {
                None
            }
        };

        Self {
            kind,
            status: StepStatus::Completed,
            command,
            exit_code: output.status.code(),
            signal,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            wall_time,
            success: output.status.success(),
        }
    }

    fn unexecuted(kind: StepKind, status: StepStatus, command: Vec<String>) -> Self {
        Self {
            kind,
            status,
            command,
            exit_code: None,
            signal: None,
            stdout: String::new(),
            stderr: String::new(),
            wall_time: 0.0,
            success: true,
        }
    }

    /// Record for a compile skipped by the freshness check.
    pub fn fresh(kind: StepKind, command: Vec<String>) -> Self {
        Self::unexecuted(kind, StepStatus::Fresh, command)
    }

    /// Human-readable termination description for failure reporting.
    pub fn status_label(&self) -> String {
        match (self.exit_code, self.signal) {
            (Some(code), _) => format!("exit code {}", code),
            (None, Some(signal)) => format!("signal {}", signal),
            _ => "unknown status".to_string(),
        }
    }
}

/// Runs synthesized commands one at a time, blocking until each completes.
///
/// Holds no per-operation state; a hung tool blocks the calling step, no
/// timeout or retry semantics are defined here.
pub struct StepExecutor {
    options: BuildOptions,
}

impl StepExecutor {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Spawn `argv` and wait for it, capturing both output streams.
    ///
    /// Returns Ok even for nonzero exits; callers inspect `success`. Errors
    /// are reserved for spawn failures (missing tool, IO).
    pub fn run(&self, kind: StepKind, argv: &[String]) -> Result<StepRecord> {
        if argv.is_empty() {
            return Err(BuildError::Config("empty command".to_string()));
        }

        log::info!("{}", render_command(argv));
        if self.options.dry_run {
            return Ok(StepRecord::unexecuted(
                kind,
                StepStatus::Planned,
                argv.to_vec(),
            ));
        }

        let started = Instant::now();
        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => BuildError::MissingTool(argv[0].clone()),
                _ => BuildError::Io(e),
            })?;

        let record =
            StepRecord::from_output(kind, argv.to_vec(), output, started.elapsed().as_secs_f64());
        if !record.success {
            log::warn!("{} failed with {}", argv[0], record.status_label());
        }
        Ok(record)
    }
}

/// Render an argv for logs.
pub fn render_command(argv: &[String]) -> String {
    argv.join(" ")
}
