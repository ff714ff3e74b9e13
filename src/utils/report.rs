/// Stable JSON report schema for build consumers
use crate::config::types::{BuildError, Result};
use crate::exec::executor::{StepKind, StepRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stable JSON build report for callers that consume goext output (v1).
/// This schema is frozen and backward compatible.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildReportV1 {
    /// Schema version (always "1.0" for v1)
    pub schema_version: String,

    /// Language tag reported by the toolchain adapter
    pub language: String,

    /// Final shared artifact path
    pub output: PathBuf,

    /// Intermediate object files, in compile order
    pub objects: Vec<PathBuf>,

    /// Every compile/link step, in execution order
    pub steps: Vec<StepRecord>,
}

impl BuildReportV1 {
    pub fn new(
        language: &str,
        output: PathBuf,
        objects: Vec<PathBuf>,
        steps: Vec<StepRecord>,
    ) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            language: language.to_string(),
            output,
            objects,
            steps,
        }
    }

    /// Steps belonging to one pipeline stage.
    pub fn steps_of_kind(&self, kind: StepKind) -> Vec<&StepRecord> {
        self.steps.iter().filter(|s| s.kind == kind).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BuildError::Config(format!("Failed to serialize build report: {}", e)))
    }
}
