/// Core types and the error taxonomy shared across the build pipeline
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Flags accepted at adapter construction and forwarded unchanged to the
/// execution layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildOptions {
    /// Log every synthesized command
    pub verbose: bool,
    /// Record commands without spawning anything
    pub dry_run: bool,
    /// Recompile objects even when they are newer than their sources
    pub force: bool,
}

/// Named function in the build pipeline bound to an external executable.
///
/// Roles an adapter leaves unbound must never be invoked; asking for their
/// command is a checked error, not a silent no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolRole {
    Preprocessor,
    Compiler,
    CompilerShared,
    CompilerCxx,
    LinkerShared,
    LinkerExe,
    Archiver,
    Ranlib,
}

impl ToolRole {
    /// Every role, in pipeline order.
    pub const ALL: [ToolRole; 8] = [
        ToolRole::Preprocessor,
        ToolRole::Compiler,
        ToolRole::CompilerShared,
        ToolRole::CompilerCxx,
        ToolRole::LinkerShared,
        ToolRole::LinkerExe,
        ToolRole::Archiver,
        ToolRole::Ranlib,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolRole::Preprocessor => "preprocessor",
            ToolRole::Compiler => "compiler",
            ToolRole::CompilerShared => "compiler_shared",
            ToolRole::CompilerCxx => "compiler_cxx",
            ToolRole::LinkerShared => "linker_shared",
            ToolRole::LinkerExe => "linker_exe",
            ToolRole::Archiver => "archiver",
            ToolRole::Ranlib => "ranlib",
        }
    }
}

impl fmt::Display for ToolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Custom error types for goext
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized source extension for '{0}'")]
    UnrecognizedSource(String),

    #[error("toolchain role '{role}' is not supported by this adapter")]
    UnsupportedRole { role: ToolRole },

    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailure {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("required tool '{0}' not found on PATH")]
    MissingTool(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for goext operations
pub type Result<T> = std::result::Result<T, BuildError>;
