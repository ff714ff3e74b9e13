use crate::config::types::{BuildError, Result};
/// Toolchain overrides loaded from an optional JSON file
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Invocation name of the external Go compiler.
pub const DEFAULT_GCCGO: &str = "gccgo";

/// Static-archive command bound to the archiver role.
pub const DEFAULT_ARCHIVER: [&str; 2] = ["ar", "-cr"];

/// Include directories every gccgo build consults, in search order.
pub const DEFAULT_INCLUDE_DIRS: [&str; 2] = ["/usr/lib/gccgo", "/usr/local/lib/gccgo"];

/// Overrides for the gccgo toolchain.
///
/// Absent fields fall back to the compile-time defaults above, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// gccgo executable (name on PATH or absolute path)
    #[serde(default = "default_gccgo")]
    pub gccgo: String,
    /// Archiver argv prefix
    #[serde(default = "default_archiver")]
    pub archiver: Vec<String>,
    /// Include search directories, replacing the platform defaults
    #[serde(default = "default_include_dirs")]
    pub include_dirs: Vec<PathBuf>,
}

fn default_gccgo() -> String {
    DEFAULT_GCCGO.to_string()
}

fn default_archiver() -> Vec<String> {
    DEFAULT_ARCHIVER.iter().map(|s| s.to_string()).collect()
}

fn default_include_dirs() -> Vec<PathBuf> {
    DEFAULT_INCLUDE_DIRS.iter().map(PathBuf::from).collect()
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            gccgo: default_gccgo(),
            archiver: default_archiver(),
            include_dirs: default_include_dirs(),
        }
    }
}

impl ToolchainConfig {
    /// Load toolchain overrides from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_content = std::fs::read_to_string(&path)
            .map_err(|e| BuildError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ToolchainConfig = serde_json::from_str(&config_content)
            .map_err(|e| BuildError::Config(format!("Failed to parse config JSON: {}", e)))?;

        Ok(config)
    }
}
