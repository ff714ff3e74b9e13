/// Run-scoped directories for intermediate object files
use crate::config::types::Result;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Holds the object files of one build step.
///
/// A caller-supplied directory is used as-is and never removed. Temporary
/// workspaces live under `$TMPDIR/goext/<uuid>`, are created lazily (so a
/// dry run touches nothing), are removed by [`finish`](Self::finish) after a
/// successful build, and are deliberately left behind after a failed one.
#[derive(Debug)]
pub struct BuildWorkspace {
    root: PathBuf,
    owned: bool,
    created: bool,
    allocated: Vec<PathBuf>,
}

impl BuildWorkspace {
    /// Workspace in a unique temporary directory.
    pub fn temp() -> Self {
        let run_id = Uuid::new_v4().to_string();
        Self {
            root: std::env::temp_dir().join("goext").join(run_id),
            owned: true,
            created: false,
            allocated: Vec::new(),
        }
    }

    /// Workspace in a caller-supplied directory.
    pub fn at(dir: PathBuf) -> Self {
        Self {
            root: dir,
            owned: false,
            created: false,
            allocated: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True for a temporary directory that exists on disk.
    pub fn is_ephemeral(&self) -> bool {
        self.owned && self.created
    }

    /// Create the directory if it does not exist yet.
    pub fn ensure_created(&mut self) -> Result<()> {
        if !self.created {
            fs::create_dir_all(&self.root)?;
            self.created = true;
        }
        Ok(())
    }

    /// Allocate a distinct object path for `source`: the source stem plus
    /// `.o`, with a numeric suffix when two sources share a stem.
    pub fn object_path(&mut self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("object");
        let mut candidate = self.root.join(format!("{}.o", stem));
        let mut counter = 1;
        while self.allocated.contains(&candidate) {
            candidate = self.root.join(format!("{}-{}.o", stem, counter));
            counter += 1;
        }
        self.allocated.push(candidate.clone());
        candidate
    }

    /// Remove an owned workspace after a successful build.
    pub fn finish(self) {
        if self.owned && self.created {
            if let Err(e) = fs::remove_dir_all(&self.root) {
                log::warn!(
                    "failed to remove build directory {}: {}",
                    self.root.display(),
                    e
                );
            }
        }
    }
}
