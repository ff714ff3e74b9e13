use crate::adapter::toolchain::{ExecutableSet, LanguageAssociation, ToolchainAdapter};
use crate::config::config::ToolchainConfig;
use crate::config::types::{BuildOptions, Result, ToolRole};
use std::path::{Path, PathBuf};

/// Toolchain adapter that drives gccgo to build Go sources into shared
/// objects loadable by Python.
///
/// Single-language by design: only `.go` sources are recognized, and only
/// the shared-object stages plus the archiver are bound. Preprocessing,
/// C++ compilation, and executable linking stay unbound, so requesting them
/// fails fast instead of degrading silently.
#[derive(Debug)]
pub struct GccgoToolchain {
    options: BuildOptions,
    executables: ExecutableSet,
    include_dirs: Vec<PathBuf>,
    languages: LanguageAssociation,
}

impl GccgoToolchain {
    pub fn new(options: BuildOptions) -> Self {
        Self::with_config(&ToolchainConfig::default(), options)
    }

    /// Build the adapter from explicit toolchain overrides.
    ///
    /// The shared-stage roles carry `-fPIC` and `-shared` themselves; there
    /// is no host build framework around to inject them.
    pub fn with_config(config: &ToolchainConfig, options: BuildOptions) -> Self {
        let executables = ExecutableSet::new()
            .bind(ToolRole::Compiler, vec![config.gccgo.clone()])
            .bind(
                ToolRole::CompilerShared,
                vec![config.gccgo.clone(), "-fPIC".to_string()],
            )
            .bind(
                ToolRole::LinkerShared,
                vec![config.gccgo.clone(), "-shared".to_string()],
            )
            .bind(ToolRole::Archiver, config.archiver.clone());

        Self {
            options,
            executables,
            include_dirs: config.include_dirs.clone(),
            languages: LanguageAssociation::single(".go", "go"),
        }
    }
}

impl ToolchainAdapter for GccgoToolchain {
    fn language(&self) -> &'static str {
        "go"
    }

    fn options(&self) -> BuildOptions {
        self.options
    }

    fn executables(&self) -> &ExecutableSet {
        &self.executables
    }

    fn languages(&self) -> &LanguageAssociation {
        &self.languages
    }

    fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    fn push_include_dir(&mut self, dir: PathBuf) {
        self.include_dirs.push(dir);
    }

    fn include_dir_flag(&self, dir: &str) -> String {
        ["-I", dir].concat()
    }

    fn library_dir_flag(&self, dir: &str) -> String {
        ["-L", dir].concat()
    }

    fn library_flag(&self, name: &str) -> String {
        ["-l", name].concat()
    }

    fn compile_command(
        &self,
        source: &Path,
        object: &Path,
        extra_include_dirs: &[PathBuf],
    ) -> Result<Vec<String>> {
        let mut command = self
            .executables
            .command_for(ToolRole::CompilerShared)?
            .to_vec();
        for dir in self.include_dirs.iter().chain(extra_include_dirs) {
            command.push(self.include_dir_flag(&dir.to_string_lossy()));
        }
        command.push("-c".to_string());
        command.push(source.to_string_lossy().to_string());
        command.push("-o".to_string());
        command.push(object.to_string_lossy().to_string());
        Ok(command)
    }

    fn link_shared_command(
        &self,
        objects: &[PathBuf],
        library_dirs: &[PathBuf],
        libraries: &[String],
        output: &Path,
    ) -> Result<Vec<String>> {
        let mut command = self
            .executables
            .command_for(ToolRole::LinkerShared)?
            .to_vec();
        for object in objects {
            command.push(object.to_string_lossy().to_string());
        }
        // Search directories before library names, standard linker order.
        for dir in library_dirs {
            command.push(self.library_dir_flag(&dir.to_string_lossy()));
        }
        for library in libraries {
            command.push(self.library_flag(library));
        }
        command.push("-o".to_string());
        command.push(output.to_string_lossy().to_string());
        Ok(command)
    }
}
