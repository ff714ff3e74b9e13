use crate::config::types::{BuildError, BuildOptions, Result, ToolRole};
use std::path::{Path, PathBuf};

/// Fixed role-to-argv table for one external toolchain.
///
/// Constructed once at adapter initialization and immutable afterwards.
/// Unbound roles are a usage error at invocation time, surfaced through
/// [`ExecutableSet::command_for`].
#[derive(Clone, Debug, Default)]
pub struct ExecutableSet {
    preprocessor: Option<Vec<String>>,
    compiler: Option<Vec<String>>,
    compiler_shared: Option<Vec<String>>,
    compiler_cxx: Option<Vec<String>>,
    linker_shared: Option<Vec<String>>,
    linker_exe: Option<Vec<String>>,
    archiver: Option<Vec<String>>,
    ranlib: Option<Vec<String>>,
}

impl ExecutableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `role` to an argv prefix (program name plus fixed flags).
    pub fn bind(mut self, role: ToolRole, argv: Vec<String>) -> Self {
        *self.slot_mut(role) = Some(argv);
        self
    }

    fn slot(&self, role: ToolRole) -> &Option<Vec<String>> {
        match role {
            ToolRole::Preprocessor => &self.preprocessor,
            ToolRole::Compiler => &self.compiler,
            ToolRole::CompilerShared => &self.compiler_shared,
            ToolRole::CompilerCxx => &self.compiler_cxx,
            ToolRole::LinkerShared => &self.linker_shared,
            ToolRole::LinkerExe => &self.linker_exe,
            ToolRole::Archiver => &self.archiver,
            ToolRole::Ranlib => &self.ranlib,
        }
    }

    fn slot_mut(&mut self, role: ToolRole) -> &mut Option<Vec<String>> {
        match role {
            ToolRole::Preprocessor => &mut self.preprocessor,
            ToolRole::Compiler => &mut self.compiler,
            ToolRole::CompilerShared => &mut self.compiler_shared,
            ToolRole::CompilerCxx => &mut self.compiler_cxx,
            ToolRole::LinkerShared => &mut self.linker_shared,
            ToolRole::LinkerExe => &mut self.linker_exe,
            ToolRole::Archiver => &mut self.archiver,
            ToolRole::Ranlib => &mut self.ranlib,
        }
    }

    pub fn is_bound(&self, role: ToolRole) -> bool {
        self.slot(role).is_some()
    }

    /// Argv prefix for `role`, or an UnsupportedRole error when the role is
    /// deliberately unbound.
    pub fn command_for(&self, role: ToolRole) -> Result<&[String]> {
        self.slot(role)
            .as_deref()
            .ok_or(BuildError::UnsupportedRole { role })
    }

    /// Distinct program names across all bound roles, in role order.
    /// Used by dependency probing.
    pub fn programs(&self) -> Vec<String> {
        let mut programs = Vec::new();
        for role in ToolRole::ALL {
            if let Some(argv) = self.slot(role) {
                if let Some(program) = argv.first() {
                    if !programs.contains(program) {
                        programs.push(program.clone());
                    }
                }
            }
        }
        programs
    }
}

/// Extension-to-language table plus precedence order and recognized source
/// extensions.
///
/// Built from single entries so the three collections cannot disagree.
#[derive(Clone, Debug)]
pub struct LanguageAssociation {
    map: Vec<(String, String)>,
    order: Vec<String>,
    src_extensions: Vec<String>,
}

impl LanguageAssociation {
    /// Association for a single-language toolchain: one extension, one tag.
    pub fn single(extension: &str, tag: &str) -> Self {
        Self {
            map: vec![(extension.to_string(), tag.to_string())],
            order: vec![tag.to_string()],
            src_extensions: vec![extension.to_string()],
        }
    }

    /// Look up the language tag for a source file by extension.
    ///
    /// Unknown extensions (and extensionless paths) are an error, never a
    /// guessed fallback.
    pub fn classify(&self, source: &Path) -> Result<&str> {
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e));

        if let Some(extension) = extension {
            for (known, tag) in &self.map {
                if *known == extension {
                    return Ok(tag.as_str());
                }
            }
        }
        Err(BuildError::UnrecognizedSource(
            source.display().to_string(),
        ))
    }

    /// Language precedence when mixing source types.
    pub fn precedence(&self) -> &[String] {
        &self.order
    }

    pub fn source_extensions(&self) -> &[String] {
        &self.src_extensions
    }
}

/// Toolchain adapter contract for language-specific compile/link stages.
///
/// The build driver stays language-agnostic; adapters supply the executable
/// bindings, include search path, and flag syntax of one external toolchain.
pub trait ToolchainAdapter: Send + Sync {
    fn language(&self) -> &'static str;
    fn options(&self) -> BuildOptions;
    fn executables(&self) -> &ExecutableSet;
    fn languages(&self) -> &LanguageAssociation;

    /// Include search path, consulted in order. Starts at the adapter's
    /// platform defaults; callers may append before compiling.
    fn include_dirs(&self) -> &[PathBuf];
    fn push_include_dir(&mut self, dir: PathBuf);

    /// Flag token adding `dir` to the compiler include search path.
    fn include_dir_flag(&self, dir: &str) -> String;
    /// Flag token adding `dir` to the linker library search path.
    fn library_dir_flag(&self, dir: &str) -> String;
    /// Flag token linking a library by name.
    fn library_flag(&self, name: &str) -> String;

    fn classify_source(&self, source: &Path) -> Result<&str> {
        self.languages().classify(source)
    }

    /// Full argv compiling one source unit into `object`.
    fn compile_command(
        &self,
        source: &Path,
        object: &Path,
        extra_include_dirs: &[PathBuf],
    ) -> Result<Vec<String>>;

    /// Full argv linking objects into one shared artifact at `output`.
    fn link_shared_command(
        &self,
        objects: &[PathBuf],
        library_dirs: &[PathBuf],
        libraries: &[String],
        output: &Path,
    ) -> Result<Vec<String>>;
}
