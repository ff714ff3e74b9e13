use crate::adapter::gccgo::GccgoToolchain;
use crate::adapter::toolchain::ToolchainAdapter;
use crate::config::config::ToolchainConfig;
use crate::config::types::{BuildError, BuildOptions, Result};

pub fn toolchain_for(
    language: &str,
    config: &ToolchainConfig,
    options: BuildOptions,
) -> Result<Box<dyn ToolchainAdapter>> {
    match language {
        "go" | "golang" => Ok(Box::new(GccgoToolchain::with_config(config, options))),
        _ => Err(BuildError::Config(format!(
            "unsupported language toolchain: {language}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_aliases_resolve() {
        for language in ["go", "golang"] {
            let toolchain =
                toolchain_for(language, &ToolchainConfig::default(), BuildOptions::default())
                    .unwrap();
            assert_eq!(toolchain.language(), "go");
        }
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let err = toolchain_for("rust", &ToolchainConfig::default(), BuildOptions::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("unsupported language"));
    }
}
