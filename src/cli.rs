use crate::adapter::registry;
use crate::config::config::ToolchainConfig;
use crate::config::types::BuildOptions;
use crate::exec::driver::{BuildDriver, BuildRequest};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build source files into one shared object
    Build {
        /// Source files to compile
        #[arg(required = true)]
        sources: Vec<PathBuf>,
        /// Output path for the shared artifact
        #[arg(short, long)]
        out: PathBuf,
        /// Additional include search directories (appended after the defaults)
        #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,
        /// Library search directories passed to the linker
        #[arg(short = 'L', long = "library-dir", value_name = "DIR")]
        library_dirs: Vec<PathBuf>,
        /// Libraries to link by name
        #[arg(short = 'l', long = "library", value_name = "NAME")]
        libraries: Vec<String>,
        /// Language toolchain to use
        #[arg(long, default_value = "go")]
        language: String,
        /// Directory for intermediate objects (kept after the build)
        #[arg(long, value_name = "DIR")]
        build_dir: Option<PathBuf>,
        /// Toolchain overrides file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Log the commands without running them
        #[arg(long)]
        dry_run: bool,
        /// Rebuild objects even when they are newer than their sources
        #[arg(long)]
        force: bool,
        /// Emit the build report as JSON on stdout
        #[arg(long)]
        json: bool,
        /// Verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Check that every tool the toolchain binds is installed
    CheckDeps {
        /// Language toolchain to probe
        #[arg(long, default_value = "go")]
        language: String,
        /// Show per-tool version information
        #[arg(long)]
        verbose: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            sources,
            out,
            include_dirs,
            library_dirs,
            libraries,
            language,
            build_dir,
            config,
            dry_run,
            force,
            json,
            verbose,
        } => {
            init_logging(verbose);

            let toolchain_config = match config {
                Some(path) => ToolchainConfig::load_from_file(path)?,
                None => ToolchainConfig::default(),
            };
            let options = BuildOptions {
                verbose,
                dry_run,
                force,
            };
            let toolchain = registry::toolchain_for(&language, &toolchain_config, options)?;
            let driver = BuildDriver::new(toolchain);

            let request = BuildRequest {
                sources,
                output: out,
                include_dirs,
                library_dirs,
                libraries,
                build_dir,
            };

            match driver.build(&request) {
                Ok(report) => {
                    if json {
                        println!("{}", report.to_json()?);
                    } else if dry_run {
                        eprintln!(
                            "dry run: planned {} step(s), nothing executed",
                            report.steps.len()
                        );
                    } else {
                        eprintln!("built {}", report.output.display());
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::CheckDeps { language, verbose } => {
            init_logging(verbose);
            check_toolchain_dependencies(&language, verbose)
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    let _ = builder.try_init();
}

/// Probe every executable the adapter binds and report per-tool status.
fn check_toolchain_dependencies(language: &str, verbose: bool) -> Result<()> {
    use std::process::Command;

    let toolchain = registry::toolchain_for(
        language,
        &ToolchainConfig::default(),
        BuildOptions::default(),
    )?;

    println!("Checking {} toolchain dependencies...", toolchain.language());
    println!();

    let mut missing_tools = Vec::new();

    for program in toolchain.executables().programs() {
        match Command::new(&program).arg("--version").output() {
            Ok(output) if output.status.success() => {
                println!("✅ {} - OK", program);
                if verbose {
                    let version_info = if !output.stdout.is_empty() {
                        String::from_utf8_lossy(&output.stdout)
                    } else {
                        String::from_utf8_lossy(&output.stderr)
                    }
                    .lines()
                    .next()
                    .unwrap_or("")
                    .to_string();
                    println!("  {} -> {}", program, version_info.trim());
                }
            }
            Ok(_) => {
                println!("❌ {} - FAILED", program);
                missing_tools.push(program);
            }
            Err(_) => {
                println!("❌ {} - NOT FOUND", program);
                missing_tools.push(program);
            }
        }
    }

    println!();

    if missing_tools.is_empty() {
        println!("All toolchain dependencies are installed");
        Ok(())
    } else {
        println!("Missing tools: {}", missing_tools.join(", "));
        println!();
        println!("To install them on Debian/Ubuntu:");
        println!("  sudo apt install gccgo binutils");
        std::process::exit(1);
    }
}
