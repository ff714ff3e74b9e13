//! Integration tests for the build driver
//!
//! Dry-run tests verify the exact command sequences the driver plans.
//! Execution tests substitute `true`/`false` for gccgo so the spawn,
//! freshness, and failure paths run without a Go toolchain installed.

use goext::adapter::gccgo::GccgoToolchain;
use goext::adapter::toolchain::ToolchainAdapter;
use goext::config::config::ToolchainConfig;
use goext::config::types::{BuildError, BuildOptions};
use goext::exec::driver::{BuildDriver, BuildRequest};
use goext::exec::executor::{StepKind, StepStatus};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

fn dry_run_driver() -> BuildDriver {
    let options = BuildOptions {
        dry_run: true,
        ..Default::default()
    };
    BuildDriver::new(Box::new(GccgoToolchain::new(options)))
}

/// Driver whose toolchain executable is an arbitrary stand-in program.
fn stand_in_driver(program: &str, force: bool) -> BuildDriver {
    let config = ToolchainConfig {
        gccgo: program.to_string(),
        ..Default::default()
    };
    let options = BuildOptions {
        force,
        ..Default::default()
    };
    BuildDriver::new(Box::new(GccgoToolchain::with_config(&config, options)))
}

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("goext-test-{}-{}", label, Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_single_source_plans_one_compile_and_one_link() {
    let driver = dry_run_driver();
    let request = BuildRequest {
        sources: vec![PathBuf::from("gotypes.go")],
        output: PathBuf::from("_gotypes.so"),
        ..Default::default()
    };

    let report = driver.build(&request).unwrap();
    assert_eq!(report.steps.len(), 2);
    assert_eq!(report.steps_of_kind(StepKind::Compile).len(), 1);
    assert_eq!(report.steps_of_kind(StepKind::Link).len(), 1);
    for step in &report.steps {
        assert_eq!(step.status, StepStatus::Planned);
    }

    // No library directories or names were given, so the link argv must
    // carry no search-dir or link-by-name tokens.
    let link = report.steps_of_kind(StepKind::Link)[0];
    assert!(link
        .command
        .iter()
        .all(|token| !token.starts_with("-L") && !token.starts_with("-l")));
}

#[test]
fn test_link_tokens_keep_dirs_before_names() {
    let driver = dry_run_driver();
    let request = BuildRequest {
        sources: vec![PathBuf::from("gotypes.go")],
        output: PathBuf::from("_gotypes.so"),
        library_dirs: vec![
            PathBuf::from("/usr/lib/gccgo"),
            PathBuf::from("/opt/lib"),
        ],
        libraries: vec!["m".to_string()],
        ..Default::default()
    };

    let report = driver.build(&request).unwrap();
    let link = report.steps_of_kind(StepKind::Link)[0];

    let position = |token: &str| {
        link.command
            .iter()
            .position(|t| t == token)
            .unwrap_or_else(|| panic!("{} missing from {:?}", token, link.command))
    };
    let first_dir = position("-L/usr/lib/gccgo");
    let second_dir = position("-L/opt/lib");
    let library = position("-lm");
    assert!(first_dir < second_dir);
    assert!(second_dir < library);
}

#[test]
fn test_compile_carries_default_include_dirs() {
    let driver = dry_run_driver();
    let request = BuildRequest {
        sources: vec![PathBuf::from("gotypes.go")],
        output: PathBuf::from("_gotypes.so"),
        include_dirs: vec![PathBuf::from("/extra")],
        ..Default::default()
    };

    let report = driver.build(&request).unwrap();
    let compile = report.steps_of_kind(StepKind::Compile)[0];
    let tokens: Vec<&str> = compile.command.iter().map(String::as_str).collect();
    let first = tokens.iter().position(|t| *t == "-I/usr/lib/gccgo").unwrap();
    let second = tokens
        .iter()
        .position(|t| *t == "-I/usr/local/lib/gccgo")
        .unwrap();
    let extra = tokens.iter().position(|t| *t == "-I/extra").unwrap();
    assert!(first < second);
    assert!(second < extra);
}

#[test]
fn test_unrecognized_extension_aborts_before_any_step() {
    let driver = dry_run_driver();
    let request = BuildRequest {
        sources: vec![PathBuf::from("gotypes.go"), PathBuf::from("helper.c")],
        output: PathBuf::from("_gotypes.so"),
        ..Default::default()
    };

    match driver.build(&request) {
        Err(BuildError::UnrecognizedSource(path)) => assert_eq!(path, "helper.c"),
        other => panic!("expected UnrecognizedSource, got {:?}", other),
    }
}

#[test]
fn test_empty_source_list_is_rejected() {
    let driver = dry_run_driver();
    let request = BuildRequest {
        output: PathBuf::from("_gotypes.so"),
        ..Default::default()
    };
    assert!(matches!(
        driver.build(&request),
        Err(BuildError::Config(_))
    ));
}

#[test]
fn test_successful_build_runs_every_step() {
    let dir = scratch_dir("ok");
    let source = dir.join("gotypes.go");
    fs::write(&source, "package gotypes\n").unwrap();

    let driver = stand_in_driver("true", false);
    let request = BuildRequest {
        sources: vec![source],
        output: dir.join("_gotypes.so"),
        ..Default::default()
    };

    let report = driver.build(&request).unwrap();
    assert_eq!(report.steps.len(), 2);
    for step in &report.steps {
        assert_eq!(step.status, StepStatus::Completed);
        assert!(step.success);
        assert_eq!(step.exit_code, Some(0));
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_fresh_object_skips_compilation() {
    let dir = scratch_dir("fresh");
    let build_dir = dir.join("build");
    fs::create_dir_all(&build_dir).unwrap();

    let source = dir.join("gotypes.go");
    fs::write(&source, "package gotypes\n").unwrap();
    std::thread::sleep(Duration::from_millis(20));
    fs::write(build_dir.join("gotypes.o"), b"stale-but-newer").unwrap();

    let request = BuildRequest {
        sources: vec![source],
        output: dir.join("_gotypes.so"),
        build_dir: Some(build_dir.clone()),
        ..Default::default()
    };

    let report = stand_in_driver("true", false).build(&request).unwrap();
    assert_eq!(report.steps[0].status, StepStatus::Fresh);
    assert_eq!(report.steps[1].status, StepStatus::Completed);

    // Force rebuilds the object even though it is newer than the source.
    let report = stand_in_driver("true", true).build(&request).unwrap();
    assert_eq!(report.steps[0].status, StepStatus::Completed);

    // The caller-supplied build directory is left in place.
    assert!(build_dir.is_dir());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_failing_tool_aborts_the_build() {
    let dir = scratch_dir("fail");
    let source = dir.join("gotypes.go");
    fs::write(&source, "package gotypes\n").unwrap();

    let driver = stand_in_driver("false", false);
    let request = BuildRequest {
        sources: vec![source],
        output: dir.join("_gotypes.so"),
        ..Default::default()
    };

    match driver.build(&request) {
        Err(BuildError::ToolFailure { tool, status, .. }) => {
            assert_eq!(tool, "false");
            assert_eq!(status, "exit code 1");
        }
        other => panic!("expected ToolFailure, got {:?}", other),
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_tool_is_surfaced_by_name() {
    let dir = scratch_dir("missing");
    let source = dir.join("gotypes.go");
    fs::write(&source, "package gotypes\n").unwrap();

    let driver = stand_in_driver("goext-no-such-compiler", false);
    let request = BuildRequest {
        sources: vec![source],
        output: dir.join("_gotypes.so"),
        ..Default::default()
    };

    match driver.build(&request) {
        Err(BuildError::MissingTool(tool)) => assert_eq!(tool, "goext-no-such-compiler"),
        other => panic!("expected MissingTool, got {:?}", other),
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_two_sources_compile_in_order_then_link_once() {
    let driver = dry_run_driver();
    let request = BuildRequest {
        sources: vec![PathBuf::from("gotypes.go"), PathBuf::from("maps.go")],
        output: PathBuf::from("_gotypes.so"),
        ..Default::default()
    };

    let report = driver.build(&request).unwrap();
    assert_eq!(report.steps_of_kind(StepKind::Compile).len(), 2);
    assert_eq!(report.steps_of_kind(StepKind::Link).len(), 1);
    assert_eq!(report.objects.len(), 2);

    // The link argv names every object, in compile order.
    let link = report.steps_of_kind(StepKind::Link)[0];
    let object_tokens: Vec<String> = report
        .objects
        .iter()
        .map(|o| o.to_string_lossy().to_string())
        .collect();
    let positions: Vec<usize> = object_tokens
        .iter()
        .map(|token| link.command.iter().position(|t| t == token).unwrap())
        .collect();
    assert!(positions[0] < positions[1]);
}

#[test]
fn test_driver_exposes_adapter_language() {
    let driver = dry_run_driver();
    assert_eq!(driver.toolchain().language(), "go");
    assert_eq!(
        driver.toolchain().languages().source_extensions(),
        &[".go".to_string()]
    );
}
