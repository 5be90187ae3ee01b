//! End-to-end smoke tests that run the full CLI pipeline over the demo
//! ontologies shipped in `demos/`.
//!
//! Each demo is staged into a temporary directory first, because the
//! report always lands next to its input file.

use std::fs;
use std::path::{Path, PathBuf};

use ontosheet_cli::{Args, run};
use tempfile::TempDir;

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

fn collect_obo_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read demos directory") {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "obo") {
            files.push(path);
        }
    }
    files.sort();
    files
}

fn stage(temp_dir: &TempDir, demo: &Path) -> PathBuf {
    let staged = temp_dir
        .path()
        .join(demo.file_name().expect("Demo file has no name"));
    fs::copy(demo, &staged).expect("Failed to stage demo file");
    staged
}

fn report_for(staged: &Path) -> PathBuf {
    let mut path = staged.as_os_str().to_os_string();
    path.push(".xlsx");
    PathBuf::from(path)
}

fn args_for(ontology: PathBuf) -> Args {
    Args {
        ontology,
        class: None,
        flat: false,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_demos() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let demos = collect_obo_files(&demos_dir());
    assert!(!demos.is_empty(), "No .obo files found in demos/");

    let mut failures = Vec::new();
    for demo in &demos {
        let staged = stage(&temp_dir, demo);
        let args = args_for(staged.clone());
        if let Err(e) = run(&args) {
            failures.push((demo.clone(), e.to_string()));
            continue;
        }
        let report = report_for(&staged);
        if !report.is_file() {
            failures.push((demo.clone(), "no report file was written".to_string()));
        }
    }

    if !failures.is_empty() {
        eprintln!("\n=== E2E SMOKE TEST FAILURES ===");
        for (demo, message) in &failures {
            eprintln!("  {}: {message}", demo.display());
        }
        panic!(
            "{} of {} demo ontologies failed to export",
            failures.len(),
            demos.len()
        );
    }

    println!("✅ All {} demo ontologies exported successfully", demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let error_demos = collect_obo_files(&demos_dir().join("errors"));
    assert!(!error_demos.is_empty(), "No .obo files found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();
    for demo in &error_demos {
        let staged = stage(&temp_dir, demo);
        let args = args_for(staged);
        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\n=== ERROR DEMOS THAT SUCCEEDED ===");
        for demo in &unexpectedly_succeeded {
            eprintln!("  {}", demo.display());
        }
        panic!(
            "{} of {} error demos exported without an error",
            unexpectedly_succeeded.len(),
            error_demos.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_unknown_class_falls_back_to_the_root() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let staged = stage(&temp_dir, &demos_dir().join("phenotype-mini.obo"));

    let mut args = args_for(staged.clone());
    args.class = Some("DP:9999999".to_string());

    run(&args).expect("an unknown class reports from the root instead of failing");
    assert!(report_for(&staged).is_file());
}

#[test]
fn e2e_class_selection_accepts_alternative_ids() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let staged = stage(&temp_dir, &demos_dir().join("phenotype-mini.obo"));

    let mut args = args_for(staged.clone());
    args.class = Some("DP:0000900".to_string());

    run(&args).expect("an alternative id selects its primary term");
    assert!(report_for(&staged).is_file());
}

#[test]
fn e2e_flat_mode_writes_a_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let staged = stage(&temp_dir, &demos_dir().join("anatomy-mini.obo"));

    let mut args = args_for(staged.clone());
    args.flat = true;

    run(&args).expect("flat mode exports successfully");
    assert!(report_for(&staged).is_file());
}

#[test]
fn e2e_configured_style_is_honored() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let staged = stage(&temp_dir, &demos_dir().join("anatomy-mini.obo"));

    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[style]\nband_color = \"#FFE4B5\"\ncolumn_width = 32.0\n",
    )
    .expect("Failed to write config file");

    let mut args = args_for(staged.clone());
    args.config = Some(config_path.display().to_string());

    run(&args).expect("a styled export succeeds");
    assert!(report_for(&staged).is_file());
}
