// End-to-end tests for the pdiff binary: exit codes and report behavior.
// Run with: cargo test -p patterndiff-cli --test compare_tests -- --nocapture

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn pdiff() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pdiff"))
}

const CONFIG: &str = r#"
name = "Test comparison"

[fields]
coord_a = "Phi[deg]"
coord_b = "Theta[deg]"
value   = "gain"

[tables.reference]
file = "measured.csv"

[tables.reconstruction]
file = "interpolated.csv"
"#;

const MEASURED: &str = "\
Phi[deg],Theta[deg],gain
0,0,10.0
0,90,8.0
90,0,6.0
90,90,4.0
";

const INTERPOLATED: &str = "\
Phi[deg],Theta[deg],gain
0,0,12.0
0,90,8.5
90,0,6.0
90,90,1.0
";

/// Write a config plus both CSVs into `dir`, returning the config path.
fn setup(dir: &Path, config: &str, measured: &str, interpolated: &str) -> std::path::PathBuf {
    fs::write(dir.join("measured.csv"), measured).unwrap();
    fs::write(dir.join("interpolated.csv"), interpolated).unwrap();
    let config_path = dir.join("compare.toml");
    fs::write(&config_path, config).unwrap();
    config_path
}

#[test]
fn run_success_prints_summary() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path(), CONFIG, MEASURED, INTERPOLATED);

    let output = pdiff()
        .args(["run", config.to_str().unwrap()])
        .output()
        .expect("pdiff run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("aligned 4 samples"));
    assert!(stderr.contains("RMSE"));
    assert!(stderr.contains("grid 2x2"));
    assert!(stderr.contains("top 4 largest differences"));
}

#[test]
fn run_json_reports_metrics() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path(), CONFIG, MEASURED, INTERPOLATED);

    let output = pdiff()
        .args(["run", config.to_str().unwrap(), "--json"])
        .output()
        .expect("pdiff run --json");

    assert!(output.status.success());
    let val: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();

    // Differences 2.0, 0.5, 0.0, -3.0.
    let expected_mse = (4.0 + 0.25 + 0.0 + 9.0) / 4.0;
    let mse = val["summary"]["mse"].as_f64().unwrap();
    assert!((mse - expected_mse).abs() < 1e-9);
    let rmse = val["summary"]["rmse"].as_f64().unwrap();
    assert!((rmse - expected_mse.sqrt()).abs() < 1e-9);
    assert_eq!(val["summary"]["aligned_rows"], serde_json::json!(4));
    assert_eq!(val["meta"]["config_name"], serde_json::json!("Test comparison"));

    // Largest discrepancy first.
    let first = &val["extremes"][0];
    assert_eq!(first["difference"].as_f64().unwrap(), -3.0);
}

#[test]
fn run_output_writes_file() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path(), CONFIG, MEASURED, INTERPOLATED);
    let out_path = dir.path().join("result.json");

    let output = pdiff()
        .args([
            "run",
            config.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("pdiff run --output");

    assert!(output.status.success());
    let written = fs::read_to_string(&out_path).unwrap();
    let val: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(val["grids"]["row_coords"].is_array());
}

#[test]
fn missing_column_exits_3() {
    let dir = TempDir::new().unwrap();
    let bad_measured = "Phi[deg],Elevation,gain\n0,0,10.0\n";
    let config = setup(dir.path(), CONFIG, bad_measured, INTERPOLATED);

    let output = pdiff()
        .args(["run", config.to_str().unwrap()])
        .output()
        .expect("pdiff run");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reference"));
    assert!(stderr.contains("Theta[deg]"));
}

#[test]
fn disjoint_domains_exit_4_with_hint() {
    let dir = TempDir::new().unwrap();
    let shifted = "\
Phi[deg],Theta[deg],gain
-180,0,10.0
-90,0,8.0
";
    let config = setup(dir.path(), CONFIG, shifted, INTERPOLATED);

    let output = pdiff()
        .args(["run", config.to_str().unwrap()])
        .output()
        .expect("pdiff run");

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no coordinate keys shared"));
    assert!(stderr.contains("angle convention"));
}

#[test]
fn duplicate_keys_exit_5() {
    let dir = TempDir::new().unwrap();
    let duplicated = "\
Phi[deg],Theta[deg],gain
0,0,10.0
0,0,11.0
";
    let config = setup(dir.path(), CONFIG, duplicated, INTERPOLATED);

    let output = pdiff()
        .args(["run", config.to_str().unwrap()])
        .output()
        .expect("pdiff run");

    assert_eq!(output.status.code(), Some(5));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate coordinate keys"));
    assert!(stderr.contains("appears 2 times"));
}

#[test]
fn bad_numeric_cell_exits_6() {
    let dir = TempDir::new().unwrap();
    let bad = "\
Phi[deg],Theta[deg],gain
0,0,ten
";
    let config = setup(dir.path(), CONFIG, bad, INTERPOLATED);

    let output = pdiff()
        .args(["run", config.to_str().unwrap()])
        .output()
        .expect("pdiff run");

    assert_eq!(output.status.code(), Some(6));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"));
    assert!(stderr.contains("ten"));
}

#[test]
fn invalid_config_exits_7() {
    let dir = TempDir::new().unwrap();
    let bad_config = format!("{CONFIG}\n[report]\ntop_n = 0\n");
    let config = setup(dir.path(), &bad_config, MEASURED, INTERPOLATED);

    let output = pdiff()
        .args(["run", config.to_str().unwrap()])
        .output()
        .expect("pdiff run");

    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn unreadable_config_exits_2() {
    let output = pdiff()
        .args(["run", "/nonexistent/compare.toml"])
        .output()
        .expect("pdiff run");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn compare_flags_match_config_run() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("measured.csv"), MEASURED).unwrap();
    fs::write(dir.path().join("interpolated.csv"), INTERPOLATED).unwrap();

    let output = pdiff()
        .current_dir(dir.path())
        .args([
            "compare",
            "measured.csv",
            "interpolated.csv",
            "--coord-a",
            "Phi[deg]",
            "--coord-b",
            "Theta[deg]",
            "--value",
            "gain",
            "--top",
            "2",
            "--json",
        ])
        .output()
        .expect("pdiff compare");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let val: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(val["extremes"].as_array().unwrap().len(), 2);
    assert_eq!(
        val["meta"]["config_name"],
        serde_json::json!("interpolated vs measured")
    );
}

#[test]
fn validate_accepts_good_config() {
    let dir = TempDir::new().unwrap();
    let config = setup(dir.path(), CONFIG, MEASURED, INTERPOLATED);

    let output = pdiff()
        .args(["validate", config.to_str().unwrap()])
        .output()
        .expect("pdiff validate");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok: 'Test comparison'"));
}

#[test]
fn validate_rejects_toml_syntax_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("broken.toml");
    fs::write(&config_path, "name = \"unterminated\n").unwrap();

    let output = pdiff()
        .args(["validate", config_path.to_str().unwrap()])
        .output()
        .expect("pdiff validate");

    assert_eq!(output.status.code(), Some(6));
}
