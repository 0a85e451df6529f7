use std::path::{Path, PathBuf};
use std::process::Command;

use checker__reports::ReportFormat;
use serde_json::Value;
use tests__snapshot_fixture_helpers::{
    SnapshotFixtureRunMode, collect_snapshot_fixture_case_paths,
    normalize_snapshot_fixture_process_output, read_snapshot_fixture_file,
    snapshot_fixture_run_mode_from_environment, write_snapshot_fixture_file_if_changed,
};

const UPDATE_HINT: &str =
    "To update: UPDATE_SNAPSHOTS=1 cargo test -p checker__cli --test diagnostics_test";

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/diagnostics")
}

#[test]
fn diagnostics_cases() {
    let checker = Path::new(env!("CARGO_BIN_EXE_schemafield"));
    let fixtures_root = fixtures_root();
    let mode = snapshot_fixture_run_mode_from_environment();

    let mut case_paths = Vec::new();
    collect_snapshot_fixture_case_paths(&fixtures_root, &fixtures_root, &mut case_paths);
    assert!(!case_paths.is_empty(), "no diagnostics cases found");

    for case_path in &case_paths {
        run_case(checker, &fixtures_root, case_path, mode);
    }
}

fn run_case(checker: &Path, fixtures_root: &Path, case_path: &Path, mode: SnapshotFixtureRunMode) {
    let case_directory = fixtures_root.join(case_path);
    let input_directory = case_directory.join("input");
    let text_run = run_check(checker, &input_directory, ReportFormat::Text);
    let json_run = run_check(checker, &input_directory, ReportFormat::Json);
    let expect_text_path = case_directory.join("expect.text");
    let expect_json_path = case_directory.join("expect.json");

    match mode {
        SnapshotFixtureRunMode::Update => {
            write_snapshot_fixture_file_if_changed(&expect_text_path, &text_run.output, case_path);
            write_snapshot_fixture_file_if_changed(&expect_json_path, &json_run.output, case_path);
        }
        SnapshotFixtureRunMode::Check => {
            let expected_exit = expected_exit_code(case_path);
            assert_exit_code(case_path, expected_exit, text_run.exit_code, "text");
            assert_exit_code(case_path, expected_exit, json_run.exit_code, "json");
            assert_json_output_contract(case_path, expected_exit, &json_run.output);
            assert_text_matches_json(case_path, &text_run.output, &json_run.output);

            let expected_text = read_snapshot_fixture_file(&expect_text_path, case_path);
            let expected_json = read_snapshot_fixture_file(&expect_json_path, case_path);
            let expected_json_value: Value =
                serde_json::from_str(&expected_json).unwrap_or_else(|error| {
                    panic!("invalid expected JSON for {}: {error}", case_path.display())
                });
            let actual_json_value: Value =
                serde_json::from_str(&json_run.output).unwrap_or_else(|error| {
                    panic!("invalid actual JSON for {}: {error}", case_path.display())
                });
            assert_eq!(
                expected_text,
                text_run.output,
                "text output mismatch for {}\n\n{UPDATE_HINT}",
                case_path.display()
            );
            assert_eq!(
                expected_json_value,
                actual_json_value,
                "json output mismatch for {}\n\n{UPDATE_HINT}",
                case_path.display()
            );
        }
    }
}

struct CheckRun {
    exit_code: i32,
    output: String,
}

fn run_check(checker: &Path, input_directory: &Path, format: ReportFormat) -> CheckRun {
    let output = Command::new(checker)
        .arg("check")
        .arg("--format")
        .arg(format.as_str())
        .current_dir(input_directory)
        .env_remove("SCHEMAFIELD_LOG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    CheckRun {
        exit_code: output.status.code().unwrap_or(1),
        output: normalize_snapshot_fixture_process_output(&output.stdout, &output.stderr),
    }
}

/// Cases under `clean/` must pass; every other case must fail.
fn expected_exit_code(case_path: &Path) -> i32 {
    let group = case_path
        .components()
        .next()
        .and_then(|component| component.as_os_str().to_str())
        .expect("case path must start with a valid UTF-8 directory name");
    i32::from(group != "clean")
}

fn assert_exit_code(case_path: &Path, expected_exit: i32, actual_exit: i32, format: &str) {
    assert_eq!(
        expected_exit,
        actual_exit,
        "{format} exit code mismatch for {}\n\n{UPDATE_HINT}",
        case_path.display()
    );
}

fn assert_text_matches_json(case_path: &Path, text_output: &str, json_output: &str) {
    let text_error_count = text_output
        .lines()
        .filter(|line| line.contains(": error: "))
        .count();
    let json_diagnostic_count = serde_json::from_str::<Value>(json_output)
        .ok()
        .and_then(|value| value.get("diagnostics").and_then(Value::as_array).map(Vec::len))
        .unwrap_or_default();
    assert_eq!(
        text_error_count,
        json_diagnostic_count,
        "text and json reports disagree on the diagnostic count for {}",
        case_path.display()
    );
}

fn assert_json_output_contract(case_path: &Path, exit_code: i32, output: &str) {
    let value: Value = serde_json::from_str(output)
        .unwrap_or_else(|error| panic!("invalid JSON output for {}: {error}", case_path.display()));

    let ok = value
        .get("ok")
        .and_then(Value::as_bool)
        .unwrap_or_else(|| panic!("JSON output missing boolean 'ok': {}", case_path.display()));
    let diagnostics = value
        .get("diagnostics")
        .and_then(Value::as_array)
        .unwrap_or_else(|| {
            panic!(
                "JSON output missing array 'diagnostics': {}",
                case_path.display()
            )
        });
    let has_error = value.get("error").is_some_and(|error| !error.is_null());

    if exit_code == 0 {
        assert!(ok, "clean cases must have ok=true: {}", case_path.display());
        assert!(
            diagnostics.is_empty(),
            "clean cases must have no diagnostics: {}",
            case_path.display()
        );
        assert!(
            !has_error,
            "clean cases must not contain error: {}",
            case_path.display()
        );
        return;
    }

    assert!(!ok, "failing cases must have ok=false: {}", case_path.display());
    assert!(
        has_error != !diagnostics.is_empty(),
        "failing cases must include either diagnostics or error: {}",
        case_path.display()
    );
}
