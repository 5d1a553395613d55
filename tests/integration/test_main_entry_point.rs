// main.rsとエントリーポイントのテスト
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_algo_bench"))
}

/// 引数なしで起動し、標準入力にコマンドを流し込む
fn run_interactive(input: &str) -> Output {
    let mut child = binary()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn binary");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write commands");

    child.wait_with_output().expect("Failed to wait for binary")
}

#[test]
fn test_cli_help() {
    let output = binary()
        .arg("--help")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("algo_bench"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("measure"));
    assert!(stdout.contains("--json"));
}

#[test]
fn test_cli_version() {
    let output = binary()
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("algo_bench"));
}

#[test]
fn test_cli_list() {
    let output = binary().arg("list").output().expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 11);
    assert!(stdout.lines().any(|line| line == "matrix_addition"));
}

#[test]
fn test_cli_run_json() {
    let output = binary()
        .args(["--json", "--seed", "4", "run", "quick_sort", "0", "1", "3", "4"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let results: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = results.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    for entry in entries {
        assert_eq!(entry["algorithm"], "quick_sort");
        assert_eq!(entry["test_count"], 1);
        assert_eq!(entry["result"]["correct"], true);
        assert!(entry["result"]["start"].is_i64());
    }
}

#[test]
fn test_cli_run_text_with_reversed_ranges() {
    let output = binary()
        .args(["--repeat", "2", "run", "linear_search", "1", "0", "2", "2"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Algorithm: linear_search, Threads: 1, Data size: 4"));
    assert!(stdout.contains("Algorithm: linear_search, Threads: 2, Data size: 4"));
    assert_eq!(stdout.matches("Thread Count:").count(), 4);
}

#[test]
fn test_cli_verbose_diagnostics_go_to_stderr() {
    let output = binary()
        .args(["--verbose", "--json", "measure", "heap_sort", "32", "--threads", "2"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let results: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results[0]["threads"], 2);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[0, 16)"));
    assert!(stderr.contains("cleaned_up"));
}

#[test]
fn test_cli_invalid_size_exits_with_error() {
    let output = binary()
        .args(["measure", "merge_sort", "0"])
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("設定エラー"));
    assert!(stderr.contains("重要度: HIGH, 入力を修正してください"));
}

#[test]
fn test_cli_unknown_algorithm() {
    let output = binary()
        .args(["analyze", "bogo_sort"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("bogo_sort"));
}

#[test]
fn test_interactive_json_output_toggle() {
    let output = run_interactive("json_output true\nmeasure heap_sort 8 --seed 2\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Enter a command"));
    assert!(stdout.contains("JSON output enabled."));

    let json_start = stdout.find('[').unwrap();
    let results: Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(results[0]["algorithm"], "heap_sort");
    assert_eq!(results[0]["data_size"], 8);
    assert_eq!(results[0]["result"]["correct"], true);
}

#[test]
fn test_interactive_help() {
    let output = run_interactive("help\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Available commands:"));
    assert!(stdout.contains("json_output <true/false>"));
}

#[test]
fn test_interactive_errors_do_not_end_session() {
    let output = run_interactive("measure merge_sort 0\nanalyze bogo_sort\nlist\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().any(|line| line == "binary_search"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("設定エラー"));
    assert!(stderr.contains("bogo_sort"));
}
