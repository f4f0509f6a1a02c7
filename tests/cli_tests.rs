use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn lox_scan() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lox-scan"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(args: &[&str], stdin: impl AsRef<[u8]>) -> Output {
    let mut child = lox_scan()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn lox-scan");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_ref())
        .expect("write stdin");
    child.wait_with_output().expect("wait for lox-scan")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr is UTF-8")
}

#[test]
fn file_without_errors_exits_zero() {
    let output = lox_scan()
        .arg(fixture("sexpr.lox"))
        .output()
        .expect("run lox-scan");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), include_str!("../fixtures/sexpr.expected"));
    assert!(stderr(&output).is_empty());
}

#[test]
fn program_fixture_tokens() {
    let output = lox_scan()
        .arg(fixture("counter.lox"))
        .output()
        .expect("run lox-scan");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), include_str!("../fixtures/counter.expected"));
}

#[test]
fn file_with_errors_exits_65() {
    let output = lox_scan()
        .arg(fixture("unexpected.lox"))
        .output()
        .expect("run lox-scan");
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stdout(&output), "NUMBER 1 1.0\nNUMBER 2 2.0\nEOF  null\n");
    assert_eq!(stderr(&output), "[line 2] Error: Unexpected character.\n");
}

#[test]
fn unterminated_string_exits_65() {
    let output = lox_scan()
        .arg(fixture("unterminated.lox"))
        .output()
        .expect("run lox-scan");
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stdout(&output), "PRINT print null\nEOF  null\n");
    assert_eq!(stderr(&output), "[line 2] Error: Unterminated string.\n");
}

#[test]
fn invalid_utf8_file_is_a_lexical_error() {
    let output = lox_scan()
        .arg(fixture("invalid_utf8.lox"))
        .output()
        .expect("run lox-scan");
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stdout(&output), "NUMBER 1 1.0\nNUMBER 2 2.0\nEOF  null\n");
    assert_eq!(stderr(&output), "[line 1] Error: Unexpected character.\n");
}

#[test]
fn empty_file_prints_only_eof() {
    let output = lox_scan()
        .arg(fixture("empty.lox"))
        .output()
        .expect("run lox-scan");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "EOF  null\n");
}

#[test]
fn two_positionals_is_usage_error() {
    let output = lox_scan()
        .args(["a.lox", "b.lox"])
        .output()
        .expect("run lox-scan");
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Usage: lox-scan [script]"));
}

#[test]
fn missing_file_is_fatal() {
    let output = lox_scan()
        .arg(fixture("no_such_file.lox"))
        .output()
        .expect("run lox-scan");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("no_such_file.lox"));
}

#[test]
fn prompt_mode_forgives_each_line() {
    let output = run_with_stdin(&[], "@\n1\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "> EOF  null\n> NUMBER 1 1.0\nEOF  null\n> ");
    assert_eq!(stderr(&output), "[line 1] Error: Unexpected character.\n");
}

#[test]
fn prompt_mode_survives_invalid_utf8_line() {
    let output = run_with_stdin(&[], b"\xff\n1\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "> EOF  null\n> NUMBER 1 1.0\nEOF  null\n> ");
    assert_eq!(stderr(&output), "[line 1] Error: Unexpected character.\n");
}

#[test]
fn prompt_mode_json_output() {
    let output = run_with_stdin(&["--format", "json"], "nil\n");
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    let json_lines: Vec<&str> = out
        .lines()
        .map(|l| l.trim_start_matches("> "))
        .filter(|l| !l.is_empty() && *l != ">")
        .collect();
    assert_eq!(json_lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(json_lines[0]).expect("valid JSON");
    assert_eq!(first["kind"], "NIL");
    assert_eq!(first["line"], 1);
}

#[test]
fn max_errors_flag_caps_diagnostics() {
    let output = run_with_stdin(&["--max-errors", "1"], "@ @ @\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stderr(&output),
        "[line 1] Error: Unexpected character.\n... 2 more error(s) not shown\n"
    );
}
