//! End-to-end CLI tests: invoke the `compiler` binary against literal
//! source files and check its exit code and output, the way
//! `faxc-drv`'s `tests/e2e/cli_tests.rs` drives the `faxc` binary.

use std::io::Write as _;

use assert_cmd::Command;
use predicates::prelude::*;

fn compiler_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_compiler"))
}

fn source_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write source");
    file
}

#[test]
fn missing_argument_exits_zero_with_message() {
    compiler_bin()
        .assert()
        .success()
        .stderr(predicate::str::contains("error: no filepath specified"));
}

#[test]
fn successful_compile_prints_ast_and_exits_zero() {
    let file = source_file("int main(void) { return 0; }");
    compiler_bin()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("function"));
}

#[test]
fn parse_failure_exits_zero_with_diagnostic() {
    let file = source_file("int main(void) { return 0 }");
    compiler_bin()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn type_check_failure_exits_zero_with_diagnostic() {
    let file = source_file("int main(void) { int x; return x; }");
    compiler_bin()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn nonexistent_path_exits_zero_with_io_diagnostic() {
    compiler_bin()
        .arg("/no/such/file.c")
        .assert()
        .success()
        .stderr(predicate::str::contains("error:"));
}
