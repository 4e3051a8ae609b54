//! Integration tests for the Larch CLI.
//!
//! These tests invoke the `larch` binary as a subprocess and check exit
//! codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn larch() -> Command {
    Command::cargo_bin("larch").unwrap()
}

/// Write a program file into the temp dir and return its path.
fn program_file(dir: &TempDir, source: &str) -> PathBuf {
    let path = dir.path().join("prog.lar");
    fs::write(&path, source).unwrap();
    path
}

// ---- Entry contract ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    larch()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("expected one program file, 0 given"))
        .stderr(predicate::str::contains("Usage: larch"));
}

#[test]
fn extra_args_print_usage_and_exit_1() {
    larch()
        .args(["a.lar", "b.lar"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("expected one program file, 2 given"));
}

#[test]
fn help_flag_exits_0() {
    larch()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Usage: larch"));
}

#[test]
fn missing_file_exits_1() {
    larch()
        .arg("no-such-program.lar")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read 'no-such-program.lar'"));
}

// ---- Read errors ----

#[test]
fn unparsable_program_exits_2() {
    let dir = TempDir::new().unwrap();
    let path = program_file(&dir, "((),)");
    larch()
        .arg(path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("empty instruction"));
}

#[test]
fn non_sequence_program_exits_2() {
    let dir = TempDir::new().unwrap();
    let path = program_file(&dir, "42");
    larch()
        .arg(path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("expected a program sequence"));
}

// ---- Execution ----

#[test]
fn runs_a_program_and_prints() {
    let dir = TempDir::new().unwrap();
    let path = program_file(
        &dir,
        "(
            (\"var\", \"x\", 5),
            (\"print\", (\"get\", \"x\")),
        )",
    );
    larch().arg(path).assert().success().stdout("5");
}

#[test]
fn print_emits_no_trailing_newline() {
    let dir = TempDir::new().unwrap();
    let path = program_file(&dir, "((\"print\", \"a\"), (\"print\", \"b\"))");
    larch().arg(path).assert().success().stdout("ab");
}

#[test]
fn function_call_program() {
    let dir = TempDir::new().unwrap();
    let path = program_file(
        &dir,
        "(
            (\"func\", \"add\", [\"a\", \"b\"], [
                (\"return\", (\"+\", (\"get\", \"a\"), (\"get\", \"b\"))),
            ]),
            (\"print\", (\"add\", 2, 3)),
        )",
    );
    larch().arg(path).assert().success().stdout("5");
}

#[test]
fn input_feeds_the_program() {
    let dir = TempDir::new().unwrap();
    let path = program_file(
        &dir,
        "(
            (\"var\", \"n\", (\"input\", \"int\")),
            (\"print\", (\"*\", (\"get\", \"n\"), 2)),
        )",
    );
    larch()
        .arg(path)
        .write_stdin("21\n")
        .assert()
        .success()
        .stdout("42");
}

// ---- Termination ----

#[test]
fn exit_with_status_propagates() {
    let dir = TempDir::new().unwrap();
    let path = program_file(&dir, "((\"exit\", 7),)");
    larch().arg(path).assert().failure().code(7);
}

#[test]
fn exit_without_status_is_success() {
    let dir = TempDir::new().unwrap();
    let path = program_file(&dir, "((\"print\", \"ok\"), (\"exit\"))");
    larch().arg(path).assert().success().stdout("ok");
}

#[test]
fn runtime_error_prints_class_message_and_trace() {
    let dir = TempDir::new().unwrap();
    let path = program_file(
        &dir,
        "(
            (\"var\", \"x\", 1),
            (\"print\", (\"get\", \"missing\")),
        )",
    );
    larch()
        .arg(&path)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains(
            "NameError: name 'missing' is not defined",
        ))
        .stderr(predicate::str::contains("at"))
        .stderr(predicate::str::contains("(line 2)"));
}

#[test]
fn export_from_global_scope_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = program_file(&dir, "((\"var\", \"y\", 1), (\"export\", \"y\"))");
    larch()
        .arg(path)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains(
            "ScopeError: cannot export from the global scope",
        ));
}

#[test]
fn stray_break_is_a_syntax_error() {
    let dir = TempDir::new().unwrap();
    let path = program_file(&dir, "((\"break\"),)");
    larch()
        .arg(path)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("SyntaxError: 'break' outside loop"));
}

#[test]
fn output_before_a_fault_is_flushed() {
    let dir = TempDir::new().unwrap();
    let path = program_file(
        &dir,
        "((\"print\", \"partial\"), (\"get\", \"missing\"))",
    );
    larch()
        .arg(path)
        .assert()
        .failure()
        .code(3)
        .stdout("partial");
}
