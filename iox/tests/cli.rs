//! End-to-end tests driving the built `iox` binary over real scripts.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn iox_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_iox"))
}

fn script(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp script");
    write!(f, "{contents}").unwrap();
    f
}

#[test]
fn help_mentions_usage() {
    iox_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("iox"));
}

#[test]
fn version_prints_something() {
    iox_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("iox"));
}

#[test]
fn e1_sums_and_prints() {
    let f = script("1 2 3 +\nout\n");
    iox_bin()
        .arg(f.path())
        .assert()
        .success()
        .stdout("6\n");
}

#[test]
fn e2_joins_with_separator() {
    let f = script("\"a\",\"b\",\"c\" \",\"\njoin out\n");
    iox_bin()
        .arg(f.path())
        .assert()
        .success()
        .stdout("a,b,c\n");
}

#[test]
fn e3_seq_then_sum() {
    let f = script("5 seq\n+ out\n");
    iox_bin()
        .arg(f.path())
        .assert()
        .success()
        .stdout("15\n");
}

#[test]
fn e4_equal_predicate_runs_the_true_branch() {
    let f = script("1 1 ==\n?\n  \"equal\" out\nelse\n  \"different\" out\n");
    iox_bin()
        .arg(f.path())
        .assert()
        .success()
        .stdout("equal\n");
}

#[test]
fn e5_false_predicate_runs_the_else_branch() {
    let f = script("0 ?\n  \"yes\" out\nelse\n  \"no\" out\n");
    iox_bin()
        .arg(f.path())
        .assert()
        .success()
        .stdout("no\n");
}

#[test]
fn e6_mark_does_not_perturb_the_stream() {
    let f = script("\"loop\" mark\n1 out\n");
    iox_bin()
        .arg(f.path())
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn missing_script_exits_nonzero_with_no_stdout() {
    iox_bin()
        .arg("/no/such/script/path.iox")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn uncaught_error_aborts_with_nonzero_and_a_stderr_message() {
    let f = script("1 0 /\nout\n");
    iox_bin()
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("divide by zero"));
}

#[test]
fn comment_and_blank_lines_are_ignored() {
    let f = script("# a comment\n\n1 2 + out\n");
    iox_bin()
        .arg(f.path())
        .assert()
        .success()
        .stdout("3\n");
}
