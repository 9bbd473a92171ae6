use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    cargo_bin_cmd!("repo-stats")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--interactive"))
        .stdout(predicate::str::contains("--state"));
}

#[test]
fn test_no_arguments_prints_usage() {
    cargo_bin_cmd!("repo-stats")
        .assert()
        .success()
        .stdout("Usage: repo-stats <owner> <repo> <token>\n");
}

#[test]
fn test_two_arguments_prints_usage() {
    cargo_bin_cmd!("repo-stats")
        .args(["octocat", "Hello-World"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: repo-stats <owner> <repo> <token>"))
        .stdout(predicate::str::contains("Repository:").not());
}

#[test]
fn test_blank_argument_is_rejected() {
    cargo_bin_cmd!("repo-stats")
        .args(["octocat", "Hello-World", "   "])
        .assert()
        .success()
        .stdout("Invalid input. All fields must be filled.\n");
}

#[test]
fn test_interactive_blank_owner_is_rejected() {
    cargo_bin_cmd!("repo-stats")
        .arg("--interactive")
        .write_stdin("ghp_token\n   \nHello-World\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub Token: "))
        .stdout(predicate::str::contains("Repository Owner: "))
        .stdout(predicate::str::contains("Repository Name: "))
        .stdout(predicate::str::ends_with("Invalid input. All fields must be filled.\n"));
}

#[test]
fn test_interactive_empty_stdin_is_rejected() {
    cargo_bin_cmd!("repo-stats")
        .arg("-i")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input. All fields must be filled."));
}

#[test]
fn test_unknown_state_is_a_usage_error() {
    cargo_bin_cmd!("repo-stats")
        .args(["--state", "merged", "octocat", "Hello-World", "ghp_x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("merged"));
}
