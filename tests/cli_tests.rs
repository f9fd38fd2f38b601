mod harness;

use harness::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help_contains_description() {
    TestEnv::new()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SCM firmware query and update reports"));
}

#[test]
fn test_version() {
    TestEnv::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fwctl"));
}

#[test]
fn test_subcommands_listed_in_help() {
    TestEnv::new()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_query_help_lists_flags() {
    TestEnv::new()
        .command()
        .args(["query", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--show-host-ports"));
}

#[test]
fn test_report_requires_input_file() {
    TestEnv::new()
        .command()
        .arg("query")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn test_config_show_without_file() {
    let env = TestEnv::new();
    env.command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not created, defaults)"))
        .stdout(predicate::str::contains("verbose = false"))
        .stdout(predicate::str::contains("show_host_ports = false"));
}

#[test]
fn test_config_show_json() {
    let env = TestEnv::with_config("[report]\nverbose = true\n");
    let output = env
        .command()
        .args(["config", "show", "--json"])
        .output()
        .expect("failed to execute");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    assert_eq!(json["report"]["verbose"], true);
    assert_eq!(json["report"]["show_host_ports"], false);
}

#[test]
fn test_config_init_then_refuses_overwrite() {
    let env = TestEnv::new();
    env.command()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config written to"));
    assert!(env.config_path().exists());

    env.command()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    env.command()
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_reported() {
    let env = TestEnv::with_config("[report]\nverbose = \"sometimes\"\n");
    env.command()
        .args(["query", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_empty_input_prints_nothing() {
    TestEnv::new()
        .command()
        .args(["query", "-"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("0 hosts, 0 devices"));
}
