use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;

fn demo() -> Command {
    let mut cmd = Command::cargo_bin("raii-demo").unwrap();
    cmd.env_remove("RAII_DEMO_FORMAT")
        .env_remove("RAII_DEMO_INITIAL")
        .env_remove("RAII_LOG");
    cmd
}

#[test]
fn test_default_runs_all_scenarios() {
    demo()
        .assert()
        .success()
        .stdout(predicate::str::contains("contains: 10"))
        .stdout(predicate::str::contains("Bar 42!\nFoo! 40\nres: 42\n"))
        .stdout(predicate::str::ends_with("Test\n"));
}

#[rstest]
#[case("basic", "[cleanup] myint")]
#[case("nested", "Foo! 40\n[cleanup] bar\n[cleanup] foo\nres: 42")]
#[case("failed-acquire", "scope skipped: failed to acquire 'myint'")]
fn test_scenario_output(#[case] scenario: &str, #[case] expected: &str) {
    demo()
        .args(["--show-cleanups", scenario])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_failed_acquire_has_no_cleanup() {
    demo()
        .args(["--show-cleanups", "failed-acquire"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[cleanup]").not());
}

#[test]
fn test_initial_from_environment() {
    demo()
        .env("RAII_DEMO_INITIAL", "7")
        .arg("basic")
        .assert()
        .success()
        .stdout(predicate::str::contains("contains: 7"));
}

#[test]
fn test_json_report() {
    let output = demo().args(["--format", "json", "nested"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let scenario = &report["scenarios"][0];
    assert_eq!(scenario["name"], "nested");
    assert_eq!(scenario["result"], 42);

    let cleanups: Vec<&str> = scenario["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["kind"] == "cleanup")
        .filter_map(|e| e["text"].as_str())
        .collect();
    assert_eq!(cleanups, vec!["bar", "foo"]);
}

#[test]
fn test_rejects_overflowing_base() {
    demo()
        .args(["--base", "2147483647", "nested"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no room"));
}
