use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a test command
fn elastic_cluster_info() -> Command {
    Command::cargo_bin("elastic-cluster-info").unwrap()
}

#[test]
fn test_help_flag() {
    elastic_cluster_info()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inventory ElastiCache clusters and compare engine versions",
        ))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_help_short_flag() {
    elastic_cluster_info()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    elastic_cluster_info()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("elastic-cluster-info"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_documents_profile_argument() {
    elastic_cluster_info()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AWS_PROFILE"))
        .stdout(predicate::str::contains("default profile"));
}

#[test]
fn test_two_positional_args_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    elastic_cluster_info()
        .current_dir(dir.path())
        .args(["profile-a", "profile-b"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));

    // A usage error must not leave a report behind.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_flag_is_rejected() {
    elastic_cluster_info()
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
