//! Integration tests for the linkweight CLI
//!
//! These tests run the linkweight binary against temporary vaults.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Get a Command for linkweight
fn linkweight() -> Command {
    cargo_bin_cmd!("linkweight")
}

fn write_note(root: &Path, key: &str, content: &str) {
    let path = root.join(key);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn write_config(root: &Path, content: &str) {
    let dir = root.join(".linkweight");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

/// A→B→C plus A→C
fn chain_vault(root: &Path) {
    write_note(root, "A.md", "Links to [[B]] and [[C]].\n");
    write_note(root, "B.md", "See [[C]].\n");
    write_note(root, "C.md", "Leaf.\n");
}

// ============================================================================
// Help and exit codes
// ============================================================================

#[test]
fn test_help_flag() {
    linkweight()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: linkweight"))
        .stdout(predicate::str::contains("sizes"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_unknown_format_exit_code_2() {
    linkweight()
        .args(["--format", "xml", "tags"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_argument_json_usage_error() {
    linkweight()
        .args(["--format", "json", "sizes", "--bogus-flag"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_missing_vault_exit_code_3() {
    let dir = tempdir().unwrap();
    linkweight()
        .arg("--vault")
        .arg(dir.path().join("nope"))
        .arg("sizes")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("vault not found"));
}

// ============================================================================
// sizes
// ============================================================================

#[test]
fn test_sizes_chain_with_diamond() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .arg("sizes")
        .assert()
        .success()
        .stdout(predicate::str::contains("A.md  6  (weight 3)"))
        .stdout(predicate::str::contains("B.md  4  (weight 2)"))
        .stdout(predicate::str::contains("C.md  2  (weight 1)"));
}

#[test]
fn test_sizes_depth_one_counts_boundary_nodes() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());
    write_config(dir.path(), "maxDepth = 1\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["sizes", "A", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A.md  6  (weight 3)"))
        .stdout(predicate::str::contains("B.md  4  (weight 2)"));
}

#[test]
fn test_sizes_manual_override_ignores_max_size() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "Hub.md", "---\nnode_size: 10\n---\n[[Leaf]]\n");
    write_note(dir.path(), "Leaf.md", "leaf\n");
    write_config(dir.path(), "maxSize = 5\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["sizes", "Hub.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hub.md  10  (manual)"));
}

#[test]
fn test_sizes_manual_override_with_numeric_tags() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "Year.md", "---\nnode_size: 10\ntags: 2024\n---\n[[Leaf]]\n");
    write_note(dir.path(), "Leaf.md", "leaf\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["sizes", "Year"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Year.md  10  (manual)"))
        .stderr(predicate::str::contains("frontmatter").not());
}

#[test]
fn test_sizes_folder_exclusion_aligns_on_boundary() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "Archive/Notes/x.md", "old\n");
    write_note(dir.path(), "ArchiveX/y.md", "current\n");
    write_config(dir.path(), "excludeFolders = [\"Archive\"]\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .arg("sizes")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Archive/Notes/x.md  -  (excluded: folder Archive)",
        ))
        .stdout(predicate::str::contains("ArchiveX/y.md  2  (weight 1)"));
}

#[test]
fn test_sizes_title_regex_exclusion() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "Draft Ideas.md", "x\n");
    write_note(dir.path(), "My Draft.md", "y\n");
    write_config(dir.path(), "excludeTitles = [\"/^Draft.*/\"]\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["sizes", "--assigned-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("My Draft.md  2"))
        .stdout(predicate::str::contains("Draft Ideas.md").not());
}

#[test]
fn test_sizes_json_output() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());

    let output = linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["--format", "json", "sizes", "A"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["key"], "A.md");
    assert_eq!(rows[0]["outcome"], "computed");
    assert_eq!(rows[0]["weight"], 3);
    assert_eq!(rows[0]["size"], 6.0);
}

#[test]
fn test_sizes_records_output() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["--format", "records", "sizes", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode=sizes nodes=1"))
        .stdout(predicate::str::contains(
            "S C.md outcome=computed weight=1 size=2",
        ));
}

// ============================================================================
// weight / excluded / tags
// ============================================================================

#[test]
fn test_weight_missing_node_exit_code_3() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["weight", "Nowhere"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("node not found"));
}

#[test]
fn test_weight_reports_reach() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["weight", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weight:       3"))
        .stdout(predicate::str::contains("visited:      3"));
}

#[test]
fn test_excluded_by_tag() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "a.md", "---\ntags: [private, work]\n---\nbody\n");
    write_config(dir.path(), "excludeTags = [\"#private\"]\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["excluded", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.md: excluded (tag #private)"));
}

#[test]
fn test_tags_lists_vault_tags() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "a.md", "---\ntags: [work, ideas]\n---\n");
    write_note(dir.path(), "b.md", "---\ntag: \"#work\"\n---\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("#ideas"))
        .stdout(predicate::str::contains("#work"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_check_rejects_bad_regex() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "excludeTitles = [\"/(unclosed/\"]\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["config", "check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid title pattern"));
}

#[test]
fn test_sizes_survive_bad_regex() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());
    write_config(dir.path(), "excludeTitles = [\"/(unclosed/\", \"B\"]\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["sizes", "B", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B.md  -  (excluded: title B)"))
        .stdout(predicate::str::contains("C.md  2  (weight 1)"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = tempdir().unwrap();

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join(".linkweight/config.toml").exists());

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_init_force_keeps_unknown_keys() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "maxDepth = 7\nthemeColor = \"teal\"\n");

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join(".linkweight/config.toml")).unwrap();
    assert!(text.contains("themeColor = \"teal\""));
    assert!(text.contains("maxDepth = 3"));
}

#[test]
fn test_config_show_json_defaults() {
    let dir = tempdir().unwrap();

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["--format", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sizeMultiplier\": 2.0"))
        .stdout(predicate::str::contains("\"maxDepth\": 3"));
}

// ============================================================================
// watch
// ============================================================================

#[test]
fn test_watch_single_pass() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["watch", "--passes", "1", "--interval-ms", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pass 1: 3 computed, 0 manual, 0 excluded, 0 missing",
        ))
        .stdout(predicate::str::contains("  A.md  6"));
}

#[test]
fn test_watch_zero_passes_is_usage_error() {
    let dir = tempdir().unwrap();
    chain_vault(dir.path());

    linkweight()
        .arg("--vault")
        .arg(dir.path())
        .args(["watch", "--passes", "0"])
        .assert()
        .code(2);
}
