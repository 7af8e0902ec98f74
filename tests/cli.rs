use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn fixperms() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fixperms"));
    cmd.env_remove("FIXPERMS_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[test]
fn demo_tree_is_rewritten_and_node_modules_left_alone() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("demo");
    write_file(&root.join("a/keep.txt"), "hello");
    write_file(&root.join("a/node_modules/dep.js"), "ignored");

    let assert = fixperms().arg(&root).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    assert_eq!(
        stdout,
        format!("Processing {}\nFixed keep.txt\n", display(&root))
    );
    assert!(!stdout.contains("dep.js"));
    assert_eq!(fs::read_to_string(root.join("a/keep.txt")).unwrap(), "hello");
    assert_eq!(
        fs::read_to_string(root.join("a/node_modules/dep.js")).unwrap(),
        "ignored"
    );
}

#[test]
fn missing_root_produces_no_output() {
    let temp = tempdir().unwrap();

    fixperms()
        .arg(temp.path().join("does-not-exist"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn every_default_exclusion_is_pruned() {
    let temp = tempdir().unwrap();
    for dir in ["node_modules", ".git", "bin", "obj", ".vs", "dist", ".vscode"] {
        write_file(&temp.path().join("src").join(dir).join("inner.txt"), dir);
    }
    write_file(&temp.path().join("src/main.ts"), "export {}");

    fixperms()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed main.ts"))
        .stdout(predicate::str::contains("inner.txt").not());
}

#[test]
fn extra_excludes_and_no_defaults() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("target/out.o"), "obj");
    write_file(&temp.path().join("node_modules/dep.js"), "dep");

    fixperms()
        .arg("--no-default-excludes")
        .arg("--exclude")
        .arg("target")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed dep.js"))
        .stdout(predicate::str::contains("out.o").not());
}

#[test]
fn invalid_utf8_is_dropped_by_default_and_kept_with_bytes() {
    let temp = tempdir().unwrap();
    let lossy = temp.path().join("lossy/data.bin");
    let raw = temp.path().join("raw/data.bin");
    for path in [&lossy, &raw] {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, [b'h', b'i', 0xFF]).unwrap();
    }

    fixperms().arg(lossy.parent().unwrap()).assert().success();
    fixperms()
        .arg("--encoding")
        .arg("bytes")
        .arg(raw.parent().unwrap())
        .assert()
        .success();

    assert_eq!(fs::read(&lossy).unwrap(), b"hi");
    assert_eq!(fs::read(&raw).unwrap(), [b'h', b'i', 0xFF]);
}

#[test]
fn skip_encoding_reports_and_leaves_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("data.bin");
    fs::write(&path, [0xFF, 0x00]).unwrap();

    fixperms()
        .arg("--encoding")
        .arg("skip")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Skipped {}: invalid UTF-8",
            display(&path)
        )));

    assert_eq!(fs::read(&path).unwrap(), [0xFF, 0x00]);
}

#[test]
fn files_named_like_temp_files_survive() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "A");
    write_file(&temp.path().join(".a.txt.fixperms.tmp"), "USER DATA");

    fixperms()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed .a.txt.fixperms.tmp"))
        .stdout(predicate::str::contains("Fixed a.txt"));

    assert_eq!(
        fs::read_to_string(temp.path().join(".a.txt.fixperms.tmp")).unwrap(),
        "USER DATA"
    );
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 2);
}

#[test]
fn long_file_names_are_rewritten() {
    let temp = tempdir().unwrap();
    let name = "x".repeat(250);
    write_file(&temp.path().join(&name), "long");

    fixperms()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Fixed {}", name)))
        .stdout(predicate::str::contains("Error").not());
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_logged_and_walk_continues() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempdir().unwrap();
    let locked = temp.path().join("b-locked");
    write_file(&temp.path().join("a.txt"), "a");
    write_file(&locked.join("inner.txt"), "inner");
    write_file(&temp.path().join("c.txt"), "c");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // privileged users can read the directory anyway
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let assert = fixperms().arg(temp.path()).assert().success();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains(&format!("Error processing {}: ", display(&locked))));
    assert!(stdout.contains("Fixed a.txt"));
    assert!(stdout.contains("Fixed c.txt"));
}

#[test]
fn strict_mode_fails_on_errors() {
    let temp = tempdir().unwrap();
    let file_root = temp.path().join("plain.txt");
    write_file(&file_root, "hello");

    fixperms()
        .arg("--strict")
        .arg(&file_root)
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!(
            "Error processing {}: not a directory",
            display(&file_root)
        )))
        .stderr(predicate::str::contains("run finished with errors: 1"));
}

#[test]
fn dry_run_summary_counts_would_fix() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "a");

    fixperms()
        .arg("--dry-run")
        .arg("--summary")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "Would fix a.txt\nSummary: 1 would fix, 0 skipped, 0 errors\n",
        ));
}

#[test]
fn strict_mode_succeeds_without_errors() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("keep.txt"), "hello");

    fixperms().arg("--strict").arg(temp.path()).assert().success();
}

#[test]
fn dry_run_changes_nothing() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("data.bin");
    fs::write(&path, [b'a', 0xFF]).unwrap();

    fixperms()
        .arg("--dry-run")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would fix data.bin"));

    assert_eq!(fs::read(&path).unwrap(), [b'a', 0xFF]);
}

#[test]
fn jsonl_output_and_summary() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("one.txt"), "1");
    write_file(&temp.path().join("two.txt"), "2");

    let assert = fixperms()
        .arg("--format")
        .arg("jsonl")
        .arg("--summary")
        .arg("--verify")
        .arg(temp.path())
        .assert()
        .success();

    let events: Vec<Value> = String::from_utf8_lossy(&assert.get_output().stdout)
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid jsonl line"))
        .collect();

    let kinds: Vec<_> = events
        .iter()
        .map(|e| e["event"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["processing", "fixed", "fixed", "summary"]);
    assert_eq!(events[1]["name"], "one.txt");
    assert_eq!(events[3]["fixed"], 2);
    assert_eq!(events[3]["errors"], 0);
}

#[test]
fn config_file_supplies_roots_and_excludes() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    write_file(&root.join("generated/a.txt"), "a");
    write_file(&root.join("src/b.txt"), "b");

    let config = temp.path().join("fixperms.json");
    fs::write(
        &config,
        serde_json::json!({
            "roots": [root],
            "excluded_names": ["generated"]
        })
        .to_string(),
    )
    .unwrap();

    fixperms()
        .env("FIXPERMS_CONFIG", &config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed b.txt"))
        .stdout(predicate::str::contains("a.txt").not());
}

#[test]
fn invalid_config_file_is_fatal() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("bad.json");
    fs::write(&config, "{ not json").unwrap();

    fixperms()
        .arg("--config")
        .arg(&config)
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"))
        .stdout(predicate::str::is_empty());
}
