//! Runs the built binary against temporary trees with an isolated HOME.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn organizer(home: &Path) -> Command {
    let me = assert_cmd::cargo::cargo_bin!("file_organizer");
    let mut cmd = Command::new(me);
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("FILE_ORGANIZER_CONFIG");
    cmd
}

#[test]
fn organizes_a_tree_and_writes_reports() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    let dest = td.path().join("out");
    fs::create_dir_all(src.join("season")).unwrap();
    fs::write(src.join("season/ep1.mkv"), b"1").unwrap();
    fs::write(src.join("trailer.AVI"), b"t").unwrap();

    let out = organizer(td.path())
        .arg("--source-folder")
        .arg(&src)
        .arg("--destination-folder")
        .arg(&dest)
        .arg("--no-console-log")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    assert!(dest.join("ep1/ep1.mkv").is_file());
    assert!(dest.join("trailer/trailer.AVI").is_file());
    assert!(!src.join("season").exists(), "emptied subfolder should be removed");

    let report = fs::read_to_string(dest.join("file_organizer_report.csv")).unwrap();
    assert_eq!(report.lines().count(), 3);
    let log = fs::read_to_string(dest.join("file_organizer.log")).unwrap();
    assert!(log.contains("run finished"));
}

#[test]
fn invalid_log_level_fails_before_touching_anything() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    let dest = td.path().join("out");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a.mkv"), b"a").unwrap();

    let out = organizer(td.path())
        .arg("--source-folder")
        .arg(&src)
        .arg("--destination-folder")
        .arg(&dest)
        .args(["--log-level", "LOUD"])
        .output()
        .expect("spawn binary");

    assert!(!out.status.success());
    assert!(!dest.exists());
    assert!(src.join("a.mkv").exists());
}

#[test]
fn blank_source_in_config_fails() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config><source_folder> </source_folder></config>").unwrap();

    let out = organizer(td.path())
        .arg("--config")
        .arg(&cfg)
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("source_folder"));
}

#[cfg(target_os = "linux")]
#[test]
fn first_run_writes_a_template() {
    let td = tempdir().unwrap();
    let out = organizer(td.path()).output().expect("spawn binary");
    assert!(out.status.success());
    assert!(td.path().join(".config/file_organizer/config.xml").is_file());
}

#[test]
fn print_config_succeeds() {
    let td = tempdir().unwrap();
    let out = organizer(td.path())
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
}
