//! XML config parsing and location lookup, without touching user state.

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use file_organizer::config::xml::{LoadResult, load_or_init};
use file_organizer::config::{CONFIG_ENV, load_config_file};
use file_organizer::{Config, LogLevel};

#[test]
fn reads_every_option() {
    let td = tempdir().expect("create tempdir");
    let cfg_path = td.path().join("config.xml");
    let src = td.path().join("in");
    let dest = td.path().join("out");
    let logs = td.path().join("logs");

    let xml = format!(
        r#"
<config>
  <source_folder>{}</source_folder>
  <destination_folder>{}</destination_folder>
  <source_files_ext>.AVI, .mkv</source_files_ext>
  <recursive>false</recursive>
  <log_location>{}</log_location>
  <enable_log>true</enable_log>
  <enable_file_log>false</enable_file_log>
  <enable_console_log>true</enable_console_log>
  <log_level>debug</log_level>
  <generate_csv>false</generate_csv>
  <csv_report_name>moves.csv</csv_report_name>
</config>
"#,
        src.display(),
        dest.display(),
        logs.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let cfg = Config::from_file(load_config_file(&cfg_path).unwrap()).unwrap();
    assert_eq!(cfg.source_folder, src);
    assert_eq!(cfg.destination_folder, dest);
    assert_eq!(cfg.log_location, logs);
    assert!(!cfg.recursive);
    assert!(!cfg.enable_file_log);
    assert!(!cfg.generate_csv);
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.csv_report_path(), logs.join("moves.csv"));
    assert_eq!(cfg.extensions.iter().collect::<Vec<_>>(), vec![".avi", ".mkv"]);
}

#[test]
fn empty_destination_falls_back_to_source() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config><source_folder>/media/in</source_folder><destination_folder></destination_folder></config>",
    )
    .unwrap();
    let cfg = Config::from_file(load_config_file(&cfg_path).unwrap()).unwrap();
    assert_eq!(cfg.destination_folder, PathBuf::from("/media/in"));
    assert_eq!(cfg.log_location, PathBuf::from("/media/in"));
}

#[test]
#[serial]
fn env_variable_selects_the_file() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("env.xml");
    fs::write(&cfg_path, "<config><source_folder>/env/src</source_folder></config>").unwrap();

    unsafe { std::env::set_var(CONFIG_ENV, &cfg_path) };
    let loaded = load_or_init(None, false);
    unsafe { std::env::remove_var(CONFIG_ENV) };

    match loaded.unwrap() {
        LoadResult::Loaded { file, path } => {
            assert_eq!(path, cfg_path);
            assert_eq!(file.source_folder.as_deref(), Some("/env/src"));
        }
        other => panic!("expected a loaded config, got {other:?}"),
    }
}

#[test]
#[serial]
fn explicit_path_beats_env_variable() {
    let td = tempdir().unwrap();
    let env_path = td.path().join("env.xml");
    let cli_path = td.path().join("cli.xml");
    fs::write(&env_path, "<config><source_folder>/env</source_folder></config>").unwrap();
    fs::write(&cli_path, "<config><source_folder>/cli</source_folder></config>").unwrap();

    unsafe { std::env::set_var(CONFIG_ENV, &env_path) };
    let loaded = load_or_init(Some(&cli_path), false);
    unsafe { std::env::remove_var(CONFIG_ENV) };

    let LoadResult::Loaded { file, .. } = loaded.unwrap() else {
        panic!("expected a loaded config");
    };
    assert_eq!(file.source_folder.as_deref(), Some("/cli"));
}
