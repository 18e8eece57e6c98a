//! XML config loading and environment overrides.

use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use vfs_move::{load_config, load_config_from_xml_path, Config, Environment, LogLevel};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");
    let cfg_path = td.path().join("config.xml");
    let temp_root = td.path().join("tmp");
    let data_root = td.path().join("data");
    let xml = format!(
        r#"
<config>
  <app_name>demo</app_name>
  <temp_root>{}</temp_root>
  <app_data_root>{}</app_data_root>
  <scratch_folder>Scratch</scratch_folder>
  <force_emulated_move>true</force_emulated_move>
  <log_level>debug</log_level>
</config>
"#,
        temp_root.display(),
        data_root.display()
    );
    fs::write(&cfg_path, xml).expect("write config");

    let cfg = load_config_from_xml_path(&cfg_path).expect("load config");
    assert_eq!(cfg.app_name, "demo");
    assert_eq!(cfg.temp_root, temp_root);
    assert_eq!(cfg.app_data_root, data_root);
    assert_eq!(cfg.scratch_folder, "Scratch");
    assert!(cfg.force_emulated_move);
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert!(cfg.log_file.is_none());

    let env = Environment::from_config(&cfg).expect("build environment");
    assert!(env.force_emulated_move());
    assert!(temp_root.is_dir());
    assert!(data_root.is_dir());
}

#[test]
fn unknown_fields_are_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><download_base>/x</download_base></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn invalid_scratch_folder_fails_validation() {
    let td = tempdir().unwrap();
    let cfg = Config {
        temp_root: td.path().join("tmp"),
        app_data_root: td.path().join("data"),
        scratch_folder: "a/b".into(),
        ..Config::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
#[serial]
fn env_names_config_file_and_forces_emulation() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("custom.xml");
    fs::write(&cfg_path, "<config><scratch_folder>Moves</scratch_folder></config>").unwrap();
    unsafe {
        std::env::set_var("VFS_MOVE_CONFIG", &cfg_path);
        std::env::set_var("VFS_MOVE_FORCE_EMULATED_MOVE", "yes");
    }

    let cfg = load_config();

    unsafe {
        std::env::remove_var("VFS_MOVE_CONFIG");
        std::env::remove_var("VFS_MOVE_FORCE_EMULATED_MOVE");
    }
    let cfg = cfg.expect("load config");
    assert_eq!(cfg.scratch_folder, "Moves");
    assert!(cfg.force_emulated_move);
}

#[test]
#[serial]
fn missing_env_config_file_is_an_error() {
    let td = tempdir().unwrap();
    unsafe {
        std::env::set_var("VFS_MOVE_CONFIG", td.path().join("missing.xml"));
    }
    let result = load_config();
    unsafe {
        std::env::remove_var("VFS_MOVE_CONFIG");
    }
    assert!(result.is_err());
}
