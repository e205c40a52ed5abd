// ABOUTME: Tests for configuration file loading, validation, and merging
// ABOUTME: Covers TOML parsing, XDG path resolution, and hierarchical config precedence

use cloud_search_cli::config::{Config, ConfigAliases};
use serial_test::serial;
use std::collections::HashMap;
use tempfile::TempDir;

#[test]
fn test_config_deserialize_complete() {
    let toml_content = r#"
        items_file = "inventory.json"
        preferred_format = "table"
        default_limit = 25

        [aliases]
        prod = ["search", "tag:production"]
        linodes = ["search", "--type", "linode"]
    "#;

    let config: Config = toml::from_str(toml_content).expect("Should parse valid TOML");

    assert_eq!(config.items_file, Some("inventory.json".to_string()));
    assert_eq!(config.preferred_format, Some("table".to_string()));
    assert_eq!(config.default_limit, Some(25));

    let aliases = config.aliases.unwrap();
    assert_eq!(
        aliases.commands.get("prod"),
        Some(&vec!["search".to_string(), "tag:production".to_string()])
    );
    assert_eq!(aliases.commands.len(), 2);
}

#[test]
fn test_config_deserialize_empty() {
    let config: Config = toml::from_str("").expect("Should parse empty TOML");
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_format_rejected() {
    let result: Result<Config, _> = toml::from_str(r#"preferred_format = "xml""#);
    let error_msg = result.unwrap_err().to_string();
    assert!(error_msg.contains("Invalid format 'xml'"));
    assert!(error_msg.contains("table, json, yaml"));
}

#[test]
fn test_negative_limit_rejected() {
    let result: Result<Config, _> = toml::from_str("default_limit = -5");
    assert!(result.is_err());
}

#[test]
fn test_config_load_hierarchy() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let config_dir = temp_dir.path().join(".config").join("cloudsearch");
    std::fs::create_dir_all(&config_dir).expect("Should create config dir");

    let user_config_path = config_dir.join("config.toml");
    std::fs::write(
        &user_config_path,
        r#"
        items_file = "user.json"
        default_limit = 10

        [aliases]
        prod = ["search", "tag:production"]
    "#,
    )
    .expect("Should write user config");

    let project_config_path = temp_dir.path().join("cloudsearch.toml");
    std::fs::write(
        &project_config_path,
        r#"
        items_file = "project.json"

        [aliases]
        web = ["search", "tag:web"]
    "#,
    )
    .expect("Should write project config");

    let config = Config::load_from_paths(&[
        user_config_path.to_str().unwrap(),
        project_config_path.to_str().unwrap(),
    ])
    .expect("Should load config hierarchy");

    // Later paths override earlier ones
    assert_eq!(config.items_file, Some("project.json".to_string()));
    assert_eq!(config.default_limit, Some(10));

    let aliases = config.aliases.unwrap();
    assert!(aliases.commands.contains_key("prod"));
    assert!(aliases.commands.contains_key("web"));
}

#[test]
fn test_missing_paths_are_skipped() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let missing = temp_dir.path().join("nope.toml");

    let config = Config::load_from_paths(&[missing.to_str().unwrap()])
        .expect("Missing files should be ignored");
    assert_eq!(config, Config::default());
}

#[test]
fn test_broken_file_is_an_error() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let path = temp_dir.path().join("cloudsearch.toml");
    std::fs::write(&path, "items_file = \"x.json\"\n[aliases\n").unwrap();

    let err = Config::load_from_paths(&[path.to_str().unwrap()]).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse TOML config file"));
}

#[test]
fn test_alias_validation() {
    let mut recursive = HashMap::new();
    recursive.insert(
        "again".to_string(),
        vec!["again".to_string(), "tag:x".to_string()],
    );
    assert!(ConfigAliases {
        commands: recursive
    }
    .validate()
    .is_err());

    let mut valid = HashMap::new();
    valid.insert("prod".to_string(), vec!["search".to_string()]);
    assert!(ConfigAliases { commands: valid }.validate().is_ok());
}

#[test]
fn test_recursive_alias_in_file_fails_load() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let path = temp_dir.path().join("cloudsearch.toml");
    std::fs::write(&path, "[aliases]\nloop = [\"loop\"]\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Recursive alias detected: loop"));
}

#[test]
#[serial]
fn test_config_xdg_paths() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let paths = Config::get_config_paths();

    match previous {
        Some(value) => unsafe { std::env::set_var("XDG_CONFIG_HOME", value) },
        None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
    }

    // Project config has the highest precedence
    assert!(paths[0].ends_with("cloudsearch.toml"));

    let xdg_path = temp_dir
        .path()
        .join("cloudsearch")
        .join("config.toml")
        .to_string_lossy()
        .to_string();
    assert_eq!(paths.get(1), Some(&xdg_path));
}

#[test]
#[serial]
fn test_config_load_reads_xdg_file() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let config_dir = temp_dir.path().join("cloudsearch");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "preferred_format = \"json\"\ndefault_limit = 3\n",
    )
    .unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let config = Config::load();

    match previous {
        Some(value) => unsafe { std::env::set_var("XDG_CONFIG_HOME", value) },
        None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
    }

    let config = config.expect("Should load XDG config");
    // A project cloudsearch.toml in the working directory could override this
    if !std::path::Path::new("cloudsearch.toml").exists() {
        assert_eq!(config.preferred_format, Some("json".to_string()));
        assert_eq!(config.default_limit, Some(3));
    }
}
