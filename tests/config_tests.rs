//! Integration tests for config init and the tiered loader.

use data_diff::cli::compare::CompareArgs;
use data_diff::config::{
    CONFIG_FILE_NAME, Config, ConfigLoader, ConfigPaths, DEFAULT_CONFIG_YAML, init_config_file,
};
use data_diff::error::{DiffError, ErrorCode};
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn init_writes_defaults_that_load_back() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join(CONFIG_FILE_NAME);

    init_config_file(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_YAML);

    let paths = ConfigPaths::default().with_explicit_file(&path);
    let loader = ConfigLoader::load_with_env(paths, no_env).unwrap();

    assert_eq!(loader.config(), &Config::default());
    assert_eq!(loader.config_path(), Some(path.as_path()));
}

#[test]
fn init_twice_fails_and_keeps_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    init_config_file(&path).unwrap();
    std::fs::write(&path, "format: table\n").unwrap();

    let err = init_config_file(&path).unwrap_err();

    assert!(matches!(err, DiffError::ConfigAlreadyExists(ref p) if p == &path));
    assert_eq!(err.code(), ErrorCode::ConfigAlreadyExists);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "format: table\n");
}

#[test]
fn explicit_file_replaces_directory_search() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::write(project.join(CONFIG_FILE_NAME), "log_level: error\n").unwrap();

    let explicit = temp.path().join("explicit.yaml");
    std::fs::write(&explicit, "format: yaml\n").unwrap();

    let paths = ConfigPaths::with_dirs(Some(project), None, None).with_explicit_file(&explicit);
    let loader = ConfigLoader::load_with_env(paths, no_env).unwrap();

    assert_eq!(loader.config().log_level, "info");
    assert_eq!(loader.config().format, "yaml");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let paths = ConfigPaths::default().with_explicit_file(temp.path().join("absent.yaml"));

    let err = ConfigLoader::load_with_env(paths, no_env).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IoError);
}

#[test]
fn configured_format_feeds_compare_options() {
    let temp = TempDir::new().unwrap();
    let explicit = temp.path().join("config.yaml");
    std::fs::write(&explicit, "format: table\noutput_file: out.txt\n").unwrap();

    let paths = ConfigPaths::default().with_explicit_file(&explicit);
    let config = ConfigLoader::load_with_env(paths, no_env)
        .unwrap()
        .into_config();

    let args = CompareArgs {
        source: "a".into(),
        target: "b".into(),
        output: None,
        format: None,
        ignore_case: false,
        ignore_fields: Vec::new(),
        show_unchanged: false,
    };

    assert_eq!(args.options(&config).format, "table");
    assert_eq!(
        args.output_path(&config).as_deref(),
        Some(std::path::Path::new("out.txt"))
    );
}
