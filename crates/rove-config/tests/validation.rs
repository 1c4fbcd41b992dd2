//! Tests for configuration validation.

use std::fs;
use std::path::PathBuf;

use rove_config::{
    ConfigDiscovery, ConfigError, ConfigValidator, FsValidator, RoveConfig, SchemaValidator,
};
use rove_graph::{ContentKind, DefinitionContents, ModuleDefinition, ModuleRule};
use tempfile::TempDir;

fn with_main() -> RoveConfig {
    RoveConfig {
        main: Some(PathBuf::from("index.mjs")),
        ..RoveConfig::default()
    }
}

#[test]
fn validate_requires_main_or_modules() {
    let result = SchemaValidator.validate(&RoveConfig::default());
    assert!(matches!(result, Err(ConfigError::NoEntrypoint)));

    let manual = RoveConfig {
        modules: vec![ModuleDefinition::new(ContentKind::EsModule, "index.mjs")],
        ..RoveConfig::default()
    };
    assert!(SchemaValidator.validate(&manual).is_ok());
}

#[test]
fn validate_rejects_rule_without_globs() {
    let mut cfg = with_main();
    cfg.rules = vec![ModuleRule::new(ContentKind::Text, Vec::<String>::new())];

    match SchemaValidator.validate(&cfg).unwrap_err() {
        ConfigError::EmptyRule { kind } => assert_eq!(kind, ContentKind::Text),
        other => panic!("expected EmptyRule, got {other:?}"),
    }
}

#[test]
fn validate_rejects_invalid_glob() {
    let mut cfg = with_main();
    cfg.rules = vec![ModuleRule::new(ContentKind::Data, ["**/[.bin"])];

    let err = SchemaValidator.validate(&cfg).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRule(_)));
    assert!(err.to_string().contains("**/[.bin"));
}

#[test]
fn validate_rejects_blank_external() {
    let mut cfg = with_main();
    cfg.external = vec!["  ".to_string()];

    assert!(matches!(
        SchemaValidator.validate(&cfg),
        Err(ConfigError::EmptyExternal)
    ));
}

#[test]
fn validate_catches_missing_entry() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = RoveConfig {
        main: Some(PathBuf::from("src/missing.mjs")),
        ..RoveConfig::default()
    };

    match FsValidator::new(dir.path()).validate(&cfg).unwrap_err() {
        ConfigError::EntryNotFound(path) => assert!(path.ends_with("src/missing.mjs")),
        other => panic!("expected EntryNotFound, got {other:?}"),
    }
}

#[test]
fn validate_skips_modules_with_inline_contents() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("index.mjs"), "export {};").expect("write entry");

    let cfg = RoveConfig {
        modules: vec![
            ModuleDefinition::new(ContentKind::EsModule, "index.mjs"),
            ModuleDefinition::new(ContentKind::Text, "virtual.txt")
                .with_contents(DefinitionContents::Text("inline".into())),
        ],
        ..RoveConfig::default()
    };
    assert!(FsValidator::new(dir.path()).validate(&cfg).is_ok());

    let mut missing = cfg.clone();
    missing
        .modules
        .push(ModuleDefinition::new(ContentKind::Data, "absent.bin"));
    assert!(matches!(
        FsValidator::new(dir.path()).validate(&missing),
        Err(ConfigError::ModuleNotFound(_))
    ));
}

#[test]
fn discovered_config_validates_against_disk() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("src")).expect("create src dir");
    fs::write(dir.path().join("src/index.mjs"), "export {};").expect("write entry");
    fs::write(
        dir.path().join("rove.toml"),
        r#"
main = "src/index.mjs"

[[modules]]
type = "Text"
path = "src/greeting.txt"
contents = "hello"
"#,
    )
    .expect("write config");

    let cfg = ConfigDiscovery::new(dir.path()).load().expect("load");
    assert_eq!(
        cfg.modules[0].contents,
        Some(DefinitionContents::Text("hello".into()))
    );
    assert!(FsValidator::new(dir.path()).validate(&cfg).is_ok());
}
