//! Tests for configuration validation.

use kiln_config::{
    report, ConfigError, ConfigValidator, EsTarget, FsValidator, KilnConfig, SchemaValidator,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scaffold_reference_project(root: &Path) {
    for module in ["src/core/index.js", "src/components/index.js"] {
        let path = root.join(module);
        fs::create_dir_all(path.parent().expect("parent")).expect("create src dirs");
        fs::write(&path, "export {};").expect("write module");
    }
    let three = root.join("node_modules/three");
    fs::create_dir_all(&three).expect("create package dir");
    fs::write(three.join("package.json"), r#"{ "name": "three" }"#).expect("write package.json");
}

#[test]
fn reference_config_passes_with_no_conflicts() {
    let config = KilnConfig::reference();

    assert_eq!(config.build.target, EsTarget::Es2020);
    assert_eq!(config.build.manual_chunks().len(), 3);
    assert!(config.build.manual_chunks().conflicts().is_empty());
    assert!(SchemaValidator.validate(&config).is_ok());

    let report = report(&config);
    assert!(report.is_clean(), "unexpected findings: {report:?}");
}

#[test]
fn fs_validator_accepts_installed_reference_project() {
    let dir = TempDir::new().expect("tempdir");
    scaffold_reference_project(dir.path());

    let result = FsValidator::new(dir.path()).validate(&KilnConfig::reference());
    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn fs_validator_catches_missing_module() {
    let dir = TempDir::new().expect("tempdir");
    scaffold_reference_project(dir.path());
    fs::remove_file(dir.path().join("src/components/index.js")).expect("remove module");

    match FsValidator::new(dir.path())
        .validate(&KilnConfig::reference())
        .unwrap_err()
    {
        ConfigError::ModuleNotFound { path } => {
            assert!(path.ends_with("src/components/index.js"));
        }
        other => panic!("expected ModuleNotFound error, got {other:?}"),
    }
}

#[test]
fn fs_validator_catches_missing_package() {
    let dir = TempDir::new().expect("tempdir");
    scaffold_reference_project(dir.path());
    fs::remove_dir_all(dir.path().join("node_modules/three")).expect("remove package");

    match FsValidator::new(dir.path())
        .validate(&KilnConfig::reference())
        .unwrap_err()
    {
        ConfigError::PackageNotFound { name, .. } => assert_eq!(name, "three"),
        other => panic!("expected PackageNotFound error, got {other:?}"),
    }
}

#[test]
fn fs_validator_resolves_root_absolute_modules_from_project_root() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("src")).expect("create src dir");
    fs::write(dir.path().join("src/main.js"), "export {};").expect("write module");

    let config = KilnConfig::default()
        .with_manual_chunk("main", ["/src/main.js"])
        .expect("config");
    let result = FsValidator::new(dir.path()).validate(&config);
    assert!(result.is_ok(), "{result:?}");

    let missing = KilnConfig::default()
        .with_manual_chunk("main", ["/src/missing.js"])
        .expect("config");
    match FsValidator::new(dir.path()).validate(&missing).unwrap_err() {
        ConfigError::ModuleNotFound { path } => {
            assert_eq!(path, dir.path().join("src/missing.js"));
        }
        other => panic!("expected ModuleNotFound error, got {other:?}"),
    }
}

#[test]
fn fs_validator_checks_parent_dir_specifier_as_path() {
    let dir = TempDir::new().expect("tempdir");
    let app = dir.path().join("app");
    fs::create_dir_all(&app).expect("create app dir");

    let config = KilnConfig::default()
        .with_manual_chunk("parent", [".."])
        .expect("config");
    assert!(FsValidator::new(&app).validate(&config).is_ok());
    assert!(report(&config).warnings.is_empty());
}

#[test]
fn fs_validator_resolves_packages_from_ancestors() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("node_modules/three")).expect("create package dir");
    let app = dir.path().join("packages/app");
    fs::create_dir_all(&app).expect("create app dir");

    let config = KilnConfig::default()
        .with_manual_chunk("three", ["three/examples/jsm/controls/OrbitControls.js"])
        .and_then(|c| c.with_include("three"))
        .expect("config");

    assert!(FsValidator::new(&app).validate(&config).is_ok());
}

#[test]
fn fs_validator_runs_schema_checks_first() {
    let dir = TempDir::new().expect("tempdir");
    let config = KilnConfig::reference()
        .with_manual_chunk("vendor", ["three"])
        .expect("config");

    assert!(matches!(
        FsValidator::new(dir.path()).validate(&config),
        Err(ConfigError::ModuleInMultipleChunks { .. })
    ));
}

#[test]
fn excluded_packages_are_not_flagged_for_prebundling() {
    let mut config = KilnConfig::reference()
        .with_manual_chunk("physics", ["cannon-es"])
        .expect("config");
    config
        .optimize_deps
        .exclude
        .push("cannon-es".parse().expect("specifier"));

    assert!(report(&config).is_clean());
}
