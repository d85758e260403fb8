//! End-to-end generation against the bundled templates

use nglib_core::answers::{self, Defaults, Field, PresetSource};
use nglib_core::{ConfigurationRecord, Materializer, PlaygroundHook, TemplateRoot};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

async fn record(test_framework: &str) -> ConfigurationRecord {
    let mut source = PresetSource::new()
        .with(Field::AuthorName, "Jane Doe")
        .with(Field::AuthorEmail, "jane@example.com")
        .with(Field::LibraryName, "My Cool Lib")
        .with(Field::Scope, "@acme")
        .with(Field::GitRepositoryUrl, "https://github.com/acme/my-cool-lib")
        .with(Field::TestFramework, test_framework);
    answers::collect(&mut source, &Defaults::default())
        .await
        .unwrap()
}

fn read(dir: &Path, relative: &str) -> String {
    std::fs::read_to_string(dir.join(relative))
        .unwrap_or_else(|e| panic!("reading {}: {}", relative, e))
}

/// Every file under `dir`, keyed by relative path
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e.path().strip_prefix(dir).unwrap().to_path_buf();
            (relative, std::fs::read(e.path()).unwrap())
        })
        .collect()
}

#[tokio::test]
async fn test_jest_project_is_fully_rendered() {
    let config = record("jest").await;
    let out = TempDir::new().unwrap();

    let report = Materializer::new(TemplateRoot::bundled().unwrap())
        .materialize(&config, out.path())
        .await
        .unwrap();

    let package = read(out.path(), "package.json");
    assert!(package.contains("\"name\": \"@acme/my-cool-lib\""));
    assert!(package.contains("\"name\": \"Jane Doe\""));
    assert!(package.contains("\"email\": \"jane@example.com\""));
    assert!(package.contains("git+https://github.com/acme/my-cool-lib"));
    assert!(package.contains("jest"));
    assert!(!package.contains("{{"));

    assert!(out.path().join("src/jest.ts").is_file());
    assert!(out.path().join("src/jest-global-mocks.ts").is_file());
    assert!(out.path().join(".gitignore").is_file());
    assert!(out.path().join("src/package.json").is_file());
    assert!(!out.path().join("_package_jest.json").exists());

    assert!(report.files.contains(&PathBuf::from("package.json")));
    assert!(!report.files.iter().any(|f| f.starts_with("playground")));
}

#[tokio::test]
async fn test_karma_project_has_no_jest_files() {
    let config = record("karma + jasmine").await;
    let out = TempDir::new().unwrap();

    Materializer::new(TemplateRoot::bundled().unwrap())
        .materialize(&config, out.path())
        .await
        .unwrap();

    let package = read(out.path(), "package.json");
    assert!(package.contains("karma start tools/karma.conf.js"));
    assert!(!out.path().join("src/jest.ts").exists());
    assert!(!out.path().join("src/jest-global-mocks.ts").exists());
    assert!(out.path().join("tools/karma.conf.js").is_file());
}

#[tokio::test]
async fn test_copied_sources_keep_angular_interpolation() {
    let config = record("jest").await;
    let out = TempDir::new().unwrap();

    Materializer::new(TemplateRoot::bundled().unwrap())
        .materialize(&config, out.path())
        .await
        .unwrap();

    let component = read(out.path(), "src/lib/sample.component.ts");
    assert!(component.contains("{{ greeting }}"));
}

#[tokio::test]
async fn test_generation_is_idempotent() {
    let config = record("jest").await;
    let out = TempDir::new().unwrap();
    let materializer =
        Materializer::new(TemplateRoot::bundled().unwrap()).with_hook(PlaygroundHook::new());

    let first_report = materializer.materialize(&config, out.path()).await.unwrap();
    let first = snapshot(out.path());
    let second_report = materializer.materialize(&config, out.path()).await.unwrap();
    let second = snapshot(out.path());

    assert_eq!(first_report, second_report);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_playground_hook_imports_scoped_package() {
    let config = record("karma + jasmine").await;
    let out = TempDir::new().unwrap();

    let report = Materializer::new(TemplateRoot::bundled().unwrap())
        .with_hook(PlaygroundHook::new())
        .materialize(&config, out.path())
        .await
        .unwrap();

    let index = read(out.path(), "playground/index.ts");
    assert!(index.contains("from '@acme/my-cool-lib'"));
    // Angular template syntax is not a placeholder and survives rendering
    assert!(index.contains("{{ 'Rendered by the playground' | samplePipe }}"));

    let systemjs = read(out.path(), "playground/systemjs.config.js");
    assert!(systemjs.contains("'@acme/my-cool-lib': '../dist'"));

    assert_eq!(
        report.files.last().map(|f| f.starts_with("playground")),
        Some(true)
    );
}
