//! Answer collection
//!
//! This module provides:
//! - The configuration record produced by the prompts ([`ConfigurationRecord`])
//! - Prompt declarations and the [`InputSource`] seam
//! - Field validators and filters (slugify, scope normalization)
//! - The persisted [`AnswerStore`] for remembered defaults

pub mod prompt;
pub mod store;
pub mod validate;

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use prompt::{Field, InputSource, PresetSource, PromptKind, PromptSpec, RawAnswers};
pub use store::AnswerStore;

/// Repository URL offered when nothing has been remembered yet
pub const DEFAULT_GIT_REPOSITORY_URL: &str = "https://github.com/username/repo";

/// Test framework wired into the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestFramework {
    KarmaJasmine,
    Jest,
}

impl TestFramework {
    pub const ALL: [TestFramework; 2] = [TestFramework::KarmaJasmine, TestFramework::Jest];

    /// Label shown in the selection prompt
    pub fn label(&self) -> &'static str {
        match self {
            TestFramework::KarmaJasmine => "karma + jasmine",
            TestFramework::Jest => "jest",
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TestFramework {
    type Err = Error;

    /// Accepts the prompt labels plus the short forms `karma` and `jest`
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "karma + jasmine" | "karma" | "jasmine" => Ok(TestFramework::KarmaJasmine),
            "jest" => Ok(TestFramework::Jest),
            _ => Err(Error::UnknownTestFramework(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryName {
    pub original: String,
    pub kebab_case: String,
}

/// Fully validated answers; built once, read by the materializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    pub author: Author,
    pub library_name: LibraryName,
    /// Empty, or `@org/`, ready to prefix an import path
    pub scope: String,
    pub git_repository_url: String,
    pub test_framework: TestFramework,
}

impl ConfigurationRecord {
    /// Published package name, e.g. `@acme/my-cool-lib`
    pub fn package_name(&self) -> String {
        format!("{}{}", self.scope, self.library_name.kebab_case)
    }
}

/// Defaults offered by the prompts, injected rather than read from ambient state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub library_name: String,
    pub git_repository_url: String,
}

impl Defaults {
    /// Derive defaults from the project directory name and remembered answers
    pub fn for_project(project_dir: &Path, store: &AnswerStore) -> Self {
        let app_name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            author_name: None,
            author_email: None,
            library_name: validate::slugify(&app_name),
            git_repository_url: store
                .get(Field::GitRepositoryUrl)
                .unwrap_or(DEFAULT_GIT_REPOSITORY_URL)
                .to_string(),
        }
    }
}

/// The prompts asked for one generation, in order
pub fn prompt_specs(defaults: &Defaults) -> Vec<PromptSpec> {
    let library_default = if defaults.library_name.is_empty() {
        None
    } else {
        Some(defaults.library_name.clone())
    };

    vec![
        PromptSpec::input(
            Field::AuthorName,
            "Your full name:",
            defaults.author_name.clone(),
        )
        .with_validator(validate::validate_author_name),
        PromptSpec::input(
            Field::AuthorEmail,
            "Your email address:",
            defaults.author_email.clone(),
        )
        .with_validator(validate::validate_email),
        PromptSpec::input(
            Field::LibraryName,
            "Your library name (kebab-case)",
            library_default,
        )
        .with_validator(validate::validate_library_name),
        PromptSpec::input(
            Field::Scope,
            "Your library scope (eg: @angular) leave blank for none",
            Some(String::new()),
        )
        .with_validator(validate::validate_scope),
        PromptSpec::input(
            Field::GitRepositoryUrl,
            "Git repository url",
            Some(defaults.git_repository_url.clone()),
        ),
        PromptSpec::select(
            Field::TestFramework,
            "Test framework",
            TestFramework::ALL.iter().map(TestFramework::label).collect(),
        ),
    ]
}

/// Ask every prompt in one batch and build the configuration record.
///
/// Answers are re-validated here so a misbehaving source can never produce a
/// partially valid record.
pub async fn collect<S: InputSource + ?Sized>(
    source: &mut S,
    defaults: &Defaults,
) -> Result<ConfigurationRecord> {
    let prompts = prompt_specs(defaults);
    let answers = source.ask(&prompts).await?;

    for prompt in &prompts {
        let value = answers.require(prompt.field)?;
        prompt
            .validate(value)
            .map_err(|message| Error::InvalidAnswer {
                field: prompt.field.key(),
                message,
            })?;
    }

    let library_name = validate::slugify(answers.require(Field::LibraryName)?);
    let record = ConfigurationRecord {
        author: Author {
            name: answers.require(Field::AuthorName)?.to_string(),
            email: answers.require(Field::AuthorEmail)?.to_string(),
        },
        library_name: LibraryName {
            original: library_name.clone(),
            kebab_case: library_name,
        },
        scope: validate::normalize_scope(answers.require(Field::Scope)?),
        git_repository_url: answers.require(Field::GitRepositoryUrl)?.to_string(),
        test_framework: answers.require(Field::TestFramework)?.parse()?,
    };

    tracing::info!(
        package = %record.package_name(),
        test_framework = %record.test_framework,
        "collected answers"
    );

    Ok(record)
}

/// Persist the remembered fields of a record
pub fn remember(store: &mut AnswerStore, record: &ConfigurationRecord) -> Result<()> {
    store.remember(Field::GitRepositoryUrl, &record.git_repository_url);
    store.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    fn jane() -> PresetSource {
        PresetSource::new()
            .with(Field::AuthorName, "Jane Doe")
            .with(Field::AuthorEmail, "jane@example.com")
            .with(Field::LibraryName, "My Cool Lib")
            .with(Field::Scope, "@acme")
            .with(Field::GitRepositoryUrl, "https://github.com/acme/lib")
            .with(Field::TestFramework, "jest")
    }

    #[tokio::test]
    async fn test_collect_example_scenario() {
        let record = collect(&mut jane(), &Defaults::default()).await.unwrap();

        assert_eq!(record.author.name, "Jane Doe");
        assert_eq!(record.author.email, "jane@example.com");
        assert_eq!(record.library_name.kebab_case, "my-cool-lib");
        assert_eq!(record.library_name.original, "my-cool-lib");
        assert_eq!(record.scope, "@acme/");
        assert_eq!(record.git_repository_url, "https://github.com/acme/lib");
        assert_eq!(record.test_framework, TestFramework::Jest);
        assert_eq!(record.package_name(), "@acme/my-cool-lib");
    }

    #[tokio::test]
    async fn test_collect_uses_defaults() {
        let defaults = Defaults {
            author_name: Some("Jane Doe".to_string()),
            author_email: Some("jane@example.com".to_string()),
            library_name: "angular-widgets".to_string(),
            git_repository_url: "https://example.com/remembered".to_string(),
        };
        let mut source = PresetSource::new().with(Field::TestFramework, "karma + jasmine");

        let record = collect(&mut source, &defaults).await.unwrap();
        assert_eq!(record.library_name.kebab_case, "angular-widgets");
        assert_eq!(record.scope, "");
        assert_eq!(record.git_repository_url, "https://example.com/remembered");
        assert_eq!(record.test_framework, TestFramework::KarmaJasmine);
    }

    #[tokio::test]
    async fn test_repository_url_is_not_validated() {
        let mut source = jane().with(Field::GitRepositoryUrl, "not a url at all");
        let record = collect(&mut source, &Defaults::default()).await.unwrap();
        assert_eq!(record.git_repository_url, "not a url at all");
    }

    /// Returns whatever it was built with, ignoring validators
    struct CarelessSource(RawAnswers);

    #[async_trait]
    impl InputSource for CarelessSource {
        async fn ask(&mut self, _prompts: &[PromptSpec]) -> Result<RawAnswers> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_collect_revalidates_source_answers() {
        let mut answers = RawAnswers::new();
        answers.insert(Field::AuthorName, "Jane Doe");
        answers.insert(Field::AuthorEmail, "not-an-email");
        answers.insert(Field::LibraryName, "lib");
        answers.insert(Field::Scope, "");
        answers.insert(Field::GitRepositoryUrl, "");
        answers.insert(Field::TestFramework, "jest");

        let err = collect(&mut CarelessSource(answers), &Defaults::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAnswer { field: "authorEmail", .. }));
    }

    #[tokio::test]
    async fn test_collect_missing_answer() {
        let mut answers = RawAnswers::new();
        answers.insert(Field::AuthorName, "Jane Doe");

        let err = collect(&mut CarelessSource(answers), &Defaults::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingAnswer("authorEmail")));
    }

    struct ClosedSource;

    #[async_trait]
    impl InputSource for ClosedSource {
        async fn ask(&mut self, _prompts: &[PromptSpec]) -> Result<RawAnswers> {
            Err(Error::InputUnavailable("stdin is closed".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unavailable_source_is_fatal() {
        let err = collect(&mut ClosedSource, &Defaults::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InputUnavailable(_)));
    }

    #[test]
    fn test_defaults_from_project_dir() {
        let mut store = AnswerStore::in_memory();
        let defaults = Defaults::for_project(&PathBuf::from("/work/My Fancy_Lib"), &store);
        assert_eq!(defaults.library_name, "my-fancy-lib");
        assert_eq!(defaults.git_repository_url, DEFAULT_GIT_REPOSITORY_URL);

        store.remember(Field::GitRepositoryUrl, "https://github.com/acme/last");
        let defaults = Defaults::for_project(&PathBuf::from("/work/lib"), &store);
        assert_eq!(defaults.git_repository_url, "https://github.com/acme/last");
    }

    #[test]
    fn test_test_framework_parsing() {
        assert_eq!(
            "karma + jasmine".parse::<TestFramework>().unwrap(),
            TestFramework::KarmaJasmine
        );
        assert_eq!("Jest".parse::<TestFramework>().unwrap(), TestFramework::Jest);
        assert!("mocha".parse::<TestFramework>().is_err());
    }

    #[test]
    fn test_prompt_order_and_kinds() {
        let prompts = prompt_specs(&Defaults::default());
        let fields: Vec<Field> = prompts.iter().map(|p| p.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());

        let framework = prompts.last().unwrap();
        assert_eq!(
            framework.kind,
            PromptKind::Select {
                choices: vec!["karma + jasmine", "jest"]
            }
        );
    }
}
