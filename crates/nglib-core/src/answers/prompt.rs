//! Prompt declarations and the input source seam

use super::validate::Validator;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

/// The fixed set of questions asked before generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    AuthorName,
    AuthorEmail,
    LibraryName,
    Scope,
    GitRepositoryUrl,
    TestFramework,
}

impl Field {
    /// All fields, in the order they are asked
    pub const ALL: [Field; 6] = [
        Field::AuthorName,
        Field::AuthorEmail,
        Field::LibraryName,
        Field::Scope,
        Field::GitRepositoryUrl,
        Field::TestFramework,
    ];

    /// Stable key, used for persisted answers and error messages
    pub fn key(&self) -> &'static str {
        match self {
            Field::AuthorName => "authorName",
            Field::AuthorEmail => "authorEmail",
            Field::LibraryName => "libraryName",
            Field::Scope => "scope",
            Field::GitRepositoryUrl => "gitRepositoryUrl",
            Field::TestFramework => "testFramework",
        }
    }

    /// Whether the last answer is remembered as the next default
    pub fn is_remembered(&self) -> bool {
        matches!(self, Field::GitRepositoryUrl)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a question is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Free text with an optional pre-filled default
    Input { default: Option<String> },
    /// Exactly one of a fixed list, no default
    Select { choices: Vec<&'static str> },
}

/// One question handed to an [`InputSource`]
#[derive(Debug, Clone)]
pub struct PromptSpec {
    pub field: Field,
    pub message: &'static str,
    pub kind: PromptKind,
    pub validator: Option<Validator>,
}

impl PromptSpec {
    pub fn input(field: Field, message: &'static str, default: Option<String>) -> Self {
        Self {
            field,
            message,
            kind: PromptKind::Input { default },
            validator: None,
        }
    }

    pub fn select(field: Field, message: &'static str, choices: Vec<&'static str>) -> Self {
        Self {
            field,
            message,
            kind: PromptKind::Select { choices },
            validator: None,
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Run the validator, if any
    pub fn validate(&self, value: &str) -> std::result::Result<(), String> {
        if let PromptKind::Select { choices } = &self.kind {
            if !choices.contains(&value) {
                return Err(format!("Choose one of: {}", choices.join(", ")));
            }
        }
        match self.validator {
            Some(validator) => validator(value),
            None => Ok(()),
        }
    }

    /// Default offered to the user, if any
    pub fn default_value(&self) -> Option<&str> {
        match &self.kind {
            PromptKind::Input { default } => default.as_deref(),
            PromptKind::Select { .. } => None,
        }
    }
}

/// Raw answers, as typed by the user, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnswers {
    values: HashMap<Field, String>,
}

impl RawAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Answer for a field, or [`Error::MissingAnswer`]
    pub fn require(&self, field: Field) -> Result<&str> {
        self.get(field).ok_or(Error::MissingAnswer(field.key()))
    }
}

/// Supplies the whole answer batch for a list of prompts.
///
/// Interactive sources re-ask a question until its validator passes; the
/// collector only provides the predicate and message.
#[async_trait]
pub trait InputSource: Send {
    async fn ask(&mut self, prompts: &[PromptSpec]) -> Result<RawAnswers>;
}

/// Non-interactive source backed by values known up front (CLI flags, tests).
///
/// Missing values fall back to the prompt default. There is nobody to
/// re-prompt, so a value failing its validator is an error.
#[derive(Debug, Clone, Default)]
pub struct PresetSource {
    values: HashMap<Field, String>,
}

impl PresetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }
}

#[async_trait]
impl InputSource for PresetSource {
    async fn ask(&mut self, prompts: &[PromptSpec]) -> Result<RawAnswers> {
        let mut answers = RawAnswers::new();

        for prompt in prompts {
            let value = match self.values.get(&prompt.field) {
                Some(v) => v.clone(),
                None => prompt
                    .default_value()
                    .map(str::to_string)
                    .ok_or(Error::MissingAnswer(prompt.field.key()))?,
            };

            prompt
                .validate(&value)
                .map_err(|message| Error::InvalidAnswer {
                    field: prompt.field.key(),
                    message,
                })?;

            answers.insert(prompt.field, value);
        }

        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::validate::validate_scope;

    fn scope_prompt() -> PromptSpec {
        PromptSpec::input(Field::Scope, "Scope", Some(String::new())).with_validator(validate_scope)
    }

    #[test]
    fn test_select_rejects_unknown_choice() {
        let prompt = PromptSpec::select(Field::TestFramework, "Test framework", vec!["a", "b"]);
        assert!(prompt.validate("a").is_ok());
        assert!(prompt.validate("c").is_err());
        assert_eq!(prompt.default_value(), None);
    }

    #[tokio::test]
    async fn test_preset_uses_default_when_missing() {
        let mut source = PresetSource::new();
        let answers = source.ask(&[scope_prompt()]).await.unwrap();
        assert_eq!(answers.get(Field::Scope), Some(""));
    }

    #[tokio::test]
    async fn test_preset_rejects_invalid_value() {
        let mut source = PresetSource::new().with(Field::Scope, "acme");
        let err = source.ask(&[scope_prompt()]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidAnswer { field: "scope", .. }));
    }

    #[tokio::test]
    async fn test_preset_select_without_value_is_missing() {
        let prompt = PromptSpec::select(Field::TestFramework, "Test framework", vec!["jest"]);
        let mut source = PresetSource::new();
        let err = source.ask(&[prompt]).await.unwrap_err();
        assert!(matches!(err, Error::MissingAnswer("testFramework")));
    }

    #[test]
    fn test_only_repository_url_is_remembered() {
        let remembered: Vec<Field> = Field::ALL
            .iter()
            .copied()
            .filter(Field::is_remembered)
            .collect();
        assert_eq!(remembered, vec![Field::GitRepositoryUrl]);
    }
}
