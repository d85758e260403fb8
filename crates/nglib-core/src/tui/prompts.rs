//! Charm-style CLI prompts using cliclack

use crate::answers::{
    self, AnswerStore, ConfigurationRecord, Defaults, Field, InputSource, PromptKind, PromptSpec,
    RawAnswers, TestFramework,
};
use crate::error::Error;
use crate::hooks::{InstallHook, InstallOptions, PlaygroundHook};
use crate::runtime;
use crate::templates::{Materializer, TemplateRoot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Project directory to generate into (defaults to the current directory)
    pub directory: Option<PathBuf>,

    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub library_name: Option<String>,
    pub scope: Option<String>,
    pub git_repository_url: Option<String>,
    pub test_framework: Option<String>,

    /// Where remembered answers are kept
    pub state_file: Option<PathBuf>,

    /// Install dependencies once the project is written
    pub install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl CreateArgs {
    /// Answers supplied on the command line, keyed by field
    fn preset_answers(&self) -> HashMap<Field, String> {
        [
            (Field::AuthorName, &self.author_name),
            (Field::AuthorEmail, &self.author_email),
            (Field::LibraryName, &self.library_name),
            (Field::Scope, &self.scope),
            (Field::GitRepositoryUrl, &self.git_repository_url),
            (Field::TestFramework, &self.test_framework),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .map(|(field, value)| match field {
            // Accept short framework names; unknown ones are left for the validator to reject
            Field::TestFramework => match value.parse::<TestFramework>() {
                Ok(framework) => (field, framework.label().to_string()),
                Err(_) => (field, value),
            },
            _ => (field, value),
        })
        .collect()
    }
}

/// What to do with a command-line answer for one prompt
#[derive(Debug, PartialEq, Eq)]
enum Preset<'a> {
    /// Valid; use it without asking
    Accepted(&'a str),
    /// Invalid; ask anyway, starting from the given value
    Rejected { value: &'a str, message: String },
    /// Not given on the command line
    Absent,
}

fn check_preset<'a>(prompt: &PromptSpec, preset: &'a HashMap<Field, String>) -> Preset<'a> {
    match preset.get(&prompt.field) {
        Some(value) => match prompt.validate(value) {
            Ok(()) => Preset::Accepted(value),
            Err(message) => Preset::Rejected { value, message },
        },
        None => Preset::Absent,
    }
}

/// Interactive input source.
///
/// Valid answers given on the command line are not asked again. Invalid ones
/// are reported and asked for, and every prompt re-asks until its validator
/// accepts the input.
pub struct ClackSource {
    preset: HashMap<Field, String>,
}

impl ClackSource {
    pub fn new(preset: HashMap<Field, String>) -> Self {
        Self { preset }
    }

    fn prompt(prompt: &PromptSpec, initial: Option<&str>) -> std::io::Result<String> {
        match &prompt.kind {
            PromptKind::Input { default } => {
                let validator = prompt.validator;
                let mut input = cliclack::input(prompt.message).validate(move |value: &String| {
                    match validator {
                        Some(validate) => validate(value),
                        None => Ok(()),
                    }
                });
                if let Some(default) = default {
                    input = input.default_input(default).required(false);
                    if !default.is_empty() {
                        input = input.placeholder(default);
                    }
                }
                if let Some(initial) = initial {
                    input = input.default_input(initial);
                }
                input.interact::<String>()
            }
            PromptKind::Select { choices } => {
                let mut select = cliclack::select(prompt.message);
                for choice in choices {
                    select = select.item(*choice, *choice, "");
                }
                Ok(select.interact()?.to_string())
            }
        }
    }
}

fn prompt_error(e: std::io::Error) -> Error {
    Error::InputUnavailable(e.to_string())
}

#[async_trait]
impl InputSource for ClackSource {
    async fn ask(&mut self, prompts: &[PromptSpec]) -> crate::error::Result<RawAnswers> {
        let mut answers = RawAnswers::new();

        for prompt in prompts {
            let value = match check_preset(prompt, &self.preset) {
                Preset::Accepted(value) => {
                    cliclack::log::info(format!("{} {}", prompt.message, value))
                        .map_err(prompt_error)?;
                    value.to_string()
                }
                Preset::Rejected { value, message } => {
                    tracing::debug!(field = %prompt.field, value, "command-line answer rejected");
                    cliclack::log::warning(format!("{} ({})", message, value))
                        .map_err(prompt_error)?;
                    Self::prompt(prompt, Some(value)).map_err(prompt_error)?
                }
                Preset::Absent => Self::prompt(prompt, None).map_err(prompt_error)?,
            };

            answers.insert(prompt.field, value);
        }

        Ok(answers)
    }
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("Angular Library generator")?;

    // Step 1: Resolve project directory and templates
    let project_dir = select_directory(&args)?;
    let root = setup_template_root(&args.template_dir)?;

    // Step 2: Load remembered answers
    let mut store = load_store(&args)?;

    // Step 3: Ask every question in one batch
    let defaults = Defaults::for_project(&project_dir, &store);
    let config = collect_answers(&args, &defaults).await?;

    if let Err(e) = answers::remember(&mut store, &config) {
        cliclack::log::warning(format!("Could not remember answers: {}", e))?;
    }

    // Step 4: Write the project
    create_project(&root, &config, &project_dir, args.install).await?;

    // Step 5: Check runtimes and show next steps
    check_runtimes()?;
    print_next_steps(&config, &project_dir, args.install)?;

    Ok(())
}

fn setup_template_root(template_dir: &Option<PathBuf>) -> Result<TemplateRoot> {
    let root = TemplateRoot::resolve(template_dir.as_deref())?;
    if template_dir.is_some() {
        cliclack::log::info(format!("Using local templates from {}", root.path().display()))?;
    }
    Ok(root)
}

fn load_store(args: &CreateArgs) -> Result<AnswerStore> {
    let path = args.state_file.clone().or_else(AnswerStore::default_path);
    match path {
        Some(path) => AnswerStore::load(&path)
            .with_context(|| format!("Failed to load remembered answers from {}", path.display())),
        None => Ok(AnswerStore::in_memory()),
    }
}

async fn collect_answers(args: &CreateArgs, defaults: &Defaults) -> Result<ConfigurationRecord> {
    let preset = args.preset_answers();

    let config = if args.yes {
        let mut source = preset
            .into_iter()
            .fold(answers::PresetSource::new(), |source, (field, value)| {
                source.with(field, value)
            });
        answers::collect(&mut source, defaults).await
    } else {
        answers::collect(&mut ClackSource::new(preset), defaults).await
    };

    let config = config.context("Failed to collect answers")?;
    cliclack::log::success(format!(
        "Library: {} ({})",
        config.package_name(),
        config.test_framework
    ))?;
    Ok(config)
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };
    cliclack::log::info(format!("Using directory: {}", path.display()))?;

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

async fn create_project(
    root: &TemplateRoot,
    config: &ConfigurationRecord,
    project_dir: &Path,
    install: bool,
) -> Result<()> {
    let mut materializer = Materializer::new(root.clone()).with_hook(PlaygroundHook::new());
    if install {
        materializer = materializer.with_hook(InstallHook::new(InstallOptions::without_bower()));
    }

    cliclack::log::step("Creating project...")?;

    let report = materializer
        .materialize(config, project_dir)
        .await
        .with_context(|| format!("Failed to create project in {}", project_dir.display()))?;

    cliclack::log::success(format!(
        "Created {} files in {}",
        report.files.len(),
        project_dir.display()
    ))?;

    Ok(())
}

fn check_runtimes() -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let node = runtime::check_node();
    let npm = runtime::check_package_manager(runtime::PackageManager::Npm);

    if node.available && npm.available {
        spinner.stop(format!("Detected runtimes: {}, {}", node, npm));
    } else {
        spinner.stop("Missing runtimes");
        cliclack::log::warning(format!(
            "Detected runtimes: {}, {}. Install Node.js from https://nodejs.org to build the library.",
            node, npm
        ))?;
    }

    Ok(())
}

/// Commands to run after generation
pub fn next_steps(config: &ConfigurationRecord, dir: &Path, installed: bool) -> Vec<String> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    // Step 1: cd to directory if not current
    if current.as_deref() != Some(dir) {
        steps.push(format!("cd {}", dir.display()));
    }

    // Step 2: Install dependencies
    if !installed {
        steps.extend(InstallOptions::without_bower().commands());
    }

    // Step 3: Test, build, and try the playground
    let test_command = match config.test_framework {
        TestFramework::KarmaJasmine => "npm test",
        TestFramework::Jest => "npm test (runs jest)",
    };
    steps.push(test_command.to_string());
    steps.push("npm run build".to_string());
    steps.push("npm run playground".to_string());

    steps
}

fn print_next_steps(config: &ConfigurationRecord, project_dir: &Path, installed: bool) -> Result<()> {
    let steps = next_steps(config, project_dir, installed);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Happy coding! Publish as {}", config.package_name()))?;

    Ok(())
}
