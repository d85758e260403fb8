//! nglib CLI - Project scaffolding for Angular libraries

use anyhow::Result;
use clap::{Parser, Subcommand};
use nglib_core::tui::CreateArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nglib-tools")]
#[command(about = "CLI for scaffolding Angular library projects")]
#[command(version)]
pub struct Args {
    /// Log generator internals to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Angular library project
    Create(CliCreateArgs),
    /// Check that every template in the template directory exists (for development use)
    CheckTemplates(CheckTemplatesArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir", env = "NGLIB_TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// Project directory to generate into (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Your full name
    #[arg(long)]
    pub author_name: Option<String>,

    /// Your email address
    #[arg(long)]
    pub author_email: Option<String>,

    /// Library name, converted to kebab-case
    #[arg(long)]
    pub library_name: Option<String>,

    /// Package scope such as @acme (empty for none)
    #[arg(long)]
    pub scope: Option<String>,

    /// Git repository url (remembered for the next run)
    #[arg(long)]
    pub git_repository_url: Option<String>,

    /// Test framework: karma or jest
    #[arg(short, long)]
    pub test_framework: Option<String>,

    /// File holding remembered answers
    #[arg(long = "state-file", env = "NGLIB_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Run `npm install` in the generated project
    #[arg(long)]
    pub install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            directory: args.directory,
            author_name: args.author_name,
            author_email: args.author_email,
            library_name: args.library_name,
            scope: args.scope,
            git_repository_url: args.git_repository_url,
            test_framework: args.test_framework,
            state_file: args.state_file,
            install: args.install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CheckTemplatesArgs {
    /// Local directory containing templates to check (for development use)
    #[arg(long = "template-dir", env = "NGLIB_TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,
}

/// Diagnostics go to stderr and stay quiet unless asked for
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "nglib_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn create(create_args: CreateArgs) -> Result<()> {
    let result = nglib_core::run(create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Some(Command::Create(create_args)) => create(create_args.into()).await,
        Some(Command::CheckTemplates(check_args)) => {
            let check = nglib_core::templates::print_template_check(check_args.template_dir)?;
            if !check.is_ok() {
                std::process::exit(1);
            }
            Ok(())
        }
        // No subcommand provided, default to create behavior (interactive mode)
        None => create(CreateArgs::default()).await,
    }
}
