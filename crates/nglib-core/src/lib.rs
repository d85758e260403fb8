//! nglib Core - Scaffolding for Angular library projects
//!
//! This library asks a fixed set of questions (author, library name, scope,
//! repository URL, test framework) and writes a ready-to-build Angular library
//! project from a bundled template set.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Answers** - Prompt declarations, validators, and the immutable
//!   [`ConfigurationRecord`] built from one batch of answers
//! - **Layer 2: Materialization** - The static template [`Catalog`], placeholder
//!   rendering, and the [`Materializer`] with its ordered post hooks
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use nglib_core::answers::{self, Defaults, Field, PresetSource};
//! use nglib_core::{Materializer, PlaygroundHook, TemplateRoot};
//!
//! let mut source = PresetSource::new()
//!     .with(Field::AuthorName, "Jane Doe")
//!     .with(Field::AuthorEmail, "jane@example.com")
//!     .with(Field::TestFramework, "jest");
//! let config = answers::collect(&mut source, &Defaults::default()).await?;
//!
//! Materializer::new(TemplateRoot::bundled()?)
//!     .with_hook(PlaygroundHook::new())
//!     .materialize(&config, &project_dir)
//!     .await?;
//! ```

pub mod answers;
pub mod error;
pub mod hooks;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{collect, ConfigurationRecord, Defaults, TestFramework};
pub use error::{Error, Result};
pub use hooks::{GenerationContext, InstallHook, InstallOptions, PlaygroundHook, PostHook};
pub use templates::{Catalog, MaterializeReport, Materializer, TemplateRoot};

#[cfg(feature = "tui")]
pub use tui::run;
