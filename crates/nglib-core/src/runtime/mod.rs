//! Runtime detection and dependency installation
//!
//! This module provides:
//! - Node.js and package manager detection
//! - Running `<manager> install` inside a generated project

pub mod check;
pub mod tool;

pub use check::{check_node, check_package_manager, check_runtime, PackageManager, RuntimeInfo};
pub use tool::{install_dependencies, INSTALL_TIMEOUT};
