//! Runtime detection for Node.js and package managers

use std::fmt;
use std::process::Command;

/// Package manager backends the install step can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Bower,
}

impl PackageManager {
    pub const ALL: [PackageManager; 2] = [PackageManager::Npm, PackageManager::Bower];

    /// Executable name
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Bower => "bower",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Bower => "Bower",
        }
    }

    /// Command line that installs the project's dependencies
    pub fn install_command(&self) -> String {
        format!("{} install", self.binary())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl fmt::Display for RuntimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.available {
            write!(
                f,
                "{} ({})",
                self.name,
                self.version.as_deref().unwrap_or("unknown")
            )
        } else {
            write!(f, "{} (not installed)", self.name)
        }
    }
}

/// Run `<binary> --version` and report whether it succeeded
pub fn check_runtime(binary: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    check_runtime("node", "Node.js")
}

/// Check if a package manager is available
pub fn check_package_manager(manager: PackageManager) -> RuntimeInfo {
    check_runtime(manager.binary(), manager.display_name())
}
