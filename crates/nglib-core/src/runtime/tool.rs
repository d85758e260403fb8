//! Dependency installation through a package manager
//!
//! Runs `<manager> install` inside the generated project, streaming the
//! child's output and giving up after a timeout.

use super::check::PackageManager;
use crate::error::{Error, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for one dependency installation (5 minutes)
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Run `<manager> install` in `project_dir`
pub async fn install_dependencies(
    manager: PackageManager,
    project_dir: &Path,
    limit: Duration,
) -> Result<()> {
    let cmd = manager.install_command();
    let hook_error = |message: String| Error::Hook {
        name: "install",
        message,
    };

    println!();
    println!("{} {}", "Running:".dimmed(), cmd.yellow());
    println!();

    let mut child = TokioCommand::new(manager.binary())
        .arg("install")
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| hook_error(format!("Failed to start {}: {}", cmd, e)))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| hook_error("Failed to capture stdout".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| hook_error("Failed to capture stderr".to_string()))?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    // Stream output until stdout closes
    let output_task = async {
        let mut stderr_open = true;
        loop {
            tokio::select! {
                line = stdout_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => break,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            break;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }
    };

    if timeout(limit, output_task).await.is_err() {
        let _ = child.kill().await;
        return Err(hook_error(format!(
            "{} timed out after {} seconds. Run it manually inside {}",
            cmd,
            limit.as_secs(),
            project_dir.display()
        )));
    }

    match timeout(Duration::from_secs(5), child.wait()).await {
        Ok(Ok(status)) if status.success() => {
            println!();
            Ok(())
        }
        Ok(Ok(status)) => Err(hook_error(format!(
            "{} failed with exit code {}",
            cmd,
            status.code().unwrap_or(-1)
        ))),
        Ok(Err(e)) => Err(hook_error(format!("Failed to wait for {}: {}", cmd, e))),
        Err(_) => {
            let _ = child.kill().await;
            Err(hook_error(format!("{} hung after closing its output", cmd)))
        }
    }
}
