//! Native library compilation
//!
//! Runs the external compiler as a blocking child process, capturing its
//! output so a failed build can be reported before any packaging starts.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use wheelwright::BuildProfile;

/// Result of a compiler run
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// Exit status of the compiler
    pub status: ExitStatus,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
}

impl CompileOutput {
    /// Returns true if the compiler exited successfully
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Compiler invocation
#[derive(Debug, Clone)]
pub struct CompileCommand {
    program: String,
    args: Vec<String>,
    current_dir: PathBuf,
}

impl CompileCommand {
    /// Create a command running `program` in `current_dir`
    pub fn new(program: impl Into<String>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
        }
    }

    /// `cargo build --lib` for the given profile
    ///
    /// Uses `$CARGO` when set so nested invocations pick the same toolchain.
    pub fn cargo_build(crate_dir: &Path, profile: BuildProfile) -> Self {
        let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
        let cmd = Self::new(cargo, crate_dir).arg("build").arg("--lib");

        match profile {
            BuildProfile::Release => cmd.arg("--release"),
            BuildProfile::Debug => cmd,
        }
    }

    /// Add an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Human-readable command line
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion and capture output without checking the exit status
    pub fn output(&self) -> Result<CompileOutput> {
        tracing::debug!(
            command = %self.display(),
            dir = %self.current_dir.display(),
            "running compiler"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.current_dir)
            .output()
            .with_context(|| format!("Failed to execute {}", self.display()))?;

        Ok(CompileOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run and fail on a non-zero exit status
    pub fn run(&self) -> Result<CompileOutput> {
        let output = self.output()?;

        if !output.success() {
            anyhow::bail!(
                "{} failed with exit code {:?}\n{}",
                self.display(),
                output.status.code(),
                output.stderr.trim()
            );
        }

        if !output.stdout.trim().is_empty() {
            tracing::trace!(stdout = %output.stdout.trim(), "compiler output");
        }
        if !output.stderr.trim().is_empty() {
            tracing::debug!(stderr = %output.stderr.trim(), "compiler diagnostics");
        }
        Ok(output)
    }
}
