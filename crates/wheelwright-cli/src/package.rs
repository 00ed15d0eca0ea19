//! Wheel commands.
//!
//! Compiles the native library, packages it into a `.whl`, and inspects
//! existing wheels.

use crate::compile::CompileCommand;
use crate::config::{CONFIG_FILE, ProjectConfig};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use wheelwright::{
    BuildProfile, DistInfo, HostPlatform, NativeTarget, WheelBuilder, WheelLoader,
    wheel_declaration,
};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Path to wheelwright.toml (default: ./wheelwright.toml)
    pub config: Option<String>,
    /// Override the configured profile with a debug build
    pub debug: bool,
    /// Package an existing library without invoking the compiler
    pub skip_compile: bool,
    /// Override the configured output directory
    pub output: Option<String>,
}

/// Run the build command.
pub fn run(options: BuildOptions) -> Result<PathBuf> {
    let config_path = options.config.unwrap_or_else(|| CONFIG_FILE.to_string());
    let mut config = ProjectConfig::from_file(&config_path)?;
    config.validate()?;

    if let Some(output) = options.output {
        config.output.dir = PathBuf::from(output);
    }

    let profile = if options.debug {
        BuildProfile::Debug
    } else {
        config.profile()?
    };

    let host = HostPlatform::current();
    println!(
        "Building wheel: {} ({}, {})",
        config.package.name,
        host.platform_string(),
        profile
    );

    if options.skip_compile {
        tracing::info!("skipping native compilation");
    } else {
        let crate_dir = config.resolve(&config.native.crate_dir);
        let cmd = CompileCommand::cargo_build(&crate_dir, profile);
        println!("  Compiling: {}", cmd.display());
        cmd.run().context("Native compilation failed")?;
    }

    let wheel = package(&config, &host, profile)?;
    println!("Wheel created: {}", wheel.display());
    Ok(wheel)
}

/// Package an already compiled library into a wheel for `host`.
pub fn package(
    config: &ProjectConfig,
    host: &HostPlatform,
    profile: BuildProfile,
) -> Result<PathBuf> {
    let tag = host.tag();
    let target = NativeTarget::resolve(&host.os_family(), &config.native_layout(profile));

    let metadata_path = config.metadata_path();
    let metadata = fs::read(&metadata_path)
        .with_context(|| format!("Failed to read metadata: {}", metadata_path.display()))?;
    let dist_info = DistInfo::new(metadata, wheel_declaration(&tag));

    let mut builder = WheelBuilder::new(config.package.name.clone(), dist_info, tag)
        .native(&target)
        .context("Failed to add native library")?;

    let loader = config.loader_path();
    builder = builder
        .add_file(&loader, &config.loader_archive_path())
        .with_context(|| format!("Failed to add loader: {}", loader.display()))?;

    for file in &config.package.files {
        let source = config.resolve(&file.source);
        println!("  Adding file: {} -> {}", source.display(), file.path);
        builder = builder
            .add_file(&source, &file.path)
            .with_context(|| format!("Failed to add file: {}", source.display()))?;
    }

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    builder
        .write_to_dir(&output_dir)
        .with_context(|| format!("Failed to write wheel into {}", output_dir.display()))
}

/// List contents of a wheel.
pub fn list(wheel_path: &str) -> Result<()> {
    let loader =
        WheelLoader::open(wheel_path).with_context(|| format!("Failed to open: {wheel_path}"))?;

    println!("Wheel: {}", display_name(Path::new(wheel_path)));
    println!("RECORD: {}", loader.record_path());

    println!("\nFiles:");
    for entry in loader.record() {
        match entry.size {
            Some(size) => println!("  {} ({size} bytes)", entry.path),
            None => println!("  {}", entry.path),
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct VerifyOutput<'a> {
    wheel: &'a str,
    ok: bool,
    verified: &'a [String],
    failures: Vec<FailureOutput<'a>>,
}

#[derive(Debug, Serialize)]
struct FailureOutput<'a> {
    path: &'a str,
    reason: &'a str,
}

/// Verify every wheel member against RECORD.
pub fn verify(wheel_path: &str, json: bool) -> Result<()> {
    let mut loader =
        WheelLoader::open(wheel_path).with_context(|| format!("Failed to open: {wheel_path}"))?;
    let report = loader
        .verify()
        .with_context(|| format!("Failed to read: {wheel_path}"))?;

    if json {
        let output = VerifyOutput {
            wheel: wheel_path,
            ok: report.is_ok(),
            verified: &report.verified,
            failures: report
                .failures
                .iter()
                .map(|f| FailureOutput {
                    path: &f.path,
                    reason: &f.reason,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for path in &report.verified {
            println!("✓ {path}");
        }
        for failure in &report.failures {
            println!("✗ {}: {}", failure.path, failure.reason);
        }
    }

    if !report.is_ok() {
        anyhow::bail!(
            "{} of {} members failed verification",
            report.failures.len(),
            report.failures.len() + report.verified.len()
        );
    }

    if !json {
        println!("\nWheel is valid!");
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "package/package_tests.rs"]
mod package_tests;
