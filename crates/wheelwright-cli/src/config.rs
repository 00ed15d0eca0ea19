//! Project configuration (`wheelwright.toml`) parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use wheelwright::{
    BuildProfile, METADATA_FILE, NativeLayout, RECORD_FILE, WHEEL_FILE, escape_distribution_name,
    parse_name, parse_version,
};

/// Default configuration file name
pub const CONFIG_FILE: &str = "wheelwright.toml";

/// wheelwright.toml structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub package: PackageSection,

    #[serde(default)]
    pub native: NativeSection,

    #[serde(default)]
    pub output: OutputSection,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Distribution name; `-` becomes `_` in the importable package name
    pub name: String,

    /// Path to the METADATA text
    #[serde(default = "default_metadata")]
    pub metadata: PathBuf,

    /// Path to the loader module (default: `<import name>/__init__.py`)
    #[serde(default)]
    pub loader: Option<PathBuf>,

    /// Additional files copied into the wheel
    #[serde(default)]
    pub files: Vec<ExtraFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraFile {
    /// Path on disk
    pub source: PathBuf,
    /// Path inside the wheel
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NativeSection {
    /// Crate that builds the shared library
    #[serde(default = "default_crate_dir")]
    pub crate_dir: PathBuf,

    /// Cargo `[lib] name` (default: import name)
    #[serde(default)]
    pub lib_name: Option<String>,

    /// Extension module name inside the package (default: `_<import name>`)
    #[serde(default)]
    pub module: Option<String>,

    /// Build profile: "release" or "debug"
    #[serde(default = "default_profile")]
    pub profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Directory wheels are written to (created if absent)
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_metadata() -> PathBuf {
    PathBuf::from("METADATA")
}

fn default_crate_dir() -> PathBuf {
    PathBuf::from("rust")
}

fn default_profile() -> String {
    "release".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for NativeSection {
    fn default() -> Self {
        Self {
            crate_dir: default_crate_dir(),
            lib_name: None,
            module: None,
            profile: default_profile(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a file; relative paths resolve against its directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config = Self::parse(&content)?;
        config.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Parse configuration from a string; relative paths resolve against `.`
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.root = PathBuf::from(".");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.package.name.trim().is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if self.package.name.contains(['/', '\\']) {
            anyhow::bail!("Package name cannot contain path separators");
        }

        if self.lib_name().is_empty() {
            anyhow::bail!("Native lib_name cannot be empty");
        }

        let module = self.module();
        if module.is_empty() {
            anyhow::bail!("Native module name cannot be empty");
        }
        if module.contains(['-', '.', '/', '\\']) {
            anyhow::bail!("Native module name is not importable: {module:?}");
        }

        self.profile()?;

        let reserved = self.reserved_archive_paths();
        let mut seen = HashSet::new();
        for file in &self.package.files {
            if !is_safe_archive_path(&file.path) {
                anyhow::bail!(
                    "Invalid archive path for {}: {:?}",
                    file.source.display(),
                    file.path
                );
            }

            if reserved.contains(&file.path) || is_dist_info_member(&file.path) {
                anyhow::bail!(
                    "Archive path for {} is written by the build itself: {}",
                    file.source.display(),
                    file.path
                );
            }

            if !seen.insert(file.path.as_str()) {
                anyhow::bail!("Archive path listed more than once: {}", file.path);
            }
        }

        Ok(())
    }

    /// Archive paths of the loader and both native module spellings
    fn reserved_archive_paths(&self) -> HashSet<String> {
        let package = self.import_name();
        let module = self.module();
        HashSet::from([
            self.loader_archive_path(),
            format!("{package}/{module}.so"),
            format!("{package}/{module}.pyd"),
        ])
    }

    /// Build profile
    pub fn profile(&self) -> Result<BuildProfile> {
        BuildProfile::parse(&self.native.profile).with_context(|| {
            format!(
                "Invalid profile: {} (expected \"release\" or \"debug\")",
                self.native.profile
            )
        })
    }

    /// Importable Python package name
    pub fn import_name(&self) -> String {
        escape_distribution_name(&self.package.name)
    }

    /// Cargo library name
    pub fn lib_name(&self) -> String {
        self.native
            .lib_name
            .clone()
            .unwrap_or_else(|| self.import_name())
    }

    /// Extension module name
    pub fn module(&self) -> String {
        self.native
            .module
            .clone()
            .unwrap_or_else(|| format!("_{}", self.import_name()))
    }

    /// Resolve a path relative to the config directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.resolve(&self.package.metadata)
    }

    pub fn loader_path(&self) -> PathBuf {
        match &self.package.loader {
            Some(loader) => self.resolve(loader),
            None => self.resolve(&Path::new(&self.import_name()).join("__init__.py")),
        }
    }

    /// Archive path of the loader module
    pub fn loader_archive_path(&self) -> String {
        format!("{}/__init__.py", self.import_name())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output.dir)
    }

    /// Native library layout for the given profile
    pub fn native_layout(&self, profile: BuildProfile) -> NativeLayout {
        NativeLayout::new(
            self.resolve(&self.native.crate_dir),
            self.lib_name(),
            self.import_name(),
            self.module(),
            profile,
        )
    }
}

/// Relative, forward-slash path made of normal components only
fn is_safe_archive_path(path: &str) -> bool {
    if path.is_empty() || path.contains('\\') || has_drive_prefix(path) {
        return false;
    }

    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

fn has_drive_prefix(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic()
    )
}

/// `<name>-<version>.dist-info/{METADATA,WHEEL,RECORD}`
fn is_dist_info_member(path: &str) -> bool {
    match path.split_once('/') {
        Some((dir, file)) => {
            dir.ends_with(".dist-info") && [METADATA_FILE, WHEEL_FILE, RECORD_FILE].contains(&file)
        }
        None => false,
    }
}

/// Check command implementation
pub fn check(config_path: Option<String>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| CONFIG_FILE.to_string());

    println!("Checking config: {}", path);

    let config = ProjectConfig::from_file(&path)?;
    config.validate()?;

    let metadata_path = config.metadata_path();
    let metadata = std::fs::read(&metadata_path)
        .with_context(|| format!("Failed to read metadata: {}", metadata_path.display()))?;
    let version = parse_version(&metadata)?;
    let name = parse_name(&metadata)?;

    if name != config.package.name {
        tracing::warn!(
            metadata = %name,
            config = %config.package.name,
            "metadata Name differs from package name"
        );
    }

    println!("✓ Package: {} v{}", config.package.name, version);
    println!(
        "✓ Native: lib{} -> {}/{} ({})",
        config.lib_name(),
        config.import_name(),
        config.module(),
        config.profile()?
    );
    println!("✓ Loader: {}", config.loader_path().display());
    println!("✓ Extra files: {}", config.package.files.len());
    println!("\nConfig is valid!");

    Ok(())
}
