//! Selection of the compiled native library for the host OS.

use crate::{ArchiveMember, OsFamily, WheelError, WheelResult};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Cargo build profile whose output directory holds the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildProfile {
    /// Optimized build (`target/release`).
    #[default]
    Release,
    /// Unoptimized build (`target/debug`).
    Debug,
}

impl BuildProfile {
    /// Parse a profile name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "release" => Some(Self::Release),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Name of the profile's directory under `target/`.
    #[must_use]
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Where the compiler puts the library and where it goes in the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeLayout {
    /// Directory of the crate that builds the library.
    pub crate_dir: PathBuf,
    /// Cargo library name (`[lib] name`).
    pub lib_name: String,
    /// Python package directory inside the wheel.
    pub package: String,
    /// Extension module name inside the package (e.g., "_minileo").
    pub module: String,
    /// Build profile.
    pub profile: BuildProfile,
}

impl NativeLayout {
    /// Create a layout description.
    pub fn new(
        crate_dir: impl Into<PathBuf>,
        lib_name: impl Into<String>,
        package: impl Into<String>,
        module: impl Into<String>,
        profile: BuildProfile,
    ) -> Self {
        Self {
            crate_dir: crate_dir.into(),
            lib_name: lib_name.into(),
            package: package.into(),
            module: module.into(),
            profile,
        }
    }

    fn output_dir(&self) -> PathBuf {
        self.crate_dir.join("target").join(self.profile.dir_name())
    }
}

/// Compiled library for one OS family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeTarget {
    /// `lib<name>.so` installed as `<package>/<module>.so`.
    Linux {
        source: PathBuf,
        archive_path: String,
    },
    /// `<name>.dll` installed as `<package>/<module>.pyd`.
    Windows {
        source: PathBuf,
        archive_path: String,
    },
    /// Host OS with no known naming convention.
    Unknown { os: String },
}

impl NativeTarget {
    /// Resolve the target for an OS family.
    #[must_use]
    pub fn resolve(family: &OsFamily, layout: &NativeLayout) -> Self {
        let out = layout.output_dir();
        match family {
            OsFamily::Linux => Self::Linux {
                source: out.join(format!("lib{}.so", layout.lib_name)),
                archive_path: format!("{}/{}.so", layout.package, layout.module),
            },
            OsFamily::Windows => Self::Windows {
                source: out.join(format!("{}.dll", layout.lib_name)),
                archive_path: format!("{}/{}.pyd", layout.package, layout.module),
            },
            OsFamily::Other(os) => Self::Unknown { os: os.clone() },
        }
    }

    /// Path of the compiled library on disk.
    pub fn source(&self) -> WheelResult<&Path> {
        match self {
            Self::Linux { source, .. } | Self::Windows { source, .. } => Ok(source),
            Self::Unknown { os } => Err(WheelError::UnsupportedPlatform(os.clone())),
        }
    }

    /// Destination path of the library inside the wheel.
    pub fn archive_path(&self) -> WheelResult<&str> {
        match self {
            Self::Linux { archive_path, .. } | Self::Windows { archive_path, .. } => {
                Ok(archive_path)
            }
            Self::Unknown { os } => Err(WheelError::UnsupportedPlatform(os.clone())),
        }
    }

    /// Read the compiled library into an archive member.
    pub fn read(&self) -> WheelResult<ArchiveMember> {
        let source = self.source()?;
        let archive_path = self.archive_path()?;

        let contents = fs::read(source)
            .map_err(|e| WheelError::LibraryNotFound(format!("{}: {}", source.display(), e)))?;

        Ok(ArchiveMember::new(archive_path, contents))
    }
}
