//! Host platform detection and wheel platform tags.

use std::fmt;

/// Deployment target assumed for macOS hosts when none is configured.
const DEFAULT_MACOS_DEPLOYMENT_TARGET: &str = "11.0";

/// Operating system family, as far as native module naming is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// Linux and other ELF-based hosts that load `.so` extension modules.
    Linux,
    /// Windows hosts that load `.pyd` extension modules.
    Windows,
    /// Any other operating system, by its `std::env::consts::OS` name.
    Other(String),
}

impl OsFamily {
    /// Classify an operating system name.
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
            Self::Other(os) => write!(f, "{os}"),
        }
    }
}

/// Operating system and machine architecture of the build host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    os: String,
    arch: String,
    macos_deployment_target: Option<String>,
}

impl HostPlatform {
    /// Detect the current platform.
    ///
    /// `MACOSX_DEPLOYMENT_TARGET` is read here, once.
    #[must_use]
    pub fn current() -> Self {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
            .with_macos_deployment_target(std::env::var("MACOSX_DEPLOYMENT_TARGET").ok())
    }

    /// Build a platform from explicit OS and architecture names.
    #[must_use]
    pub fn from_parts(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            macos_deployment_target: None,
        }
    }

    /// Set the macOS deployment target (default: 11.0).
    #[must_use]
    pub fn with_macos_deployment_target(mut self, target: Option<String>) -> Self {
        self.macos_deployment_target = target;
        self
    }

    /// Operating system name (e.g., "linux").
    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Architecture name (e.g., "x86_64").
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Operating system family.
    #[must_use]
    pub fn os_family(&self) -> OsFamily {
        OsFamily::from_os(&self.os)
    }

    /// Platform identification string as Python packaging reports it.
    ///
    /// # Example
    ///
    /// ```
    /// use wheelwright::HostPlatform;
    ///
    /// assert_eq!(HostPlatform::from_parts("linux", "x86_64").platform_string(), "linux-x86_64");
    /// assert_eq!(HostPlatform::from_parts("windows", "x86_64").platform_string(), "win-amd64");
    /// ```
    #[must_use]
    pub fn platform_string(&self) -> String {
        format_platform(
            &self.os,
            &self.arch,
            self.macos_deployment_target.as_deref(),
        )
    }

    /// Normalized platform tag for this host.
    #[must_use]
    pub fn tag(&self) -> PlatformTag {
        PlatformTag::normalize(&self.platform_string())
    }
}

fn format_platform(os: &str, arch: &str, macos_target: Option<&str>) -> String {
    match (os, arch) {
        ("linux", "x86") => "linux-i686".to_string(),
        ("linux", arch) => format!("linux-{arch}"),
        ("windows", "x86_64") => "win-amd64".to_string(),
        ("windows", "x86") => "win32".to_string(),
        ("windows", "aarch64") => "win-arm64".to_string(),
        ("windows", arch) => format!("win-{arch}"),
        ("macos", arch) => {
            let arch = if arch == "aarch64" { "arm64" } else { arch };
            let target = macos_target
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(DEFAULT_MACOS_DEPLOYMENT_TARGET);
            format!("macosx-{}-{arch}", target.trim())
        }
        (os, arch) => format!("{os}-{arch}"),
    }
}

/// Normalized platform identifier used in wheel file names and `Tag:` lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformTag(String);

impl PlatformTag {
    /// Normalize a platform identification string by replacing `-` and `.`
    /// with `_`.
    ///
    /// # Example
    ///
    /// ```
    /// use wheelwright::PlatformTag;
    ///
    /// assert_eq!(PlatformTag::normalize("linux-x86_64").as_str(), "linux_x86_64");
    /// assert_eq!(PlatformTag::normalize("macosx-11.0-arm64").as_str(), "macosx_11_0_arm64");
    /// ```
    #[must_use]
    pub fn normalize(platform: &str) -> Self {
        Self(platform.replace(['-', '.'], "_"))
    }

    /// Get the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
