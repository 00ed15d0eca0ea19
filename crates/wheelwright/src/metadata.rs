//! Dist-info metadata blobs and wheel naming.

use crate::{
    ABI_TAG, PYTHON_TAG, PlatformTag, WHEEL_EXTENSION, WHEEL_VERSION, WheelError, WheelResult,
};

/// Static dist-info content injected into the builder.
///
/// Both blobs are written verbatim; only the `Version:` field of the
/// metadata is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistInfo {
    /// Content of `METADATA`.
    pub metadata: Vec<u8>,
    /// Content of `WHEEL`.
    pub wheel: Vec<u8>,
}

impl DistInfo {
    /// Create dist-info content from the two blobs.
    pub fn new(metadata: impl Into<Vec<u8>>, wheel: impl Into<Vec<u8>>) -> Self {
        Self {
            metadata: metadata.into(),
            wheel: wheel.into(),
        }
    }

    /// Version declared by the metadata.
    pub fn version(&self) -> WheelResult<String> {
        parse_version(&self.metadata)
    }
}

/// Extract the `Version:` field from metadata text.
///
/// # Example
///
/// ```
/// use wheelwright::parse_version;
///
/// let metadata = b"Metadata-Version: 2.1\nName: mini_leo\nVersion: 0.1.0\n";
/// assert_eq!(parse_version(metadata).unwrap(), "0.1.0");
/// ```
pub fn parse_version(metadata: &[u8]) -> WheelResult<String> {
    parse_field(metadata, "Version")
}

/// Extract the `Name:` field from metadata text.
pub fn parse_name(metadata: &[u8]) -> WheelResult<String> {
    parse_field(metadata, "Name")
}

fn parse_field(metadata: &[u8], field: &str) -> WheelResult<String> {
    let text = String::from_utf8_lossy(metadata);
    let value = text
        .lines()
        .find_map(|line| {
            line.strip_prefix(field)
                .and_then(|rest| rest.strip_prefix(':'))
        })
        .map(str::trim)
        .ok_or_else(|| WheelError::MalformedMetadata(format!("no {field}: field")))?;

    if value.is_empty() {
        return Err(WheelError::MalformedMetadata(format!(
            "{field}: field is empty"
        )));
    }

    Ok(value.to_string())
}

/// Default `WHEEL` declaration for a platform-specific, non-purelib wheel.
pub fn wheel_declaration(tag: &PlatformTag) -> Vec<u8> {
    format!(
        "Wheel-Version: {WHEEL_VERSION}\nRoot-Is-Purelib: false\nTag: {PYTHON_TAG}-{ABI_TAG}-{tag}"
    )
    .into_bytes()
}

/// Escape a distribution name for use in file and directory names.
#[must_use]
pub fn escape_distribution_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Name of the dist-info directory.
#[must_use]
pub fn dist_info_dir(package: &str, version: &str) -> String {
    format!("{}-{version}.dist-info", escape_distribution_name(package))
}

/// File name of the wheel archive.
///
/// # Example
///
/// ```
/// use wheelwright::{PlatformTag, wheel_file_name};
///
/// let tag = PlatformTag::normalize("linux-x86_64");
/// assert_eq!(
///     wheel_file_name("mini_leo", "0.1.0", &tag),
///     "mini_leo-0.1.0-py3-none-linux_x86_64.whl"
/// );
/// ```
#[must_use]
pub fn wheel_file_name(package: &str, version: &str, tag: &PlatformTag) -> String {
    format!(
        "{}-{version}-{PYTHON_TAG}-{ABI_TAG}-{tag}.{WHEEL_EXTENSION}",
        escape_distribution_name(package)
    )
}
