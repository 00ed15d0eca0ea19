//! Wheel creation utilities.
//!
//! The [`WheelBuilder`] provides a fluent API for assembling `.whl` archives.

use crate::{
    ArchiveMember, DistInfo, METADATA_FILE, NativeTarget, PlatformTag, RECORD_FILE, WHEEL_FILE,
    WheelError, WheelResult, WheelWriter, dist_info_dir, wheel_file_name,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Builder for binary wheels.
///
/// Every input is read into memory when it is added, so a missing file is
/// reported before any output exists.
///
/// # Example
///
/// ```no_run
/// use wheelwright::{DistInfo, PlatformTag, WheelBuilder, wheel_declaration};
///
/// let tag = PlatformTag::normalize("linux-x86_64");
/// let dist_info = DistInfo::new(&b"Name: demo\nVersion: 1.0.0"[..], wheel_declaration(&tag));
///
/// let wheel = WheelBuilder::new("demo", dist_info, tag)
///     .add_bytes("demo/_demo.so", std::fs::read("target/release/libdemo.so")?)
///     .add_file("python/demo/__init__.py", "demo/__init__.py")?
///     .write_to_dir("dist")?;
/// # Ok::<(), wheelwright::WheelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WheelBuilder {
    package: String,
    dist_info: DistInfo,
    tag: PlatformTag,
    native: Option<ArchiveMember>,
    files: Vec<ArchiveMember>,
}

impl WheelBuilder {
    /// Create a builder for `package` with the given dist-info blobs.
    pub fn new(package: impl Into<String>, dist_info: DistInfo, tag: PlatformTag) -> Self {
        Self {
            package: package.into(),
            dist_info,
            tag,
            native: None,
            files: Vec::new(),
        }
    }

    /// Add the compiled native module.
    ///
    /// Fails on hosts without a native target and when the compiler output
    /// is missing.
    pub fn native(mut self, target: &NativeTarget) -> WheelResult<Self> {
        let member = target.read()?;
        tracing::debug!(
            source = %target.source()?.display(),
            path = member.path(),
            "loaded native library"
        );
        self.native = Some(member);
        Ok(self)
    }

    /// Add a file from disk under `archive_path`.
    pub fn add_file<P: AsRef<Path>>(
        mut self,
        source_path: P,
        archive_path: &str,
    ) -> WheelResult<Self> {
        let source_path = source_path.as_ref();

        let contents = fs::read(source_path).map_err(|e| {
            WheelError::MissingFile(format!("{}: {}", source_path.display(), e))
        })?;

        self.files.push(ArchiveMember::new(archive_path, contents));
        Ok(self)
    }

    /// Add raw bytes as a file in the wheel.
    pub fn add_bytes(mut self, archive_path: &str, contents: Vec<u8>) -> Self {
        self.files.push(ArchiveMember::new(archive_path, contents));
        self
    }

    /// Version declared by the metadata.
    pub fn version(&self) -> WheelResult<String> {
        self.dist_info.version()
    }

    /// Platform tag the wheel is built for.
    #[must_use]
    pub fn tag(&self) -> &PlatformTag {
        &self.tag
    }

    /// File name of the wheel (`{package}-{version}-py3-none-{tag}.whl`).
    pub fn file_name(&self) -> WheelResult<String> {
        Ok(wheel_file_name(&self.package, &self.version()?, &self.tag))
    }

    /// Write the wheel into `output_dir` under its canonical file name.
    ///
    /// The directory must already exist.
    pub fn write_to_dir<P: AsRef<Path>>(self, output_dir: P) -> WheelResult<PathBuf> {
        let output_path = output_dir.as_ref().join(self.file_name()?);
        self.write(output_path)
    }

    /// Write the wheel to a file.
    ///
    /// Members are written in this order: native module, added files,
    /// `METADATA`, `WHEEL`, `RECORD`. RECORD's own line precedes the `WHEEL`
    /// line.
    pub fn write<P: AsRef<Path>>(self, output_path: P) -> WheelResult<PathBuf> {
        let version = self.version()?;
        let native = self
            .native
            .ok_or_else(|| WheelError::MissingFile("native library was not added".to_string()))?;

        let dist_info = dist_info_dir(&self.package, &version);
        let record_path = format!("{dist_info}/{RECORD_FILE}");

        let mut writer = WheelWriter::create(output_path, &record_path)?;

        writer.add(&native)?;
        for member in &self.files {
            writer.add(member)?;
        }
        writer.add(&ArchiveMember::new(
            format!("{dist_info}/{METADATA_FILE}"),
            self.dist_info.metadata,
        ))?;
        writer.mark_record();
        writer.add(&ArchiveMember::new(
            format!("{dist_info}/{WHEEL_FILE}"),
            self.dist_info.wheel,
        ))?;

        writer.finish()
    }
}
