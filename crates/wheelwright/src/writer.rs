//! Streaming wheel writer.
//!
//! [`WheelWriter`] keeps the zip archive and the RECORD buffer in lock-step:
//! every member written to the archive gets its RECORD line at the same
//! position. The archive is built in a hidden temporary file next to the
//! destination and renamed into place only by [`WheelWriter::finish`], so a
//! failed build never leaves a partial wheel under the final name.

use crate::{Record, WheelError, WheelResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// One file going into the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    path: String,
    contents: Vec<u8>,
}

impl ArchiveMember {
    /// Create a member from its archive path and contents.
    pub fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Path within the wheel.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File contents.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// Writer producing a single wheel archive.
pub struct WheelWriter {
    zip: ZipWriter<NamedTempFile>,
    options: SimpleFileOptions,
    record: Record,
    record_path: String,
    record_marked: bool,
    destination: PathBuf,
}

impl WheelWriter {
    /// Start a wheel at `destination` whose RECORD lives at `record_path`.
    ///
    /// The destination's parent directory must already exist.
    pub fn create<P: AsRef<Path>>(destination: P, record_path: &str) -> WheelResult<Self> {
        let destination = destination.as_ref().to_path_buf();
        let parent = match destination.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !parent.is_dir() {
            return Err(WheelError::MissingFile(format!(
                "output directory {} does not exist",
                parent.display()
            )));
        }

        let temp = tempfile::Builder::new()
            .prefix(".wheelwright-")
            .suffix(".whl.partial")
            .tempfile_in(&parent)?;

        // Fixed timestamps keep repeated builds byte-identical.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        Ok(Self {
            zip: ZipWriter::new(temp),
            options,
            record: Record::new(),
            record_path: record_path.to_string(),
            record_marked: false,
            destination,
        })
    }

    /// Write a member and append its RECORD line.
    pub fn add(&mut self, member: &ArchiveMember) -> WheelResult<()> {
        if member.path() == self.record_path {
            return Err(WheelError::InvalidRecord {
                line: member.path().to_string(),
                reason: "RECORD is written by the writer itself".to_string(),
            });
        }

        self.zip.start_file(member.path(), self.options)?;
        self.zip.write_all(member.contents())?;
        self.record.push_member(member.path(), member.contents());

        tracing::debug!(
            path = member.path(),
            size = member.contents().len(),
            "added wheel member"
        );
        Ok(())
    }

    /// Append RECORD's own `path,,` line at the current position.
    ///
    /// Only the first call has an effect.
    pub fn mark_record(&mut self) {
        if !self.record_marked {
            self.record.push_self(&self.record_path);
            self.record_marked = true;
        }
    }

    /// RECORD lines accumulated so far.
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Write RECORD as the last member, close the archive and move it into
    /// place. Returns the destination path.
    pub fn finish(mut self) -> WheelResult<PathBuf> {
        self.mark_record();
        let record = self.record.to_bytes();

        self.zip.start_file(self.record_path.as_str(), self.options)?;
        self.zip.write_all(&record)?;

        let temp = self.zip.finish()?;
        temp.as_file().sync_all()?;
        temp.persist(&self.destination)
            .map_err(|e| WheelError::Io(e.error))?;

        tracing::info!(
            wheel = %self.destination.display(),
            entries = self.record.len(),
            "wrote wheel"
        );
        Ok(self.destination)
    }
}
