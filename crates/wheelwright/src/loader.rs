//! Wheel loading and verification.
//!
//! The [`WheelLoader`] opens a wheel, parses its RECORD and checks every
//! member against it the way an installer does before unpacking.

use crate::{RECORD_FILE, Record, RecordEntry, WheelError, WheelResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Loader for wheel archives.
///
/// # Example
///
/// ```no_run
/// use wheelwright::WheelLoader;
///
/// let mut loader = WheelLoader::open("dist/mini_leo-0.1.0-py3-none-linux_x86_64.whl")?;
/// let report = loader.verify()?;
/// assert!(report.is_ok());
/// # Ok::<(), wheelwright::WheelError>(())
/// ```
#[derive(Debug)]
pub struct WheelLoader {
    archive: ZipArchive<File>,
    record_path: String,
    entries: Vec<RecordEntry>,
}

/// A member that failed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyFailure {
    /// Member path within the wheel.
    pub path: String,
    /// What was wrong with it.
    pub reason: String,
}

/// Outcome of [`WheelLoader::verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Members whose digest and size matched RECORD.
    pub verified: Vec<String>,
    /// Members that did not.
    pub failures: Vec<VerifyFailure>,
}

impl VerifyReport {
    /// True when no failure was found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: &str, reason: impl Into<String>) {
        self.failures.push(VerifyFailure {
            path: path.to_string(),
            reason: reason.into(),
        });
    }
}

impl WheelLoader {
    /// Open a wheel file and parse its RECORD.
    pub fn open<P: AsRef<Path>>(path: P) -> WheelResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut archive = ZipArchive::new(file)?;

        let record_path = archive
            .file_names()
            .find(|name| is_record_path(name))
            .map(str::to_string)
            .ok_or_else(|| {
                WheelError::MissingFile(format!("*.dist-info/{RECORD_FILE} not found in wheel"))
            })?;

        let entries = {
            let mut record_file = archive.by_name(&record_path)?;
            let mut content = String::new();
            record_file.read_to_string(&mut content)?;
            Record::parse(&content)?
        };

        Ok(Self {
            archive,
            record_path,
            entries,
        })
    }

    /// Path of the RECORD file within the wheel.
    #[must_use]
    pub fn record_path(&self) -> &str {
        &self.record_path
    }

    /// Parsed RECORD entries in file order.
    #[must_use]
    pub fn record(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// List all files in the wheel, in archive order.
    #[must_use]
    pub fn list_files(&self) -> Vec<String> {
        self.archive.file_names().map(String::from).collect()
    }

    /// Read a file from the wheel.
    pub fn read_file(&mut self, path: &str) -> WheelResult<Vec<u8>> {
        let mut file = self.archive.by_name(path).map_err(|e| match e {
            ZipError::FileNotFound => WheelError::MissingFile(format!("{path} not found in wheel")),
            other => WheelError::Zip(other),
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Check every member against RECORD.
    ///
    /// Mismatches are collected into the report; only archive read errors
    /// abort verification.
    pub fn verify(&mut self) -> WheelResult<VerifyReport> {
        let mut report = VerifyReport::default();
        let mut listed = HashSet::new();
        let entries = self.entries.clone();

        for entry in &entries {
            if !listed.insert(entry.path.clone()) {
                report.fail(&entry.path, "listed more than once in RECORD");
                continue;
            }

            if entry.is_unhashed() {
                if entry.path != self.record_path {
                    report.fail(&entry.path, "no digest recorded");
                }
                continue;
            }

            let contents = match self.read_file(&entry.path) {
                Ok(contents) => contents,
                Err(WheelError::MissingFile(_)) => {
                    report.fail(&entry.path, "listed in RECORD but missing from wheel");
                    continue;
                }
                Err(e) => return Err(e),
            };

            match entry.verify(&contents) {
                Ok(()) => report.verified.push(entry.path.clone()),
                Err(e) => report.fail(&entry.path, e.to_string()),
            }
        }

        if !listed.contains(&self.record_path) {
            report.fail(&self.record_path, "RECORD does not list itself");
        }

        for name in self.list_files() {
            if !name.ends_with('/') && !listed.contains(&name) {
                report.fail(&name, "not listed in RECORD");
            }
        }

        tracing::debug!(
            verified = report.verified.len(),
            failures = report.failures.len(),
            "verified wheel"
        );
        Ok(report)
    }
}

/// True for `<name>-<version>.dist-info/RECORD` at the archive root.
fn is_record_path(name: &str) -> bool {
    name.split_once('/').is_some_and(|(dir, file)| {
        dir.ends_with(".dist-info") && file == RECORD_FILE
    })
}
