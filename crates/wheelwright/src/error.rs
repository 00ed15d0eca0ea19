//! Error types for wheel operations.

use thiserror::Error;

/// Errors that can occur while assembling or reading a wheel.
#[derive(Debug, Error)]
pub enum WheelError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Metadata text lacks a required field.
    #[error("Malformed metadata: {0}")]
    MalformedMetadata(String),

    /// A RECORD line could not be parsed.
    #[error("Invalid RECORD line {line:?}: {reason}")]
    InvalidRecord { line: String, reason: String },

    /// Digest recorded for a member does not match its contents.
    #[error("Digest mismatch for {path}: expected {expected}, got {actual}")]
    DigestMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// Size recorded for a member does not match its contents.
    #[error("Size mismatch for {path}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        path: String,
        expected: u64,
        actual: u64,
    },

    /// Host operating system has no native target mapping.
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),

    /// Missing required file in the wheel or on disk.
    #[error("Missing required file: {0}")]
    MissingFile(String),

    /// Native library produced by the compiler was not found.
    #[error("Library not found: {0}")]
    LibraryNotFound(String),
}
