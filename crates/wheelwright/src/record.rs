//! RECORD manifest lines.
//!
//! Each wheel member is listed as `path,sha256=<digest>,<size>` where the
//! digest is URL-safe base64 with padding stripped. RECORD lists itself as
//! `path,,` because its own digest cannot be known while it is written.

use crate::{WheelError, WheelResult};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Hash algorithm prefix used in RECORD lines.
pub const HASH_ALGORITHM: &str = "sha256";

/// Compute the SHA-256 digest of data in RECORD encoding.
pub fn encode_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Decode a RECORD digest back into raw bytes.
pub fn decode_digest(digest: &str) -> WheelResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(digest)
        .map_err(|e| WheelError::InvalidRecord {
            line: digest.to_string(),
            reason: format!("digest is not unpadded URL-safe base64: {e}"),
        })
}

/// Format the RECORD line for a member.
///
/// # Example
///
/// ```
/// use wheelwright::record_line;
///
/// assert_eq!(
///     record_line("pkg/empty.txt", b""),
///     "pkg/empty.txt,sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU,0"
/// );
/// ```
pub fn record_line(path: &str, contents: &[u8]) -> String {
    format!(
        "{path},{HASH_ALGORITHM}={},{}",
        encode_digest(contents),
        contents.len()
    )
}

/// Format the line RECORD uses to list itself.
pub fn record_self_line(path: &str) -> String {
    format!("{path},,")
}

/// Ordered RECORD line buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    lines: Vec<String>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the line for a member.
    pub fn push_member(&mut self, path: &str, contents: &[u8]) {
        self.lines.push(record_line(path, contents));
    }

    /// Append the self-referential line for the RECORD file.
    pub fn push_self(&mut self, record_path: &str) {
        self.lines.push(record_self_line(record_path));
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no line has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Content of the RECORD file: lines joined by `\n`, no trailing newline.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join("\n").into_bytes()
    }

    /// Parse RECORD file content into entries.
    ///
    /// Blank lines and a trailing newline are tolerated.
    pub fn parse(content: &str) -> WheelResult<Vec<RecordEntry>> {
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(RecordEntry::parse)
            .collect()
    }
}

/// One parsed RECORD line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Member path within the wheel.
    pub path: String,
    /// Unpadded URL-safe base64 SHA-256 digest, absent for the self line.
    pub digest: Option<String>,
    /// Member size in bytes, absent for the self line.
    pub size: Option<u64>,
}

impl RecordEntry {
    /// Parse a single RECORD line.
    pub fn parse(line: &str) -> WheelResult<Self> {
        let invalid = |reason: &str| WheelError::InvalidRecord {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        // Paths may contain commas; the last two fields never do.
        let mut fields = line.rsplitn(3, ',');
        let size = fields.next();
        let hash = fields.next();
        let path = fields.next();

        let (Some(path), Some(hash), Some(size)) = (path, hash, size) else {
            return Err(invalid("expected three comma-separated fields"));
        };
        if path.is_empty() {
            return Err(invalid("empty path"));
        }

        let digest = match hash {
            "" => None,
            hash => {
                let digest = hash
                    .strip_prefix(HASH_ALGORITHM)
                    .and_then(|rest| rest.strip_prefix('='))
                    .ok_or_else(|| invalid("unsupported hash algorithm"))?;
                decode_digest(digest)?;
                Some(digest.to_string())
            }
        };

        let size = match size {
            "" => None,
            size => Some(size.parse::<u64>().map_err(|_| invalid("malformed size"))?),
        };

        if digest.is_some() != size.is_some() {
            return Err(invalid("digest and size must both be present or both empty"));
        }

        Ok(Self {
            path: path.to_string(),
            digest,
            size,
        })
    }

    /// True for a line of the form `path,,`.
    #[must_use]
    pub fn is_unhashed(&self) -> bool {
        self.digest.is_none() && self.size.is_none()
    }

    /// Check that `contents` matches this entry's digest and size.
    pub fn verify(&self, contents: &[u8]) -> WheelResult<()> {
        let (Some(expected), Some(size)) = (&self.digest, self.size) else {
            return Err(WheelError::InvalidRecord {
                line: record_self_line(&self.path),
                reason: "member has no recorded digest".to_string(),
            });
        };

        let actual = encode_digest(contents);
        if &actual != expected {
            return Err(WheelError::DigestMismatch {
                path: self.path.clone(),
                expected: format!("{HASH_ALGORITHM}={expected}"),
                actual: format!("{HASH_ALGORITHM}={actual}"),
            });
        }

        let actual_size = contents.len() as u64;
        if actual_size != size {
            return Err(WheelError::SizeMismatch {
                path: self.path.clone(),
                expected: size,
                actual: actual_size,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "record/record_tests.rs"]
mod record_tests;
