//! Property-based tests for RECORD lines
//!
//! Tests that every member line has the three-field shape installers expect
//! and that its digest survives a decode/encode cycle.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use proptest::prelude::*;
use wheelwright::record::{decode_digest, encode_digest};
use wheelwright::{RecordEntry, record_line, record_self_line};

// Strategy: archive paths without commas or newlines
fn arb_path() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_][a-zA-Z0-9_./-]{0,60}"
}

proptest! {
    /// Property: a member line is `path,sha256=<43 chars>,<len>`
    #[test]
    fn proptest_record_line_shape(path in arb_path(), contents in prop::collection::vec(any::<u8>(), 0..512)) {
        let line = record_line(&path, &contents);
        let fields: Vec<&str> = line.split(',').collect();

        prop_assert_eq!(fields.len(), 3);
        prop_assert_eq!(fields[0], path.as_str());
        let digest = fields[1].strip_prefix("sha256=").unwrap();
        prop_assert_eq!(digest.len(), 43);
        prop_assert!(!digest.contains('='));
        prop_assert_eq!(fields[2], contents.len().to_string());
    }

    /// Property: decoding the digest and re-encoding reproduces it
    #[test]
    fn proptest_digest_roundtrip(contents in prop::collection::vec(any::<u8>(), 0..512)) {
        let digest = encode_digest(&contents);
        let raw = decode_digest(&digest).unwrap();

        prop_assert_eq!(raw.len(), 32);
        prop_assert_eq!(URL_SAFE_NO_PAD.encode(raw), digest);
    }

    /// Property: parsing a generated line verifies against the same contents
    #[test]
    fn proptest_parsed_line_verifies(path in arb_path(), contents in prop::collection::vec(any::<u8>(), 0..512)) {
        let entry = RecordEntry::parse(&record_line(&path, &contents)).unwrap();

        prop_assert_eq!(&entry.path, &path);
        prop_assert!(entry.verify(&contents).is_ok());
    }

    /// Property: the self line always ends in two empty fields
    #[test]
    fn proptest_self_line_shape(path in arb_path()) {
        let line = record_self_line(&path);

        prop_assert!(line.ends_with(",,"));
        prop_assert_eq!(line.matches(',').count(), 2);
        prop_assert!(RecordEntry::parse(&line).unwrap().is_unhashed());
    }
}
