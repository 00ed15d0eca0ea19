#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

const EMPTY_DIGEST: &str = "47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU";

#[test]
fn record_line___empty_content___uses_sha256_of_empty_input() {
    let line = record_line("mini_leo/__init__.py", b"");

    assert_eq!(line, format!("mini_leo/__init__.py,sha256={EMPTY_DIGEST},0"));
}

#[test]
fn record_line___hello_world___matches_known_digest() {
    let line = record_line("a.txt", b"hello world");

    assert_eq!(
        line,
        "a.txt,sha256=uU0nuZNNPgilLlLX2n2r-sSE7-N6U4DukIj3rOLvzek,11"
    );
}

#[test]
fn encode_digest___has_no_padding_and_url_safe_alphabet() {
    let digest = encode_digest(b"");

    assert_eq!(digest.len(), 43);
    assert!(!digest.contains('='));
    assert!(!digest.contains('+'));
    assert!(!digest.contains('/'));
}

#[test]
fn decode_digest___roundtrips_to_32_bytes() {
    let raw = decode_digest(EMPTY_DIGEST).unwrap();

    assert_eq!(raw.len(), 32);
    assert_eq!(URL_SAFE_NO_PAD.encode(&raw), EMPTY_DIGEST);
}

#[test]
fn decode_digest___rejects_padded_input() {
    let padded = format!("{EMPTY_DIGEST}=");

    assert!(decode_digest(&padded).is_err());
}

#[test]
fn record_self_line___has_two_empty_fields() {
    let line = record_self_line("pkg-1.0.dist-info/RECORD");

    assert_eq!(line, "pkg-1.0.dist-info/RECORD,,");
    assert_eq!(line.matches(',').count(), 2);
}

#[test]
fn Record___to_bytes___joins_lines_without_trailing_newline() {
    let mut record = Record::new();
    record.push_member("a", b"");
    record.push_self("RECORD");
    record.push_member("b", b"x");

    let text = String::from_utf8(record.to_bytes()).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();

    assert_eq!(record.len(), 3);
    assert_eq!(lines[0], format!("a,sha256={EMPTY_DIGEST},0"));
    assert_eq!(lines[1], "RECORD,,");
    assert!(lines[2].starts_with("b,sha256="));
    assert!(!text.ends_with('\n'));
}

#[test]
fn Record___empty___produces_empty_bytes() {
    let record = Record::new();

    assert!(record.is_empty());
    assert!(record.to_bytes().is_empty());
}

#[test]
fn Record___parse___reads_members_and_self_line() {
    let content = format!("a.py,sha256={EMPTY_DIGEST},0\nx.dist-info/RECORD,,\n");

    let entries = Record::parse(&content).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].path, "a.py");
    assert_eq!(entries[0].size, Some(0));
    assert!(entries[1].is_unhashed());
}

#[test]
fn RecordEntry___path_with_comma___keeps_full_path() {
    let line = format!("odd,name.txt,sha256={EMPTY_DIGEST},0");

    let entry = RecordEntry::parse(&line).unwrap();

    assert_eq!(entry.path, "odd,name.txt");
}

#[test_case("only-a-path" ; "missing fields")]
#[test_case(",sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU,0" ; "empty path")]
#[test_case("a,md5=abc,3" ; "unsupported algorithm")]
#[test_case("a,sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU,abc" ; "malformed size")]
#[test_case("a,sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU," ; "digest without size")]
#[test_case("a,,12" ; "size without digest")]
#[test_case("a,sha256=not*base64,1" ; "bad base64")]
fn RecordEntry___malformed_line___is_rejected(line: &str) {
    let result = RecordEntry::parse(line);

    assert!(matches!(result, Err(WheelError::InvalidRecord { .. })));
}

#[test]
fn RecordEntry___verify___accepts_matching_contents() {
    let entry = RecordEntry::parse(&record_line("a", b"hello world")).unwrap();

    assert!(entry.verify(b"hello world").is_ok());
}

#[test]
fn RecordEntry___verify___reports_digest_mismatch() {
    let entry = RecordEntry::parse(&record_line("a", b"hello world")).unwrap();

    let result = entry.verify(b"hello wurld");

    assert!(matches!(result, Err(WheelError::DigestMismatch { .. })));
}

#[test]
fn RecordEntry___verify___reports_size_mismatch_when_digest_matches() {
    let line = format!("a,sha256={EMPTY_DIGEST},5");
    let entry = RecordEntry::parse(&line).unwrap();

    let result = entry.verify(b"");

    assert!(matches!(
        result,
        Err(WheelError::SizeMismatch {
            expected: 5,
            actual: 0,
            ..
        })
    ));
}

#[test]
fn RecordEntry___verify_on_self_line___is_rejected() {
    let entry = RecordEntry::parse("RECORD,,").unwrap();

    assert!(entry.verify(b"").is_err());
}
