//! Tests for the `grin` binary: argument handling, exit codes and files.

use std::path::Path;
use std::process::{Command, Output};

fn grin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grin"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run grin")
}

fn grin_with_log(rust_log: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grin"))
        .args(args)
        .env("RUST_LOG", rust_log)
        .output()
        .expect("failed to run grin")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

#[test]
fn test_encode_decode_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("input.txt");
    let archive = dir.path().join("input.grin");
    let restored = dir.path().join("restored.txt");

    let content = b"Huffman encoding is a greedy algorithm that builds optimal prefix codes.\n".repeat(50);
    std::fs::write(&original, &content).unwrap();

    let out = grin(&["encode", path_str(&original), path_str(&archive)]);
    assert!(out.status.success(), "encode failed: {:?}", out);

    let packed = std::fs::read(&archive).unwrap();
    assert_eq!(&packed[..4], &[0x00, 0x00, 0x07, 0x36]);
    assert!(packed.len() < content.len());

    let out = grin(&["decode", path_str(&archive), path_str(&restored)]);
    assert!(out.status.success(), "decode failed: {:?}", out);
    assert_eq!(std::fs::read(&restored).unwrap(), content);
}

#[test]
fn test_empty_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("empty");
    let archive = dir.path().join("empty.grin");
    let restored = dir.path().join("empty.out");
    std::fs::write(&original, b"").unwrap();

    assert!(grin(&["encode", path_str(&original), path_str(&archive)]).status.success());
    assert!(!std::fs::read(&archive).unwrap().is_empty());
    assert!(grin(&["decode", path_str(&archive), path_str(&restored)]).status.success());
    assert!(std::fs::read(&restored).unwrap().is_empty());
}

#[test]
fn test_raw_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("data.bin");
    let archive = dir.path().join("data.huf");
    let restored = dir.path().join("data.out");
    let content: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    std::fs::write(&original, &content).unwrap();

    assert!(grin(&["encode", "--raw", path_str(&original), path_str(&archive)]).status.success());
    assert_eq!(
        std::fs::read(&archive).unwrap(),
        grin_core::compress(&content).unwrap()
    );

    // a bare archive is not a container
    let out = grin(&["decode", path_str(&archive), path_str(&restored)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!restored.exists());

    assert!(grin(&["decode", "--raw", path_str(&archive), path_str(&restored)]).status.success());
    assert_eq!(std::fs::read(&restored).unwrap(), content);
}

#[test]
fn test_usage_error_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.grin");
    std::fs::write(&input, b"keep me").unwrap();

    for args in [
        vec!["encode", path_str(&input)],
        vec!["compress", path_str(&input), path_str(&output)],
        vec!["encode", path_str(&input), path_str(&output), "--best"],
        vec![],
    ] {
        let out = grin(&args);
        assert_eq!(out.status.code(), Some(2), "args {:?}", args);
        assert!(String::from_utf8_lossy(&out.stderr).contains("USAGE"));
        assert!(!output.exists());
    }
    assert_eq!(std::fs::read(&input).unwrap(), b"keep me");
}

#[test]
fn test_help_succeeds() {
    let out = grin(&["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("grin <encode|decode>"));
}

#[test]
fn test_corrupt_archive_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("broken.grin");
    let restored = dir.path().join("broken.out");

    let mut packed = grin_core::container::pack(b"some text that will be cut short").unwrap();
    packed.truncate(packed.len() - 3);
    std::fs::write(&archive, &packed).unwrap();

    let out = grin(&["decode", path_str(&archive), path_str(&restored)]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("truncated archive").count(), 1, "stderr: {}", stderr);
    assert!(!restored.exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let output = dir.path().join("nope.grin");

    let out = grin(&["encode", path_str(&missing), path_str(&output)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn test_stats_summary() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("a.txt");
    let archive = dir.path().join("a.grin");
    std::fs::write(&original, vec![b'A'; 100]).unwrap();

    let out = grin(&["encode", "--stats", path_str(&original), path_str(&archive)]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("=== Summary ==="));
    assert!(stdout.contains("Body: 101 bits"));
}

#[test]
fn test_global_rust_log_level_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("a.txt");
    let archive = dir.path().join("a.grin");
    std::fs::write(&original, b"abc").unwrap();
    let args = ["encode", path_str(&original), path_str(&archive)];

    let out = grin_with_log("debug", &args);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("encoded 3 bytes"), "stderr: {}", stderr);

    // no RUST_LOG: default warn hides debug output
    let out = grin(&args);
    assert!(out.status.success());
    assert!(!String::from_utf8_lossy(&out.stderr).contains("encoded 3 bytes"));
}

#[test]
fn test_quiet_overrides_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("a.txt");
    let archive = dir.path().join("a.grin");
    std::fs::write(&original, b"abc").unwrap();

    let out = grin_with_log("debug", &["encode", "-q", path_str(&original), path_str(&archive)]);
    assert!(out.status.success());
    assert!(!String::from_utf8_lossy(&out.stderr).contains("encoded 3 bytes"));
}
