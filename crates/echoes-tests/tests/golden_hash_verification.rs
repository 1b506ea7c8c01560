//! Golden hash verification for WAV encoding.
//!
//! Each `golden/wav/<name>.hash` file holds the 64-character lowercase
//! hexadecimal BLAKE3 hash of the WAV produced for the fixture with that name.
//!
//! ```bash
//! # Update expected hashes (use with caution!)
//! ECHOES_UPDATE_GOLDEN_HASHES=1 cargo test -p echoes-tests --test golden_hash_verification
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use echoes_audio::{encode_data_uri, encode_to_vec, WavInfo};
use echoes_tests::fixtures::golden_cases;
use pretty_assertions::assert_eq;

/// Whether to update expected hashes instead of comparing.
fn should_update_hashes() -> bool {
    std::env::var("ECHOES_UPDATE_GOLDEN_HASHES")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn golden_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Compute BLAKE3 hash of data and return as hex string.
fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Read expected hash from a .hash file.
fn read_expected_hash(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

#[test]
fn test_golden_wav_hashes() {
    let mut failures = Vec::new();

    for case in golden_cases() {
        let wav = encode_to_vec(&case.pcm, &case.format).expect("fixture format is valid");
        let actual = compute_hash(&wav);
        let hash_path = golden_dir().join("wav").join(format!("{}.hash", case.name));

        if should_update_hashes() {
            fs::write(&hash_path, format!("{}\n", actual)).expect("Failed to write hash file");
            continue;
        }

        match read_expected_hash(&hash_path) {
            Some(expected) if expected == actual => {}
            Some(expected) => failures.push(format!(
                "{}: expected {}, got {}",
                case.name, expected, actual
            )),
            None => failures.push(format!("{}: missing {}", case.name, hash_path.display())),
        }
    }

    assert!(failures.is_empty(), "golden hash mismatches:\n{}", failures.join("\n"));
}

#[test]
fn test_golden_files_cover_every_case() {
    let names: Vec<&str> = golden_cases().iter().map(|c| c.name).collect();
    for entry in fs::read_dir(golden_dir().join("wav")).expect("golden dir exists") {
        let path = entry.expect("readable entry").path();
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
        assert!(
            names.contains(&stem.as_str()),
            "orphaned golden file: {}",
            path.display()
        );
    }
}

#[test]
fn test_golden_headers_describe_payload() {
    for case in golden_cases() {
        let wav = encode_to_vec(&case.pcm, &case.format).unwrap();
        let info = WavInfo::parse(&wav).unwrap();
        assert_eq!(info.channels, case.format.channel_count, "{}", case.name);
        assert_eq!(info.sample_rate, case.format.sample_rate, "{}", case.name);
        assert_eq!(info.data_len as usize, case.pcm.len(), "{}", case.name);
        assert_eq!(wav.len(), 44 + case.pcm.len(), "{}", case.name);
    }
}

#[test]
fn test_golden_data_uri() {
    let expected = fs::read_to_string(golden_dir().join("data_uri").join("tiny_mono_24k.txt"))
        .expect("golden data URI exists");
    let case = golden_cases()
        .into_iter()
        .find(|c| c.name == "tiny_mono_24k")
        .unwrap();
    let actual = encode_data_uri(&case.pcm, &case.format).unwrap();
    assert_eq!(actual, expected.trim_end());
}

#[test]
fn test_encoding_is_deterministic() {
    for case in golden_cases() {
        let hashes: Vec<String> = (0..3)
            .map(|_| compute_hash(&encode_to_vec(&case.pcm, &case.format).unwrap()))
            .collect();
        assert!(hashes.windows(2).all(|w| w[0] == w[1]), "{}", case.name);
    }
}
