//! Test fixtures: temporary libraries and deterministic PCM payloads.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use echoes_audio::AudioFormat;
use echoes_cli::canvas::Canvas;
use echoes_cli::model::GenerativeModel;
use echoes_store::{CompositionStore, FileStorage, COMPOSITIONS_KEY};
use tempfile::TempDir;

/// A composition library in a temporary data directory.
pub struct LibraryFixture {
    pub root: TempDir,
}

impl LibraryFixture {
    /// Create a new empty library fixture.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    /// Get the data directory path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path of the JSON document holding the saved compositions.
    pub fn document_path(&self) -> PathBuf {
        self.root.path().join(format!("{}.json", COMPOSITIONS_KEY))
    }

    /// Open a store over the fixture directory.
    pub fn store(&self) -> CompositionStore<FileStorage> {
        let storage = FileStorage::open(self.root.path()).expect("Failed to open file storage");
        CompositionStore::new(storage)
    }

    /// Open a canvas over the fixture directory.
    pub fn canvas<M: GenerativeModel>(&self, model: M) -> Canvas<M, CompositionStore<FileStorage>> {
        Canvas::new(model, self.store())
    }

    /// Write raw text into the composition document.
    pub fn write_document(&self, content: &str) {
        std::fs::write(self.document_path(), content).expect("Failed to write document");
    }
}

impl Default for LibraryFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A fixed save time: 2025-03-14T09:26:53.589Z.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::milliseconds(589)
}

/// A named PCM payload with the format it should be wrapped in.
pub struct PcmCase {
    pub name: &'static str,
    pub format: AudioFormat,
    pub pcm: Vec<u8>,
}

/// Bytes `0, 1, .. 250, 0, 1, ..` of length `len`.
pub fn ramp_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// A 16-bit sawtooth of `frames` samples.
pub fn sawtooth_i16(frames: usize) -> Vec<u8> {
    (0..frames as u32)
        .flat_map(|i| {
            let value = ((i * 1201) % 65536) as i32 - 32768;
            (value as i16).to_le_bytes()
        })
        .collect()
}

/// Every PCM case with a checked-in golden hash.
pub fn golden_cases() -> Vec<PcmCase> {
    vec![
        PcmCase {
            name: "tiny_mono_24k",
            format: AudioFormat::mono(24_000),
            pcm: vec![0, 1, 2, 3],
        },
        PcmCase {
            name: "empty_mono_24k",
            format: AudioFormat::mono(24_000),
            pcm: Vec::new(),
        },
        PcmCase {
            name: "saw_mono_24k",
            format: AudioFormat::mono(24_000),
            pcm: sawtooth_i16(2_400),
        },
        PcmCase {
            name: "ramp_stereo_44k_24bit",
            format: AudioFormat::new(2, 44_100, 3),
            pcm: ramp_bytes(600),
        },
        PcmCase {
            name: "silence_scripted_24k",
            format: AudioFormat::mono(24_000),
            pcm: vec![0; 4_800],
        },
    ]
}
