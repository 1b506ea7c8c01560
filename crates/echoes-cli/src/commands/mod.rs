//! CLI command implementations

pub mod art;
pub mod compose;
pub mod delete;
pub mod encode;
pub mod export;
pub mod inspect;
pub mod json_output;
pub mod list;
pub mod sound;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use echoes_spec::{parse_data_uri, DataUri};

/// Decodes a base64 data URI and writes its payload to `path`.
pub(crate) fn write_data_uri(uri: &str, path: &Path) -> Result<DataUri> {
    let media = parse_data_uri(uri).context("Media is not a base64 data URI")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, &media.data)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(media)
}

/// Human-readable byte count.
pub(crate) fn format_bytes(len: usize) -> String {
    const KIB: f64 = 1024.0;
    let len_f = len as f64;
    if len_f < KIB {
        format!("{} B", len)
    } else if len_f < KIB * KIB {
        format!("{:.1} KiB", len_f / KIB)
    } else {
        format!("{:.1} MiB", len_f / (KIB * KIB))
    }
}
