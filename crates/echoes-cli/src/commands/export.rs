//! Export command implementation
//!
//! Loads a saved composition onto the canvas and writes its art and
//! soundscape to disk.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use echoes_spec::{extension_for_mime, Composition};
use serde::{Deserialize, Serialize};

use super::compose::print_notices;
use super::json_output::{error_codes, CommandOutput, JsonError};
use super::write_data_uri;
use crate::config::EchoesConfig;
use crate::context;

/// Result of the `export` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutput {
    /// Composition id
    pub id: String,
    /// The mood
    pub mood: String,
    /// Written art file
    pub art_path: String,
    /// Written WAV file
    pub sound_path: String,
    /// Display filter after loading
    pub filter: String,
}

/// Run the export command
///
/// # Returns
/// Exit code: 0 on success, 1 if the composition is missing or its media
/// cannot be written
pub fn run(config: &EchoesConfig, id: &str, out_dir: &str, json_output: bool) -> Result<ExitCode> {
    let mut canvas = context::open_canvas(config)?;

    let composition = match canvas.load_composition(id) {
        Ok(composition) => composition.clone(),
        Err(err) => {
            let notices = canvas.take_notices();
            if json_output {
                return CommandOutput::<ExportOutput>::failure(vec![JsonError::new(
                    error_codes::NOT_FOUND,
                    err.error,
                )])
                .with_notices(notices)
                .emit();
            }
            print_notices(&notices);
            return Ok(ExitCode::from(1));
        }
    };

    let (art_path, sound_path) = export_paths(&composition, Path::new(out_dir));
    let written = write_data_uri(&composition.art_data_uri, &art_path)
        .and_then(|_| write_data_uri(&composition.sound_data_uri, &sound_path));
    if let Err(err) = written {
        if json_output {
            return CommandOutput::<ExportOutput>::failure(vec![JsonError::new(
                error_codes::FILE_WRITE,
                format!("{:#}", err),
            )])
            .emit();
        }
        return Err(err);
    }

    let output = ExportOutput {
        id: composition.id.clone(),
        mood: composition.mood.clone(),
        art_path: art_path.display().to_string(),
        sound_path: sound_path.display().to_string(),
        filter: canvas.filters().css_filter(),
    };
    let notices = canvas.take_notices();

    if json_output {
        return CommandOutput::success(output).with_notices(notices).emit();
    }

    print_notices(&notices);
    println!("  {} {}", "->".green(), output.art_path);
    println!("  {} {}", "->".green(), output.sound_path);
    println!("{} {}", "Filter:".dimmed(), output.filter);
    Ok(ExitCode::SUCCESS)
}

/// Output file paths for a composition, named after its id.
pub fn export_paths(composition: &Composition, out_dir: &Path) -> (PathBuf, PathBuf) {
    let stem = file_stem(&composition.id);
    let art_mime = composition
        .art_data_uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split(',').next())
        .unwrap_or_default();
    let art = out_dir.join(format!("{stem}-art.{}", extension_for_mime(art_mime)));
    let sound = out_dir.join(format!("{stem}-sound.wav"));
    (art, sound)
}

/// Ids are timestamps; `:` is not allowed in file names on every platform.
fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
