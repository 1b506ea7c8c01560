//! List command implementation
//!
//! Shows the saved composition library.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use echoes_spec::{data_uri_payload, mime_essence, Composition};
use echoes_store::CompositionRepository;
use serde::{Deserialize, Serialize};

use super::json_output::CommandOutput;
use crate::config::EchoesConfig;
use crate::context;

/// One saved composition, without its media payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSummary {
    /// Composition id (save timestamp)
    pub id: String,
    /// The mood
    pub mood: String,
    /// Save date (`YYYY-MM-DD`), if the id is a timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_on: Option<String>,
    /// Art media type
    pub art_mime_type: String,
    /// Approximate decoded soundscape size in bytes
    pub sound_bytes: usize,
}

impl From<&Composition> for CompositionSummary {
    fn from(c: &Composition) -> Self {
        let art_mime_type = c
            .art_data_uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .map(|(header, _)| mime_essence(header))
            .unwrap_or_else(|| "url".to_string());
        Self {
            id: c.id.clone(),
            mood: c.mood.clone(),
            saved_on: c.saved_at().map(|at| at.format("%Y-%m-%d").to_string()),
            art_mime_type,
            sound_bytes: decoded_len(data_uri_payload(&c.sound_data_uri)),
        }
    }
}

/// Result of the `list` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutput {
    /// Number of saved compositions
    pub count: usize,
    /// Saved compositions in save order
    pub compositions: Vec<CompositionSummary>,
}

/// Run the list command
pub fn run(config: &EchoesConfig, json_output: bool) -> Result<ExitCode> {
    let store = context::open_store(config)?;
    let compositions: Vec<CompositionSummary> =
        store.load().iter().map(CompositionSummary::from).collect();

    if json_output {
        return CommandOutput::success(ListOutput {
            count: compositions.len(),
            compositions,
        })
        .emit();
    }

    println!("{}", "Saved Echoes".cyan().bold());
    if compositions.is_empty() {
        println!("  {}", "You have no saved compositions yet.".dimmed());
        println!("  {}", "Generate and save a canvas to see it here.".dimmed());
    }
    for c in &compositions {
        println!(
            "  {} {}  {}  {}",
            "->".green(),
            c.mood.bold(),
            c.saved_on.as_deref().unwrap_or("unknown date").dimmed(),
            c.id.dimmed()
        );
    }
    println!();
    println!("You have {} saved composition(s).", compositions.len());
    Ok(ExitCode::SUCCESS)
}

/// Byte length a padded base64 string decodes to.
fn decoded_len(b64: &str) -> usize {
    let b64 = b64.trim();
    let padding = b64.bytes().rev().take_while(|&b| b == b'=').count();
    (b64.len() / 4 * 3).saturating_sub(padding)
}
