//! Delete command implementation

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::compose::print_notices;
use super::json_output::{error_codes, CommandOutput, JsonError};
use crate::config::EchoesConfig;
use crate::context;

/// Result of the `delete` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutput {
    /// The requested id
    pub id: String,
    /// Number of compositions removed (0 if the id was unknown)
    pub removed: usize,
    /// Compositions left in the library
    pub remaining: usize,
}

/// Run the delete command
///
/// Deleting an unknown id succeeds and changes nothing.
pub fn run(config: &EchoesConfig, id: &str, json_output: bool) -> Result<ExitCode> {
    let mut canvas = context::open_canvas(config)?;
    let before = canvas.saved().len();

    let result = canvas.delete_composition(id);
    let notices = canvas.take_notices();

    if let Err(err) = result {
        if json_output {
            return CommandOutput::<DeleteOutput>::failure(vec![JsonError::new(
                error_codes::PERSISTENCE,
                err.error,
            )])
            .with_notices(notices)
            .emit();
        }
        print_notices(&notices);
        return Ok(ExitCode::from(1));
    }

    let remaining = canvas.saved().len();
    let output = DeleteOutput {
        id: id.to_string(),
        removed: before.saturating_sub(remaining),
        remaining,
    };

    if json_output {
        return CommandOutput::success(output).with_notices(notices).emit();
    }

    if output.removed == 0 {
        println!("  {} No composition with id {}", "!".yellow(), id);
    } else {
        print_notices(&notices);
    }
    println!("You have {} saved composition(s).", output.remaining);
    Ok(ExitCode::SUCCESS)
}
