//! Emotional Echoes CLI - mood-driven art and soundscapes
//!
//! This binary generates art and soundscapes from a mood, manages the saved
//! composition library, and wraps raw PCM in WAV containers.

use std::process::ExitCode;

use clap::Parser;
use echoes_audio::AudioFormat;
use echoes_cli::commands;
use echoes_cli::config::{ConfigOverrides, EchoesConfig};
use echoes_cli::logging;

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = match EchoesConfig::resolve(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            return ExitCode::from(1);
        }
    };
    if let Err(e) = logging::init_logging(config.log_level()) {
        eprintln!("{}: {}", colored::Colorize::yellow("warning"), e);
    }

    let result = match cli.command {
        Commands::Art { mood, out, json } => {
            commands::art::run(&config, &mood, out.as_deref(), json)
        }
        Commands::Sound { mood, out, json } => {
            commands::sound::run(&config, &mood, out.as_deref(), json)
        }
        Commands::Compose {
            mood,
            no_sound,
            save,
            complexity,
            intensity,
            json,
        } => {
            let options = commands::compose::ComposeOptions {
                no_sound,
                save,
                complexity,
                intensity,
            };
            commands::compose::run(&config, &mood, &options, json)
        }
        Commands::List { json } => commands::list::run(&config, json),
        Commands::Export { id, out_dir, json } => {
            commands::export::run(&config, &id, &out_dir, json)
        }
        Commands::Delete { id, json } => commands::delete::run(&config, &id, json),
        Commands::Encode {
            input,
            output,
            channels,
            rate,
            width,
            data_uri,
            json,
        } => {
            let options = commands::encode::EncodeOptions {
                format: AudioFormat::new(channels, rate, width),
                data_uri,
            };
            commands::encode::run(&input, &output, &options, json)
        }
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
