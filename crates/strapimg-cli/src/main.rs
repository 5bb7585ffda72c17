//! strapimg CLI
//!
//! Command-line interface for strapimg - upload Joplin note images to Strapi.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use strapimg_core::Config;

mod commands;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "strapimg")]
#[command(about = "Upload the images of a Joplin note to Strapi and relink them")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Note to work on (defaults to the most recently edited note)
    #[arg(short, long, global = true, value_name = "NOTE_ID")]
    note: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload the note's images to Strapi and point the note at them
    Upload {
        /// Print what happened to each image
        #[arg(long)]
        summary: bool,
    },
    /// List the note's images without uploading anything
    Scan,
    /// Check the Joplin connection and upload settings
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_key, strapi_url, resources_path, joplin_url, joplin_token, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work on the file itself
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config);

    match cli.command {
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Upload { summary } => {
            commands::upload::upload(&config, cli.note, summary, &output).await
        }
        Commands::Scan => commands::scan::scan(&config, cli.note, &output).await,
        Commands::Status => commands::status::show(&config, &output).await,
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
        Some(ConfigCommands::Path) => commands::config::path(config_path, output),
    }
}
