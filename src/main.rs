//! `story` - play story decks in the terminal.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "story")]
#[command(version, about = "Auto-advancing story player for the terminal")]
#[command(long_about = "Play per-user sequences of timed images and videos.\n\n\
Click or use the arrow keys to move between stories, hold the mouse button \
or press space to pause, and press ? inside the player for all controls.")]
struct Cli {
    /// Write debug logs to this file (filter with STORY_LOG)
    #[arg(long, global = true, value_name = "FILE")]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story file
    #[command(long_about = "Play a story file in the terminal.\n\n\
Stories advance automatically. When a user's stories end, the next user's \
start; going back past the first story returns to the previous user.")]
    Play(commands::play::PlayArgs),

    /// Validate a story file and print a summary
    Check {
        /// Story file (JSON)
        file: PathBuf,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write a configuration file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        commands::init_logging(path)?;
    }

    match cli.command {
        Commands::Play(args) => commands::play::handle(args),
        Commands::Check { file } => commands::check::handle(&file),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
    }
}
