//! Play subcommand handler

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use story_player::player::validate_sequence;
use story_player::term::{play_deck, PlaybackResult};
use story_player::{Config, Deck, StoryFile};

#[derive(Args)]
pub struct PlayArgs {
    /// Story file (JSON)
    pub file: PathBuf,

    /// Start with this user's stories
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Duration for stories without one, in milliseconds
    #[arg(long, value_name = "MS")]
    pub duration_ms: Option<u64>,

    /// Hide the progress indicators
    #[arg(long)]
    pub no_progress: bool,

    /// Fraction of the width that counts as "go back" (0-1)
    #[arg(long, value_name = "RATIO")]
    pub split: Option<f64>,

    /// Simulated media load time, in milliseconds
    #[arg(long, value_name = "MS")]
    pub load_delay_ms: Option<u64>,
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &mut Config, args: &PlayArgs) {
    if let Some(ms) = args.duration_ms {
        config.player.default_duration_ms = ms;
    }
    if args.no_progress {
        config.player.enable_progress = false;
    }
    if let Some(split) = args.split {
        config.player.tap_split_ratio = split;
    }
    if let Some(ms) = args.load_delay_ms {
        config.terminal.load_delay_ms = ms;
    }
}

/// Load the story file and build a deck positioned at the requested user.
pub fn build_deck(args: &PlayArgs) -> Result<Deck> {
    let file = StoryFile::load(&args.file)?;
    for sequence in file.users.iter().filter(|s| !s.is_empty()) {
        validate_sequence(sequence)
            .with_context(|| format!("User '{}' cannot be played", sequence.id))?;
    }

    let Some(mut deck) = Deck::new(file.into_sequences()) else {
        bail!("No user in {} has any stories", args.file.display());
    };

    if let Some(id) = &args.user {
        if deck.select_id(id).is_none() {
            bail!("User '{}' not found or has no stories", id);
        }
    }
    Ok(deck)
}

/// Play a story file in the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: PlayArgs) -> Result<()> {
    let mut config = Config::load()?;
    apply_overrides(&mut config, &args);
    config.player.validate()?;

    let deck = build_deck(&args)?;

    match play_deck(deck, &config)? {
        PlaybackResult::Finished => println!("All stories watched."),
        PlaybackResult::Interrupted => println!("Stopped."),
        PlaybackResult::Aborted(reason) => bail!(reason),
    }
    Ok(())
}
