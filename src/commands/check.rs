//! Check subcommand handler

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};

use story_player::player::validate_sequence;
use story_player::term::render::format_seconds;
use story_player::{Config, Sequence, StoryFile};

/// Total playback time of a sequence, using `default` for items without
/// an explicit duration.
fn total_duration(sequence: &Sequence, default: Duration) -> Duration {
    sequence
        .items
        .iter()
        .map(|item| match item.duration {
            Some(ms) if ms > 0 => Duration::from_millis(ms as u64),
            _ => default,
        })
        .sum()
}

/// Validate a story file and print a per-user summary.
#[cfg(not(tarpaulin_include))]
pub fn handle(path: &Path) -> Result<()> {
    let config = Config::load()?;
    let default = config.player.default_duration();
    let file = StoryFile::load(path)?;

    let mut problems = 0;
    let mut playable = 0;
    let mut stories = 0;
    let mut total = Duration::ZERO;

    for sequence in &file.users {
        let label = match &sequence.name {
            Some(name) => format!("{} ({})", sequence.id, name),
            None => sequence.id.clone(),
        };

        if sequence.is_empty() {
            println!("{}: no stories (skipped)", label);
            continue;
        }

        if let Err(e) = validate_sequence(sequence) {
            println!("{}: {}", label, e);
            problems += 1;
            continue;
        }

        let duration = total_duration(sequence, default);
        println!(
            "{}: {} stories, {}",
            label,
            sequence.len(),
            format_seconds(duration)
        );
        playable += 1;
        stories += sequence.len();
        total += duration;
    }

    println!(
        "Total: {} users, {} stories, {}",
        playable,
        stories,
        format_seconds(total)
    );

    if problems > 0 {
        bail!("{} user(s) cannot be played", problems);
    }
    if playable == 0 {
        bail!("No user has any stories");
    }
    Ok(())
}
