//! Library-level playback through the public API: a host loop driving the
//! player and a deck the way the terminal host does.

use std::sync::Arc;
use std::time::Duration;

use story_player::config::PlayerConfig;
use story_player::deck::{Deck, DeckStep};
use story_player::player::{Boundary, Phase, PlayerEvent, StoryPlayer};
use story_player::story::StoryFile;

use crate::helpers::SAMPLE_STORIES;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Ack every `ItemStarted` immediately and route boundaries to the deck.
/// Returns false once the deck closes.
fn dispatch(player: &mut StoryPlayer, deck: &mut Deck, events: Vec<PlayerEvent>) -> bool {
    let mut pending = events;
    while let Some(event) = pending.pop() {
        match event {
            PlayerEvent::ItemStarted { epoch, .. } => pending.extend(player.on_media_ready(epoch)),
            PlayerEvent::Boundary(boundary) => match deck.on_boundary(boundary) {
                DeckStep::Show(seq) => pending.extend(player.show(seq).unwrap()),
                DeckStep::Restart => pending.extend(player.restart()),
                DeckStep::Close => {
                    player.hide();
                    return false;
                }
            },
            _ => {}
        }
    }
    true
}

fn sample_deck() -> Deck {
    let file = StoryFile::parse(SAMPLE_STORIES).unwrap();
    Deck::new(file.into_sequences()).unwrap()
}

#[test]
fn deck_plays_every_user_to_the_end() {
    let mut deck = sample_deck();
    assert_eq!(deck.len(), 2);

    let mut player = StoryPlayer::new(PlayerConfig::default()).unwrap();
    let events = player.show(deck.current()).unwrap();
    assert!(dispatch(&mut player, &mut deck, events));

    let mut elapsed = Duration::ZERO;
    let mut open = true;
    while open && elapsed < Duration::from_secs(60) {
        let events = player.tick(player.epoch(), ms(100));
        open = dispatch(&mut player, &mut deck, events);
        elapsed += ms(100);
    }

    assert!(!open);
    // 5s + 3s default for alice, 3s default for bob
    assert_eq!(elapsed, Duration::from_millis(11_000));
    assert_eq!(player.phase(), Phase::Idle);
}

#[test]
fn hold_pauses_progress_exactly() {
    let mut deck = sample_deck();
    let mut player = StoryPlayer::new(PlayerConfig::default()).unwrap();
    let events = player.show(deck.current()).unwrap();
    dispatch(&mut player, &mut deck, events);

    player.tick(player.epoch(), ms(1000));
    let before = player.state().progress;

    player.on_long_press_start();
    player.tick(player.epoch(), ms(4000));
    assert_eq!(player.state().progress, before);
    assert_eq!(player.phase(), Phase::Paused);

    player.on_long_press_end();
    player.tick(player.epoch(), ms(1000));
    assert!((player.state().progress - 0.4).abs() < 1e-9);
}

#[test]
fn tapping_back_on_first_item_reaches_previous_user() {
    let mut deck = sample_deck();
    deck.select(1);
    let mut player = StoryPlayer::new(PlayerConfig::default()).unwrap();
    let events = player.show(deck.current()).unwrap();
    dispatch(&mut player, &mut deck, events);

    let events = player.tap(10.0, 100.0);
    assert_eq!(events, vec![PlayerEvent::Boundary(Boundary::Start)]);
    dispatch(&mut player, &mut deck, events);

    assert_eq!(player.sequence().unwrap().id, "alice");
    assert_eq!(player.state().current_index, 0);
    assert_eq!(player.phase(), Phase::Playing);
}

#[test]
fn superseded_sequence_ignores_old_callbacks() {
    let deck = sample_deck();
    let file = StoryFile::parse(SAMPLE_STORIES).unwrap();
    let bob = Arc::new(file.users[1].clone());

    let mut player = StoryPlayer::new(PlayerConfig::default()).unwrap();
    player.show(deck.current()).unwrap();
    let stale = player.epoch();

    player.show(bob).unwrap();
    assert!(player.on_media_ready(stale).is_empty());
    assert!(player.tick(stale, ms(10_000)).is_empty());
    assert_eq!(player.phase(), Phase::Loading);
    assert_eq!(player.state().progress, 0.0);
}

#[test]
fn indicators_track_watched_items() {
    let mut deck = sample_deck();
    let mut player = StoryPlayer::new(PlayerConfig::default()).unwrap();
    let events = player.show(deck.current()).unwrap();
    dispatch(&mut player, &mut deck, events);

    let events = player.next();
    dispatch(&mut player, &mut deck, events);
    player.tick(player.epoch(), ms(1500));

    let values = player.indicators();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], 1.0);
    assert!((values[1] - 0.5).abs() < 1e-9);
}
