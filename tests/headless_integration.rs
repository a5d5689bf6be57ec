use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hangman::{
    app::{App, AppState, Flow},
    categories::{Catalog, Category, WordEntry},
    game::{GameSession, RoundOutcome},
    runtime::{HangmanEvent, Runner, TestEventSource},
    scoring::ScoringConfig,
    stats::ScoreStore,
    storage::FileStore,
};
use tempfile::tempdir;

fn catalog() -> Catalog {
    Catalog::new(vec![
        Category {
            name: "Animals".into(),
            icon: "A".into(),
            words: vec![WordEntry::new("GATO", "meows")],
        },
        Category {
            name: "Sky".into(),
            icon: "S".into(),
            words: vec![WordEntry::new("SOL", "shines")],
        },
    ])
}

fn app_in(dir: &std::path::Path, category: Option<&str>) -> App {
    let game = GameSession::new(
        Box::new(catalog()),
        ScoreStore::new(Box::new(FileStore::new(dir))),
        ScoringConfig::default(),
    );
    App::new(game, category)
}

fn key(c: char) -> HangmanEvent {
    HangmanEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Drive a tiny event loop until the app asks to quit (or bounded steps)
fn drive(app: &mut App, events: Vec<HangmanEvent>) {
    let (tx, rx) = mpsc::channel();
    for ev in events {
        tx.send(ev).unwrap();
    }
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    for _ in 0..100u32 {
        match runner.step() {
            HangmanEvent::Key(k) => {
                if app.handle_key(k) == Flow::Quit {
                    break;
                }
            }
            HangmanEvent::Resize | HangmanEvent::Tick => {}
        }
    }
}

#[test]
fn headless_win_is_persisted_to_disk() {
    let dir = tempdir().unwrap();
    let mut app = app_in(dir.path(), None);

    // pick "Animals" from the picker, then spell the word
    let mut events = vec![HangmanEvent::Key(KeyEvent::new(
        KeyCode::Enter,
        KeyModifiers::NONE,
    ))];
    events.extend("gato".chars().map(key));
    drive(&mut app, events);

    assert_eq!(app.state, AppState::Result);
    assert!(matches!(app.last_outcome, Some(RoundOutcome::Won(ref w)) if w.final_score == 120));

    // a fresh session over the same directory sees the stored score
    let reopened = app_in(dir.path(), None);
    let stats = reopened.board.get("Animals").unwrap();
    assert_eq!(stats.total_points, 120);
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.games_won, 1);
    assert!(dir.path().join("hangmanScores.json").exists());
}

#[test]
fn headless_loss_after_six_misses() {
    let dir = tempdir().unwrap();
    let mut app = app_in(dir.path(), Some("Sky"));

    drive(&mut app, "soxyzqwv".chars().map(key).collect());

    assert_eq!(app.state, AppState::Result);
    let outcome = app.last_outcome.as_ref().unwrap();
    assert!(!outcome.is_win());
    assert_eq!(outcome.score(), 20);
    assert_eq!(app.game.revealed_word(), "S O L");

    let stats = app.board.get("Sky").unwrap();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.games_won, 0);
    assert_eq!(stats.total_points, 20);
}

#[test]
fn headless_hint_then_win_applies_penalty() {
    let dir = tempdir().unwrap();
    let mut app = app_in(dir.path(), Some("Sky"));

    drive(&mut app, "so?l".chars().map(key).collect());

    // 20 points floor to 0 on the hint, then +10 for L and +30 attempts bonus
    assert_eq!(app.board.category_points("Sky"), 40);
}

#[test]
fn headless_reset_clears_scores_file() {
    let dir = tempdir().unwrap();
    let mut app = app_in(dir.path(), Some("Sky"));

    let mut events: Vec<HangmanEvent> = "sol".chars().map(key).collect();
    events.push(HangmanEvent::Key(KeyEvent::new(
        KeyCode::Enter,
        KeyModifiers::NONE,
    )));
    events.push(HangmanEvent::Key(KeyEvent::new(
        KeyCode::Char('r'),
        KeyModifiers::CONTROL,
    )));
    events.push(key('y'));
    drive(&mut app, events);

    assert!(app.board.is_empty());
    assert!(!dir.path().join("hangmanScores.json").exists());
}

#[test]
fn headless_esc_quits() {
    let dir = tempdir().unwrap();
    let mut app = app_in(dir.path(), Some("Sky"));
    let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(app.handle_key(esc), Flow::Quit);
}
