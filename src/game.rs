use std::collections::BTreeSet;

use thiserror::Error;

use crate::categories::WordSource;
use crate::scoring::{HangmanPart, ScoringConfig};
use crate::stats::{ScoreBoard, ScoreStore};
use crate::storage::StorageError;

/// Display marker for a letter not guessed yet.
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Error)]
pub enum GameError {
    #[error("select a category first")]
    NoCategorySelected,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, GameError>;

/// How a key on the on-screen keyboard should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Unused,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinSummary {
    pub word: String,
    pub letter_points: u32,
    pub attempts_bonus: u32,
    pub no_hint_bonus: u32,
    pub hint_used: bool,
    pub hint_penalty: u32,
    pub final_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossSummary {
    pub word: String,
    pub hint: String,
    pub wrong_count: u32,
    pub score: u32,
}

/// End-of-round result shown in the result modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Won(WinSummary),
    Lost(LossSummary),
}

impl RoundOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, RoundOutcome::Won(_))
    }

    pub fn score(&self) -> u32 {
        match self {
            RoundOutcome::Won(w) => w.final_score,
            RoundOutcome::Lost(l) => l.score,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RoundOutcome::Won(_) => "Congratulations!",
            RoundOutcome::Lost(_) => "Too bad!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RoundOutcome::Won(_) => "You guessed the word",
            RoundOutcome::Lost(_) => "You did not manage to guess the word",
        }
    }

    /// Label/value pairs for the result table.
    pub fn stat_rows(&self) -> Vec<(&'static str, String)> {
        match self {
            RoundOutcome::Won(w) => vec![
                ("Word", w.word.clone()),
                ("Letter points", w.letter_points.to_string()),
                ("Remaining attempts bonus", w.attempts_bonus.to_string()),
                ("No hint bonus", w.no_hint_bonus.to_string()),
                (
                    "Hint used",
                    if w.hint_used {
                        format!("yes (-{} pts)", w.hint_penalty)
                    } else {
                        format!("no (+{} pts)", w.no_hint_bonus)
                    },
                ),
                ("Total", w.final_score.to_string()),
            ],
            RoundOutcome::Lost(l) => vec![
                ("The word was", l.word.clone()),
                ("Hint", l.hint.clone()),
                ("Wrong guesses", l.wrong_count.to_string()),
                ("Points", l.score.to_string()),
            ],
        }
    }
}

/// What changed after an input; the presentation layer consumes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted { category: String, word_len: usize },
    LetterRevealed { letter: char, occurrences: usize, points: u32 },
    LetterMissed { letter: char, wrong_count: u32 },
    HangmanPart(HangmanPart),
    HintShown { hint: String },
    RoundEnded(RoundOutcome),
    /// The round ended but its result could not be written to the score store.
    ScoreNotSaved { reason: String },
    ScoresReset,
}

/// State of one hangman round plus the stats it folds into.
pub struct GameSession {
    source: Box<dyn WordSource>,
    scores: ScoreStore,
    scoring: ScoringConfig,
    category: Option<String>,
    secret_word: Vec<char>,
    hint: String,
    revealed: Vec<Option<char>>,
    guessed_letters: BTreeSet<char>,
    wrong_count: u32,
    active: bool,
    hint_revealed: bool,
    score: u32,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("category", &self.category)
            .field("revealed", &self.revealed_word())
            .field("wrong_count", &self.wrong_count)
            .field("active", &self.active)
            .field("hint_revealed", &self.hint_revealed)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    pub fn new(source: Box<dyn WordSource>, scores: ScoreStore, scoring: ScoringConfig) -> Self {
        Self {
            source,
            scores,
            scoring,
            category: None,
            secret_word: Vec::new(),
            hint: String::new(),
            revealed: Vec::new(),
            guessed_letters: BTreeSet::new(),
            wrong_count: 0,
            active: false,
            hint_revealed: false,
            score: 0,
        }
    }

    /// Selects `name` and starts a round in it. Unknown names are ignored.
    pub fn select_category(&mut self, name: &str) -> Result<Vec<GameEvent>> {
        if self.source.category_info(name).is_none() {
            tracing::debug!(category = name, "ignoring unknown category");
            return Ok(Vec::new());
        }
        self.category = Some(name.to_string());
        self.start_new_round()
    }

    pub fn start_new_round(&mut self) -> Result<Vec<GameEvent>> {
        let category = self.category.clone().ok_or(GameError::NoCategorySelected)?;

        let Some(entry) = self.source.random_word(&category) else {
            tracing::warn!(category, "no word available, round not started");
            return Ok(Vec::new());
        };

        self.secret_word = entry.word.chars().collect();
        self.hint = entry.hint;
        self.revealed = vec![None; self.secret_word.len()];
        self.guessed_letters.clear();
        self.wrong_count = 0;
        self.active = true;
        self.hint_revealed = false;
        self.score = 0;

        tracing::info!(category, word_len = self.secret_word.len(), "round started");

        Ok(vec![GameEvent::RoundStarted {
            category,
            word_len: self.secret_word.len(),
        }])
    }

    pub fn guess_letter(&mut self, letter: char) -> Result<Vec<GameEvent>> {
        let Some(letter) = normalize_letter(letter) else {
            return Ok(Vec::new());
        };
        if !self.active || !self.guessed_letters.insert(letter) {
            return Ok(Vec::new());
        }

        let mut events = Vec::new();
        let mut occurrences = 0;
        for (slot, c) in self.revealed.iter_mut().zip(&self.secret_word) {
            if *c == letter {
                *slot = Some(letter);
                occurrences += 1;
            }
        }

        if occurrences > 0 {
            let points = self.scoring.letter_points(occurrences);
            self.score = self.score.saturating_add(points);
            events.push(GameEvent::LetterRevealed {
                letter,
                occurrences,
                points,
            });
            if self.revealed.iter().all(Option::is_some) {
                events.extend(self.win());
            }
        } else {
            self.wrong_count += 1;
            events.push(GameEvent::LetterMissed {
                letter,
                wrong_count: self.wrong_count,
            });
            if let Some(part) = HangmanPart::for_wrong_count(self.wrong_count) {
                events.push(GameEvent::HangmanPart(part));
            }
            if self.wrong_count >= self.scoring.max_wrong_guesses {
                events.extend(self.lose());
            }
        }

        Ok(events)
    }

    pub fn show_hint(&mut self) -> Vec<GameEvent> {
        if self.hint_revealed || !self.active {
            return Vec::new();
        }
        self.hint_revealed = true;
        self.score = self.scoring.apply_hint_penalty(self.score);
        tracing::debug!(score = self.score, "hint revealed");
        vec![GameEvent::HintShown {
            hint: self.hint.clone(),
        }]
    }

    fn win(&mut self) -> Vec<GameEvent> {
        self.active = false;

        let attempts_bonus = self.scoring.attempts_bonus(self.wrong_count);
        let no_hint_bonus = self.scoring.no_hint_bonus(self.hint_revealed);
        self.score = self
            .score
            .saturating_add(attempts_bonus)
            .saturating_add(no_hint_bonus);

        let ended = GameEvent::RoundEnded(RoundOutcome::Won(WinSummary {
            word: self.secret_word(),
            letter_points: self.scoring.letter_points(self.secret_word.len()),
            attempts_bonus,
            no_hint_bonus,
            hint_used: self.hint_revealed,
            hint_penalty: self.scoring.hint_penalty,
            final_score: self.score,
        }));
        self.finish_round(ended, true)
    }

    fn lose(&mut self) -> Vec<GameEvent> {
        self.active = false;
        self.revealed = self.secret_word.iter().copied().map(Some).collect();

        let ended = GameEvent::RoundEnded(RoundOutcome::Lost(LossSummary {
            word: self.secret_word(),
            hint: self.hint.clone(),
            wrong_count: self.wrong_count,
            score: self.score,
        }));
        self.finish_round(ended, false)
    }

    /// Persists the result; the outcome is reported even when that fails.
    fn finish_round(&mut self, ended: GameEvent, won: bool) -> Vec<GameEvent> {
        let mut events = vec![ended];
        if let Err(e) = self.record_result(won) {
            tracing::error!(error = %e, won, score = self.score, "could not save round result");
            events.push(GameEvent::ScoreNotSaved {
                reason: e.to_string(),
            });
        }
        events
    }

    fn record_result(&mut self, won: bool) -> Result<()> {
        if let Some(category) = &self.category {
            self.scores.record_result(category, self.score, won)?;
        }
        Ok(())
    }

    /// Clears every category's stats if `confirm` agrees.
    pub fn reset_all_scores<F>(&mut self, confirm: F) -> Result<Vec<GameEvent>>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm("Reset all scores?") {
            return Ok(Vec::new());
        }
        self.scores.clear()?;
        tracing::info!("all scores reset");
        Ok(vec![GameEvent::ScoresReset])
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn source(&self) -> &dyn WordSource {
        self.source.as_ref()
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn secret_word(&self) -> String {
        self.secret_word.iter().collect()
    }

    pub fn revealed(&self) -> &[Option<char>] {
        &self.revealed
    }

    /// Revealed letters with placeholders, e.g. `G _ T _`.
    pub fn revealed_word(&self) -> String {
        let letters: Vec<String> = self
            .revealed
            .iter()
            .map(|c| c.unwrap_or(PLACEHOLDER).to_string())
            .collect();
        letters.join(" ")
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    pub fn key_state(&self, letter: char) -> KeyState {
        match normalize_letter(letter) {
            Some(l) if self.guessed_letters.contains(&l) => {
                if self.secret_word.contains(&l) {
                    KeyState::Correct
                } else {
                    KeyState::Incorrect
                }
            }
            _ => KeyState::Unused,
        }
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn attempts_left(&self) -> u32 {
        self.scoring.max_wrong_guesses.saturating_sub(self.wrong_count)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn hint_revealed(&self) -> bool {
        self.hint_revealed
    }

    /// The hint, once it has been paid for.
    pub fn hint(&self) -> Option<&str> {
        self.hint_revealed.then_some(self.hint.as_str())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_board(&self) -> Result<ScoreBoard> {
        Ok(self.scores.load()?)
    }
}

fn normalize_letter(c: char) -> Option<char> {
    if !c.is_alphabetic() {
        return None;
    }
    c.to_uppercase().next()
}
