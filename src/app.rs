use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{self, GameEvent, GameSession, RoundOutcome};
use crate::stats::ScoreBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    ChooseCategory,
    Playing,
    Result,
    Stats,
    ConfirmReset,
}

/// Whether the event loop keeps running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Category,
    TotalPoints,
    WinRate,
    Average,
}

#[derive(Debug)]
pub struct StatsViewState {
    pub scroll_offset: usize,
    pub sort_by: SortBy,
    pub sort_ascending: bool,
}

impl Default for StatsViewState {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            sort_by: SortBy::Category,
            sort_ascending: true,
        }
    }
}

/// Host of one [`GameSession`]: routes keys to it and keeps what the
/// screens need between frames.
#[derive(Debug)]
pub struct App {
    pub game: GameSession,
    pub state: AppState,
    return_state: AppState,
    pub category_cursor: usize,
    pub last_outcome: Option<RoundOutcome>,
    pub status: Option<String>,
    pub board: ScoreBoard,
    pub stats_view: StatsViewState,
}

impl App {
    pub fn new(game: GameSession, default_category: Option<&str>) -> Self {
        let board = game.score_board().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load scores");
            ScoreBoard::default()
        });
        let mut app = Self {
            game,
            state: AppState::ChooseCategory,
            return_state: AppState::ChooseCategory,
            category_cursor: 0,
            last_outcome: None,
            status: None,
            board,
            stats_view: StatsViewState::default(),
        };

        if let Some(name) = default_category {
            let result = app.game.select_category(name);
            app.apply(result);
        }
        app
    }

    pub fn category_names(&self) -> Vec<String> {
        self.game
            .source()
            .all_categories()
            .into_iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Folds the outcome of a game operation into the view state.
    fn apply(&mut self, result: game::Result<Vec<GameEvent>>) {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "game operation failed");
                self.status = Some(e.to_string());
                return;
            }
        };

        for event in events {
            match event {
                GameEvent::RoundStarted { category, .. } => {
                    self.state = AppState::Playing;
                    self.last_outcome = None;
                    self.status = Some(format!("New word from {category}"));
                }
                GameEvent::LetterRevealed { letter, points, .. } => {
                    self.status = Some(format!("{letter} is in the word, +{points}"));
                }
                GameEvent::LetterMissed { letter, .. } => {
                    self.status = Some(format!("No {letter} in the word"));
                }
                GameEvent::HangmanPart(part) => {
                    tracing::debug!(%part, "drawing hangman part");
                }
                GameEvent::HintShown { .. } => {
                    self.status = Some(format!(
                        "Hint revealed, -{} points",
                        self.game.scoring().hint_penalty
                    ));
                }
                GameEvent::RoundEnded(outcome) => {
                    self.status = None;
                    self.last_outcome = Some(outcome);
                    self.state = AppState::Result;
                }
                GameEvent::ScoreNotSaved { reason } => {
                    self.status = Some(format!("Score not saved: {reason}"));
                }
                GameEvent::ScoresReset => {
                    self.status = Some("All scores were reset".to_string());
                }
            }
        }
        self.refresh_board();
    }

    fn refresh_board(&mut self) {
        match self.game.score_board() {
            Ok(board) => self.board = board,
            Err(e) => {
                tracing::warn!(error = %e, "could not reload scores");
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.state {
            AppState::ChooseCategory => self.on_choose_category_key(key),
            AppState::Playing | AppState::Result => self.on_game_key(key, ctrl),
            AppState::Stats => self.on_stats_key(key),
            AppState::ConfirmReset => self.on_confirm_key(key),
        }
    }

    fn on_choose_category_key(&mut self, key: KeyEvent) -> Flow {
        let count = self.category_names().len();
        match key.code {
            KeyCode::Esc => {
                if self.game.category().is_some() {
                    self.state = AppState::Playing;
                } else {
                    return Flow::Quit;
                }
            }
            KeyCode::Up => self.category_cursor = self.category_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.category_cursor + 1 < count {
                    self.category_cursor += 1;
                }
            }
            KeyCode::Enter => self.select_at(self.category_cursor),
            KeyCode::Char(c) => {
                if let Some(d) = c.to_digit(10).filter(|d| *d > 0) {
                    self.select_at(d as usize - 1);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn select_at(&mut self, index: usize) {
        if let Some(name) = self.category_names().get(index) {
            self.category_cursor = index;
            let result = self.game.select_category(name);
            self.apply(result);
        }
    }

    fn on_game_key(&mut self, key: KeyEvent, ctrl: bool) -> Flow {
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab => self.state = AppState::ChooseCategory,
            KeyCode::Char('n') if ctrl => self.new_round(),
            KeyCode::Char('s') if ctrl => self.open(AppState::Stats),
            KeyCode::Char('r') if ctrl => self.open(AppState::ConfirmReset),
            KeyCode::Enter | KeyCode::Char(' ') if self.state == AppState::Result => {
                self.state = AppState::Playing;
            }
            KeyCode::Enter if !self.game.is_active() => self.new_round(),
            KeyCode::Char('?') if self.state == AppState::Playing => {
                let events = self.game.show_hint();
                self.apply(Ok(events));
            }
            KeyCode::Char(c) if !ctrl && self.state == AppState::Playing => {
                let result = self.game.guess_letter(c);
                self.apply(result);
            }
            _ => {}
        }
        Flow::Continue
    }

    fn new_round(&mut self) {
        let result = self.game.start_new_round();
        if result.is_err() {
            self.state = AppState::ChooseCategory;
        }
        self.apply(result);
    }

    fn open(&mut self, state: AppState) {
        if !matches!(self.state, AppState::Stats | AppState::ConfirmReset) {
            self.return_state = self.state;
        }
        self.state = state;
    }

    fn close_overlay(&mut self) {
        self.state = self.return_state;
    }

    fn on_stats_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.close_overlay(),
            KeyCode::Up => {
                self.stats_view.scroll_offset = self.stats_view.scroll_offset.saturating_sub(1)
            }
            // clamped against the table height while rendering
            KeyCode::Down => self.stats_view.scroll_offset += 1,
            KeyCode::Home => self.stats_view.scroll_offset = 0,
            KeyCode::Char(' ') => {
                self.stats_view.sort_ascending = !self.stats_view.sort_ascending;
                self.stats_view.scroll_offset = 0;
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.stats_view.sort_by = match c {
                    '1' => SortBy::Category,
                    '2' => SortBy::TotalPoints,
                    '3' => SortBy::WinRate,
                    _ => SortBy::Average,
                };
                self.stats_view.scroll_offset = 0;
            }
            KeyCode::Char('r') => self.open(AppState::ConfirmReset),
            _ => {}
        }
        Flow::Continue
    }

    fn on_confirm_key(&mut self, key: KeyEvent) -> Flow {
        let answer = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return Flow::Continue,
        };
        let result = self.game.reset_all_scores(|_| answer);
        self.close_overlay();
        self.apply(result);
        Flow::Continue
    }
}
