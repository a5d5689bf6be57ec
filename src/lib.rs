// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app;
pub mod app_dirs;
pub mod calculator;
pub mod categories;
pub mod config;
pub mod forms;
pub mod game;
pub mod runtime;
pub mod scoring;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod util;

pub use app::{App, AppState, Flow};
pub use game::{GameEvent, GameSession, RoundOutcome};

/// Interval between idle redraws of the terminal UI.
pub const TICK_RATE_MS: u64 = 100;
