use ratatui::Frame;

use crate::app::{App, AppState};
use crate::ui::{category_stats::render_category_stats, render_category_picker};

/// A UI Screen boundary: responsible for rendering one [`AppState`]
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Category picker shown before the first round and on Tab
pub struct ChooseCategoryScreen;

impl Screen for ChooseCategoryScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let area = f.area();
        render_category_picker(app, area, f.buffer_mut());
    }
}

/// Board, keyboard and gallows; the result and reset popups draw on top of it
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_category_stats(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::ChooseCategory => Box::new(ChooseCategoryScreen),
        AppState::Playing | AppState::Result | AppState::ConfirmReset => Box::new(GameScreen),
        AppState::Stats => Box::new(StatsScreen),
    }
}
