use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, SortBy, StatsViewState};
use crate::stats::StatsRow;
use crate::util::group_thousands;

/// Rows ordered by the current sort column and direction.
pub fn sorted_rows(mut rows: Vec<StatsRow>, view: &StatsViewState) -> Vec<StatsRow> {
    rows.sort_by(|a, b| {
        let cmp = match view.sort_by {
            SortBy::Category => a.category.cmp(&b.category),
            SortBy::TotalPoints => a.stats.total_points.cmp(&b.stats.total_points),
            SortBy::WinRate => a.stats.win_rate().cmp(&b.stats.win_rate()),
            SortBy::Average => a.stats.average_score.cmp(&b.stats.average_score),
        }
        .then_with(|| a.category.cmp(&b.category));
        if view.sort_ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
    rows
}

/// Pure presenter for a single category row
pub fn present_row(row: &StatsRow) -> Row<'static> {
    let s = &row.stats;
    let rate = s.win_rate();
    let rate_color = match (s.games_played, rate) {
        (0, _) => Color::Gray,
        (_, r) if r >= 70 => Color::Green,
        (_, r) if r >= 40 => Color::Yellow,
        _ => Color::Red,
    };

    Row::new(vec![
        Cell::from(format!("{} {}", row.icon, row.category))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(group_thousands(s.total_points)),
        Cell::from(s.games_played.to_string()),
        Cell::from(s.games_won.to_string()),
        Cell::from(format!("{rate}%")).style(Style::default().fg(rate_color)),
        Cell::from(s.average_score.to_string()),
    ])
}

fn indicator(view: &StatsViewState, column: SortBy) -> &'static str {
    match (view.sort_by == column, view.sort_ascending) {
        (false, _) => "",
        (true, true) => "↑",
        (true, false) => "↓",
    }
}

/// Render the per-category statistics screen
pub fn render_category_stats(app: &mut App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Stats table
            Constraint::Length(2), // Instructions
        ])
        .split(f.area());

    let title = Paragraph::new(format!(
        "Total score: {}",
        group_thousands(app.board.total_points())
    ))
    .block(Block::default().borders(Borders::ALL).title("Statistics"))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let rows = sorted_rows(app.board.rows(app.game.source()), &app.stats_view);

    if rows.is_empty() {
        let no_data = Paragraph::new("No categories available.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(no_data, chunks[1]);
    } else {
        let table_height = chunks[1].height.saturating_sub(3) as usize; // borders + header
        let max_scroll = rows.len().saturating_sub(table_height);
        if app.stats_view.scroll_offset > max_scroll {
            app.stats_view.scroll_offset = max_scroll;
        }

        let view = &app.stats_view;
        let header = Row::new(vec![
            Cell::from(format!("Category {}", indicator(view, SortBy::Category))),
            Cell::from(format!("Points {}", indicator(view, SortBy::TotalPoints))),
            Cell::from("Played"),
            Cell::from("Won"),
            Cell::from(format!("Win rate {}", indicator(view, SortBy::WinRate))),
            Cell::from(format!("Average {}", indicator(view, SortBy::Average))),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let visible: Vec<Row> = rows
            .iter()
            .skip(view.scroll_offset)
            .take(table_height)
            .map(present_row)
            .collect();

        let widths = [
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(11),
            Constraint::Length(10),
        ];

        let table = Table::new(visible, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Per category"))
            .column_spacing(2);
        f.render_widget(table, chunks[1]);
    }

    let instructions =
        Paragraph::new("(↑/↓) scroll  (1-4) sort  (space) direction  (r) reset scores  (b/esc) back")
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
    f.render_widget(instructions, chunks[2]);
}
