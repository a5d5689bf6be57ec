pub mod category_stats;
pub mod gallows;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::game::{KeyState, RoundOutcome};
use crate::util::group_thousands;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Draws the current screen for `app`.
pub fn ui(app: &mut App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn key_style(state: KeyState) -> Style {
    match state {
        KeyState::Unused => bold(),
        KeyState::Correct => bold().fg(Color::Green),
        KeyState::Incorrect => Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game = &self.game;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // category and scores
                Constraint::Length(1), // padding
                Constraint::Min(9),    // gallows and word
                Constraint::Length(3), // keyboard
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        let (icon, name) = game
            .category()
            .and_then(|c| game.source().category_info(c))
            .map_or((String::new(), "-".to_string()), |c| {
                (c.icon.clone(), c.name.clone())
            });
        let category_points = game.category().map_or(0, |c| self.board.category_points(c));

        let header = Line::from(vec![
            Span::styled(format!("{icon} {name}"), bold().fg(Color::Cyan)),
            Span::raw("   attempts left: "),
            Span::styled(game.attempts_left().to_string(), bold()),
            Span::raw("   category score: "),
            Span::styled(group_thousands(category_points), bold()),
            Span::raw("   total score: "),
            Span::styled(group_thousands(self.board.total_points()), bold()),
        ]);
        Paragraph::new(header)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(14), Constraint::Min(10)])
            .split(chunks[2]);

        let gallows: Vec<Line> = gallows::gallows_lines(game.wrong_count())
            .into_iter()
            .map(|l| Line::from(Span::styled(l, bold())))
            .collect();
        Paragraph::new(gallows).render(body[0], buf);

        let word_style = match &self.last_outcome {
            Some(RoundOutcome::Won(_)) => bold().fg(Color::Green),
            Some(RoundOutcome::Lost(_)) => bold().fg(Color::Red),
            None => bold(),
        };

        let mut lines = vec![
            Line::default(),
            Line::from(Span::styled(game.revealed_word(), word_style)),
            Line::default(),
        ];
        match game.hint() {
            Some(hint) => lines.push(Line::from(Span::styled(
                format!("hint: {hint}"),
                Style::default().fg(Color::Yellow),
            ))),
            None if game.is_active() => lines.push(Line::from(Span::styled(
                format!("(?) hint costs {} points", game.scoring().hint_penalty),
                Style::default().add_modifier(Modifier::DIM),
            ))),
            None => lines.push(Line::default()),
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            game.score().to_string() + " points this round",
            Style::default().fg(Color::Magenta),
        )));
        if let Some(status) = &self.status {
            lines.push(Line::from(Span::styled(
                status.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(body[1], buf);

        let keyboard: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars()
                    .map(|c| Span::styled(format!(" {c} "), key_style(game.key_state(c))))
                    .collect();
                Line::from(spans)
            })
            .collect();
        Paragraph::new(keyboard)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let legend = if game.is_active() {
            "(a-z) guess  (?) hint  (ctrl+n) new word  (tab) categories  (ctrl+s) stats  (ctrl+r) reset  (esc) quit"
        } else {
            "(enter) next word  (tab) categories  (ctrl+s) stats  (ctrl+r) reset  (esc) quit"
        };
        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[5], buf);

        if self.state == AppState::Result {
            if let Some(outcome) = &self.last_outcome {
                render_result_modal(outcome, area, buf);
            }
        }
        if self.state == AppState::ConfirmReset {
            render_confirm_reset(area, buf);
        }
    }
}

/// Outcome popup with the label/value table of the finished round
fn render_result_modal(outcome: &RoundOutcome, area: Rect, buf: &mut Buffer) {
    let rows = outcome.stat_rows();
    let popup = centered_rect(52, rows.len() as u16 + 7, area);
    Clear.render(popup, buf);

    let color = if outcome.is_win() {
        Color::Green
    } else {
        Color::Red
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(outcome.title())
        .border_style(Style::default().fg(color));
    let inner = block.inner(popup);
    block.render(popup, buf);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    Paragraph::new(Span::styled(outcome.message(), bold()))
        .alignment(Alignment::Center)
        .render(parts[0], buf);

    let table_rows: Vec<Row> = rows
        .into_iter()
        .map(|(label, value)| {
            Row::new(vec![
                Cell::from(format!("{label}:")),
                Cell::from(value).style(bold()),
            ])
        })
        .collect();
    Table::new(table_rows, [Constraint::Length(26), Constraint::Min(8)]).render(parts[1], buf);

    Paragraph::new(Span::styled(
        "(enter) continue",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(parts[2], buf);
}

fn render_confirm_reset(area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(44, 5, area);
    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(Span::styled(
            "Reset the scores of every category?",
            bold(),
        )),
        Line::from("(y) yes   (n) no"),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Reset scores")
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .render(popup, buf);
}

/// Category picker listing every category with its icon
pub fn render_category_picker(app: &App, area: Rect, buf: &mut Buffer) {
    let categories = app.game.source().all_categories();
    let label_width = categories
        .iter()
        .map(|c| c.label().width())
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        Line::from(Span::styled("Choose a category", bold().fg(Color::Cyan))),
        Line::default(),
    ];
    for (i, category) in categories.iter().enumerate() {
        let label = category.label();
        let padding = " ".repeat(label_width.saturating_sub(label.width()));
        let points = app.board.category_points(&category.name);
        let text = format!("{}. {label}{padding}  {points:>6} pts", i + 1);
        let style = if i == app.category_cursor {
            bold().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines.push(Line::default());
    lines.push(Line::from(format!(
        "total score: {}",
        group_thousands(app.board.total_points())
    )));
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(↑/↓) move  (enter/1-9) play  (esc) back",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect((label_width as u16 + 24).max(44), height, area);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Hangman"))
        .render(popup, buf);
}
