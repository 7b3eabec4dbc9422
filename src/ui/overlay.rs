use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Palette;
use crate::game::GameOverCause;

/// Draws the game-over notice as a centered popup over the field.
pub fn render_game_over_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    cause: Option<GameOverCause>,
    palette: Palette,
) {
    let popup = centered_popup(area, 90, 60);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(palette.game_over_text)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(cause_text(cause)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(palette.game_over_text))),
        popup,
    );
}

fn cause_text(cause: Option<GameOverCause>) -> &'static str {
    match cause {
        Some(GameOverCause::Boundary) => "hit wall",
        Some(GameOverCause::NoFreeCell) => "board full",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
