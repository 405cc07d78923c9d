// Key binding overlay

use crate::ui::constants::{HELP_TITLE, KEY_BINDINGS};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Row, Table},
};

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let area = frame.area();

        let modal_width = 64.min(area.width.saturating_sub(4));
        let modal_height = (KEY_BINDINGS.len() as u16 + 4).min(area.height.saturating_sub(2));

        let modal_area = Rect {
            x: (area.width.saturating_sub(modal_width)) / 2,
            y: (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", HELP_TITLE))
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(" Esc / ? to close ").alignment(Alignment::Center))
            .style(Style::default().bg(Color::Black));

        let rows = KEY_BINDINGS.iter().map(|(scope, keys, action)| {
            Row::new(vec![
                Cell::from(*scope).style(Style::default().fg(Color::DarkGray)),
                Cell::from(*keys).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(*action),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Length(16),
                Constraint::Min(10),
            ],
        )
        .block(block)
        .style(Style::default().fg(Color::White));

        frame.render_widget(table, modal_area);
    }
}
