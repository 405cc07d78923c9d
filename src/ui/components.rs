// Reusable UI components

use crate::ui::focus::PanelFocus;
use crate::ui::state::InputMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub struct Footer {
    content: Line<'static>,
}

impl Footer {
    /// Hints for the focused tile followed by the global keys.
    pub fn dashboard(focus: PanelFocus, input_mode: InputMode) -> Self {
        let controls: &[(&'static str, &'static str)] = if input_mode == InputMode::Editing {
            &[("[Enter]", " Submit"), ("[Esc]", " Cancel"), ("[⌫]", " Delete")]
        } else {
            match focus {
                PanelFocus::Timer => &[
                    ("[Space]", " Start/Pause"),
                    ("[R]", "eset"),
                    ("[F]", "ocus"),
                    ("[B]", "reak"),
                ],
                PanelFocus::News => &[
                    ("[/]", " Search"),
                    ("[R]", "efresh"),
                    ("[S]", "huffle"),
                ],
                PanelFocus::Memo => &[
                    ("[A]", "dd"),
                    ("[↑/↓]", " Select"),
                    ("[D]", "elete"),
                ],
                PanelFocus::Quote => &[("[Enter]", " Next quote")],
            }
        };

        let mut spans = vec![Span::styled(
            format!(" {}  |  ", focus.title()),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        push_controls(&mut spans, controls);

        if input_mode == InputMode::Normal {
            spans.push(Span::raw("  |  "));
            push_controls(
                &mut spans,
                &[
                    ("[Tab]", " Focus"),
                    ("[W]", "eather"),
                    ("[?]", " Help"),
                    ("[Q]", "uit"),
                ],
            );
        }

        Self {
            content: Line::from(spans),
        }
    }
}

fn push_controls(spans: &mut Vec<Span<'static>>, controls: &[(&'static str, &'static str)]) {
    for (i, (hotkey, desc)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*hotkey, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(*desc));
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.content)
            .style(Style::default().bg(Color::DarkGray))
            .render(area, buf);
    }
}

/// Bordered tile frame; the focused tile gets a thick yellow border.
pub fn tile_block(title: &str, focused: bool) -> Block<'_> {
    let (border_type, color) = if focused {
        (BorderType::Thick, Color::Yellow)
    } else {
        (BorderType::Rounded, Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

/// One-line text input with a block cursor, or a dimmed placeholder.
pub fn input_line<'a>(prompt: &'a str, value: &'a str, editing: bool, placeholder: &'a str) -> Line<'a> {
    if editing {
        Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::Yellow)),
            Span::raw(value),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if value.is_empty() {
        Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::DarkGray)),
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::Cyan)),
        ])
    }
}
