// Countdown progress bar with per-mode colors

use crate::engine::TimerMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarState {
    Running(TimerMode),
    Paused(TimerMode),
}

impl BarState {
    pub fn new(mode: TimerMode, running: bool) -> Self {
        if running {
            Self::Running(mode)
        } else {
            Self::Paused(mode)
        }
    }
}

pub struct TimerBar {
    ratio: f64,
    state: BarState,
}

impl TimerBar {
    pub fn new(ratio: f64, state: BarState) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            state,
        }
    }
}

impl Widget for TimerBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let filled_width = (area.width as f64 * self.ratio).round() as u16;

        let (filled_symbol, unfilled_symbol, filled_fg) = match self.state {
            BarState::Running(TimerMode::Focus) => ("█", "░", Color::LightRed),
            BarState::Running(TimerMode::Break) => ("█", "░", Color::LightGreen),
            BarState::Paused(_) => ("▓", "░", Color::Gray),
        };

        for x in 0..area.width {
            let (symbol, fg) = if x < filled_width {
                (filled_symbol, filled_fg)
            } else {
                (unfilled_symbol, Color::DarkGray)
            };
            buf.set_string(area.x + x, area.y, symbol, Style::default().fg(fg));
        }
    }
}
