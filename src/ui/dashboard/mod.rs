// Dashboard screen implementation

use crate::engine::{NewsStatus, TimerMode, WeatherStatus, format_clock};
use crate::ui::HelpOverlay;
use crate::ui::components::{Footer, input_line, tile_block};
use crate::ui::constants::*;
use crate::ui::focus::PanelFocus;
use crate::ui::state::{AppState, InputMode};
use crate::ui::widgets::{BarState, BigClock, TimerBar};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};
use tui_piechart::{PieChart, PieSlice};

mod sections;

pub struct Dashboard;

impl Dashboard {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(62), // Timer, news, memo
                Constraint::Min(8),         // Clock/weather, quote
                Constraint::Length(1),      // Footer
            ])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
            .split(rows[1]);

        Self::render_timer(frame, top[0], state);
        Self::render_news(frame, top[1], state);
        Self::render_memo(frame, top[2], state);
        Self::render_clock_weather(frame, bottom[0], state);
        Self::render_quote(frame, bottom[1], state);

        Footer::dashboard(state.focus, state.input_mode).render(rows[2], frame.buffer_mut());

        if state.show_help {
            HelpOverlay::render(frame);
        }
    }

    fn is_editing(state: &AppState, tile: PanelFocus) -> bool {
        state.focus == tile && state.input_mode == InputMode::Editing
    }
}
