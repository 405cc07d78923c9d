// Large block-digit readout for the timer tile

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

pub const GLYPH_HEIGHT: u16 = 5;

const DIGITS: [[&str; 5]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    ["██ ", " █ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

const COLON: [&str; 5] = [" ", "█", " ", "█", " "];

fn glyph(c: char) -> Option<&'static [&'static str; 5]> {
    match c {
        ':' => Some(&COLON),
        _ => c.to_digit(10).map(|d| &DIGITS[d as usize]),
    }
}

/// Renders text made of digits and colons in a 5-row block font, centered.
/// Falls back to a single bold line when the area is too small.
pub struct BigClock<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> BigClock<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Columns needed for the block font, one blank column between glyphs.
    pub fn required_width(text: &str) -> u16 {
        let glyph_widths: u16 = text
            .chars()
            .filter_map(glyph)
            .map(|g| g[0].chars().count() as u16)
            .sum();
        let count = text.chars().filter(|&c| glyph(c).is_some()).count() as u16;
        glyph_widths + count.saturating_sub(1)
    }
}

impl Widget for BigClock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = Self::required_width(self.text);
        if area.height < GLYPH_HEIGHT || area.width < width {
            let text_width = self.text.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(text_width) / 2;
            let y = area.y + area.height / 2;
            buf.set_stringn(
                x,
                y,
                self.text,
                area.width as usize,
                self.style.add_modifier(Modifier::BOLD),
            );
            return;
        }

        let left = area.x + (area.width - width) / 2;
        let top = area.y + (area.height - GLYPH_HEIGHT) / 2;

        let mut x = left;
        for c in self.text.chars() {
            let Some(rows) = glyph(c) else {
                continue;
            };
            for (row, line) in rows.iter().enumerate() {
                buf.set_string(x, top + row as u16, *line, self.style);
            }
            x += rows[0].chars().count() as u16 + 1;
        }
    }
}
