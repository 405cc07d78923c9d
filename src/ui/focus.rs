// Focus management for the dashboard tiles

use crate::ui::constants::{MEMO_TITLE, NEWS_TITLE, QUOTE_TITLE, TIMER_TITLE};

/// Interactive tiles in Tab order. The clock/weather tile takes no input.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    #[default]
    Timer,
    News,
    Memo,
    Quote,
}

impl PanelFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Timer => Self::News,
            Self::News => Self::Memo,
            Self::Memo => Self::Quote,
            Self::Quote => Self::Timer,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Timer => Self::Quote,
            Self::News => Self::Timer,
            Self::Memo => Self::News,
            Self::Quote => Self::Memo,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Timer => TIMER_TITLE,
            Self::News => NEWS_TITLE,
            Self::Memo => MEMO_TITLE,
            Self::Quote => QUOTE_TITLE,
        }
    }

    /// Tiles that own a text input line.
    pub fn accepts_text(self) -> bool {
        matches!(self, Self::News | Self::Memo)
    }
}
