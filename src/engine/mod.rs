// Dashboard engines - independent of UI

pub mod memo;
pub mod news;
pub mod provider;
pub mod quote;
pub mod timer;
pub mod weather;
pub mod worker;

pub use memo::{MAX_MEMO_CHARS, Memo, MemoBoard};
pub use news::{NEWS_DISPLAY_COUNT, NewsPanel, NewsRecord, NewsResponse, NewsStatus};
pub use provider::{
    GeminiNewsProvider, Locator, NewsProvider, OfflineProvider, OpenMeteoProvider, ProviderError,
    WeatherProvider,
};
pub use quote::{QuoteTile, ZEN_QUOTES, ZenQuote};
pub use timer::{FocusTimer, TickReport, TimerDurations, TimerMode, TimerState, format_clock};
pub use weather::{Condition, Coordinates, Place, WeatherPanel, WeatherReading, WeatherStatus};
pub use worker::{ProviderMessage, ProviderPool, RequestSeq, RequestSequencer};
