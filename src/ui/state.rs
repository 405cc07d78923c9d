// Application state management

use crate::clock::Clock;
use crate::config::Config;
use crate::engine::{
    FocusTimer, MemoBoard, NewsPanel, Place, ProviderMessage, ProviderPool, QuoteTile,
    TickReport, TimerDurations, WeatherPanel, WeatherStatus,
};
use crate::store::KvStore;
use crate::ui::focus::PanelFocus;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::widgets::ListState;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,  // Normal navigation mode - global shortcuts active
    Editing, // Text editing mode - character input active, global shortcuts inactive
}

/// Dashboard settings taken from the config file.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub durations: TimerDurations,
    pub default_query: String,
    pub bell: bool,
    pub weather_refresh_ms: i64,
}

impl DashboardOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            durations: config.durations(),
            default_query: config.news.default_query.clone(),
            bell: config.timer.bell,
            weather_refresh_ms: config.weather.refresh_minutes as i64 * 60 * 1000,
        }
    }
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct AppState {
    pub focus: PanelFocus,
    pub input_mode: InputMode,
    pub show_help: bool,

    pub timer: FocusTimer,
    pub memos: MemoBoard,
    pub memo_list: ListState,
    pub memo_input: String,
    pub news: NewsPanel,
    pub query_input: String,
    pub weather: WeatherPanel,
    pub quote: QuoteTile,

    pub providers: ProviderPool,
    pub clock: Rc<dyn Clock>,
    pub rng: StdRng,

    bell_enabled: bool,
    bell_pending: bool,
    weather_refresh_ms: i64,
    last_weather_request: Option<i64>,

    // Idle-frame tracking for tick_needs_repaint
    painted_minute: Option<i64>,
    was_fading: bool,
    repaint_pending: bool,
}

impl AppState {
    pub fn new(
        store: Rc<dyn KvStore>,
        clock: Rc<dyn Clock>,
        providers: ProviderPool,
        options: DashboardOptions,
    ) -> Self {
        let mut rng = StdRng::from_entropy();
        let timer = FocusTimer::load(Rc::clone(&store), Rc::clone(&clock), options.durations);
        let memos = MemoBoard::load(store, Rc::clone(&clock));
        let quote = QuoteTile::new(&mut rng);

        let mut memo_list = ListState::default();
        if !memos.is_empty() {
            memo_list.select(Some(0));
        }

        Self {
            focus: PanelFocus::default(),
            input_mode: InputMode::Normal,
            show_help: false,
            timer,
            memos,
            memo_list,
            memo_input: String::new(),
            news: NewsPanel::new(options.default_query),
            query_input: String::new(),
            weather: WeatherPanel::new(),
            quote,
            providers,
            clock,
            rng,
            bell_enabled: options.bell,
            bell_pending: false,
            weather_refresh_ms: options.weather_refresh_ms.max(60_000),
            last_weather_request: None,
            painted_minute: None,
            was_fading: false,
            repaint_pending: false,
        }
    }

    /// Replace the entropy-seeded generator, for reproducible runs.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Kick off the first location lookup and news search.
    pub fn start(&mut self) {
        self.providers.spawn_locate();
        self.refresh_news();
    }

    pub fn search_news(&mut self, query: &str) -> bool {
        match self.news.search(query) {
            Some((seq, query)) => {
                self.providers.spawn_news(seq, query);
                true
            }
            None => false,
        }
    }

    pub fn refresh_news(&mut self) {
        let (seq, query) = self.news.refresh();
        self.providers.spawn_news(seq, query);
    }

    pub fn refresh_weather(&mut self) {
        let (seq, place) = self.weather.refresh();
        self.dispatch_weather(seq, place);
    }

    fn fetch_weather_for(&mut self, place: Place) {
        let (seq, place) = self.weather.begin(place);
        self.dispatch_weather(seq, place);
    }

    fn dispatch_weather(&mut self, seq: crate::engine::RequestSeq, place: Place) {
        self.last_weather_request = Some(self.now_ms());
        self.repaint_pending = true;
        self.providers.spawn_weather(seq, place);
    }

    pub fn handle_provider_message(&mut self, message: ProviderMessage) {
        match message {
            ProviderMessage::Located { place } => self.fetch_weather_for(place),
            ProviderMessage::News { seq, result } => {
                self.news.complete(seq, result);
            }
            ProviderMessage::Weather { seq, result } => {
                self.weather.complete(seq, result);
            }
        }
    }

    /// Apply finished fetches without blocking. Returns how many were handled.
    pub fn drain_provider_messages(&mut self, limit: usize) -> usize {
        let mut handled = 0;
        while handled < limit {
            match self.providers.receiver().try_recv() {
                Ok(message) => {
                    self.handle_provider_message(message);
                    handled += 1;
                }
                Err(_) => break,
            }
        }
        handled
    }

    /// Periodic refresh: advances the timer and schedules the weather refresh.
    pub fn on_tick(&mut self) -> TickReport {
        let report = self.timer.tick();
        if report.completed.is_some() && self.bell_enabled {
            self.bell_pending = true;
        }

        let weather_due = self
            .last_weather_request
            .is_some_and(|last| self.now_ms() - last >= self.weather_refresh_ms);
        if weather_due && self.weather.status() != &WeatherStatus::Locating {
            tracing::debug!("periodic weather refresh");
            self.refresh_weather();
        }

        report
    }

    /// Whether a tick changed anything on screen. A paused timer with no
    /// fade in progress only needs a frame when the wall clock's minute rolls.
    pub fn tick_needs_repaint(&mut self, report: &TickReport) -> bool {
        let now = self.now_ms();
        let minute = now.div_euclid(60_000);
        let fading = self.quote.is_fading(now);

        let pending = std::mem::take(&mut self.repaint_pending);
        let dirty = pending
            || report.reschedule
            || report.completed.is_some()
            || fading
            || self.was_fading
            || self.painted_minute != Some(minute);

        self.painted_minute = Some(minute);
        self.was_fading = fading;
        dirty
    }

    /// Whether a finished block still needs its bell rung. Clears the flag.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    pub fn selected_memo(&self) -> Option<usize> {
        self.memo_list
            .selected()
            .filter(|&i| i < self.memos.len())
    }

    /// Keep the memo selection inside the list after it changes size.
    pub fn clamp_memo_selection(&mut self) {
        let len = self.memos.len();
        let selected = match (len, self.memo_list.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.memo_list.select(selected);
    }
}
