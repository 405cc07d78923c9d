#![allow(dead_code)] // Not every test binary module uses every helper

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use zendash::clock::{Clock, ManualClock};
use zendash::engine::news::GroundingRecord;
use zendash::engine::provider::FixedLocator;
use zendash::engine::weather::WeatherObservation;
use zendash::engine::{
    Coordinates, NewsProvider, NewsResponse, OfflineProvider, Place, ProviderError,
    ProviderPool, WeatherProvider,
};
use zendash::store::{KvStore, MemoryStore};
use zendash::ui::{AppState, DashboardOptions};

/// 2024-03-01T09:00:00Z
pub const START_MS: i64 = 1_709_283_600_000;

/// News provider that answers every query with the same listing.
pub struct CannedNews {
    pub text: String,
    pub grounding: Vec<GroundingRecord>,
}

impl CannedNews {
    pub fn listing(lines: &[&str]) -> Self {
        Self {
            text: lines.join("\n"),
            grounding: Vec::new(),
        }
    }
}

impl NewsProvider for CannedNews {
    fn search_news(&self, _query: &str) -> Result<NewsResponse, ProviderError> {
        Ok(NewsResponse {
            text: self.text.clone(),
            grounding: self.grounding.clone(),
        })
    }
}

/// Weather provider that always reports the same observation.
pub struct CannedWeather(pub WeatherObservation);

impl WeatherProvider for CannedWeather {
    fn current_weather(&self, _at: Coordinates) -> Result<WeatherObservation, ProviderError> {
        Ok(self.0)
    }
}

pub fn home() -> Place {
    Place {
        name: "Kyoto".to_string(),
        coordinates: Coordinates {
            latitude: 35.01,
            longitude: 135.77,
        },
    }
}

pub fn offline_pool() -> ProviderPool {
    ProviderPool::new(
        Arc::new(OfflineProvider),
        Arc::new(OfflineProvider),
        Arc::new(OfflineProvider),
    )
}

pub fn canned_pool(news: CannedNews, weather: WeatherObservation) -> ProviderPool {
    ProviderPool::new(
        Arc::new(news),
        Arc::new(CannedWeather(weather)),
        Arc::new(FixedLocator::new(home())),
    )
}

/// Build a dashboard state over an in-memory store and a manual clock.
pub fn build_state(pool: ProviderPool) -> (AppState, ManualClock, Rc<MemoryStore>) {
    let clock = ManualClock::new(START_MS);
    let store = Rc::new(MemoryStore::new());
    let state = build_state_with(Rc::clone(&store) as Rc<dyn KvStore>, clock.clone(), pool);
    (state, clock, store)
}

pub fn build_state_with(store: Rc<dyn KvStore>, clock: ManualClock, pool: ProviderPool) -> AppState {
    let clock: Rc<dyn Clock> = Rc::new(clock);
    AppState::new(store, clock, pool, DashboardOptions::default()).with_rng(StdRng::seed_from_u64(7))
}

/// Pump provider results into the state until `done` holds or two seconds pass.
pub fn pump_until(state: &mut AppState, mut done: impl FnMut(&AppState) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        state.drain_provider_messages(16);
        if done(state) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}
