// Background fetches for the news and weather tiles

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use super::news::NewsResponse;
use super::provider::{Locator, NewsProvider, ProviderError, WeatherProvider, resolve_place};
use super::weather::{Place, WeatherObservation};

/// Monotonic id attached to each outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(pub u64);

/// Hands out request ids and remembers the newest one, so late answers to
/// superseded requests can be recognised and dropped.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestSeq {
        self.latest += 1;
        RequestSeq(self.latest)
    }

    pub fn is_current(&self, seq: RequestSeq) -> bool {
        seq.0 == self.latest
    }

    pub fn latest(&self) -> Option<RequestSeq> {
        (self.latest > 0).then_some(RequestSeq(self.latest))
    }
}

/// Message from a fetch thread to the UI thread
#[derive(Debug)]
pub enum ProviderMessage {
    /// Position lookup finished (always resolves, falling back to the default)
    Located { place: Place },

    /// News search finished
    News {
        seq: RequestSeq,
        result: Result<NewsResponse, ProviderError>,
    },

    /// Weather fetch finished
    Weather {
        seq: RequestSeq,
        result: Result<WeatherObservation, ProviderError>,
    },
}

/// Runs provider calls on short-lived threads and reports back over a channel.
pub struct ProviderPool {
    news: Arc<dyn NewsProvider>,
    weather: Arc<dyn WeatherProvider>,
    locator: Arc<dyn Locator>,
    tx: Sender<ProviderMessage>,
    rx: Receiver<ProviderMessage>,
    active_fetches: Arc<Mutex<usize>>,
}

fn lock_count(count: &Mutex<usize>) -> MutexGuard<'_, usize> {
    count.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ProviderPool {
    pub fn new(
        news: Arc<dyn NewsProvider>,
        weather: Arc<dyn WeatherProvider>,
        locator: Arc<dyn Locator>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();

        Self {
            news,
            weather,
            locator,
            tx,
            rx,
            active_fetches: Arc::new(Mutex::new(0)),
        }
    }

    /// Get the receiver for provider messages
    pub fn receiver(&self) -> &Receiver<ProviderMessage> {
        &self.rx
    }

    /// Get the number of fetches still in flight
    pub fn active_count(&self) -> usize {
        *lock_count(&self.active_fetches)
    }

    pub fn spawn_news(&self, seq: RequestSeq, query: String) {
        let provider = Arc::clone(&self.news);
        self.spawn(move || {
            let result = provider.search_news(&query);
            ProviderMessage::News { seq, result }
        });
    }

    pub fn spawn_weather(&self, seq: RequestSeq, place: Place) {
        let provider = Arc::clone(&self.weather);
        self.spawn(move || {
            let result = provider.current_weather(place.coordinates);
            ProviderMessage::Weather { seq, result }
        });
    }

    pub fn spawn_locate(&self) {
        let locator = Arc::clone(&self.locator);
        self.spawn(move || ProviderMessage::Located {
            place: resolve_place(locator.as_ref()),
        });
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() -> ProviderMessage + Send + 'static,
    {
        let tx = self.tx.clone();
        let active = Arc::clone(&self.active_fetches);

        *lock_count(&active) += 1;

        thread::spawn(move || {
            let message = job();

            {
                let mut count = lock_count(&active);
                *count = count.saturating_sub(1);
            }

            // Receiver gone means the dashboard is shutting down
            let _ = tx.send(message);
        });
    }
}
