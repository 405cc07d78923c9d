// Background fetches flowing back into the dashboard state

use zendash::engine::weather::WeatherObservation;
use zendash::engine::{Condition, NewsStatus, WeatherStatus};

use crate::common::helpers::{CannedNews, build_state, canned_pool, offline_pool, pump_until};

fn sunny() -> WeatherObservation {
    WeatherObservation {
        condition_code: 0,
        temperature: 21.4,
        apparent_temperature: Some(20.0),
    }
}

#[test]
fn test_start_fills_news_and_weather() {
    let news = CannedNews::listing(&[
        "1. Rust 2024 ships | LWN | https://lwn.net/a | today",
        "2. Ratatui 0.29 | GitHub | https://github.com/ratatui/ratatui",
    ]);
    let (mut state, _clock, _store) = build_state(canned_pool(news, sunny()));

    state.start();
    let settled = pump_until(&mut state, |s| {
        s.news.status() == &NewsStatus::Loaded && s.weather.status() == &WeatherStatus::Ready
    });
    assert!(settled, "fetches did not finish");

    assert_eq!(state.news.displayed().len(), 2);
    let reading = state.weather.reading();
    assert_eq!(reading.location, "Kyoto");
    assert_eq!(reading.condition, Condition::Clear);
    assert_eq!(reading.feels_like, Some(20.0));
    assert_eq!(state.providers.active_count(), 0);
}

#[test]
fn test_offline_start_falls_back_to_default_place() {
    let (mut state, _clock, _store) = build_state(offline_pool());

    state.start();
    let settled = pump_until(&mut state, |s| {
        matches!(s.news.status(), NewsStatus::Error(_))
            && matches!(s.weather.status(), WeatherStatus::Error(_))
    });
    assert!(settled, "offline fetches did not report errors");

    assert_eq!(
        state.weather.place().map(|p| p.name.as_str()),
        Some("Taipei / 台北")
    );
    assert_eq!(state.weather.reading().temp, 0.0);
}

#[test]
fn test_latest_search_wins() {
    let news = CannedNews::listing(&["Only story | Wire | https://wire.example/1"]);
    let (mut state, _clock, _store) = build_state(canned_pool(news, sunny()));

    state.refresh_news();
    assert!(state.search_news("ratatui"));
    assert!(!state.search_news("   "));

    let settled = pump_until(&mut state, |s| {
        s.news.status() == &NewsStatus::Loaded && s.providers.active_count() == 0
    });
    assert!(settled);
    state.drain_provider_messages(16);

    assert_eq!(state.news.query(), "ratatui");
    assert_eq!(state.news.displayed().len(), 1);
}

#[test]
fn test_weather_refreshes_on_schedule() {
    let (mut state, clock, _store) = build_state(canned_pool(CannedNews::listing(&[]), sunny()));

    state.start();
    assert!(pump_until(&mut state, |s| s.weather.status() == &WeatherStatus::Ready));

    // Not yet due
    clock.advance_secs(60);
    state.on_tick();
    assert_eq!(state.weather.status(), &WeatherStatus::Ready);

    clock.advance_secs(30 * 60);
    state.on_tick();
    assert_eq!(state.weather.status(), &WeatherStatus::Loading);
    assert!(pump_until(&mut state, |s| s.weather.status() == &WeatherStatus::Ready));
    assert_eq!(state.weather.reading().location, "Kyoto");
}
