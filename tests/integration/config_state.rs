// Config file round trips and the dashboard options derived from them

use std::fs;
use tempfile::TempDir;
use zendash::config::Config;
use zendash::engine::TimerDurations;
use zendash::ui::DashboardOptions;

#[test]
fn test_saved_config_loads_back_equal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.timer.focus_minutes = 50;
    config.timer.break_minutes = 10;
    config.news.default_query = "台灣 科技".to_string();
    config.weather.latitude = Some(35.68);
    config.weather.longitude = Some(139.69);
    config.weather.location_name = Some("Tokyo".to_string());
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(
        loaded.fixed_place().map(|p| p.name),
        Some("Tokyo".to_string())
    );
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[timer]\nfocus_minutes = 45\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.timer.focus_minutes, 45);
    assert_eq!(config.timer.break_minutes, 5);
    assert_eq!(config.weather.refresh_minutes, 30);
    assert_eq!(config.provider.timeout_secs, 20);
}

#[test]
fn test_zero_values_are_raised_to_minimums() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[timer]\nfocus_minutes = 0\nbreak_minutes = 0\nrefresh_ms = 0\n\n[news]\ndefault_query = \"  \"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.durations(), TimerDurations::from_minutes(1, 1));
    assert_eq!(config.timer.refresh_ms, 16);
    assert_eq!(config.news.default_query, "trending technology news");
}

#[test]
fn test_malformed_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[timer\nfocus_minutes = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.toml"));
}

#[test]
fn test_dashboard_options_follow_config() {
    let mut config = Config::default();
    config.timer.focus_minutes = 30;
    config.timer.bell = false;
    config.weather.refresh_minutes = 15;

    let options = DashboardOptions::from_config(&config);
    assert_eq!(options.durations.focus_ms, 30 * 60 * 1000);
    assert!(!options.bell);
    assert_eq!(options.weather_refresh_ms, 15 * 60 * 1000);
}

#[test]
fn test_data_dir_precedence() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.data_dir = Some(dir.path().join("from-config"));

    let cli = dir.path().join("from-cli");
    assert_eq!(config.data_dir(Some(cli.as_path())).unwrap(), cli);
    assert_eq!(
        config.data_dir(None).unwrap(),
        dir.path().join("from-config")
    );
}
