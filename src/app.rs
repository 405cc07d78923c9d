use crate::cli::{Cli, Commands, MemoAction, TimerAction};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use zendash::clock::{Clock, SystemClock};
use zendash::config::Config;
use zendash::engine::news::records_from_response;
use zendash::engine::provider::{
    FixedLocator, GeminiNewsProvider, IpLocator, Locator, NewsProvider, OfflineProvider,
    OpenMeteoProvider, WeatherProvider, build_client, resolve_place,
};
use zendash::engine::{
    FocusTimer, MemoBoard, NEWS_DISPLAY_COUNT, Place, ProviderPool, QuoteTile, WeatherReading,
    format_clock,
};
use zendash::logging::{self, LogTarget};
use zendash::store::{FileStore, KvStore, MemoryStore};
use zendash::ui;

/// Flags shared by the dashboard and every subcommand.
struct Session {
    data_dir: Option<PathBuf>,
    ephemeral: bool,
    offline: bool,
    debug: bool,
}

struct Providers {
    news: Arc<dyn NewsProvider>,
    weather: Arc<dyn WeatherProvider>,
    locator: Arc<dyn Locator>,
}

pub fn run(cli: Cli) {
    let Cli {
        command,
        tui: _,
        data_dir,
        ephemeral,
        offline,
        debug,
    } = cli;
    let session = Session {
        data_dir,
        ephemeral,
        offline,
        debug,
    };

    if let Some(Commands::InitConfig) = command {
        handle_init_config();
        return;
    }

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}", e);
        eprintln!("Using built-in defaults.");
        Config::default()
    });

    let result = match command {
        Some(command) => {
            if let Err(e) = logging::init(&LogTarget::Stderr, session.debug) {
                eprintln!("Warning: logging disabled: {:#}", e);
            }
            run_command(command, &session, &config)
        }
        // Launch TUI (default behavior)
        None => run_dashboard(&session, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, session: &Session, config: &Config) -> Result<()> {
    match command {
        Commands::Timer { action } => {
            handle_timer(action.unwrap_or(TimerAction::Status), session, config)
        }
        Commands::Memo { action } => handle_memo(action.unwrap_or(MemoAction::List), session, config),
        Commands::News { query } => handle_news(query, session, config),
        Commands::Weather => handle_weather(session, config),
        Commands::Quote => {
            handle_quote();
            Ok(())
        }
        Commands::InitConfig => {
            handle_init_config();
            Ok(())
        }
    }
}

fn run_dashboard(session: &Session, config: &Config) -> Result<()> {
    let (store, data_dir) = open_store(session, config)?;

    if let Err(e) = logging::init(&LogTarget::in_data_dir(&data_dir), session.debug) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let providers = build_providers(config, session.offline)?;
    let pool = ProviderPool::new(providers.news, providers.weather, providers.locator);
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);

    let mut state = ui::AppState::new(
        store,
        clock,
        pool,
        ui::DashboardOptions::from_config(config),
    );

    ui::run_ui(&mut state, Duration::from_millis(config.timer.refresh_ms))
        .context("Error running UI")?;
    Ok(())
}

fn open_store(session: &Session, config: &Config) -> Result<(Rc<dyn KvStore>, PathBuf)> {
    let data_dir = config.data_dir(session.data_dir.as_deref())?;

    if session.ephemeral {
        tracing::debug!("using in-memory store");
        return Ok((Rc::new(MemoryStore::new()), data_dir));
    }

    let store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;
    Ok((Rc::new(store), data_dir))
}

fn build_providers(config: &Config, offline: bool) -> Result<Providers> {
    if offline {
        tracing::info!("offline mode, remote providers disabled");
        return Ok(Providers {
            news: Arc::new(OfflineProvider),
            weather: Arc::new(OfflineProvider),
            locator: Arc::new(OfflineProvider),
        });
    }

    let client = build_client(Duration::from_secs(config.provider.timeout_secs))
        .context("Failed to build HTTP client")?;

    let api_key = config.api_key();
    if api_key.is_none() {
        tracing::warn!("no Gemini API key configured, news search will fail");
    }

    let locator: Arc<dyn Locator> = match config.fixed_place() {
        Some(place) => Arc::new(FixedLocator::new(place)),
        None if config.weather.ip_lookup => Arc::new(IpLocator::new(client.clone())),
        None => Arc::new(FixedLocator::new(Place::fallback())),
    };

    Ok(Providers {
        news: Arc::new(GeminiNewsProvider::new(
            client.clone(),
            api_key,
            config.provider.model.clone(),
        )),
        weather: Arc::new(OpenMeteoProvider::new(client)),
        locator,
    })
}

fn print_timer(timer: &FocusTimer) {
    let status = if timer.is_active() { "running" } else { "paused" };
    println!(
        "{}  {}  ({})",
        timer.mode().label(),
        format_clock(timer.remaining_ms()),
        status
    );
}

fn handle_timer(action: TimerAction, session: &Session, config: &Config) -> Result<()> {
    let (store, _) = open_store(session, config)?;
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let mut timer = FocusTimer::load(store, clock, config.durations());

    match action {
        TimerAction::Status => {}
        TimerAction::Toggle => timer.toggle(),
        TimerAction::Reset => timer.reset(),
        TimerAction::Switch { mode } => timer.switch_mode(mode),
    }

    print_timer(&timer);
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn handle_memo(action: MemoAction, session: &Session, config: &Config) -> Result<()> {
    let (store, _) = open_store(session, config)?;
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let mut board = MemoBoard::load(store, clock);

    match action {
        MemoAction::List => {
            if board.is_empty() {
                println!("{}", ui::constants::MEMO_EMPTY);
            }
            for memo in board.iter() {
                let created = chrono::DateTime::from_timestamp_millis(memo.created_at)
                    .map(|dt| {
                        dt.with_timezone(&chrono::Local)
                            .format("%Y-%m-%d %H:%M")
                            .to_string()
                    })
                    .unwrap_or_default();
                println!("{}  {}  {}", short_id(&memo.id), created, memo.content);
            }
        }
        MemoAction::Add { text } => match board.add(&text.join(" ")) {
            Some(memo) => println!("Added {}", short_id(&memo.id)),
            None => bail!("memo text is empty"),
        },
        MemoAction::Remove { id } => {
            let matches: Vec<String> = board
                .iter()
                .filter(|m| m.id.starts_with(&id))
                .map(|m| m.id.clone())
                .collect();
            match matches.as_slice() {
                [] => bail!("no memo with id '{}'", id),
                [found] => {
                    board.remove(found);
                    println!("Removed {}", short_id(found));
                }
                _ => bail!(
                    "id '{}' matches {} memos, give more characters",
                    id,
                    matches.len()
                ),
            }
        }
    }
    Ok(())
}

fn handle_news(query: Vec<String>, session: &Session, config: &Config) -> Result<()> {
    let query = if query.is_empty() {
        config.news.default_query.clone()
    } else {
        query.join(" ")
    };
    if query.trim().is_empty() {
        bail!("search keyword is empty");
    }

    let providers = build_providers(config, session.offline)?;
    let response = providers
        .news
        .search_news(&query)
        .with_context(|| format!("News search for '{}' failed", query))?;

    let records = records_from_response(&response, NEWS_DISPLAY_COUNT);
    if records.is_empty() {
        println!("No stories found for '{}'.", query);
    }
    for (i, record) in records.iter().enumerate() {
        let date = record
            .date
            .as_deref()
            .map(|d| format!(" · {}", d))
            .unwrap_or_default();
        println!("{}. {}", i + 1, record.title);
        println!("   {}{}", record.source, date);
        println!("   {}", record.url);
    }
    Ok(())
}

fn handle_weather(session: &Session, config: &Config) -> Result<()> {
    let providers = build_providers(config, session.offline)?;
    let place = resolve_place(providers.locator.as_ref());
    let observation = providers
        .weather
        .current_weather(place.coordinates)
        .with_context(|| format!("Weather lookup for {} failed", place.name))?;

    let reading = WeatherReading::from_observation(place.name.clone(), &observation);
    let feels = reading
        .feels_like
        .map(|f| format!("  (feels {:.0}°)", f))
        .unwrap_or_default();
    println!(
        "{} {}  {:.1}°C{}",
        reading.condition.icon().glyph(),
        reading.condition.label(),
        reading.temp,
        feels
    );
    println!("@ {} ({})", place.name, place.coordinates);
    Ok(())
}

fn handle_quote() {
    let mut rng = rand::thread_rng();
    let tile = QuoteTile::new(&mut rng);
    if let Some(quote) = tile.current() {
        println!("{}", quote.ja);
        println!("{}", quote.en);
        println!("{}", quote.tw);
    }
}

fn handle_init_config() {
    match Config::config_path() {
        Ok(path) if path.exists() => match Config::load_from(&path) {
            Ok(cfg) => {
                println!("Config loaded successfully from {}", path.display());
                println!("{:#?}", cfg);
            }
            Err(e) => {
                eprintln!("Config invalid: {:#}", e);
                eprintln!("Fix or delete {} and run init-config again.", path.display());
                process::exit(1);
            }
        },
        Ok(path) => {
            println!("Config missing, creating default...");
            if let Err(err) = Config::default().save_to(&path) {
                eprintln!("Failed to save default config: {:#}", err);
                process::exit(1);
            }
            println!("Default config saved to {}", path.display());
        }
        Err(e) => {
            eprintln!("Could not determine config location: {:#}", e);
            process::exit(1);
        }
    }
}
