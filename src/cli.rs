use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zendash::engine::TimerMode;

#[derive(Parser)]
#[command(name = "zendash", version)]
#[command(about = "Focus timer, memo pad, news and weather in one terminal dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch the TUI (default if no subcommand is given)
    #[arg(long)]
    pub tui: bool,

    /// Directory for timer state, memos and the log file (overrides config)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep timer state and memos in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Don't contact any news, weather or location service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or drive the focus timer
    Timer {
        #[command(subcommand)]
        action: Option<TimerAction>,
    },

    /// List, add or remove memos
    Memo {
        #[command(subcommand)]
        action: Option<MemoAction>,
    },

    /// Search recent news (uses the configured default query when omitted)
    News {
        /// Search keywords
        query: Vec<String>,
    },

    /// Show current weather for the configured or detected location
    Weather,

    /// Print a random zen quote
    Quote,

    /// Show config status and location, or create default config if missing
    InitConfig,
}

#[derive(Subcommand, Clone, Copy)]
pub enum TimerAction {
    /// Show mode, remaining time and whether it is running (default)
    Status,
    /// Start or pause the countdown
    Toggle,
    /// Rewind the current mode to its full duration
    Reset,
    /// Switch to focus or break, paused at full duration
    Switch {
        /// focus | break
        mode: TimerMode,
    },
}

#[derive(Subcommand)]
pub enum MemoAction {
    /// List memos, newest first (default)
    List,
    /// Add a memo
    Add {
        /// Memo text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Remove a memo by id (a unique prefix is enough)
    Remove { id: String },
}

pub fn parse() -> Cli {
    Cli::parse()
}
