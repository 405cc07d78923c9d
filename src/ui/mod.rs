// Terminal UI using Ratatui

pub mod components;
pub mod constants;
pub mod dashboard;
pub mod events;
pub mod focus;
pub mod help;
pub mod state;
pub mod ticker;
pub mod widgets;

pub use dashboard::Dashboard;
pub use events::{handle_key, run_ui};
pub use help::HelpOverlay;
pub use state::{AppState, DashboardOptions, InputMode};
