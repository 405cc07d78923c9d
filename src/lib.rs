pub mod clock;
pub mod config;
pub mod engine;
pub mod logging;
pub mod store;
pub mod ui;
