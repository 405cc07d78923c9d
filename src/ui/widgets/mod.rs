// Custom widgets for the TUI

pub mod big_clock;
pub mod progress;

pub use big_clock::BigClock;
pub use progress::{BarState, TimerBar};
