//! Deadline-based focus timer.
//!
//! The authoritative remaining time of a running countdown is always
//! `end_time - now`, recomputed from the wall clock on every read. Nothing
//! accumulates tick counts, so a process that was suspended and resumed
//! shows the correct value on its next refresh.

use crate::clock::Clock;
use crate::store::{self, KvStore, TIMER_STATE_KEY};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const TIMER_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_FOCUS_MS: i64 = 25 * 60 * 1000;
pub const DEFAULT_BREAK_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimerMode {
    #[default]
    Focus,
    Break,
}

impl TimerMode {
    /// The mode entered when this one runs out.
    pub fn other(self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "FOCUS / 專注",
            Self::Break => "BREAK / 休息",
        }
    }
}

impl std::str::FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" | "f" => Ok(Self::Focus),
            "break" | "b" => Ok(Self::Break),
            other => Err(format!("unknown timer mode '{}' (expected focus or break)", other)),
        }
    }
}

/// Full length of each mode, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    pub focus_ms: i64,
    pub break_ms: i64,
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            focus_ms: DEFAULT_FOCUS_MS,
            break_ms: DEFAULT_BREAK_MS,
        }
    }
}

impl TimerDurations {
    pub fn from_minutes(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            focus_ms: i64::from(focus_minutes.max(1)) * 60 * 1000,
            break_ms: i64::from(break_minutes.max(1)) * 60 * 1000,
        }
    }

    pub fn for_mode(&self, mode: TimerMode) -> i64 {
        match mode {
            TimerMode::Focus => self.focus_ms,
            TimerMode::Break => self.break_ms,
        }
    }
}

/// Snapshot of the timer. When `is_active` the deadline in `end_time` is
/// authoritative; when paused, `time_left_when_paused` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: TimerMode,
    pub is_active: bool,
    pub end_time: Option<i64>,
    pub time_left_when_paused: i64,
}

impl TimerState {
    pub fn paused(mode: TimerMode, time_left_ms: i64) -> Self {
        Self {
            mode,
            is_active: false,
            end_time: None,
            time_left_when_paused: time_left_ms,
        }
    }

    pub fn running(mode: TimerMode, end_time: i64, time_left_ms: i64) -> Self {
        Self {
            mode,
            is_active: true,
            end_time: Some(end_time),
            time_left_when_paused: time_left_ms,
        }
    }

    /// Fresh-install state: paused at the start of a full focus block.
    pub fn initial(durations: &TimerDurations) -> Self {
        Self::paused(TimerMode::Focus, durations.focus_ms)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedTimer {
    version: u32,
    #[serde(flatten)]
    state: TimerState,
}

/// Repair a state read from storage.
///
/// A running state whose deadline already passed (the process was not
/// around to see it) is parked at the full duration of the *same* mode
/// rather than advancing, so a missed focus block never silently skips the
/// break that should follow it. Returns `true` when anything changed.
pub fn normalize(state: TimerState, now_ms: i64, durations: &TimerDurations) -> (TimerState, bool) {
    let full = durations.for_mode(state.mode);

    let repaired = if state.is_active {
        match state.end_time {
            Some(end) if end > now_ms && end.saturating_sub(now_ms) <= full => {
                TimerState::running(state.mode, end, clamp_left(state.time_left_when_paused, full))
            }
            // Elapsed, or further out than one full block
            Some(_) => TimerState::paused(state.mode, full),
            None => TimerState::paused(state.mode, clamp_left(state.time_left_when_paused, full)),
        }
    } else {
        TimerState::paused(state.mode, clamp_left(state.time_left_when_paused, full))
    };

    (repaired, repaired != state)
}

fn clamp_left(left_ms: i64, full_ms: i64) -> i64 {
    if left_ms <= 0 || left_ms > full_ms {
        full_ms
    } else {
        left_ms
    }
}

/// Result of one display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub mode: TimerMode,
    pub is_active: bool,
    pub remaining_ms: i64,
    /// Mode that just ran out during this tick, if any.
    pub completed: Option<TimerMode>,
    /// Whether the caller should refresh again before the next paint.
    pub reschedule: bool,
}

pub struct FocusTimer {
    state: TimerState,
    durations: TimerDurations,
    store: Rc<dyn KvStore>,
    clock: Rc<dyn Clock>,
}

impl FocusTimer {
    /// Read the persisted state once and validate it against the clock.
    pub fn load(store: Rc<dyn KvStore>, clock: Rc<dyn Clock>, durations: TimerDurations) -> Self {
        let persisted = store::load_json::<PersistedTimer>(store.as_ref(), TIMER_STATE_KEY)
            .and_then(|p| {
                if p.version == TIMER_SCHEMA_VERSION {
                    Some(p.state)
                } else {
                    tracing::warn!(
                        version = p.version,
                        "ignoring timer state with unknown schema version"
                    );
                    None
                }
            });

        match persisted {
            Some(state) => Self::with_state(state, store, clock, durations),
            None => {
                tracing::debug!("no persisted timer state, starting fresh");
                Self {
                    state: TimerState::initial(&durations),
                    durations,
                    store,
                    clock,
                }
            }
        }
    }

    /// Build a timer around an explicit state, repairing it as `load` would.
    pub fn with_state(
        state: TimerState,
        store: Rc<dyn KvStore>,
        clock: Rc<dyn Clock>,
        durations: TimerDurations,
    ) -> Self {
        let (state, repaired) = normalize(state, clock.now_ms(), &durations);
        let mut timer = Self {
            state,
            durations,
            store,
            clock,
        };
        if repaired {
            tracing::info!(mode = ?state.mode, "recovered stale timer state");
            timer.persist();
        }
        timer
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn durations(&self) -> &TimerDurations {
        &self.durations
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    /// Remaining time without applying any transition, clamped at zero.
    pub fn remaining_ms(&self) -> i64 {
        match (self.state.is_active, self.state.end_time) {
            (true, Some(end)) => end.saturating_sub(self.clock.now_ms()).max(0),
            _ => self.state.time_left_when_paused,
        }
    }

    /// Elapsed fraction of the current mode, 0.0 ..= 1.0.
    pub fn progress(&self) -> f64 {
        let full = self.durations.for_mode(self.state.mode) as f64;
        if full <= 0.0 {
            return 0.0;
        }
        (1.0 - self.remaining_ms() as f64 / full).clamp(0.0, 1.0)
    }

    /// Pause a running countdown, or resume a paused one.
    pub fn toggle(&mut self) {
        let now = self.clock.now_ms();
        let next = match (self.state.is_active, self.state.end_time) {
            (true, Some(end)) => {
                let remaining = end.saturating_sub(now);
                if remaining <= 0 {
                    self.complete();
                    return;
                }
                TimerState::paused(self.state.mode, remaining)
            }
            _ => TimerState::running(
                self.state.mode,
                now.saturating_add(self.state.time_left_when_paused),
                self.state.time_left_when_paused,
            ),
        };
        self.commit(next);
    }

    /// Stop and rewind to the full duration of the current mode.
    pub fn reset(&mut self) {
        let full = self.durations.for_mode(self.state.mode);
        self.commit(TimerState::paused(self.state.mode, full));
    }

    /// Enter `mode`, paused at its full duration. Always stops a running countdown.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.commit(TimerState::paused(mode, self.durations.for_mode(mode)));
    }

    /// Display refresh. A running countdown whose deadline has passed
    /// switches to the other mode, paused at its full duration.
    pub fn tick(&mut self) -> TickReport {
        match (self.state.is_active, self.state.end_time) {
            (true, Some(end)) => {
                let remaining = end.saturating_sub(self.clock.now_ms());
                if remaining <= 0 {
                    let finished = self.state.mode;
                    self.complete();
                    TickReport {
                        mode: self.state.mode,
                        is_active: false,
                        remaining_ms: self.state.time_left_when_paused,
                        completed: Some(finished),
                        reschedule: false,
                    }
                } else {
                    TickReport {
                        mode: self.state.mode,
                        is_active: true,
                        remaining_ms: remaining,
                        completed: None,
                        reschedule: true,
                    }
                }
            }
            _ => TickReport {
                mode: self.state.mode,
                is_active: false,
                remaining_ms: self.state.time_left_when_paused,
                completed: None,
                reschedule: false,
            },
        }
    }

    fn complete(&mut self) {
        let finished = self.state.mode;
        let next = finished.other();
        tracing::info!(finished = ?finished, next = ?next, "timer block finished");
        self.commit(TimerState::paused(next, self.durations.for_mode(next)));
    }

    /// Persist first, then publish the new state.
    fn commit(&mut self, next: TimerState) {
        let previous = self.state;
        self.state = next;
        self.persist();
        tracing::debug!(from = ?previous, to = ?next, "timer transition");
    }

    fn persist(&self) {
        let record = PersistedTimer {
            version: TIMER_SCHEMA_VERSION,
            state: self.state,
        };
        if let Err(e) = store::save_json(self.store.as_ref(), TIMER_STATE_KEY, &record) {
            tracing::error!(error = %e, "failed to persist timer state");
        }
    }
}

/// Format milliseconds as `MM:SS`, flooring partial seconds.
pub fn format_clock(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
