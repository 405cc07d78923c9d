// Focus timer behaviour across persistence, wall-clock jumps and mode changes

use proptest::prelude::*;
use std::rc::Rc;
use zendash::clock::{Clock, ManualClock};
use zendash::engine::{FocusTimer, TimerDurations, TimerMode, TimerState, format_clock};
use zendash::store::{KvStore, MemoryStore};

use crate::common::helpers::START_MS;

fn setup() -> (Rc<dyn KvStore>, ManualClock) {
    (Rc::new(MemoryStore::new()), ManualClock::new(START_MS))
}

fn timer_over(store: &Rc<dyn KvStore>, clock: &ManualClock) -> FocusTimer {
    let clock: Rc<dyn Clock> = Rc::new(clock.clone());
    FocusTimer::load(Rc::clone(store), clock, TimerDurations::default())
}

fn mode_strategy() -> impl Strategy<Value = TimerMode> {
    prop_oneof![Just(TimerMode::Focus), Just(TimerMode::Break)]
}

#[test]
fn test_full_focus_block_rolls_into_break() {
    let (store, clock) = setup();
    let mut timer = timer_over(&store, &clock);

    assert_eq!(timer.mode(), TimerMode::Focus);
    assert_eq!(format_clock(timer.remaining_ms()), "25:00");

    timer.toggle();
    assert!(timer.is_active());

    clock.advance_secs(25 * 60);
    let report = timer.tick();

    assert_eq!(report.completed, Some(TimerMode::Focus));
    assert_eq!(timer.mode(), TimerMode::Break);
    assert!(!timer.is_active());
    assert_eq!(format_clock(timer.remaining_ms()), "05:00");
}

#[test]
fn test_countdown_survives_suspension_without_ticks() {
    let (store, clock) = setup();
    let mut timer = timer_over(&store, &clock);
    timer.toggle();

    // Nothing ticks while the process is stopped
    clock.advance_secs(10 * 60);

    let report = timer.tick();
    assert!(report.is_active);
    assert_eq!(format_clock(report.remaining_ms), "15:00");
}

#[test]
fn test_running_timer_resumes_after_reload() {
    let (store, clock) = setup();
    {
        let mut timer = timer_over(&store, &clock);
        timer.toggle();
    }

    clock.advance_secs(90);
    let reloaded = timer_over(&store, &clock);

    assert!(reloaded.is_active());
    assert_eq!(reloaded.mode(), TimerMode::Focus);
    assert_eq!(format_clock(reloaded.remaining_ms()), "23:30");
}

#[test]
fn test_paused_timer_reloads_unchanged() {
    let (store, clock) = setup();
    {
        let mut timer = timer_over(&store, &clock);
        timer.toggle();
        clock.advance_secs(61);
        timer.toggle();
    }

    clock.advance_secs(3600);
    let reloaded = timer_over(&store, &clock);

    assert!(!reloaded.is_active());
    assert_eq!(reloaded.remaining_ms(), 25 * 60 * 1000 - 61_000);
}

#[test]
fn test_reset_restores_full_duration_of_current_mode() {
    let (store, clock) = setup();
    let mut timer = timer_over(&store, &clock);
    timer.switch_mode(TimerMode::Break);
    timer.toggle();
    clock.advance_secs(42);

    timer.reset();

    assert_eq!(timer.mode(), TimerMode::Break);
    assert!(!timer.is_active());
    assert_eq!(format_clock(timer.remaining_ms()), "05:00");
}

proptest! {
    /// A deadline that passed while nothing was running parks the timer at
    /// the full duration of the same mode.
    #[test]
    fn prop_expired_deadline_recovers_same_mode(
        mode in mode_strategy(),
        overdue_ms in 0i64..(48 * 3600 * 1000),
        left in 1i64..(60 * 60 * 1000),
    ) {
        let (store, clock) = setup();
        let durations = TimerDurations::default();
        let stale = TimerState::running(mode, START_MS - overdue_ms, left);

        let clock_rc: Rc<dyn Clock> = Rc::new(clock.clone());
        let mut timer = FocusTimer::with_state(stale, Rc::clone(&store), clock_rc, durations);
        let report = timer.tick();

        prop_assert_eq!(report.mode, mode);
        prop_assert!(!report.is_active);
        prop_assert_eq!(report.completed, None);
        prop_assert_eq!(timer.remaining_ms(), durations.for_mode(mode));
    }

    /// Two toggles with no time in between leave a paused timer unchanged.
    #[test]
    fn prop_toggle_twice_is_identity(
        mode in mode_strategy(),
        left_fraction in 0.001f64..1.0,
    ) {
        let (store, clock) = setup();
        let durations = TimerDurations::default();
        let left = ((durations.for_mode(mode) as f64) * left_fraction).max(1.0) as i64;
        let start = TimerState::paused(mode, left);

        let clock_rc: Rc<dyn Clock> = Rc::new(clock.clone());
        let mut timer = FocusTimer::with_state(start, store, clock_rc, durations);
        timer.toggle();
        prop_assert!(timer.is_active());
        timer.toggle();

        prop_assert_eq!(*timer.state(), start);
    }

    /// Switching always stops the countdown at the target's full duration.
    #[test]
    fn prop_switch_mode_pauses_at_full_duration(
        from in mode_strategy(),
        to in mode_strategy(),
        running in any::<bool>(),
        elapsed_secs in 0i64..(4 * 60),
    ) {
        let (store, clock) = setup();
        let mut timer = timer_over(&store, &clock);
        timer.switch_mode(from);
        if running {
            timer.toggle();
        }
        clock.advance_secs(elapsed_secs);

        timer.switch_mode(to);

        prop_assert!(!timer.is_active());
        prop_assert_eq!(timer.mode(), to);
        prop_assert_eq!(timer.remaining_ms(), timer.durations().for_mode(to));
    }

    /// Remaining time never goes negative or above the mode's duration.
    #[test]
    fn prop_remaining_stays_in_range(advance_secs in 0i64..(2 * 3600)) {
        let (store, clock) = setup();
        let mut timer = timer_over(&store, &clock);
        timer.toggle();
        clock.advance_secs(advance_secs);

        let remaining = timer.remaining_ms();
        prop_assert!(remaining >= 0);
        prop_assert!(remaining <= timer.durations().for_mode(timer.mode()));
        let progress = timer.progress();
        prop_assert!((0.0..=1.0).contains(&progress));
    }
}
