use super::*;
use crate::engine::TimerMode;

pub(super) fn handle_timer_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => state.timer.toggle(),
        KeyCode::Char('r') | KeyCode::Char('R') => state.timer.reset(),
        KeyCode::Char('f') | KeyCode::Char('F') => state.timer.switch_mode(TimerMode::Focus),
        KeyCode::Char('b') | KeyCode::Char('B') => state.timer.switch_mode(TimerMode::Break),
        _ => {}
    }
}
