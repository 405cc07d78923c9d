use super::*;

pub(super) fn handle_quote_key(key: KeyEvent, state: &mut AppState) {
    if matches!(
        key.code,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Char('N')
    ) {
        let now = state.now_ms();
        if !state.quote.advance(&mut state.rng, now) {
            tracing::debug!("quote change ignored during fade");
        }
    }
}
