use super::*;

const MAX_QUERY_CHARS: usize = 120;

pub(super) fn handle_news_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        // Edit the keyword, starting from the current one
        KeyCode::Char('/') | KeyCode::Char('e') | KeyCode::Char('E') => {
            state.query_input = state.news.query().to_string();
            state.input_mode = InputMode::Editing;
        }
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => state.refresh_news(),
        KeyCode::Char('s') | KeyCode::Char('S') => state.news.shuffle(&mut state.rng),
        _ => {}
    }
}

pub(super) fn handle_news_input(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.query_input.clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            // Blank keywords are rejected and leave the input open
            let query = std::mem::take(&mut state.query_input);
            if state.search_news(&query) {
                state.input_mode = InputMode::Normal;
            } else {
                state.query_input = query;
            }
        }
        _ => {
            edit_line(&key, &mut state.query_input, MAX_QUERY_CHARS);
        }
    }
}
