use super::*;
use crate::engine::MAX_MEMO_CHARS;

pub(super) fn handle_memo_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('i') | KeyCode::Char('I') => {
            state.memo_input.clear();
            state.input_mode = InputMode::Editing;
        }
        KeyCode::Up => {
            if let Some(i) = state.selected_memo() {
                if i > 0 {
                    state.memo_list.select(Some(i - 1));
                }
            }
        }
        KeyCode::Down => {
            let count = state.memos.len();
            match state.selected_memo() {
                Some(i) if i + 1 < count => state.memo_list.select(Some(i + 1)),
                None if count > 0 => state.memo_list.select(Some(0)),
                _ => {}
            }
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            let Some(index) = state.selected_memo() else {
                return;
            };
            let Some(id) = state.memos.get(index).map(|m| m.id.clone()) else {
                return;
            };
            if state.memos.remove(&id) {
                state.clamp_memo_selection();
            }
        }
        _ => {}
    }
}

pub(super) fn handle_memo_input(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.memo_input.clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            // Whitespace-only input is ignored and leaves the input open
            if state.memos.add(&state.memo_input).is_some() {
                state.memo_input.clear();
                state.memo_list.select(Some(0));
                state.input_mode = InputMode::Normal;
            }
        }
        _ => {
            edit_line(&key, &mut state.memo_input, MAX_MEMO_CHARS);
        }
    }
}
