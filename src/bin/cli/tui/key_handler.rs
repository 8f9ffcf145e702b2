use crossterm::event::{KeyCode, KeyEvent};

use signcoach_lib::ViewMode;

use super::app_state::{Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    match state.mode {
        Mode::Normal => handle_normal_key(state, key),
        Mode::Search => handle_search_key(state, key),
        Mode::AddCard | Mode::EditCard | Mode::ProfileName => handle_input_key(state, key),
        Mode::ConfirmReset => {
            if key.code == KeyCode::Char('y') {
                state.reset_library();
            } else {
                state.mode = Mode::Normal;
            }
        }
    }
}

fn handle_normal_key(state: &mut TuiState, key: KeyEvent) {
    // Keys shared by every view
    match key.code {
        KeyCode::Char('q') => {
            state.quit = true;
            return;
        }
        KeyCode::Char('1') => return state.switch_view(ViewMode::Learn),
        KeyCode::Char('2') => return state.switch_view(ViewMode::Practice),
        KeyCode::Char('3') => return state.switch_view(ViewMode::Manage),
        KeyCode::Tab => {
            let next = state.view().next();
            return state.switch_view(next);
        }
        KeyCode::Char('/') => return state.start_search(),
        KeyCode::Char('c') => return state.cycle_category(),
        KeyCode::Char('p') => return state.start_profile_edit(),
        KeyCode::Char('?') => {
            state.show_help = !state.show_help;
            return;
        }
        _ => {}
    }

    match state.view() {
        ViewMode::Learn => match key.code {
            KeyCode::Char('l') | KeyCode::Right => state.app.session.next_card(),
            KeyCode::Char('h') | KeyCode::Left => state.app.session.prev_card(),
            KeyCode::Char('s') => state.app.session.shuffle_card(),
            _ => {}
        },
        ViewMode::Practice => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => state.app.session.toggle_reveal(),
            KeyCode::Char('n') | KeyCode::Right => {
                state.app.session.practice_next();
            }
            _ => {}
        },
        ViewMode::Manage => match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.manage_move_down(),
            KeyCode::Char('k') | KeyCode::Up => state.manage_move_up(),
            KeyCode::Char('d') | KeyCode::Delete => state.delete_selected(),
            KeyCode::Char('a') => {
                state.input_text.clear();
                state.mode = Mode::AddCard;
            }
            KeyCode::Char('e') | KeyCode::Enter => state.start_edit(),
            KeyCode::Char('R') => state.mode = Mode::ConfirmReset,
            _ => {}
        },
    }
}

fn handle_search_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.input_text.clear();
            state.update_search();
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            state.input_text.clear();
            state.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            state.input_text.pop();
            state.update_search();
        }
        KeyCode::Char(c) => {
            state.input_text.push(c);
            state.update_search();
        }
        _ => {}
    }
}

fn handle_input_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.input_text.clear();
            state.edit_target = None;
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => match state.mode {
            Mode::AddCard => state.add_from_input(),
            Mode::EditCard => state.save_edit_from_input(),
            Mode::ProfileName => state.save_profile_from_input(),
            _ => {}
        },
        KeyCode::Backspace => {
            state.input_text.pop();
        }
        KeyCode::Char(c) => {
            state.input_text.push(c);
        }
        _ => {}
    }
}
