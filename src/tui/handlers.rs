//! Key handling for the explorer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::models::{EMBED_ACTION, Family, TEXT_ACTION};

use super::app::App;
use super::constants::PAGE_STEP;

/// What the main loop should do after a key.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HandleResult {
    Continue,
    Refresh,
    Quit,
}

/// Handle one key. `visible_len` is the size of the filtered list before the key.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent, visible_len: usize) -> HandleResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return HandleResult::Quit,
        KeyCode::Char('r') if ctrl => return HandleResult::Refresh,
        KeyCode::Esc => {
            if app.expanded {
                app.expanded = false;
            } else if !app.criteria.text_query.is_empty() {
                app.criteria.text_query.clear();
                app.reset_selection();
            } else {
                return HandleResult::Quit;
            }
        }
        KeyCode::Enter => app.expanded = !app.expanded,
        KeyCode::Up => app.select_prev(1),
        KeyCode::Down => app.select_next(1, visible_len),
        KeyCode::PageUp => app.select_prev(PAGE_STEP),
        KeyCode::PageDown => app.select_next(PAGE_STEP, visible_len),
        KeyCode::Home => app.selected = 0,
        KeyCode::End => app.selected = visible_len.saturating_sub(1),
        KeyCode::Backspace => {
            app.criteria.text_query.pop();
            app.reset_selection();
        }
        KeyCode::Char(c) if !ctrl => {
            app.criteria.text_query.push(c);
            app.reset_selection();
        }
        KeyCode::F(n @ 1..=6) => {
            app.criteria.toggle_family(Family::ALL[usize::from(n) - 1]);
            app.reset_selection();
        }
        KeyCode::F(7) => {
            app.criteria.recommended_only = !app.criteria.recommended_only;
            app.reset_selection();
        }
        KeyCode::F(8) => {
            app.criteria.active_only = !app.criteria.active_only;
            app.reset_selection();
        }
        KeyCode::F(9) => {
            let on = !app.criteria.requires(TEXT_ACTION);
            app.criteria.set_action(TEXT_ACTION, on);
            app.reset_selection();
        }
        KeyCode::F(10) => {
            let on = !app.criteria.requires(EMBED_ACTION);
            app.criteria.set_action(EMBED_ACTION, on);
            app.reset_selection();
        }
        _ => {}
    }
    HandleResult::Continue
}
