//! Keyboard Input Handler
//!
//! Maps key presses onto tab switches, field edits and rate refreshes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use balibuddy::logic::ui::{next_tab, previous_tab};
use balibuddy::Tab;

use super::rate::request_refresh;
use crate::App;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => app.model.ui.should_quit = true,
        KeyCode::Char('c') if ctrl => app.model.ui.should_quit = true,

        KeyCode::Char('r') if ctrl => refresh_if_currency(app),
        KeyCode::F(5) => refresh_if_currency(app),

        KeyCode::Left => {
            let tab = previous_tab(app.model.ui.active_tab);
            app.model.ui.select_tab(tab);
        }
        KeyCode::Right => {
            let tab = next_tab(app.model.ui.active_tab);
            app.model.ui.select_tab(tab);
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
            app.model.ui.toggle_focus();
        }

        KeyCode::Char('u') if ctrl => clear_focused(app),
        KeyCode::Delete => clear_focused(app),
        KeyCode::Backspace => {
            let field = app.model.ui.focused_field;
            let outcome = app.model.active_pair_mut().pop_char(field);
            debug!("backspace in {:?}: {:?}", field, outcome);
        }
        KeyCode::Char(ch) if !ctrl && !ch.is_control() => {
            let field = app.model.ui.focused_field;
            let outcome = app.model.active_pair_mut().push_char(field, ch);
            debug!("typed {:?} in {:?}: {:?}", ch, field, outcome);
        }

        _ => {}
    }

    Ok(())
}

fn refresh_if_currency(app: &mut App) {
    if app.model.ui.active_tab == Tab::Currency {
        request_refresh(app);
    }
}

fn clear_focused(app: &mut App) {
    let field = app.model.ui.focused_field;
    app.model.active_pair_mut().clear_field(field);
}
