//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;

use super::home::{HomeFocus, LINE_SCROLL_PX};
use super::state::{AppState, Route};

/// Process a key event, dispatching based on the active route.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.route {
        Route::Home => handle_home_key(state, key),
        Route::Search { .. } => handle_search_key(state, key),
        Route::Thread(_) => handle_thread_key(state, key),
    }
}

// ── Home view ───────────────────────────────────────────────────

fn handle_home_key(state: &mut AppState, key: KeyEvent) {
    let prompt_focused = state
        .home
        .as_ref()
        .is_some_and(|h| h.focus == HomeFocus::Prompt);
    if prompt_focused {
        handle_prompt_key(state, key);
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    if action == Action::Quit {
        state.should_quit = true;
        return;
    }
    if action == Action::Open {
        let selected = state.home.as_ref().and_then(|h| h.selected);
        if let Some(index) = selected {
            state.open_thread(index);
        }
        return;
    }

    let Some(home) = state.home.as_mut() else {
        return;
    };
    match action {
        Action::ScrollUp => {
            home.scroll_by(-LINE_SCROLL_PX);
        }
        Action::ScrollDown => {
            home.scroll_by(LINE_SCROLL_PX);
        }
        Action::PageUp => {
            home.page(false);
        }
        Action::PageDown => {
            home.page(true);
        }
        Action::PrevThread => home.select_prev(),
        Action::NextThread => home.select_next(),
        Action::FocusSearch => home.focus = HomeFocus::Prompt,
        Action::Back => home.selected = None,
        Action::Open | Action::Quit => {}
    }
}

/// Typed keys while the search prompt has focus.  Bindings are bypassed so
/// letters reach the input.
fn handle_prompt_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        state.submit_search();
        return;
    }
    let Some(home) = state.home.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => home.focus = HomeFocus::Feed,
        KeyCode::Backspace => home.input.backspace(),
        KeyCode::Delete => home.input.delete(),
        KeyCode::Left => home.input.left(),
        KeyCode::Right => home.input.right(),
        KeyCode::Home => home.input.home(),
        KeyCode::End => home.input.end(),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            home.input.insert(c);
        }
        _ => {}
    }
}

// ── Search view ─────────────────────────────────────────────────

fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    let Route::Search { results, selected, .. } = &mut state.route else {
        return;
    };
    match key.code {
        KeyCode::Esc => state.go_home(),
        KeyCode::Up | KeyCode::Char('k') => {
            *selected = selected.map(|i| i.saturating_sub(1));
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if !results.is_empty() {
                *selected = Some(selected.map_or(0, |i| (i + 1).min(results.len() - 1)));
            }
        }
        KeyCode::Enter => {
            if let Some(index) = selected.and_then(|i| results.get(i).copied()) {
                state.open_thread(index);
            }
        }
        KeyCode::Char('q') => state.should_quit = true,
        _ => {}
    }
}

// ── Thread view ─────────────────────────────────────────────────

fn handle_thread_key(state: &mut AppState, key: KeyEvent) {
    match state.config.match_key(key) {
        Some(Action::Back) => state.go_home(),
        Some(Action::Quit) => state.should_quit = true,
        _ => {
            if key.code == KeyCode::Backspace {
                state.go_home();
            }
        }
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.route != Route::Home {
        return;
    }
    let body = state.body_area();
    let Some(home) = state.home.as_mut() else {
        return;
    };

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            home.scroll_by(LINE_SCROLL_PX);
        }
        MouseEventKind::ScrollUp => {
            home.scroll_by(-LINE_SCROLL_PX);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row < body.y || mouse.row >= body.y + body.height {
                return;
            }
            let hit = home.thread_at(mouse.row - body.y);
            match hit {
                Some(index) if home.selected == Some(index) => state.open_thread(index),
                Some(index) => home.selected = Some(index),
                None => home.focus = HomeFocus::Feed,
            }
        }
        _ => {}
    }
}
