//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, PAGE_SCROLL_SIZE};
use crate::models::WorldSortColumn;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Help overlay swallows everything except its dismiss keys
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.state = AppState::Normal;
        }
        return false;
    }

    if matches!(app.state, AppState::Searching) {
        handle_search_input(app, key);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('r') => {
            app.refresh();
        }
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
            app.search_query.clear();
            app.selection = 0;
        }
        KeyCode::Esc => {
            app.search_query.clear();
            app.selection = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(1),
        KeyCode::PageUp => app.move_selection_up(PAGE_SCROLL_SIZE),
        KeyCode::PageDown => app.move_selection_down(PAGE_SCROLL_SIZE),
        KeyCode::Home => app.selection = 0,
        KeyCode::End => {
            app.selection = app.get_sorted_worlds().len().saturating_sub(1);
        }
        // Sort columns
        KeyCode::Char('n') => app.toggle_sort(WorldSortColumn::Name),
        KeyCode::Char('v') => app.toggle_sort(WorldSortColumn::Visits),
        KeyCode::Char('f') => app.toggle_sort(WorldSortColumn::Favorites),
        KeyCode::Char('d') => app.toggle_sort(WorldSortColumn::Updated),
        _ => {}
    }

    false
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.search_query.clear();
        }
        KeyCode::Enter => {
            // Keep search query active
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            // Reset selection when search changes
            app.selection = 0;
        }
        _ => {}
    }
}
