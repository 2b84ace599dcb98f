use crate::app::input::helpers::{page, wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_tissue_menu_input(app: &mut App, key: KeyCode) {
    let total_rows = app.menu_tissues().len();

    match key {
        KeyCode::Esc => {
            if app.tissue_query.is_empty() {
                app.screen = AppScreen::Main;
            } else {
                app.tissue_query.clear();
                app.tissue_menu_index = 0;
            }
        }
        KeyCode::Enter => app.toggle_menu_tissue(),
        KeyCode::Char(' ') if app.tissue_query.is_empty() => app.toggle_menu_tissue(),
        KeyCode::Delete => app.clear_tissues(),
        KeyCode::Up => {
            app.tissue_menu_index = wrap_decrement(app.tissue_menu_index, total_rows);
        }
        KeyCode::Down => {
            app.tissue_menu_index = wrap_increment(app.tissue_menu_index, total_rows);
        }
        KeyCode::PageUp => {
            app.tissue_menu_index = page(app.tissue_menu_index, total_rows, false);
        }
        KeyCode::PageDown => {
            app.tissue_menu_index = page(app.tissue_menu_index, total_rows, true);
        }
        KeyCode::Backspace => {
            app.tissue_query.pop();
            app.tissue_menu_index = 0;
        }
        KeyCode::Char(c) => {
            app.tissue_query.push(c);
            app.tissue_menu_index = 0;
        }
        _ => {}
    }
}
