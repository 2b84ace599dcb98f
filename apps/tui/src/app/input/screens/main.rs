use crate::app::state::{App, AppScreen, InputState};
use crate::domain::Category;
use crossterm::event::KeyCode;

pub fn handle_main_input(app: &mut App, key: KeyCode) {
    match app.input_state {
        InputState::Browsing => handle_browsing(app, key),
        InputState::EditingGene => handle_gene_input(app, key),
        InputState::EditingSearch => handle_search_input(app, key),
    }
}

fn handle_browsing(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('g') => {
            app.current_input.clear();
            app.input_state = InputState::EditingGene;
        }
        KeyCode::Char('/') => {
            app.input_state = InputState::EditingSearch;
        }
        KeyCode::Tab => app.cycle_search_field(),
        KeyCode::Char('t') => {
            app.tissue_menu_index = 0;
            app.tissue_query.clear();
            app.screen = AppScreen::Tissues;
        }
        KeyCode::Char('c') => app.clear_tissues(),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            if let Some(category) = Category::from_index(index) {
                app.toggle_category(category);
            }
        }
        KeyCode::Char('x') => app.toggle_context(),
        KeyCode::Left => app.move_cursor(false),
        KeyCode::Right => app.move_cursor(true),
        KeyCode::Enter => {
            let point = app.cursor_point();
            app.pin_point(point);
        }
        KeyCode::Char('u') => app.unpin(),
        KeyCode::Char('l') => {
            app.table_index = app.point_cursor;
            app.screen = AppScreen::Points;
        }
        KeyCode::Char('e') => app.export_visible(),
        KeyCode::Char('<') => app.resize_side_panel(false),
        KeyCode::Char('>') => app.resize_side_panel(true),
        _ => {}
    }
}

fn handle_gene_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.current_input.push(c),
        KeyCode::Backspace => {
            app.current_input.pop();
        }
        KeyCode::Enter => app.submit_gene(),
        KeyCode::Esc => {
            app.current_input = app.store.gene_id().unwrap_or_default().to_string();
            app.input_state = InputState::Browsing;
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.push_search_char(c),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Tab => app.cycle_search_field(),
        KeyCode::Enter | KeyCode::Esc => {
            app.input_state = InputState::Browsing;
        }
        _ => {}
    }
}
