use crate::app::input::helpers::page;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_points_input(app: &mut App, key: KeyCode) {
    let total_rows = app.visible_count();

    match key {
        KeyCode::Esc => {
            app.point_cursor = app.table_index;
            app.screen = AppScreen::Main;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Enter => {
            let point = app
                .store
                .visible()
                .get(app.table_index)
                .map(|visible| visible.point.clone());
            app.pin_point(point);
        }
        KeyCode::Char('u') => app.unpin(),
        KeyCode::Char('e') => app.export_visible(),
        KeyCode::Up => {
            app.table_index = app.table_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.table_index + 1 < total_rows {
                app.table_index += 1;
            }
        }
        KeyCode::PageUp => {
            app.table_index = page(app.table_index, total_rows, false);
        }
        KeyCode::PageDown => {
            app.table_index = page(app.table_index, total_rows, true);
        }
        KeyCode::Home => {
            app.table_index = 0;
        }
        KeyCode::End => {
            app.table_index = total_rows.saturating_sub(1);
        }
        _ => {}
    }
}
