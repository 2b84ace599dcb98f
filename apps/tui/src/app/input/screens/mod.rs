use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod help;
mod main;
mod points;
mod tissues;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Main => main::handle_main_input(app, key),
        AppScreen::Tissues => tissues::handle_tissue_menu_input(app, key),
        AppScreen::Points => points::handle_points_input(app, key),
    }
}
