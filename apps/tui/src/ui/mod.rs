// UI module for the essentiality map
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Main => screens::main::render_main(app, f),
        AppScreen::Tissues => screens::tissues::render_tissue_menu(app, f),
        AppScreen::Points => screens::points::render_points_view(app, f),
    }

    if app.show_help {
        let area = f.area();
        screens::help::render_help_popup(f, area);
    }
}
