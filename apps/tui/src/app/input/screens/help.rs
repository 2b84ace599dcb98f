use crate::app::state::App;
use crossterm::event::KeyCode;

/// F1 toggles the help popup; while it is open every other key is swallowed
/// and Esc closes it.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}
