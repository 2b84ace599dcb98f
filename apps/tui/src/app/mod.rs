// App module for the essentiality map
// Session state, input handling and side-effecting actions

pub mod actions;
pub mod input;
pub mod state;
pub mod store;

pub use actions::{fetch_dataset, AppActions};
pub use input::handle_input;
pub use state::{App, AppScreen, InputState};
pub use store::SessionStore;
