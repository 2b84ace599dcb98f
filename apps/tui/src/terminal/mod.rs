// Terminal module: raw mode and alternate screen setup and teardown

mod setup;

pub use setup::{cleanup_terminal_state as cleanup, setup_terminal as setup, install_panic_hook};
