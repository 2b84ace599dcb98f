// Event module: the terminal event loop and the headless runner

mod loop_handler;

pub use loop_handler::{run, run_headless};
