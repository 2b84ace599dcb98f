use clap::Parser;
use color_eyre::Result;
use essentiality_map::app::{App, AppActions};
use essentiality_map::cli::CliArgs;
use essentiality_map::config::init_app_config;
use essentiality_map::{event, logging, terminal};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let headless = args.headless || !is_terminal();
    logging::init_logging(&config, headless)?;
    info!(api_url = %config.api_url, headless, "starting essentiality map");

    let actions = AppActions::from_config(&config)?;

    if headless {
        return event::run_headless(&actions, &args, &config.default_gene_id).await;
    }

    let mut app = App::new(actions, &config.default_gene_id);

    terminal::install_panic_hook();
    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app).await;

    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
