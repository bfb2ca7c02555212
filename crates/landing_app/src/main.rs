use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::engine_info;
use landing_app::{logging, ui, AppConfig, Cli, Session};

fn main() -> Result<()> {
    let config = AppConfig::from_cli(Cli::parse()).context("invalid configuration")?;
    logging::initialize(config.log_destination, config.log_level, &config.log_file);
    engine_info!(
        "Starting with generate={} retrieve={}",
        config.service.generate_url,
        config.service.retrieve_url
    );

    let mut session = Session::from_config(&config).context("failed to start the engine")?;
    match &config.one_shot {
        Some(request) => ui::run_one_shot(&mut session, request),
        None => ui::run_interactive(&mut session),
    }
}
