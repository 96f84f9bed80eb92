mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers::{self, RunOptions};
use waqt::config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::config_path()?,
    };
    let mut config = AppConfig::load_from(&config_path).context("Loading config")?;

    if let Some(dir) = cli.cache_dir.clone() {
        config.cache.dir = Some(dir);
    }

    let opts = RunOptions {
        mosque: cli.mosque,
        file: cli.file,
        at: cli.at,
    };

    match cli.command {
        Some(Commands::Init { reset }) => handlers::handle_init(&config_path, reset)?,
        Some(Commands::Times) | None => handlers::handle_times(&config, &opts)?,
        Some(Commands::Next) => handlers::handle_next(&config, &opts)?,
        Some(Commands::Summary) => handlers::handle_summary(&config, &opts)?,
        Some(Commands::Mosques) => handlers::handle_mosques(&config)?,
        Some(Commands::Cache { action }) => handlers::handle_cache(&config, &opts, &action)?,
    }

    Ok(())
}
