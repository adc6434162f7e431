mod cli;
mod commands;
mod config;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use commands::RunOptions;
use config::WeekplanConfig;
use std::io;
use weekplan::{
    models::WeekId, services::PlannerServiceImpl, FileKeyValueStore, KeyValueActivityStore,
    KeyValueGoals,
};

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Commands::ConfigPath = cli.command {
        return commands::config_path(&mut io::stdout());
    }

    let mut config = WeekplanConfig::load().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_tracing(&config.log_level);

    let kv = FileKeyValueStore::new(&config.data_dir);
    tracing::debug!(data_dir = %kv.root().display(), "Using data directory");
    let mut planner = PlannerServiceImpl::new(
        KeyValueActivityStore::new(kv.clone()),
        KeyValueGoals::new(kv),
    );

    let options = RunOptions {
        current_week: WeekId::current(),
        show_goals: config.show_goals,
    };
    commands::run(
        &mut planner,
        cli.command,
        &options,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    )
}
