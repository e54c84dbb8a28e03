mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Podup::parse();

    let level = LevelFilter::from(args.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("podup={level}"))),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = podup::config::load_config(args.config.as_ref())?;
    commands::handle_commands(&config, args.command).await
}
