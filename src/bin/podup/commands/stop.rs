use anyhow::{Context, Result};
use podup::client::Client;
use podup::config::Config;

use crate::cli::StopArgs;

pub(crate) async fn handle_stop(config: &Config, args: StopArgs) -> Result<()> {
    let client = Client::build(config).context("Failed to build API client")?;
    client
        .terminate_pod(&args.id)
        .await
        .context("Failed to terminate pod")?;
    println!("🛑 Pod {} terminated.", args.id);
    Ok(())
}
