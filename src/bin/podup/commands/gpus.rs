use anyhow::{Context, Result};
use podup::client::Client;
use podup::config::Config;
use podup::core::gpu::secure_offers;
use tabled::{builder::Builder, settings::style::Style};

use crate::cli::GpusArgs;

pub(crate) async fn handle_gpus(config: &Config, args: GpusArgs) -> Result<()> {
    let client = Client::build(config).context("Failed to build API client")?;
    let min_memory = args.min_memory.unwrap_or(config.gpus.min_memory_gb);

    println!("🔍 Secure-cloud GPUs with at least {min_memory} GB of memory:");
    let gpu_types = client.list_gpu_types().await?;
    let offers = secure_offers(gpu_types, min_memory);

    if offers.is_empty() {
        println!("No matching GPU types found.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "VRAM", "Price/hr"]);

    for offer in offers {
        builder.push_record([
            offer.id,
            offer.name,
            format!("{} GB", offer.memory_gb),
            offer
                .price
                .map(|price| format!("${price:.2}"))
                .unwrap_or_else(|| "N/A".to_string()),
        ]);
    }

    let table = builder.build().with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}
