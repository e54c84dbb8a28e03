use anyhow::{Context, Result};
use podup::client::Client;
use podup::config::Config;
use tabled::{builder::Builder, settings::style::Style};

pub(crate) async fn handle_volumes(config: &Config) -> Result<()> {
    let client = Client::build(config).context("Failed to build API client")?;
    let volumes = client.list_volumes().await?;

    if volumes.is_empty() {
        println!("No network volumes found.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Size", "Data center"]);

    for volume in volumes {
        builder.push_record([
            volume.id,
            volume.name,
            format!("{} GB", volume.size),
            volume.data_center_id,
        ]);
    }

    let table = builder.build().with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}
