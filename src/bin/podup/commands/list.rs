use anyhow::{Context, Result};
use podup::client::Client;
use podup::config::Config;
use podup::utils::format_duration;
use std::time::Duration;
use tabled::{builder::Builder, settings::style::Style};

use crate::commands::render_status;

pub(crate) async fn handle_list(config: &Config) -> Result<()> {
    let client = Client::build(config).context("Failed to build API client")?;
    let pods = client.list_pods().await?;

    if pods.is_empty() {
        println!("No pods found.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Status", "Uptime", "Image"]);

    for pod in pods {
        let uptime = pod
            .runtime
            .as_ref()
            .map(|r| format_duration(Duration::from_secs(r.uptime_in_seconds)))
            .unwrap_or_else(|| "-".to_string());

        builder.push_record([
            pod.id.clone(),
            pod.name.clone(),
            render_status(pod.desired_status),
            uptime,
            pod.image_name.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    let table = builder.build().with(Style::rounded()).to_string();
    println!("{}", table);

    Ok(())
}
