use anyhow::{Context, Result};
use podup::client::Client;
use podup::config::Config;
use podup::utils::format_duration;
use std::time::Duration;

use crate::cli::StatusArgs;
use crate::commands::render_status;

pub(crate) async fn handle_status(config: &Config, args: StatusArgs) -> Result<()> {
    let client = Client::build(config).context("Failed to build API client")?;
    let pod = client.pod_status(&args.id).await?;

    println!(
        "Pod {} ({}) is {}",
        pod.name,
        pod.id,
        render_status(pod.desired_status)
    );
    if let Some(runtime) = &pod.runtime {
        println!(
            "Uptime: {}",
            format_duration(Duration::from_secs(runtime.uptime_in_seconds))
        );
        println!("Service: {}", pod.proxy_url(config.deploy.service_port));
    }

    let record =
        serde_json::to_string_pretty(&pod).context("Failed to render the pod record")?;
    println!("{record}");

    Ok(())
}
