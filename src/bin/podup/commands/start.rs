use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use podup::client::Client;
use podup::config::Config;
use podup::core::pod::DeployInput;
use podup::utils::format_duration;
use std::time::Duration;

use crate::cli::StartArgs;

pub(crate) async fn handle_start(config: &Config, args: StartArgs) -> Result<()> {
    let client = Client::build(config).context("Failed to build API client")?;

    let volume_name = args.volume.as_deref().unwrap_or(&config.deploy.volume);
    let volume = client.resolve_volume(volume_name).await?;
    println!("📦 Found volume: {} (ID: {})", volume.name, volume.id);
    println!("📍 Data center: {}", volume.data_center_id);

    let input = DeployInput {
        name: args.name.unwrap_or_else(|| config.deploy.name.clone()),
        template_id: args
            .template
            .unwrap_or_else(|| config.deploy.template_id.clone()),
        gpu_type_id: args
            .gpu_type
            .unwrap_or_else(|| config.deploy.gpu_type_id.clone()),
        gpu_count: args.gpu_count.unwrap_or(config.deploy.gpu_count),
        cloud_type: config.deploy.cloud_type,
        network_volume_id: volume.id,
        volume_mount_path: config.deploy.volume_mount_path.clone(),
    };

    let pod = client
        .create_pod(&input)
        .await
        .context("Failed to create pod")?;
    println!("✅ Pod created!");
    println!("   ID:     {}", pod.id);
    println!("   Name:   {}", pod.name);
    println!("   Status: {}", pod.desired_status);

    if args.detach {
        println!();
        println!("💡 Run `podup status {}` to follow it", pod.id);
        return Ok(());
    }

    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll.timeout());

    println!();
    println!("⏳ Waiting for pod to become ready...");
    let pod = client
        .wait_until_ready(&pod.id, timeout, config.poll.interval())
        .await?;

    println!();
    println!("{}", "✅ Pod is ready!".green().bold());
    println!("   🌐 Service: {}", pod.proxy_url(config.deploy.service_port));
    if let Some(runtime) = &pod.runtime {
        if let Some(ssh) = runtime.public_ssh_port() {
            if let (Some(ip), Some(port)) = (&ssh.ip, ssh.public_port) {
                println!("   🔑 SSH: ssh root@{ip} -p {port}");
            }
        }
        println!(
            "   ⏱️  Uptime: {}",
            format_duration(Duration::from_secs(runtime.uptime_in_seconds))
        );
    }

    Ok(())
}
