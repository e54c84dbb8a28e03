use owo_colors::OwoColorize;
use podup::config::Config;
use podup::core::pod::PodStatus;

use crate::cli::Commands;

mod completions;
mod gpus;
mod list;
mod start;
mod status;
mod stop;
mod volumes;

pub async fn handle_commands(config: &Config, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Start(start_args) => start::handle_start(config, start_args).await,
        Commands::Status(status_args) => status::handle_status(config, status_args).await,
        Commands::Stop(stop_args) => stop::handle_stop(config, stop_args).await,
        Commands::List => list::handle_list(config).await,
        Commands::Volumes => volumes::handle_volumes(config).await,
        Commands::Gpus(gpus_args) => gpus::handle_gpus(config, gpus_args).await,
        Commands::Completions(completions_args) => {
            completions::handle_completions(completions_args)
        }
    }
}

pub(crate) fn render_status(status: PodStatus) -> String {
    let rendered = status.to_string();
    match status {
        PodStatus::Running => rendered.green().to_string(),
        PodStatus::Exited | PodStatus::Terminated => rendered.red().to_string(),
        PodStatus::Pending | PodStatus::Unknown => rendered.yellow().to_string(),
    }
}
