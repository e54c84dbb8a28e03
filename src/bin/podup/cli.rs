use clap::Parser;
use clap_complete::Shell;
use podup::core::version;
use podup::utils::STYLES;

#[derive(Debug, Parser)]
#[command(
    name = "podup",
    author,
    version = version(),
    about = "Start, inspect and stop RunPod GPU pods backed by a network volume.",
    styles = STYLES
)]
pub struct Podup {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[arg(long, global = true, help = "Path to the config file")]
    pub config: Option<std::path::PathBuf>,
}

#[derive(Debug, Parser)]
pub enum Commands {
    /// Deploy a pod on the configured volume and wait for it to come up
    #[command(alias = "up")]
    Start(StartArgs),
    /// Show the status of a pod, including the raw API record
    Status(StatusArgs),
    /// Terminate a pod
    #[command(alias = "down")]
    Stop(StopArgs),
    /// List all pods on the account
    #[command(alias = "ls")]
    List,
    /// List the account's network volumes
    Volumes,
    /// Show secure-cloud GPU availability and pricing
    Gpus(GpusArgs),
    /// Generate tab-completion scripts for your shell
    Completions(CompletionsArgs),
}

#[derive(Debug, Parser)]
pub struct StartArgs {
    /// Name for the new pod
    #[arg(long)]
    pub name: Option<String>,

    /// Network volume to deploy on, by name
    #[arg(long)]
    pub volume: Option<String>,

    /// Deployment template id
    #[arg(long)]
    pub template: Option<String>,

    /// GPU type id, e.g. "NVIDIA GeForce RTX 4090"
    #[arg(long)]
    pub gpu_type: Option<String>,

    /// Number of GPUs to request
    #[arg(long)]
    pub gpu_count: Option<u32>,

    /// Seconds to wait for the pod to become ready
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Return right after the deploy call instead of waiting
    #[arg(long)]
    pub detach: bool,
}

#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// The id of the pod to inspect
    pub id: String,
}

#[derive(Debug, Parser)]
pub struct StopArgs {
    /// The id of the pod to terminate
    pub id: String,
}

#[derive(Debug, Parser)]
pub struct GpusArgs {
    /// Minimum GPU memory in GB
    #[arg(long)]
    pub min_memory: Option<u32>,
}

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// The shell to generate the completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_with_overrides() {
        let args = Podup::try_parse_from([
            "podup", "start", "--gpu-type", "NVIDIA A40", "--gpu-count", "2", "--timeout", "120",
        ])
        .expect("start with overrides should parse");

        match args.command {
            Commands::Start(start) => {
                assert_eq!(start.gpu_type.as_deref(), Some("NVIDIA A40"));
                assert_eq!(start.gpu_count, Some(2));
                assert_eq!(start.timeout, Some(120));
                assert!(start.volume.is_none());
                assert!(!start.detach);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn up_is_an_alias_for_start() {
        let args = Podup::try_parse_from(["podup", "up", "--detach"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Start(StartArgs { detach: true, .. })
        ));
    }

    #[test]
    fn status_requires_a_pod_id() {
        assert!(Podup::try_parse_from(["podup", "status"]).is_err());
        let args = Podup::try_parse_from(["podup", "status", "abc123xyz"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Status(StatusArgs { ref id }) if id == "abc123xyz"
        ));
    }

    #[test]
    fn unknown_subcommands_are_rejected() {
        assert!(Podup::try_parse_from(["podup", "hibernate"]).is_err());
        assert!(Podup::try_parse_from(["podup"]).is_err());
    }

    #[test]
    fn global_config_flag_is_accepted_anywhere() {
        let args = Podup::try_parse_from(["podup", "list", "--config", "/tmp/podup.toml"]).unwrap();
        assert_eq!(
            args.config.as_deref(),
            Some(std::path::Path::new("/tmp/podup.toml"))
        );
    }
}
