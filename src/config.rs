use crate::core::get_config_dir;
use crate::core::pod::CloudType;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub gpus: GpusConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiConfig {
    /// GraphQL endpoint; overridable so tests can point at a local server.
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Bearer credential. When unset, RUNPOD_API_KEY is consulted.
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DeployConfig {
    #[serde(default = "default_pod_name")]
    pub name: String,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    /// Network volume looked up by name at deploy time.
    #[serde(default = "default_volume")]
    pub volume: String,
    #[serde(default = "default_gpu_type_id")]
    pub gpu_type_id: String,
    #[serde(default = "default_gpu_count")]
    pub gpu_count: u32,
    #[serde(default)]
    pub cloud_type: CloudType,
    #[serde(default = "default_volume_mount_path")]
    pub volume_mount_path: String,
    /// Container port the proxy URL is derived for.
    #[serde(default = "default_service_port")]
    pub service_port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PollConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_poll_timeout_secs")]
    pub timeout_secs: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GpusConfig {
    #[serde(default = "default_min_memory_gb")]
    pub min_memory_gb: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            key: None,
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            name: default_pod_name(),
            template_id: default_template_id(),
            volume: default_volume(),
            gpu_type_id: default_gpu_type_id(),
            gpu_count: default_gpu_count(),
            cloud_type: CloudType::default(),
            volume_mount_path: default_volume_mount_path(),
            service_port: default_service_port(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
            timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl Default for GpusConfig {
    fn default() -> Self {
        Self {
            min_memory_gb: default_min_memory_gb(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.runpod.io/graphql".to_string()
}

fn default_pod_name() -> String {
    "InfiniteTalk-Auto".to_string()
}

fn default_template_id() -> String {
    "t2payckvn7".to_string()
}

fn default_volume() -> String {
    "ai-models-storage".to_string()
}

fn default_gpu_type_id() -> String {
    "NVIDIA GeForce RTX 4090".to_string()
}

fn default_gpu_count() -> u32 {
    1
}

fn default_volume_mount_path() -> String {
    "/workspace".to_string()
}

fn default_service_port() -> u16 {
    8188
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_poll_timeout_secs() -> u64 {
    300
}

fn default_min_memory_gb() -> u32 {
    16
}

pub fn load_config(config_path: Option<&PathBuf>) -> Result<Config, config::ConfigError> {
    let mut config_vec = vec![];

    // Default config file first so a user-provided one overrides it
    if let Ok(default_config_path) = get_config_dir().map(|d| d.join("podup.toml")) {
        if default_config_path.exists() {
            config_vec.push(default_config_path);
        }
    }

    if let Some(config_path) = config_path {
        if config_path.exists() {
            config_vec.push(config_path.clone());
        } else {
            eprintln!("Warning: Config file {config_path:?} not found.");
        }
    }

    let settings = config::Config::builder();
    let settings = config_vec.iter().fold(settings, |s, path| {
        s.add_source(config::File::from(path.as_path()))
    });

    let mut config: Config = settings
        .add_source(
            config::Environment::with_prefix("PODUP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    // The credential the original deployment scripts already use
    if config.api.key.is_none() {
        config.api.key = std::env::var("RUNPOD_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_deployment_setup() {
        let config = Config::default();
        assert_eq!(config.api.url, "https://api.runpod.io/graphql");
        assert_eq!(config.deploy.volume, "ai-models-storage");
        assert_eq!(config.deploy.template_id, "t2payckvn7");
        assert_eq!(config.deploy.gpu_type_id, "NVIDIA GeForce RTX 4090");
        assert_eq!(config.deploy.gpu_count, 1);
        assert_eq!(config.deploy.cloud_type, CloudType::Secure);
        assert_eq!(config.deploy.volume_mount_path, "/workspace");
        assert_eq!(config.deploy.service_port, 8188);
        assert_eq!(config.poll.interval(), Duration::from_secs(10));
        assert_eq!(config.poll.timeout(), Duration::from_secs(300));
        assert_eq!(config.gpus.min_memory_gb, 16);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[api]
key = "rpa_test"

[deploy]
volume = "scratch"
gpu_count = 2

[poll]
timeout_secs = 60
"#
        )
        .unwrap();

        let config = load_config(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.key.as_deref(), Some("rpa_test"));
        assert_eq!(config.deploy.volume, "scratch");
        assert_eq!(config.deploy.gpu_count, 2);
        // Untouched keys fall back to defaults
        assert_eq!(config.deploy.template_id, "t2payckvn7");
        assert_eq!(config.poll.timeout(), Duration::from_secs(60));
        assert_eq!(config.poll.interval(), Duration::from_secs(10));
    }

    #[test]
    fn missing_explicit_file_still_loads() {
        let path = PathBuf::from("/nonexistent/podup.toml");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.deploy.volume, "ai-models-storage");
    }

    #[test]
    fn cloud_type_parses_from_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[deploy]
cloud_type = "COMMUNITY"
"#
        )
        .unwrap();

        let config = load_config(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.deploy.cloud_type, CloudType::Community);
    }
}
