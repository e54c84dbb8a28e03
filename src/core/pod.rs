use serde::{Deserialize, Serialize};
use strum::Display;

/// Cloud tier a pod is placed on.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudType {
    #[default]
    #[strum(to_string = "SECURE")]
    Secure,
    #[strum(to_string = "COMMUNITY")]
    Community,
}

/// Desired lifecycle state as reported by the API.
///
/// The API vocabulary is wider than what this tool acts on; anything it
/// does not recognize lands in `Unknown` instead of failing the
/// deserialization of an otherwise useful pod record.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PodStatus {
    #[strum(to_string = "Pending")]
    Pending,
    #[strum(to_string = "Running")]
    Running,
    #[strum(to_string = "Exited")]
    Exited,
    #[strum(to_string = "Terminated")]
    Terminated,
    #[serde(other)]
    #[strum(to_string = "Unknown")]
    Unknown,
}

impl PodStatus {
    /// A pod in one of these states will never come back on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PodStatus::Exited | PodStatus::Terminated)
    }
}

/// A deployed (or still deploying) GPU pod.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub id: String,
    pub name: String,
    pub desired_status: PodStatus,
    /// Absent in the create mutation's echo.
    #[serde(default)]
    pub image_name: Option<String>,
    /// Present once the pod has been scheduled onto a machine.
    #[serde(default)]
    pub runtime: Option<PodRuntime>,
}

impl Pod {
    /// Ready means the pod runs and its ports have been assigned; before
    /// that the proxy URL resolves but answers nothing.
    pub fn is_ready(&self) -> bool {
        self.desired_status == PodStatus::Running
            && self.runtime.as_ref().is_some_and(|r| !r.ports().is_empty())
    }

    /// Public URL of a service listening on `port` inside the pod.
    pub fn proxy_url(&self, port: u16) -> String {
        format!("https://{}-{}.proxy.runpod.net", self.id, port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PodRuntime {
    #[serde(default)]
    pub uptime_in_seconds: u64,
    #[serde(default)]
    pub ports: Option<Vec<PortMapping>>,
}

impl PodRuntime {
    pub fn ports(&self) -> &[PortMapping] {
        self.ports.as_deref().unwrap_or_default()
    }

    /// The mapping to reach sshd from outside, if one was exposed.
    pub fn public_ssh_port(&self) -> Option<&PortMapping> {
        self.ports()
            .iter()
            .find(|p| p.private_port == 22 && p.is_ip_public)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub is_ip_public: bool,
    pub private_port: u16,
    #[serde(default)]
    pub public_port: Option<u16>,
    /// `type` on the wire.
    #[serde(rename = "type", default)]
    pub protocol: Option<String>,
}

/// Request body for the deploy mutation.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeployInput {
    pub name: String,
    pub template_id: String,
    pub gpu_type_id: String,
    pub gpu_count: u32,
    pub cloud_type: CloudType,
    pub network_volume_id: String,
    pub volume_mount_path: String,
}
