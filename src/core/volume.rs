use serde::{Deserialize, Serialize};

/// A persistent network volume on the account.
///
/// Pods deploy into the volume's data center, so resolving a volume by
/// name pins both the storage and the placement of every pod started on
/// top of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkVolume {
    pub id: String,
    pub name: String,
    /// Size in GB.
    pub size: u64,
    pub data_center_id: String,
}
