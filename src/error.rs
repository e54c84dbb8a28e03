use crate::core::pod::PodStatus;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the RunPod API client.
///
/// Every failure is terminal for the invocation; the CLI reports the
/// message and exits non-zero, while library embeddings can match on the
/// variant instead.
#[derive(Error, Debug)]
pub enum Error {
    /// No credential was configured.
    #[error("RunPod API key is not set (set api.key in podup.toml or export RUNPOD_API_KEY)")]
    MissingApiKey,

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body carried a GraphQL `errors` list.
    #[error("GraphQL errors: {0}")]
    GraphQL(String),

    /// A success response without a `data` payload.
    #[error("GraphQL response contained no data")]
    MissingData,

    /// No volume with the requested name exists on the account.
    #[error("volume '{name}' not found; available volumes: {}", volume_names(.available))]
    VolumeNotFound { name: String, available: Vec<String> },

    #[error("pod {0} not found")]
    PodNotFound(String),

    /// The pod reached a dead state while we were waiting for it to start.
    #[error("pod {id} entered state {status} before becoming ready")]
    PodFailed { id: String, status: PodStatus },

    #[error("timed out after {0:?} waiting for pod to become ready")]
    Timeout(Duration),
}

fn volume_names(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_not_found_lists_alternatives() {
        let err = Error::VolumeNotFound {
            name: "ai-models-storage".to_string(),
            available: vec!["scratch".to_string(), "datasets".to_string()],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("ai-models-storage"));
        assert!(rendered.contains("scratch, datasets"));
    }

    #[test]
    fn volume_not_found_with_empty_account() {
        let err = Error::VolumeNotFound {
            name: "models".to_string(),
            available: vec![],
        };
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn pod_failed_names_the_state() {
        let err = Error::PodFailed {
            id: "abc123".to_string(),
            status: PodStatus::Exited,
        };
        assert!(err.to_string().contains("Exited"));
    }
}
