use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::gpu::GpuType;
use crate::core::pod::{DeployInput, Pod};
use crate::core::volume::NetworkVolume;
use crate::error::Error;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Authenticated client for the RunPod GraphQL API.
///
/// One method per wire document; the two multi-call operations
/// ([`resolve_volume`](Client::resolve_volume) and
/// [`wait_until_ready`](Client::wait_until_ready)) are built on them.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct GraphQLRequest<V: Serialize> {
    query: &'static str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Serialize)]
struct NoVariables {}

impl Client {
    pub fn build(config: &Config) -> Result<Self, Error> {
        let key = config
            .api
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        crate::tls::ensure_rustls_provider_installed();

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| Error::Config("API key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api.url.clone(),
        })
    }

    /// POST one GraphQL document and unwrap the `data` payload.
    ///
    /// A non-empty `errors` list is fatal regardless of the HTTP status;
    /// the API reports bad credentials and malformed input that way under
    /// a 200.
    async fn execute<V: Serialize, R: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: V,
    ) -> Result<R, Error> {
        let request = GraphQLRequest { query, variables };
        debug!(endpoint = %self.endpoint, "Sending GraphQL request");

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: GraphQLResponse<R> = response.json().await?;
        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                return Err(Error::GraphQL(messages.join(", ")));
            }
        }

        body.data.ok_or(Error::MissingData)
    }

    /// All network volumes on the account.
    pub async fn list_volumes(&self) -> Result<Vec<NetworkVolume>, Error> {
        #[derive(Deserialize)]
        struct Response {
            myself: Myself,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Myself {
            network_volumes: Vec<NetworkVolume>,
        }

        const QUERY: &str = r"
            query NetworkVolumes {
                myself {
                    networkVolumes {
                        id
                        name
                        size
                        dataCenterId
                    }
                }
            }
        ";

        let response: Response = self.execute(QUERY, NoVariables {}).await?;
        Ok(response.myself.network_volumes)
    }

    /// Look up a volume by exact name.
    pub async fn resolve_volume(&self, name: &str) -> Result<NetworkVolume, Error> {
        let mut volumes = self.list_volumes().await?;

        if let Some(index) = volumes.iter().position(|v| v.name == name) {
            let volume = volumes.swap_remove(index);
            debug!(
                volume_id = %volume.id,
                data_center = %volume.data_center_id,
                "Resolved volume"
            );
            Ok(volume)
        } else {
            Err(Error::VolumeNotFound {
                name: name.to_string(),
                available: volumes.into_iter().map(|v| v.name).collect(),
            })
        }
    }

    /// The full GPU type listing with secure-cloud and on-demand pricing.
    pub async fn list_gpu_types(&self) -> Result<Vec<GpuType>, Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            gpu_types: Vec<GpuType>,
        }

        const QUERY: &str = r"
            query GpuTypes {
                gpuTypes {
                    id
                    displayName
                    memoryInGb
                    secureCloud
                    communityCloud
                    securePrice
                    lowestPrice(input: { gpuCount: 1 }) {
                        minimumBidPrice
                        uninterruptablePrice
                    }
                }
            }
        ";

        let response: Response = self.execute(QUERY, NoVariables {}).await?;
        Ok(response.gpu_types)
    }

    /// Deploy a pod on demand. The echo carries no runtime yet.
    pub async fn create_pod(&self, input: &DeployInput) -> Result<Pod, Error> {
        #[derive(Serialize)]
        struct Variables<'a> {
            input: &'a DeployInput,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            pod_find_and_deploy_on_demand: Pod,
        }

        const MUTATION: &str = r"
            mutation DeployPod($input: PodFindAndDeployOnDemandInput!) {
                podFindAndDeployOnDemand(input: $input) {
                    id
                    name
                    desiredStatus
                    imageName
                }
            }
        ";

        info!(name = %input.name, gpu_type = %input.gpu_type_id, "Creating pod");
        let response: Response = self.execute(MUTATION, Variables { input }).await?;
        let pod = response.pod_find_and_deploy_on_demand;
        info!(pod_id = %pod.id, status = %pod.desired_status, "Pod created");
        Ok(pod)
    }

    /// Fetch one pod with its runtime info. A null record is
    /// [`Error::PodNotFound`].
    pub async fn pod_status(&self, pod_id: &str) -> Result<Pod, Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Variables<'a> {
            pod_id: &'a str,
        }
        #[derive(Deserialize)]
        struct Response {
            pod: Option<Pod>,
        }

        const QUERY: &str = r"
            query Pod($podId: String!) {
                pod(input: { podId: $podId }) {
                    id
                    name
                    desiredStatus
                    imageName
                    runtime {
                        uptimeInSeconds
                        ports {
                            ip
                            isIpPublic
                            privatePort
                            publicPort
                            type
                        }
                    }
                }
            }
        ";

        let response: Response = self.execute(QUERY, Variables { pod_id }).await?;
        response
            .pod
            .ok_or_else(|| Error::PodNotFound(pod_id.to_string()))
    }

    /// All pods on the account, running or not.
    pub async fn list_pods(&self) -> Result<Vec<Pod>, Error> {
        #[derive(Deserialize)]
        struct Response {
            myself: Myself,
        }
        #[derive(Deserialize)]
        struct Myself {
            pods: Vec<Pod>,
        }

        const QUERY: &str = r"
            query Pods {
                myself {
                    pods {
                        id
                        name
                        desiredStatus
                        imageName
                        runtime {
                            uptimeInSeconds
                            ports {
                                ip
                                isIpPublic
                                privatePort
                                publicPort
                                type
                            }
                        }
                    }
                }
            }
        ";

        let response: Response = self.execute(QUERY, NoVariables {}).await?;
        Ok(response.myself.pods)
    }

    pub async fn terminate_pod(&self, pod_id: &str) -> Result<(), Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Variables<'a> {
            pod_id: &'a str,
        }
        // The mutation returns a null payload on success.
        #[derive(Deserialize)]
        struct Response {}

        const MUTATION: &str = r"
            mutation TerminatePod($podId: String!) {
                podTerminate(input: { podId: $podId })
            }
        ";

        info!(pod_id = %pod_id, "Terminating pod");
        let _: Response = self.execute(MUTATION, Variables { pod_id }).await?;
        Ok(())
    }

    /// Poll `pod_status` every `interval` until the pod is ready, the
    /// pod dies, or `timeout` worth of polls is spent.
    ///
    /// The budget buys exactly `timeout / interval` polls (minimum one);
    /// polling comes first, sleeping only between attempts.
    pub async fn wait_until_ready(
        &self,
        pod_id: &str,
        timeout: Duration,
        interval: Duration,
    ) -> Result<Pod, Error> {
        let max_polls = (timeout.as_millis() / interval.as_millis().max(1)).max(1) as u64;
        info!(pod_id = %pod_id, ?timeout, ?interval, "Waiting for pod to become ready");

        for poll in 1..=max_polls {
            let pod = self.pod_status(pod_id).await?;

            if pod.is_ready() {
                info!(pod_id = %pod_id, polls = poll, "Pod is ready");
                return Ok(pod);
            }
            if pod.desired_status.is_terminal() {
                return Err(Error::PodFailed {
                    id: pod_id.to_string(),
                    status: pod.desired_status,
                });
            }

            debug!(
                pod_id = %pod_id,
                status = %pod.desired_status,
                poll,
                max_polls,
                "Pod not ready yet"
            );
            if poll < max_polls {
                tokio::time::sleep(interval).await;
            }
        }

        Err(Error::Timeout(timeout))
    }
}
