// HTTP task transport
// REST calls against the hosted service: create, fetch, create-then-poll
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use edison_core::application::{PollDecision, PollPolicy};
use edison_core::domain::{ApiKey, TaskDescription, TaskId, TaskResult, TaskStatus};
use edison_core::port::{SystemTimeProvider, TaskTransport, TimeProvider, TransportError};

use crate::config::HttpTransportConfig;
use crate::response::{network_error, read_json};

const CREATE_PATH: &str = "v0.1/crows";
const TRAJECTORIES_PATH: &str = "v0.1/trajectories/";

/// Fields that may carry the id in a create response, in lookup order
const ID_FIELDS: [&str; 3] = ["trajectory_id", "task_id", "id"];

/// HTTP Task Transport
pub struct HttpTaskTransport {
    http: reqwest::Client,
    config: HttpTransportConfig,
    poll: PollPolicy,
}

impl HttpTaskTransport {
    /// Create a transport authenticated with `api_key`
    pub fn new(api_key: &ApiKey, config: HttpTransportConfig) -> Result<Self, TransportError> {
        Self::with_time_provider(api_key, config, Arc::new(SystemTimeProvider))
    }

    /// Same as `new`, with an injected clock for the poll deadline
    pub fn with_time_provider(
        api_key: &ApiKey,
        config: HttpTransportConfig,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self, TransportError> {
        let http = build_http_client(Some(api_key), &config)?;
        let poll = PollPolicy::new(config.poll.clone(), time_provider);
        Ok(Self { http, config, poll })
    }

    fn task_url(&self, task_id: &TaskId) -> Result<Url, TransportError> {
        let mut url = self.config.endpoint(TRAJECTORIES_PATH)?;
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidRequest("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(task_id.as_str());
        Ok(url)
    }
}

/// reqwest client with auth + JSON headers
pub(crate) fn build_http_client(
    api_key: Option<&ApiKey>,
    config: &HttpTransportConfig,
) -> Result<reqwest::Client, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(api_key) = api_key {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose()))
            .map_err(|_| TransportError::InvalidRequest("API key contains invalid header characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout)
        .danger_accept_invalid_certs(!config.verify_ssl)
        .build()
        .map_err(|e| TransportError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))
}

/// Pull the task id out of a create response
///
/// Empty ids are rejected: an empty path segment would address the
/// trajectory collection instead of one task.
fn extract_task_id(body: &Value) -> Result<TaskId, TransportError> {
    let non_empty = |id: &str| !id.trim().is_empty();
    let id = match body {
        Value::String(id) => Some(id.as_str()).filter(|id| non_empty(id)),
        _ => ID_FIELDS.iter().find_map(|field| {
            body.get(*field)
                .and_then(Value::as_str)
                .filter(|id| non_empty(id))
        }),
    };
    id.map(TaskId::from)
        .ok_or_else(|| TransportError::Decode(format!("Create response has no task id: {}", body)))
}

#[async_trait]
impl TaskTransport for HttpTaskTransport {
    async fn run_until_done(&self, task: &TaskDescription) -> Result<TaskResult, TransportError> {
        let task_id = self.create_task(task).await?;
        let started_at = self.poll.now_millis();
        let mut attempt = 0;

        loop {
            let result = self.get_task(&task_id).await?;

            match result.status() {
                None | Some(TaskStatus::Success) => {
                    info!(task_id = %task_id, attempts = attempt + 1, "Task finished");
                    return Ok(result);
                }
                Some(status @ (TaskStatus::Failed | TaskStatus::Cancelled)) => {
                    return Err(TransportError::TaskFailed {
                        task_id,
                        status,
                        result,
                    });
                }
                Some(status) => {
                    debug!(task_id = %task_id, status = %status, "Task not finished yet");
                }
            }

            match self.poll.decide(&task_id, attempt, started_at) {
                PollDecision::Wait(delay_ms) => {
                    tokio::time::sleep(Duration::from_millis(delay_ms.max(0) as u64)).await;
                }
                PollDecision::GiveUp { waited_ms } => {
                    return Err(TransportError::Timeout { task_id, waited_ms });
                }
            }
            attempt += 1;
        }
    }

    async fn create_task(&self, task: &TaskDescription) -> Result<TaskId, TransportError> {
        let url = self.config.endpoint(CREATE_PATH)?;
        debug!(url = %url, task = %task.name(), "POST task");

        let response = self
            .http
            .post(url)
            .json(task)
            .send()
            .await
            .map_err(network_error)?;

        let body = read_json(response).await?;
        extract_task_id(&body)
    }

    async fn get_task(&self, task_id: &TaskId) -> Result<TaskResult, TransportError> {
        let url = self.task_url(task_id)?;
        debug!(url = %url, "GET task");

        let response = self.http.get(url).send().await.map_err(network_error)?;
        read_json(response).await.map(TaskResult::new)
    }
}
