// Platform Client - async core of the task submission contract

use crate::application::credentials::resolve_api_key;
use crate::domain::{ApiKey, JobKind, TaskDescription, TaskId, TaskResult};
use crate::error::Result;
use crate::port::{KeySource, TaskTransport, TransportError};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Platform Client (async)
///
/// Holds the resolved API key and forwards every call to the injected
/// transport. Performs no retries, timeouts or caching of its own; transport
/// errors come back unchanged inside `ClientError::Transport`.
#[derive(Clone)]
pub struct PlatformClient {
    api_key: ApiKey,
    transport: Arc<dyn TaskTransport>,
}

impl PlatformClient {
    /// Create a client from an already resolved key
    pub fn new(api_key: ApiKey, transport: Arc<dyn TaskTransport>) -> Self {
        Self { api_key, transport }
    }

    /// Resolve the key, then build the transport with it
    ///
    /// `make_transport` only runs once a key has been found, so a missing
    /// key fails before any transport (and any network I/O) exists.
    pub fn try_new<F>(
        explicit: Option<&str>,
        key_source: &dyn KeySource,
        make_transport: F,
    ) -> Result<Self>
    where
        F: FnOnce(&ApiKey) -> std::result::Result<Arc<dyn TaskTransport>, TransportError>,
    {
        let api_key = resolve_api_key(explicit, key_source)?;
        let transport = make_transport(&api_key)?;
        Ok(Self::new(api_key, transport))
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Run a task until the service reports completion
    pub async fn run_task(&self, task: &TaskDescription) -> Result<TaskResult> {
        info!(task = %task.name(), "Running task");
        match self.transport.run_until_done(task).await {
            Ok(result) => {
                info!(task = %task.name(), "Task completed successfully");
                Ok(result)
            }
            Err(e) => {
                error!(task = %task.name(), error = %e, "Error running task");
                Err(e.into())
            }
        }
    }

    /// Submit a task without waiting; returns its identifier
    pub async fn create_task(&self, task: &TaskDescription) -> Result<TaskId> {
        info!(task = %task.name(), "Creating task");
        match self.transport.create_task(task).await {
            Ok(task_id) => {
                info!(task = %task.name(), task_id = %task_id, "Task created");
                Ok(task_id)
            }
            Err(e) => {
                error!(task = %task.name(), error = %e, "Error creating task");
                Err(e.into())
            }
        }
    }

    /// Fetch a task's current status/result once
    ///
    /// A task that is still running comes back as a result whose status is
    /// not terminal; this never polls.
    pub async fn get_task(&self, task_id: &TaskId) -> Result<TaskResult> {
        info!(task_id = %task_id, "Retrieving task");
        match self.transport.get_task(task_id).await {
            Ok(result) => {
                info!(task_id = %task_id, "Task retrieved");
                Ok(result)
            }
            Err(e) => {
                error!(task_id = %task_id, error = %e, "Error retrieving task");
                Err(e.into())
            }
        }
    }

    /// Literature search: `{name: LITERATURE, query}`
    pub async fn literature_search(&self, query: impl Into<String>) -> Result<TaskResult> {
        let task = convenience_task(JobKind::Literature, query, Map::new());
        self.run_task(&task).await
    }

    /// Precedent search: `{name: PRECEDENT, query}`
    pub async fn precedent_search(&self, query: impl Into<String>) -> Result<TaskResult> {
        let task = convenience_task(JobKind::Precedent, query, Map::new());
        self.run_task(&task).await
    }

    /// Data analysis: `{name: ANALYSIS, dataset, ...extra}`
    pub async fn analyze_data(
        &self,
        dataset: impl Into<String>,
        extra: Map<String, Value>,
    ) -> Result<TaskResult> {
        let task = convenience_task(JobKind::Analysis, dataset, extra);
        self.run_task(&task).await
    }

    /// Chemistry / molecular task: `{name: MOLECULES, query, ...extra}`
    pub async fn chemistry_task(
        &self,
        query: impl Into<String>,
        extra: Map<String, Value>,
    ) -> Result<TaskResult> {
        let task = convenience_task(JobKind::Molecules, query, extra);
        self.run_task(&task).await
    }
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

/// Build the description a convenience method sends
///
/// Extra fields are merged last, so they may replace the primary field.
/// `name` always stays the kind's; an extra `name` is dropped with a warning.
pub fn convenience_task(
    kind: JobKind,
    primary: impl Into<String>,
    extra: Map<String, Value>,
) -> TaskDescription {
    let mut task = TaskDescription::new(kind).with_field(kind.primary_field(), primary.into());
    let skipped = task.merge_extra(extra);
    if !skipped.is_empty() {
        warn!(task = %kind, fields = ?skipped, "Ignoring extra fields that would change the job kind");
    }
    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::task_transport::MockTaskTransport;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn key() -> ApiKey {
        ApiKey::new("test_key").unwrap()
    }

    fn client(mock: MockTaskTransport) -> PlatformClient {
        PlatformClient::new(key(), Arc::new(mock))
    }

    #[tokio::test]
    async fn test_run_task_returns_body_unchanged() {
        let body = json!({"answer": "A", "citations": ["doi:1", "doi:2"]});
        let returned = body.clone();

        let mut mock = MockTaskTransport::new();
        mock.expect_run_until_done()
            .withf(|task| task.clone().into_value() == json!({"name": "LITERATURE", "query": "Q"}))
            .times(1)
            .returning(move |_| Ok(TaskResult::new(returned.clone())));

        let task = TaskDescription::new(JobKind::Literature).with_field("query", "Q");
        let result = assert_ok!(client(mock).run_task(&task).await);
        assert_eq!(result.into_value(), body);
    }

    #[tokio::test]
    async fn test_run_task_propagates_transport_error() {
        let original = TransportError::Http {
            status: 401,
            url: "https://api.example/v0.1/crows".to_string(),
            message: "Unauthorized".to_string(),
            body_snippet: None,
        };
        let thrown = original.clone();

        let mut mock = MockTaskTransport::new();
        mock.expect_run_until_done()
            .returning(move |_| Err(thrown.clone()));

        let task = TaskDescription::new(JobKind::Precedent).with_field("query", "Q");
        let err = assert_err!(client(mock).run_task(&task).await);

        assert!(!err.is_config());
        assert_eq!(err.as_transport(), Some(&original));
        assert_eq!(err.to_string(), original.to_string());
    }

    #[tokio::test]
    async fn test_create_and_get_forward_identifiers() {
        let mut mock = MockTaskTransport::new();
        mock.expect_create_task()
            .times(1)
            .returning(|_| Ok(TaskId::new("task_123")));
        mock.expect_get_task()
            .withf(|id| id.as_str() == "task_123")
            .times(1)
            .returning(|_| Ok(TaskResult::new(json!({"status": "in progress"}))));

        let client = client(mock);
        let task = TaskDescription::new(JobKind::Analysis).with_field("dataset", "d1");

        let task_id = client.create_task(&task).await.unwrap();
        assert_eq!(task_id.as_str(), "task_123");

        let result = client.get_task(&task_id).await.unwrap();
        assert!(!result.status().unwrap().is_terminal());
    }

    #[tokio::test]
    async fn test_convenience_methods_send_canonical_descriptions() {
        let cases: Vec<(JobKind, Value)> = vec![
            (JobKind::Literature, json!({"name": "LITERATURE", "query": "lit"})),
            (JobKind::Precedent, json!({"name": "PRECEDENT", "query": "prec"})),
            (
                JobKind::Analysis,
                json!({"name": "ANALYSIS", "dataset": "dataset_1", "analysis_type": "differential"}),
            ),
            (
                JobKind::Molecules,
                json!({"name": "MOLECULES", "query": "design molecule", "target": "protein_x"}),
            ),
        ];

        for (kind, expected) in cases {
            let mut mock = MockTaskTransport::new();
            let wanted = expected.clone();
            mock.expect_run_until_done()
                .withf(move |task| task.clone().into_value() == wanted)
                .times(1)
                .returning(|_| Ok(TaskResult::new(json!({"ok": true}))));
            let client = client(mock);

            let result = match kind {
                JobKind::Literature => client.literature_search("lit").await,
                JobKind::Precedent => client.precedent_search("prec").await,
                JobKind::Analysis => {
                    let mut extra = Map::new();
                    extra.insert("analysis_type".into(), json!("differential"));
                    client.analyze_data("dataset_1", extra).await
                }
                JobKind::Molecules => {
                    let mut extra = Map::new();
                    extra.insert("target".into(), json!("protein_x"));
                    client.chemistry_task("design molecule", extra).await
                }
            };
            assert_eq!(result.unwrap().into_value(), json!({"ok": true}), "{}", kind);
        }
    }

    #[test]
    fn test_convenience_task_extras_win_except_name() {
        let mut extra = Map::new();
        extra.insert("name".into(), json!("LITERATURE"));
        extra.insert("dataset".into(), json!("other"));
        extra.insert("metadata".into(), json!({"priority": "high"}));

        let task = convenience_task(JobKind::Analysis, "dataset_1", extra);

        assert_eq!(
            task.into_value(),
            json!({"name": "ANALYSIS", "dataset": "other", "metadata": {"priority": "high"}})
        );
    }

    #[test]
    fn test_try_new_without_key_never_builds_transport() {
        let no_key = || None::<String>;
        let mut built = false;

        let err = PlatformClient::try_new(None, &no_key, |_| {
            built = true;
            Ok(Arc::new(MockTaskTransport::new()) as Arc<dyn TaskTransport>)
        })
        .unwrap_err();

        assert!(err.is_config());
        assert!(!built);
    }

    #[test]
    fn test_try_new_passes_resolved_key_to_transport() {
        let env_key = || Some("env_test_key".to_string());
        let client = PlatformClient::try_new(None, &env_key, |key| {
            assert_eq!(key.expose(), "env_test_key");
            Ok(Arc::new(MockTaskTransport::new()) as Arc<dyn TaskTransport>)
        })
        .unwrap();

        assert_eq!(client.api_key().expose(), "env_test_key");
        assert!(!format!("{:?}", client).contains("env_test_key"));
    }
}
