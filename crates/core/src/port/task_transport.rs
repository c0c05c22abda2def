// Task Transport Port
// Abstraction over the component that actually talks to the remote service
// (auth headers, HTTP, create/poll). The client core only forwards to it.

use crate::domain::{TaskDescription, TaskId, TaskResult, TaskStatus};
use async_trait::async_trait;
use thiserror::Error;

/// Transport errors (surfaced to callers unchanged)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("HTTP {status} for {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
        /// First 200 chars of the response body
        body_snippet: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Task {task_id} finished with status {status}")]
    TaskFailed {
        task_id: TaskId,
        status: TaskStatus,
        result: TaskResult,
    },

    #[error("Task {task_id} not finished after {waited_ms}ms")]
    Timeout { task_id: TaskId, waited_ms: i64 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// True when the service reported the resource (e.g. a task id) as unknown
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::Http { status: 404, .. })
    }

    /// True when the service rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TransportError::Http { status: 401 | 403, .. })
    }
}

/// Task Transport trait
///
/// Implementations:
/// - HttpTaskTransport (edison-infra-http): REST calls against the hosted service
/// - mocks::InMemoryTransport: scripted responses for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskTransport: Send + Sync {
    /// Submit a task and wait until the service reports a terminal status
    ///
    /// # Errors
    /// - TransportError::TaskFailed if the task ends failed or cancelled
    /// - TransportError::Timeout if the transport's wait budget runs out
    async fn run_until_done(&self, task: &TaskDescription) -> Result<TaskResult, TransportError>;

    /// Submit a task without waiting for completion
    async fn create_task(&self, task: &TaskDescription) -> Result<TaskId, TransportError>;

    /// Fetch the current state of a task once (no polling)
    async fn get_task(&self, task_id: &TaskId) -> Result<TaskResult, TransportError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Mock transport behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Every call succeeds; run/get return this body
        Respond(Value),
        /// Every call fails with this error
        Fail(TransportError),
    }

    /// In-memory transport with call recording
    ///
    /// `create_task` hands out ids `task-1`, `task-2`, ...; `get_task` walks
    /// through the configured progress script for that id and then keeps
    /// returning the last entry. Unknown ids yield HTTP 404.
    pub struct InMemoryTransport {
        behavior: MockBehavior,
        progress: Vec<Value>,
        submitted: Mutex<Vec<TaskDescription>>,
        tasks: Mutex<HashMap<TaskId, VecDeque<Value>>>,
        call_count: Mutex<usize>,
    }

    impl InMemoryTransport {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                progress: Vec::new(),
                submitted: Mutex::new(Vec::new()),
                tasks: Mutex::new(HashMap::new()),
                call_count: Mutex::new(0),
            }
        }

        pub fn new_responding(body: Value) -> Self {
            Self::new(MockBehavior::Respond(body))
        }

        pub fn new_failing(error: TransportError) -> Self {
            Self::new(MockBehavior::Fail(error))
        }

        /// Bodies returned by successive `get_task` calls before the final one
        pub fn with_progress(mut self, progress: Vec<Value>) -> Self {
            self.progress = progress;
            self
        }

        /// Descriptions received by run/create, in call order
        pub fn submitted(&self) -> Vec<TaskDescription> {
            self.submitted.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }

        fn record(&self, task: Option<&TaskDescription>) {
            *self.call_count.lock().unwrap() += 1;
            if let Some(task) = task {
                self.submitted.lock().unwrap().push(task.clone());
            }
        }

        fn body(&self) -> Result<Value, TransportError> {
            match &self.behavior {
                MockBehavior::Respond(body) => Ok(body.clone()),
                MockBehavior::Fail(err) => Err(err.clone()),
            }
        }
    }

    #[async_trait]
    impl TaskTransport for InMemoryTransport {
        async fn run_until_done(
            &self,
            task: &TaskDescription,
        ) -> Result<TaskResult, TransportError> {
            self.record(Some(task));
            self.body().map(TaskResult::new)
        }

        async fn create_task(&self, task: &TaskDescription) -> Result<TaskId, TransportError> {
            self.record(Some(task));
            let body = self.body()?;

            let mut tasks = self.tasks.lock().unwrap();
            let task_id = TaskId::new(format!("task-{}", tasks.len() + 1));
            let mut script: VecDeque<Value> = self.progress.iter().cloned().collect();
            script.push_back(body);
            tasks.insert(task_id.clone(), script);

            Ok(task_id)
        }

        async fn get_task(&self, task_id: &TaskId) -> Result<TaskResult, TransportError> {
            self.record(None);
            if let MockBehavior::Fail(err) = &self.behavior {
                return Err(err.clone());
            }

            let mut tasks = self.tasks.lock().unwrap();
            let Some(script) = tasks.get_mut(task_id) else {
                return Err(TransportError::Http {
                    status: 404,
                    url: format!("mem://trajectories/{}", task_id),
                    message: "Not Found".to_string(),
                    body_snippet: Some(json!({"detail": "task not found"}).to_string()),
                });
            };

            let body = if script.len() > 1 {
                script.pop_front().unwrap_or_default()
            } else {
                script.front().cloned().unwrap_or_default()
            };
            Ok(TaskResult::new(body))
        }
    }
}
