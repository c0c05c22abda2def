//! Blocking adapter over the async client
//!
//! Each call drives the async core to completion on a private
//! current-thread runtime, so results and errors are identical to the
//! async methods.
//!
//! # Panics
//!
//! Like other blocking adapters built on Tokio, methods panic when called
//! from inside an async runtime. Use the async client there.

use crate::Fields;
use edison_core::domain::{ApiKey, TaskDescription, TaskId, TaskResult};
use edison_core::error::Result;
use edison_core::port::TaskTransport;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Synchronous Edison Platform Client
///
/// # Example
///
/// ```no_run
/// use edison_platform::blocking::EdisonPlatformClient;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = EdisonPlatformClient::new(None)?;
/// let result = client.literature_search(
///     "Which neglected diseases had a treatment developed by artificial intelligence?",
/// )?;
/// println!("{}", result.as_value());
/// # Ok(())
/// # }
/// ```
pub struct EdisonPlatformClient {
    inner: crate::EdisonPlatformClient,
    runtime: Runtime,
}

impl EdisonPlatformClient {
    /// See [`crate::EdisonPlatformClient::new`]
    pub fn new(api_key: Option<&str>) -> Result<Self> {
        Self::from_async(crate::EdisonPlatformClient::new(api_key)?)
    }

    /// Wrap an async client
    ///
    /// # Errors
    ///
    /// `ClientError::Runtime` if the runtime cannot be created.
    pub fn from_async(inner: crate::EdisonPlatformClient) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    pub fn with_transport(api_key: ApiKey, transport: Arc<dyn TaskTransport>) -> Result<Self> {
        Self::from_async(crate::EdisonPlatformClient::with_transport(api_key, transport))
    }

    pub fn api_key(&self) -> &ApiKey {
        self.inner.api_key()
    }

    /// The wrapped async client
    pub fn inner(&self) -> &crate::EdisonPlatformClient {
        &self.inner
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Run a task until completion, blocking the calling thread
    pub fn run_task(&self, task: &TaskDescription) -> Result<TaskResult> {
        self.block_on(self.inner.run_task(task))
    }

    pub fn create_task(&self, task: &TaskDescription) -> Result<TaskId> {
        self.block_on(self.inner.create_task(task))
    }

    pub fn get_task(&self, task_id: &TaskId) -> Result<TaskResult> {
        self.block_on(self.inner.get_task(task_id))
    }

    pub fn literature_search(&self, query: impl Into<String>) -> Result<TaskResult> {
        self.block_on(self.inner.literature_search(query))
    }

    pub fn precedent_search(&self, query: impl Into<String>) -> Result<TaskResult> {
        self.block_on(self.inner.precedent_search(query))
    }

    pub fn analyze_data(&self, dataset: impl Into<String>, extra: Fields) -> Result<TaskResult> {
        self.block_on(self.inner.analyze_data(dataset, extra))
    }

    pub fn chemistry_task(&self, query: impl Into<String>, extra: Fields) -> Result<TaskResult> {
        self.block_on(self.inner.chemistry_task(query, extra))
    }
}

impl std::fmt::Debug for EdisonPlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::EdisonPlatformClient")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
