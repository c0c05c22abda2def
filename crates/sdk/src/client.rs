//! Edison Platform Client Implementation

use crate::Fields;
use edison_core::domain::{ApiKey, TaskDescription, TaskId, TaskResult};
use edison_core::error::{ClientError, Result};
use edison_core::port::{EnvKeySource, KeySource, TaskTransport};
use edison_core::PlatformClient;
use edison_infra_http::{HttpTaskTransport, HttpTransportConfig};
use std::sync::Arc;

/// Edison Platform Client
///
/// Provides a high-level async interface to the Edison platform.
///
/// # Example
///
/// ```no_run
/// use edison_platform::EdisonPlatformClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = EdisonPlatformClient::new(Some("your_key"))?;
/// let result = client
///     .precedent_search("Has anyone used CRISPR to cure sickle cell anemia?")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct EdisonPlatformClient {
    inner: PlatformClient,
}

impl EdisonPlatformClient {
    /// Create a client talking to the hosted service
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key, sent exactly as given; when `None` or blank,
    ///   `EDISON_API_KEY` is read
    ///
    /// # Errors
    ///
    /// `ClientError::Config` if no key is found, or the transport settings
    /// read from the environment are invalid.
    pub fn new(api_key: Option<&str>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Wrap an existing key and transport (e.g. a test double)
    pub fn with_transport(api_key: ApiKey, transport: Arc<dyn TaskTransport>) -> Self {
        Self {
            inner: PlatformClient::new(api_key, transport),
        }
    }

    pub fn api_key(&self) -> &ApiKey {
        self.inner.api_key()
    }

    /// Run a task until completion
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use edison_platform::{EdisonPlatformClient, JobKind, TaskDescription};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = EdisonPlatformClient::new(None)?;
    /// let task = TaskDescription::new(JobKind::Literature)
    ///     .with_field("query", "What are the latest treatments for diabetes?");
    /// let response = client.run_task(&task).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_task(&self, task: &TaskDescription) -> Result<TaskResult> {
        self.inner.run_task(task).await
    }

    /// Submit a task and return its id without waiting
    pub async fn create_task(&self, task: &TaskDescription) -> Result<TaskId> {
        self.inner.create_task(task).await
    }

    /// Fetch a task's status and results once
    pub async fn get_task(&self, task_id: &TaskId) -> Result<TaskResult> {
        self.inner.get_task(task_id).await
    }

    pub async fn literature_search(&self, query: impl Into<String>) -> Result<TaskResult> {
        self.inner.literature_search(query).await
    }

    pub async fn precedent_search(&self, query: impl Into<String>) -> Result<TaskResult> {
        self.inner.precedent_search(query).await
    }

    /// # Arguments
    ///
    /// * `dataset` - Dataset identifier
    /// * `extra` - Additional analysis parameters (e.g. `analysis_type`)
    pub async fn analyze_data(
        &self,
        dataset: impl Into<String>,
        extra: Fields,
    ) -> Result<TaskResult> {
        self.inner.analyze_data(dataset, extra).await
    }

    pub async fn chemistry_task(
        &self,
        query: impl Into<String>,
        extra: Fields,
    ) -> Result<TaskResult> {
        self.inner.chemistry_task(query, extra).await
    }
}

/// Builder for [`EdisonPlatformClient`]
pub struct ClientBuilder {
    api_key: Option<String>,
    key_source: Box<dyn KeySource>,
    config: Option<HttpTransportConfig>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            key_source: Box::new(EnvKeySource::default()),
            config: None,
        }
    }
}

impl ClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Where to look for a key when none is set explicitly
    pub fn key_source(mut self, key_source: impl KeySource + 'static) -> Self {
        self.key_source = Box::new(key_source);
        self
    }

    /// Transport settings; defaults to `HttpTransportConfig::from_env()`
    pub fn config(mut self, config: HttpTransportConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<EdisonPlatformClient> {
        let config = self.config;
        let inner = PlatformClient::try_new(
            self.api_key.as_deref(),
            &*self.key_source,
            |api_key| {
                let config = match config {
                    Some(config) => config,
                    None => HttpTransportConfig::from_env()?,
                };
                let transport = HttpTaskTransport::new(api_key, config)?;
                Ok(Arc::new(transport) as Arc<dyn TaskTransport>)
            },
        )
        .map_err(|e| match e {
            // Anything failing while wiring the transport is a setup problem
            ClientError::Transport(err) => ClientError::Config(err.to_string()),
            other => other,
        })?;

        Ok(EdisonPlatformClient { inner })
    }

    /// Build the synchronous adapter
    pub fn build_blocking(self) -> Result<crate::blocking::EdisonPlatformClient> {
        crate::blocking::EdisonPlatformClient::from_async(self.build()?)
    }
}
