//! Edison Platform SDK - Rust Client Library
//!
//! Submits scientific research tasks (literature search, precedent search,
//! data analysis, chemistry) to the Edison platform and returns the service's
//! responses unchanged.
//!
//! The async [`EdisonPlatformClient`] is the core; [`blocking::EdisonPlatformClient`]
//! wraps it for synchronous callers.
//!
//! # Example
//!
//! ```no_run
//! use edison_platform::EdisonPlatformClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads EDISON_API_KEY when no key is passed
//!     let client = EdisonPlatformClient::new(None)?;
//!
//!     let result = client
//!         .literature_search("Which neglected diseases had a treatment developed by AI?")
//!         .await?;
//!
//!     println!("{}", result.as_value());
//!
//!     Ok(())
//! }
//! ```

pub mod blocking;
mod client;

pub use client::{ClientBuilder, EdisonPlatformClient};

pub use edison_core::application::PollConfig;
pub use edison_core::domain::{
    ApiKey, DomainError, JobKind, TaskDescription, TaskId, TaskResult, TaskStatus,
};
pub use edison_core::error::{ClientError, Result};
pub use edison_core::port::{EnvKeySource, KeySource, TaskTransport, TransportError, API_KEY_ENV};
pub use edison_infra_http::HttpTransportConfig;

/// Extra fields for `analyze_data` / `chemistry_task`
pub type Fields = serde_json::Map<String, serde_json::Value>;
