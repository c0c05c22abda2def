// Port Layer - Interfaces for external dependencies

pub mod key_source;
pub mod task_transport;
pub mod time_provider;

// Re-exports
pub use key_source::{EnvKeySource, KeySource, API_KEY_ENV};
pub use task_transport::{TaskTransport, TransportError};
pub use time_provider::{ManualTimeProvider, SystemTimeProvider, TimeProvider};
