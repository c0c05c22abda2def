// Application Layer - Client use cases

pub mod client;
pub mod credentials;
pub mod poll;

// Re-exports
pub use client::{convenience_task, PlatformClient};
pub use credentials::{resolve_api_key, MISSING_KEY_MESSAGE};
pub use poll::{PollConfig, PollDecision, PollPolicy};
