// Domain Layer - Task vocabulary shared by every crate

pub mod api_key;
pub mod error;
pub mod job;
pub mod task;

// Re-exports
pub use api_key::ApiKey;
pub use error::DomainError;
pub use job::JobKind;
pub use task::{TaskDescription, TaskId, TaskResult, TaskStatus, NAME_FIELD};
