// Task Domain Model
//
// TaskDescription / TaskId / TaskResult are thin wrappers: the remote service
// owns the schema, so nothing beyond the `name` field is validated here.

use crate::domain::error::{DomainError, Result};
use crate::domain::job::JobKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::warn;

/// Key identifying the job kind inside a task description
pub const NAME_FIELD: &str = "name";

/// Task description: JSON object with a required `name` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Value", try_from = "Value")]
pub struct TaskDescription(Map<String, Value>);

impl TaskDescription {
    /// Create a description for a job kind with no other fields
    pub fn new(kind: JobKind) -> Self {
        let mut fields = Map::new();
        fields.insert(NAME_FIELD.to_string(), Value::String(kind.as_str().to_string()));
        Self(fields)
    }

    /// Builder-style field setter
    ///
    /// A rejected field (see [`TaskDescription::insert`]) is logged and the
    /// description is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use edison_core::domain::{JobKind, TaskDescription};
    ///
    /// let task = TaskDescription::new(JobKind::Literature)
    ///     .with_field("query", "Which neglected diseases had a treatment developed by AI?");
    /// assert_eq!(task.name(), "LITERATURE");
    /// ```
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Err(e) = self.insert(key, value) {
            warn!(error = %e, "Ignoring task field");
        }
        self
    }

    /// Insert a field, returning the previous value.
    ///
    /// Inserting `name` replaces the job kind.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidTaskDescription` if `name` is not a non-empty string.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let key = key.into();
        let value = value.into();
        if key == NAME_FIELD {
            match value.as_str() {
                Some(name) if !name.trim().is_empty() => {}
                _ => {
                    return Err(DomainError::InvalidTaskDescription(format!(
                        "`name` must be a non-empty string, got {}",
                        value
                    )))
                }
            }
        }
        Ok(self.0.insert(key, value))
    }

    /// Merge extra fields, later values winning over existing ones.
    ///
    /// `name` is never replaced; returns the keys that were skipped.
    pub fn merge_extra(&mut self, extra: Map<String, Value>) -> Vec<String> {
        let mut skipped = Vec::new();
        for (key, value) in extra {
            if key == NAME_FIELD {
                skipped.push(key);
            } else {
                self.0.insert(key, value);
            }
        }
        skipped
    }

    /// Job kind name exactly as it will be sent
    pub fn name(&self) -> &str {
        self.0
            .get(NAME_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Parsed job kind, if `name` is one of the known kinds
    pub fn kind(&self) -> Option<JobKind> {
        self.name().parse().ok()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for TaskDescription {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(DomainError::InvalidTaskDescription(
                "task description must be a JSON object".to_string(),
            ));
        };

        match fields.get(NAME_FIELD) {
            Some(Value::String(name)) if !name.trim().is_empty() => Ok(Self(fields)),
            Some(Value::String(_)) => Err(DomainError::InvalidTaskDescription(
                "`name` must not be empty".to_string(),
            )),
            Some(_) => Err(DomainError::InvalidTaskDescription(
                "`name` must be a string".to_string(),
            )),
            None => Err(DomainError::InvalidTaskDescription(
                "missing required field `name`".to_string(),
            )),
        }
    }
}

/// Parse a JSON document, e.g. `{"name":"LITERATURE","query":"..."}`
impl FromStr for TaskDescription {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| DomainError::InvalidTaskDescription(format!("invalid JSON: {}", e)))?;
        Self::try_from(value)
    }
}

impl From<TaskDescription> for Value {
    fn from(task: TaskDescription) -> Self {
        task.into_value()
    }
}

/// Task identifier returned by task creation (opaque)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Task result as returned by the remote service (opaque, passed through)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskResult(Value);

impl TaskResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Remote lifecycle status, read from a top-level `status` string
    pub fn status(&self) -> Option<TaskStatus> {
        self.0
            .get("status")
            .and_then(Value::as_str)
            .map(TaskStatus::parse)
    }
}

impl From<Value> for TaskResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Remote task lifecycle status (created -> running -> completed/failed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Queued,
    Running,
    Success,
    Failed,
    Cancelled,
    Unknown(String),
}

impl TaskStatus {
    /// Parse a status string reported by the service
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "queued" | "pending" | "created" => TaskStatus::Queued,
            "running" | "in progress" | "in_progress" => TaskStatus::Running,
            "success" | "succeeded" | "completed" | "done" => TaskStatus::Success,
            "fail" | "failed" | "error" => TaskStatus::Failed,
            "cancelled" | "canceled" => TaskStatus::Cancelled,
            _ => TaskStatus::Unknown(raw.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Success | TaskStatus::Failed | TaskStatus::Cancelled
        )
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Queued => write!(f, "QUEUED"),
            TaskStatus::Running => write!(f, "RUNNING"),
            TaskStatus::Success => write!(f, "SUCCESS"),
            TaskStatus::Failed => write!(f, "FAILED"),
            TaskStatus::Cancelled => write!(f, "CANCELLED"),
            TaskStatus::Unknown(raw) => write!(f, "UNKNOWN({})", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_sets_name() {
        let task = TaskDescription::new(JobKind::Precedent).with_field("query", "q");
        assert_eq!(task.name(), "PRECEDENT");
        assert_eq!(task.kind(), Some(JobKind::Precedent));
        assert_eq!(task.into_value(), json!({"name": "PRECEDENT", "query": "q"}));
    }

    #[test]
    fn test_try_from_requires_name() {
        let err = TaskDescription::try_from(json!({"query": "q"})).unwrap_err();
        assert!(err.to_string().contains("missing required field"));

        let err = TaskDescription::try_from(json!({"name": 7})).unwrap_err();
        assert!(err.to_string().contains("must be a string"));

        let err = TaskDescription::try_from(json!(["LITERATURE"])).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn test_try_from_keeps_unknown_names_and_fields() {
        let task =
            TaskDescription::try_from(json!({"name": "CUSTOM", "query": "q", "n": 3})).unwrap();
        assert_eq!(task.name(), "CUSTOM");
        assert_eq!(task.kind(), None);
        assert_eq!(task.get("n"), Some(&json!(3)));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TaskDescription =
            serde_json::from_str(r#"{"name":"ANALYSIS","dataset":"d1"}"#).unwrap();
        assert_eq!(ok.kind(), Some(JobKind::Analysis));

        let bad = serde_json::from_str::<TaskDescription>(r#"{"dataset":"d1"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_merge_extra_overrides_everything_but_name() {
        let mut task = TaskDescription::new(JobKind::Molecules).with_field("query", "design");
        let mut extra = Map::new();
        extra.insert("name".to_string(), json!("LITERATURE"));
        extra.insert("query".to_string(), json!("other"));
        extra.insert("target".to_string(), json!("protein_x"));

        let skipped = task.merge_extra(extra);

        assert_eq!(skipped, vec!["name".to_string()]);
        assert_eq!(task.fields().len(), 3);
        assert_eq!(
            task.into_value(),
            json!({"name": "MOLECULES", "query": "other", "target": "protein_x"})
        );
    }

    #[test]
    fn test_insert_rejects_invalid_name() {
        let mut task = TaskDescription::new(JobKind::Literature);

        assert!(matches!(
            task.insert("name", 5),
            Err(DomainError::InvalidTaskDescription(_))
        ));
        assert!(task.insert("name", "  ").is_err());
        assert_eq!(task.name(), "LITERATURE");

        assert_eq!(task.insert("query", "q").unwrap(), None);
        assert_eq!(task.insert("query", "q2").unwrap(), Some(json!("q")));
        assert_eq!(
            task.insert("name", "PRECEDENT").unwrap(),
            Some(json!("LITERATURE"))
        );
        assert_eq!(task.kind(), Some(JobKind::Precedent));
    }

    #[test]
    fn test_with_field_keeps_kind_on_invalid_name() {
        let task = TaskDescription::new(JobKind::Analysis).with_field("name", json!(null));
        assert_eq!(task.name(), "ANALYSIS");
    }

    #[test]
    fn test_from_str() {
        let task: TaskDescription = r#"{"name":"LITERATURE","query":"q"}"#.parse().unwrap();
        assert_eq!(task.kind(), Some(JobKind::Literature));

        let err = "not json".parse::<TaskDescription>().unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
        assert!("{}".parse::<TaskDescription>().is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(TaskStatus::parse("in progress"), TaskStatus::Running);
        assert_eq!(TaskStatus::parse("SUCCESS"), TaskStatus::Success);
        assert_eq!(TaskStatus::parse("fail"), TaskStatus::Failed);
        assert_eq!(TaskStatus::parse("canceled"), TaskStatus::Cancelled);
        assert_eq!(
            TaskStatus::parse("paused"),
            TaskStatus::Unknown("paused".to_string())
        );
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Queued.is_terminal());
    }

    #[test]
    fn test_result_passes_through() {
        let body = json!({"answer": "A", "citations": ["c1", "c2"], "status": "success"});
        let result = TaskResult::new(body.clone());
        assert_eq!(result.status(), Some(TaskStatus::Success));
        assert_eq!(result.into_value(), body);
    }
}
