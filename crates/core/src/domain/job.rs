// Job Kind Domain Model

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Job kind (selects which remote capability processes a task)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobKind {
    Literature,
    Analysis,
    Precedent,
    Molecules,
}

impl JobKind {
    /// All job kinds, in display order
    pub const ALL: [JobKind; 4] = [
        JobKind::Literature,
        JobKind::Analysis,
        JobKind::Precedent,
        JobKind::Molecules,
    ];

    /// Wire name used in the `name` field of a task description
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Literature => "LITERATURE",
            JobKind::Analysis => "ANALYSIS",
            JobKind::Precedent => "PRECEDENT",
            JobKind::Molecules => "MOLECULES",
        }
    }

    /// Human-readable description of the capability
    pub fn description(&self) -> &'static str {
        match self {
            JobKind::Literature => "Search and generate answers based on scientific literature",
            JobKind::Analysis => "Analyze biological datasets",
            JobKind::Precedent => "Query prior scientific work",
            JobKind::Molecules => "Chemistry tasks, leveraging cheminformatics tools",
        }
    }

    /// Field carrying the caller's primary argument for the convenience builders
    pub fn primary_field(&self) -> &'static str {
        match self {
            JobKind::Analysis => "dataset",
            JobKind::Literature | JobKind::Precedent | JobKind::Molecules => "query",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownJobKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(JobKind::Literature.as_str(), "LITERATURE");
        assert_eq!(JobKind::Analysis.as_str(), "ANALYSIS");
        assert_eq!(JobKind::Precedent.as_str(), "PRECEDENT");
        assert_eq!(JobKind::Molecules.as_str(), "MOLECULES");
    }

    #[test]
    fn test_serde_matches_wire_name() {
        for kind in JobKind::ALL {
            let value = serde_json::to_value(kind).unwrap();
            assert_eq!(value, serde_json::Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("literature".parse::<JobKind>().unwrap(), JobKind::Literature);
        assert_eq!(" Molecules ".parse::<JobKind>().unwrap(), JobKind::Molecules);
        assert!("GENOMICS".parse::<JobKind>().is_err());
    }

    #[test]
    fn test_descriptions() {
        assert!(JobKind::Literature
            .description()
            .to_lowercase()
            .contains("literature"));
        assert!(JobKind::Analysis.description().contains("datasets"));
        assert_eq!(JobKind::Analysis.primary_field(), "dataset");
        assert_eq!(JobKind::Precedent.primary_field(), "query");
    }
}
