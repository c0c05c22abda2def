// Central Error Type for the Client

use thiserror::Error;

/// Client-level error type
///
/// Two categories matter to callers: configuration problems detected
/// locally (`is_config`) and everything raised while executing a call.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// Transport failure, passed through unchanged
    #[error(transparent)]
    Transport(#[from] crate::port::TransportError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl ClientError {
    pub fn is_config(&self) -> bool {
        matches!(self, ClientError::Config(_))
    }

    /// The transport error, if this is one
    pub fn as_transport(&self) -> Option<&crate::port::TransportError> {
        match self {
            ClientError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiKey, DomainError, TaskDescription};

    fn parse(raw: &str) -> Result<TaskDescription> {
        Ok(raw.parse::<TaskDescription>()?)
    }

    fn key(raw: &str) -> Result<ApiKey> {
        Ok(ApiKey::new(raw)?)
    }

    #[test]
    fn test_domain_errors_convert() {
        let err = parse(r#"{"query":"q"}"#).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Domain(DomainError::InvalidTaskDescription(_))
        ));
        assert!(!err.is_config());
        assert!(err.as_transport().is_none());

        let err = key(" ").unwrap_err();
        assert!(matches!(err, ClientError::Domain(DomainError::EmptyApiKey)));
        assert_eq!(err.to_string(), "Domain error: API key must not be empty");
    }
}
