// API Key Resolution

use crate::domain::ApiKey;
use crate::error::{ClientError, Result};
use crate::port::KeySource;
use tracing::debug;

pub const MISSING_KEY_MESSAGE: &str = "API key is required. Provide it as an argument or set the \
     EDISON_API_KEY environment variable.";

/// Resolve the API key: explicit argument first, then the key source.
///
/// Blank values count as absent. Fails with `ClientError::Config` when
/// neither path yields a key.
pub fn resolve_api_key(explicit: Option<&str>, source: &dyn KeySource) -> Result<ApiKey> {
    let (candidate, origin) = match explicit.filter(|key| !key.trim().is_empty()) {
        Some(key) => (Some(key.to_string()), "argument"),
        None => (source.api_key(), "key source"),
    };

    let key = candidate
        .filter(|key| !key.trim().is_empty())
        .map(ApiKey::new)
        .transpose()?
        .ok_or_else(|| ClientError::Config(MISSING_KEY_MESSAGE.to_string()))?;

    debug!(origin, api_key = %key, "API key resolved");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_key() -> Option<String> {
        None
    }

    #[test]
    fn test_explicit_key_wins() {
        let source = || Some("from_env".to_string());
        let key = resolve_api_key(Some("explicit_key"), &source).unwrap();
        assert_eq!(key.expose(), "explicit_key");
    }

    #[test]
    fn test_falls_back_to_source() {
        let source = || Some("env_test_key".to_string());
        let key = resolve_api_key(None, &source).unwrap();
        assert_eq!(key.expose(), "env_test_key");

        let key = resolve_api_key(Some("  "), &source).unwrap();
        assert_eq!(key.expose(), "env_test_key");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = resolve_api_key(None, &no_key).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("API key is required"));
    }

    #[test]
    fn test_blank_source_key_is_config_error() {
        let source = || Some("   ".to_string());
        let err = resolve_api_key(None, &source).unwrap_err();
        assert!(err.is_config());
    }
}
