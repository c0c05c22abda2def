// API Key Value Object

use crate::domain::error::{DomainError, Result};

/// Non-empty API key. Debug/Display never print the full secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting empty or whitespace-only input
    ///
    /// The key is stored exactly as given (no trimming).
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(DomainError::EmptyApiKey);
        }
        Ok(Self(key))
    }

    /// Full secret, for building auth headers
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form, e.g. `sk_t...1234`
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank() {
        assert_eq!(ApiKey::new(""), Err(DomainError::EmptyApiKey));
        assert_eq!(ApiKey::new("   "), Err(DomainError::EmptyApiKey));
    }

    #[test]
    fn test_keeps_caller_bytes() {
        let key = ApiKey::new(" sk_live_padded ").unwrap();
        assert_eq!(key.expose(), " sk_live_padded ");
    }

    #[test]
    fn test_masking() {
        let key = ApiKey::new("sk_test_abcdef123456").unwrap();
        assert_eq!(key.masked(), "sk_t...3456");
        assert_eq!(format!("{:?}", key), "ApiKey(\"sk_t...3456\")");
        assert_eq!(key.expose(), "sk_test_abcdef123456");

        let short = ApiKey::new("abc").unwrap();
        assert_eq!(short.to_string(), "***");
    }
}
