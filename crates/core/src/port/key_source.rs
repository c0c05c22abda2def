// Key Source Port (API key resolution seam)

/// Environment variable consulted when no key is passed explicitly
pub const API_KEY_ENV: &str = "EDISON_API_KEY";

/// Supplies an API key when the caller did not pass one
///
/// Any `Fn() -> Option<String>` closure is a key source, so tests can inject
/// a synthetic key without touching the process environment.
pub trait KeySource: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from an environment variable (production)
pub struct EnvKeySource {
    var: String,
}

impl EnvKeySource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvKeySource {
    fn default() -> Self {
        Self::new(API_KEY_ENV)
    }
}

impl KeySource for EnvKeySource {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl<F> KeySource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn api_key(&self) -> Option<String> {
        self()
    }
}
