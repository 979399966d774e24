use std::sync::{Arc, RwLock};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const PAGE_SIZE: u32 = 10;

/// Runtime settings. Nothing here is read from or written to disk.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub page_size: u32,
    pub user_agent: String,
}

impl Settings {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            page_size: PAGE_SIZE,
            user_agent: format!("gitscout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// The personal access token field. Shared between the session and every
/// request in flight; each request reads it when it is issued.
#[derive(Clone, Default)]
pub struct TokenSource(Arc<RwLock<Option<String>>>);

impl TokenSource {
    pub fn new(initial: Option<String>) -> Self {
        let source = Self::default();
        source.set(initial.as_deref().unwrap_or_default());
        source
    }

    /// Replace the token. Blank input clears it.
    pub fn set(&self, value: &str) {
        let value = value.trim();
        let mut slot = match self.0.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = if value.is_empty() { None } else { Some(value.to_string()) };
    }

    pub fn clear(&self) {
        self.set("");
    }

    pub fn current(&self) -> Option<String> {
        match self.0.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

// Never print the token itself.
impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.current().is_some() { "set" } else { "unset" };
        f.debug_tuple("TokenSource").field(&state).finish()
    }
}
