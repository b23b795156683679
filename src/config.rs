use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const ENV_API_BASE_URL: &str = "ISSUEBOARD_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(Some(base_url)),
        }
    }

    pub fn from_env() -> Self {
        let raw = std::env::var(ENV_API_BASE_URL).ok();
        Self {
            base_url: normalize_base_url(raw.as_deref()),
        }
    }

    /// Process-wide configuration, resolved from the environment on first use.
    pub fn global() -> &'static ClientConfig {
        static CONFIG: OnceLock<ClientConfig> = OnceLock::new();
        CONFIG.get_or_init(ClientConfig::from_env)
    }

    /// Joins `path` (which starts with `/`) onto the base URL.
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}
