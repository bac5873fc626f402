//! Runtime settings, read from the environment (and `.env`, if present).

use lead_core::cep::DEFAULT_CEP_URL;
use lead_core::client::DEFAULT_BASE_URL;

pub const LEADS_API_URL: &str = "LEADS_API_URL";
pub const CEP_API_URL: &str = "CEP_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub leads_api_url: String,
    pub cep_api_url: String,
}

impl Config {
    /// Reads the process environment. Call [`load_dotenv`] first to pick up
    /// a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            leads_api_url: read(LEADS_API_URL, DEFAULT_BASE_URL),
            cep_api_url: read(CEP_API_URL, DEFAULT_CEP_URL),
        }
    }
}

/// Load `.env` into the process environment. A missing file is fine; an
/// unreadable one is reported so the caller can log it.
pub fn load_dotenv() -> Option<dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(_) => None,
        Err(err) if err.not_found() => None,
        Err(err) => Some(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.leads_api_url, "https://localhost:7267/api");
        assert_eq!(config.cep_api_url, "https://viacep.com.br/ws");
    }

    #[test]
    fn overrides_and_blank_values() {
        let config = Config::from_lookup(|key| match key {
            LEADS_API_URL => Some(" http://127.0.0.1:3000/api ".to_string()),
            CEP_API_URL => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.leads_api_url, "http://127.0.0.1:3000/api");
        assert_eq!(config.cep_api_url, DEFAULT_CEP_URL);
    }
}
