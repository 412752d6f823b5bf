//! Service configuration, read once from the environment at startup.
//!
//! Missing provider credentials are not errors: each absent collaborator
//! selects its documented fallback (simulation calls, deterministic
//! messages, no audio).

use std::path::PathBuf;

use crate::providers::TelephonyConfig;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    /// Public base URL used in webhook routes and audio locators
    pub domain: String,
    pub data_dir: PathBuf,
    pub telephony: Option<TelephonyConfig>,
    pub generation_api_key: Option<String>,
    pub speech_api_key: Option<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let port = env_opt("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let domain = env_opt("DOMAIN").unwrap_or_else(|| format!("http://localhost:{port}"));
        let data_dir = env_opt("SABI_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        Self {
            port,
            domain,
            data_dir,
            telephony: TelephonyConfig::from_env(),
            generation_api_key: env_opt("GEMINI_API_KEY").or_else(|| env_opt("GOOGLE_API_KEY")),
            speech_api_key: env_opt("YARNGPT_API_KEY"),
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
