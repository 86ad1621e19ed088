//! Settings read from `SHELFWISE_*` environment variables

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORAGE_PATH: &str = "./shelfwise_data";
pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding the persisted book list
    pub storage_path: PathBuf,
    pub llm: LlmSettings,
}

/// Connection details for an OpenAI-compatible chat completions API
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    /// Base URL; `/chat/completions` is appended
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            llm: LlmSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Settings::default();

        let timeout = match get("SHELFWISE_LLM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        "Ignoring invalid SHELFWISE_LLM_TIMEOUT_SECS '{}', using {}s",
                        raw,
                        DEFAULT_LLM_TIMEOUT_SECS
                    );
                    defaults.llm.timeout
                }
            },
            None => defaults.llm.timeout,
        };

        Self {
            storage_path: get("SHELFWISE_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            llm: LlmSettings {
                endpoint: get("SHELFWISE_LLM_ENDPOINT").unwrap_or(defaults.llm.endpoint),
                model: get("SHELFWISE_LLM_MODEL").unwrap_or(defaults.llm.model),
                api_key: get("SHELFWISE_LLM_API_KEY"),
                timeout,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.llm.api_key, None);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("SHELFWISE_STORAGE_PATH", "/tmp/books"),
            ("SHELFWISE_LLM_ENDPOINT", "http://localhost:11434/v1"),
            ("SHELFWISE_LLM_MODEL", "llama3"),
            ("SHELFWISE_LLM_API_KEY", "secret"),
            ("SHELFWISE_LLM_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(settings.storage_path, PathBuf::from("/tmp/books"));
        assert_eq!(settings.llm.endpoint, "http://localhost:11434/v1");
        assert_eq!(settings.llm.model, "llama3");
        assert_eq!(settings.llm.api_key.as_deref(), Some("secret"));
        assert_eq!(settings.llm.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("SHELFWISE_LLM_API_KEY", "  "),
            ("SHELFWISE_LLM_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(settings.llm.api_key, None);
        assert_eq!(
            settings.llm.timeout,
            Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS)
        );
    }
}
