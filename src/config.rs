use crate::store::KeyStore;
use std::env;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub text_model: Option<String>,
    pub vision_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            text_model: None,
            vision_model: None,
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the process-level default credential and model overrides.
    /// `GOOGLE_API_KEY` wins over `GEMINI_API_KEY` when both are set; a
    /// blank variable is treated as unset and falls through.
    pub fn from_env() -> Self {
        let api_key = env_key("GOOGLE_API_KEY").or_else(|| env_key("GEMINI_API_KEY"));
        let text_model = env::var("FASHIONPROMPT_TEXT_MODEL").ok();
        let vision_model = env::var("FASHIONPROMPT_VISION_MODEL").ok();
        let timeout_secs = env::var("FASHIONPROMPT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        GeminiConfig {
            api_key,
            text_model,
            vision_model,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = Some(model.into());
        self
    }

    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

fn env_key(name: &str) -> Option<String> {
    env::var(name).ok().filter(|key| !key.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: Option<GeminiConfig>,
    pub key_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: None,
            key_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let key_file = env::var("FASHIONPROMPT_KEY_FILE").ok();

        Config {
            gemini: Some(GeminiConfig::from_env()),
            key_file,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn with_key_file(mut self, path: impl Into<String>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    /// The key store for this configuration: an explicit `key_file` wins,
    /// otherwise the environment-derived default slot is used.
    pub fn key_store(&self) -> Option<KeyStore> {
        match &self.key_file {
            Some(path) => Some(KeyStore::new(path)),
            None => KeyStore::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains_accumulate() {
        let config = GeminiConfig::new()
            .with_api_key("test-key")
            .with_text_model("gemini-1.5-flash")
            .with_timeout(30);
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.text_model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(config.timeout_secs, Some(30));
        assert!(config.vision_model.is_none());
    }

    #[test]
    fn default_config_is_empty() {
        let config = Config::new();
        assert!(config.gemini.is_none());
        assert!(config.key_file.is_none());
    }

    #[test]
    fn explicit_key_file_wins_over_the_environment_slot() {
        let store = Config::new()
            .with_key_file("/tmp/fashionprompt-test-key")
            .key_store()
            .unwrap();
        assert_eq!(
            store.path(),
            std::path::Path::new("/tmp/fashionprompt-test-key")
        );
    }

    // One test for every env-derived value: the process environment is
    // shared across threads, so touching it from several #[test] functions
    // at once would race.
    #[test]
    fn from_env_credential_precedence() {
        env::set_var("GOOGLE_API_KEY", "google-key");
        env::set_var("GEMINI_API_KEY", "gemini-key");
        assert_eq!(
            GeminiConfig::from_env().api_key.as_deref(),
            Some("google-key")
        );

        env::remove_var("GOOGLE_API_KEY");
        assert_eq!(
            GeminiConfig::from_env().api_key.as_deref(),
            Some("gemini-key")
        );

        // A blank variable is unset, not an empty credential.
        env::set_var("GOOGLE_API_KEY", "   ");
        assert_eq!(
            GeminiConfig::from_env().api_key.as_deref(),
            Some("gemini-key")
        );
        env::set_var("GEMINI_API_KEY", "");
        env::remove_var("GOOGLE_API_KEY");
        assert!(GeminiConfig::from_env().api_key.is_none());
        env::remove_var("GEMINI_API_KEY");

        env::set_var("FASHIONPROMPT_KEY_FILE", "/tmp/fashionprompt-env-key");
        let config = Config::from_env();
        assert_eq!(
            config.key_file.as_deref(),
            Some("/tmp/fashionprompt-env-key")
        );
        assert_eq!(
            config.key_store().unwrap().path(),
            std::path::Path::new("/tmp/fashionprompt-env-key")
        );
        env::remove_var("FASHIONPROMPT_KEY_FILE");
    }
}
