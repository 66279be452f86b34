use std::time::Duration;

use thiserror::Error;

use nyah_config::Env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Why an enabled Ollama integration had to switch itself off.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OllamaConfigError {
    #[error(
        "incomplete configuration: OLLAMA_BASE_URL={base_url:?}, OLLAMA_MODEL={model:?}, OLLAMA_TIMEOUT={timeout:?}"
    )]
    Incomplete {
        base_url: Option<String>,
        model: Option<String>,
        timeout: Option<String>,
    },
    #[error("invalid OLLAMA_TIMEOUT: {0:?}")]
    InvalidTimeout(String),
}

impl OllamaSettings {
    /// `Ok(None)` when `OLLAMA_ENABLED` is not set to a true-ish value.
    pub fn from_env(env: &Env) -> Result<Option<Self>, OllamaConfigError> {
        if !env.flag("OLLAMA_ENABLED", false) {
            return Ok(None);
        }

        let base_url = env.non_empty("OLLAMA_BASE_URL");
        let model = env.non_empty("OLLAMA_MODEL");
        let timeout_raw = env.non_empty("OLLAMA_TIMEOUT");

        let (Some(base_url), Some(model), Some(timeout_raw)) = (base_url, model, timeout_raw)
        else {
            return Err(OllamaConfigError::Incomplete {
                base_url: base_url.map(str::to_owned),
                model: model.map(str::to_owned),
                timeout: timeout_raw.map(str::to_owned),
            });
        };

        let timeout_secs = timeout_raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| OllamaConfigError::InvalidTimeout(timeout_raw.to_owned()))?;

        Ok(Some(Self {
            base_url: base_url.to_owned(),
            model: model.to_owned(),
            timeout: Duration::from_secs(timeout_secs),
        }))
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{OllamaConfigError, OllamaSettings};
    use nyah_config::Env;

    fn full_env(timeout: &str) -> Env {
        Env::from_pairs([
            ("OLLAMA_ENABLED", "1"),
            ("OLLAMA_BASE_URL", "http://localhost:11434/"),
            ("OLLAMA_MODEL", "llama3"),
            ("OLLAMA_TIMEOUT", timeout),
        ])
    }

    #[test]
    fn disabled_unless_flag_set() {
        assert_eq!(OllamaSettings::from_env(&Env::default()), Ok(None));
        let env = Env::from_pairs([("OLLAMA_ENABLED", "0"), ("OLLAMA_MODEL", "x")]);
        assert_eq!(OllamaSettings::from_env(&env), Ok(None));
    }

    #[test]
    fn parses_complete_settings() {
        let settings = OllamaSettings::from_env(&full_env("30")).unwrap().unwrap();

        assert_eq!(settings.model, "llama3");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.generate_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn missing_timeout_is_incomplete() {
        let env = Env::from_pairs([
            ("OLLAMA_ENABLED", "1"),
            ("OLLAMA_BASE_URL", "http://localhost:11434"),
            ("OLLAMA_MODEL", "llama3"),
        ]);

        assert!(matches!(
            OllamaSettings::from_env(&env),
            Err(OllamaConfigError::Incomplete { timeout: None, .. })
        ));
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        assert_eq!(
            OllamaSettings::from_env(&full_env("soon")),
            Err(OllamaConfigError::InvalidTimeout("soon".to_owned()))
        );
        assert_eq!(
            OllamaSettings::from_env(&full_env("0")),
            Err(OllamaConfigError::InvalidTimeout("0".to_owned()))
        );
    }
}
