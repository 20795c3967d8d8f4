use crate::error::{Result, TomatoDoctorError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_path: PathBuf,
    pub default_location: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TomatoDoctorError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("tomato-doctor").join("config.json"))
    }

    /// Weather API key for this run. The environment variable takes
    /// precedence over the stored config; `None` degrades the weather
    /// fetch, it never fails the analysis.
    pub fn weather_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("OPENWEATHER_API_KEY") {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }

        self.api_key.clone()
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_path: PathBuf::from("tomato_model.onnx"),
            default_location: "Kerugoya".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model_path, PathBuf::from("tomato_model.onnx"));
        assert_eq!(config.default_location, "Kerugoya");
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            api_key: Some("abc123".into()),
            model_path: PathBuf::from("/models/tomato.onnx"),
            default_location: "Nyeri".into(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.api_key.as_deref(), Some("abc123"));
        assert_eq!(parsed.model_path, config.model_path);
        assert_eq!(parsed.default_location, "Nyeri");
    }
}
