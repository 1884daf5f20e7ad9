use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::GameError;

/// Key the original page stored its tallies under.
pub const DEFAULT_STORAGE_KEY: &str = "ticTacToeScores";

/// Host-provided settings. Every field is optional on the JS side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub storage_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    /// `undefined` and `null` yield the defaults.
    pub fn from_js(value: JsValue) -> Result<Self, GameError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }

        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.storage_key.trim().is_empty() {
            return Err(GameError::InvalidConfig(
                "storageKey must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_original_storage_key() {
        let config = GameConfig::default();

        assert_eq!(config.storage_key, "ticTacToeScores");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        let config = GameConfig {
            storage_key: "  ".to_string(),
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("storageKey"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn storage_key_is_read_in_camel_case() {
        let config: GameConfig = serde_json::from_str(r#"{"storageKey":"scores-v2"}"#).unwrap();

        assert_eq!(config.storage_key, "scores-v2");
    }
}
