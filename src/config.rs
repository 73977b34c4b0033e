use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_AI_DELAY_MS: u64 = 500;
const DEFAULT_CELL_SIZE: u32 = 60;

/// Settings shared by both front-ends.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Seed for the computer's tie-breaking. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Pause before the computer moves.
    pub ai_delay_ms: u64,
    /// Edge of one square on the canvas, in pixels.
    pub cell_size: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default().validate().unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.ai_delay_ms, 500);
        assert_eq!(config.cell_size, 60);
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let config = GameConfig {
            cell_size: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCellSize)));
    }
}
