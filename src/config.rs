use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::padding::AddUnit;


pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    // Unit used when the board grows sideways (squares on canonical ranks).
    pub horizontal_add_unit: AddUnit,
    // Unit used when the board grows up or down (squares outside of ranks 1-8).
    pub vertical_add_unit: AddUnit,
    // Maximum number of columns beyond file 'a' on the left or file 'h' on the right.
    pub horizontal_extend_limit: usize,
    // Maximum number of rows above rank 8 or below rank 1.
    pub vertical_extend_limit: usize,
    #[serde(with = "humantime_serde")]
    pub animation_duration: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            horizontal_add_unit: AddUnit::SINGLE,
            vertical_add_unit: AddUnit::SINGLE,
            horizontal_extend_limit: 0,
            vertical_extend_limit: 0,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.horizontal_add_unit.validate().context("invalid horizontal add unit")?;
        self.vertical_add_unit.validate().context("invalid vertical add unit")?;
        Ok(())
    }

    pub fn from_yaml(s: &str) -> anyhow::Result<Self> {
        let config: BoardConfig =
            serde_yaml::from_str(s).context("failed to parse board config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(self).context("failed to serialize board config")
    }
}
