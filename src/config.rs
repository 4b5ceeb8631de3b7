use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::Universe;
use crate::error::ConfigError;
use crate::grid::EdgePolicy;
use crate::patterns;

/// Initial population of a freshly built universe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Dead,
    #[default]
    Random,
}

/// A named pattern placed with its origin at `(column, row)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub pattern: String,
    pub column: u32,
    pub row: u32,
}

/// Everything needed to build a starting universe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub width: u32,
    pub height: u32,
    pub edges: EdgePolicy,
    pub fill: Fill,
    /// Seed for a random fill; entropy when absent.
    pub seed: Option<u64>,
    /// Applied in order after the fill.
    pub stamps: Vec<Stamp>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            edges: EdgePolicy::Toroidal,
            fill: Fill::Random,
            seed: None,
            stamps: Vec::new(),
        }
    }
}

impl Params {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let params: Params = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }
        for stamp in &self.stamps {
            if patterns::find(&stamp.pattern).is_none() {
                return Err(ConfigError::UnknownPattern(stamp.pattern.clone()));
            }
        }
        Ok(())
    }

    /// Build the starting universe: fill, then stamps.
    pub fn build(&self) -> Result<Universe, ConfigError> {
        self.validate()?;
        let mut universe = Universe::with_edges(self.width, self.height, self.edges);
        if self.fill == Fill::Random {
            universe.randomize_state(self.seed);
        }
        for stamp in &self.stamps {
            let pattern = patterns::find(&stamp.pattern)
                .ok_or_else(|| ConfigError::UnknownPattern(stamp.pattern.clone()))?;
            pattern.stamp(&mut universe, stamp.column, stamp.row)?;
        }
        Ok(universe)
    }
}
