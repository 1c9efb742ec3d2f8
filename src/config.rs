use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BendError;

/// All analysis parameters in one struct.
/// Serializable so a preset can be kept next to the data it was tuned for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // -- Decomposition --
    /// Minimum farthest-point distance (in curve units) for a range to
    /// count as a bend. Contour data typically uses 5-100.
    pub tolerance: f64,

    // -- Classification --
    /// Head/tail breaks parameters.
    pub classifier: ClassifierConfig,
}

/// Parameters for head/tail breaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Threshold the stopping rule compares against. Must lie in (0, 1].
    pub break_percentage: f64,
    /// Which quantity is compared against `break_percentage`.
    pub rule: StoppingRule,
}

/// When head/tail breaks stops splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoppingRule {
    /// Stop once the current mean exceeds `break_percentage`.
    MeanThreshold,
    /// Stop once the running mean of head ratios exceeds `break_percentage`.
    #[default]
    MeanRatioThreshold,
}

impl StoppingRule {
    /// Map the numbered rule versions (1 = mean, 2 = mean ratio).
    pub fn from_version(version: u8) -> Result<Self, BendError> {
        match version {
            1 => Ok(StoppingRule::MeanThreshold),
            2 => Ok(StoppingRule::MeanRatioThreshold),
            v => Err(BendError::InvalidConfig(format!(
                "unknown stopping rule version {v} (expected 1 or 2)"
            ))),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: 5.0,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            break_percentage: 0.4,
            rule: StoppingRule::MeanRatioThreshold,
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML preset. Missing keys fall back to defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, BendError> {
        let config: AnalysisConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML preset from disk.
    pub fn load(path: &Path) -> Result<Self, BendError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), BendError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(BendError::InvalidConfig(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        self.classifier.validate()
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), BendError> {
        // NaN fails both comparisons, so test for the valid range.
        if !(self.break_percentage > 0.0 && self.break_percentage <= 1.0) {
            return Err(BendError::InvalidConfig(format!(
                "break_percentage must be in (0, 1], got {}",
                self.break_percentage
            )));
        }
        Ok(())
    }
}
