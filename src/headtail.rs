//! Head/tail breaks classification for heavy-tailed distributions.
//!
//! The value set is split at its mean; values above it (the head) are
//! split again, and so on while the head stays a substantial minority.
//! Every split records a cut, and each cut adds one hierarchy level.

use tracing::debug;

use crate::config::{ClassifierConfig, StoppingRule};
use crate::error::BendError;

/// Classifies value sets by head/tail breaks.
#[derive(Debug, Clone, Copy)]
pub struct HeadTailClassifier {
    config: ClassifierConfig,
}

/// Outcome of head/tail breaks over one value set.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// `cuts[0] == 0.0`, then one mean per split, strictly increasing.
    cuts: Vec<f64>,
    /// Head fraction observed at each split.
    ratios: Vec<f64>,
    /// Level of each input value, in input order. `None` for values `<= 0`.
    levels: Vec<Option<usize>>,
}

impl HeadTailClassifier {
    /// Fails fast on an out-of-range `break_percentage`.
    pub fn new(config: ClassifierConfig) -> Result<Self, BendError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run head/tail breaks over `values`.
    ///
    /// Only positive values drive the breaks. Fails with
    /// [`BendError::EmptyDistribution`] when there are none.
    pub fn classify(&self, values: &[f64]) -> Result<Classification, BendError> {
        let mut current: Vec<f64> = values.iter().copied().filter(|&v| v > 0.0).collect();
        if current.is_empty() {
            return Err(BendError::EmptyDistribution);
        }

        let mut cuts = vec![0.0];
        let mut ratios = Vec::new();

        while current.len() > 1 {
            let m = mean(&current);
            if !(m > 0.0) {
                break;
            }
            let head: Vec<f64> = current.iter().copied().filter(|&v| v > m).collect();
            // All remaining values equal: nothing left to separate. Rounding
            // can put the mean of equal values just below them, so a head
            // that kept everything counts the same as an empty one.
            if head.is_empty() || head.len() == current.len() {
                break;
            }
            // Cuts must strictly increase.
            if cuts.last().is_some_and(|&last| m <= last) {
                break;
            }

            cuts.push(m);
            let ratio = head.len() as f64 / current.len() as f64;
            ratios.push(ratio);
            debug!(
                level = cuts.len(),
                mean = m,
                head = head.len(),
                of = current.len(),
                ratio,
                "head/tail split"
            );

            let stop = match self.config.rule {
                StoppingRule::MeanThreshold => m > self.config.break_percentage,
                StoppingRule::MeanRatioThreshold => mean(&ratios) > self.config.break_percentage,
            };
            if stop {
                break;
            }
            current = head;
        }

        let mut classification = Classification {
            cuts,
            ratios,
            levels: Vec::new(),
        };
        classification.levels = values.iter().map(|&v| classification.class_of(v)).collect();
        Ok(classification)
    }
}

impl Classification {
    /// Number of hierarchy levels, H. Always at least 1.
    pub fn hierarchy_depth(&self) -> usize {
        self.cuts.len()
    }

    pub fn cuts(&self) -> &[f64] {
        &self.cuts
    }

    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Per-value levels, aligned with the classified input.
    pub fn levels(&self) -> &[Option<usize>] {
        &self.levels
    }

    /// Level of `v` against the recorded cuts.
    ///
    /// `cuts[i-1] < v <= cuts[i]` is level `i`; anything above the last
    /// cut is the top level H. Non-positive values have no level.
    pub fn class_of(&self, v: f64) -> Option<usize> {
        if !(v > 0.0) {
            return None;
        }
        let level = self.cuts[1..]
            .iter()
            .position(|&cut| v <= cut)
            .map_or(self.hierarchy_depth(), |i| i + 1);
        Some(level)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
