//! Summary metrics: bend count, hierarchy depth, structural beauty.

use std::collections::BTreeMap;
use std::fmt;

use crate::headtail::Classification;

/// Headline numbers for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryMetrics {
    /// Number of bends (substructures), S.
    pub s: usize,
    /// Degree of hierarchy, H.
    pub h: usize,
    /// Structural beauty, L = S·H.
    pub l: usize,
    /// Bend count per level `1..=H`. Empty levels are present with 0.
    pub counts_by_level: BTreeMap<usize, usize>,
}

impl SummaryMetrics {
    /// Derive the metrics from a classification of bend distances.
    ///
    /// S counts the classified values only; non-positive inputs carry no
    /// level and are left out.
    pub fn from_classification(classification: &Classification) -> Self {
        let h = classification.hierarchy_depth();
        let mut counts_by_level: BTreeMap<usize, usize> = (1..=h).map(|level| (level, 0)).collect();
        let mut s = 0;
        for level in classification.levels().iter().flatten() {
            *counts_by_level.entry(*level).or_insert(0) += 1;
            s += 1;
        }
        Self {
            s,
            h,
            l: s * h,
            counts_by_level,
        }
    }
}

impl fmt::Display for SummaryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Bends (S)       {}", self.s)?;
        writeln!(f, "  Hierarchy (H)   {}", self.h)?;
        writeln!(f, "  Beauty (L=S\u{00b7}H)  {}", self.l)?;
        writeln!(f)?;

        // One-row table: S1..SH, then the totals.
        let mut columns: Vec<(String, usize)> = self
            .counts_by_level
            .iter()
            .map(|(level, count)| (format!("S{}", level), *count))
            .collect();
        columns.push(("S".to_string(), self.s));
        columns.push(("H".to_string(), self.h));
        columns.push(("L".to_string(), self.l));

        let widths: Vec<usize> = columns
            .iter()
            .map(|(name, value)| name.len().max(value.to_string().len()))
            .collect();

        for ((name, _), w) in columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", name, w = *w)?;
        }
        writeln!(f)?;
        for ((_, value), w) in columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", value, w = *w)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;
    use crate::headtail::HeadTailClassifier;

    fn metrics_for(values: &[f64]) -> SummaryMetrics {
        let classifier = HeadTailClassifier::new(ClassifierConfig::default()).unwrap();
        SummaryMetrics::from_classification(&classifier.classify(values).unwrap())
    }

    #[test]
    fn skewed_counts() {
        let mut values = vec![1.0; 9];
        values.push(100.0);
        let m = metrics_for(&values);
        assert_eq!((m.s, m.h, m.l), (10, 2, 20));
        assert_eq!(m.counts_by_level, BTreeMap::from([(1, 9), (2, 1)]));
    }

    #[test]
    fn every_level_is_keyed() {
        // Cuts 0, 4.6, 18.
        let values = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 16.0, 20.0];
        let m = metrics_for(&values);
        assert_eq!(m.h, 3);
        assert_eq!(m.counts_by_level, BTreeMap::from([(1, 8), (2, 1), (3, 1)]));

        let values = [5.0, 5.0, 5.0];
        let m = metrics_for(&values);
        assert_eq!(m.counts_by_level, BTreeMap::from([(1, 3)]));
    }

    #[test]
    fn l_is_s_times_h() {
        let values: Vec<f64> = (1..=50).map(|i| 100.0 / f64::from(i)).collect();
        let m = metrics_for(&values);
        assert_eq!(m.l, m.s * m.h);
        assert_eq!(m.counts_by_level.values().sum::<usize>(), m.s);
        assert_eq!(m.counts_by_level.len(), m.h);
    }

    #[test]
    fn unclassified_values_are_not_counted() {
        let m = metrics_for(&[0.0, -2.0, 1.0, 1.0, 1.0, 9.0]);
        assert_eq!(m.s, 4);
        assert_eq!(m.counts_by_level.values().sum::<usize>(), m.s);
        assert_eq!(m.l, m.s * m.h);
    }

    #[test]
    fn renders_table() {
        let mut values = vec![1.0; 9];
        values.push(100.0);
        let text = metrics_for(&values).to_string();
        assert!(text.contains("Bends (S)       10"));
        assert!(text.contains("Hierarchy (H)   2"));
        assert!(text.contains("  S1  S2   S  H   L"));
        assert!(text.contains("   9   1  10  2  20"));
    }
}
