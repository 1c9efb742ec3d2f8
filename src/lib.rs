//! bendtree: polyline curves → hierarchical bends and structural beauty.
//!
//! Decomposes curves (terrain contours, coastlines, traced outlines) into
//! bends by recursive farthest-point splitting, classifies the bend
//! distances with head/tail breaks, and reports the bend count S, the
//! hierarchy depth H and the structural beauty L = S·H.
//!
//! # Example
//!
//! ```
//! use bendtree::{analyze, AnalysisConfig};
//! use bendtree::geo::line_string;
//!
//! let curve = line_string![
//!     (x: 0.0, y: 0.0), (x: 1.0, y: 5.0), (x: 2.0, y: 0.0),
//!     (x: 3.0, y: 5.0), (x: 4.0, y: 0.0),
//! ];
//! let config = AnalysisConfig { tolerance: 1.0, ..AnalysisConfig::default() };
//! let analysis = analyze(&[curve], &config)?;
//! assert_eq!(analysis.metrics.l, analysis.metrics.s * analysis.metrics.h);
//! # Ok::<(), bendtree::BendError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod geom;
mod metrics;

pub mod bends;
pub mod error;
pub mod headtail;
pub mod io;

// Re-export geo so callers build curves with the same version.
pub use geo;

pub use bends::{Bend, BendCollection};
pub use config::{AnalysisConfig, ClassifierConfig, StoppingRule};
pub use error::BendError;
pub use geom::farthest_point;
pub use headtail::{Classification, HeadTailClassifier};
pub use metrics::SummaryMetrics;

use geo::LineString;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Counters for input that was passed over without failing the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Curves handed to [`analyze`].
    pub curves_seen: usize,
    /// Curves with fewer than 2 points.
    pub curves_skipped: usize,
    /// Bends dropped for a non-positive length.
    pub degenerate_bends: usize,
}

/// The result of an analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Every retained bend, with its class level assigned.
    pub bends: BendCollection,
    pub classification: Classification,
    pub metrics: SummaryMetrics,
    pub diagnostics: Diagnostics,
}

/// Full pipeline: curves → bends → head/tail classes → metrics.
///
/// Configuration is checked before any curve is touched. Fails with
/// [`BendError::EmptyDistribution`] if no curve yields a usable bend.
pub fn analyze(curves: &[LineString<f64>], config: &AnalysisConfig) -> Result<Analysis, BendError> {
    config.validate()?;
    let classifier = HeadTailClassifier::new(config.classifier)?;
    let t_start = Instant::now();

    // ── Decompose ─────────────────────────────────────────
    // Curves are independent; collect keeps input order.
    let per_curve: Vec<Option<Vec<Bend>>> = curves
        .par_iter()
        .enumerate()
        .map(|(i, curve)| {
            if curve.0.len() < 2 {
                debug!(curve = i, points = curve.0.len(), "skipping short curve");
                return None;
            }
            let bends = bends::decompose(&curve.0, config.tolerance);
            debug!(curve = i, points = curve.0.len(), bends = bends.len(), "decomposed");
            Some(bends)
        })
        .collect();

    let mut diagnostics = Diagnostics {
        curves_seen: curves.len(),
        curves_skipped: per_curve.iter().filter(|c| c.is_none()).count(),
        degenerate_bends: 0,
    };
    let mut collection: BendCollection = per_curve.into_iter().flatten().flatten().collect();
    diagnostics.degenerate_bends = collection.retain_positive_length();
    info!(
        curves = diagnostics.curves_seen,
        skipped = diagnostics.curves_skipped,
        bends = collection.len(),
        degenerate = diagnostics.degenerate_bends,
        tolerance = config.tolerance,
        "decompose"
    );

    // ── Classify ──────────────────────────────────────────
    let classification = classifier.classify(&collection.distances())?;
    collection.assign_levels(classification.levels());
    info!(
        levels = classification.hierarchy_depth(),
        rule = ?config.classifier.rule,
        "classify"
    );

    // ── Metrics ───────────────────────────────────────────
    let metrics = SummaryMetrics::from_classification(&classification);
    info!(
        s = metrics.s,
        h = metrics.h,
        l = metrics.l,
        elapsed_ms = t_start.elapsed().as_millis() as u64,
        "metrics"
    );

    Ok(Analysis {
        bends: collection,
        classification,
        metrics,
        diagnostics,
    })
}
