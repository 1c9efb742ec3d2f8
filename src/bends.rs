//! Bend decomposition: a curve → the bends found by recursive splitting.
//!
//! Each range `[start, end]` of the curve is compared against its
//! baseline (the chord from `start` to `end`). If the farthest point
//! deviates by more than the tolerance, that point becomes the apex of
//! a bend and both halves are split again. Ranges within tolerance are
//! not subdivided further, exactly as in Douglas-Peucker.
//!
//! Splitting uses an explicit work stack so long curves cannot exhaust
//! the call stack. Bends come out in depth-first pre-order.

use geo::{Coord, Line, LineString};

use crate::geom::{dist, farthest_point};

/// A single bend: a 3-point approximation of a local deviation.
///
/// Fixed at creation; only the class level is written later, once.
///
/// ```compile_fail
/// use bendtree::bends::decompose;
/// use bendtree::geo::coord;
///
/// let pts = [coord! { x: 0.0, y: 0.0 }, coord! { x: 3.0, y: 4.0 }, coord! { x: 6.0, y: 0.0 }];
/// let mut bend = decompose(&pts, 1.0).remove(0);
/// bend.distance = 0.0;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bend {
    baseline_start: Coord<f64>,
    baseline_end: Coord<f64>,
    apex: Coord<f64>,
    distance: f64,
    length: f64,
    class_level: Option<usize>,
}

impl Bend {
    fn new(baseline_start: Coord<f64>, apex: Coord<f64>, baseline_end: Coord<f64>, distance: f64) -> Self {
        Self {
            baseline_start,
            baseline_end,
            apex,
            distance,
            length: dist(baseline_start, apex) + dist(apex, baseline_end),
            class_level: None,
        }
    }

    pub fn baseline_start(&self) -> Coord<f64> {
        self.baseline_start
    }

    pub fn baseline_end(&self) -> Coord<f64> {
        self.baseline_end
    }

    pub fn apex(&self) -> Coord<f64> {
        self.apex
    }

    /// Distance from the apex to the baseline segment.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// `baseline_start → apex → baseline_end` path length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Hierarchy level assigned by head/tail breaks, if classified.
    pub fn class_level(&self) -> Option<usize> {
        self.class_level
    }

    /// The bend as a polyline: baseline start, apex, baseline end.
    pub fn geometry(&self) -> LineString<f64> {
        LineString::new(vec![self.baseline_start, self.apex, self.baseline_end])
    }
}

/// Bends gathered from any number of curves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BendCollection {
    bends: Vec<Bend>,
}

impl BendCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bends: impl IntoIterator<Item = Bend>) {
        self.bends.extend(bends);
    }

    /// Drop bends whose path length is not positive. Returns how many went.
    pub fn retain_positive_length(&mut self) -> usize {
        let before = self.bends.len();
        self.bends.retain(|b| b.length > 0.0);
        before - self.bends.len()
    }

    pub fn distances(&self) -> Vec<f64> {
        self.bends.iter().map(|b| b.distance).collect()
    }

    /// Write each bend's class level. Only the first assignment sticks.
    pub(crate) fn assign_levels(&mut self, levels: &[Option<usize>]) {
        debug_assert_eq!(levels.len(), self.bends.len());
        for (bend, &level) in self.bends.iter_mut().zip(levels) {
            if bend.class_level.is_none() {
                bend.class_level = level;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bends.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bend> {
        self.bends.iter()
    }

    pub fn as_slice(&self) -> &[Bend] {
        &self.bends
    }
}

impl<'a> IntoIterator for &'a BendCollection {
    type Item = &'a Bend;
    type IntoIter = std::slice::Iter<'a, Bend>;

    fn into_iter(self) -> Self::IntoIter {
        self.bends.iter()
    }
}

impl FromIterator<Bend> for BendCollection {
    fn from_iter<I: IntoIterator<Item = Bend>>(iter: I) -> Self {
        Self {
            bends: iter.into_iter().collect(),
        }
    }
}

/// Decompose a whole curve into bends.
///
/// A negative or NaN `tolerance` behaves as zero. [`crate::AnalysisConfig`]
/// requires `> 0` before this is reached.
pub fn decompose(points: &[Coord<f64>], tolerance: f64) -> Vec<Bend> {
    if points.len() < 2 {
        return Vec::new();
    }
    decompose_range(points, 0, points.len() - 1, tolerance)
}

/// Decompose `points[start..=end]` into bends, in depth-first pre-order.
///
/// Panics if `end` is out of bounds for `points`.
pub fn decompose_range(points: &[Coord<f64>], start: usize, end: usize, tolerance: f64) -> Vec<Bend> {
    let tolerance = tolerance.max(0.0);
    let mut bends = Vec::new();
    let mut stack = vec![(start, end)];

    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let baseline = Line::new(points[start], points[end]);
        let Some((offset, distance)) = farthest_point(baseline, &points[start..=end]) else {
            continue;
        };
        if !(distance > tolerance) {
            continue;
        }
        // Endpoints lie on their own baseline, so `mid` is strictly interior.
        let mid = start + offset;

        if points[start] != points[end] {
            bends.push(Bend::new(points[start], points[mid], points[end], distance));
        }

        // Right first so the left half is processed next (pre-order).
        stack.push((mid, end));
        stack.push((start, mid));
    }

    bends
}
