//! Shared geometry utilities.

use geo::{Coord, EuclideanDistance, EuclideanLength, Line, Point};

/// Distance from `c` to the segment `baseline`.
///
/// Points whose projection falls outside the segment are measured to the
/// nearest endpoint. A degenerate baseline reduces to point distance.
pub fn segment_distance(c: Coord<f64>, baseline: Line<f64>) -> f64 {
    Point::from(c).euclidean_distance(&baseline)
}

/// Straight-line distance between two coordinates.
pub fn dist(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Line::new(a, b).euclidean_length()
}

/// Index and distance of the point in `points` farthest from `baseline`.
///
/// Ties keep the first occurrence. Returns `None` for an empty slice.
pub fn farthest_point(baseline: Line<f64>, points: &[Coord<f64>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &c) in points.iter().enumerate() {
        let d = segment_distance(c, baseline);
        match best {
            Some((_, max)) if d <= max || d.is_nan() => {}
            _ => best = Some((i, d)),
        }
    }
    best
}
