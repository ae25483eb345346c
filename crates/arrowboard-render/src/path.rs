//! Arrow shaft geometry.

use kurbo::{BezPath, Point};

/// Whether `distance` is exactly the center-to-center distance of a knight
/// move (one square across, two squares along) on squares of
/// `square_width`.
///
/// This compares pixel geometry only; any two squares that far apart
/// qualify.
pub fn is_knight_distance(distance: f64, square_width: f64) -> bool {
    distance == (5.0 * square_width * square_width).sqrt()
}

/// Build the shaft of an arrow from `start` to `end`.
///
/// The tip stops `reducer` pixels short of `end` so the arrowhead does not
/// cover the target square's center. Knight-distance arrows are drawn as an
/// L: first along the longer axis to a corner, then one square to the
/// target, shortened the same way.
///
/// Returns `None` when the endpoints coincide or the geometry is degenerate.
pub fn arrow_shaft(start: Point, end: Point, square_width: f64, reducer: f64) -> Option<BezPath> {
    let delta = end - start;
    let distance = delta.hypot2().sqrt();
    if !distance.is_finite() || distance <= 0.0 {
        return None;
    }

    let mut path = BezPath::new();
    path.move_to(start);

    if is_knight_distance(distance, square_width) {
        let corner = if delta.x.abs() < delta.y.abs() {
            Point::new(start.x, end.y)
        } else {
            Point::new(end.x, start.y)
        };
        // The last leg always spans exactly one square.
        let last_leg = square_width;
        if last_leg <= 0.0 {
            return None;
        }
        let tip = corner + (end - corner) * ((last_leg - reducer) / last_leg);
        log::trace!("Knight shaft {:?} -> {:?} -> {:?}", start, corner, tip);
        path.line_to(corner);
        path.line_to(tip);
    } else {
        let tip = start + delta * ((distance - reducer) / distance);
        path.line_to(tip);
    }

    Some(path)
}

/// Number of line segments in a shaft.
pub fn segment_count(path: &BezPath) -> usize {
    path.elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::LineTo(_)))
        .count()
}
