//! Boundary ordering for convex point sets
//!
//! Voronoi cells are convex, so walking their vertices with gift wrapping
//! (Jarvis march) puts them in boundary order without dropping any. The walk
//! is clockwise in screen coordinates, where y grows downward.

use glam::DVec2;

/// Anything with a position on the map plane
pub trait Positioned {
    fn position(&self) -> DVec2;
}

impl Positioned for DVec2 {
    #[inline]
    fn position(&self) -> DVec2 {
        *self
    }
}

/// Order a convex point set into a closed clockwise boundary walk
///
/// Returns `None` for fewer than 3 points. The walk starts at the leftmost
/// point (lowest x, first occurrence on ties) and each step picks the point
/// that leaves no other point on its clockwise side. Exactly collinear points
/// on the current side are visited nearest first so straight runs keep their
/// middle vertices. For convex input every point appears exactly once; the
/// walk never takes more than `points.len()` steps.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use rust_voronoi_map::polygon::order_boundary;
///
/// let square = [
///     DVec2::new(10.0, 10.0),
///     DVec2::new(0.0, 0.0),
///     DVec2::new(0.0, 10.0),
///     DVec2::new(10.0, 0.0),
/// ];
/// let ordered = order_boundary(&square).unwrap();
/// assert_eq!(
///     ordered,
///     vec![
///         DVec2::new(0.0, 0.0),
///         DVec2::new(10.0, 0.0),
///         DVec2::new(10.0, 10.0),
///         DVec2::new(0.0, 10.0),
///     ]
/// );
/// ```
pub fn order_boundary<T: Positioned + Clone>(points: &[T]) -> Option<Vec<T>> {
    let n = points.len();
    if n < 3 {
        return None;
    }

    let positions: Vec<DVec2> = points.iter().map(Positioned::position).collect();

    let mut start = 0;
    for (i, p) in positions.iter().enumerate().skip(1) {
        if p.x < positions[start].x {
            start = i;
        }
    }

    let mut ordered = Vec::with_capacity(n);
    let mut current = start;
    loop {
        ordered.push(points[current].clone());

        let origin = positions[current];
        let mut best = (current + 1) % n;
        for (i, &candidate) in positions.iter().enumerate() {
            if i == current {
                continue;
            }
            let to_candidate = candidate - origin;
            let to_best = positions[best] - origin;
            let cross = to_candidate.perp_dot(positions[best] - candidate);
            let nearer_on_same_ray = cross == 0.0
                && to_candidate.dot(to_best) > 0.0
                && to_candidate.length_squared() < to_best.length_squared();
            if cross > 0.0 || nearer_on_same_ray {
                best = i;
            }
        }

        current = best;
        if current == start || ordered.len() >= n {
            break;
        }
    }

    Some(ordered)
}

/// Twice the signed area of a closed polygon (shoelace sum)
///
/// Positive for clockwise walks in screen coordinates.
pub fn signed_area_doubled<T: Positioned>(points: &[T]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].position().perp_dot(points[(i + 1) % n].position()))
        .sum()
}
