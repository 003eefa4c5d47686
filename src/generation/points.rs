//! Jittered grid point distribution
//!
//! Points start on a regular grid covering the map, corners included, and are
//! then pushed around by `jitter * (r1 - r2)` on each axis. The difference of
//! two uniforms gives a triangular distribution centred on the grid node, so
//! most points stay close to home while a few wander up to `jitter` away.

use glam::DVec2;
use rand::Rng;

/// Number of points [generate_grid_points] emits for these dimensions
///
/// `None` when `grid_size` is zero or the count does not fit in a `usize`.
pub fn grid_point_count(grid_size: u32, width: u32, height: u32) -> Option<usize> {
    let columns = usize::try_from(width.checked_div(grid_size)?).ok()?.checked_add(1)?;
    let rows = usize::try_from(height.checked_div(grid_size)?).ok()?.checked_add(1)?;
    columns.checked_mul(rows)
}

/// Generate a jittered grid of points
///
/// Walks `x = 0, grid_size, …, <= width` in the outer loop and `y` the same
/// way in the inner loop. Every emitted point lies within `jitter` of its grid
/// node. A `grid_size` of zero, or a grid too large to count, yields no points.
///
/// # Arguments
///
/// * `rng` - Random source for the jitter; seed it for reproducible maps
/// * `grid_size` - Spacing between grid nodes
/// * `jitter` - Maximum displacement per axis
/// * `width`, `height` - Map dimensions
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use rust_voronoi_map::generation::generate_grid_points;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let points = generate_grid_points(&mut rng, 20, 5.0, 100, 60);
/// assert_eq!(points.len(), 6 * 4);
/// ```
pub fn generate_grid_points<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: u32,
    jitter: f64,
    width: u32,
    height: u32,
) -> Vec<DVec2> {
    let Some(count) = grid_point_count(grid_size, width, height) else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(count);
    let step = grid_size as usize;

    for x in (0..=width).step_by(step) {
        for y in (0..=height).step_by(step) {
            let dx = jitter * (rng.gen::<f64>() - rng.gen::<f64>());
            let dy = jitter * (rng.gen::<f64>() - rng.gen::<f64>());
            points.push(DVec2::new(x as f64 + dx, y as f64 + dy));
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_point_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for &(grid, width, height) in &[(20, 100, 100), (7, 50, 33), (10, 5, 5), (3, 3, 9)] {
            let points = generate_grid_points(&mut rng, grid, 2.0, width, height);
            let expected = ((width / grid) as usize + 1) * ((height / grid) as usize + 1);
            assert_eq!(points.len(), expected);
            assert_eq!(grid_point_count(grid, width, height), Some(expected));
        }
    }

    #[test]
    fn test_points_within_jitter_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let jitter = 15.0;
        let points = generate_grid_points(&mut rng, 20, jitter, 200, 120);

        for p in &points {
            assert!(p.x >= -jitter && p.x <= 200.0 + jitter, "x out of bounds: {}", p.x);
            assert!(p.y >= -jitter && p.y <= 120.0 + jitter, "y out of bounds: {}", p.y);
        }
    }

    #[test]
    fn test_points_stay_near_grid_nodes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let points = generate_grid_points(&mut rng, 10, 3.0, 30, 30);

        // x is the outer loop, y the inner one
        let mut i = 0;
        for x in (0..=30).step_by(10) {
            for y in (0..=30).step_by(10) {
                let node = DVec2::new(x as f64, y as f64);
                assert!((points[i] - node).abs().max_element() < 3.0);
                i += 1;
            }
        }
    }

    #[test]
    fn test_zero_jitter_is_regular_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let points = generate_grid_points(&mut rng, 20, 0.0, 100, 100);

        assert_eq!(points.len(), 36);
        assert_eq!(points[0], DVec2::new(0.0, 0.0));
        assert_eq!(points[1], DVec2::new(0.0, 20.0));
        assert_eq!(points[6], DVec2::new(20.0, 0.0));
        assert_eq!(points[35], DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_same_seed_same_points() {
        let a = generate_grid_points(&mut ChaCha8Rng::seed_from_u64(7), 25, 10.0, 300, 200);
        let b = generate_grid_points(&mut ChaCha8Rng::seed_from_u64(7), 25, 10.0, 300, 200);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_grid_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(generate_grid_points(&mut rng, 0, 1.0, 10, 10).is_empty());
        assert_eq!(grid_point_count(0, 10, 10), None);
    }

    #[test]
    fn test_point_count_overflow() {
        // 2^32 columns times 2^32 rows does not fit in 64 bits
        assert_eq!(grid_point_count(1, u32::MAX, u32::MAX), None);
        assert_eq!(grid_point_count(u32::MAX, u32::MAX, u32::MAX), Some(4));
    }
}
