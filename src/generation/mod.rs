//! Core map geometry generation
//!
//! Samples a jittered point grid and partitions the map into Voronoi cells.

mod points;
mod voronoi;

pub use points::{generate_grid_points, grid_point_count};
pub use voronoi::{compute_diagram, BoundingBox, Cell, Diagram, Edge};

use crate::config::MapConfig;
use glam::DVec2;
use rand::Rng;

/// Generate the raw geometry for a configuration (no terrain)
///
/// Returns the sampled points and their diagram. Colors must be assigned
/// separately.
pub fn generate_geometry<R: Rng + ?Sized>(config: &MapConfig, rng: &mut R) -> (Vec<DVec2>, Diagram) {
    // Step 1: Sample the jittered grid
    let points = generate_grid_points(
        rng,
        config.grid_size,
        config.jitter,
        config.width,
        config.height,
    );

    // Step 2: Partition the map
    let diagram = compute_diagram(&points, config.bounding_box());

    (points, diagram)
}
