//! Terrain polygon record
//!
//! A drawable map cell: ordered boundary, site, sampled height and fill color.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::terrain::remap;

/// A single colored polygon of the terrain map
///
/// This is the record handed to renderers. Polygons are produced by
/// [TerrainMap](crate::TerrainMap) and only ever recolored afterwards;
/// geometry changes require a full regeneration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainPolygon {
    /// Index of the generating point in [TerrainMap::points](crate::TerrainMap::points)
    pub id: usize,

    /// The generating point (Voronoi site)
    ///
    /// Heights are sampled here, and region painting tests this point. It may
    /// lie slightly outside the map for border cells.
    pub site: DVec2,

    /// Boundary corners, clockwise on screen (y grows downward)
    ///
    /// Always at least 3 corners with no repeats.
    pub vertices: Vec<DVec2>,

    /// Noise value sampled at the site, in [-1, 1]
    pub height: f64,

    /// Fill color, conventionally `#RRGGBB`
    pub color: String,
}

impl TerrainPolygon {
    /// Create a new terrain cell
    ///
    /// This is typically called during map generation, not by user code.
    pub fn new(id: usize, site: DVec2, vertices: Vec<DVec2>, height: f64, color: String) -> Self {
        Self {
            id,
            site,
            vertices,
            height,
            color,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Height mapped onto a byte, -1 → 0 and 1 → 255
    pub fn height_byte(&self) -> u8 {
        remap(self.height, -1.0, 1.0, 0.0, 255.0).clamp(0.0, 255.0) as u8
    }

    /// Area of the cell polygon
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let doubled: f64 = (0..n)
            .map(|i| self.vertices[i].perp_dot(self.vertices[(i + 1) % n]))
            .sum();
        doubled.abs() * 0.5
    }

    /// Mean of the corners
    pub fn centroid(&self) -> DVec2 {
        let sum: DVec2 = self.vertices.iter().copied().sum();
        sum / self.vertices.len().max(1) as f64
    }

    /// Is `point` inside the cell or on its boundary?
    ///
    /// Relies on the clockwise convex ordering of `vertices`.
    pub fn contains(&self, point: DVec2) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            (b - a).perp_dot(point - a) >= 0.0
        })
    }

    /// Is the site within `radius` of `center` (boundary inclusive)?
    #[inline]
    pub fn site_within(&self, center: DVec2, radius: f64) -> bool {
        self.site.distance_squared(center) <= radius * radius
    }
}
