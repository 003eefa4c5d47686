//! Polygon extraction from Voronoi cells
//!
//! Every half-edge contributes both of its endpoints, so each corner shows up
//! at least twice. Extraction keeps the first occurrence of each corner and
//! leaves ordering to [order_boundary].

mod ordering;

pub use ordering::{order_boundary, signed_area_doubled, Positioned};

use crate::generation::Diagram;
use glam::DVec2;
use std::collections::HashSet;

/// Grid resolution used to merge vertices that differ only by rounding noise
const KEY_RESOLUTION: f64 = 1.0e-6;

/// Uniqueness key for a vertex: its coordinates snapped to a fine grid
///
/// Distinct corners never share a key unless they are within
/// `KEY_RESOLUTION` of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey(i64, i64);

impl From<DVec2> for VertexKey {
    fn from(position: DVec2) -> Self {
        Self(
            (position.x / KEY_RESOLUTION).round() as i64,
            (position.y / KEY_RESOLUTION).round() as i64,
        )
    }
}

/// A polygon corner tagged with the site of the cell it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonVertex {
    pub position: DVec2,
    pub key: VertexKey,
    pub site: DVec2,
}

impl PolygonVertex {
    pub fn new(position: DVec2, site: DVec2) -> Self {
        Self {
            position,
            key: VertexKey::from(position),
            site,
        }
    }
}

impl Positioned for PolygonVertex {
    #[inline]
    fn position(&self) -> DVec2 {
        self.position
    }
}

/// The deduplicated, unordered corners of one Voronoi cell
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Site of the originating cell
    pub site: DVec2,
    /// Corners in first-seen order
    pub vertices: Vec<PolygonVertex>,
}

impl Polygon {
    /// Can this polygon be drawn (at least 3 distinct corners)?
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.vertices.len() >= 3
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Corners in clockwise boundary order, or `None` if not drawable
    pub fn ordered(&self) -> Option<Vec<PolygonVertex>> {
        order_boundary(&self.vertices)
    }

    /// Mean of the corners; inside the polygon since cells are convex
    pub fn centroid(&self) -> Option<DVec2> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum: DVec2 = self.vertices.iter().map(|v| v.position).sum();
        Some(sum / self.vertices.len() as f64)
    }
}

/// Extract one polygon per cell, in cell order
///
/// Empty cells give empty polygons; callers skip anything that is not
/// [drawable](Polygon::is_drawable).
pub fn extract_polygons(diagram: &Diagram) -> Vec<Polygon> {
    diagram
        .cells()
        .iter()
        .map(|cell| {
            let mut seen = HashSet::with_capacity(cell.halfedges.len());
            let vertices = cell
                .halfedges
                .iter()
                .flat_map(|edge| [edge.va, edge.vb])
                .map(|position| PolygonVertex::new(position, cell.site))
                .filter(|vertex| seen.insert(vertex.key))
                .collect();

            Polygon {
                site: cell.site,
                vertices,
            }
        })
        .collect()
}
