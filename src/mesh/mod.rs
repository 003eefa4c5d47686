//! Mesh generation for TerrainMap
//!
//! Generates engine-agnostic 2D mesh data from map polygons.

mod colors;

pub use colors::{parse_hex_color, TerrainColor, FALLBACK_COLOR};

use crate::cell::TerrainPolygon;
use crate::map::TerrainMap;
use log::warn;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
///
/// Positions are in map units with y growing downward.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions (2D map coordinates)
    pub positions: Vec<[f32; 2]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Generate mesh from a map
///
/// Each polygon is triangulated as a fan around its centroid. All vertices of
/// a polygon share its color; colors that are not valid hex strings are drawn
/// as [FALLBACK_COLOR].
pub fn generate_mesh(map: &TerrainMap) -> MeshData {
    let mut mesh = MeshData::default();
    let mut invalid = 0usize;

    for polygon in map.polygons() {
        let color = parse_hex_color(&polygon.color).unwrap_or_else(|| {
            invalid += 1;
            FALLBACK_COLOR
        });
        triangulate_polygon(polygon, color, &mut mesh);
    }

    if invalid > 0 {
        warn!("{} polygons had unparseable colors, drawn as black", invalid);
    }

    mesh
}

/// Triangulate a single polygon as a triangle fan
fn triangulate_polygon(polygon: &TerrainPolygon, color: TerrainColor, mesh: &mut MeshData) {
    let num_vertices = polygon.vertices.len();
    if num_vertices < 3 {
        return;
    }

    let base_idx = mesh.positions.len() as u32;
    let center = polygon.centroid();

    // Add center vertex
    mesh.positions.push([center.x as f32, center.y as f32]);
    mesh.colors.push(color);

    // Add boundary vertices
    for vertex in &polygon.vertices {
        mesh.positions.push([vertex.x as f32, vertex.y as f32]);
        mesh.colors.push(color);
    }

    // Create triangle fan indices
    for i in 0..num_vertices {
        let next_i = (i + 1) % num_vertices;
        mesh.indices.push(base_idx); // Center
        mesh.indices.push(base_idx + 1 + i as u32);
        mesh.indices.push(base_idx + 1 + next_i as u32);
    }
}
