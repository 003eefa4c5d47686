//! Voronoi terrain map generation
//!
//! A standalone library for generating 2D Voronoi maps colored by noise
//! height, suitable for drawing with any renderer (canvas, SVG, Bevy, etc.)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_voronoi_map::*;
//!
//! // Generate a map
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .grid_size(20).unwrap()
//!     .dimensions(2000, 2000).unwrap()
//!     .build().unwrap();
//!
//! let mut map = TerrainMap::generate(config, &HeightMap::terrain_preset()).unwrap();
//!
//! // Flood a lake
//! map.paint_region(DVec2::new(1000.0, 1000.0), 150.0, "#0c6687");
//!
//! // Generate mesh for rendering
//! let mesh = generate_mesh(&map);
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-polygon lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, height maps and polygons

// Modules
pub mod error;
pub mod config;
pub mod cell;
pub mod generation;
pub mod polygon;
pub mod terrain;
pub mod map;
pub mod mesh;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{MapError, Result};
pub use config::{MapConfig, MapConfigBuilder, MAX_POINT_COUNT};
pub use cell::TerrainPolygon;
pub use map::TerrainMap;
pub use terrain::{
    remap, ColorMapper, HeightBin, HeightMap, NoiseField, PerlinConfig, PerlinNoiseField, DEFAULT_COLOR,
};
pub use polygon::{order_boundary, Polygon, Positioned};
pub use generation::BoundingBox;
pub use mesh::{generate_mesh, parse_hex_color, MeshData, TerrainColor};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
