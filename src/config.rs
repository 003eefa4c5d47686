//! Terrain map configuration and builder
//!
//! This module provides configuration types for deterministic map generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::generation::{grid_point_count, BoundingBox};
use crate::terrain::PerlinConfig;

/// Largest number of points a configuration may generate
pub const MAX_POINT_COUNT: usize = 4_000_000;

/// Configuration for deterministic map generation
///
/// The same configuration and height map always produce the same map.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .dimensions(400, 300)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.terrain_seed, 42);
/// assert_eq!(config.point_count(), 21 * 16);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Seed for the point jitter
    pub seed: u32,

    /// Seed for the height noise (separate from point placement)
    ///
    /// This allows the same cell layout with different terrain.
    pub terrain_seed: u32,

    /// Spacing between grid nodes, in map units
    pub grid_size: u32,

    /// Maximum displacement of a point from its grid node, per axis
    ///
    /// - 0.0: perfectly regular square cells
    /// - grid_size: irregular, natural looking cells (default)
    pub jitter: f64,

    /// Map width in map units
    pub width: u32,

    /// Map height in map units
    pub height: u32,

    /// Noise parameters used for cell heights
    pub noise: PerlinConfig,
}

impl MapConfig {
    /// Clipping rectangle `[0, width] x [0, height]`
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.width as f64, self.height as f64)
    }

    /// Number of points (and cells) this configuration generates
    ///
    /// Saturates at `usize::MAX` for grids that [validate](MapConfig::validate) rejects.
    #[inline]
    pub fn point_count(&self) -> usize {
        grid_point_count(self.grid_size, self.width, self.height).unwrap_or(usize::MAX)
    }

    /// Check the invariants the builder enforces
    ///
    /// Fields are public, so configs assembled by hand are re-checked before
    /// generation.
    pub fn validate(&self) -> Result<()> {
        validate_grid_size(self.grid_size)?;
        validate_jitter(self.jitter)?;
        validate_dimensions(self.width, self.height)?;
        validate_noise(&self.noise)?;
        validate_point_count(self.grid_size, self.width, self.height)?;
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            terrain_seed: 0,
            grid_size: 20,
            jitter: 20.0,
            width: 2000,
            height: 2000,
            noise: PerlinConfig::default(),
        }
    }
}

fn validate_grid_size(grid_size: u32) -> Result<()> {
    if grid_size == 0 {
        return Err(MapError::InvalidConfig(
            "Grid size must be positive (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_jitter(jitter: f64) -> Result<()> {
    if !jitter.is_finite() || jitter < 0.0 {
        return Err(MapError::InvalidConfig(format!(
            "Jitter must be finite and >= 0 (got {})",
            jitter
        )));
    }
    Ok(())
}

fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(MapError::InvalidConfig(format!(
            "Map dimensions must be positive (got {}x{})",
            width, height
        )));
    }
    Ok(())
}

fn validate_point_count(grid_size: u32, width: u32, height: u32) -> Result<()> {
    match grid_point_count(grid_size, width, height) {
        Some(count) if count <= MAX_POINT_COUNT => Ok(()),
        _ => Err(MapError::InvalidConfig(format!(
            "Grid {} over {}x{} exceeds {} points",
            grid_size, width, height, MAX_POINT_COUNT
        ))),
    }
}

fn validate_noise(noise: &PerlinConfig) -> Result<()> {
    if !noise.frequency.is_finite() || noise.frequency <= 0.0 {
        return Err(MapError::InvalidConfig(format!(
            "Noise frequency must be positive (got {})",
            noise.frequency
        )));
    }
    if noise.octaves == 0 {
        return Err(MapError::InvalidConfig(
            "Noise octaves must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Builder for creating MapConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_voronoi_map::*;
///
/// // Use defaults
/// let config = MapConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = MapConfigBuilder::new()
///     .seed(12345)
///     .grid_size(10)
///     .unwrap()
///     .jitter(4.0)
///     .unwrap()
///     .terrain_seed(67890)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u32>,
    terrain_seed: Option<u32>,
    grid_size: u32,
    jitter: f64,
    width: u32,
    height: u32,
    noise: PerlinConfig,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - terrain_seed: Same as seed
    /// - grid_size: 20
    /// - jitter: 20.0
    /// - dimensions: 2000x2000
    /// - noise: [PerlinConfig::default]
    pub fn new() -> Self {
        let defaults = MapConfig::default();
        Self {
            seed: None,
            terrain_seed: None,
            grid_size: defaults.grid_size,
            jitter: defaults.jitter,
            width: defaults.width,
            height: defaults.height,
            noise: defaults.noise,
        }
    }

    /// Set the seed for point placement
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a separate terrain seed
    ///
    /// If not set, the terrain seed will match the point seed.
    pub fn terrain_seed(mut self, seed: u32) -> Self {
        self.terrain_seed = Some(seed);
        self
    }

    /// Set the grid spacing
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the size is 0
    pub fn grid_size(mut self, grid_size: u32) -> Result<Self> {
        validate_grid_size(grid_size)?;
        self.grid_size = grid_size;
        Ok(self)
    }

    /// Set the per-axis jitter amplitude
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if jitter is negative or not finite
    pub fn jitter(mut self, jitter: f64) -> Result<Self> {
        validate_jitter(jitter)?;
        self.jitter = jitter;
        Ok(self)
    }

    /// Set the map size
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is 0
    pub fn dimensions(mut self, width: u32, height: u32) -> Result<Self> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Set the noise parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the frequency is not positive or there are no octaves
    pub fn noise(mut self, noise: PerlinConfig) -> Result<Self> {
        validate_noise(&noise)?;
        self.noise = noise;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the grid would hold more than [MAX_POINT_COUNT] points
    pub fn build(self) -> Result<MapConfig> {
        validate_point_count(self.grid_size, self.width, self.height)?;
        let seed = self.seed.unwrap_or_else(|| rand::random());
        let terrain_seed = self.terrain_seed.unwrap_or(seed);

        Ok(MapConfig {
            seed,
            terrain_seed,
            grid_size: self.grid_size,
            jitter: self.jitter,
            width: self.width,
            height: self.height,
            noise: self.noise,
        })
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
