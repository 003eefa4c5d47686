//! TerrainMap main structure

use std::time::Instant;

use glam::DVec2;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cell::TerrainPolygon;
use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::generation::generate_geometry;
use crate::polygon::{extract_polygons, Polygon};
use crate::terrain::{ColorMapper, HeightMap, NoiseField, PerlinNoiseField};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete colored Voronoi map
///
/// Holds everything one pipeline run produced: the sampled points, the raw
/// per-cell polygons and the ordered, colored polygons ready to draw. The map
/// is only ever recolored in place; new geometry means a full
/// [regenerate](TerrainMap::regenerate).
///
/// # Examples
///
/// ```
/// use rust_voronoi_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .dimensions(200, 200)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let map = TerrainMap::generate(config, &HeightMap::terrain_preset()).unwrap();
/// println!("Generated {} polygons", map.polygon_count());
///
/// if let Some(polygon) = map.get_polygon(0) {
///     println!("Polygon 0 is {}", polygon.color);
/// }
/// ```
#[derive(Clone)]
pub struct TerrainMap {
    /// Configuration used to generate this map
    config: MapConfig,

    /// Jittered grid points, one per Voronoi site
    points: Vec<DVec2>,

    /// Unordered polygon per point (may be empty for degenerate cells)
    raw_polygons: Vec<Polygon>,

    /// Drawable polygons in point order, degenerate cells skipped
    polygons: Vec<TerrainPolygon>,

    /// Site lookup for position queries (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl TerrainMap {
    /// Generate a map with Perlin heights classified by `height_map`
    ///
    /// Points are jittered from a ChaCha8 stream seeded with `config.seed`;
    /// heights come from [PerlinNoiseField] seeded with `config.terrain_seed`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_map::*;
    ///
    /// let config = MapConfigBuilder::new()
    ///     .seed(12345)
    ///     .grid_size(20)
    ///     .unwrap()
    ///     .jitter(0.0)
    ///     .unwrap()
    ///     .dimensions(100, 100)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let map = TerrainMap::generate(config, &HeightMap::terrain_preset()).unwrap();
    /// assert_eq!(map.points().len(), 36);
    /// assert_eq!(map.polygon_count(), 36);
    /// ```
    pub fn generate(config: MapConfig, height_map: &HeightMap) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed as u64);
        let field = PerlinNoiseField::with_config(config.terrain_seed, config.noise);
        Self::generate_with(config, &mut rng, &field, height_map)
    }

    /// Generate a map with custom collaborators
    ///
    /// `rng` drives the point jitter, `field` is sampled once at each site and
    /// `mapper` turns the sampled height into a fill color.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    /// use rust_voronoi_map::*;
    ///
    /// struct Flat;
    ///
    /// impl NoiseField for Flat {
    ///     fn sample(&self, _x: f64, _y: f64) -> f64 {
    ///         0.5
    ///     }
    /// }
    ///
    /// let config = MapConfigBuilder::new().seed(7).dimensions(100, 100).unwrap().build().unwrap();
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let map = TerrainMap::generate_with(config, &mut rng, &Flat, &HeightMap::terrain_preset()).unwrap();
    /// assert!(map.polygons().iter().all(|p| p.color == "#569437"));
    /// ```
    pub fn generate_with<R, F, C>(config: MapConfig, rng: &mut R, field: &F, mapper: &C) -> Result<Self>
    where
        R: Rng + ?Sized,
        F: NoiseField + ?Sized,
        C: ColorMapper + ?Sized,
    {
        config.validate()?;
        info!(
            "Generating {}x{} map (grid {}, jitter {}, seed {})",
            config.width, config.height, config.grid_size, config.jitter, config.seed
        );
        let start = Instant::now();

        // Points and diagram (geometry only, no terrain)
        let (points, diagram) = generate_geometry(&config, rng);
        debug!(
            "Built diagram for {} points in {}ms",
            points.len(),
            start.elapsed().as_millis()
        );

        let raw_polygons = extract_polygons(&diagram);

        // Order, sample and color every drawable polygon
        let polygons: Vec<TerrainPolygon> = raw_polygons
            .iter()
            .enumerate()
            .filter_map(|(id, raw)| {
                let vertices = raw.ordered()?.into_iter().map(|v| v.position).collect();
                let height = field.sample(raw.site.x, raw.site.y);
                let color = mapper.map_color(height);
                Some(TerrainPolygon::new(id, raw.site, vertices, height, color))
            })
            .collect();

        let skipped = raw_polygons.len() - polygons.len();
        if skipped > 0 {
            debug!("Skipped {} polygons with fewer than 3 corners", skipped);
        }

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let sites: Vec<DVec2> = polygons.iter().map(|p| p.site).collect();
            SpatialIndex::new(&sites)
        };

        info!(
            "Generated {} polygons in {}ms",
            polygons.len(),
            start.elapsed().as_millis()
        );

        Ok(Self {
            config,
            points,
            raw_polygons,
            polygons,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Throw away everything and run the whole pipeline again
    ///
    /// On error the current map is left untouched.
    pub fn regenerate(&mut self, config: MapConfig, height_map: &HeightMap) -> Result<()> {
        info!("Discarding map with {} polygons", self.polygons.len());
        *self = Self::generate(config, height_map)?;
        Ok(())
    }

    /// Get the configuration used to generate this map
    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Sampled points, in generation order
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Unordered polygons, one per point
    #[inline]
    pub fn raw_polygons(&self) -> &[Polygon] {
        &self.raw_polygons
    }

    /// Ordered, colored polygons ready for rendering
    ///
    /// # Example
    ///
    /// ```
    /// # use rust_voronoi_map::*;
    /// # let config = MapConfigBuilder::new().seed(1).dimensions(100, 100).unwrap().build().unwrap();
    /// # let map = TerrainMap::generate(config, &HeightMap::terrain_preset()).unwrap();
    /// for polygon in map.polygons() {
    ///     assert!(polygon.vertices.len() >= 3);
    /// }
    /// ```
    #[inline]
    pub fn polygons(&self) -> &[TerrainPolygon] {
        &self.polygons
    }

    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Get a polygon by its position in [polygons](TerrainMap::polygons)
    #[inline]
    pub fn get_polygon(&self, index: usize) -> Option<&TerrainPolygon> {
        self.polygons.get(index)
    }

    /// Recolor every polygon whose site lies inside the circle
    ///
    /// The circle boundary counts as inside. Returns how many polygons were
    /// recolored.
    ///
    /// # Example
    ///
    /// ```
    /// # use rust_voronoi_map::*;
    /// # let config = MapConfigBuilder::new().seed(1).dimensions(200, 200).unwrap().build().unwrap();
    /// let mut map = TerrainMap::generate(config, &HeightMap::terrain_preset()).unwrap();
    /// let painted = map.paint_region(DVec2::new(100.0, 100.0), 40.0, "#0c6687");
    /// assert!(painted > 0);
    /// ```
    pub fn paint_region(&mut self, center: DVec2, radius: f64, color: &str) -> usize {
        let mut painted = 0;
        for polygon in self.polygons.iter_mut().filter(|p| p.site_within(center, radius)) {
            polygon.color = color.to_string();
            painted += 1;
        }
        debug!(
            "Painted {} polygons {} around {:?} (radius {})",
            painted, color, center, radius
        );
        painted
    }

    /// Reclassify every polygon from its stored height
    ///
    /// Geometry and heights are kept; only colors change.
    pub fn recolor<C: ColorMapper + ?Sized>(&mut self, mapper: &C) {
        for polygon in &mut self.polygons {
            polygon.color = mapper.map_color(polygon.height);
        }
        debug!("Recolored {} polygons", self.polygons.len());
    }

    /// Set the color of a single polygon
    ///
    /// # Errors
    ///
    /// Returns `PolygonNotFound` if `index` is out of range
    pub fn set_polygon_color(&mut self, index: usize, color: &str) -> Result<()> {
        let polygon = self
            .polygons
            .get_mut(index)
            .ok_or(MapError::PolygonNotFound(index))?;
        polygon.color = color.to_string();
        Ok(())
    }

    /// Find the polygon containing a position (requires spatial-index feature)
    ///
    /// Uses the nearest site, which is the containing cell for any position
    /// inside the map. Returns `None` only for a map without polygons.
    ///
    /// # Example
    ///
    /// ```
    /// # use rust_voronoi_map::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let config = MapConfigBuilder::new().seed(1).dimensions(100, 100).unwrap().build().unwrap();
    /// # let map = TerrainMap::generate(config, &HeightMap::terrain_preset()).unwrap();
    /// if let Some(index) = map.find_polygon_at(DVec2::new(50.0, 50.0)) {
    ///     println!("Clicked polygon {}", index);
    /// }
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_polygon_at(&self, position: DVec2) -> Option<usize> {
        self.spatial_index.find_nearest(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfigBuilder;
    use crate::polygon::signed_area_doubled;
    use crate::terrain::DEFAULT_COLOR;

    fn regular_config() -> MapConfig {
        MapConfigBuilder::new()
            .seed(42)
            .grid_size(20)
            .unwrap()
            .jitter(0.0)
            .unwrap()
            .dimensions(100, 100)
            .unwrap()
            .build()
            .unwrap()
    }

    fn jittered_config(seed: u32) -> MapConfig {
        MapConfigBuilder::new()
            .seed(seed)
            .grid_size(25)
            .unwrap()
            .jitter(12.0)
            .unwrap()
            .dimensions(300, 200)
            .unwrap()
            .build()
            .unwrap()
    }

    struct Constant(f64);

    impl NoiseField for Constant {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_regular_grid_pipeline() {
        let height_map = HeightMap::terrain_preset();
        let map = TerrainMap::generate(regular_config(), &height_map).unwrap();

        assert_eq!(map.points().len(), 36);
        assert_eq!(map.raw_polygons().len(), 36);
        assert_eq!(map.polygon_count(), 36);

        for polygon in map.polygons() {
            assert!(polygon.vertex_count() >= 3);
            assert_eq!(polygon.color, height_map.classify(polygon.height));
            assert_eq!(polygon.site, map.points()[polygon.id]);
        }
    }

    #[test]
    fn test_polygons_tile_the_map() {
        let map = TerrainMap::generate(regular_config(), &HeightMap::terrain_preset()).unwrap();

        let total: f64 = map.polygons().iter().map(|p| p.area()).sum();
        assert!((total - 100.0 * 100.0).abs() < 1e-6);

        // corner cell of a regular grid is a 10x10 square
        let corner = map.get_polygon(0).unwrap();
        assert_eq!(corner.site, DVec2::ZERO);
        assert!((corner.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygons_are_clockwise() {
        let map = TerrainMap::generate(jittered_config(9), &HeightMap::terrain_preset()).unwrap();

        for polygon in map.polygons() {
            assert!(signed_area_doubled(&polygon.vertices) > 0.0);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let height_map = HeightMap::terrain_preset();
        let a = TerrainMap::generate(jittered_config(5), &height_map).unwrap();
        let b = TerrainMap::generate(jittered_config(5), &height_map).unwrap();

        assert_eq!(a.points(), b.points());
        assert_eq!(a.polygons(), b.polygons());
    }

    #[test]
    fn test_terrain_seed_keeps_geometry() {
        let height_map = HeightMap::terrain_preset();
        let mut config = jittered_config(5);
        let a = TerrainMap::generate(config, &height_map).unwrap();
        config.terrain_seed = config.terrain_seed.wrapping_add(1);
        let b = TerrainMap::generate(config, &height_map).unwrap();

        assert_eq!(a.points(), b.points());
        assert_eq!(a.polygon_count(), b.polygon_count());
        let differs = a
            .polygons()
            .iter()
            .zip(b.polygons())
            .any(|(pa, pb)| pa.height != pb.height);
        assert!(differs);
    }

    #[test]
    fn test_empty_height_map_gives_default_color() {
        let map = TerrainMap::generate(jittered_config(1), &HeightMap::new()).unwrap();

        assert!(map.polygon_count() > 0);
        assert!(map.polygons().iter().all(|p| p.color == DEFAULT_COLOR));
    }

    #[test]
    fn test_generate_with_custom_field() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let height_map = HeightMap::terrain_preset();
        let map = TerrainMap::generate_with(regular_config(), &mut rng, &Constant(-0.9), &height_map).unwrap();

        assert!(map.polygons().iter().all(|p| p.color == "#0c6687"));
        assert!(map.polygons().iter().all(|p| p.height == -0.9));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MapConfig {
            grid_size: 0,
            ..Default::default()
        };
        let result = TerrainMap::generate(config, &HeightMap::terrain_preset());
        assert!(matches!(result, Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let config = MapConfig {
            grid_size: 1,
            width: u32::MAX,
            height: u32::MAX,
            ..Default::default()
        };
        let result = TerrainMap::generate(config, &HeightMap::terrain_preset());
        assert!(matches!(result, Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn test_paint_region() {
        let mut map = TerrainMap::generate(regular_config(), &HeightMap::terrain_preset()).unwrap();

        // only sites (40,40) (60,40) (40,60) (60,60) are within reach
        let center = DVec2::new(50.0, 50.0);
        let radius = 15.0;
        let painted = map.paint_region(center, radius, "#ffffff");

        assert_eq!(painted, 4);
        for polygon in map.polygons() {
            let inside = polygon.site.distance_squared(center) <= radius * radius;
            assert_eq!(polygon.color == "#ffffff", inside);
        }
    }

    #[test]
    fn test_paint_region_boundary_inclusive() {
        let mut map = TerrainMap::generate(regular_config(), &HeightMap::terrain_preset()).unwrap();

        // the four axis neighbours of (40,40) lie exactly on the circle
        assert_eq!(map.paint_region(DVec2::new(40.0, 40.0), 20.0, "#ffffff"), 5);
    }

    #[test]
    fn test_paint_region_outside_map() {
        let mut map = TerrainMap::generate(regular_config(), &HeightMap::terrain_preset()).unwrap();
        let before = map.polygons().to_vec();

        assert_eq!(map.paint_region(DVec2::new(-500.0, -500.0), 10.0, "#ffffff"), 0);
        assert_eq!(map.polygons(), before.as_slice());
    }

    #[test]
    fn test_recolor() {
        let mut map = TerrainMap::generate(jittered_config(2), &HeightMap::terrain_preset()).unwrap();
        let heights: Vec<f64> = map.polygons().iter().map(|p| p.height).collect();

        let mut everything = HeightMap::new();
        everything.add_bin(HeightMap::create_bin(-2.0, 2.0, "#123456"));
        map.recolor(&everything);

        assert!(map.polygons().iter().all(|p| p.color == "#123456"));
        let after: Vec<f64> = map.polygons().iter().map(|p| p.height).collect();
        assert_eq!(heights, after);
    }

    #[test]
    fn test_set_polygon_color() {
        let mut map = TerrainMap::generate(regular_config(), &HeightMap::terrain_preset()).unwrap();

        map.set_polygon_color(3, "#abcdef").unwrap();
        assert_eq!(map.get_polygon(3).unwrap().color, "#abcdef");

        let count = map.polygon_count();
        assert!(matches!(
            map.set_polygon_color(count, "#abcdef"),
            Err(MapError::PolygonNotFound(i)) if i == count
        ));
    }

    #[test]
    fn test_regenerate_replaces_everything() {
        let height_map = HeightMap::terrain_preset();
        let mut map = TerrainMap::generate(regular_config(), &height_map).unwrap();
        map.paint_region(DVec2::new(50.0, 50.0), 1000.0, "#ffffff");

        let config = jittered_config(11);
        map.regenerate(config, &height_map).unwrap();

        assert_eq!(*map.config(), config);
        assert_eq!(map.points().len(), config.point_count());
        assert!(map.polygons().iter().all(|p| p.color != "#ffffff"));
    }

    #[test]
    fn test_failed_regenerate_keeps_map() {
        let height_map = HeightMap::terrain_preset();
        let mut map = TerrainMap::generate(regular_config(), &height_map).unwrap();
        let bad = MapConfig {
            width: 0,
            ..regular_config()
        };

        assert!(map.regenerate(bad, &height_map).is_err());
        assert_eq!(map.polygon_count(), 36);
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_polygon_at() {
        let map = TerrainMap::generate(jittered_config(4), &HeightMap::terrain_preset()).unwrap();

        for (index, polygon) in map.polygons().iter().enumerate().step_by(7) {
            assert_eq!(map.find_polygon_at(polygon.site), Some(index));
        }

        // a point inside a cell resolves to that cell
        let polygon = map.get_polygon(10).unwrap();
        let inside = polygon.centroid();
        assert!(polygon.contains(inside));
        assert_eq!(map.find_polygon_at(inside), Some(10));
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_polygon_at_regular_grid() {
        // sites share x and y values along every grid line
        let map = TerrainMap::generate(regular_config(), &HeightMap::terrain_preset()).unwrap();

        for (index, polygon) in map.polygons().iter().enumerate() {
            assert_eq!(map.find_polygon_at(polygon.site), Some(index));
        }

        // corners and edges shared by several cells resolve to one of the nearest sites
        for query in [
            DVec2::new(10.0, 40.0),
            DVec2::new(50.0, 50.0),
            DVec2::new(30.0, 0.0),
            DVec2::new(90.0, 70.0),
        ] {
            let nearest = map
                .polygons()
                .iter()
                .map(|p| p.site.distance(query))
                .fold(f64::INFINITY, f64::min);
            let index = map.find_polygon_at(query).unwrap();
            let found = map.get_polygon(index).unwrap().site.distance(query);
            assert!((found - nearest).abs() < 1e-9, "{:?} resolved to polygon {}", query, index);
        }
    }
}
