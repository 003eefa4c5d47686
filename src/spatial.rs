//! Spatial indexing for fast position-to-cell lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around a 2D KD-tree of cell sites
///
/// Nearest site is the same as "containing Voronoi cell", so this answers
/// click and brush queries in O(log n).
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f64, usize, 2, 32>>,
}

impl SpatialIndex {
    /// Build the index from site positions
    ///
    /// The index of each site in `sites` is what queries return.
    pub fn new(sites: &[DVec2]) -> Self {
        if sites.is_empty() {
            return Self { tree: None };
        }

        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();
        Self {
            tree: Some(ImmutableKdTree::new_from_slice(&points)),
        }
    }

    /// Index of the site nearest to `position`, or `None` for an empty index
    ///
    /// # Example
    ///
    /// ```
    /// use glam::DVec2;
    /// use rust_voronoi_map::SpatialIndex;
    ///
    /// let sites = vec![DVec2::new(10.0, 10.0), DVec2::new(90.0, 40.0)];
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(DVec2::new(70.0, 50.0)), Some(1));
    /// ```
    pub fn find_nearest(&self, position: DVec2) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
        Some(result.item)
    }
}
