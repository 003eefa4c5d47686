//! Voronoi cell construction from a Delaunay triangulation
//!
//! The triangulation is delegated to `delaunator`. Each cell starts as the
//! bounding rectangle and is clipped by the perpendicular bisector between
//! its site and every Delaunay neighbour. Clipping against all Delaunay
//! neighbours yields the exact Voronoi region, already cut to the box, so
//! border cells need no special handling.

use delaunator::triangulate;
use glam::DVec2;
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};

/// Points closer than this to a bisector count as lying on it
const EDGE_TOLERANCE: f64 = 1.0e-9;

/// Axis-aligned clipping rectangle in screen orientation (y grows downward)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge
    pub xl: f64,
    /// Right edge
    pub xr: f64,
    /// Top edge
    pub yt: f64,
    /// Bottom edge
    pub yb: f64,
}

impl BoundingBox {
    /// Box spanning `[0, width] x [0, height]`
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            xl: 0.0,
            xr: width,
            yt: 0.0,
            yb: height,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xr - self.xl
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.yb - self.yt
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.xl && point.x <= self.xr && point.y >= self.yt && point.y <= self.yb
    }

    /// Corners walked clockwise on screen, starting top-left
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.xl, self.yt),
            DVec2::new(self.xr, self.yt),
            DVec2::new(self.xr, self.yb),
            DVec2::new(self.xl, self.yb),
        ]
    }
}

/// A boundary segment of a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub va: DVec2,
    pub vb: DVec2,
}

/// A Voronoi region, clipped to the bounding box
///
/// `halfedges` walk the boundary in order. The list is empty when the site is a
/// duplicate of an earlier one, is not finite, or its region misses the box.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Index of the generating point in the input slice
    pub site_index: usize,
    /// The generating point
    pub site: DVec2,
    /// Boundary segments
    pub halfedges: Vec<Edge>,
}

impl Cell {
    fn empty(site_index: usize, site: DVec2) -> Self {
        Self {
            site_index,
            site,
            halfedges: Vec::new(),
        }
    }

    fn from_polygon(site_index: usize, site: DVec2, polygon: &[DVec2]) -> Self {
        let mut polygon = polygon.to_vec();
        polygon.dedup_by(|b, a| a.distance(*b) <= EDGE_TOLERANCE);
        while polygon.len() > 1
            && polygon[0].distance(polygon[polygon.len() - 1]) <= EDGE_TOLERANCE
        {
            polygon.pop();
        }

        if polygon.len() < 3 {
            return Self::empty(site_index, site);
        }
        let halfedges = (0..polygon.len())
            .map(|i| Edge {
                va: polygon[i],
                vb: polygon[(i + 1) % polygon.len()],
            })
            .collect();
        Self {
            site_index,
            site,
            halfedges,
        }
    }

    /// Does this cell have no area inside the box?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.halfedges.is_empty()
    }
}

/// The result of a Voronoi computation: one cell per input point, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub bbox: BoundingBox,
    pub cells: Vec<Cell>,
}

impl Diagram {
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// Compute the Voronoi diagram of `points` clipped to `bbox`
///
/// Never fails: degenerate inputs (no points, one point, all points on a
/// line, duplicated points) produce empty or minimal cells instead.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use rust_voronoi_map::generation::{compute_diagram, BoundingBox};
///
/// let points = vec![DVec2::new(25.0, 50.0), DVec2::new(75.0, 50.0)];
/// let diagram = compute_diagram(&points, BoundingBox::new(100.0, 100.0));
///
/// assert_eq!(diagram.cell_count(), 2);
/// assert_eq!(diagram.cells()[0].halfedges.len(), 4);
/// ```
pub fn compute_diagram(points: &[DVec2], bbox: BoundingBox) -> Diagram {
    // First occurrence of each distinct, finite point owns the cell
    let mut seen: HashMap<(u64, u64), usize> = HashMap::new();
    let mut unique: Vec<usize> = Vec::with_capacity(points.len());
    for (index, point) in points.iter().enumerate() {
        if !point.is_finite() {
            continue;
        }
        let key = (point.x.to_bits(), point.y.to_bits());
        if let std::collections::hash_map::Entry::Vacant(entry) = seen.entry(key) {
            entry.insert(index);
            unique.push(index);
        }
    }

    let skipped = points.len() - unique.len();
    if skipped > 0 {
        debug!("Skipping {} duplicate or non-finite sites", skipped);
    }

    let mut cells: Vec<Cell> = points
        .iter()
        .enumerate()
        .map(|(index, &site)| Cell::empty(index, site))
        .collect();

    if unique.len() < 2 {
        if let Some(&only) = unique.first() {
            cells[only] = Cell::from_polygon(only, points[only], &bbox.corners());
        }
        return Diagram { bbox, cells };
    }

    let sites: Vec<DVec2> = unique.iter().map(|&i| points[i]).collect();
    let neighbor_sets = find_neighbors(&sites);

    for (local, &index) in unique.iter().enumerate() {
        let site = sites[local];
        let mut polygon: Vec<DVec2> = bbox.corners().to_vec();

        for &neighbor in &neighbor_sets[local] {
            polygon = clip_polygon_by_bisector(&polygon, site, sites[neighbor]);
            if polygon.is_empty() {
                break;
            }
        }

        cells[index] = Cell::from_polygon(index, site, &polygon);
    }

    Diagram { bbox, cells }
}

/// Delaunay neighbours for each site, by local index
///
/// Falls back to "every other site" when the triangulation is empty (all
/// points collinear) or misses a site, which is slower but still exact.
fn find_neighbors(sites: &[DVec2]) -> Vec<Vec<usize>> {
    let delaunay_points: Vec<delaunator::Point> = sites
        .iter()
        .map(|p| delaunator::Point { x: p.x, y: p.y })
        .collect();
    let triangulation = triangulate(&delaunay_points);

    let mut sets = vec![BTreeSet::new(); sites.len()];
    for triangle in triangulation.triangles.chunks_exact(3) {
        let (a, b, c) = (triangle[0], triangle[1], triangle[2]);
        sets[a].insert(b);
        sets[b].insert(a);
        sets[b].insert(c);
        sets[c].insert(b);
        sets[c].insert(a);
        sets[a].insert(c);
    }

    if triangulation.triangles.is_empty() {
        warn!(
            "Triangulation of {} sites is empty (collinear input), clipping against all sites",
            sites.len()
        );
    }

    sets.into_iter()
        .enumerate()
        .map(|(local, set)| {
            if set.is_empty() {
                (0..sites.len()).filter(|&other| other != local).collect()
            } else {
                set.into_iter().collect()
            }
        })
        .collect()
}

/// Signed distance from `p` to the bisector of `site` and `neighbor`
///
/// Negative on the site's side.
fn signed_distance_to_bisector(p: DVec2, site: DVec2, neighbor: DVec2) -> f64 {
    let mid = (site + neighbor) * 0.5;
    let dir = neighbor - site;
    (p - mid).dot(dir) / dir.length()
}

/// Sutherland-Hodgman step: keep the part of a convex polygon on the site's side
fn clip_polygon_by_bisector(polygon: &[DVec2], site: DVec2, neighbor: DVec2) -> Vec<DVec2> {
    let Some(&last) = polygon.last() else {
        return Vec::new();
    };

    let mut result = Vec::with_capacity(polygon.len() + 1);
    let mut prev = last;
    let mut prev_dist = signed_distance_to_bisector(prev, site, neighbor);
    let mut prev_inside = prev_dist <= EDGE_TOLERANCE;

    for &current in polygon {
        let curr_dist = signed_distance_to_bisector(current, site, neighbor);
        let curr_inside = curr_dist <= EDGE_TOLERANCE;

        // A crossing through an endpoint lying on the bisector adds nothing new
        let on_line = prev_dist.abs() <= EDGE_TOLERANCE || curr_dist.abs() <= EDGE_TOLERANCE;
        if curr_inside != prev_inside && !on_line {
            result.push(intersect_segment(prev, current, prev_dist, curr_dist));
        }
        if curr_inside {
            result.push(current);
        }

        prev = current;
        prev_dist = curr_dist;
        prev_inside = curr_inside;
    }

    result
}

fn intersect_segment(start: DVec2, end: DVec2, start_dist: f64, end_dist: f64) -> DVec2 {
    let denom = start_dist - end_dist;
    let t = if denom.abs() < f64::EPSILON {
        0.5
    } else {
        (start_dist / denom).clamp(0.0, 1.0)
    };
    start.lerp(end, t)
}
