//! Height bins mapping noise values to terrain colors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Color returned when no bin matches a height
pub const DEFAULT_COLOR: &str = "#000000";

/// A half-open height interval `[min, max)` painted with one color
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HeightBin {
    /// Inclusive lower bound
    pub min: f64,
    /// Exclusive upper bound
    pub max: f64,
    /// Fill color, conventionally `#RRGGBB`
    pub color: String,
}

impl HeightBin {
    /// Does `value` fall inside `[min, max)`?
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// Ordered list of height bins
///
/// Bins are neither sorted nor checked for overlap. When several bins contain
/// a value, the one added **last** decides the color.
///
/// # Example
///
/// ```
/// use rust_voronoi_map::HeightMap;
///
/// let mut map = HeightMap::new();
/// map.add_bin(HeightMap::create_bin(0.0, 1.0, "#ffffff"));
/// map.add_bin(HeightMap::create_bin(0.5, 1.0, "#ff0000"));
///
/// assert_eq!(map.classify(0.2), "#ffffff");
/// assert_eq!(map.classify(0.7), "#ff0000");
/// assert_eq!(map.classify(3.0), "#000000");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightMap {
    bins: Vec<HeightBin>,
}

impl HeightMap {
    /// Create an empty height map (every value classifies to [DEFAULT_COLOR])
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list of bins, keeping their order
    pub fn from_bins(bins: Vec<HeightBin>) -> Self {
        Self { bins }
    }

    /// The four-band palette of the classic map editor: ocean, low forest,
    /// forest and snow across [-1, 1)
    pub fn terrain_preset() -> Self {
        Self::from_bins(vec![
            Self::create_bin(-1.0, -0.8, "#0c6687"),
            Self::create_bin(-0.8, 0.0, "#6dc965"),
            Self::create_bin(0.0, 0.8, "#569437"),
            Self::create_bin(0.8, 1.0, "#3a6325"),
        ])
    }

    /// Build a bin without validating the range
    pub fn create_bin(min: f64, max: f64, color: impl Into<String>) -> HeightBin {
        HeightBin {
            min,
            max,
            color: color.into(),
        }
    }

    /// Append a bin; it overrides earlier bins wherever they overlap
    pub fn add_bin(&mut self, bin: HeightBin) {
        self.bins.push(bin);
    }

    /// Bins in insertion order
    pub fn bins(&self) -> &[HeightBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Map a height to a color
    ///
    /// Every bin is visited; the last one containing `value` wins. NaN matches
    /// nothing.
    pub fn classify(&self, value: f64) -> &str {
        let mut color = None;
        for bin in &self.bins {
            if bin.contains(value) {
                color = Some(bin.color.as_str());
            }
        }
        color.unwrap_or(DEFAULT_COLOR)
    }
}

impl FromIterator<HeightBin> for HeightMap {
    fn from_iter<I: IntoIterator<Item = HeightBin>>(iter: I) -> Self {
        Self::from_bins(iter.into_iter().collect())
    }
}
