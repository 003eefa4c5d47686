//! 2D Perlin noise implementation
//!
//! Gradient noise on the plane using Ken Perlin's permutation table and
//! quintic fade curve. Everything here is plain arithmetic over a fixed table,
//! so the same seed and coordinates give bit-identical output on every run.

/// Configuration for Perlin noise generation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerlinConfig {
    /// Scale applied to map coordinates before sampling (lower = larger features)
    pub frequency: f64,
    /// Number of octaves for fractal detail layers
    pub octaves: usize,
    /// Amplitude decay per octave (controls roughness)
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            frequency: 0.005,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

// ============================================================================
// PERMUTATION TABLE
// ============================================================================
// Standard 256-element permutation table from Ken Perlin's reference implementation.
// This table must remain unchanged to keep maps reproducible.
const PERM: [u32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Hash a lattice corner together with the seed
///
/// The seed is scrambled with a linear congruential step, XORed into each
/// coordinate, then the coordinates go through two chained table lookups.
#[inline]
fn hash(x: i32, y: i32, seed: u32) -> u32 {
    let seed_hash = (seed.wrapping_mul(1103515245).wrapping_add(12345)) >> 8;
    let ix = ((x as u32) ^ seed_hash) & 255;
    let iy = ((y as u32) ^ (seed_hash >> 8)) & 255;
    let a = PERM[ix as usize];
    PERM[((a + iy) & 255) as usize]
}

/// Dot product of the offset with one of the four diagonal gradients
///
/// Diagonal gradients keep the raw output inside [-1, 1].
#[inline]
fn gradient(hash_value: u32, x: f64, y: f64) -> f64 {
    let sign_x = if (hash_value & 1) == 0 { -x } else { x };
    let sign_y = if (hash_value & 2) == 0 { -y } else { y };
    sign_x + sign_y
}

/// Quintic smoothstep interpolation: 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Sample raw 2D Perlin noise
///
/// Zero on every integer lattice point. Returns a value in [-1, 1].
pub(crate) fn perlin_2d(x: f64, y: f64, seed: u32) -> f64 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);

    let xf = x - x.floor();
    let yf = y - y.floor();

    let u = fade(xf);
    let v = fade(yf);

    let g_aa = gradient(hash(x0, y0, seed), xf, yf);
    let g_ba = gradient(hash(x1, y0, seed), xf - 1.0, yf);
    let g_ab = gradient(hash(x0, y1, seed), xf, yf - 1.0);
    let g_bb = gradient(hash(x1, y1, seed), xf - 1.0, yf - 1.0);

    let bottom = lerp(g_aa, g_ba, u);
    let top = lerp(g_ab, g_bb, u);

    lerp(bottom, top, v)
}

/// Sample 2D Perlin noise with Fractal Brownian Motion
///
/// Octaves are averaged by their amplitudes, so the result stays in [-1, 1].
/// Coordinates are used as given; scale them by [PerlinConfig::frequency]
/// beforehand.
pub fn sample_perlin_fbm(x: f64, y: f64, seed: u32, config: &PerlinConfig) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..config.octaves.max(1) {
        total += perlin_2d(x * frequency, y * frequency, seed) * amplitude;
        max_value += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    if max_value == 0.0 {
        return 0.0;
    }
    (total / max_value).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let config = PerlinConfig::default();
        let value1 = sample_perlin_fbm(3.7, 1.2, 42, &config);
        let value2 = sample_perlin_fbm(3.7, 1.2, 42, &config);

        assert_eq!(
            value1.to_bits(),
            value2.to_bits(),
            "Same seed and position must produce identical results"
        );
    }

    #[test]
    fn test_known_values() {
        // Pinned outputs: a change here breaks every previously generated map
        let config = PerlinConfig::default();
        assert_eq!(sample_perlin_fbm(3.7, 1.2, 42, &config).to_bits(), 0xbfbb_d04b_b02d_f082);
        assert_eq!(sample_perlin_fbm(-2.25, 0.6, 7, &config).to_bits(), 0xbfc8_b868_028f_6e0e);
        assert_eq!(perlin_2d(2.4, 5.6, 3), 0.2942592614400007);
    }

    #[test]
    fn test_range() {
        let config = PerlinConfig::default();

        for i in 0..200 {
            let x = i as f64 * 0.173 - 7.0;
            let y = i as f64 * 0.311 + 2.5;
            let value = sample_perlin_fbm(x, y, 12345, &config);
            assert!(
                (-1.0..=1.0).contains(&value),
                "Value {} at ({}, {}) is outside [-1, 1]",
                value,
                x,
                y
            );
        }
    }

    #[test]
    fn test_lattice_points_are_zero() {
        for x in -3..3 {
            for y in -3..3 {
                assert_eq!(perlin_2d(x as f64, y as f64, 7), 0.0);
            }
        }
    }

    #[test]
    fn test_different_seeds() {
        let config = PerlinConfig::default();
        let positions = [(0.5, 0.5), (1.3, 2.7), (4.1, 0.9), (10.25, 3.75)];

        let differs = positions.iter().any(|&(x, y)| {
            sample_perlin_fbm(x, y, 42, &config) != sample_perlin_fbm(x, y, 999, &config)
        });
        assert!(differs, "Different seeds should produce different values");
    }

    #[test]
    fn test_continuity() {
        // Coherent noise: tiny steps give tiny changes
        let a = perlin_2d(2.4, 5.6, 3);
        let b = perlin_2d(2.4001, 5.6, 3);
        assert!((a - b).abs() < 0.01);
    }

    #[test]
    fn test_zero_octaves_still_samples() {
        let config = PerlinConfig {
            octaves: 0,
            ..Default::default()
        };
        let value = sample_perlin_fbm(0.5, 0.5, 1, &config);
        assert_eq!(value, perlin_2d(0.5, 0.5, 1));
    }
}
