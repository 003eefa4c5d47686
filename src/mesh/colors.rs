//! Hex color parsing for mesh output

/// RGBA color type
pub type TerrainColor = [f32; 4];

/// Opaque black, used for colors that do not parse
pub const FALLBACK_COLOR: TerrainColor = [0.0, 0.0, 0.0, 1.0];

/// Parse a `#RRGGBB` or `#RRGGBBAA` string into RGBA floats
///
/// The leading `#` is optional. Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use rust_voronoi_map::mesh::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#ff0000"), Some([1.0, 0.0, 0.0, 1.0]));
/// assert_eq!(parse_hex_color("not a color"), None);
/// ```
pub fn parse_hex_color(hex: &str) -> Option<TerrainColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| -> Option<f32> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };

    let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}
