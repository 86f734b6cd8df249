//! Readable text color for a background
//!
//! Uses the YIQ luma heuristic: `Y = (299R + 587G + 114B) / 1000` over 0-255
//! channels, dark text at or above 128, white text below.

/// Near-black text, also the default for anything unparseable
pub const DARK_TEXT: &str = "#111827";
pub const LIGHT_TEXT: &str = "#FFFFFF";

const LUMA_THRESHOLD: f64 = 128.0;

/// Parse `RRGGBB` or `#RRGGBB` into channels
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// YIQ luma of a channel triple
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    (f64::from(r) * 299.0 + f64::from(g) * 587.0 + f64::from(b) * 114.0) / 1000.0
}

/// Pick dark or white text for the given background hex color.
///
/// Malformed input yields [`DARK_TEXT`].
pub fn contrast_text_color(hex: &str) -> &'static str {
    match parse_hex_rgb(hex) {
        Some((r, g, b)) if luma(r, g, b) >= LUMA_THRESHOLD => DARK_TEXT,
        Some(_) => LIGHT_TEXT,
        None => DARK_TEXT,
    }
}
