//! Color tokens and conversions.
//!
//! Palette entries are stored as text tokens (`#RRGGBB` in the built-in
//! palettes). [`translucent`] implements the documented token contract:
//! strict 7-character hex tokens become `rgba(..)` strings, anything else is
//! passed through unchanged rather than rejected.

/// Straight-alpha RGBA color used by all drawers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight, not premultiplied).
    pub a: u8,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Gold accent used by ornament clusters.
    pub const GOLD: Rgba = Rgba::rgb(0xFF, 0xD7, 0x00);
    /// Silver accent used by ornament clusters.
    pub const SILVER: Rgba = Rgba::rgb(0xC0, 0xC0, 0xC0);
    /// Goldenrod accent used by flourish strokes.
    pub const GOLDENROD: Rgba = Rgba::rgb(0xDA, 0xA5, 0x20);
    /// Cyan accent used by the constellation overlay.
    pub const CYAN: Rgba = Rgba::rgb(0x00, 0xFF, 0xFF);
    /// Warm off-white used for swirl strokes over pale palettes.
    pub const LIGHT_YELLOW: Rgba = Rgba::rgb(0xFF, 0xFF, 0xE0);
    /// Fully transparent.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha replaced by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// Parse a strict 7-character `#RRGGBB` token.
///
/// Anything else (shorthand hex, `#RRGGBBAA`, symbolic names) yields `None`;
/// callers treat those as passthrough tokens.
pub fn parse_hex_rgb(token: &str) -> Option<Rgba> {
    let rest = token.strip_prefix('#')?;
    if rest.len() != 6 || token.len() != 7 {
        return None;
    }
    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&rest[range], 16).ok();
    Some(Rgba::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

/// Combine a hex token's RGB channels with `alpha` into an `rgba(..)` string.
///
/// Malformed tokens are returned unchanged, so symbolic color names remain
/// usable by whatever consumes the string. This mirrors the permissive
/// contract of the palette resolver: color text never fails.
pub fn translucent(token: &str, alpha: f64) -> String {
    match parse_hex_rgb(token) {
        Some(c) => format!("rgba({},{},{},{alpha})", c.r, c.g, c.b),
        None => token.to_owned(),
    }
}

/// Resolve a palette token to a drawable color at the given alpha.
///
/// Non-hex tokens fall back to white so a render can always proceed.
pub(crate) fn resolve_token(token: &str, alpha: f64) -> Rgba {
    parse_hex_rgb(token).unwrap_or(Rgba::WHITE).with_alpha(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_hex_tokens() {
        assert_eq!(parse_hex_rgb("#FFD700"), Some(Rgba::rgb(255, 215, 0)));
        assert_eq!(parse_hex_rgb("#000033"), Some(Rgba::rgb(0, 0, 51)));
        assert_eq!(parse_hex_rgb("#fff"), None);
        assert_eq!(parse_hex_rgb("FFD700"), None);
        assert_eq!(parse_hex_rgb("#FFD70080"), None);
        assert_eq!(parse_hex_rgb("gold"), None);
    }

    #[test]
    fn translucent_converts_hex_and_passes_through_tokens() {
        assert_eq!(translucent("#FF0000", 0.5), "rgba(255,0,0,0.5)");
        assert_eq!(translucent("transparent", 0.5), "transparent");
        assert_eq!(translucent("#bad", 0.2), "#bad");
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Rgba::WHITE.with_alpha(2.0).a, 255);
        assert_eq!(Rgba::WHITE.with_alpha(-1.0).a, 0);
        assert_eq!(Rgba::WHITE.with_alpha(0.5).a, 128);
    }
}
