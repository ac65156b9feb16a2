//! The attribute bundle driving one render.

/// Immutable bundle of sixteen descriptive text fields.
///
/// Bundles are produced externally (a prompt generator, a UI); the engine
/// only reads them. Absent information degrades gracefully: an empty or
/// unmatched field triggers the documented per-layer fallback, never an
/// error. The `adjective` and `closing` fields exist for prompt composition
/// and do not influence pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttributeBundle {
    /// Geometric motif phrase (drives the geometry layer dispatch).
    pub geo_motif: String,
    /// Starfield/atmosphere phrase.
    pub starfield: String,
    /// Ornamental cluster phrase.
    pub ornament: String,
    /// Color theme name resolved against the palette table.
    pub color_theme: String,
    /// Art style phrase (drives the background texture).
    pub style: String,
    /// Historical movement phrase (drives the movement overlay).
    pub movement: String,
    /// Mood phrase (drives the global density modifier).
    pub mood: String,
    /// Texture name (drives the pixel-noise layer).
    pub texture: String,
    /// Layout name (drives clip region and frame overlays).
    pub layout: String,
    /// Symbolism phrase (drives the symbolism overlay).
    pub symbolism: String,
    /// Artist-mashup phrase (drives per-artist accents).
    pub artist: String,
    /// Lighting name (drives the lighting wash).
    pub lighting: String,
    /// Perspective name (drives the geometry-layer transform).
    pub perspective: String,
    /// Descriptive adjective; prompt-only.
    pub adjective: String,
    /// Intensity adverb (drives the global alpha/line-weight modifiers).
    pub intensity: String,
    /// Closing phrase; prompt-only.
    pub closing: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let bundle = AttributeBundle {
            geo_motif: "hexagonal world map lattices".into(),
            color_theme: "solar gold and satellite blue".into(),
            mood: "bold and energetic".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&bundle).unwrap();
        let back: AttributeBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(bundle, back);
    }
}
