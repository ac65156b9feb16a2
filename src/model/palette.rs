//! Named color palettes.
//!
//! A palette maps a color-theme phrase to 3–4 hex colors plus a background.
//! Resolution never fails: unknown names fall back to the default palette.

use crate::model::color::{Rgba, resolve_token};

/// A named color theme: an ordered set of hex color tokens and a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Theme phrase this palette is looked up by.
    pub name: &'static str,
    /// Ordered drawing colors (3–4 hex tokens).
    pub colors: &'static [&'static str],
    /// Background color token.
    pub background: &'static str,
}

impl Palette {
    /// Background resolved to a drawable color.
    pub fn background_rgba(&self) -> Rgba {
        resolve_token(self.background, 1.0)
    }

    /// `true` when any palette color contains the (case-insensitive)
    /// substring `needle`; used for the pale-palette swirl color rule.
    pub(crate) fn any_color_contains(&self, needle: &str) -> bool {
        self.colors
            .iter()
            .any(|c| c.to_lowercase().contains(needle))
    }
}

/// Theme name the resolver falls back to.
pub const DEFAULT_PALETTE_NAME: &str = "radiant gold and deep ultramarine";

const PALETTES: &[Palette] = &[
    Palette {
        name: "radiant gold and deep ultramarine",
        colors: &["#FFD700", "#120A8F", "#B8860B", "#4169E1"],
        background: "#000033",
    },
    Palette {
        name: "pastel rose and pale turquoise",
        colors: &["#FFD1DC", "#AFEEEE", "#FFB7B2", "#E0FFFF"],
        background: "#FFF0F5",
    },
    Palette {
        name: "neon magenta and electric blue",
        colors: &["#FF00FF", "#00FFFF", "#CC00CC", "#0000FF"],
        background: "#111111",
    },
    Palette {
        name: "sunset orange and purple haze",
        colors: &["#FD5E53", "#800080", "#FF9F80", "#4B0082"],
        background: "#2D1B2E",
    },
    Palette {
        name: "emerald green and metallic bronze",
        colors: &["#50C878", "#CD7F32", "#2E8B57", "#B87333"],
        background: "#013220",
    },
    Palette {
        name: "ochre and terracotta gold leaf",
        colors: &["#CC7722", "#E2725B", "#FFD700", "#8B4513"],
        background: "#3E2723",
    },
    Palette {
        name: "midnight blue and starlight yellow",
        colors: &["#191970", "#FFFFE0", "#483D8B", "#F0E68C"],
        background: "#000019",
    },
    Palette {
        name: "charcoal grey and copper",
        colors: &["#36454F", "#B87333", "#708090", "#CD7F32"],
        background: "#1C1C1C",
    },
    Palette {
        name: "teal, indigo, shimmering gold",
        colors: &["#008080", "#4B0082", "#FFD700", "#20B2AA"],
        background: "#001f1f",
    },
    Palette {
        name: "soft lavender and champagne",
        colors: &["#E6E6FA", "#F7E7CE", "#D8BFD8", "#FFFDD0"],
        background: "#FAF0E6",
    },
    Palette {
        name: "crimson, obsidian, molten gold",
        colors: &["#DC143C", "#1C1C1C", "#FFD700", "#800000"],
        background: "#0F0F0F",
    },
    Palette {
        name: "iridescent opal and sapphire",
        colors: &["#A8C3BC", "#0F52BA", "#E6E6FA", "#4169E1"],
        background: "#F0F8FF",
    },
    Palette {
        name: "solar gold and satellite blue",
        colors: &["#FFD700", "#00BFFF", "#1E90FF", "#FDB813"],
        background: "#000510",
    },
];

/// Look up a palette by theme name, falling back to the default palette for
/// unknown names. Never fails.
pub fn resolve(name: &str) -> &'static Palette {
    // The default palette is the first table entry.
    PALETTES
        .iter()
        .find(|p| p.name == name)
        .unwrap_or(&PALETTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::color::parse_hex_rgb;

    #[test]
    fn resolves_known_names() {
        let p = resolve("neon magenta and electric blue");
        assert_eq!(p.background, "#111111");
        assert_eq!(p.colors.len(), 4);
    }

    #[test]
    fn unknown_names_fall_back_to_default() {
        let p = resolve("a theme nobody has heard of");
        assert_eq!(p.name, DEFAULT_PALETTE_NAME);
        assert_eq!(resolve(""), p);
    }

    #[test]
    fn all_builtin_tokens_are_valid_hex() {
        for p in PALETTES {
            assert!(
                parse_hex_rgb(p.background).is_some(),
                "bad background in {}",
                p.name
            );
            assert!((3..=4).contains(&p.colors.len()), "bad size in {}", p.name);
            for c in p.colors {
                assert!(parse_hex_rgb(c).is_some(), "bad color {c} in {}", p.name);
            }
        }
    }

    #[test]
    fn pale_palette_rule_matches_fff_substrings() {
        assert!(
            resolve("midnight blue and starlight yellow").any_color_contains("fff")
        );
        assert!(!resolve("charcoal grey and copper").any_color_contains("fff"));
    }
}
