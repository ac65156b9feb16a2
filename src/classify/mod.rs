//! Keyword-driven dispatch from attribute text to drawing algorithms.
//!
//! Dispatch is a declarative table of `(trigger keywords, drawer)` pairs so
//! it can be tested without invoking the renderer. Matching is
//! case-insensitive substring containment; several triggers may fire at
//! once. A text matching nothing falls back to the *entire* drawer family so
//! every render has visual content, and the result records which path fired.

/// One concrete geometry-generating algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GeometryDrawer {
    /// Curved or straight lattice: perspective rays, radial rings+spokes, or
    /// a rotated rectilinear grid.
    Lattice,
    /// Scattered hexagons, rectangles and angular shards.
    Tessellation,
    /// Recursive binary branching tree.
    FractalBranches,
    /// Concentric ellipses with optional planet dots.
    Orbits,
    /// Noise-perturbed concentric circles or parallel lines.
    Contours,
    /// Scattered circles, rectangles and free lines.
    AbstractShapes,
}

/// Every geometry drawer, in fallback order.
pub const ALL_GEOMETRY_DRAWERS: &[GeometryDrawer] = &[
    GeometryDrawer::Lattice,
    GeometryDrawer::Tessellation,
    GeometryDrawer::FractalBranches,
    GeometryDrawer::Orbits,
    GeometryDrawer::Contours,
    GeometryDrawer::AbstractShapes,
];

/// Trigger table for the geometry family.
pub const GEOMETRY_TRIGGERS: &[(&[&str], GeometryDrawer)] = &[
    (
        &[
            "grid",
            "mesh",
            "latitude",
            "coordinate",
            "cartesian",
            "parametric",
            "matrix",
            "schematic",
            "framework",
            "geodetic",
            "laser",
            "link",
        ],
        GeometryDrawer::Lattice,
    ),
    (
        &[
            "tessellat",
            "polygonal",
            "crystall",
            "interlocking",
            "mosaic",
            "partition",
            "fragment",
            "tile",
            "triangular",
            "hexagonal",
            "constellation",
        ],
        GeometryDrawer::Tessellation,
    ),
    (
        &[
            "fractal",
            "web",
            "vector",
            "branch",
            "recursive",
            "formation",
            "network",
            "neural",
        ],
        GeometryDrawer::FractalBranches,
    ),
    (
        &[
            "orbit",
            "ring",
            "sacred",
            "radial",
            "symmetry",
            "gravitational",
            "cycle",
            "satellite",
            "sphere",
            "kardashev",
        ],
        GeometryDrawer::Orbits,
    ),
    (
        &[
            "contour",
            "topograph",
            "wave",
            "terrain",
            "strata",
            "atlas",
            "elevation",
            "landmass",
        ],
        GeometryDrawer::Contours,
    ),
    (
        &[
            "shape",
            "geometry",
            "abstract",
            "structure",
            "construct",
            "infrastructure",
        ],
        GeometryDrawer::AbstractShapes,
    ),
];

/// Result of classifying one attribute text against a trigger table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<D> {
    /// Drawers enabled for this text, in table order.
    pub drawers: Vec<D>,
    /// `true` when nothing matched and the whole family was enabled instead.
    pub used_fallback: bool,
}

/// `true` when `text` contains any of `keywords`, case-insensitively.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Classify `text` against a trigger table, falling back to `all` when no
/// trigger fires.
pub fn classify<D: Copy>(text: &str, table: &[(&[&str], D)], all: &[D]) -> Classification<D> {
    let mut drawers: Vec<D> = table
        .iter()
        .filter(|(keywords, _)| contains_any(text, keywords))
        .map(|&(_, drawer)| drawer)
        .collect();

    let used_fallback = drawers.is_empty();
    if used_fallback {
        drawers = all.to_vec();
    }
    Classification {
        drawers,
        used_fallback,
    }
}

/// Classify a geo-motif phrase into the geometry drawers it enables.
pub fn classify_geometry(text: &str) -> Classification<GeometryDrawer> {
    classify(text, GEOMETRY_TRIGGERS, ALL_GEOMETRY_DRAWERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_trigger_enables_one_drawer() {
        let c = classify_geometry("celestial coordinate grids");
        assert_eq!(
            c.drawers,
            vec![GeometryDrawer::Lattice],
            "grid + coordinate both map to the lattice drawer"
        );
        assert!(!c.used_fallback);
    }

    #[test]
    fn multiple_triggers_enable_multiple_drawers() {
        let c = classify_geometry("orbital pathway web designs");
        assert_eq!(
            c.drawers,
            vec![GeometryDrawer::FractalBranches, GeometryDrawer::Orbits]
        );
        assert!(!c.used_fallback);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = classify_geometry("Voronoi-Style Earth PARTITIONS");
        assert_eq!(c.drawers, vec![GeometryDrawer::Tessellation]);
    }

    #[test]
    fn unmatched_text_falls_back_to_whole_family() {
        for text in ["", "pure poetry with no visual hint"] {
            let c = classify_geometry(text);
            assert_eq!(c.drawers, ALL_GEOMETRY_DRAWERS.to_vec());
            assert!(c.used_fallback);
        }
    }

    #[test]
    fn contains_any_handles_empty_inputs() {
        assert!(!contains_any("", &["grid"]));
        assert!(!contains_any("anything", &[]));
    }
}
