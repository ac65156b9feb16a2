//! The nine drawing layers of a composition, in render order, plus the
//! layout clip/frame pass.
//!
//! Each layer reads attribute text, consumes the shared random sequence and
//! commits one or more blend groups to the surface. The consumption order
//! inside a layer is part of the output contract: reordering two `rng` calls
//! changes every composition.

pub(crate) mod artist;
pub(crate) mod atmosphere;
pub(crate) mod background;
pub(crate) mod frame;
pub(crate) mod geometry;
pub(crate) mod lighting;
pub(crate) mod movement;
pub(crate) mod ornament;
pub(crate) mod symbolism;
pub(crate) mod texture;

use crate::foundation::rng::SeededRng;
use crate::model::attributes::AttributeBundle;
use crate::model::color::{Rgba, resolve_token};
use crate::model::palette::Palette;
use crate::render::painter::Painter;

/// Flattening tolerance for converting circles and ellipses to bezier
/// paths, in device pixels.
pub(crate) const PATH_TOLERANCE: f64 = 0.1;

/// Everything a layer needs to draw.
pub(crate) struct LayerCtx<'a> {
    pub painter: &'a mut Painter,
    pub rng: &'a mut SeededRng,
    pub palette: &'static Palette,
    pub attrs: &'a AttributeBundle,
    /// Surface width in pixels.
    pub w: f64,
    /// Surface height in pixels.
    pub h: f64,
    /// Base scale factor, `min(w, h) / 800`.
    pub scale: f64,
    /// Mood-driven element count multiplier.
    pub density: f64,
    /// Mood/intensity-driven stroke width multiplier.
    pub line_weight: f64,
    /// Intensity-driven opacity multiplier.
    pub global_alpha: f64,
}

impl LayerCtx<'_> {
    /// Random palette color at `alpha`, scaled by the global opacity
    /// modifier. Consumes exactly one random value.
    pub(crate) fn color(&mut self, alpha: f64) -> Rgba {
        let token = *self.rng.pick(self.palette.colors);
        resolve_token(token, alpha * self.global_alpha)
    }
}

/// Iteration count of a loop driven by a fractional element count.
///
/// Counts are routinely fractional after the density multiplier; a count of
/// `14.4` runs 15 times.
pub(crate) fn loop_count(n: f64) -> usize {
    if n <= 0.0 { 0 } else { n.ceil() as usize }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_count_ceils_fractional_counts() {
        assert_eq!(loop_count(0.0), 0);
        assert_eq!(loop_count(-2.5), 0);
        assert_eq!(loop_count(1.0), 1);
        assert_eq!(loop_count(14.4), 15);
        assert_eq!(loop_count(0.1), 1);
    }
}
