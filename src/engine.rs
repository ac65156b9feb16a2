//! Top-level render sequence.

use crate::foundation::error::EngineResult;
use crate::foundation::rng::SeededRng;
use crate::layers::{
    LayerCtx, artist, atmosphere, background, frame, geometry, lighting, movement, ornament,
    symbolism, texture,
};
use crate::model::attributes::AttributeBundle;
use crate::model::palette;
use crate::render::painter::Painter;
use crate::render::surface::Surface;

/// Words in the intensity text that soften the whole composition.
const SOFT_WORDS: &[&str] = &[
    "soft", "quiet", "subtl", "delicate", "tender", "wistful", "dream",
];

/// Words in the intensity text that harden line work.
const FIERCE_WORDS: &[&str] = &[
    "bold", "deep", "vibrant", "fierce", "wild", "power", "dramatic",
];

/// Global modifiers derived from the mood and intensity texts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MoodParams {
    density: f64,
    line_weight: f64,
    global_alpha: f64,
}

fn mood_params(mood: &str, intensity: &str) -> MoodParams {
    let mood = mood.to_lowercase();
    let intensity = intensity.to_lowercase();

    let calm = mood.contains("calm") || mood.contains("meditative");
    let bold = mood.contains("bold") || mood.contains("energetic") || mood.contains("vibrant");
    let soft = SOFT_WORDS.iter().any(|k| intensity.contains(k));
    let fierce = FIERCE_WORDS.iter().any(|k| intensity.contains(k));

    // A fierce intensity wins over a soft one: full opacity, heavier lines.
    let global_alpha = if fierce {
        1.0
    } else if soft {
        0.7
    } else {
        1.0
    };
    let density = if calm {
        0.6
    } else if bold {
        1.5
    } else {
        1.0
    };
    let line_weight =
        (if bold || fierce { 1.5 } else { 1.0 }) * (if soft { 0.8 } else { 1.0 });

    MoodParams {
        density,
        line_weight,
        global_alpha,
    }
}

/// Render one composition onto `surface`.
///
/// The output is a pure function of the surface dimensions, the attribute
/// bundle and the seed. A non-finite seed fails validation before any pixel
/// is touched; attribute text never fails, unmatched fields fall back to
/// their documented defaults.
#[tracing::instrument(skip(surface, attrs), fields(width = surface.width(), height = surface.height()))]
pub fn render(surface: &mut Surface, attrs: &AttributeBundle, seed: f64) -> EngineResult<()> {
    let mut rng = SeededRng::new(seed)?;
    let palette = palette::resolve(&attrs.color_theme);

    let w = f64::from(surface.width());
    let h = f64::from(surface.height());
    let scale = w.min(h) / 800.0;
    let params = mood_params(&attrs.mood, &attrs.intensity);

    let (pw, ph) = surface.dims();
    let mut painter = Painter::new(pw, ph);
    let mut ctx = LayerCtx {
        painter: &mut painter,
        rng: &mut rng,
        palette,
        attrs,
        w,
        h,
        scale,
        density: params.density,
        line_weight: params.line_weight,
        global_alpha: params.global_alpha,
    };

    if let Some(path) = frame::clip_path(&ctx) {
        ctx.painter.set_clip_path(&path)?;
    }

    background::draw(&mut ctx, surface)?;
    geometry::draw(&mut ctx, surface)?;
    symbolism::draw(&mut ctx, surface)?;
    atmosphere::draw(&mut ctx, surface)?;
    ornament::draw(&mut ctx, surface)?;
    artist::draw(&mut ctx, surface)?;
    lighting::draw(&mut ctx, surface)?;
    movement::draw(&mut ctx, surface)?;
    texture::draw(&mut ctx, surface)?;

    // Frames and the border paint over the full surface.
    ctx.painter.clear_clip();
    frame::draw_overlays(&mut ctx, surface)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_texts_leave_all_modifiers_at_one() {
        let p = mood_params("contemplative", "gently");
        assert_eq!(
            p,
            MoodParams {
                density: 1.0,
                line_weight: 1.0,
                global_alpha: 1.0
            }
        );
    }

    #[test]
    fn calm_thins_and_bold_thickens() {
        assert_eq!(mood_params("calm and meditative", "").density, 0.6);
        assert_eq!(mood_params("bold, energetic", "").density, 1.5);
        assert_eq!(mood_params("bold", "").line_weight, 1.5);
    }

    #[test]
    fn soft_intensity_fades_and_thins() {
        let p = mood_params("", "softly and subtly");
        assert_eq!(p.global_alpha, 0.7);
        assert_eq!(p.line_weight, 0.8);
    }

    #[test]
    fn fierce_wins_over_soft() {
        let p = mood_params("", "softly yet fiercely");
        assert_eq!(p.global_alpha, 1.0);
        // Both multipliers apply to line weight.
        assert_eq!(p.line_weight, 1.5 * 0.8);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(mood_params("CALM", "").density, 0.6);
        assert_eq!(mood_params("", "DRAMATICALLY").line_weight, 1.5);
    }
}
