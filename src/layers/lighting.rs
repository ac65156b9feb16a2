//! Lighting wash, overlay-blended across the whole surface.

use kurbo::Rect;

use crate::foundation::error::EngineResult;
use crate::layers::LayerCtx;
use crate::model::color::Rgba;
use crate::render::composite::BlendMode;
use crate::render::gradient::GradientStop;
use crate::render::surface::Surface;

pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let lit = ctx.attrs.lighting.to_lowercase();
    ctx.painter.set_blend(BlendMode::Overlay);

    if lit.contains("chiaroscuro") || lit.contains("dramatic") {
        // Vignette: the last stop pads outward, darkening the corners.
        ctx.painter.radial_gradient(
            ctx.w / 2.0,
            ctx.h / 2.0,
            ctx.w / 4.0,
            ctx.w,
            &[
                GradientStop::new(0.0, Rgba::BLACK.with_alpha(0.0)),
                GradientStop::new(1.0, Rgba::BLACK.with_alpha(0.8)),
            ],
        )?;
    } else if lit.contains("halo") || lit.contains("glow") {
        ctx.painter.radial_gradient(
            ctx.w / 2.0,
            ctx.h / 2.0,
            0.0,
            ctx.w / 1.5,
            &[
                GradientStop::new(0.0, Rgba::WHITE.with_alpha(0.3)),
                GradientStop::new(1.0, Rgba::WHITE.with_alpha(0.0)),
            ],
        )?;
    } else if lit.contains("moonlit") || lit.contains("cool") {
        ctx.painter.fill_rect(
            Rect::new(0.0, 0.0, ctx.w, ctx.h),
            Rgba::rgb(0, 0, 100).with_alpha(0.2),
        );
    } else if lit.contains("golden") || lit.contains("radiant") {
        ctx.painter.fill_rect(
            Rect::new(0.0, 0.0, ctx.w, ctx.h),
            Rgba::rgb(255, 200, 0).with_alpha(0.15),
        );
    }

    // An unmatched lighting text commits an empty group, which also resets
    // the blend mode for the next layer.
    ctx.painter.commit(surface)
}
