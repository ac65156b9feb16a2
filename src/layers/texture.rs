//! Film-grain noise pass and crack lines for weathered textures.

use kurbo::BezPath;

use crate::foundation::error::EngineResult;
use crate::layers::LayerCtx;
use crate::model::color::Rgba;
use crate::render::composite::BlendMode;
use crate::render::surface::Surface;

pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let text = ctx.attrs.texture.to_lowercase();
    let heavy = text.contains("rough")
        || text.contains("cracked")
        || text.contains("grainy")
        || text.contains("impasto");

    // Per-pixel grey noise, overlay-blended. Two random values per pixel,
    // so the consumption here scales with the surface size.
    let mut noise = vec![0u8; surface.data().len()];
    for px in noise.chunks_exact_mut(4) {
        let val = ctx.rng.range(0.0, 255.0).floor() as u8;
        let alpha = if heavy {
            ctx.rng.range(15.0, 35.0)
        } else {
            ctx.rng.range(5.0, 15.0)
        };
        px[0] = val;
        px[1] = val;
        px[2] = val;
        px[3] = alpha.round() as u8;
    }
    ctx.painter.set_blend(BlendMode::Overlay);
    ctx.painter.draw_pixels(&noise)?;
    ctx.painter.commit(surface)?;

    if text.contains("cracked") || text.contains("vintage") || text.contains("weathered") {
        cracks(ctx);
        ctx.painter.commit(surface)?;
    }
    Ok(())
}

/// Eight faint random walks across the surface.
fn cracks(ctx: &mut LayerCtx) {
    let color = Rgba::BLACK.with_alpha(0.2);
    let width = 1.0 * ctx.scale;
    for _ in 0..8 {
        let mut cx = ctx.rng.range(0.0, ctx.w);
        let mut cy = ctx.rng.range(0.0, ctx.h);
        let mut path = BezPath::new();
        path.move_to((cx, cy));
        for _ in 0..8 {
            cx += ctx.rng.range(-20.0, 20.0) * ctx.scale;
            cy += ctx.rng.range(-20.0, 20.0) * ctx.scale;
            path.line_to((cx, cy));
        }
        ctx.painter.stroke_path(&path, color, width);
    }
}
