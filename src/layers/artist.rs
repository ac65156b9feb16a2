//! Artist-influence accents: paint splatters or cut-out blobs.

use kurbo::{BezPath, Circle, Shape};

use crate::foundation::error::EngineResult;
use crate::layers::{LayerCtx, PATH_TOLERANCE, loop_count};
use crate::render::surface::Surface;

pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let artist = ctx.attrs.artist.to_lowercase();

    if artist.contains("pollock") {
        splatters(ctx);
    } else if artist.contains("matisse") || artist.contains("cutout") {
        cutout_blobs(ctx);
    }

    ctx.painter.commit(surface)
}

/// Scattered paint dots, some with a drip running downward in the same
/// color.
fn splatters(ctx: &mut LayerCtx) {
    let splats = loop_count(ctx.rng.range(20.0, 50.0));
    for _ in 0..splats {
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);
        let color = ctx.color(1.0);
        let r = ctx.rng.range(2.0, 10.0) * ctx.scale;
        let dot = Circle::new((cx, cy), r).to_path(PATH_TOLERANCE);
        ctx.painter.fill_path(&dot, color);

        if ctx.rng.chance(0.3) {
            let mut drip = BezPath::new();
            drip.move_to((cx, cy));
            drip.line_to((
                cx + ctx.rng.range(-5.0, 5.0),
                cy + ctx.rng.range(20.0, 100.0) * ctx.scale,
            ));
            ctx.painter.stroke_path(&drip, color, 1.0 * ctx.scale);
        }
    }
}

/// Five large organic blobs built from chained quadratic curves.
fn cutout_blobs(ctx: &mut LayerCtx) {
    for _ in 0..5 {
        let color = ctx.color(0.8);
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);

        let mut path = BezPath::new();
        path.move_to((cx, cy));
        for _ in 0..5 {
            let c = (
                cx + ctx.rng.range(-50.0, 50.0) * ctx.scale,
                cy + ctx.rng.range(-50.0, 50.0) * ctx.scale,
            );
            let end = (
                cx + ctx.rng.range(-100.0, 100.0) * ctx.scale,
                cy + ctx.rng.range(-100.0, 100.0) * ctx.scale,
            );
            path.quad_to(c, end);
        }
        ctx.painter.fill_path(&path, color);
    }
}
