//! Symbolism overlay: concentric rings, a spiral or rising strands.

use std::f64::consts::PI;

use kurbo::{BezPath, Circle, Shape};

use crate::foundation::error::EngineResult;
use crate::layers::{LayerCtx, PATH_TOLERANCE};
use crate::render::surface::Surface;

pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let sym = ctx.attrs.symbolism.to_lowercase();

    // One random color is consumed up front regardless of which motif (if
    // any) fires; this keeps the sequence stable across symbolism texts.
    let color = ctx.color(0.8);
    let width = 1.0 * ctx.scale;

    if sym.contains("unity")
        || sym.contains("connection")
        || sym.contains("bond")
        || sym.contains("mesh")
    {
        let (cx, cy) = (ctx.w / 2.0, ctx.h / 2.0);
        for i in 0..5 {
            let ring = Circle::new((cx, cy), (50.0 + f64::from(i) * 30.0) * ctx.scale)
                .to_path(PATH_TOLERANCE);
            ctx.painter.stroke_path(&ring, color, width);
        }
    } else if sym.contains("cycle") || sym.contains("spiral") || sym.contains("rebirth") {
        let (cx, cy) = (ctx.w / 2.0, ctx.h / 2.0);
        let mut path = BezPath::new();
        let mut r = 0.0f64;
        let mut a = 0.0f64;
        let mut first = true;
        while a < PI * 10.0 {
            let p = (cx + a.cos() * r, cy + a.sin() * r);
            if first {
                path.move_to(p);
                first = false;
            } else {
                path.line_to(p);
            }
            r += 0.5 * ctx.scale;
            a += 0.1;
        }
        let faint = color.with_alpha(color.alpha_f64() * 0.3 * ctx.global_alpha);
        ctx.painter.stroke_path(&path, faint, width);
    } else if sym.contains("growth")
        || sym.contains("tree")
        || sym.contains("life")
        || sym.contains("brain")
    {
        let faint = color.with_alpha(color.alpha_f64() * 0.4 * ctx.global_alpha);
        for _ in 0..10 {
            let x = ctx.rng.range(ctx.w * 0.2, ctx.w * 0.8);
            let mut path = BezPath::new();
            path.move_to((x, ctx.h));
            let c1 = (x + ctx.rng.range(-50.0, 50.0), ctx.h / 2.0);
            let c2 = (x + ctx.rng.range(-100.0, 100.0), 0.0);
            path.curve_to(c1, c2, (x, 0.0));
            ctx.painter.stroke_path(&path, faint, width);
        }
    }

    ctx.painter.commit(surface)
}
