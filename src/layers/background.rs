//! Background coat and style-driven base texture.

use std::f64::consts::TAU;

use kurbo::{BezPath, Circle, Rect, Shape};

use crate::foundation::error::EngineResult;
use crate::layers::{LayerCtx, PATH_TOLERANCE, loop_count};
use crate::render::composite::BlendMode;
use crate::render::gradient::GradientStop;
use crate::render::surface::Surface;

/// Paint the opaque background and the style texture on top of it.
pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let style = ctx.attrs.style.to_lowercase();

    ctx.painter.fill_rect(
        Rect::new(0.0, 0.0, ctx.w, ctx.h),
        ctx.palette.background_rgba(),
    );
    ctx.painter.commit(surface)?;

    if style.contains("watercolor") || style.contains("wash") || style.contains("ink") {
        watercolor_blobs(ctx, surface)
    } else if style.contains("oil") || style.contains("impasto") || style.contains("expressionist")
    {
        oil_strokes(ctx, surface)
    } else if style.contains("digital")
        || style.contains("cyber")
        || style.contains("glitch")
        || style.contains("vector")
    {
        digital_blocks(ctx, surface)
    } else {
        atmospheric_wash(ctx, surface)
    }
}

/// Soft multiplied pigment blobs with irregular edges.
fn watercolor_blobs(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let count = loop_count(ctx.rng.range(15.0, 30.0) * ctx.density);
    ctx.painter.set_blend(BlendMode::Multiply);
    for _ in 0..count {
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);
        let r = ctx.rng.range(100.0, 500.0) * ctx.scale;
        let inner = ctx.color(0.3);
        let outer = ctx.color(0.0);

        // Perturbed polygon boundary; the wash fades out before reaching it,
        // so the jitter reads as a ragged pigment edge.
        let mut path = BezPath::new();
        let mut a = 0.0f64;
        let mut first = true;
        while a <= TAU {
            let radius = r + ctx.rng.range(-30.0, 30.0) * ctx.scale;
            let p = (cx + a.cos() * radius, cy + a.sin() * radius);
            if first {
                path.move_to(p);
                first = false;
            } else {
                path.line_to(p);
            }
            a += 0.5;
        }
        path.close_path();

        ctx.painter.fill_path_radial(
            &path,
            cx,
            cy,
            0.0,
            r,
            &[
                GradientStop::new(0.0, inner),
                GradientStop::new(1.0, outer),
            ],
        )?;
    }
    ctx.painter.commit(surface)
}

/// Thick curved strokes scattered past the edges.
fn oil_strokes(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let count = loop_count(ctx.rng.range(60.0, 120.0) * ctx.density);
    for _ in 0..count {
        let color = ctx.color(0.7);
        let width = ctx.rng.range(10.0, 50.0) * ctx.scale * ctx.line_weight;
        let x = ctx.rng.range(-100.0, ctx.w + 100.0);
        let y = ctx.rng.range(-100.0, ctx.h + 100.0);
        let c1 = (x + ctx.rng.range(-100.0, 100.0), y + ctx.rng.range(-100.0, 100.0));
        let end = (x + ctx.rng.range(-200.0, 200.0), y + ctx.rng.range(-200.0, 200.0));

        let mut path = BezPath::new();
        path.move_to((x, y));
        path.quad_to(c1, end);
        ctx.painter.stroke_path_round(&path, color, width);
    }
    ctx.painter.commit(surface)
}

/// Translucent horizontal slabs.
fn digital_blocks(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let count = loop_count(ctx.rng.range(30.0, 80.0) * ctx.density);
    for _ in 0..count {
        let alpha = ctx.rng.range(0.1, 0.4);
        let color = ctx.color(alpha);
        let bw = ctx.rng.range(10.0, 300.0) * ctx.scale;
        let bh = ctx.rng.range(2.0, 40.0) * ctx.scale;
        let x = ctx.rng.range(-50.0, ctx.w);
        let y = ctx.rng.range(-50.0, ctx.h);
        ctx.painter
            .fill_rect(Rect::new(x, y, x + bw, y + bh), color);
    }
    ctx.painter.commit(surface)
}

/// Diagonal gradient plus a few large faint discs.
fn atmospheric_wash(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let edge = ctx.color(0.2);
    ctx.painter.linear_gradient(
        0.0,
        0.0,
        ctx.w,
        ctx.h,
        &[
            GradientStop::new(0.0, ctx.palette.background_rgba()),
            GradientStop::new(1.0, edge),
        ],
    )?;
    for _ in 0..5 {
        let color = ctx.color(0.05);
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);
        let r = ctx.rng.range(100.0, 400.0) * ctx.scale;
        let disc = Circle::new((cx, cy), r).to_path(PATH_TOLERANCE);
        ctx.painter.fill_path(&disc, color);
    }
    ctx.painter.commit(surface)
}
