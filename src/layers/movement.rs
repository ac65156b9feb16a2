//! Movement-specific overlays keyed off the art-movement attribute.

use kurbo::{BezPath, Circle, Rect, Shape};

use crate::foundation::error::EngineResult;
use crate::layers::{LayerCtx, PATH_TOLERANCE};
use crate::model::color::Rgba;
use crate::render::composite::BlendMode;
use crate::render::gradient::GradientStop;
use crate::render::surface::Surface;

pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let mov = ctx.attrs.movement.to_lowercase();

    // "cosmic futurism" must be tested before the plain "futurism" arm or
    // its substring match would shadow the constellation overlay.
    if mov.contains("cosmic futurism") {
        constellation(ctx)?;
    } else if mov.contains("pop art") {
        halftone(ctx);
    } else if mov.contains("ancient") || mov.contains("greek") {
        stone_tint(ctx);
    } else if mov.contains("asian") || mov.contains("ink") {
        vertical_flow(ctx)?;
    } else if mov.contains("futurism") || mov.contains("cubism") {
        angular_shards(ctx);
    }

    ctx.painter.commit(surface)
}

/// Screen-blended cyan network: nodes joined when closer than 30% of the
/// surface width.
fn constellation(ctx: &mut LayerCtx) -> EngineResult<()> {
    ctx.painter.set_blend(BlendMode::Screen);

    let count = 15;
    let mut nodes = Vec::with_capacity(count);
    for _ in 0..count {
        nodes.push((ctx.rng.range(0.0, ctx.w), ctx.rng.range(0.0, ctx.h)));
    }

    let mut edges = BezPath::new();
    for i in 0..count {
        for j in (i + 1)..count {
            let dist = (nodes[i].0 - nodes[j].0).hypot(nodes[i].1 - nodes[j].1);
            if dist < ctx.w * 0.3 {
                edges.move_to(nodes[i]);
                edges.line_to(nodes[j]);
            }
        }
    }
    ctx.painter
        .stroke_path(&edges, Rgba::CYAN.with_alpha(0.3), 0.5 * ctx.scale);

    for &(x, y) in &nodes {
        let dot = Circle::new((x, y), 2.0 * ctx.scale).to_path(PATH_TOLERANCE);
        ctx.painter.fill_path(&dot, Rgba::CYAN);
    }
    Ok(())
}

/// Overlay-blended dot grid.
fn halftone(ctx: &mut LayerCtx) {
    ctx.painter.set_blend(BlendMode::Overlay);
    let step = 8.0 * ctx.scale;
    let color = Rgba::BLACK.with_alpha(0.2);
    let mut x = 0.0;
    while x < ctx.w {
        let mut y = 0.0;
        while y < ctx.h {
            let dot = Circle::new((x, y), 2.0 * ctx.scale).to_path(PATH_TOLERANCE);
            ctx.painter.fill_path(&dot, color);
            y += step;
        }
        x += step;
    }
}

/// Multiply-blended warm grey, a weathered marble cast.
fn stone_tint(ctx: &mut LayerCtx) {
    ctx.painter.set_blend(BlendMode::Multiply);
    ctx.painter.fill_rect(
        Rect::new(0.0, 0.0, ctx.w, ctx.h),
        Rgba::rgb(100, 90, 80).with_alpha(0.1),
    );
}

/// Soft-light vertical gradient, light at the top and dark at the bottom.
fn vertical_flow(ctx: &mut LayerCtx) -> EngineResult<()> {
    ctx.painter.set_blend(BlendMode::SoftLight);
    ctx.painter.linear_gradient(
        0.0,
        0.0,
        0.0,
        ctx.h,
        &[
            GradientStop::new(0.0, Rgba::WHITE.with_alpha(0.4)),
            GradientStop::new(1.0, Rgba::BLACK.with_alpha(0.2)),
        ],
    )
}

/// Screen-blended random white lines.
fn angular_shards(ctx: &mut LayerCtx) {
    ctx.painter.set_blend(BlendMode::Screen);
    let color = Rgba::WHITE.with_alpha(0.2);
    for _ in 0..20 {
        let mut line = BezPath::new();
        line.move_to((ctx.rng.range(0.0, ctx.w), ctx.rng.range(0.0, ctx.h)));
        line.line_to((ctx.rng.range(0.0, ctx.w), ctx.rng.range(0.0, ctx.h)));
        ctx.painter.stroke_path(&line, color, 1.0 * ctx.scale);
    }
}
