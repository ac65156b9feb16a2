//! Ornament layer: gilded rectangle clusters, flourish curves and ring
//! symbols.

use std::f64::consts::{PI, TAU};

use kurbo::{Affine, BezPath, Circle, Rect, Shape};

use crate::classify::contains_any;
use crate::foundation::error::EngineResult;
use crate::layers::{LayerCtx, PATH_TOLERANCE, loop_count};
use crate::model::color::Rgba;
use crate::render::surface::Surface;

const CLUSTER_KEYWORDS: &[&str] = &[
    "rectangle",
    "mosaic",
    "gold",
    "gilded",
    "geometric",
    "tessellation",
    "pattern",
    "abundance",
];

const FLOURISH_KEYWORDS: &[&str] = &[
    "ornament",
    "swirl",
    "flourish",
    "curve",
    "floral",
    "vine",
    "elegance",
    "organic",
];

const SYMBOL_KEYWORDS: &[&str] = &[
    "symbol", "circle", "halo", "ring", "sun", "moon", "coin", "robot", "symbiosis",
];

pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let text = ctx.attrs.ornament.to_lowercase();

    if contains_any(&text, CLUSTER_KEYWORDS) || ctx.rng.chance(0.6) {
        gilded_clusters(ctx)?;
    }
    if contains_any(&text, FLOURISH_KEYWORDS) || ctx.rng.chance(0.5) {
        flourishes(ctx);
    }
    if contains_any(&text, SYMBOL_KEYWORDS) || ctx.rng.chance(0.3) {
        ring_symbols(ctx);
    }

    ctx.painter.commit(surface)
}

/// Clusters of small rotated rectangles, mostly gold with the occasional
/// silver or palette-colored tile. Larger tiles get a darker inset.
fn gilded_clusters(ctx: &mut LayerCtx) -> EngineResult<()> {
    let clusters = loop_count(ctx.rng.range(3.0, 8.0) * ctx.density);
    for _ in 0..clusters {
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);
        let radius = ctx.rng.range(40.0, 180.0) * ctx.scale;
        let items = ctx.rng.range(15.0, 40.0);

        for _ in 0..loop_count(items) {
            let a = ctx.rng.range(0.0, TAU);
            let d = ctx.rng.range(0.0, radius);
            let x = cx + a.cos() * d;
            let y = cy + a.sin() * d;

            let is_gold = ctx.rng.chance(0.6);
            let color = if is_gold {
                Rgba::GOLD
            } else {
                let c = ctx.color(1.0);
                if ctx.rng.chance(0.3) { Rgba::SILVER } else { c }
            };

            let rw = ctx.rng.range(4.0, 20.0) * ctx.scale;
            let rh = ctx.rng.range(4.0, 20.0) * ctx.scale;
            let rot = ctx.rng.range(0.0, PI);
            let placement = Affine::translate((x, y)) * Affine::rotate(rot);

            let inset = rw > 8.0 * ctx.scale;
            ctx.painter.with_transform(placement, |p| {
                p.fill_rect(Rect::new(0.0, 0.0, rw, rh), color);
                if inset {
                    p.fill_rect(
                        Rect::new(rw * 0.25, rh * 0.25, rw * 0.75, rh * 0.75),
                        Rgba::BLACK.with_alpha(0.2),
                    );
                }
                Ok(())
            })?;
        }
    }
    Ok(())
}

/// Long goldenrod bezier curves rooted near the top or bottom edge.
fn flourishes(ctx: &mut LayerCtx) {
    let lines = loop_count(ctx.rng.range(3.0, 8.0));
    let color = Rgba::GOLDENROD.with_alpha(0.8 * ctx.global_alpha);
    let width = ctx.rng.range(1.0, 3.0) * ctx.scale;

    for _ in 0..lines {
        let sx = ctx.rng.range(0.0, ctx.w);
        let sy = if ctx.rng.chance(0.5) {
            ctx.rng.range(0.0, ctx.h / 4.0)
        } else {
            ctx.rng.range(ctx.h * 0.75, ctx.h)
        };

        let mut path = BezPath::new();
        path.move_to((sx, sy));
        let c1 = (ctx.rng.range(0.0, ctx.w), ctx.rng.range(0.0, ctx.h));
        let c2 = (ctx.rng.range(0.0, ctx.w), ctx.rng.range(0.0, ctx.h));
        let end = (ctx.rng.range(0.0, ctx.w), ctx.rng.range(0.0, ctx.h));
        path.curve_to(c1, c2, end);
        ctx.painter.stroke_path(&path, color, width);
    }
}

/// Stroked rings with a filled center disc in the same color.
fn ring_symbols(ctx: &mut LayerCtx) {
    let count = loop_count(ctx.rng.range(3.0, 7.0));
    for _ in 0..count {
        let x = ctx.rng.range(0.0, ctx.w);
        let y = ctx.rng.range(0.0, ctx.h);
        let r = ctx.rng.range(10.0, 40.0) * ctx.scale;
        let color = ctx.color(1.0);

        let ring = Circle::new((x, y), r).to_path(PATH_TOLERANCE);
        ctx.painter.stroke_path(&ring, color, 2.0 * ctx.scale);
        let center = Circle::new((x, y), r * 0.6).to_path(PATH_TOLERANCE);
        ctx.painter.fill_path(&center, color);
    }
}
