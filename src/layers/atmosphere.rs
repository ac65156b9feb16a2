//! Atmosphere layer: screen-blended nebula clouds, dashed swirls and a
//! field of stars.

use std::f64::consts::TAU;

use kurbo::{BezPath, Circle, Shape};

use crate::classify::contains_any;
use crate::foundation::error::EngineResult;
use crate::layers::{LayerCtx, PATH_TOLERANCE, loop_count};
use crate::model::color::Rgba;
use crate::render::composite::BlendMode;
use crate::render::gradient::GradientStop;
use crate::render::surface::Surface;

const NEBULA_KEYWORDS: &[&str] = &[
    "nebula",
    "glow",
    "radiant",
    "cloud",
    "cosmic",
    "dreamlike",
    "void",
    "consciousness",
    "data",
];

const SWIRL_KEYWORDS: &[&str] = &[
    "swirl",
    "spiral",
    "vortic",
    "whorl",
    "turbulence",
    "wind",
    "motion",
    "wave",
    "current",
    "flow",
];

pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let text = ctx.attrs.starfield.to_lowercase();

    // Keyword hits skip the coin flip entirely, so the random sequence
    // differs between matched and unmatched texts by design.
    if contains_any(&text, NEBULA_KEYWORDS) || ctx.rng.chance(0.5) {
        nebula_clouds(ctx, surface)?;
    }
    if contains_any(&text, SWIRL_KEYWORDS) || ctx.rng.chance(0.4) {
        swirls(ctx);
    }
    stars(ctx);

    ctx.painter.commit(surface)
}

fn nebula_clouds(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let clouds = loop_count(ctx.rng.range(3.0, 8.0) * ctx.density);
    ctx.painter.set_blend(BlendMode::Screen);
    for _ in 0..clouds {
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);
        let r = ctx.rng.range(100.0, 600.0) * ctx.scale;
        let core = ctx.color(0.25);
        let halo = ctx.color(0.05);
        ctx.painter.radial_gradient(
            cx,
            cy,
            0.0,
            r,
            &[
                GradientStop::new(0.0, core),
                GradientStop::new(0.6, halo),
                GradientStop::new(1.0, Rgba::TRANSPARENT),
            ],
        )?;
    }
    ctx.painter.commit(surface)
}

/// Dashed spirals: every other segment of the winding arc is stroked.
fn swirls(ctx: &mut LayerCtx) {
    let swirl_count = loop_count(ctx.rng.range(4.0, 10.0));
    // Pale palettes get a warm off-white stroke so the swirls stay visible.
    let pale = ctx.palette.any_color_contains("fff");

    for _ in 0..swirl_count {
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);
        let mut theta = ctx.rng.range(0.0, TAU);
        let mut r = 1.0f64;

        let color = if pale {
            Rgba::LIGHT_YELLOW
        } else {
            ctx.color(0.7)
        };
        let width = ctx.rng.range(1.0, 4.0) * ctx.scale;
        let max_r = ctx.rng.range(50.0, 200.0) * ctx.scale;
        let segments = 40;

        let mut start = (cx + theta.cos() * r, cy + theta.sin() * r);
        for j in 0..segments {
            let p = (cx + theta.cos() * r, cy + theta.sin() * r);
            if j % 2 == 0 {
                start = p;
            } else {
                let mut seg = BezPath::new();
                seg.move_to(start);
                seg.line_to(p);
                ctx.painter.stroke_path_round(&seg, color, width);
            }
            r += max_r / f64::from(segments);
            theta += 0.4;
        }
    }
}

fn stars(ctx: &mut LayerCtx) {
    let count = loop_count(ctx.rng.range(50.0, 250.0) * ctx.density);
    for _ in 0..count {
        let x = ctx.rng.range(0.0, ctx.w);
        let y = ctx.rng.range(0.0, ctx.h);
        let size = ctx.rng.range(0.5, 2.5) * ctx.scale;
        let alpha = ctx.rng.range(0.2, 0.9) * ctx.global_alpha;
        let star = Circle::new((x, y), size).to_path(PATH_TOLERANCE);
        ctx.painter.fill_path(&star, Rgba::WHITE.with_alpha(alpha));
    }
}
