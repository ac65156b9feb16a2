//! Geometry layer: classified drawers under the perspective transform.

use std::f64::consts::{PI, TAU};

use kurbo::{Affine, BezPath, Circle, Ellipse, Rect, Shape};

use crate::classify::{GeometryDrawer, classify_geometry};
use crate::foundation::error::EngineResult;
use crate::layers::{LayerCtx, PATH_TOLERANCE, loop_count};
use crate::render::surface::Surface;

/// Pick one or two classified drawers and run them under the perspective
/// transform.
pub(crate) fn draw(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let classification = classify_geometry(&ctx.attrs.geo_motif);
    let count = if ctx.rng.chance(0.3) { 2 } else { 1 };
    let selected: Vec<GeometryDrawer> = ctx
        .rng
        .shuffle(&classification.drawers)
        .into_iter()
        .take(count)
        .collect();
    tracing::debug!(?selected, fallback = classification.used_fallback, "geometry drawers");

    let transform = perspective_transform(ctx);
    let saved = ctx.painter.push_transform(transform);
    for drawer in selected {
        match drawer {
            GeometryDrawer::Lattice => lattice(ctx),
            GeometryDrawer::Tessellation => tessellation(ctx),
            GeometryDrawer::FractalBranches => fractal_branches(ctx),
            GeometryDrawer::Orbits => orbits(ctx),
            GeometryDrawer::Contours => contours(ctx),
            GeometryDrawer::AbstractShapes => abstract_shapes(ctx),
        }
    }
    ctx.painter.restore_transform(saved);
    ctx.painter.commit(surface)
}

/// Transform applied to the whole geometry layer, derived from the
/// perspective attribute. Tilted views zoom slightly past the edges so the
/// rotation cannot expose the background.
fn perspective_transform(ctx: &mut LayerCtx) -> Affine {
    let p = ctx.attrs.perspective.to_lowercase();
    let center = Affine::translate((ctx.w / 2.0, ctx.h / 2.0));
    let back = Affine::translate((-ctx.w / 2.0, -ctx.h / 2.0));

    if p.contains("tilted") || p.contains("dynamic") {
        let rot = ctx.rng.range(-0.2, 0.2);
        center * Affine::rotate(rot) * Affine::scale(1.1) * back
    } else if p.contains("macro") || p.contains("close-up") {
        center * Affine::scale(1.5) * back
    } else {
        Affine::IDENTITY
    }
}

fn lattice(ctx: &mut LayerCtx) {
    let curved = ctx.rng.chance(0.4);
    let step = ctx.rng.range(30.0, 100.0) * ctx.scale;
    let color = ctx.color(0.3);
    let width = ctx.rng.range(0.5, 2.0) * ctx.scale * ctx.line_weight;

    let mut path = BezPath::new();
    if curved {
        let mut x = -50.0;
        while x <= ctx.w + 50.0 {
            path.move_to((x, 0.0));
            let c1 = (x + ctx.rng.range(-150.0, 150.0) * ctx.scale, ctx.h / 2.0);
            let c2 = (x - ctx.rng.range(-150.0, 150.0) * ctx.scale, ctx.h);
            let end = (x + ctx.rng.range(-50.0, 50.0) * ctx.scale, ctx.h);
            path.curve_to(c1, c2, end);
            x += step;
        }
        let mut y = -50.0;
        while y <= ctx.h + 50.0 {
            path.move_to((0.0, y));
            let c1 = (ctx.w / 2.0, y + ctx.rng.range(-150.0, 150.0) * ctx.scale);
            let c2 = (ctx.w, y - ctx.rng.range(-150.0, 150.0) * ctx.scale);
            let end = (ctx.w, y + ctx.rng.range(-50.0, 50.0) * ctx.scale);
            path.curve_to(c1, c2, end);
            y += step;
        }
    } else {
        let vanish_x = ctx.rng.range(0.0, ctx.w);
        let vanish_y = ctx.rng.range(0.0, ctx.h);
        #[derive(Clone, Copy, PartialEq)]
        enum Kind {
            Rays,
            Ortho,
            Radial,
        }
        let mut kind = *ctx.rng.pick(&[Kind::Rays, Kind::Ortho, Kind::Radial]);
        // Wide-angle perspectives always read as converging rays.
        if ctx.attrs.perspective.to_lowercase().contains("wide") {
            kind = Kind::Rays;
        }

        match kind {
            Kind::Rays => {
                let rays = loop_count(24.0 * ctx.density);
                for _ in 0..rays {
                    path.move_to((vanish_x, vanish_y));
                    let sx = if ctx.rng.chance(0.5) { 0.0 } else { ctx.w };
                    let sy = ctx.rng.range(0.0, ctx.h);
                    path.line_to((sx, sy));
                    let tx = ctx.rng.range(0.0, ctx.w);
                    let ty = if ctx.rng.chance(0.5) { 0.0 } else { ctx.h };
                    path.line_to((tx, ty));
                }
            }
            Kind::Radial => {
                let (cx, cy) = (ctx.w / 2.0, ctx.h / 2.0);
                let spokes = 12.0 * ctx.density;
                for i in 0..loop_count(spokes) {
                    path.move_to((cx, cy));
                    let ang = (TAU / spokes) * i as f64;
                    path.line_to((cx + ang.cos() * ctx.w, cy + ang.sin() * ctx.w));
                }
                let mut r = step;
                while r < ctx.w {
                    for el in Circle::new((cx, cy), r).path_elements(PATH_TOLERANCE) {
                        path.push(el);
                    }
                    r += step;
                }
            }
            Kind::Ortho => {
                let rot = ctx.rng.range(0.0, PI);
                let extent = (ctx.w + ctx.h) * 2.0;
                let mut local = BezPath::new();
                let mut i = 0.0;
                while i < extent {
                    local.move_to((i, 0.0));
                    local.line_to((i, extent));
                    local.move_to((0.0, i));
                    local.line_to((extent, i));
                    i += step;
                }
                let affine = Affine::translate((ctx.w / 2.0, ctx.h / 2.0))
                    * Affine::rotate(rot)
                    * Affine::translate((-ctx.w * 1.5, -ctx.h * 1.5));
                for el in (affine * local).elements() {
                    path.push(*el);
                }
            }
        }
    }
    ctx.painter.stroke_path(&path, color, width);
}

fn tessellation(ctx: &mut LayerCtx) {
    let count = loop_count(ctx.rng.range(30.0, 80.0) * ctx.density);
    let width = 1.0 * ctx.scale * ctx.line_weight;
    #[derive(Clone, Copy, PartialEq)]
    enum Kind {
        Tri,
        Hex,
        RectTile,
        Shard,
    }
    let kind = *ctx.rng.pick(&[Kind::Tri, Kind::Hex, Kind::RectTile, Kind::Shard]);

    for _ in 0..count {
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);
        let size = ctx.rng.range(20.0, 100.0) * ctx.scale;
        let fill_alpha = ctx.rng.range(0.1, 0.5);
        let fill = ctx.color(fill_alpha);
        let stroke = ctx.color(0.6);

        let mut path = BezPath::new();
        match kind {
            Kind::Hex => {
                for j in 0..6 {
                    let angle = (PI / 3.0) * j as f64;
                    let p = (cx + size * angle.cos(), cy + size * angle.sin());
                    if j == 0 {
                        path.move_to(p);
                    } else {
                        path.line_to(p);
                    }
                }
            }
            Kind::RectTile => {
                let rh = size * ctx.rng.range(0.5, 1.5);
                path.move_to((cx, cy));
                path.line_to((cx + size, cy));
                path.line_to((cx + size, cy + rh));
                path.line_to((cx, cy + rh));
            }
            Kind::Tri | Kind::Shard => {
                path.move_to((cx, cy - size));
                path.line_to((cx + size, cy + size));
                path.line_to((
                    cx - size * ctx.rng.range(0.5, 1.5),
                    cy + size * ctx.rng.range(0.5, 1.5),
                ));
            }
        }
        path.close_path();

        if ctx.rng.chance(0.5) {
            ctx.painter.fill_path(&path, fill);
        } else {
            ctx.painter.stroke_path(&path, stroke, width);
        }
    }
}

fn fractal_branches(ctx: &mut LayerCtx) {
    let color = ctx.color(0.6);
    let width = 1.2 * ctx.scale * ctx.line_weight;
    let roots = (ctx.rng.range(1.0, 3.0) * ctx.density).ceil() as usize;

    for _ in 0..roots {
        let sx = ctx.rng.range(ctx.w * 0.1, ctx.w * 0.9);
        let sy = ctx.rng.range(ctx.h * 0.1, ctx.h * 0.9);
        let len = ctx.rng.range(80.0, 150.0) * ctx.scale;
        let angle = ctx.rng.range(0.0, TAU);
        let depth = ctx.rng.range(4.0, 6.0);
        branch(ctx, sx, sy, len, angle, depth, color, width);
    }
}

#[allow(clippy::too_many_arguments)]
fn branch(
    ctx: &mut LayerCtx,
    x: f64,
    y: f64,
    len: f64,
    angle: f64,
    depth: f64,
    color: crate::model::color::Rgba,
    width: f64,
) {
    if depth <= 0.0 {
        return;
    }
    let end_x = x + len * angle.cos();
    let end_y = y + len * angle.sin();
    let c = (
        x + ctx.rng.range(-10.0, 10.0),
        y - ctx.rng.range(-10.0, 10.0),
    );

    let mut seg = BezPath::new();
    seg.move_to((x, y));
    seg.quad_to(c, (end_x, end_y));
    ctx.painter.stroke_path(&seg, color, width);

    let sub_len = len * ctx.rng.range(0.6, 0.85);
    let split = ctx.rng.range(0.2, 0.8);
    branch(ctx, end_x, end_y, sub_len, angle - split, depth - 1.0, color, width);
    branch(ctx, end_x, end_y, sub_len, angle + split, depth - 1.0, color, width);
}

fn orbits(ctx: &mut LayerCtx) {
    let cx = ctx.w / 2.0 + ctx.rng.range(-150.0, 150.0) * ctx.scale;
    let cy = ctx.h / 2.0 + ctx.rng.range(-150.0, 150.0) * ctx.scale;
    let count = loop_count(ctx.rng.range(8.0, 20.0) * ctx.density);

    for _ in 0..count {
        let stroke = ctx.color(0.5);
        let width = ctx.rng.range(1.0, 3.0) * ctx.scale;
        let rx = ctx.rng.range(40.0, ctx.w / 1.5);
        let ry = rx * ctx.rng.range(0.3, 1.0);
        let rot = ctx.rng.range(0.0, PI);

        let ellipse = Ellipse::new((cx, cy), (rx, ry), rot).to_path(PATH_TOLERANCE);
        ctx.painter.stroke_path(&ellipse, stroke, width);

        if ctx.rng.chance(0.6) {
            let planets = ctx.rng.range(1.0, 4.0);
            for _ in 0..loop_count(planets) {
                let ang = ctx.rng.range(0.0, TAU);
                let px = cx + rx * ang.cos() * rot.cos() - ry * ang.sin() * rot.sin();
                let py = cy + rx * ang.cos() * rot.sin() + ry * ang.sin() * rot.cos();
                let fill = ctx.color(0.9);
                let r = ctx.rng.range(3.0, 8.0) * ctx.scale;
                let dot = Circle::new((px, py), r).to_path(PATH_TOLERANCE);
                ctx.painter.fill_path(&dot, fill);
            }
        }
    }
}

fn contours(ctx: &mut LayerCtx) {
    let lines = 30.0 * ctx.density;
    let width = 1.5 * ctx.scale * ctx.line_weight;
    let noise_seed = ctx.rng.next() * 100.0;
    #[derive(Clone, Copy, PartialEq)]
    enum Kind {
        Horizontal,
        Vertical,
        Circular,
    }
    let kind = *ctx.rng.pick(&[Kind::Horizontal, Kind::Vertical, Kind::Circular]);
    let color = ctx.color(0.5);

    if kind == Kind::Circular {
        let (cx, cy) = (ctx.w / 2.0, ctx.h / 2.0);
        let mut r = 10.0;
        while r < ctx.w {
            let mut path = BezPath::new();
            let mut a = 0.0f64;
            let mut first = true;
            while a <= TAU {
                let n = (a * 5.0 + noise_seed).sin() * 10.0 + (a * 3.0).cos() * 5.0;
                let rad = r + n;
                let p = (cx + a.cos() * rad, cy + a.sin() * rad);
                if first {
                    path.move_to(p);
                    first = false;
                } else {
                    path.line_to(p);
                }
                a += 0.1;
            }
            path.close_path();
            ctx.painter.stroke_path(&path, color, width);
            r += 20.0 * ctx.scale;
        }
        return;
    }

    for i in 0..loop_count(lines) {
        let i = i as f64;
        let mut path = BezPath::new();
        if kind == Kind::Horizontal {
            let y = (ctx.h / lines) * i;
            path.move_to((0.0, y));
            let mut x = 0.0;
            while x <= ctx.w {
                let n = (x * 0.01 + i * 0.2 + noise_seed).sin() * 40.0 * ctx.scale;
                path.line_to((x, y + n));
                x += 15.0;
            }
        } else {
            let x = (ctx.w / lines) * i;
            path.move_to((x, 0.0));
            let mut y = 0.0;
            while y <= ctx.h {
                let n = (y * 0.01 + i * 0.2 + noise_seed).sin() * 40.0 * ctx.scale;
                path.line_to((x + n, y));
                y += 15.0;
            }
        }
        ctx.painter.stroke_path(&path, color, width);
    }
}

fn abstract_shapes(ctx: &mut LayerCtx) {
    let count = loop_count(ctx.rng.range(5.0, 15.0) * ctx.density);
    for _ in 0..count {
        let fill_alpha = ctx.rng.range(0.1, 0.4);
        let fill = ctx.color(fill_alpha);
        let stroke = ctx.color(0.6);
        let width = 2.0 * ctx.scale;

        #[derive(Clone, Copy, PartialEq)]
        enum Kind {
            Disc,
            Square,
            Line,
        }
        let kind = *ctx.rng.pick(&[Kind::Disc, Kind::Square, Kind::Line]);
        let cx = ctx.rng.range(0.0, ctx.w);
        let cy = ctx.rng.range(0.0, ctx.h);
        let sz = ctx.rng.range(20.0, 150.0) * ctx.scale;

        match kind {
            Kind::Disc => {
                let path = Circle::new((cx, cy), sz).to_path(PATH_TOLERANCE);
                if ctx.rng.chance(0.5) {
                    ctx.painter.fill_path(&path, fill);
                } else {
                    ctx.painter.stroke_path(&path, stroke, width);
                }
            }
            Kind::Square => {
                let rect = Rect::new(cx - sz / 2.0, cy - sz / 2.0, cx + sz / 2.0, cy + sz / 2.0);
                if ctx.rng.chance(0.5) {
                    ctx.painter.fill_rect(rect, fill);
                } else {
                    ctx.painter.stroke_path(&rect.to_path(PATH_TOLERANCE), stroke, width);
                }
            }
            Kind::Line => {
                let mut path = BezPath::new();
                path.move_to((cx, cy));
                path.line_to((
                    cx + ctx.rng.range(-100.0, 100.0) * ctx.scale,
                    cy + ctx.rng.range(-100.0, 100.0) * ctx.scale,
                ));
                ctx.painter.stroke_path(&path, stroke, width);
            }
        }
    }
}
