//! Layout handling: the clip region applied to every layer and the frame
//! overlays drawn unclipped at the end.

use std::f64::consts::PI;

use kurbo::{BezPath, Circle, Rect, Shape};

use crate::foundation::error::EngineResult;
use crate::layers::{LayerCtx, PATH_TOLERANCE};
use crate::model::color::Rgba;
use crate::render::surface::Surface;

/// Clip region for the layout, or `None` for a full-bleed composition.
pub(crate) fn clip_path(ctx: &LayerCtx) -> Option<BezPath> {
    let layout = ctx.attrs.layout.to_lowercase();
    let inset = 20.0 * ctx.scale;
    let (cx, cy) = (ctx.w / 2.0, ctx.h / 2.0);

    if layout.contains("circular") || layout.contains("mandala") || layout.contains("focal circle")
    {
        let r = ctx.w.min(ctx.h) / 2.0 - inset;
        Some(Circle::new((cx, cy), r).to_path(PATH_TOLERANCE))
    } else if layout.contains("hexagonal") {
        let r = ctx.w.min(ctx.h) / 2.0 - inset;
        let mut path = BezPath::new();
        for i in 0..6 {
            let angle = (PI / 3.0) * f64::from(i);
            let p = (cx + r * angle.cos(), cy + r * angle.sin());
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close_path();
        Some(path)
    } else if layout.contains("diamond") || layout.contains("rhombus") {
        let mut path = BezPath::new();
        path.move_to((cx, inset));
        path.line_to((ctx.w - inset, cy));
        path.line_to((cx, ctx.h - inset));
        path.line_to((inset, cy));
        path.close_path();
        Some(path)
    } else {
        None
    }
}

/// Frame overlays plus the final border. Drawn with the clip lifted.
pub(crate) fn draw_overlays(ctx: &mut LayerCtx, surface: &mut Surface) -> EngineResult<()> {
    let layout = ctx.attrs.layout.to_lowercase();

    if layout.contains("triptych") {
        let bar = Rgba::rgb(0x0f, 0x17, 0x2a);
        let bar_w = ctx.w * 0.025;
        for x in [ctx.w / 3.0, ctx.w / 3.0 * 2.0] {
            ctx.painter
                .fill_rect(Rect::new(x - bar_w / 2.0, 0.0, x + bar_w / 2.0, ctx.h), bar);
        }
    } else if layout.contains("poster") {
        let matte_h = ctx.h * 0.15;
        let s = ctx.scale;
        ctx.painter.fill_rect(
            Rect::new(10.0 * s, ctx.h - matte_h, ctx.w - 10.0 * s, ctx.h - 10.0 * s),
            Rgba::rgb(0xf8, 0xf8, 0xf8),
        );

        // Caption bars on the matte.
        let caption = Rgba::rgb(0x22, 0x22, 0x22).with_alpha(0.7);
        let line_h = 6.0 * s;
        let top = ctx.h - matte_h + 20.0 * s;
        ctx.painter.fill_rect(
            Rect::new(30.0 * s, top, 30.0 * s + ctx.w * 0.3, top + line_h),
            caption,
        );
        let top = ctx.h - matte_h + 35.0 * s;
        ctx.painter.fill_rect(
            Rect::new(30.0 * s, top, 30.0 * s + ctx.w * 0.5, top + line_h / 2.0),
            caption,
        );
    } else if layout.contains("panoramic") || layout.contains("cinematic") {
        let bar_h = ctx.h * 0.15;
        ctx.painter
            .fill_rect(Rect::new(0.0, 0.0, ctx.w, bar_h), Rgba::BLACK);
        ctx.painter
            .fill_rect(Rect::new(0.0, ctx.h - bar_h, ctx.w, ctx.h), Rgba::BLACK);
    }

    let border = Rect::new(0.0, 0.0, ctx.w, ctx.h).to_path(PATH_TOLERANCE);
    ctx.painter
        .stroke_path(&border, Rgba::WHITE.with_alpha(0.1), 2.0 * ctx.scale);

    ctx.painter.commit(surface)
}
