//! Vector painter over a premultiplied group buffer.
//!
//! vello_cpu renders a whole scene into a fresh pixmap, so the painter
//! batches vector work: fills and strokes accumulate in the render context
//! until a gradient, pixel pass or commit needs the rasterized result, at
//! which point the scene is flushed into a cleared scratch pixmap and
//! source-over'd onto the group buffer. `commit` then merges the finished
//! group into the destination surface under the group's blend mode, after
//! masking by the active clip region.

use kurbo::{Affine, BezPath, Cap, Join, Rect, Stroke, StrokeOpts};

use crate::foundation::error::{EngineError, EngineResult};
use crate::model::color::Rgba;
use crate::render::composite::{
    BlendMode, blend_in_place, mask_apply_in_place, premul_over_in_place,
    premultiply_rgba8_in_place,
};
use crate::render::gradient::{GradientStop, paint_linear, paint_radial};
use crate::render::surface::Surface;

/// Flattening tolerance for stroke expansion, in device pixels.
const STROKE_TOLERANCE: f64 = 0.1;

pub(crate) struct Painter {
    ctx: vello_cpu::RenderContext,
    scratch: vello_cpu::Pixmap,
    /// Premultiplied RGBA8 accumulation buffer for the current layer group.
    group: Vec<u8>,
    /// Vector ops recorded in `ctx` since the last flush.
    pending: bool,
    blend: BlendMode,
    /// Premultiplied mask applied to every commit while set; only the alpha
    /// channel is consulted.
    clip: Option<Vec<u8>>,
    transform: Affine,
    width: u16,
    height: u16,
}

impl Painter {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            scratch: vello_cpu::Pixmap::new(width, height),
            group: vec![0; usize::from(width) * usize::from(height) * 4],
            pending: false,
            blend: BlendMode::default(),
            clip: None,
            transform: Affine::IDENTITY,
            width,
            height,
        }
    }

    /// Blend mode used by the next `commit`; reset to normal afterwards.
    pub(crate) fn set_blend(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    /// Restrict every subsequent commit to the interior of `path`.
    pub(crate) fn set_clip_path(&mut self, path: &BezPath) -> EngineResult<()> {
        self.flush_vectors()?;
        let mask = self.rasterize_mask(path);
        self.clip = Some(mask);
        Ok(())
    }

    /// Lift the clip region (frame overlays draw over the full surface).
    pub(crate) fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Append `affine` to the current transform, returning the previous one
    /// for `restore_transform`.
    pub(crate) fn push_transform(&mut self, affine: Affine) -> Affine {
        let saved = self.transform;
        self.transform = self.transform * affine;
        saved
    }

    /// Restore a transform saved by `push_transform`.
    pub(crate) fn restore_transform(&mut self, saved: Affine) {
        self.transform = saved;
    }

    /// Run `f` with `affine` appended to the current transform.
    pub(crate) fn with_transform<F>(&mut self, affine: Affine, f: F) -> EngineResult<()>
    where
        F: FnOnce(&mut Self) -> EngineResult<()>,
    {
        let saved = self.push_transform(affine);
        let result = f(self);
        self.restore_transform(saved);
        result
    }

    pub(crate) fn fill_path(&mut self, path: &BezPath, color: Rgba) {
        if color.a == 0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.pending = true;
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if color.a == 0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
        self.pending = true;
    }

    /// Stroke `path` by expanding its outline and filling the result.
    ///
    /// Expansion happens in path space, so the stroke width scales with the
    /// active transform like every other coordinate.
    pub(crate) fn stroke_path(&mut self, path: &BezPath, color: Rgba, width: f64) {
        self.stroke_path_styled(path, color, Stroke::new(width));
    }

    /// Stroke with round caps and joins, for brush-like marks.
    pub(crate) fn stroke_path_round(&mut self, path: &BezPath, color: Rgba, width: f64) {
        let style = Stroke::new(width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        self.stroke_path_styled(path, color, style);
    }

    fn stroke_path_styled(&mut self, path: &BezPath, color: Rgba, style: Stroke) {
        if style.width <= 0.0 || color.a == 0 {
            return;
        }
        let outline = kurbo::stroke(
            path.elements().iter().copied(),
            &style,
            &StrokeOpts::default(),
            STROKE_TOLERANCE,
        );
        self.fill_path(&outline, color);
    }

    /// Paint a radial gradient wash over the whole group.
    pub(crate) fn radial_gradient(
        &mut self,
        cx: f64,
        cy: f64,
        r0: f64,
        r1: f64,
        stops: &[GradientStop],
    ) -> EngineResult<()> {
        self.flush_vectors()?;
        paint_radial(
            &mut self.group,
            u32::from(self.width),
            u32::from(self.height),
            cx,
            cy,
            r0,
            r1,
            stops,
        )
    }

    /// Paint a linear gradient wash over the whole group.
    pub(crate) fn linear_gradient(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stops: &[GradientStop],
    ) -> EngineResult<()> {
        self.flush_vectors()?;
        paint_linear(
            &mut self.group,
            u32::from(self.width),
            u32::from(self.height),
            x0,
            y0,
            x1,
            y1,
            stops,
        )
    }

    /// Fill `path` with a radial gradient by masking the wash to the path.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn fill_path_radial(
        &mut self,
        path: &BezPath,
        cx: f64,
        cy: f64,
        r0: f64,
        r1: f64,
        stops: &[GradientStop],
    ) -> EngineResult<()> {
        self.flush_vectors()?;
        let mask = self.rasterize_mask(path);
        let mut wash = vec![0u8; self.group.len()];
        paint_radial(
            &mut wash,
            u32::from(self.width),
            u32::from(self.height),
            cx,
            cy,
            r0,
            r1,
            stops,
        )?;
        mask_apply_in_place(&mut wash, &mask)?;
        premul_over_in_place(&mut self.group, &wash)
    }

    /// Composite a straight-alpha RGBA8 buffer over the group.
    pub(crate) fn draw_pixels(&mut self, straight_rgba: &[u8]) -> EngineResult<()> {
        self.flush_vectors()?;
        if straight_rgba.len() != self.group.len() {
            return Err(EngineError::surface("pixel buffer size mismatch"));
        }
        let mut tmp = straight_rgba.to_vec();
        premultiply_rgba8_in_place(&mut tmp);
        premul_over_in_place(&mut self.group, &tmp)
    }

    /// Merge the finished group into `surface` and start a fresh group.
    pub(crate) fn commit(&mut self, surface: &mut Surface) -> EngineResult<()> {
        self.flush_vectors()?;
        if let Some(clip) = &self.clip {
            mask_apply_in_place(&mut self.group, clip)?;
        }
        blend_in_place(surface.data_mut(), &self.group, self.blend)?;
        self.group.fill(0);
        self.blend = BlendMode::Normal;
        Ok(())
    }

    /// Rasterize the pending vector scene and fold it into the group.
    fn flush_vectors(&mut self) -> EngineResult<()> {
        if !self.pending {
            return Ok(());
        }
        self.pending = false;
        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        self.ctx.reset();
        premul_over_in_place(&mut self.group, self.scratch.data_as_u8_slice())
    }

    /// Rasterize `path` alone as an opaque white coverage mask.
    ///
    /// Callers must have flushed the pending scene first; the render context
    /// is left reset.
    fn rasterize_mask(&mut self, path: &BezPath) -> Vec<u8> {
        debug_assert!(!self.pending);
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        self.ctx.fill_path(&bezpath_to_cpu(path));
        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        self.ctx.reset();
        self.scratch.data_as_u8_slice().to_vec()
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Circle;
    use kurbo::Shape;

    fn pixel(s: &Surface, x: u32, y: u32) -> [u8; 4] {
        s.pixel(x, y).unwrap()
    }

    #[test]
    fn fill_rect_lands_on_the_surface() {
        let mut surface = Surface::new(32, 32).unwrap();
        let mut p = Painter::new(32, 32);
        p.fill_rect(Rect::new(4.0, 4.0, 28.0, 28.0), Rgba::rgb(255, 0, 0));
        p.commit(&mut surface).unwrap();

        assert_eq!(pixel(&surface, 16, 16), [255, 0, 0, 255]);
        assert_eq!(pixel(&surface, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn transform_offsets_fills() {
        let mut surface = Surface::new(32, 32).unwrap();
        let mut p = Painter::new(32, 32);
        p.with_transform(Affine::translate((16.0, 0.0)), |p| {
            p.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba::WHITE);
            Ok(())
        })
        .unwrap();
        p.commit(&mut surface).unwrap();

        assert_eq!(pixel(&surface, 20, 4)[3], 255);
        assert_eq!(pixel(&surface, 4, 4)[3], 0);
    }

    #[test]
    fn stroke_paints_outline_not_interior() {
        let mut surface = Surface::new(64, 64).unwrap();
        let mut p = Painter::new(64, 64);
        let circle = Circle::new((32.0, 32.0), 20.0).to_path(0.1);
        p.stroke_path(&circle, Rgba::WHITE, 3.0);
        p.commit(&mut surface).unwrap();

        assert!(pixel(&surface, 52, 32)[3] > 0, "rim must be painted");
        assert_eq!(pixel(&surface, 32, 32)[3], 0, "center must stay empty");
    }

    #[test]
    fn clip_confines_commits() {
        let mut surface = Surface::new(64, 64).unwrap();
        let mut p = Painter::new(64, 64);
        let circle = Circle::new((32.0, 32.0), 16.0).to_path(0.1);
        p.set_clip_path(&circle).unwrap();

        p.fill_rect(Rect::new(0.0, 0.0, 64.0, 64.0), Rgba::WHITE);
        p.commit(&mut surface).unwrap();

        assert_eq!(pixel(&surface, 32, 32)[3], 255);
        assert_eq!(pixel(&surface, 2, 2)[3], 0);

        // After lifting the clip the corners become reachable again.
        p.clear_clip();
        p.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba::WHITE);
        p.commit(&mut surface).unwrap();
        assert_eq!(pixel(&surface, 2, 2)[3], 255);
    }

    #[test]
    fn commit_resets_blend_to_normal() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut p = Painter::new(8, 8);

        p.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba::rgb(128, 128, 128));
        p.commit(&mut surface).unwrap();

        p.set_blend(BlendMode::Screen);
        p.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba::rgb(128, 128, 128));
        p.commit(&mut surface).unwrap();
        let screened = pixel(&surface, 4, 4)[0];
        assert!(screened > 128);

        // Next commit is back to source-over.
        p.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba::rgb(10, 10, 10));
        p.commit(&mut surface).unwrap();
        assert_eq!(pixel(&surface, 4, 4)[0], 10);
    }

    #[test]
    fn empty_commit_is_a_no_op() {
        let mut surface = Surface::new(8, 8).unwrap();
        let mut p = Painter::new(8, 8);
        p.commit(&mut surface).unwrap();
        assert!(surface.data().iter().all(|&b| b == 0));
    }
}
