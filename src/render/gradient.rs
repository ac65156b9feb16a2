//! Software gradient painting onto premultiplied RGBA8 buffers.
//!
//! Gradient washes are painted directly per pixel instead of going through
//! the vector scene: the washes always cover large axis-aligned regions, and
//! doing them here keeps the stop semantics explicit. Offsets outside the
//! stop range pad with the nearest stop, so a radial wash whose last stop is
//! opaque keeps painting beyond its outer radius.

use crate::foundation::error::{EngineError, EngineResult};
use crate::model::color::Rgba;

/// One color stop of a gradient, at a normalized offset in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GradientStop {
    /// Position along the gradient axis.
    pub offset: f64,
    /// Straight-alpha color at this position.
    pub color: Rgba,
}

impl GradientStop {
    pub(crate) fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Straight-alpha RGBA at `t`, linearly interpolated between stops.
fn sample(stops: &[GradientStop], t: f64) -> [f64; 4] {
    let as_f64 = |c: Rgba| {
        [
            f64::from(c.r),
            f64::from(c.g),
            f64::from(c.b),
            f64::from(c.a),
        ]
    };

    let Some(first) = stops.first() else {
        return [0.0; 4];
    };
    if t <= first.offset {
        return as_f64(first.color);
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let f = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            let ca = as_f64(a.color);
            let cb = as_f64(b.color);
            return [
                ca[0] + (cb[0] - ca[0]) * f,
                ca[1] + (cb[1] - ca[1]) * f,
                ca[2] + (cb[2] - ca[2]) * f,
                ca[3] + (cb[3] - ca[3]) * f,
            ];
        }
    }
    // stops is non-empty, so last() always yields a value.
    let last = stops[stops.len() - 1];
    as_f64(last.color)
}

#[inline]
fn over_pixel(dst: &mut [u8], straight: [f64; 4]) {
    let a = (straight[3] / 255.0).clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let inv = 1.0 - a;
    for c in 0..3 {
        let sp = straight[c].clamp(0.0, 255.0) * a;
        dst[c] = (sp + f64::from(dst[c]) * inv).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (a * 255.0 + f64::from(dst[3]) * inv).round().clamp(0.0, 255.0) as u8;
}

fn check_buffer(dst: &[u8], width: u32, height: u32) -> EngineResult<()> {
    let expect = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if dst.len() != expect {
        return Err(EngineError::surface("gradient buffer size mismatch"));
    }
    Ok(())
}

/// Paint a two-radius radial gradient over `dst`, composited source-over.
///
/// Offsets map `r0 -> 0` and `r1 -> 1`; distances outside that band pad with
/// the first/last stop. When the last stop is fully transparent only the
/// disc's bounding box is visited.
#[allow(clippy::too_many_arguments)]
pub(crate) fn paint_radial(
    dst: &mut [u8],
    width: u32,
    height: u32,
    cx: f64,
    cy: f64,
    r0: f64,
    r1: f64,
    stops: &[GradientStop],
) -> EngineResult<()> {
    check_buffer(dst, width, height)?;
    if stops.is_empty() || r1 <= r0 {
        return Ok(());
    }

    let fades_out = stops[stops.len() - 1].color.a == 0;
    let (x0, x1, y0, y1) = if fades_out {
        (
            ((cx - r1).floor().max(0.0)) as u32,
            (((cx + r1).ceil()).min(f64::from(width))) as u32,
            ((cy - r1).floor().max(0.0)) as u32,
            (((cy + r1).ceil()).min(f64::from(height))) as u32,
        )
    } else {
        (0, width, 0, height)
    };

    let span = r1 - r0;
    for y in y0..y1 {
        let dy = f64::from(y) + 0.5 - cy;
        let row = (y as usize * width as usize) * 4;
        for x in x0..x1 {
            let dx = f64::from(x) + 0.5 - cx;
            let t = (dx.hypot(dy) - r0) / span;
            let px = row + x as usize * 4;
            over_pixel(&mut dst[px..px + 4], sample(stops, t));
        }
    }
    Ok(())
}

/// Paint a linear gradient along `(x0, y0) -> (x1, y1)` over `dst`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn paint_linear(
    dst: &mut [u8],
    width: u32,
    height: u32,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    stops: &[GradientStop],
) -> EngineResult<()> {
    check_buffer(dst, width, height)?;
    let (ax, ay) = (x1 - x0, y1 - y0);
    let len2 = ax * ax + ay * ay;
    if stops.is_empty() || len2 == 0.0 {
        return Ok(());
    }

    for y in 0..height {
        let py = f64::from(y) + 0.5 - y0;
        let row = (y as usize * width as usize) * 4;
        for x in 0..width {
            let px_pos = f64::from(x) + 0.5 - x0;
            let t = (px_pos * ax + py * ay) / len2;
            let px = row + x as usize * 4;
            over_pixel(&mut dst[px..px + 4], sample(stops, t));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buf: &[u8], w: u32, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * w as usize + x as usize) * 4;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn radial_fades_from_center() {
        let (w, h) = (64u32, 64u32);
        let mut buf = vec![0u8; (w * h * 4) as usize];
        let stops = [
            GradientStop::new(0.0, Rgba::WHITE),
            GradientStop::new(1.0, Rgba::WHITE.with_alpha(0.0)),
        ];
        paint_radial(&mut buf, w, h, 32.0, 32.0, 0.0, 30.0, &stops).unwrap();

        let center = pixel(&buf, w, 32, 32);
        assert!(center[3] > 240);
        // Corner is outside the fade radius and must stay untouched.
        assert_eq!(pixel(&buf, w, 0, 0), [0, 0, 0, 0]);

        let mid = pixel(&buf, w, 32 + 15, 32);
        assert!(mid[3] > 80 && mid[3] < 180, "mid alpha {}", mid[3]);
    }

    #[test]
    fn radial_pads_beyond_outer_radius_when_last_stop_is_opaque() {
        let (w, h) = (32u32, 32u32);
        let mut buf = vec![0u8; (w * h * 4) as usize];
        let stops = [
            GradientStop::new(0.0, Rgba::BLACK.with_alpha(0.0)),
            GradientStop::new(1.0, Rgba::BLACK.with_alpha(0.8)),
        ];
        // Outer radius far smaller than the buffer: corners take the pad color.
        paint_radial(&mut buf, w, h, 16.0, 16.0, 4.0, 8.0, &stops).unwrap();
        let corner = pixel(&buf, w, 0, 0);
        assert_eq!(corner[3], 204);
        // Inside the inner radius the first stop (transparent) applies.
        assert_eq!(pixel(&buf, w, 16, 16), [0, 0, 0, 0]);
    }

    #[test]
    fn linear_interpolates_along_the_axis() {
        let (w, h) = (8u32, 64u32);
        let mut buf = vec![0u8; (w * h * 4) as usize];
        let stops = [
            GradientStop::new(0.0, Rgba::WHITE.with_alpha(0.4)),
            GradientStop::new(1.0, Rgba::BLACK.with_alpha(0.2)),
        ];
        paint_linear(&mut buf, w, h, 0.0, 0.0, 0.0, 64.0, &stops).unwrap();

        let top = pixel(&buf, w, 4, 0);
        let bottom = pixel(&buf, w, 4, 63);
        assert!(top[3] > bottom[3]);
        assert!(top[0] > bottom[0]);
    }

    #[test]
    fn degenerate_inputs_paint_nothing() {
        let mut buf = vec![0u8; 16 * 16 * 4];
        let stops = [GradientStop::new(0.0, Rgba::WHITE)];
        paint_radial(&mut buf, 16, 16, 8.0, 8.0, 5.0, 5.0, &stops).unwrap();
        paint_linear(&mut buf, 16, 16, 3.0, 3.0, 3.0, 3.0, &stops).unwrap();
        paint_radial(&mut buf, 16, 16, 8.0, 8.0, 0.0, 8.0, &[]).unwrap();
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn buffer_size_mismatch_is_rejected() {
        let mut buf = vec![0u8; 10];
        let stops = [GradientStop::new(0.0, Rgba::WHITE)];
        assert!(paint_radial(&mut buf, 16, 16, 0.0, 0.0, 0.0, 4.0, &stops).is_err());
    }
}
