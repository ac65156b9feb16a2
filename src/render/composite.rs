//! Software compositing kernels over premultiplied RGBA8 buffers.
//!
//! Layer groups are rasterized into scratch buffers and merged here rather
//! than relying on renderer blend state, so every blend mode behaves
//! identically regardless of how a group was produced (vector scene,
//! gradient pass or raw pixel noise).

use crate::foundation::error::{EngineError, EngineResult};

/// How a committed layer group merges into the destination surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Plain source-over.
    #[default]
    Normal,
    /// Darkening product blend.
    Multiply,
    /// Inverse-product lightening blend.
    Screen,
    /// Multiply in shadows, screen in highlights, keyed off the destination.
    Overlay,
    /// Gentle dodge/burn keyed off the source.
    SoftLight,
}

#[inline]
fn mul_div255_u8(v: u16, m: u16) -> u8 {
    ((v * m + 127) / 255) as u8
}

#[inline]
fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

fn check_pair(dst: &[u8], src: &[u8], what: &str) -> EngineResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(EngineError::surface(format!(
            "{what} expects equal-length rgba8 buffers"
        )));
    }
    Ok(())
}

/// Porter-Duff source-over of premultiplied `src` onto `dst`.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> EngineResult<()> {
    check_pair(dst, src, "premul_over_in_place")?;

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);
        d[3] = add_sat_u8(sa, mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            d[c] = add_sat_u8(s[c], mul_div255_u8(u16::from(d[c]), inv));
        }
    }
    Ok(())
}

/// Composite premultiplied `src` onto `dst` under `blend`.
///
/// Non-normal modes apply the separable blend function to unpremultiplied
/// channels inside the standard source-over formula:
/// `out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da`.
pub(crate) fn blend_in_place(dst: &mut [u8], src: &[u8], blend: BlendMode) -> EngineResult<()> {
    // Mode dispatch happens once per group, not per pixel; each branch
    // monomorphizes a specialized kernel.
    match blend {
        BlendMode::Normal => premul_over_in_place(dst, src),
        BlendMode::Multiply => blend_in_place_fn(dst, src, |s, d| s * d),
        BlendMode::Screen => blend_in_place_fn(dst, src, |s, d| s + d - s * d),
        BlendMode::Overlay => blend_in_place_fn(dst, src, |s, d| {
            if d <= 0.5 {
                2.0 * s * d
            } else {
                1.0 - 2.0 * (1.0 - s) * (1.0 - d)
            }
        }),
        BlendMode::SoftLight => blend_in_place_fn(dst, src, |s, d| {
            if s <= 0.5 {
                d - (1.0 - 2.0 * s) * d * (1.0 - d)
            } else {
                let g = if d <= 0.25 {
                    ((16.0 * d - 12.0) * d + 4.0) * d
                } else {
                    d.sqrt()
                };
                d + (2.0 * s - 1.0) * (g - d)
            }
        }),
    }
}

#[inline(always)]
fn blend_in_place_fn<F>(dst: &mut [u8], src: &[u8], blend_fn: F) -> EngineResult<()>
where
    F: Fn(f32, f32) -> f32,
{
    check_pair(dst, src, "blend_in_place")?;

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3] as f32 / 255.0;
        let da = d[3] as f32 / 255.0;
        if sa == 0.0 {
            continue;
        }

        let sp = [
            s[0] as f32 / 255.0,
            s[1] as f32 / 255.0,
            s[2] as f32 / 255.0,
        ];
        let dp = [
            d[0] as f32 / 255.0,
            d[1] as f32 / 255.0,
            d[2] as f32 / 255.0,
        ];

        let out_a = (sa + da * (1.0 - sa)).clamp(0.0, 1.0);
        for c in 0..3 {
            let sc = (sp[c] / sa).clamp(0.0, 1.0);
            let dc = if da > 0.0 {
                (dp[c] / da).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let b = blend_fn(sc, dc).clamp(0.0, 1.0);
            let out_p = (sp[c] * (1.0 - da) + dp[c] * (1.0 - sa) + b * sa * da).clamp(0.0, 1.0);
            d[c] = (out_p * 255.0).round() as u8;
        }
        d[3] = (out_a * 255.0).round() as u8;
    }

    Ok(())
}

/// Multiply every channel of premultiplied `dst` by the mask's alpha.
pub(crate) fn mask_apply_in_place(dst: &mut [u8], mask: &[u8]) -> EngineResult<()> {
    check_pair(dst, mask, "mask_apply_in_place")?;

    for (d, m) in dst.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let w = u16::from(m[3]);
        if w == 255 {
            continue;
        }
        for c in 0..4 {
            d[c] = mul_div255_u8(u16::from(d[c]), w);
        }
    }
    Ok(())
}

/// Convert straight-alpha RGBA8 to premultiplied in place.
pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in 0..3 {
            px[c] = mul_div255_u8(u16::from(px[c]), a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_with_opaque_source_replaces_destination() {
        let mut dst = vec![10, 20, 30, 255];
        let src = vec![200, 100, 50, 255];
        premul_over_in_place(&mut dst, &src).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn over_with_transparent_source_is_identity() {
        let mut dst = vec![10, 20, 30, 128];
        let src = vec![0, 0, 0, 0];
        premul_over_in_place(&mut dst, &src).unwrap();
        assert_eq!(dst, [10, 20, 30, 128]);
    }

    #[test]
    fn over_half_alpha_mixes() {
        // Premul 50% white over opaque black: each channel gains ~128.
        let mut dst = vec![0, 0, 0, 255];
        let src = vec![128, 128, 128, 128];
        premul_over_in_place(&mut dst, &src).unwrap();
        assert_eq!(dst[3], 255);
        assert!((126..=130).contains(&dst[0]));
    }

    #[test]
    fn multiply_darkens_and_screen_lightens() {
        let grey = vec![128, 128, 128, 255];

        let mut d = grey.clone();
        blend_in_place(&mut d, &grey, BlendMode::Multiply).unwrap();
        assert!(d[0] < 128, "multiply must darken, got {}", d[0]);

        let mut d = grey.clone();
        blend_in_place(&mut d, &grey, BlendMode::Screen).unwrap();
        assert!(d[0] > 128, "screen must lighten, got {}", d[0]);
    }

    #[test]
    fn overlay_keys_off_the_destination() {
        let src = vec![180, 180, 180, 255];

        let mut dark = vec![40, 40, 40, 255];
        blend_in_place(&mut dark, &src, BlendMode::Overlay).unwrap();

        let mut light = vec![220, 220, 220, 255];
        blend_in_place(&mut light, &src, BlendMode::Overlay).unwrap();

        // Dark destinations use the multiply arm, light ones the screen arm.
        assert!(dark[0] < 128);
        assert!(light[0] > 220);
    }

    #[test]
    fn blending_onto_transparent_destination_keeps_source() {
        let mut dst = vec![0, 0, 0, 0];
        let src = vec![100, 60, 20, 200];
        blend_in_place(&mut dst, &src, BlendMode::Screen).unwrap();
        for c in 0..4 {
            let diff = i16::from(dst[c]) - i16::from(src[c]);
            assert!(diff.abs() <= 1, "channel {c}: {} vs {}", dst[c], src[c]);
        }
    }

    #[test]
    fn soft_light_is_bounded() {
        let src = vec![250, 5, 128, 255];
        let mut dst = vec![5, 250, 128, 255];
        blend_in_place(&mut dst, &src, BlendMode::SoftLight).unwrap();
        assert_eq!(dst[3], 255);
    }

    #[test]
    fn mask_scales_all_channels() {
        let mut dst = vec![200, 100, 50, 255, 200, 100, 50, 255];
        let mask = vec![0, 0, 0, 255, 0, 0, 0, 0];
        mask_apply_in_place(&mut dst, &mask).unwrap();
        assert_eq!(&dst[0..4], &[200, 100, 50, 255]);
        assert_eq!(&dst[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut dst = vec![0; 8];
        let src = vec![0; 4];
        assert!(premul_over_in_place(&mut dst, &src).is_err());
        assert!(blend_in_place(&mut dst, &src, BlendMode::Multiply).is_err());
        assert!(mask_apply_in_place(&mut dst, &src).is_err());
    }

    #[test]
    fn premultiply_zeroes_fully_transparent_pixels() {
        let mut px = vec![255, 128, 64, 0, 255, 255, 255, 128];
        premultiply_rgba8_in_place(&mut px);
        assert_eq!(&px[0..4], &[0, 0, 0, 0]);
        assert_eq!(px[7], 128);
        assert!((126..=130).contains(&px[4]));
    }
}
