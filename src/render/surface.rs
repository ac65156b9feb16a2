//! The raster target a render writes into.

use crate::foundation::error::{EngineError, EngineResult};

/// An owned RGBA8 raster surface.
///
/// Pixels are stored row-major, premultiplied-alpha, four bytes per pixel.
/// A fresh surface is fully transparent; pixels outside a layout clip region
/// stay that way for the whole render.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface.
    ///
    /// Dimensions must be non-zero and fit the u16 raster pipeline.
    pub fn new(width: u32, height: u32) -> EngineResult<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::surface("surface dimensions must be non-zero"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| EngineError::surface("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| EngineError::surface("surface height exceeds u16"))?;
        Ok(Self {
            width: w,
            height: h,
            data: vec![0; usize::from(w) * usize::from(h) * 4],
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Dimensions as the u16 pair the raster pipeline works in.
    pub(crate) fn dims(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Raw premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw premultiplied RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied RGBA bytes of one pixel, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize * usize::from(self.width) + x as usize) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(8, 4).unwrap();
        assert_eq!(s.data().len(), 8 * 4 * 4);
        assert!(s.data().iter().all(|&b| b == 0));
        assert_eq!(s.pixel(7, 3), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(8, 0), None);
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert!(Surface::new(0, 10).is_err());
        assert!(Surface::new(10, 0).is_err());
        assert!(Surface::new(70_000, 10).is_err());
    }
}
