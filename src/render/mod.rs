//! Raster surface, software compositing kernels, gradient painting and the
//! vector painter that ties them together.

pub mod composite;
pub mod gradient;
pub(crate) mod painter;
pub mod surface;
