//! Data model consumed by the renderer: attribute bundles, color palettes
//! and color-token helpers.

pub mod attributes;
pub mod color;
pub mod palette;
