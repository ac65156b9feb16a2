//! Lumina is a deterministic generative-art rendering engine.
//!
//! A composition is a pure function of three inputs: an [`AttributeBundle`]
//! of descriptive text fields, a numeric seed, and the surface dimensions.
//! The engine classifies the text into drawing algorithms, derives global
//! density/opacity modifiers from the mood and intensity fields, and paints
//! nine blend-composited layers onto a premultiplied RGBA8 [`Surface`]:
//!
//! - Create a [`Surface`]
//! - Fill an [`AttributeBundle`]
//! - Call [`render`] with a seed
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Keyword classification from attribute text to drawing algorithms.
pub mod classify;
mod engine;
/// Errors and the seeded random sequence.
pub mod foundation;
mod layers;
/// Attribute bundles, palettes and color tokens.
pub mod model;
/// Surface, compositing kernels and gradient painting.
pub mod render;

pub use crate::classify::{Classification, GeometryDrawer, classify_geometry};
pub use crate::engine::render;
pub use crate::foundation::error::{EngineError, EngineResult};
pub use crate::foundation::rng::SeededRng;
pub use crate::model::attributes::AttributeBundle;
pub use crate::model::color::{Rgba, translucent};
pub use crate::model::palette::{DEFAULT_PALETTE_NAME, Palette, resolve as resolve_palette};
pub use crate::render::composite::BlendMode;
pub use crate::render::surface::Surface;
