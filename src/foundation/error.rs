//! Error taxonomy shared by every engine API.

/// Convenience result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Unrecognized attribute text is never an error; every classifier has a
/// documented fallback. The variants below cover the only hard failure
/// conditions: invalid numeric input and an unusable drawing surface.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Invalid caller-provided input (e.g. a non-finite seed).
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawing surface cannot be used as a raster target.
    #[error("surface error: {0}")]
    Surface(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Build an [`EngineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`EngineError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category() {
        let e = EngineError::validation("seed must be finite");
        assert_eq!(e.to_string(), "validation error: seed must be finite");

        let e = EngineError::surface("zero-sized target");
        assert_eq!(e.to_string(), "surface error: zero-sized target");
    }
}
