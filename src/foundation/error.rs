/// Result alias used by the boundary APIs (JSON parsing, file loading, format validation).
pub type ComposerResult<T> = Result<T, ComposerError>;

/// Errors raised at the engine boundary.
///
/// Interactive engine operations never return this type; they resolve to a defined fallback.
#[derive(thiserror::Error, Debug)]
pub enum ComposerError {
    /// Input failed validation (bad format dimensions, malformed record).
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposerError {
    /// Build a [`ComposerError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ComposerError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
