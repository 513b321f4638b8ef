/// Convenience result type used across Atelier.
pub type AtelierResult<T> = Result<T, AtelierError>;

/// Top-level error taxonomy used by library APIs.
///
/// Visual components never surface errors to the viewer; these variants cover caller mistakes
/// (bad configuration, double-mounting a singleton) and IO at the edges.
#[derive(thiserror::Error, Debug)]
pub enum AtelierError {
    /// Invalid user-provided data (options, geometry, event payloads).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or inconsistent site configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A process-wide component was mounted twice on the same window.
    #[error("singleton error: {0}")]
    Singleton(String),

    /// Errors while rasterizing a filter or writing pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AtelierError {
    /// Build an [`AtelierError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AtelierError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`AtelierError::Singleton`] value.
    pub fn singleton(msg: impl Into<String>) -> Self {
        Self::Singleton(msg.into())
    }

    /// Build an [`AtelierError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`AtelierError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for AtelierError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
