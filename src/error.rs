//! Error types for the demo engine

use thiserror::Error;

/// Errors that stop (or prevent) a demo session
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Drawing surface lost")]
    SurfaceLost,

    #[error("Out of GPU memory")]
    OutOfMemory,

    #[error("Engine is not running")]
    NotRunning,

    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Whether the session cannot continue after this error
    pub fn is_fatal(&self) -> bool {
        !matches!(self, EngineError::NotRunning)
    }
}

/// Errors from loading or validating a [`crate::DemoConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
