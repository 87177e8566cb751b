//! Error types for lassoview

use thiserror::Error;

/// Main error type for lassoview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: usize, vertex_count: usize },

    #[error("Missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("Invalid viewport size {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for lassoview operations
pub type Result<T> = std::result::Result<T, Error>;
