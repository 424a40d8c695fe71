//! Error types for terravox

use thiserror::Error;

use crate::voxel::volume::VolumeError;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Volume error: {0}")]
    Volume(#[from] VolumeError),
}
