//! Scene configuration and the per-frame world context

pub mod config;
pub mod manager;

pub use config::{GroundMode, SceneConfig};
pub use manager::{FrameReport, Scene, SceneStats};
