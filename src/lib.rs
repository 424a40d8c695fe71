//! Terravox - heightmap voxel terrain with index-stable block removal

pub mod core;
pub mod math;
pub mod terrain;
pub mod voxel;
pub mod scene;
