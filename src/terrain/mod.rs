//! Procedural terrain height sources

pub mod height;
pub use height::{FlatTerrain, HeightField, WaveParams, WaveTerrain};

pub mod generator;
pub use generator::{NoiseParams, NoiseTerrain};

pub mod source;
pub use source::TerrainSource;
