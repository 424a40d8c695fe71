//! Integer height fields
//!
//! A height field maps a ground column `(x, z)` to the elevation of its top
//! voxel. Implementations are pure: the same column always yields the same
//! height, so volume population and ground collision can share one source.

use serde::{Deserialize, Serialize};

/// Deterministic column height lookup, total over all `i32` pairs
pub trait HeightField {
    /// Surface elevation of column `(x, z)`
    fn height(&self, x: i32, z: i32) -> i32;
}

impl<T: HeightField + ?Sized> HeightField for &T {
    fn height(&self, x: i32, z: i32) -> i32 {
        (**self).height(x, z)
    }
}

impl<T: HeightField + ?Sized> HeightField for Box<T> {
    fn height(&self, x: i32, z: i32) -> i32 {
        (**self).height(x, z)
    }
}

/// Constant-height terrain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatTerrain(pub i32);

impl HeightField for FlatTerrain {
    fn height(&self, _x: i32, _z: i32) -> i32 {
        self.0
    }
}

/// Parameters of the rolling-hill wave terrain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    /// Horizontal frequency applied to both axes
    pub scale: f64,
    /// Amplitude of the `sin(x)·cos(z)` term
    pub primary_amplitude: f64,
    /// Amplitude of the diagonal ridge term
    pub secondary_amplitude: f64,
    /// X frequency multiplier of the ridge term
    pub secondary_frequency: f64,
    /// Constant vertical offset
    pub base_height: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            scale: 0.05,
            primary_amplitude: 5.0,
            secondary_amplitude: 2.0,
            secondary_frequency: 2.5,
            base_height: 5.0,
        }
    }
}

/// Sum of two sinusoids, floored to whole voxels:
///
/// `floor(sin(x·s)·cos(z·s)·a₁ + sin(x·s·f + z·s)·a₂ + base)`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveTerrain {
    params: WaveParams,
}

impl WaveTerrain {
    pub fn new(params: WaveParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }
}

impl HeightField for WaveTerrain {
    fn height(&self, x: i32, z: i32) -> i32 {
        let p = &self.params;
        let x = x as f64 * p.scale;
        let z = z as f64 * p.scale;

        let hills = x.sin() * z.cos() * p.primary_amplitude;
        let ridges = (x * p.secondary_frequency + z).sin() * p.secondary_amplitude;

        (hills + ridges + p.base_height).floor() as i32
    }
}
