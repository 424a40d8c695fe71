//! Noise-based procedural terrain

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::height::HeightField;

/// Parameters controlling fractal noise terrain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub seed: u32,
    pub scale: f32,        // Horizontal scale (larger = smoother)
    pub height_scale: f32, // Vertical span of the noise
    pub octaves: u32,      // FBM octaves (detail levels)
    pub persistence: f32,  // FBM persistence (0.5 typical)
    pub lacunarity: f32,   // FBM lacunarity (2.0 typical)
    pub base_height: i32,  // Height of the lowest possible column
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 40.0,
            height_scale: 12.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            base_height: 0,
        }
    }
}

/// Height field driven by fractal Brownian motion (FBM) over Perlin noise
pub struct NoiseTerrain {
    params: NoiseParams,
    noise: Fbm<Perlin>,
}

impl NoiseTerrain {
    /// Create a new noise terrain with the given parameters
    pub fn new(params: NoiseParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        Self { params, noise }
    }

    /// Get terrain parameters
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }
}

impl HeightField for NoiseTerrain {
    fn height(&self, x: i32, z: i32) -> i32 {
        let nx = x as f64 / self.params.scale as f64;
        let nz = z as f64 / self.params.scale as f64;

        // Noise is roughly [-1, 1]; clamp so the span stays bounded
        let noise_value = self.noise.get([nx, nz]).clamp(-1.0, 1.0);
        let normalized = (noise_value + 1.0) / 2.0;

        self.params.base_height + (normalized * self.params.height_scale as f64).floor() as i32
    }
}
