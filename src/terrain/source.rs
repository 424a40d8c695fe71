//! Config-selectable terrain source

use serde::{Deserialize, Serialize};

use super::generator::{NoiseParams, NoiseTerrain};
use super::height::{FlatTerrain, HeightField, WaveParams, WaveTerrain};

/// Which height field a scene is built from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainSource {
    Wave(WaveParams),
    Flat { height: i32 },
    Noise(NoiseParams),
}

impl Default for TerrainSource {
    fn default() -> Self {
        TerrainSource::Wave(WaveParams::default())
    }
}

impl TerrainSource {
    /// Instantiate the height field
    pub fn build(&self) -> Box<dyn HeightField> {
        match self {
            TerrainSource::Wave(params) => Box::new(WaveTerrain::new(params.clone())),
            TerrainSource::Flat { height } => Box::new(FlatTerrain(*height)),
            TerrainSource::Noise(params) => Box::new(NoiseTerrain::new(params.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_wave() {
        let field = TerrainSource::default().build();
        assert_eq!(field.height(0, 0), 5);
        assert_eq!(field.height(20, 3), 10);
    }

    #[test]
    fn test_flat_from_json() {
        let source: TerrainSource = serde_json::from_str(r#"{"kind":"flat","height":4}"#).unwrap();
        assert_eq!(source, TerrainSource::Flat { height: 4 });
        assert_eq!(source.build().height(9, 9), 4);
    }

    #[test]
    fn test_partial_wave_params() {
        let source: TerrainSource =
            serde_json::from_str(r#"{"kind":"wave","base_height":8.0}"#).unwrap();
        match &source {
            TerrainSource::Wave(p) => {
                assert_eq!(p.base_height, 8.0);
                assert_eq!(p.scale, 0.05);
            }
            other => panic!("unexpected source {:?}", other),
        }
        assert_eq!(source.build().height(0, 0), 8);
    }
}
