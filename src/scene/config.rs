//! Scene configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::camera_controller::ControllerParams;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::terrain::TerrainSource;

/// Most voxels a scene may populate
pub const MAX_VOXELS: u64 = 1 << 22;

/// What the avatar stands on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundMode {
    /// The continuous height field; removing voxels never changes footing
    #[default]
    HeightField,
    /// The highest present voxel of the column, so dug-out columns drop the avatar
    Volume,
}

/// Configuration for a voxel scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Columns span `[-region_half_extent, region_half_extent)` on both axes
    pub region_half_extent: u32,
    /// Voxels extruded under each surface point
    pub column_depth: u32,
    /// Height field the terrain is sampled from
    pub terrain: TerrainSource,
    /// Ground collision source
    pub ground_mode: GroundMode,
    /// Initial eye position
    pub spawn: [f32; 3],
    /// Avatar movement constants
    pub controller: ControllerParams,
    /// Picks further than this are ignored (`None` = unbounded)
    pub max_pick_distance: Option<f32>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            region_half_extent: 25,
            column_depth: 3,
            terrain: TerrainSource::default(),
            ground_mode: GroundMode::HeightField,
            spawn: [0.0, 10.0, 0.0],
            controller: ControllerParams::default(),
            max_pick_distance: None,
        }
    }
}

impl SceneConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: SceneConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values that would produce an empty world or unstable physics
    pub fn validate(&self) -> Result<()> {
        if self.region_half_extent == 0 {
            return Err(Error::Config("region_half_extent must be positive".into()));
        }
        if self.column_depth == 0 {
            return Err(Error::Config("column_depth must be positive".into()));
        }

        let voxels = (2 * u64::from(self.region_half_extent))
            .checked_pow(2)
            .and_then(|columns| columns.checked_mul(u64::from(self.column_depth)));
        if !voxels.is_some_and(|n| n <= MAX_VOXELS) {
            return Err(Error::Config(format!(
                "region_half_extent {} with column_depth {} exceeds {} voxels",
                self.region_half_extent, self.column_depth, MAX_VOXELS
            )));
        }

        let c = &self.controller;
        let positive = [
            ("gravity", c.gravity),
            ("damping", c.damping),
            ("acceleration", c.acceleration),
            ("jump_speed", c.jump_speed),
            ("sensitivity", c.sensitivity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("controller.{} must be positive, got {}", name, value)));
            }
        }
        if !(c.eye_height.is_finite() && c.eye_height >= 0.0) {
            return Err(Error::Config(format!("controller.eye_height must be non-negative, got {}", c.eye_height)));
        }

        if let Some(d) = self.max_pick_distance {
            if d.is_nan() || d <= 0.0 {
                return Err(Error::Config(format!("max_pick_distance must be positive, got {}", d)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.region_half_extent, 25);
        assert_eq!(config.column_depth, 3);
        assert_eq!(config.ground_mode, GroundMode::HeightField);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scene.json");

        let config = SceneConfig {
            region_half_extent: 8,
            ground_mode: GroundMode::Volume,
            terrain: TerrainSource::Flat { height: 4 },
            max_pick_distance: Some(12.0),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = SceneConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{ "column_depth": 5, "controller": { "gravity": 9.8 } }"#).unwrap();

        let config = SceneConfig::load(&path).unwrap();
        assert_eq!(config.column_depth, 5);
        assert_eq!(config.region_half_extent, 25);
        assert_eq!(config.controller.gravity, 9.8);
        assert_eq!(config.controller.jump_speed, 15.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{ "column_depth": 0 }"#).unwrap();
        assert!(matches!(SceneConfig::load(&path), Err(Error::Config(_))));

        let config = SceneConfig {
            controller: ControllerParams { damping: -1.0, ..Default::default() },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = SceneConfig { max_pick_distance: Some(0.0), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_voxel_budget() {
        for (region_half_extent, column_depth) in [(u32::MAX, 3), (25, u32::MAX), (u32::MAX, u32::MAX), (1025, 1)] {
            let config = SceneConfig { region_half_extent, column_depth, ..Default::default() };
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{} x {}", region_half_extent, column_depth);
        }

        // 1024 columns square, 4 deep: exactly at the cap
        let config = SceneConfig { region_half_extent: 512, column_depth: 4, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(SceneConfig::load(&missing), Err(Error::Io(_))));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "{ not json").unwrap();
        assert!(matches!(SceneConfig::load(&garbage), Err(Error::Json(_))));
    }
}
