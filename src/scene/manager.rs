//! Scene context: owns the world and drives it one frame at a time
//!
//! Lifecycle is `Scene::init` → `Scene::update` per frame → `Scene::teardown`.
//! Platform code feeds input through `handle_event` between updates.

use crate::core::camera::Camera;
use crate::core::camera_controller::FirstPersonController;
use crate::core::input::{InputEvent, InputState};
use crate::core::types::{Result, Vec3};
use crate::terrain::HeightField;
use crate::voxel::{InstanceCache, Removal, VoxelInstance, VoxelPicker, VoxelVolume};
use super::config::{GroundMode, SceneConfig};

/// Counters accumulated over a scene's lifetime
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub frames: u64,
    /// Voxels actually removed
    pub removed: u64,
    /// Removal requests on voxels that were already gone
    pub repeated: u64,
    /// Removal requests with an invalid index
    pub ignored: u64,
    /// Clicks whose ray hit nothing
    pub misses: u64,
}

/// What happened during one `update`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Avatar is standing on the ground
    pub grounded: bool,
    /// Voxels removed this frame
    pub removed: u32,
}

/// Surface height the avatar stands on at column `(x, z)`
fn ground_height(
    mode: GroundMode,
    field: &dyn HeightField,
    volume: &VoxelVolume,
    x: i32,
    z: i32,
) -> i32 {
    let surface = field.height(x, z);
    match mode {
        GroundMode::HeightField => surface,
        GroundMode::Volume => match volume.column_range(x, z) {
            None => surface,
            // An emptied column leaves the unrepresented subsurface underneath
            Some(_) => volume
                .column_top(x, z)
                .unwrap_or(surface.saturating_sub(volume.column_depth() as i32)),
        },
    }
}

/// One voxel world with its avatar
pub struct Scene {
    config: SceneConfig,
    field: Box<dyn HeightField>,
    volume: VoxelVolume,
    camera: Camera,
    controller: FirstPersonController,
    input: InputState,
    picker: VoxelPicker,
    instances: InstanceCache,
    stats: SceneStats,
}

impl Scene {
    /// Validate the config, build the terrain and populate the volume
    pub fn init(config: SceneConfig) -> Result<Self> {
        config.validate()?;

        let field = config.terrain.build();
        let volume = VoxelVolume::populate(config.region_half_extent, config.column_depth, &*field);

        let camera = Camera::new(Vec3::from_array(config.spawn));
        let controller = FirstPersonController::new(config.controller.clone());
        let picker = VoxelPicker::new(config.max_pick_distance);

        log::info!(
            "Scene ready: {} voxels, ground mode {:?}, spawn {:?}",
            volume.len(), config.ground_mode, config.spawn
        );

        Ok(Self {
            config,
            field,
            volume,
            camera,
            controller,
            input: InputState::new(),
            picker,
            instances: InstanceCache::new(),
            stats: SceneStats::default(),
        })
    }

    /// Feed one platform input event
    pub fn handle_event(&mut self, event: InputEvent) {
        self.input.process_event(event);
    }

    /// Advance one frame: move the avatar, then resolve this frame's clicks
    /// into removals. Does nothing but clear input while the pointer is free.
    pub fn update(&mut self, dt: f32) -> FrameReport {
        let mut report = FrameReport::default();
        self.stats.frames += 1;

        if self.input.is_pointer_locked() {
            let mode = self.config.ground_mode;
            let field = &*self.field;
            let volume = &self.volume;
            report.grounded = self.controller.update(
                &mut self.camera,
                &self.input,
                dt,
                |x, z| ground_height(mode, field, volume, x, z),
            );

            for _ in 0..self.input.clicks() {
                let ray = self.camera.center_ray();
                match self.picker.pick(&self.volume, &ray) {
                    Some(hit) => {
                        if self.remove_voxel(hit.index as i64) == Some(Removal::Removed) {
                            report.removed += 1;
                        }
                    }
                    None => self.stats.misses += 1,
                }
            }
        }

        self.input.end_frame();
        report
    }

    /// Remove a voxel by raw index, as issued by an external pick collaborator
    pub fn try_remove_voxel(&mut self, raw: i64) -> Result<Removal> {
        let index = self.volume.resolve(raw)?;
        let removal = self.volume.remove_at(index)?;

        match removal {
            Removal::Removed => self.stats.removed += 1,
            Removal::AlreadyRemoved => self.stats.repeated += 1,
        }
        Ok(removal)
    }

    /// Like [`Scene::try_remove_voxel`], but invalid indices are logged and
    /// ignored so the frame loop keeps running.
    pub fn remove_voxel(&mut self, raw: i64) -> Option<Removal> {
        match self.try_remove_voxel(raw) {
            Ok(removal) => Some(removal),
            Err(e) => {
                log::warn!("Ignoring removal request: {}", e);
                self.stats.ignored += 1;
                None
            }
        }
    }

    /// Ground height under column `(x, z)` for the configured ground mode
    pub fn ground_at(&self, x: i32, z: i32) -> i32 {
        ground_height(self.config.ground_mode, &*self.field, &self.volume, x, z)
    }

    /// Render instances of all present voxels, rebuilt only after edits
    pub fn instances(&mut self) -> &[VoxelInstance] {
        self.instances.sync(&self.volume);
        self.instances.instances()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn height_field(&self) -> &dyn HeightField {
        &*self.field
    }

    pub fn volume(&self) -> &VoxelVolume {
        &self.volume
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller(&self) -> &FirstPersonController {
        &self.controller
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Release the world and return the lifetime counters
    pub fn teardown(self) -> SceneStats {
        log::info!(
            "Scene teardown after {} frames: {} removed, {} repeated, {} ignored, {} of {} voxels left",
            self.stats.frames,
            self.stats.removed,
            self.stats.repeated,
            self.stats.ignored,
            self.volume.present_count(),
            self.volume.len(),
        );
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};
    use crate::terrain::TerrainSource;
    use crate::core::error::Error;
    use crate::voxel::VolumeError;

    const DT: f32 = 1.0 / 60.0;

    fn flat_config(height: i32) -> SceneConfig {
        SceneConfig {
            region_half_extent: 4,
            column_depth: 3,
            terrain: TerrainSource::Flat { height },
            spawn: [0.2, 20.0, 0.2],
            ..Default::default()
        }
    }

    /// Lock the pointer, let the avatar land, then look straight down
    fn settled(config: SceneConfig) -> Scene {
        let mut scene = Scene::init(config).unwrap();
        scene.handle_event(InputEvent::PointerLock(true));
        for _ in 0..180 {
            scene.update(DT);
        }
        // pitch = -dy * 0.002, so 1000 counts clamps to straight down
        scene.handle_event(InputEvent::MouseMotion { dx: 0.0, dy: 1000.0 });
        scene.update(DT);
        scene
    }

    #[test]
    fn test_init_populates() {
        let scene = Scene::init(SceneConfig::default()).unwrap();
        assert_eq!(scene.volume().len(), 50 * 50 * 3);
        assert_eq!(scene.height_field().height(0, 0), 5);
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let config = SceneConfig { column_depth: 0, ..Default::default() };
        assert!(Scene::init(config).is_err());
    }

    #[test]
    fn test_unlocked_frames_do_nothing() {
        let mut scene = Scene::init(flat_config(4)).unwrap();
        scene.handle_event(InputEvent::KeyDown(KeyCode::KeyW));
        scene.handle_event(InputEvent::Click(MouseButton::Left));

        let report = scene.update(DT);
        assert_eq!(report, FrameReport::default());
        assert_eq!(scene.camera().position, Vec3::new(0.2, 20.0, 0.2));
        assert_eq!(scene.volume().present_count(), scene.volume().len());
    }

    #[test]
    fn test_avatar_lands_on_height_field() {
        let scene = settled(flat_config(4));
        assert!(scene.controller().can_jump());
        assert!((scene.camera().position.y - 5.8).abs() < 1e-4);
    }

    #[test]
    fn test_click_removes_voxel_below() {
        let mut scene = settled(flat_config(4));
        let column = scene.volume().column_range(0, 0).unwrap();

        scene.handle_event(InputEvent::Click(MouseButton::Left));
        let report = scene.update(DT);
        assert_eq!(report.removed, 1);
        assert!(!scene.volume().get(column.start).unwrap().is_present());
        assert_eq!(scene.volume().column_top(0, 0), Some(3));

        // Height-field footing ignores the hole
        assert_eq!(scene.ground_at(0, 0), 4);
        assert_eq!(scene.instances().len(), scene.volume().len() - 1);
    }

    #[test]
    fn test_volume_ground_mode_follows_removal() {
        let config = SceneConfig { ground_mode: GroundMode::Volume, ..flat_config(4) };
        let mut scene = settled(config);

        for expected in [3, 2, 1] {
            scene.handle_event(InputEvent::Click(MouseButton::Left));
            scene.update(DT);
            assert_eq!(scene.ground_at(0, 0), expected);
        }
        assert_eq!(scene.volume().column_top(0, 0), None);

        // Outside the region the field still applies
        assert_eq!(scene.ground_at(100, 100), 4);

        for _ in 0..120 {
            scene.update(DT);
        }
        assert!((scene.camera().position.y - 2.8).abs() < 1e-4);
    }

    #[test]
    fn test_remove_voxel_policy() {
        let mut scene = Scene::init(flat_config(4)).unwrap();
        let len = scene.volume().len() as i64;

        assert_eq!(scene.remove_voxel(3), Some(Removal::Removed));
        assert_eq!(scene.remove_voxel(3), Some(Removal::AlreadyRemoved));
        assert_eq!(scene.remove_voxel(-1), None);
        assert_eq!(scene.remove_voxel(len), None);

        let stats = scene.teardown();
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.repeated, 1);
        assert_eq!(stats.ignored, 2);
    }

    #[test]
    fn test_try_remove_voxel_reports_volume_error() {
        let mut scene = Scene::init(flat_config(4)).unwrap();
        let len = scene.volume().len();

        assert!(matches!(
            scene.try_remove_voxel(-1),
            Err(Error::Volume(VolumeError::OutOfRange { index: -1, len: l })) if l == len
        ));
        assert!(matches!(scene.try_remove_voxel(0), Ok(Removal::Removed)));
        // Only the infallible wrapper counts ignored requests
        assert_eq!(scene.stats().ignored, 0);
        assert_eq!(scene.stats().removed, 1);
    }

    #[test]
    fn test_init_with_extreme_terrain() {
        let config = SceneConfig {
            ground_mode: GroundMode::Volume,
            ..flat_config(i32::MIN)
        };
        let mut scene = Scene::init(config).unwrap();
        assert_eq!(scene.volume().column_top(0, 0), Some(i32::MIN + 2));

        let column = scene.volume().column_range(0, 0).unwrap();
        for index in column {
            scene.remove_voxel(index as i64);
        }
        assert_eq!(scene.ground_at(0, 0), i32::MIN);
    }

    #[test]
    fn test_init_rejects_oversized_region() {
        let config = SceneConfig { region_half_extent: u32::MAX, ..Default::default() };
        assert!(matches!(Scene::init(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_click_into_sky_is_a_miss() {
        let mut scene = Scene::init(flat_config(4)).unwrap();
        scene.handle_event(InputEvent::PointerLock(true));
        for _ in 0..180 {
            scene.update(DT);
        }
        scene.handle_event(InputEvent::MouseMotion { dx: 0.0, dy: -1000.0 });
        scene.handle_event(InputEvent::Click(MouseButton::Left));
        let report = scene.update(DT);

        assert_eq!(report.removed, 0);
        assert_eq!(scene.stats().misses, 1);
    }
}
