//! Ray picking against the present voxels of a volume

use crate::core::types::Vec3;
use crate::math::Ray;
use super::volume::VoxelVolume;

/// Nearest voxel hit along a ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    /// Volume index of the hit voxel
    pub index: usize,
    /// Point where the ray enters the voxel
    pub point: Vec3,
    /// Ray parameter at `point`
    pub distance: f32,
}

/// Brute-force picker: one slab test per present voxel, after a single
/// rejection test against the whole volume's bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoxelPicker {
    /// Hits further than this are ignored (`None` = unbounded)
    pub max_distance: Option<f32>,
}

impl VoxelPicker {
    pub fn new(max_distance: Option<f32>) -> Self {
        Self { max_distance }
    }

    /// Find the closest present voxel the ray enters
    pub fn pick(&self, volume: &VoxelVolume, ray: &Ray) -> Option<PickHit> {
        let bounds = volume.bounds()?;
        let limit = self.max_distance.unwrap_or(f32::INFINITY);

        match ray.entry(&bounds) {
            Some(t) if t <= limit => {}
            _ => return None,
        }

        let mut best: Option<(usize, f32)> = None;
        for (index, voxel) in volume.present() {
            let Some(t) = ray.voxel_entry(voxel.position) else {
                continue;
            };
            if t > limit {
                continue;
            }
            // Strict comparison keeps the lowest index on ties
            if best.is_none_or(|(_, best_t)| t < best_t) {
                best = Some((index, t));
            }
        }

        best.map(|(index, distance)| PickHit {
            index,
            point: ray.point_at(distance),
            distance,
        })
    }
}
