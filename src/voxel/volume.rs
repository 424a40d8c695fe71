//! Surface-shell voxel volume.
//!
//! A fixed square region of terrain columns, each extruded `column_depth`
//! voxels down from its surface. Voxels live in one flat arena indexed in
//! creation order (x outer, z inner, top voxel first). Removal only flips a
//! voxel's presence flag, so an index handed out once (for example by a ray
//! pick) keeps naming the same voxel for the volume's lifetime.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::core::types::IVec3;
use crate::math::Aabb;
use crate::terrain::HeightField;
use super::voxel::{Shade, Voxel};

/// Errors from index-based volume access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VolumeError {
    #[error("voxel index {index} out of range (volume holds {len})")]
    OutOfRange { index: i64, len: usize },
}

/// Outcome of a removal request on a valid index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The voxel was present and is now gone
    Removed,
    /// The voxel was already gone; nothing changed
    AlreadyRemoved,
}

static NEXT_VOLUME_ID: AtomicU64 = AtomicU64::new(1);

/// Dense, index-stable collection of terrain voxels
pub struct VoxelVolume {
    /// Process-unique, distinguishes volumes of equal size
    id: u64,
    voxels: Vec<Voxel>,
    half_extent: u32,
    column_depth: u32,
    present_count: usize,
    /// Bumped on every effective removal
    revision: u64,
    bounds: Option<Aabb>,
}

impl VoxelVolume {
    /// Sample `field` over `x, z ∈ [-half_extent, half_extent)` and extrude
    /// `column_depth` voxels beneath each surface point.
    ///
    /// The result holds exactly `(2·half_extent)² · column_depth` voxels.
    /// Surfaces lower than `i32::MIN + column_depth - 1` are raised to it so
    /// every column fits the lattice. The field is not retained.
    ///
    /// Sizes are trusted here; [`SceneConfig::validate`] bounds them for
    /// scenes built from user input.
    ///
    /// [`SceneConfig::validate`]: crate::scene::SceneConfig::validate
    pub fn populate<H>(half_extent: u32, column_depth: u32, field: &H) -> Self
    where
        H: HeightField + ?Sized,
    {
        let side = 2 * half_extent as usize;
        let capacity = side * side * column_depth as usize;
        let mut voxels = Vec::with_capacity(capacity);

        log::debug!(
            "Populating volume: half_extent={}, column_depth={}, capacity={}",
            half_extent, column_depth, capacity
        );

        let extent = half_extent as i32;
        let depth = column_depth as i32;
        let lowest_surface = i32::MIN.saturating_add(depth.saturating_sub(1));
        let mut bounds: Option<Aabb> = None;

        for x in -extent..extent {
            for z in -extent..extent {
                let h = field.height(x, z).max(lowest_surface);
                let shade = Shade::classify(h);

                voxels.extend((0..depth).map(|d| Voxel::new(IVec3::new(x, h - d, z), shade)));

                if depth > 0 {
                    let mut column = Aabb::voxel(IVec3::new(x, h, z));
                    column.expand(&Aabb::voxel(IVec3::new(x, h - (depth - 1), z)));
                    bounds = Some(match bounds {
                        Some(mut b) => {
                            b.expand(&column);
                            b
                        }
                        None => column,
                    });
                }
            }
        }

        debug_assert_eq!(voxels.len(), capacity);

        match bounds {
            Some(b) => log::info!(
                "Populated {} voxels over {}x{} columns (y {}..={})",
                voxels.len(), side, side, b.min.y + 0.5, b.max.y - 0.5
            ),
            None => log::info!("Populated empty volume"),
        }

        let present_count = voxels.len();
        Self {
            id: NEXT_VOLUME_ID.fetch_add(1, Ordering::Relaxed),
            voxels,
            half_extent,
            column_depth,
            present_count,
            revision: 0,
            bounds,
        }
    }

    /// Identity of this volume, unique within the process
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Total number of voxel slots, present or not
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Number of voxels still present
    pub fn present_count(&self) -> usize {
        self.present_count
    }

    pub fn half_extent(&self) -> u32 {
        self.half_extent
    }

    pub fn column_depth(&self) -> u32 {
        self.column_depth
    }

    /// Changes whenever a voxel is removed
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// World-space box around every voxel slot, `None` for an empty volume
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Validate a signed index from an external collaborator
    pub fn resolve(&self, raw: i64) -> Result<usize, VolumeError> {
        usize::try_from(raw)
            .ok()
            .filter(|&index| index < self.voxels.len())
            .ok_or(VolumeError::OutOfRange {
                index: raw,
                len: self.voxels.len(),
            })
    }

    /// Look up a voxel record by index
    pub fn get(&self, index: usize) -> Result<&Voxel, VolumeError> {
        self.voxels.get(index).ok_or_else(|| self.out_of_range(index))
    }

    /// Remove the voxel at `index`. Repeated removal reports
    /// [`Removal::AlreadyRemoved`] and changes nothing.
    pub fn remove_at(&mut self, index: usize) -> Result<Removal, VolumeError> {
        let err = self.out_of_range(index);
        let voxel = self.voxels.get_mut(index).ok_or(err)?;

        if voxel.clear() {
            self.present_count -= 1;
            self.revision += 1;
            log::debug!("Removed voxel {} at {}", index, voxel.position);
            Ok(Removal::Removed)
        } else {
            Ok(Removal::AlreadyRemoved)
        }
    }

    /// Every voxel slot with its index, in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Voxel)> + '_ {
        self.voxels.iter().enumerate()
    }

    /// Present voxels with their indices, in index order
    pub fn present(&self) -> impl Iterator<Item = (usize, &Voxel)> + '_ {
        self.iter().filter(|(_, v)| v.is_present())
    }

    /// Index range of column `(x, z)`, top voxel first. `None` outside the region.
    pub fn column_range(&self, x: i32, z: i32) -> Option<Range<usize>> {
        let extent = self.half_extent as i64;
        let (cx, cz) = (x as i64 + extent, z as i64 + extent);
        let side = 2 * extent;
        if cx < 0 || cx >= side || cz < 0 || cz >= side {
            return None;
        }

        let depth = self.column_depth as usize;
        let start = (cx * side + cz) as usize * depth;
        Some(start..start + depth)
    }

    /// Height of the highest present voxel in column `(x, z)`
    pub fn column_top(&self, x: i32, z: i32) -> Option<i32> {
        let range = self.column_range(x, z)?;
        self.voxels[range]
            .iter()
            .find(|v| v.is_present())
            .map(|v| v.position.y)
    }

    fn out_of_range(&self, index: usize) -> VolumeError {
        VolumeError::OutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: self.voxels.len(),
        }
    }
}
