//! Voxel data structures and operations

pub mod voxel;
pub mod volume;
pub mod instancing;
pub mod pick;

pub use voxel::{Shade, Voxel};
pub use volume::{Removal, VolumeError, VoxelVolume};
pub use instancing::{InstanceCache, VoxelInstance};
pub use pick::{PickHit, VoxelPicker};
