//! Per-instance data for drawing present voxels as instanced unit cubes

use bytemuck::{Pod, Zeroable};

use super::volume::VoxelVolume;

/// One cube instance - exactly 16 bytes, ready for a vertex buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct VoxelInstance {
    /// Cube centre in world space
    pub position: [f32; 3],
    /// Packed `0xRRGGBB` color
    pub color: u32,
}

/// Instance list mirrored from a volume, rebuilt only when the volume changes
#[derive(Default)]
pub struct InstanceCache {
    instances: Vec<VoxelInstance>,
    /// Volume index of each instance
    sources: Vec<usize>,
    /// `(volume id, revision)` of the last rebuild
    synced: Option<(u64, u64)>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from `volume` if it was edited, or is a different volume,
    /// since the last sync. Returns `true` when the instance list changed.
    pub fn sync(&mut self, volume: &VoxelVolume) -> bool {
        let stamp = (volume.id(), volume.revision());
        if self.synced == Some(stamp) {
            return false;
        }

        self.instances.clear();
        self.sources.clear();
        self.instances.reserve(volume.present_count());
        self.sources.reserve(volume.present_count());

        for (index, voxel) in volume.present() {
            self.instances.push(VoxelInstance {
                position: voxel.position.as_vec3().to_array(),
                color: voxel.shade.hex(),
            });
            self.sources.push(index);
        }

        log::debug!("Rebuilt {} voxel instances (revision {})", self.instances.len(), stamp.1);
        self.synced = Some(stamp);
        true
    }

    pub fn instances(&self) -> &[VoxelInstance] {
        &self.instances
    }

    /// Raw bytes for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Map an instance slot back to the volume index it was built from
    pub fn source_index(&self, instance: usize) -> Option<usize> {
        self.sources.get(instance).copied()
    }
}
