//! Voxel record and surface shading

use serde::{Deserialize, Serialize};

use crate::core::types::IVec3;

/// Convert a packed `0xRRGGBB` color to components
pub fn hex_to_rgb(hex: u32) -> (u8, u8, u8) {
    (
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}

/// Color band of a terrain column, chosen from its surface height
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shade {
    /// Lowland, dark green
    Deep,
    /// Hillside, light green
    Mid,
    /// Peaks, gray
    High,
}

impl Shade {
    /// Surface heights below this are `Deep`
    pub const MID_FLOOR: i32 = 3;
    /// Surface heights at or above this are `High`
    pub const HIGH_FLOOR: i32 = 7;

    /// Classify a column by its surface height `h` (not a voxel's own y)
    pub fn classify(surface_height: i32) -> Self {
        if surface_height < Self::MID_FLOOR {
            Shade::Deep
        } else if surface_height < Self::HIGH_FLOOR {
            Shade::Mid
        } else {
            Shade::High
        }
    }

    /// Packed `0xRRGGBB` color
    pub fn hex(self) -> u32 {
        match self {
            Shade::Deep => 0x008000,
            Shade::Mid => 0x32CD32,
            Shade::High => 0x808080,
        }
    }

    /// Color as 8-bit components
    pub fn rgb(self) -> (u8, u8, u8) {
        hex_to_rgb(self.hex())
    }
}

/// One unit cube of terrain.
///
/// Position and shade are fixed at creation. Presence can only go from
/// `true` to `false`, and only through the owning volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Voxel {
    /// Lattice position (cube centre)
    pub position: IVec3,
    /// Color band of the column this voxel belongs to
    pub shade: Shade,
    present: bool,
}

impl Voxel {
    pub(crate) fn new(position: IVec3, shade: Shade) -> Self {
        Self {
            position,
            shade,
            present: true,
        }
    }

    /// Whether the voxel is still part of the terrain
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Mark removed. Returns whether the flag changed.
    pub(crate) fn clear(&mut self) -> bool {
        std::mem::replace(&mut self.present, false)
    }
}
