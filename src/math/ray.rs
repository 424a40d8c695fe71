//! Rays cast into the voxel lattice

use crate::core::types::{IVec3, Vec3};
use super::aabb::Aabb;

/// Half-line from an eye point. `direction` is expected to be unit length,
/// so entry parameters are world distances.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Per-axis reciprocal of `direction`, infinite on axes the ray never crosses
    inv_direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    /// Point `distance` along the ray
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Distance at which the ray enters `aabb`, `0.0` when it starts inside.
    /// `None` when the box is missed or lies behind the origin.
    pub fn entry(&self, aabb: &Aabb) -> Option<f32> {
        self.slab_entry(aabb.min, aabb.max)
    }

    /// Entry distance into the unit cube centred on lattice point `cell`
    pub fn voxel_entry(&self, cell: IVec3) -> Option<f32> {
        let centre = cell.as_vec3();
        self.slab_entry(centre - 0.5, centre + 0.5)
    }

    fn slab_entry(&self, lo: Vec3, hi: Vec3) -> Option<f32> {
        let a = (lo - self.origin) * self.inv_direction;
        let b = (hi - self.origin) * self.inv_direction;

        let enter = a.min(b).max_element();
        let exit = a.max(b).min_element();

        (enter <= exit && exit >= 0.0).then(|| enter.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_from(x: f32, y: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, y, z), -Vec3::Y)
    }

    #[test]
    fn test_point_at() {
        let ray = down_from(1.0, 10.0, 2.0);
        assert_eq!(ray.point_at(4.0), Vec3::new(1.0, 6.0, 2.0));
    }

    #[test]
    fn test_voxel_entry_from_above() {
        let ray = down_from(3.2, 10.0, -0.9);
        let d = ray.voxel_entry(IVec3::new(3, 4, -1)).unwrap();
        assert!((d - 5.5).abs() < 1e-5);
        assert!((ray.point_at(d).y - 4.5).abs() < 1e-5);

        // Neighbouring column
        assert!(ray.voxel_entry(IVec3::new(4, 4, -1)).is_none());
    }

    #[test]
    fn test_voxel_behind_origin() {
        let ray = down_from(0.1, 2.0, 0.1);
        assert!(ray.voxel_entry(IVec3::new(0, 5, 0)).is_none());
        assert!(ray.voxel_entry(IVec3::new(0, -1, 0)).is_some());
    }

    #[test]
    fn test_entry_from_inside() {
        let ray = Ray::new(Vec3::new(0.2, 0.1, -0.3), Vec3::new(1.0, 1.0, 0.0).normalize());
        assert_eq!(ray.voxel_entry(IVec3::ZERO), Some(0.0));
    }

    #[test]
    fn test_entry_diagonal_into_region() {
        let region = Aabb::new(Vec3::splat(-2.5), Vec3::splat(1.5));
        let ray = Ray::new(Vec3::new(-6.0, 0.0, 0.0), Vec3::X);
        let d = ray.entry(&region).unwrap();
        assert!((d - 3.5).abs() < 1e-5);

        let away = Ray::new(Vec3::new(-6.0, 0.0, 0.0), -Vec3::X);
        assert!(away.entry(&region).is_none());
    }
}
