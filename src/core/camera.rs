//! First-person camera

use crate::core::types::{Vec3, Quat};
use crate::math::Ray;

/// Camera with a world position and an orientation
pub struct Camera {
    /// World position (the eye)
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
}

impl Camera {
    /// Create a camera at `position` looking down -Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Forward projected onto the ground plane, `up × right`
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::Y.cross(self.right()).normalize_or_zero()
    }

    /// Set rotation from euler angles (yaw, pitch in radians)
    pub fn set_rotation_euler(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, 0.0);
    }

    /// Walk along the horizontal forward direction
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.horizontal_forward() * distance;
    }

    /// Strafe along the right direction
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Ray through the centre of the screen
    pub fn center_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
