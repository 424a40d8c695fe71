//! First-person walking controller
//!
//! Euler-integrated avatar physics with gravity, horizontal damping and a
//! single jump impulse. Ground contact is resolved against a column height
//! lookup sampled at the rounded horizontal position every step.

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::input::{InputState, KeyCode};
use crate::core::types::Vec3;

const FORWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const BACKWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];

/// Maximum |pitch|, straight up or down
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2;

/// Tunable movement constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerParams {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Horizontal velocity decay rate (1/s)
    pub damping: f32,
    /// Horizontal acceleration while a movement key is held (units/s²)
    pub acceleration: f32,
    /// Upward velocity added by a jump (units/s)
    pub jump_speed: f32,
    /// Eye height above the ground surface
    pub eye_height: f32,
    /// Radians of rotation per mouse count
    pub sensitivity: f32,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            gravity: 30.0,
            damping: 5.0,
            acceleration: 40.0,
            jump_speed: 15.0,
            eye_height: 1.8,
            sensitivity: 0.002,
        }
    }
}

/// Round half toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// FPS-style walking controller with WASD movement, mouse look and jumping
pub struct FirstPersonController {
    pub params: ControllerParams,
    /// Velocity in controller space: `x` is strafe, `z` is walk, `y` is world up
    velocity: Vec3,
    yaw: f32,
    pitch: f32,
    can_jump: bool,
}

impl FirstPersonController {
    /// Create new controller
    pub fn new(params: ControllerParams) -> Self {
        Self {
            params,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            can_jump: false,
        }
    }

    /// Advance one simulation step.
    ///
    /// `ground` maps a rounded `(x, z)` column to its walkable surface height.
    /// Returns `true` when the avatar ended the step standing on the ground.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        input: &InputState,
        dt: f32,
        ground: impl Fn(i32, i32) -> i32,
    ) -> bool {
        let p = &self.params;

        // Mouse look
        let (dx, dy) = input.mouse_delta();
        self.yaw -= dx * p.sensitivity;
        self.pitch = (self.pitch - dy * p.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        camera.set_rotation_euler(self.yaw, self.pitch);

        if input.is_key_just_pressed(KeyCode::Space) {
            if self.can_jump {
                self.velocity.y += p.jump_speed;
            }
            self.can_jump = false;
        }

        self.velocity.y -= p.gravity * dt;
        self.velocity.x -= self.velocity.x * p.damping * dt;
        self.velocity.z -= self.velocity.z * p.damping * dt;

        let forward = input.any_pressed(&FORWARD_KEYS);
        let backward = input.any_pressed(&BACKWARD_KEYS);
        let left = input.any_pressed(&LEFT_KEYS);
        let right = input.any_pressed(&RIGHT_KEYS);

        let direction = Vec3::new(
            right as i32 as f32 - left as i32 as f32,
            0.0,
            forward as i32 as f32 - backward as i32 as f32,
        )
        .normalize_or_zero();

        if forward || backward {
            self.velocity.z -= direction.z * p.acceleration * dt;
        }
        if left || right {
            self.velocity.x -= direction.x * p.acceleration * dt;
        }

        camera.move_right(-self.velocity.x * dt);
        camera.move_forward(-self.velocity.z * dt);
        camera.position.y += self.velocity.y * dt;

        let floor = ground(
            round_half_up(camera.position.x),
            round_half_up(camera.position.z),
        ) as f32
            + p.eye_height;

        if camera.position.y < floor {
            self.velocity.y = 0.0;
            camera.position.y = floor;
            self.can_jump = true;
        }

        self.can_jump
    }

    /// Get current yaw
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current velocity (`x` strafe, `y` vertical, `z` walk)
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Whether a jump would be accepted now
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self::new(ControllerParams::default())
    }
}
