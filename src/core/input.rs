//! Input state tracking
//!
//! Platform callbacks (key down/up, pointer lock changes, clicks, raw mouse
//! motion) are translated into [`InputEvent`]s and folded into an
//! [`InputState`] that the frame update reads synchronously.

use std::collections::HashSet;

/// Keys the first-person controls respond to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.code` string. Unknown codes map to `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "KeyW" => KeyCode::KeyW,
            "KeyA" => KeyCode::KeyA,
            "KeyS" => KeyCode::KeyS,
            "KeyD" => KeyCode::KeyD,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "Space" => KeyCode::Space,
            _ => return None,
        })
    }
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A single platform input notification
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Raw pointer movement in device counts
    MouseMotion { dx: f32, dy: f32 },
    Click(MouseButton),
    /// Pointer lock acquired (`true`) or released (`false`)
    PointerLock(bool),
}

/// Tracks keyboard and mouse input state
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Mouse movement accumulated since the last `end_frame`
    mouse_delta: (f32, f32),
    /// Primary-button clicks since the last `end_frame`
    clicks: u32,
    /// Whether the pointer is locked to the view
    pointer_locked: bool,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            clicks: 0,
            pointer_locked: false,
        }
    }

    /// Fold one platform event into the state
    pub fn process_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                if !self.keys_pressed.contains(&key) {
                    self.keys_just_pressed.insert(key);
                }
                self.keys_pressed.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.keys_pressed.remove(&key);
            }
            InputEvent::MouseMotion { dx, dy } => {
                if self.pointer_locked {
                    self.mouse_delta.0 += dx;
                    self.mouse_delta.1 += dy;
                }
            }
            InputEvent::Click(MouseButton::Left) => {
                self.clicks += 1;
            }
            InputEvent::Click(_) => {}
            InputEvent::PointerLock(locked) => self.set_pointer_locked(locked),
        }
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.clicks = 0;
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// True if any of `keys` is held
    pub fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.keys_pressed.contains(k))
    }

    /// Check if key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Get mouse delta since last frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Primary clicks received this frame
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Set pointer lock state
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
        if !locked {
            // Keys held while unlocking never see their keyup
            self.keys_pressed.clear();
        }
        self.mouse_delta = (0.0, 0.0);
    }

    /// Check if the pointer is locked
    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
