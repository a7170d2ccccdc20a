//! Virtual joystick state and touch-to-direction mapping.
//!
//! The joystick appears where the pointer goes down: the background is placed
//! under the finger and the trigger (knob) follows the finger, clamped to
//! [`JoystickConfig::allowable_distance`]. The resulting input direction has a
//! magnitude in `[0, 1]`.
//!
//! Positions are in logical window coordinates (origin top-left, y down).
//! The input direction uses y up, so dragging toward the top of the screen
//! yields a positive `y`.

use bevy::prelude::*;

use crate::config::JoystickConfig;

/// Identifies the pointer that owns a joystick.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerId {
    /// The primary mouse button.
    Mouse,
    /// A touch, identified by its Bevy touch id.
    Touch(u64),
}

/// Runtime state of a virtual joystick.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use touch_character_controller::prelude::*;
///
/// let config = JoystickConfig::default();
/// let mut joystick = VirtualJoystick::default();
///
/// joystick.press(PointerId::Mouse, Vec2::new(200.0, 400.0), &config);
/// // Drag 50 px straight up on screen.
/// joystick.drag(Vec2::new(200.0, 350.0), &config);
/// assert!((joystick.input_direction() - Vec2::new(0.0, 0.5)).length() < 1e-5);
///
/// joystick.release();
/// assert_eq!(joystick.input_direction(), Vec2::ZERO);
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
#[require(JoystickConfig)]
pub struct VirtualJoystick {
    /// Window position of the background center.
    background_position: Vec2,
    /// Window position of the trigger center.
    trigger_position: Vec2,
    /// Whether the background is shown (a pointer is down).
    active: bool,
    /// Normalized direction, y up, magnitude in `[0, 1]`.
    input_direction: Vec2,
    /// Pointer currently driving the joystick.
    pointer: Option<PointerId>,
}

impl VirtualJoystick {
    /// Pointer goes down: show the background under it, then track it.
    pub fn press(&mut self, pointer: PointerId, position: Vec2, config: &JoystickConfig) {
        self.active = true;
        self.pointer = Some(pointer);
        self.background_position = position;
        self.drag(position, config);
    }

    /// Pointer moves: place the trigger and recompute the input direction.
    pub fn drag(&mut self, position: Vec2, config: &JoystickConfig) {
        let offset = position - self.background_position;
        let magnitude = offset.length();
        let direction = offset.normalize_or_zero();

        self.trigger_position =
            self.background_position + direction * clamp_magnitude(magnitude, config);

        let direction = direction * normalized_magnitude(magnitude, config);
        // Window y grows downward; input y grows upward.
        self.input_direction = Vec2::new(direction.x, -direction.y);
    }

    /// Pointer goes up: hide the joystick and zero the input.
    pub fn release(&mut self) {
        self.active = false;
        self.pointer = None;
        self.input_direction = Vec2::ZERO;
    }

    /// Current input direction (y up), magnitude in `[0, 1]`.
    #[inline]
    pub fn input_direction(&self) -> Vec2 {
        self.input_direction
    }

    #[inline]
    pub fn background_position(&self) -> Vec2 {
        self.background_position
    }

    #[inline]
    pub fn trigger_position(&self) -> Vec2 {
        self.trigger_position
    }

    /// Whether a pointer currently holds the joystick.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The pointer holding the joystick, if any.
    #[inline]
    pub fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Whether `pointer` is the one driving this joystick.
    pub fn is_held_by(&self, pointer: PointerId) -> bool {
        self.pointer == Some(pointer)
    }
}

/// Distance the trigger may travel from the background center.
fn clamp_magnitude(magnitude: f32, config: &JoystickConfig) -> f32 {
    if magnitude > config.allowable_distance {
        config.allowable_distance
    } else {
        magnitude
    }
}

/// Input strength for a drag of `magnitude` pixels.
fn normalized_magnitude(magnitude: f32, config: &JoystickConfig) -> f32 {
    if magnitude > config.allowable_distance {
        1.0
    } else if config.allowable_distance > 0.0 {
        magnitude / config.allowable_distance
    } else {
        0.0
    }
}
