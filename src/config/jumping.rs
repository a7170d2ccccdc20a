//! Configuration for jump mechanics.

use bevy::prelude::*;

/// Configuration for jump mechanics.
#[derive(Reflect, Debug, Clone, Copy)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpingConfig {
    /// Upward force applied for one physics step when the jump animation
    /// reaches its take-off frame.
    pub jump_force: f32,

    /// Queue the jump force as soon as the jump is requested instead of
    /// waiting for the animation's take-off event. Useful for characters
    /// without a jump animation.
    pub apply_force_on_request: bool,
}

impl Default for JumpingConfig {
    fn default() -> Self {
        Self {
            jump_force: 250.0,
            apply_force_on_request: false,
        }
    }
}
