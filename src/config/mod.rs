//! Controller configuration components.
//!
//! Per-concern configuration structs live in submodules and are aggregated by
//! [`ControllerConfig`], which is attached to every controlled character.

mod joystick;
mod jumping;
mod locomotion;

use bevy::prelude::*;

pub use joystick::{ActivationArea, JoystickConfig};
pub use jumping::JumpingConfig;
pub use locomotion::{LocomotionConfig, MAX_IN_AIR_SPEED_MULTIPLIER};

/// Collision membership bit that marks walkable ground by default.
///
/// Matches `GameLayer::Ground` of the Avian backend.
pub const DEFAULT_GROUND_LAYERS: u32 = 1 << 1;

/// Character controller configuration.
///
/// # Example
///
/// ```rust
/// use touch_character_controller::prelude::*;
///
/// let config = ControllerConfig::default()
///     .with_max_running_speed(8.0)
///     .with_in_air_speed_multiplier(9.0)
///     .with_jump_force(400.0);
///
/// assert_eq!(config.locomotion.max_running_speed, 8.0);
/// // Clamped to the supported range.
/// assert_eq!(config.locomotion.in_air_speed_multiplier, 5.0);
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerConfig {
    pub locomotion: LocomotionConfig,

    pub jumping: JumpingConfig,

    /// Collision membership bits treated as ground. Starting a contact with a
    /// body on one of these layers lands the character.
    pub ground_layers: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            jumping: JumpingConfig::default(),
            ground_layers: DEFAULT_GROUND_LAYERS,
        }
    }
}

impl ControllerConfig {
    pub fn with_max_running_speed(mut self, speed: f32) -> Self {
        self.locomotion.max_running_speed = speed;
        self
    }

    pub fn with_in_air_speed_multiplier(mut self, multiplier: f32) -> Self {
        self.locomotion.set_in_air_speed_multiplier(multiplier);
        self
    }

    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.locomotion.rotation_speed = speed;
        self
    }

    pub fn with_jump_force(mut self, force: f32) -> Self {
        self.jumping.jump_force = force;
        self
    }

    /// Builder: apply the jump force when the jump is requested.
    pub fn with_force_on_request(mut self, enabled: bool) -> Self {
        self.jumping.apply_force_on_request = enabled;
        self
    }

    pub fn with_ground_layers(mut self, layers: u32) -> Self {
        self.ground_layers = layers;
        self
    }

    /// Whether a body with collision `memberships` counts as ground.
    #[inline]
    pub fn is_ground(&self, memberships: u32) -> bool {
        self.ground_layers & memberships != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_speed_uses_multiplier() {
        let config = LocomotionConfig::default();
        assert!((config.speed(false) - 37.5).abs() < 1e-5);
    }

    #[test]
    fn air_speed_is_full_speed() {
        let config = LocomotionConfig::default();
        assert_eq!(config.speed(true), 50.0);
    }

    #[test]
    fn speed_clamps_directly_written_multiplier() {
        let mut config = LocomotionConfig::default();
        config.in_air_speed_multiplier = 12.0;
        assert_eq!(config.speed(false), 50.0 * MAX_IN_AIR_SPEED_MULTIPLIER);

        config.in_air_speed_multiplier = -3.0;
        assert_eq!(config.speed(false), 0.0);
    }

    #[test]
    fn in_air_multiplier_is_clamped() {
        let config = ControllerConfig::default().with_in_air_speed_multiplier(-1.0);
        assert_eq!(config.locomotion.in_air_speed_multiplier, 0.0);
    }

    #[test]
    fn ground_layer_mask() {
        let config = ControllerConfig::default();
        assert!(config.is_ground(DEFAULT_GROUND_LAYERS));
        assert!(config.is_ground(DEFAULT_GROUND_LAYERS | 1));
        assert!(!config.is_ground(1));

        let config = config.with_ground_layers(0b1100);
        assert!(config.is_ground(0b0100));
        assert!(!config.is_ground(DEFAULT_GROUND_LAYERS));
    }
}
