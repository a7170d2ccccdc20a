//! Configuration for joystick-driven ground and air movement.

use bevy::prelude::*;

/// Upper bound for [`LocomotionConfig::in_air_speed_multiplier`].
pub const MAX_IN_AIR_SPEED_MULTIPLIER: f32 = 5.0;

/// Configuration for joystick-driven movement.
#[derive(Reflect, Debug, Clone, Copy)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct LocomotionConfig {
    /// Running speed at full joystick deflection (units/second).
    pub max_running_speed: f32,

    /// Multiplier on `max_running_speed` while grounded (0.0-5.0).
    /// Airborne characters keep the full running speed.
    pub in_air_speed_multiplier: f32,

    /// How quickly the character turns toward the joystick direction.
    /// Used as the per-second interpolation rate.
    pub rotation_speed: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_running_speed: 50.0,
            in_air_speed_multiplier: 0.75,
            rotation_speed: 10.0,
        }
    }
}

impl LocomotionConfig {
    /// Set the speed multiplier, clamped to `[0, 5]`.
    pub fn set_in_air_speed_multiplier(&mut self, multiplier: f32) {
        self.in_air_speed_multiplier = multiplier.clamp(0.0, MAX_IN_AIR_SPEED_MULTIPLIER);
    }

    /// The multiplier as used for movement, clamped to `[0, 5]` even when the
    /// field was written directly or deserialized.
    #[inline]
    pub fn effective_multiplier(&self) -> f32 {
        self.in_air_speed_multiplier
            .clamp(0.0, MAX_IN_AIR_SPEED_MULTIPLIER)
    }

    /// Movement speed for the given airborne state.
    ///
    /// Full running speed in the air; the multiplier applies on the ground.
    pub fn speed(&self, airborne: bool) -> f32 {
        if airborne {
            self.max_running_speed
        } else {
            self.max_running_speed * self.effective_multiplier()
        }
    }
}
