//! Movement intent components.
//!
//! Intents represent the desired movement direction from the virtual joystick
//! (or any other source, such as AI or a gamepad). The locomotion systems read
//! these intents and move the character.

use bevy::prelude::*;

use crate::joystick::VirtualJoystick;

/// Desired planar movement for a character.
///
/// `direction.x` is right, `direction.y` is forward. The magnitude is the
/// requested fraction of the running speed and never exceeds 1.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use touch_character_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_direction(Vec2::new(3.0, 4.0));
/// assert!((intent.speed_normalized() - 1.0).abs() < 1e-5);
///
/// intent.clear();
/// assert!(!intent.is_moving());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct MovementIntent {
    direction: Vec2,
}

impl MovementIntent {
    /// Create a new empty movement intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the direction, clamping its length to 1.
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.clamp_length_max(1.0);
    }

    /// Clear the movement intent.
    pub fn clear(&mut self) {
        self.direction = Vec2::ZERO;
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Length of the direction, in `[0, 1]`.
    #[inline]
    pub fn speed_normalized(&self) -> f32 {
        self.direction.length()
    }

    /// Whether there is any movement input at all.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.direction.length_squared() > 0.0
    }

    /// World-space direction on the ground plane.
    ///
    /// Forward input maps to `-Z`, Bevy's forward axis.
    pub fn world_direction(&self) -> Vec3 {
        Vec3::new(self.direction.x, 0.0, -self.direction.y)
    }
}

/// Binds a character to the virtual joystick entity that drives it.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
#[require(MovementIntent)]
pub struct JoystickBinding(pub Entity);

/// Copy each bound joystick's direction into its character's intent.
pub fn feed_joystick_intent(
    joysticks: Query<&VirtualJoystick>,
    mut characters: Query<(Entity, &JoystickBinding, &mut MovementIntent)>,
) {
    for (entity, binding, mut intent) in &mut characters {
        let Ok(joystick) = joysticks.get(binding.0) else {
            trace!("{entity} is bound to missing joystick {}", binding.0);
            intent.clear();
            continue;
        };

        let direction = joystick.input_direction();
        if intent.direction() != direction {
            intent.set_direction(direction);
        }
    }
}
