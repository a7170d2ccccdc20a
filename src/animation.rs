//! Animation parameters and animation events.
//!
//! The controller never blends animations itself. It publishes named float
//! parameters and one-shot triggers on [`AnimatorParameters`]; a game's
//! animation graph reads them to drive its `AnimationPlayer`. In the other
//! direction, animation clips report key frames back to the controller as
//! [`CharacterAnimationEvent`] messages.

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;

/// Names of the parameters and triggers written by the controller.
pub mod params {
    /// Float in `[0, 1]`: joystick deflection while movement is enabled.
    pub const MOVEMENT_SPEED_NORMALIZED: &str = "movementSpeedNormalized";
    /// Float: `1.0` while rising, `-1.0` while falling.
    pub const AIR_POSITION: &str = "airPosition";
    /// Trigger: the jump button was pressed.
    pub const JUMP: &str = "jump";
    /// Trigger: the character landed on ground.
    pub const GROUNDED: &str = "grounded";
}

/// Parameter store read by a character's animation graph.
///
/// Floats keep their last value. Triggers stay set until consumed.
///
/// # Example
///
/// ```rust
/// use touch_character_controller::prelude::*;
/// use touch_character_controller::animation::params;
///
/// let mut animator = AnimatorParameters::default();
/// animator.set_trigger(params::JUMP);
/// assert!(animator.take_trigger(params::JUMP));
/// assert!(!animator.take_trigger(params::JUMP));
///
/// animator.set_float(params::AIR_POSITION, -1.0);
/// assert_eq!(animator.float(params::AIR_POSITION), -1.0);
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct AnimatorParameters {
    floats: HashMap<String, f32>,
    triggers: HashSet<String>,
}

impl AnimatorParameters {
    pub fn set_float(&mut self, name: &str, value: f32) {
        match self.floats.get_mut(name) {
            Some(current) => *current = value,
            None => {
                self.floats.insert(name.to_owned(), value);
            }
        }
    }

    /// Value of a float parameter. Unset parameters read as `0.0`.
    pub fn float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    pub fn set_trigger(&mut self, name: &str) {
        if !self.triggers.contains(name) {
            self.triggers.insert(name.to_owned());
        }
    }

    pub fn reset_trigger(&mut self, name: &str) {
        self.triggers.remove(name);
    }

    pub fn is_trigger_set(&self, name: &str) -> bool {
        self.triggers.contains(name)
    }

    /// Consume a trigger. Returns whether it was set.
    pub fn take_trigger(&mut self, name: &str) -> bool {
        self.triggers.remove(name)
    }
}

/// Key frames reported by a character's animation clips.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEventKind {
    /// The jump animation reached take-off: push the body upward.
    AddJumpForce,
    /// The current animation does not allow walking (landing, attacks).
    DisableMovement,
    /// Walking is allowed again.
    EnableMovement,
}

/// Message: an animation key frame fired for `character`.
#[derive(Message, Debug, Clone, Copy)]
pub struct CharacterAnimationEvent {
    pub character: Entity,
    pub kind: AnimationEventKind,
}

impl CharacterAnimationEvent {
    pub fn new(character: Entity, kind: AnimationEventKind) -> Self {
        Self { character, kind }
    }
}
