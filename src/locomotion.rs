//! Joystick-driven locomotion.
//!
//! Characters translate across the ground plane along their
//! [`MovementIntent`] and turn smoothly to face it. Animation events can
//! suspend translation (for example during a landing animation); turning
//! continues regardless.

use bevy::prelude::*;

use crate::airborne::JumpState;
use crate::animation::{AnimationEventKind, AnimatorParameters, CharacterAnimationEvent, params};
use crate::config::ControllerConfig;
use crate::intent::MovementIntent;

/// Per-character locomotion state.
///
/// This is the marker that puts an entity under the controller's systems.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
#[require(ControllerConfig, MovementIntent, AnimatorParameters, Transform)]
pub struct CharacterLocomotion {
    /// Current phase of a jump.
    pub jump_state: JumpState,
    /// Whether joystick input translates the character.
    pub can_move: bool,
    /// Whether vertical velocity is being watched for jump phases.
    /// Set by a jump request, cleared on landing.
    pub tracking_jump_velocity: bool,
    /// The jump force is due on the next airborne pass.
    pub pending_jump_force: bool,
}

impl Default for CharacterLocomotion {
    fn default() -> Self {
        Self {
            jump_state: JumpState::None,
            can_move: true,
            tracking_jump_velocity: false,
            pending_jump_force: false,
        }
    }
}

impl CharacterLocomotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the character is in the air as far as the jump tracker knows.
    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.jump_state != JumpState::None
    }

    pub fn disable_movement(&mut self) {
        self.can_move = false;
    }

    pub fn enable_movement(&mut self) {
        self.can_move = true;
    }
}

/// Rotation that makes a character's forward (`-Z`) face `direction` on the
/// ground plane. Only the horizontal part of `direction` matters.
pub fn facing_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}

/// One step of the smooth turn toward `target`.
pub fn smooth_rotation(current: Quat, target: Quat, rotation_speed: f32, dt: f32) -> Quat {
    let t = (dt * rotation_speed).clamp(0.0, 1.0);
    current.lerp(target, t)
}

/// Apply animation key frames to the characters they were fired for.
pub fn apply_animation_events(
    mut events: MessageReader<CharacterAnimationEvent>,
    mut characters: Query<&mut CharacterLocomotion>,
) {
    for event in events.read() {
        let Ok(mut locomotion) = characters.get_mut(event.character) else {
            debug!(
                "Animation event {:?} for {} which is not a controlled character",
                event.kind, event.character
            );
            continue;
        };

        match event.kind {
            AnimationEventKind::AddJumpForce => locomotion.pending_jump_force = true,
            AnimationEventKind::DisableMovement => locomotion.disable_movement(),
            AnimationEventKind::EnableMovement => locomotion.enable_movement(),
        }
    }
}

/// Translate characters along their intent and publish the speed parameter.
pub fn move_characters(
    time: Res<Time>,
    mut characters: Query<(
        &ControllerConfig,
        &CharacterLocomotion,
        &MovementIntent,
        &mut Transform,
        &mut AnimatorParameters,
    )>,
) {
    let dt = time.delta_secs();

    for (config, locomotion, intent, mut transform, mut animator) in &mut characters {
        if !locomotion.can_move {
            continue;
        }

        animator.set_float(params::MOVEMENT_SPEED_NORMALIZED, intent.speed_normalized());

        if intent.is_moving() {
            let speed = config.locomotion.speed(locomotion.is_airborne());
            transform.translation += intent.world_direction() * (speed * dt);
        }
    }
}

/// Turn characters toward their movement direction.
pub fn rotate_characters(
    time: Res<Time>,
    mut characters: Query<(&ControllerConfig, &MovementIntent, &mut Transform), With<CharacterLocomotion>>,
) {
    let dt = time.delta_secs();

    for (config, intent, mut transform) in &mut characters {
        if !intent.is_moving() {
            continue;
        }

        let target = facing_rotation(intent.world_direction());
        transform.rotation =
            smooth_rotation(transform.rotation, target, config.locomotion.rotation_speed, dt);
    }
}
