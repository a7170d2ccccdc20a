//! Jump requests and the three-phase jump tracker.
//!
//! A jump starts with a [`JumpRequest`] (the jump button). The request only
//! fires the `jump` animation trigger and starts watching vertical velocity;
//! the upward force itself is applied when the jump animation reports
//! take-off through [`AnimationEventKind::AddJumpForce`]. While watching, the
//! sign of the vertical velocity selects the [`JumpState`]. A
//! [`GroundContact`] ends the jump.
//!
//! [`AnimationEventKind::AddJumpForce`]: crate::animation::AnimationEventKind::AddJumpForce

use bevy::prelude::*;

use crate::animation::{AnimatorParameters, params};
use crate::backend::CharacterPhysicsBackend;
use crate::config::ControllerConfig;
use crate::contact::GroundContact;
use crate::locomotion::CharacterLocomotion;

/// Phase of a jump.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum JumpState {
    /// On the ground, or not jumping.
    #[default]
    None,
    /// Rising.
    GettingUp,
    /// Descending.
    FallingDown,
}

impl JumpState {
    /// The state to switch to for vertical velocity `vertical_velocity`,
    /// or `None` when the state should not change.
    pub fn transition(self, vertical_velocity: f32) -> Option<JumpState> {
        if vertical_velocity > 0.0 && self != JumpState::GettingUp {
            Some(JumpState::GettingUp)
        } else if vertical_velocity < 0.0 && self != JumpState::FallingDown {
            Some(JumpState::FallingDown)
        } else {
            None
        }
    }

    /// Value of the `airPosition` animation parameter for this state.
    pub fn air_position(self) -> f32 {
        match self {
            JumpState::None => 0.0,
            JumpState::GettingUp => 1.0,
            JumpState::FallingDown => -1.0,
        }
    }
}

/// Message: the player asked `character` to jump.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpRequest {
    pub character: Entity,
}

/// Start jumps: fire the `jump` trigger and begin watching vertical velocity.
pub fn handle_jump_requests(
    mut requests: MessageReader<JumpRequest>,
    mut characters: Query<(&ControllerConfig, &mut CharacterLocomotion, &mut AnimatorParameters)>,
) {
    for request in requests.read() {
        let Ok((config, mut locomotion, mut animator)) = characters.get_mut(request.character)
        else {
            debug!("Jump requested for {} which is not a controlled character", request.character);
            continue;
        };

        animator.set_trigger(params::JUMP);
        locomotion.tracking_jump_velocity = true;
        if config.jumping.apply_force_on_request {
            locomotion.pending_jump_force = true;
        }
        trace!("{} jump requested", request.character);
    }
}

/// Push characters with a pending jump force upward for one physics step.
pub fn apply_jump_force<B: CharacterPhysicsBackend>(world: &mut World) {
    let mut query = world.query::<(Entity, &mut CharacterLocomotion, &ControllerConfig)>();
    let jumps: Vec<(Entity, f32)> = query
        .iter_mut(world)
        .filter_map(|(entity, mut locomotion, config)| {
            if !locomotion.pending_jump_force {
                return None;
            }
            locomotion.pending_jump_force = false;
            Some((entity, config.jumping.jump_force))
        })
        .collect();

    for (entity, jump_force) in jumps {
        debug!("{entity} takes off with force {jump_force}");
        B::apply_force(world, entity, Vec3::new(0.0, jump_force, 0.0));
    }
}

/// Update jump phases from the sign of vertical velocity.
pub fn track_jump_phase<B: CharacterPhysicsBackend>(
    mut characters: Query<(
        &mut CharacterLocomotion,
        &mut AnimatorParameters,
        &B::VelocityComponent,
    )>,
) {
    for (mut locomotion, mut animator, velocity) in &mut characters {
        if !locomotion.tracking_jump_velocity {
            continue;
        }

        let vertical_velocity = B::velocity_of(velocity).y;
        if let Some(next) = locomotion.jump_state.transition(vertical_velocity) {
            locomotion.jump_state = next;
            animator.set_float(params::AIR_POSITION, next.air_position());
        }
    }
}

/// Land characters that started touching ground.
pub fn handle_ground_contacts(
    mut contacts: MessageReader<GroundContact>,
    mut characters: Query<(&mut CharacterLocomotion, &mut AnimatorParameters)>,
) {
    for contact in contacts.read() {
        let Ok((mut locomotion, mut animator)) = characters.get_mut(contact.character) else {
            debug!(
                "Ground contact for {} which is not a controlled character",
                contact.character
            );
            continue;
        };

        animator.set_trigger(params::GROUNDED);
        locomotion.tracking_jump_velocity = false;
        locomotion.jump_state = JumpState::None;
        trace!("{} grounded on {}", contact.character, contact.ground);
    }
}
