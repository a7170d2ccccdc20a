//! Avian3D physics backend implementation.
//!
//! This module provides the physics backend for Avian3D (`avian3d`).
//! Enable with the `avian3d` feature (on by default).

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::TouchControllerSet;
use crate::airborne::handle_ground_contacts;
use crate::backend::CharacterPhysicsBackend;
use crate::config::ControllerConfig;
use crate::contact::{ContactSide, GroundContact, resolve_ground_contact};
use crate::locomotion::CharacterLocomotion;

/// Collision layers used by controlled characters and their levels.
///
/// Put walkable geometry on [`GameLayer::Ground`]; landing on it ends a jump.
#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameLayer {
    #[default]
    Default,
    Ground,
    Character,
}

/// Avian3D physics backend for the character controller.
///
/// Velocity comes from [`LinearVelocity`]. Landing is detected from Avian's
/// [`CollisionStart`] messages, so characters get [`CollisionEventsEnabled`]
/// automatically.
pub struct Avian3dBackend;

impl CharacterPhysicsBackend for Avian3dBackend {
    type VelocityComponent = LinearVelocity;

    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn velocity_of(component: &LinearVelocity) -> Vec3 {
        component.0
    }

    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3) {
        // Impulse = mass * delta_v, so delta_v = impulse / mass
        let mass = Self::get_mass(world, entity);
        if mass <= 0.0 {
            debug!("{entity} has no usable mass, skipping impulse");
            return;
        }
        let delta_v = impulse / mass;
        if let Some(mut velocity) = world.get_mut::<LinearVelocity>(entity) {
            velocity.0 += delta_v;
        }
    }

    fn get_mass(world: &World, entity: Entity) -> f32 {
        let Some(computed_mass) = world.get::<ComputedMass>(entity) else {
            return 0.0;
        };
        let mass = computed_mass.value();
        if mass <= 0.0 || !mass.is_finite() {
            return 0.0;
        }
        mass
    }

    fn get_collision_groups(world: &World, entity: Entity) -> Option<(u32, u32)> {
        world
            .get::<CollisionLayers>(entity)
            .map(|layers| (layers.memberships.0, layers.filters.0))
    }
}

/// Plugin that sets up Avian3D-specific systems for the character controller.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<CharacterLocomotion, RigidBody>();
        app.register_required_components::<CharacterLocomotion, CollisionEventsEnabled>();
        app.register_required_components_with::<CharacterLocomotion, LockedAxes>(|| {
            LockedAxes::ROTATION_LOCKED
        });

        app.add_systems(
            Update,
            avian_ground_contacts
                .in_set(TouchControllerSet::Airborne)
                .before(handle_ground_contacts),
        );
    }
}

/// Report characters that start touching a collider on one of their ground
/// layers.
///
/// Ground masks are read from the character's body and memberships from the
/// other side's collider, so floors built from child colliders land too.
fn avian_ground_contacts(
    mut collisions: MessageReader<CollisionStart>,
    characters: Query<&ControllerConfig, With<CharacterLocomotion>>,
    layers: Query<&CollisionLayers>,
    mut contacts: MessageWriter<GroundContact>,
) {
    for collision in collisions.read() {
        let side1 = ContactSide::new(
            collision.body1.unwrap_or(collision.collider1),
            collision.collider1,
        );
        let side2 = ContactSide::new(
            collision.body2.unwrap_or(collision.collider2),
            collision.collider2,
        );

        let contact = resolve_ground_contact(
            side1,
            side2,
            |entity| characters.get(entity).ok().map(|config| config.ground_layers),
            |entity| {
                let memberships = layers
                    .get(entity)
                    .map(|layers| layers.memberships)
                    .unwrap_or(LayerMask::DEFAULT);
                Some(memberships.0)
            },
        );

        if let Some(contact) = contact {
            contacts.write(contact);
        }
    }
}
