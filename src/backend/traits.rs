//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the character controller. The controller only needs to read
//! the body's velocity, push it upward for a jump and learn which bodies are
//! ground; everything else stays with the physics engine.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the character
/// controller. The backend's plugin is also responsible for writing
/// [`GroundContact`](crate::contact::GroundContact) messages when a character
/// starts touching ground.
///
/// See `Avian3dBackend` (feature `avian3d`) for a complete implementation.
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// The velocity component type used by this backend.
    type VelocityComponent: Component;

    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Read the linear velocity stored in the backend's velocity component.
    fn velocity_of(component: &Self::VelocityComponent) -> Vec3;

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Self::VelocityComponent>(entity)
            .map(Self::velocity_of)
            .unwrap_or(Vec3::ZERO)
    }

    /// Apply an impulse to an entity.
    ///
    /// Impulse is an instantaneous change in momentum (velocity).
    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3);

    /// Apply a force to an entity for a single physics step.
    fn apply_force(world: &mut World, entity: Entity, force: Vec3) {
        let dt = Self::get_fixed_timestep(world);
        Self::apply_impulse(world, entity, force * dt);
    }

    /// Get the mass of an entity. Returns 0 if unknown.
    fn get_mass(world: &World, entity: Entity) -> f32;

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.timestep().as_secs_f32())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 64.0)
    }

    /// Get the collision groups for an entity (memberships, filters).
    /// Returns None if the entity doesn't have collision groups.
    fn get_collision_groups(_world: &World, _entity: Entity) -> Option<(u32, u32)> {
        None
    }
}
