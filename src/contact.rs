//! Ground contact messages.
//!
//! Physics backends report the start of a collision between a controlled
//! character and a ground body as a [`GroundContact`]. The airborne systems
//! use it to land the character.

use bevy::prelude::*;

/// Message: `character` started touching `ground`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundContact {
    /// The controlled character.
    pub character: Entity,
    /// The body the character landed on.
    pub ground: Entity,
}

impl GroundContact {
    pub fn new(character: Entity, ground: Entity) -> Self {
        Self { character, ground }
    }
}

/// One side of a collision: the collider that touched and the body it belongs
/// to. For a collider attached directly to its body both are the same entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSide {
    pub body: Entity,
    pub collider: Entity,
}

impl ContactSide {
    pub fn new(body: Entity, collider: Entity) -> Self {
        Self { body, collider }
    }

    /// A collider that is its own body.
    pub fn single(entity: Entity) -> Self {
        Self::new(entity, entity)
    }
}

/// Decide whether a collision between `a` and `b` lands a character.
///
/// `ground_layers_of` is asked about bodies and returns the ground mask of a
/// controlled character. `memberships_of` is asked about colliders and returns
/// their collision membership bits. Either side may be the character.
pub fn resolve_ground_contact(
    a: ContactSide,
    b: ContactSide,
    ground_layers_of: impl Fn(Entity) -> Option<u32>,
    memberships_of: impl Fn(Entity) -> Option<u32>,
) -> Option<GroundContact> {
    [(a, b), (b, a)].into_iter().find_map(|(character, other)| {
        let ground_layers = ground_layers_of(character.body)?;
        let memberships = memberships_of(other.collider)?;
        (ground_layers & memberships != 0).then(|| GroundContact::new(character.body, other.body))
    })
}
