//! Touch-driven 3D character controller for Bevy.
//!
//! A virtual joystick appears wherever the player puts a finger down on the
//! left side of the screen; the drag becomes a normalized movement direction.
//! Characters bound to the joystick run along that direction, turn smoothly
//! to face it and jump from an on-screen button. A three-phase jump tracker
//! (`None`, `GettingUp`, `FallingDown`) follows the rigid body's vertical
//! velocity and publishes animation parameters for the game's animation graph.
//!
//! Physics is delegated to a [`CharacterPhysicsBackend`]; Avian3D support
//! ships behind the default `avian3d` feature.
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use touch_character_controller::prelude::*;
//! # #[cfg(feature = "avian3d")]
//! # fn main() {
//! use avian3d::prelude::*;
//!
//! App::new()
//!     .add_plugins((DefaultPlugins, PhysicsPlugins::default()))
//!     .add_plugins(TouchControllerPlugin::<Avian3dBackend>::default())
//!     .add_systems(Startup, |mut commands: Commands| {
//!         let joystick = spawn_virtual_joystick(&mut commands, JoystickConfig::default());
//!         let player = commands
//!             .spawn((
//!                 CharacterLocomotion::new(),
//!                 JoystickBinding(joystick),
//!                 Collider::capsule(0.4, 1.0),
//!             ))
//!             .id();
//!         spawn_jump_button(&mut commands, player);
//!     })
//!     .run();
//! # }
//! # #[cfg(not(feature = "avian3d"))]
//! # fn main() {}
//! ```

use std::marker::PhantomData;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

pub mod airborne;
pub mod animation;
pub mod backend;
pub mod config;
pub mod contact;
pub mod input;
pub mod intent;
pub mod joystick;
pub mod locomotion;
pub mod ui;

#[cfg(feature = "avian3d")]
pub mod avian;

pub use backend::CharacterPhysicsBackend;

pub mod prelude {
    pub use crate::airborne::{JumpRequest, JumpState};
    pub use crate::animation::{AnimationEventKind, AnimatorParameters, CharacterAnimationEvent};
    pub use crate::backend::CharacterPhysicsBackend;
    pub use crate::config::{
        ActivationArea, ControllerConfig, JoystickConfig, JumpingConfig, LocomotionConfig,
    };
    pub use crate::contact::GroundContact;
    pub use crate::input::{JoystickPointer, JumpButton, PointerPhase};
    pub use crate::intent::{JoystickBinding, MovementIntent};
    pub use crate::joystick::{PointerId, VirtualJoystick};
    pub use crate::locomotion::CharacterLocomotion;
    pub use crate::ui::{
        JoystickBackground, JoystickTrigger, spawn_jump_button, spawn_virtual_joystick,
    };
    pub use crate::{TouchControllerPlugin, TouchControllerSet};

    #[cfg(feature = "avian3d")]
    pub use crate::avian::{Avian3dBackend, GameLayer};
}

/// Ordered phases of the controller, all in `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchControllerSet {
    /// Pointer sources write joystick pointer and jump messages.
    Input,
    /// Pointer messages drive virtual joysticks.
    Joystick,
    /// Joystick directions become movement intents.
    Intent,
    /// Animation events, movement and turning.
    Locomotion,
    /// Jump requests, jump force, jump phases and landing.
    Airborne,
    /// Joystick nodes follow joystick state.
    Presentation,
}

/// Main plugin for the touch character controller.
///
/// Generic over the physics backend, whose own plugin is added as well.
pub struct TouchControllerPlugin<B: CharacterPhysicsBackend> {
    _backend: PhantomData<B>,
}

impl<B: CharacterPhysicsBackend> Default for TouchControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: CharacterPhysicsBackend> Plugin for TouchControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<joystick::VirtualJoystick>()
            .register_type::<config::JoystickConfig>()
            .register_type::<config::ControllerConfig>()
            .register_type::<intent::MovementIntent>()
            .register_type::<intent::JoystickBinding>()
            .register_type::<locomotion::CharacterLocomotion>()
            .register_type::<animation::AnimatorParameters>()
            .register_type::<input::JumpButton>();

        app.add_message::<input::JoystickPointer>()
            .add_message::<airborne::JumpRequest>()
            .add_message::<animation::CharacterAnimationEvent>()
            .add_message::<contact::GroundContact>();

        app.configure_sets(
            Update,
            (
                TouchControllerSet::Input,
                TouchControllerSet::Joystick,
                TouchControllerSet::Intent,
                TouchControllerSet::Locomotion,
                TouchControllerSet::Airborne,
                TouchControllerSet::Presentation,
            )
                .chain(),
        );

        app.add_plugins(B::plugin());

        app.add_systems(
            Update,
            (
                input::touch_pointer_input.run_if(resource_exists::<Touches>),
                input::mouse_pointer_input.run_if(resource_exists::<ButtonInput<MouseButton>>),
            )
                .run_if(any_with_component::<PrimaryWindow>)
                .in_set(TouchControllerSet::Input),
        );

        app.add_systems(
            Update,
            input::drive_joysticks.in_set(TouchControllerSet::Joystick),
        );

        app.add_systems(
            Update,
            intent::feed_joystick_intent.in_set(TouchControllerSet::Intent),
        );

        app.add_systems(
            Update,
            (
                locomotion::apply_animation_events,
                locomotion::move_characters,
                locomotion::rotate_characters,
            )
                .chain()
                .in_set(TouchControllerSet::Locomotion),
        );

        app.add_systems(
            Update,
            (
                airborne::handle_jump_requests,
                airborne::apply_jump_force::<B>,
                airborne::track_jump_phase::<B>,
                airborne::handle_ground_contacts,
            )
                .chain()
                .in_set(TouchControllerSet::Airborne),
        );

        app.add_systems(
            Update,
            ui::sync_joystick_nodes.in_set(TouchControllerSet::Presentation),
        );
    }
}
