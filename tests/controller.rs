//! Integration tests for the controller plugin with a scripted physics backend.
//!
//! The backend here stores velocity in a plain component so tests can dictate
//! exactly what the "physics" reports. Each test produces PROOF through
//! explicit position, state and animation parameter checks.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use touch_character_controller::animation::params;
use touch_character_controller::prelude::*;

const FRAME: Duration = Duration::from_millis(16);
const DT: f32 = 0.016;
const BODY_MASS: f32 = 2.0;

// ==================== Scripted Backend ====================

#[derive(Component, Default, Debug, Clone, Copy)]
struct ScriptedVelocity(Vec3);

struct ScriptedBackend;

struct ScriptedBackendPlugin;

impl Plugin for ScriptedBackendPlugin {
    fn build(&self, app: &mut App) {
        app.register_required_components::<CharacterLocomotion, ScriptedVelocity>();
    }
}

impl CharacterPhysicsBackend for ScriptedBackend {
    type VelocityComponent = ScriptedVelocity;

    fn plugin() -> impl Plugin {
        ScriptedBackendPlugin
    }

    fn velocity_of(component: &ScriptedVelocity) -> Vec3 {
        component.0
    }

    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec3) {
        let mass = Self::get_mass(world, entity);
        if let Some(mut velocity) = world.get_mut::<ScriptedVelocity>(entity) {
            velocity.0 += impulse / mass;
        }
    }

    fn get_mass(_world: &World, _entity: Entity) -> f32 {
        BODY_MASS
    }
}

// ==================== Helpers ====================

fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(TouchControllerPlugin::<ScriptedBackend>::default());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.finish();
    app.cleanup();
    // The first frame only starts the clock.
    app.update();
    app
}

fn spawn_joystick(app: &mut App) -> Entity {
    let world = app.world_mut();
    let joystick = spawn_virtual_joystick(&mut world.commands(), JoystickConfig::default());
    world.flush();
    joystick
}

fn spawn_character(app: &mut App, joystick: Entity) -> Entity {
    app.world_mut()
        .spawn((
            CharacterLocomotion::new(),
            JoystickBinding(joystick),
            Transform::default(),
        ))
        .id()
}

fn pointer(app: &mut App, phase: PointerPhase, position: Vec2) {
    app.world_mut().write_message(JoystickPointer {
        pointer: PointerId::Touch(7),
        phase,
        position,
        window_size: Vec2::new(1280.0, 720.0),
    });
}

/// Put a finger down and drag it by `offset` (window pixels, y down).
fn hold_joystick(app: &mut App, offset: Vec2) {
    let origin = Vec2::new(200.0, 500.0);
    pointer(app, PointerPhase::Down, origin);
    pointer(app, PointerPhase::Move, origin + offset);
}

fn set_velocity(app: &mut App, entity: Entity, velocity: Vec3) {
    app.world_mut().get_mut::<ScriptedVelocity>(entity).unwrap().0 = velocity;
}

fn locomotion(app: &App, entity: Entity) -> CharacterLocomotion {
    *app.world().get::<CharacterLocomotion>(entity).unwrap()
}

fn animator(app: &App, entity: Entity) -> &AnimatorParameters {
    app.world().get::<AnimatorParameters>(entity).unwrap()
}

fn transform(app: &App, entity: Entity) -> Transform {
    *app.world().get::<Transform>(entity).unwrap()
}

fn animation_event(app: &mut App, character: Entity, kind: AnimationEventKind) {
    app.world_mut()
        .write_message(CharacterAnimationEvent::new(character, kind));
}

// ==================== Movement Tests ====================

mod movement {
    use super::*;

    #[test]
    fn joystick_up_runs_forward() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);

        hold_joystick(&mut app, Vec2::new(0.0, -150.0));
        app.update();

        let position = transform(&app, character).translation;
        println!("PROOF: position after one frame = {position:?}");

        // Full deflection on the ground: 50 * 0.75 units/s along -Z.
        assert!((position.z + 37.5 * DT).abs() < 1e-3);
        assert!(position.x.abs() < 1e-5);
        assert_eq!(position.y, 0.0);
        assert!((animator(&app, character).float(params::MOVEMENT_SPEED_NORMALIZED) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn half_deflection_runs_at_half_speed() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);

        hold_joystick(&mut app, Vec2::new(50.0, 0.0));
        app.update();

        let position = transform(&app, character).translation;
        assert!((position.x - 18.75 * DT).abs() < 1e-3);
        assert!((animator(&app, character).float(params::MOVEMENT_SPEED_NORMALIZED) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn airborne_characters_run_at_full_speed() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);
        app.world_mut()
            .get_mut::<CharacterLocomotion>(character)
            .unwrap()
            .jump_state = JumpState::GettingUp;

        hold_joystick(&mut app, Vec2::new(150.0, 0.0));
        app.update();

        let position = transform(&app, character).translation;
        println!("PROOF: airborne position after one frame = {position:?}");
        assert!((position.x - 50.0 * DT).abs() < 1e-3);
    }

    #[test]
    fn releasing_the_joystick_stops_the_character() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);

        hold_joystick(&mut app, Vec2::new(0.0, -150.0));
        app.update();
        pointer(&mut app, PointerPhase::Up, Vec2::new(200.0, 350.0));
        app.update();

        let stopped_at = transform(&app, character).translation;
        app.update();
        app.update();

        assert_eq!(transform(&app, character).translation, stopped_at);
        assert_eq!(animator(&app, character).float(params::MOVEMENT_SPEED_NORMALIZED), 0.0);
    }

    #[test]
    fn character_turns_toward_joystick_direction() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);

        // Joystick right: face +X.
        hold_joystick(&mut app, Vec2::new(150.0, 0.0));
        app.update();

        let first = transform(&app, character).forward();
        for _ in 0..60 {
            app.update();
        }
        let settled = transform(&app, character).forward();

        println!("PROOF: forward after one frame = {first:?}, after 61 frames = {settled:?}");
        assert!(first.dot(Vec3::X) > 0.0);
        assert!(first.dot(Vec3::X) < 0.99);
        assert!(settled.dot(Vec3::X) > 0.999);
    }

    #[test]
    fn disabled_movement_still_turns() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);

        animation_event(&mut app, character, AnimationEventKind::DisableMovement);
        app.update();

        hold_joystick(&mut app, Vec2::new(-150.0, 0.0));
        app.update();

        let after = transform(&app, character);
        assert_eq!(after.translation, Vec3::ZERO);
        assert!(after.forward().dot(Vec3::NEG_X) > 0.0);
        assert!(!locomotion(&app, character).can_move);

        animation_event(&mut app, character, AnimationEventKind::EnableMovement);
        app.update();

        assert!(locomotion(&app, character).can_move);
        assert!(transform(&app, character).translation.x < 0.0);
    }
}

// ==================== Jump Tests ====================

mod jumping {
    use super::*;

    #[test]
    fn jump_request_fires_trigger_without_force() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);

        app.world_mut().write_message(JumpRequest { character });
        app.update();

        let state = locomotion(&app, character);
        assert!(state.tracking_jump_velocity);
        assert_eq!(state.jump_state, JumpState::None);
        assert!(animator(&app, character).is_trigger_set(params::JUMP));

        let velocity = app.world().get::<ScriptedVelocity>(character).unwrap().0;
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn take_off_event_applies_jump_force() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);

        app.world_mut().write_message(JumpRequest { character });
        app.update();
        animation_event(&mut app, character, AnimationEventKind::AddJumpForce);
        app.update();

        let fixed_dt = app.world().resource::<Time<Fixed>>().timestep().as_secs_f32();
        let expected = 250.0 * fixed_dt / BODY_MASS;
        let velocity = app.world().get::<ScriptedVelocity>(character).unwrap().0;
        println!("PROOF: take-off velocity = {velocity:?}, expected vy = {expected}");

        assert!((velocity.y - expected).abs() < 1e-4);
        assert!(!locomotion(&app, character).pending_jump_force);
        // Rising on the same frame the force lands.
        assert_eq!(locomotion(&app, character).jump_state, JumpState::GettingUp);
        assert_eq!(animator(&app, character).float(params::AIR_POSITION), 1.0);
    }

    #[test]
    fn force_on_request_skips_the_animation_event() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);
        app.world_mut()
            .entity_mut(character)
            .insert(ControllerConfig::default().with_force_on_request(true));

        app.world_mut().write_message(JumpRequest { character });
        app.update();

        let velocity = app.world().get::<ScriptedVelocity>(character).unwrap().0;
        assert!(velocity.y > 0.0);
        assert_eq!(locomotion(&app, character).jump_state, JumpState::GettingUp);
    }

    #[test]
    fn full_jump_cycle() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);
        let ground = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(JumpRequest { character });
        app.update();

        set_velocity(&mut app, character, Vec3::new(0.0, 4.0, 0.0));
        app.update();
        assert_eq!(locomotion(&app, character).jump_state, JumpState::GettingUp);
        assert_eq!(animator(&app, character).float(params::AIR_POSITION), 1.0);

        // Apex: zero vertical velocity keeps the phase.
        set_velocity(&mut app, character, Vec3::ZERO);
        app.update();
        assert_eq!(locomotion(&app, character).jump_state, JumpState::GettingUp);

        set_velocity(&mut app, character, Vec3::new(0.0, -4.0, 0.0));
        app.update();
        assert_eq!(locomotion(&app, character).jump_state, JumpState::FallingDown);
        assert_eq!(animator(&app, character).float(params::AIR_POSITION), -1.0);

        app.world_mut()
            .write_message(GroundContact::new(character, ground));
        app.update();

        let state = locomotion(&app, character);
        println!("PROOF: after landing = {state:?}");
        assert_eq!(state.jump_state, JumpState::None);
        assert!(!state.tracking_jump_velocity);
        assert!(animator(&app, character).is_trigger_set(params::GROUNDED));

        // No longer tracking: upward velocity does not start a new phase.
        set_velocity(&mut app, character, Vec3::new(0.0, 3.0, 0.0));
        app.update();
        assert_eq!(locomotion(&app, character).jump_state, JumpState::None);
    }

    #[test]
    fn velocity_is_ignored_before_a_jump() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);
        let character = spawn_character(&mut app, joystick);

        set_velocity(&mut app, character, Vec3::new(0.0, -9.0, 0.0));
        app.update();

        assert_eq!(locomotion(&app, character).jump_state, JumpState::None);
    }
}

// ==================== Joystick Presentation Tests ====================

mod presentation {
    use super::*;

    #[test]
    fn joystick_nodes_appear_under_the_finger() {
        let mut app = create_test_app();
        let joystick = spawn_joystick(&mut app);

        hold_joystick(&mut app, Vec2::new(30.0, 40.0));
        app.update();

        let children = app.world().get::<Children>(joystick).unwrap().to_vec();
        let background = children
            .iter()
            .copied()
            .find(|&child| app.world().get::<JoystickBackground>(child).is_some())
            .unwrap();
        let node = app.world().get::<Node>(background).unwrap();

        // Background (200 px) centered on the press at (200, 500).
        assert_eq!(node.left, Val::Px(100.0));
        assert_eq!(node.top, Val::Px(400.0));
        assert_eq!(
            *app.world().get::<Visibility>(background).unwrap(),
            Visibility::Inherited
        );
    }
}
