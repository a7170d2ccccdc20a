//! Touch Arena Demo
//!
//! A playable demo with a capsule character on a floor with a few crates:
//! - Touch (or click-drag) the left half of the screen to summon the joystick
//! - Tap the Jump button in the bottom-right corner to jump
//!
//! The character has no animation clips, so the demo applies the jump force
//! on request and stands in for an animation graph by logging the triggers it
//! consumes.
//!
//! ## Running
//! ```bash
//! cargo run --example touch_arena
//! ```

use avian3d::prelude::*;
use bevy::prelude::*;
use touch_character_controller::animation::params;
use touch_character_controller::prelude::*;

// ==================== Constants ====================

const FLOOR_SIZE: f32 = 60.0;
const PLAYER_RADIUS: f32 = 0.4;
const PLAYER_LENGTH: f32 = 1.0;
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 9.0, 12.0);

#[derive(Component)]
struct Player;

// ==================== Main ====================

fn player_config() -> ControllerConfig {
    ControllerConfig::default()
        .with_max_running_speed(6.0)
        .with_jump_force(300.0)
        .with_force_on_request(true)
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Touch Arena - Character Controller Demo".into(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(TouchControllerPlugin::<Avian3dBackend>::default())
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                consume_animation_triggers.after(TouchControllerSet::Airborne),
                follow_player.after(TouchControllerSet::Locomotion),
            ),
        )
        .run();
}

// ==================== Setup ====================

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(FLOOR_SIZE, 1.0, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(FLOOR_SIZE, 1.0, FLOOR_SIZE),
        CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
    ));

    // Crates to jump onto
    let crate_mesh = meshes.add(Cuboid::new(1.5, 1.5, 1.5));
    let crate_material = materials.add(Color::srgb(0.6, 0.45, 0.25));
    for position in [
        Vec3::new(4.0, 0.75, -3.0),
        Vec3::new(-5.0, 0.75, -6.0),
        Vec3::new(2.0, 0.75, 6.0),
    ] {
        commands.spawn((
            Mesh3d(crate_mesh.clone()),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_translation(position),
            RigidBody::Static,
            Collider::cuboid(1.5, 1.5, 1.5),
            CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
        ));
    }

    // Player
    let joystick = spawn_virtual_joystick(&mut commands, JoystickConfig::default());
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            CharacterLocomotion::new(),
            player_config(),
            JoystickBinding(joystick),
            Mesh3d(meshes.add(Capsule3d::new(PLAYER_RADIUS, PLAYER_LENGTH))),
            MeshMaterial3d(materials.add(Color::srgb(0.8, 0.7, 0.6))),
            Transform::from_xyz(0.0, 1.5, 0.0),
            Collider::capsule(PLAYER_RADIUS, PLAYER_LENGTH),
            CollisionLayers::new(GameLayer::Character, LayerMask::ALL),
            Restitution::new(0.0),
        ))
        .id();
    spawn_jump_button(&mut commands, player);

    // Light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Instructions
    commands.spawn((
        Text::new("Drag on the left half to move | Jump button to jump"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        Pickable::IGNORE,
    ));
}

// ==================== Systems ====================

/// Stand-in for an animation graph: consume triggers and report parameters.
fn consume_animation_triggers(mut players: Query<&mut AnimatorParameters, With<Player>>) {
    for mut animator in &mut players {
        if animator.take_trigger(params::JUMP) {
            info!("jump");
        }
        if animator.take_trigger(params::GROUNDED) {
            info!(
                "grounded (speed {:.2})",
                animator.float(params::MOVEMENT_SPEED_NORMALIZED)
            );
        }
    }
}

fn follow_player(
    player: Query<&Transform, (With<Player>, Without<Camera3d>)>,
    mut camera: Query<&mut Transform, With<Camera3d>>,
) -> Result {
    let player = player.single()?;
    let mut camera = camera.single_mut()?;
    camera.translation = player.translation + CAMERA_OFFSET;
    camera.look_at(player.translation, Vec3::Y);
    Ok(())
}
