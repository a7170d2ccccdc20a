//! On-screen nodes for the virtual joystick and the jump button.

use bevy::prelude::*;

use crate::config::JoystickConfig;
use crate::input::JumpButton;
use crate::joystick::VirtualJoystick;

/// The ring shown under the finger while the joystick is held.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct JoystickBackground;

/// The knob that follows the finger.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct JoystickTrigger;

fn circle(size: f32, color: Color) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(size),
            height: Val::Px(size),
            ..default()
        },
        BackgroundColor(color),
        BorderRadius::MAX,
        Visibility::Hidden,
        Pickable::IGNORE,
    )
}

/// Spawn a virtual joystick covering the window.
///
/// The returned entity carries [`VirtualJoystick`]; bind characters to it with
/// [`JoystickBinding`](crate::intent::JoystickBinding).
pub fn spawn_virtual_joystick(commands: &mut Commands, config: JoystickConfig) -> Entity {
    commands
        .spawn((
            Name::new("Virtual Joystick"),
            VirtualJoystick::default(),
            config,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            // Presses are read from raw input; never block buttons underneath.
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("Joystick Background"),
                JoystickBackground,
                circle(config.background_size, config.background_color),
            ));
            parent.spawn((
                Name::new("Joystick Trigger"),
                JoystickTrigger,
                circle(config.trigger_size, config.trigger_color),
            ));
        })
        .id()
}

/// Spawn a round "Jump" button in the bottom-right corner for `character`.
pub fn spawn_jump_button(commands: &mut Commands, character: Entity) -> Entity {
    commands
        .spawn((
            Name::new("Jump Button"),
            JumpButton { character },
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(48.0),
                bottom: Val::Px(48.0),
                width: Val::Px(120.0),
                height: Val::Px(120.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.3)),
            BorderRadius::MAX,
        ))
        .with_child((Text::new("Jump"), TextColor(Color::WHITE)))
        .id()
}

/// Center an absolutely positioned node of `size` on `center`.
fn center_node(node: &mut Node, center: Vec2, size: f32) {
    let half = size * 0.5;
    node.left = Val::Px(center.x - half);
    node.top = Val::Px(center.y - half);
}

fn set_visibility(visibility: &mut Visibility, shown: bool) {
    let wanted = if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if *visibility != wanted {
        *visibility = wanted;
    }
}

/// Move joystick nodes to the joystick's state and hide them while idle.
pub fn sync_joystick_nodes(
    joysticks: Query<(&VirtualJoystick, &JoystickConfig, &Children), Changed<VirtualJoystick>>,
    mut backgrounds: Query<
        (&mut Node, &mut Visibility),
        (With<JoystickBackground>, Without<JoystickTrigger>),
    >,
    mut triggers: Query<
        (&mut Node, &mut Visibility),
        (With<JoystickTrigger>, Without<JoystickBackground>),
    >,
) {
    for (joystick, config, children) in &joysticks {
        for child in children.iter() {
            if let Ok((mut node, mut visibility)) = backgrounds.get_mut(child) {
                center_node(&mut node, joystick.background_position(), config.background_size);
                set_visibility(&mut visibility, joystick.is_active());
            } else if let Ok((mut node, mut visibility)) = triggers.get_mut(child) {
                center_node(&mut node, joystick.trigger_position(), config.trigger_size);
                set_visibility(&mut visibility, joystick.is_active());
            }
        }
    }
}
