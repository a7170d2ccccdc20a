//! Pointer input for virtual joysticks and the jump button.
//!
//! Touches and the primary mouse button are normalized into
//! [`JoystickPointer`] messages, which [`drive_joysticks`] routes to joysticks.
//! Pointer sources can be replaced or supplemented: anything that writes
//! `JoystickPointer` messages drives the joystick.
//!
//! Every press is hit-tested on its own against laid-out UI buttons, so one
//! finger can hold the joystick while another taps [`JumpButton`]. A press on
//! a jump button requests a jump; a press on any button never reaches a
//! joystick.

use bevy::prelude::*;
use bevy::ui::{ComputedNode, UiGlobalTransform};
use bevy::window::PrimaryWindow;

use crate::airborne::JumpRequest;
use crate::config::JoystickConfig;
use crate::joystick::{PointerId, VirtualJoystick};

/// Lifecycle phase of a pointer.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Message: a pointer went down, moved or went up.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct JoystickPointer {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    /// Logical window position (origin top-left, y down).
    pub position: Vec2,
    /// Logical size of the window the position belongs to.
    pub window_size: Vec2,
}

/// Marks a UI button that makes `character` jump when pressed.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
#[require(Button)]
pub struct JumpButton {
    pub character: Entity,
}

/// Laid-out UI buttons that can catch a press.
pub type UiButtons<'w, 's> = Query<
    'w,
    's,
    (
        &'static ComputedNode,
        &'static UiGlobalTransform,
        Option<&'static JumpButton>,
        Option<&'static InheritedVisibility>,
    ),
    With<Button>,
>;

/// What a press at some window position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressTarget {
    /// Open screen: joysticks may take it.
    Screen,
    /// A jump button for this character.
    Jump(Entity),
    /// Some other button.
    Button,
}

/// Logical-pixel bounds of a laid-out node.
fn node_bounds(node: &ComputedNode, transform: &UiGlobalTransform) -> Rect {
    let scale = node.inverse_scale_factor();
    Rect::from_center_size(transform.translation * scale, node.size() * scale)
}

fn press_target(buttons: &UiButtons, position: Vec2) -> PressTarget {
    let mut target = PressTarget::Screen;
    for (node, transform, jump, visibility) in buttons {
        if visibility.is_some_and(|visibility| !visibility.get()) || node.size() == Vec2::ZERO {
            continue;
        }
        if !node_bounds(node, transform).contains(position) {
            continue;
        }
        match jump {
            Some(jump) => return PressTarget::Jump(jump.character),
            None => target = PressTarget::Button,
        }
    }
    target
}

/// Send a press to the button under it, or on to the joysticks.
fn route_press(
    buttons: &UiButtons,
    pointer: JoystickPointer,
    pointers: &mut MessageWriter<JoystickPointer>,
    jumps: &mut MessageWriter<JumpRequest>,
) {
    match press_target(buttons, pointer.position) {
        PressTarget::Screen => {
            pointers.write(pointer);
        }
        PressTarget::Jump(character) => {
            trace!("{:?} pressed the jump button of {character}", pointer.pointer);
            jumps.write(JumpRequest { character });
        }
        PressTarget::Button => {}
    }
}

/// Translate touches into pointer messages.
pub fn touch_pointer_input(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: UiButtons,
    mut pointers: MessageWriter<JoystickPointer>,
    mut jumps: MessageWriter<JumpRequest>,
) -> Result {
    let window_size = windows.single()?.size();

    let message = |touch: &bevy::input::touch::Touch, phase| JoystickPointer {
        pointer: PointerId::Touch(touch.id()),
        phase,
        position: touch.position(),
        window_size,
    };

    for touch in touches.iter_just_pressed() {
        route_press(&buttons, message(touch, PointerPhase::Down), &mut pointers, &mut jumps);
    }

    for touch in touches.iter() {
        if !touches.just_pressed(touch.id()) && touch.delta() != Vec2::ZERO {
            pointers.write(message(touch, PointerPhase::Move));
        }
    }

    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        pointers.write(message(touch, PointerPhase::Up));
    }

    Ok(())
}

/// Translate the primary mouse button into pointer messages.
///
/// Lets desktop builds drive the joystick by click-dragging.
pub fn mouse_pointer_input(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: UiButtons,
    mut pointers: MessageWriter<JoystickPointer>,
    mut jumps: MessageWriter<JumpRequest>,
    mut last_cursor: Local<Option<Vec2>>,
) -> Result {
    let window = windows.single()?;
    let window_size = window.size();
    let cursor = window.cursor_position().or(*last_cursor);

    let Some(position) = cursor else {
        return Ok(());
    };

    let message = |phase| JoystickPointer {
        pointer: PointerId::Mouse,
        phase,
        position,
        window_size,
    };

    if mouse.just_pressed(MouseButton::Left) {
        route_press(&buttons, message(PointerPhase::Down), &mut pointers, &mut jumps);
    } else if mouse.pressed(MouseButton::Left) && *last_cursor != Some(position) {
        pointers.write(message(PointerPhase::Move));
    }

    if mouse.just_released(MouseButton::Left) {
        pointers.write(message(PointerPhase::Up));
    }

    *last_cursor = Some(position);
    Ok(())
}

/// Route pointer messages to joysticks.
///
/// A press summons the first idle joystick whose activation area contains
/// it; that pointer then owns the joystick until it goes up.
pub fn drive_joysticks(
    mut pointers: MessageReader<JoystickPointer>,
    mut joysticks: Query<(Entity, &mut VirtualJoystick, &JoystickConfig)>,
) {
    for event in pointers.read() {
        match event.phase {
            PointerPhase::Down => {
                if joysticks.iter().any(|(_, joystick, _)| joystick.is_held_by(event.pointer)) {
                    continue;
                }

                let idle = joysticks.iter_mut().find(|(_, joystick, config)| {
                    !joystick.is_active()
                        && config
                            .activation_area
                            .contains(event.position, event.window_size)
                });

                if let Some((entity, mut joystick, config)) = idle {
                    joystick.press(event.pointer, event.position, config);
                    trace!("{:?} took joystick {entity}", event.pointer);
                }
            }
            PointerPhase::Move => {
                for (_, mut joystick, config) in &mut joysticks {
                    if joystick.is_held_by(event.pointer) {
                        joystick.drag(event.position, config);
                    }
                }
            }
            PointerPhase::Up => {
                for (entity, mut joystick, _) in &mut joysticks {
                    if joystick.is_held_by(event.pointer) {
                        joystick.release();
                        trace!("{:?} released joystick {entity}", event.pointer);
                    }
                }
            }
        }
    }
}
