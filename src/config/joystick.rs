//! Configuration for the on-screen virtual joystick.

use bevy::prelude::*;

/// Region of the window in which a pointer press summons the joystick.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationArea {
    /// Anywhere in the window.
    Window,
    /// The left half of the window, leaving the right half for buttons.
    #[default]
    LeftHalf,
    /// An explicit rectangle in logical window coordinates.
    Rect(Rect),
}

impl ActivationArea {
    /// Whether `position` lies in this area of a window of `window_size`.
    pub fn contains(&self, position: Vec2, window_size: Vec2) -> bool {
        match self {
            Self::Window => Rect::from_corners(Vec2::ZERO, window_size).contains(position),
            Self::LeftHalf => Rect::new(0.0, 0.0, window_size.x * 0.5, window_size.y)
                .contains(position),
            Self::Rect(rect) => rect.contains(position),
        }
    }
}

/// Configuration for a virtual joystick.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct JoystickConfig {
    /// Maximum distance (logical px) the trigger travels from the background
    /// center. Dragging this far or further gives full input.
    pub allowable_distance: f32,

    /// Where a press may summon the joystick.
    pub activation_area: ActivationArea,

    /// Diameter of the background node (logical px).
    pub background_size: f32,

    /// Diameter of the trigger node (logical px).
    pub trigger_size: f32,

    pub background_color: Color,

    pub trigger_color: Color,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            allowable_distance: 100.0,
            activation_area: ActivationArea::default(),
            background_size: 200.0,
            trigger_size: 80.0,
            background_color: Color::srgba(1.0, 1.0, 1.0, 0.25),
            trigger_color: Color::srgba(1.0, 1.0, 1.0, 0.6),
        }
    }
}

impl JoystickConfig {
    /// Builder: set the allowable trigger distance.
    pub fn with_allowable_distance(mut self, distance: f32) -> Self {
        self.allowable_distance = distance.max(0.0);
        self
    }

    /// Builder: set the activation area.
    pub fn with_activation_area(mut self, area: ActivationArea) -> Self {
        self.activation_area = area;
        self
    }

    /// Builder: set the background and trigger node sizes.
    pub fn with_sizes(mut self, background: f32, trigger: f32) -> Self {
        self.background_size = background;
        self.trigger_size = trigger;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn left_half_accepts_left_side_only() {
        let area = ActivationArea::LeftHalf;
        assert!(area.contains(Vec2::new(100.0, 600.0), WINDOW));
        assert!(!area.contains(Vec2::new(1000.0, 600.0), WINDOW));
    }

    #[test]
    fn window_area_rejects_outside_points() {
        let area = ActivationArea::Window;
        assert!(area.contains(Vec2::new(1000.0, 10.0), WINDOW));
        assert!(!area.contains(Vec2::new(-5.0, 10.0), WINDOW));
    }

    #[test]
    fn explicit_rect() {
        let area = ActivationArea::Rect(Rect::new(0.0, 360.0, 400.0, 720.0));
        assert!(area.contains(Vec2::new(200.0, 500.0), WINDOW));
        assert!(!area.contains(Vec2::new(200.0, 100.0), WINDOW));
    }

    #[test]
    fn negative_allowable_distance_is_floored() {
        let config = JoystickConfig::default().with_allowable_distance(-10.0);
        assert_eq!(config.allowable_distance, 0.0);
    }
}
