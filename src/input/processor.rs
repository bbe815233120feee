//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! the active mouse gesture, held keys) and the key-binding map. It is the
//! only thing that sits between raw window events and the engine's
//! [`execute`](crate::Engine::execute) and
//! [`frame`](crate::Engine::frame) methods.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::HeldKeys;
use super::mouse::{Gesture, GestureState};
use crate::camera::{InputDelta, ZoomDirection};
use crate::engine::Command;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`Command`]s and per-frame
/// [`InputDelta`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input.handle_event(event) {
///     engine.execute(cmd)?;
/// }
/// if let Some(cmd) = input.handle_key("KeyP", true) {
///     engine.execute(cmd)?;
/// }
///
/// // Once per frame:
/// let output = engine.frame(&input.frame_delta(elapsed))?;
/// ```
pub struct InputProcessor {
    /// Cursor tracking and the active drag/orbit gesture.
    gestures: GestureState,
    /// Keys currently down that drive continuous motion.
    held: HeldKeys,
    /// Cursor motion since the last `frame_delta`.
    mouse_accum: Vec2,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            gestures: GestureState::default(),
            held: HeldKeys::default(),
            mouse_accum: Vec2::ZERO,
            key_bindings,
        }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings. Held keys are released.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
        self.held = HeldKeys::default();
    }

    /// Keys currently held.
    #[must_use]
    pub fn held(&self) -> HeldKeys {
        self.held
    }

    /// Process a raw pointer event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed);
                None
            }
            InputEvent::Scroll { delta } => {
                if delta > 0.0 {
                    Some(Command::Zoom {
                        direction: ZoomDirection::In,
                    })
                } else if delta < 0.0 {
                    Some(Command::Zoom {
                        direction: ZoomDirection::Out,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Key press or release, keyed by the `winit::keyboard::KeyCode` debug
    /// string (`"KeyP"`, `"ArrowLeft"`, ...).
    ///
    /// Discrete actions fire on press only. Held keys update the state
    /// sampled by [`frame_delta`](Self::frame_delta).
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> Option<Command> {
        if let Some(held) = self.key_bindings.lookup_held(key) {
            self.held.set(held, pressed);
            return None;
        }
        if !pressed {
            return None;
        }
        self.key_bindings.lookup(key).map(Command::from)
    }

    /// Sample the held keys and drain the accumulated cursor motion.
    pub fn frame_delta(&mut self, elapsed: f32) -> InputDelta {
        InputDelta {
            rotation: self.held.rotation_intent(),
            movement: self.held.movement_intent(),
            mouse: std::mem::take(&mut self.mouse_accum),
            elapsed,
        }
    }

    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<Command> {
        let delta = self.gestures.moved_to(pos);
        self.mouse_accum += delta;
        if delta == Vec2::ZERO {
            return None;
        }
        match self.gestures.active()? {
            Gesture::Drag => Some(Command::Drag { delta }),
            Gesture::Orbit => Some(Command::Orbit { delta }),
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        let gesture = match button {
            MouseButton::Left => Gesture::Drag,
            MouseButton::Right => Gesture::Orbit,
            MouseButton::Middle => return,
        };
        if pressed {
            self.gestures.begin(gesture);
        } else {
            self.gestures.end(gesture);
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn cursor(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn button(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn motion_without_button_is_not_a_gesture() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(cursor(10.0, 10.0)), None);
        assert_eq!(input.handle_event(cursor(12.0, 10.0)), None);
        assert_eq!(input.frame_delta(0.1).mouse, Vec2::new(2.0, 0.0));
        assert_eq!(input.frame_delta(0.1).mouse, Vec2::ZERO);
    }

    #[test]
    fn left_button_drags() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(cursor(10.0, 10.0));
        assert_eq!(input.handle_event(button(MouseButton::Left, true)), None);
        assert_eq!(
            input.handle_event(cursor(13.0, 6.0)),
            Some(Command::Drag {
                delta: Vec2::new(3.0, -4.0)
            })
        );
        let _ = input.handle_event(button(MouseButton::Left, false));
        assert_eq!(input.handle_event(cursor(20.0, 6.0)), None);
    }

    #[test]
    fn right_button_orbits() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(cursor(0.0, 0.0));
        let _ = input.handle_event(button(MouseButton::Right, true));
        assert_eq!(
            input.handle_event(cursor(-5.0, 1.0)),
            Some(Command::Orbit {
                delta: Vec2::new(-5.0, 1.0)
            })
        );
    }

    #[test]
    fn wheel_zooms_by_sign() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 2.5 }),
            Some(Command::Zoom {
                direction: ZoomDirection::In
            })
        );
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: -0.1 }),
            Some(Command::Zoom {
                direction: ZoomDirection::Out
            })
        );
        assert_eq!(input.handle_event(InputEvent::Scroll { delta: 0.0 }), None);
    }

    #[test]
    fn discrete_keys_fire_on_press() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_key("KeyP", true), Some(Command::FollowActor));
        assert_eq!(input.handle_key("KeyP", false), None);
        assert_eq!(input.handle_key("KeyM", true), Some(Command::OverlookMap));
        assert_eq!(input.handle_key("KeyO", true), Some(Command::FirstPerson));
        assert_eq!(input.handle_key("Escape", true), Some(Command::Quit));
        assert_eq!(input.handle_key("KeyZ", true), None);
    }

    #[test]
    fn held_keys_feed_frame_delta() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_key("ArrowLeft", true), None);
        assert_eq!(input.handle_key("Home", true), None);
        let delta = input.frame_delta(0.25);
        assert_eq!(delta.rotation, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(delta.movement, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(delta.elapsed, 0.25);
        assert!(delta.has_key_intent());

        let _ = input.handle_key("ArrowLeft", false);
        let _ = input.handle_key("Home", false);
        assert!(!input.frame_delta(0.25).has_key_intent());
    }
}
