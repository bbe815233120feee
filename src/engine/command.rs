//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture or a programmatic call, is represented as a `Command`.
//! Consumers construct commands and pass them to
//! [`Engine::execute`](super::Engine::execute).

use glam::Vec2;

use crate::camera::ZoomDirection;
use crate::input::KeyAction;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(Command::FollowActor)?;
/// engine.execute(Command::Zoom { direction: ZoomDirection::In })?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    // ── Camera gestures ─────────────────────────────────────────────
    /// Pan the camera by `delta` pixels of mouse movement.
    Drag {
        /// Horizontal and vertical cursor delta.
        delta: Vec2,
    },

    /// Orbit the camera by `delta` pixels of mouse movement.
    Orbit {
        /// Horizontal and vertical cursor delta.
        delta: Vec2,
    },

    /// Step the camera along its heading.
    Zoom {
        /// In or out.
        direction: ZoomDirection,
    },

    // ── Camera modes ────────────────────────────────────────────────
    /// Hover above the player actor, tracking it every frame.
    FollowActor,

    /// Look down on the whole level.
    OverlookMap,

    /// Look out of the player's eyes, tracking it every frame.
    FirstPerson,

    /// Return to the free-fly home pose.
    FreeCamera,

    // ── Window ──────────────────────────────────────────────────────
    /// The viewport changed size.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },

    /// Stop the viewer.
    Quit,
}

impl From<KeyAction> for Command {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::FollowActor => Self::FollowActor,
            KeyAction::OverlookMap => Self::OverlookMap,
            KeyAction::FirstPerson => Self::FirstPerson,
            KeyAction::FreeCamera => Self::FreeCamera,
            KeyAction::Quit => Self::Quit,
        }
    }
}
