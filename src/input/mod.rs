//! Input handling: event types, gesture and held-key state, and the input
//! processor that converts raw window events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable actions and held-key axis intents.
pub mod keyboard;
/// Drag/orbit gesture tracking.
pub(crate) mod mouse;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::{HeldKey, HeldKeys, KeyAction};
pub use processor::InputProcessor;
