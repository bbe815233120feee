//! Camera pose and projection under the four camera modes.
//!
//! The controller is pure matrix math; the GPU side only ever sees the
//! [`RenderMatrices`] it produces, packed as a [`CameraUniform`].

/// Pose/projection maintenance and the mode placements.
pub mod controller;
/// Camera modes, per-frame input and GPU uniform types.
pub mod core;

pub use controller::{CameraController, CameraError};
pub use core::{
    CameraMode, CameraUniform, InputDelta, RenderMatrices, ZoomDirection,
};
