//! Shared utilities: affine transform primitives and frame timing.

pub mod frame_timing;
pub mod transform;
