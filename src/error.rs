//! Crate-level error types.

use std::fmt;

use crate::camera::CameraError;
use crate::gpu::render_context::RenderContextError;
use crate::scene::{MeshError, ObjError};

/// Errors produced by the tileview crate.
#[derive(Debug)]
pub enum TileviewError {
    /// GPU bring-up or frame acquisition failure.
    Gpu(RenderContextError),
    /// Camera matrix failure (bad viewport, singular pose).
    Camera(CameraError),
    /// A mesh object broke the parallel-array contract.
    Mesh(MeshError),
    /// Failed to load an OBJ model.
    Obj(ObjError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TileviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Camera(e) => write!(f, "camera error: {e}"),
            Self::Mesh(e) => write!(f, "mesh error: {e}"),
            Self::Obj(e) => write!(f, "model error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TileviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Camera(e) => Some(e),
            Self::Mesh(e) => Some(e),
            Self::Obj(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<RenderContextError> for TileviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<CameraError> for TileviewError {
    fn from(e: CameraError) -> Self {
        Self::Camera(e)
    }
}

impl From<MeshError> for TileviewError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<ObjError> for TileviewError {
    fn from(e: ObjError) -> Self {
        Self::Obj(e)
    }
}

impl From<std::io::Error> for TileviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
