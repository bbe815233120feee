// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
#![allow(clippy::cargo_common_metadata)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera transforms and packed mesh buffers for a small tile-level
//! renderer built on wgpu.
//!
//! Tileview keeps a single static "level" mesh group and a single dynamic
//! "actors" group on the GPU and flies a camera over them in one of four
//! modes (free-fly, map overlook, actor follow, first person).
//!
//! # Key entry points
//!
//! - [`camera::CameraController`] - pose, projection, view and lighting
//!   matrices under the four camera modes
//! - [`scene::pack`] - concatenates mesh objects into one attribute-sliced
//!   vertex buffer plus a globally offset index buffer
//! - [`scene::Scene`] - the level and actor groups with change tracking
//! - [`engine::Engine`] - headless per-frame orchestration returning
//!   [`engine::FrameOutput`]
//! - [`options::Options`] - TOML-backed configuration (display, camera,
//!   lighting, keybindings)
//!
//! # Architecture
//!
//! Input events are turned into [`engine::Command`]s and a per-frame
//! [`camera::InputDelta`] by the [`input::InputProcessor`]. The engine
//! applies them to the camera, repacks whichever scene group changed and
//! hands the matrices and packed buffers to [`gpu::MeshRenderer`], which is
//! the only place that touches wgpu handles.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{Command, Engine, FrameOutput};
pub use error::TileviewError;
pub use input::{InputEvent, InputProcessor, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
