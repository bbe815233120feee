//! Headless per-frame orchestration.
//!
//! The [`Engine`] ties the camera controller to the scene: it applies
//! [`Command`]s as they arrive, and once per frame turns an
//! [`InputDelta`] into a [`FrameOutput`] holding the matrices and any
//! freshly packed buffers. It never touches a GPU handle, so the whole
//! frame loop is testable without a window.

pub mod command;

pub use command::Command;

use crate::camera::{
    CameraController, CameraMode, CameraUniform, InputDelta, RenderMatrices,
};
use crate::error::TileviewError;
use crate::options::Options;
use crate::scene::{Actor, PackedBuffer, Scene};
use crate::util::frame_timing::FrameTiming;

/// Per-frame statistics, returned instead of kept as global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Smoothed frames per second.
    pub fps: f32,
    /// Camera mode after this frame's update.
    pub mode: CameraMode,
    /// Seconds the frame covered.
    pub elapsed: f32,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// Perspective, view and lighting matrices.
    pub matrices: RenderMatrices,
    /// The same matrices packed with light and fog settings.
    pub uniform: CameraUniform,
    /// Repacked level buffer, if the level changed.
    pub level: Option<PackedBuffer>,
    /// Repacked actors buffer, if any actor changed.
    pub actors: Option<PackedBuffer>,
    /// FPS and camera mode.
    pub stats: FrameStats,
}

/// Camera plus scene, driven by commands and per-frame input.
pub struct Engine {
    camera: CameraController,
    scene: Scene,
    options: Options,
    frame_timing: FrameTiming,
    quit_requested: bool,
}

impl Engine {
    /// Create an engine with an empty scene for a `width` x `height`
    /// viewport.
    pub fn new(
        options: Options,
        width: u32,
        height: u32,
    ) -> Result<Self, TileviewError> {
        let camera =
            CameraController::new(options.camera.clone(), width, height)?;
        let frame_timing = FrameTiming::new(options.display.target_fps);
        Ok(Self {
            camera,
            scene: Scene::new(),
            options,
            frame_timing,
            quit_requested: false,
        })
    }

    /// The camera controller.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Mutable camera access for programmatic control.
    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for adding or moving geometry.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether a [`Command::Quit`] was executed.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Whether the frame limiter allows rendering now.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.frame_timing.should_render()
    }

    /// Apply one command.
    ///
    /// Mode commands that need a player are ignored (with a warning) when
    /// the scene has none.
    pub fn execute(&mut self, command: Command) -> Result<(), TileviewError> {
        match command {
            Command::Drag { delta } => self.camera.update_drag(delta)?,
            Command::Orbit { delta } => self.camera.update_orbit(delta)?,
            Command::Zoom { direction } => self.camera.zoom(direction),
            Command::FollowActor => {
                if let Some(tile) = self.scene.player().map(Actor::tile) {
                    self.camera.follow_actor(tile);
                } else {
                    log::warn!("follow camera needs a player actor");
                }
            }
            Command::OverlookMap => {
                let map = self.scene.map();
                self.camera.overlook_map(map.origin, map.width, map.height);
            }
            Command::FirstPerson => self.place_first_person(),
            Command::FreeCamera => self.camera.set_free_camera_home(),
            Command::Resize { width, height } => {
                self.camera.resize(width, height)?;
            }
            Command::Quit => self.quit_requested = true,
        }
        Ok(())
    }

    /// Advance one frame.
    ///
    /// Held keys switch the camera back to free mode; the follow and
    /// first-person placements are re-applied so the camera tracks a
    /// moving player. The camera is always updated before the scene is
    /// packed.
    pub fn frame(
        &mut self,
        input: &InputDelta,
    ) -> Result<FrameOutput, TileviewError> {
        self.frame_timing.record(input.elapsed);

        if input.has_key_intent() {
            self.camera.set_mode(CameraMode::Free);
        }
        self.camera.update_free_fly(input);

        match self.camera.mode() {
            CameraMode::FirstPerson => self.place_first_person(),
            CameraMode::ActorFollow => {
                if let Some(tile) = self.scene.player().map(Actor::tile) {
                    self.camera.follow_actor(tile);
                }
            }
            CameraMode::Free | CameraMode::MapOverlook => {}
        }

        let packs = self.scene.pack_dirty();
        let matrices = self.camera.matrices()?;
        let fog_centre = self.scene.player().map_or_else(
            || self.camera.pose().w_axis.truncate(),
            Actor::world_position,
        );
        let uniform = CameraUniform::new(&matrices, &self.options.lighting)
            .with_player_position(fog_centre);
        Ok(FrameOutput {
            matrices,
            uniform,
            level: packs.level,
            actors: packs.actors,
            stats: FrameStats {
                fps: self.frame_timing.fps(),
                mode: self.camera.mode(),
                elapsed: input.elapsed,
            },
        })
    }

    fn place_first_person(&mut self) {
        if let Some(player) = self.scene.player() {
            let (position, direction) =
                (player.world_position(), player.direction());
            self.camera.first_person(position, direction);
        } else {
            log::warn!("first person camera needs a player actor");
        }
    }
}
