//! Standalone window backed by winit.
//!
//! ```no_run
//! # use tileview::Viewer;
//! Viewer::builder()
//!     .with_model("assets/models/statue.obj")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{path::PathBuf, sync::Arc};

use glam::{IVec2, Vec3};
use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::TileviewError,
    gpu::{MeshRenderer, RenderContext},
    options::Options,
    scene::{
        mesh_gen, obj, Actor, ActorKind, MapBounds, MeshSource, Plant, Scene,
    },
    Command, Engine, InputEvent, InputProcessor, MouseButton,
};

const DEMO_MAP: (u32, u32) = (16, 12);
const FLOOR_COLOR: Vec3 = Vec3::new(0.35, 0.35, 0.4);
const WALL_COLOR: Vec3 = Vec3::new(0.55, 0.4, 0.3);
const PLANT_PART_SIZE: f32 = 0.02;
const PLANT_GROWTH_INTERVAL: Duration = Duration::from_secs(1);
const TITLE_INTERVAL: Duration = Duration::from_millis(500);

/// Fill `scene` with the demo level: a walled tile map, a player, one
/// monster, a plant in the corner and (optionally) the axis gizmo.
pub fn populate_demo(scene: &mut Scene, tile_size: f32, show_axes: bool) {
    let (width, height) = DEMO_MAP;
    scene.add_level_mesh(mesh_gen::tile_map(width, height, tile_size, |t| {
        let wall = t.x == width as i32 - 1
            || t.y == height as i32 - 1
            || (t.x % 4 == 2 && t.y % 4 == 2);
        (wall, if wall { WALL_COLOR } else { FLOOR_COLOR })
    }));
    scene.set_map(MapBounds {
        origin: IVec2::ZERO,
        width,
        height,
    });

    let player = scene.add_actor(Actor::new(
        ActorKind::Player,
        IVec2::new(3, 3),
        Vec3::new(0.2, 0.6, 1.0),
        tile_size,
    ));
    scene.set_player(player);
    let _ = scene.add_actor(Actor::new(
        ActorKind::Monster,
        IVec2::new(9, 5),
        Vec3::new(0.9, 0.2, 0.2),
        tile_size,
    ));
    scene.add_plant(Plant::new(PLANT_PART_SIZE));
    if show_axes {
        scene.add_prop(mesh_gen::axis_gizmo(1.0, 0.5, 0.02));
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    model: Option<PathBuf>,
    options: Option<Options>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            model: None,
            options: None,
        }
    }

    /// Load a Wavefront OBJ file as an extra level mesh.
    #[must_use]
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            model: self.model,
            options: self.options.unwrap_or_default(),
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the demo level.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    model: Option<PathBuf>,
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the quit key is pressed.
    pub fn run(self) -> Result<(), TileviewError> {
        let event_loop = EventLoop::new()
            .map_err(|e| TileviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let input =
            InputProcessor::with_key_bindings(self.options.keybindings.clone());
        let mut app = ViewerApp {
            model: self.model,
            options: self.options,
            input,
            running: None,
            last_frame: Instant::now(),
            last_growth: Instant::now(),
            last_title: Instant::now(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TileviewError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Window, GPU and engine state, created together on resume.
struct Running {
    window: Arc<Window>,
    context: RenderContext,
    renderer: MeshRenderer,
    engine: Engine,
}

struct ViewerApp {
    model: Option<PathBuf>,
    options: Options,
    input: InputProcessor,
    running: Option<Running>,
    last_frame: Instant,
    last_growth: Instant,
    last_title: Instant,
}

impl ViewerApp {
    fn start(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<Running, TileviewError> {
        let display = &self.options.display;
        let attrs = Window::default_attributes()
            .with_title(&display.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                display.width,
                display.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| TileviewError::Viewer(e.to_string()))?,
        );

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let context = pollster::block_on(RenderContext::new(
            window.clone(),
            (width, height),
            display,
        ))?;
        let renderer = MeshRenderer::new(&context, display.clear_color);

        let mut engine = Engine::new(self.options.clone(), width, height)?;
        let tile_size = self.options.camera.tile_size;
        populate_demo(engine.scene_mut(), tile_size, display.show_axes);
        if let Some(path) = &self.model {
            let mesh = obj::load_obj(path, true)?;
            log::info!(
                "loaded {} with {} triangles",
                mesh.name(),
                mesh.mesh().triangle_count()
            );
            engine.scene_mut().add_level_mesh(mesh);
        }

        Ok(Running {
            window,
            context,
            renderer,
            engine,
        })
    }

    fn dispatch(&mut self, command: Option<Command>) {
        let (Some(command), Some(running)) = (command, &mut self.running)
        else {
            return;
        };
        if let Err(e) = running.engine.execute(command) {
            log::warn!("{command:?} ignored: {e}");
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };
        if !running.engine.should_render() {
            running.window.request_redraw();
            return;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if now.duration_since(self.last_growth) >= PLANT_GROWTH_INTERVAL {
            running.engine.scene_mut().grow_plants(&mut rand::rng());
            self.last_growth = now;
        }

        let delta = self.input.frame_delta(elapsed);
        match running.engine.frame(&delta) {
            Ok(frame) => {
                running.renderer.prepare(&running.context, &frame);
                if now.duration_since(self.last_title) >= TITLE_INTERVAL {
                    running.window.set_title(&format!(
                        "{} - {:.0} fps - {}",
                        self.options.display.title,
                        frame.stats.fps,
                        frame.stats.mode
                    ));
                    self.last_title = now;
                }
            }
            Err(e) => log::error!("frame failed: {e}"),
        }

        if let Err(e) = running.renderer.render(&running.context) {
            log::error!("render error: {e}");
        }

        if running.engine.quit_requested() {
            event_loop.exit();
            return;
        }
        running.window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("failed to start viewer: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(running) = &mut self.running {
                    running.context.resize(size.width, size.height);
                }
                if size.width == 0 || size.height == 0 {
                    return;
                }
                self.dispatch(Some(Command::Resize {
                    width: size.width,
                    height: size.height,
                }));
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::MouseInput { button, state, .. } => {
                let command = self.input.handle_event(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
                self.dispatch(command);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let command = self.input.handle_event(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
                self.dispatch(command);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                let command =
                    self.input.handle_event(InputEvent::Scroll { delta });
                self.dispatch(command);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                let command =
                    self.input.handle_key(&format!("{code:?}"), pressed);
                self.dispatch(command);
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGroup;

    #[test]
    fn demo_scene_has_player_and_map() {
        let mut scene = Scene::new();
        populate_demo(&mut scene, 0.25, true);
        assert_eq!(scene.level_len(), 1);
        assert_eq!(scene.map().width, 16);
        let player = scene.player().unwrap();
        assert_eq!(player.kind(), ActorKind::Player);
        assert_eq!(player.tile(), IVec2::new(3, 3));

        let level = scene.pack_group(SceneGroup::Level);
        assert_eq!(level.vertex_count(), 16 * 12 * 8);
        let actors = scene.pack_group(SceneGroup::Actors);
        // two pyramids, one plant part, three gizmo axes
        assert_eq!(actors.vertex_count(), 5 + 5 + 4 + 18);
    }

    #[test]
    fn builder_defaults_to_default_options() {
        let viewer = Viewer::builder().build();
        assert!(viewer.model.is_none());
        assert_eq!(viewer.options, Options::default());
    }
}
