//! Window surface, device and the depth attachment sized with it.
//!
//! A zero-sized (minimised) window keeps the last surface configuration and
//! [`RenderContext::acquire`] yields no frame until the window is restored.

use std::fmt;

use super::texture::DepthTexture;
use crate::options::DisplayOptions;

/// GPU bring-up or frame acquisition failure.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle cannot back a surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused a device with default limits.
    Device(wgpu::RequestDeviceError),
    /// The surface reports no texture formats for this adapter.
    NoSurfaceFormat,
    /// The swapchain could not hand out a texture and reconfiguring will
    /// not help.
    Acquire(wgpu::SurfaceError),
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create window surface: {e}"),
            Self::Adapter(e) => write!(f, "no adapter for surface: {e}"),
            Self::Device(e) => write!(f, "cannot open device: {e}"),
            Self::NoSurfaceFormat => f.write_str("surface has no formats"),
            Self::Acquire(e) => write!(f, "cannot acquire frame: {e}"),
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Adapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::Acquire(e) => Some(e),
            Self::NoSurfaceFormat => None,
        }
    }
}

/// Present mode for the display settings.
#[must_use]
pub fn present_mode(display: &DisplayOptions) -> wgpu::PresentMode {
    if display.vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

/// Frames the swapchain may queue ahead of the display. A capped frame
/// rate keeps a single frame in flight.
#[must_use]
pub fn frame_latency(display: &DisplayOptions) -> u32 {
    if display.target_fps > 0 {
        1
    } else {
        2
    }
}

/// First sRGB format in `formats`, else the first one listed.
#[must_use]
pub fn pick_format(
    formats: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

/// A swapchain texture being recorded this frame.
pub struct Frame {
    output: wgpu::SurfaceTexture,
    /// Color view of the swapchain texture.
    pub view: wgpu::TextureView,
    /// Encoder for this frame's passes.
    pub encoder: wgpu::CommandEncoder,
}

/// Device, queue and window surface, plus the depth texture matching the
/// surface size.
pub struct RenderContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTexture,
    minimised: bool,
}

impl RenderContext {
    /// Open a device that can present to `window` and configure its surface
    /// at `initial_size` with the pacing in `display`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] if the surface, adapter or device
    /// cannot be created, or the surface has no formats.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        display: &DisplayOptions,
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::Surface)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::Adapter)?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Tileview Device"),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::Device)?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats)
            .ok_or(RenderContextError::NoSurfaceFormat)?;
        let (width, height) = (initial_size.0.max(1), initial_size.1.max(1));
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: present_mode(display),
            desired_maximum_frame_latency: frame_latency(display),
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: Vec::new(),
        };
        surface.configure(&device, &config);
        log::info!(
            "{} presenting {format:?} at {width}x{height} ({:?})",
            adapter.get_info().name,
            config.present_mode
        );

        let depth = DepthTexture::new(&device, width, height);
        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth,
            minimised: false,
        })
    }

    /// The surface texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Depth attachment matching the surface.
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth.view
    }

    /// Follow the window size. A zero dimension marks the window minimised
    /// and leaves the surface and depth texture untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.minimised = width == 0 || height == 0;
        if self.minimised || self.size() == (width, height) {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth = DepthTexture::new(&self.device, width, height);
    }

    /// Next swapchain texture with a fresh encoder, or `None` when nothing
    /// should be drawn this frame (minimised window, lost or outdated
    /// surface, timeout). A lost surface is reconfigured for the next call.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError::Acquire`] when the device is out of
    /// memory or the surface failed for another reason.
    pub fn acquire(&self) -> Result<Option<Frame>, RenderContextError> {
        if self.minimised {
            return Ok(None);
        }
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(None);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timed out, skipping frame");
                return Ok(None);
            }
            Err(e) => return Err(RenderContextError::Acquire(e)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            },
        );
        Ok(Some(Frame {
            output,
            view,
            encoder,
        }))
    }

    /// Submit the frame's commands and show it.
    pub fn present(&self, frame: Frame) {
        let _ = self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.output.present();
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use wgpu::TextureFormat;

    use super::*;

    #[test]
    fn vsync_selects_present_mode() {
        let mut display = DisplayOptions::default();
        assert_eq!(present_mode(&display), wgpu::PresentMode::AutoVsync);
        display.vsync = false;
        assert_eq!(present_mode(&display), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn capped_frame_rate_keeps_one_frame_in_flight() {
        let mut display = DisplayOptions::default();
        assert_eq!(frame_latency(&display), 2);
        display.target_fps = 30;
        assert_eq!(frame_latency(&display), 1);
    }

    #[test]
    fn srgb_format_preferred() {
        let formats =
            [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_format(&formats), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(
            pick_format(&[TextureFormat::Rgba16Float]),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(pick_format(&[]), None);
    }

    #[test]
    fn acquire_error_keeps_cause() {
        let err = RenderContextError::Acquire(wgpu::SurfaceError::OutOfMemory);
        assert!(err.to_string().starts_with("cannot acquire frame"));
        assert!(err.source().is_some());
        assert!(RenderContextError::NoSurfaceFormat.source().is_none());
    }
}
