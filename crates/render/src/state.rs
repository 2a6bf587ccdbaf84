use std::sync::Arc;

use anyhow::{Context, Result};
use compute::pipeline::FramePipeline;
use fractal::{AnimationConfig, FrameClock, FrameUniforms, RendererState, Resolution};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Everything the window needs to present frames: the wgpu surface, the shared
/// raymarching pipeline, and the animation state it feeds.
pub struct State {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    frame: FramePipeline,
    animation: AnimationConfig,
    renderer: RendererState,
    clock: FrameClock,
}

impl State {
    pub async fn new(window: Arc<Window>, animation: AnimationConfig) -> Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to get adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Renderer Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .context("failed to request device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let format = preferred_format(&surface_caps.formats)
            .context("surface reports no supported formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let resolution = Resolution::new(config.width, config.height)?;
        let frame = FramePipeline::new(&device, format);

        tracing::info!(
            adapter = %adapter.get_info().name,
            ?format,
            width = config.width,
            height = config.height,
            "window surface configured"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            frame,
            animation,
            renderer: RendererState::new(resolution),
            clock: FrameClock::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn renderer_state(&self) -> &RendererState {
        &self.renderer
    }

    /// Reconfigures the surface and updates the viewport. Zero-sized requests
    /// (minimized windows) are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(resolution) = surface_resolution(new_size) else {
            tracing::debug!(?new_size, "ignoring zero-sized resize");
            return;
        };
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.renderer = self.renderer.resize(resolution);
    }

    /// Reapplies the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Advances the animation by the wall-clock time since the previous frame.
    pub fn update(&mut self) {
        let delta = self.clock.tick();
        self.renderer = self.renderer.advance(delta, &self.animation);
    }

    pub fn uniforms(&self) -> FrameUniforms {
        FrameUniforms::from(&self.renderer)
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.frame.write_uniforms(&self.queue, &self.uniforms());

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        self.frame.encode(&mut encoder, &view);
        self.queue.submit(Some(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Picks a linear surface format when one is offered.
///
/// The shader writes final display values, so an sRGB surface would brighten
/// the image a second time.
pub fn preferred_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| formats.first().copied())
}

/// The viewport for a window size, or `None` while the window has no area.
pub fn surface_resolution(size: PhysicalSize<u32>) -> Option<Resolution> {
    Resolution::new(size.width, size.height).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn linear_formats_are_preferred() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(preferred_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn srgb_only_surfaces_still_work() {
        let formats = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(preferred_format(&formats), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(preferred_format(&[]), None);
    }

    #[test]
    fn minimized_windows_have_no_viewport() {
        assert!(surface_resolution(PhysicalSize::new(0, 0)).is_none());
        assert!(surface_resolution(PhysicalSize::new(800, 0)).is_none());
        let res = surface_resolution(PhysicalSize::new(800, 600)).unwrap();
        assert_eq!((res.width, res.height), (800.0, 600.0));
    }
}
