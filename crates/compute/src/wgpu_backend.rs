//! GPU implementation of [`ComputeBackend`] built on [`wgpu`].
//!
//! Frames are drawn with the same full-screen pipeline as the windowed renderer,
//! but into an offscreen `Rgba8Unorm` texture that is copied back to host memory.
//! The texture and its readback buffer are cached and only rebuilt when the
//! requested resolution changes.

use crate::framebuffer::BYTES_PER_PIXEL;
use crate::pipeline::FramePipeline;
use crate::{ComputeBackend, ComputeError, Framebuffer};
use fractal::{FrameUniforms, Resolution};
use parking_lot::Mutex;

/// Linear 8-bit target, so the stored bytes match the CPU quantization.
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

struct OffscreenTarget {
    width: u32,
    height: u32,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    readback: wgpu::Buffer,
    padded_row_bytes: u32,
}

impl OffscreenTarget {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Offscreen Frame"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let padded_row_bytes = padded_row_bytes(width);
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Offscreen Readback"),
            size: u64::from(padded_row_bytes) * u64::from(height),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            width,
            height,
            texture,
            view,
            readback,
            padded_row_bytes,
        }
    }

    fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

/// Row pitch rounded up to the copy alignment wgpu requires.
#[allow(clippy::cast_possible_truncation)]
fn padded_row_bytes(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL as u32;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// GPU-backed implementation of [`ComputeBackend`].
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    frame: FramePipeline,
    target: Mutex<Option<OffscreenTarget>>,
}

impl WgpuBackend {
    /// Creates a backend on the system's default high-performance adapter.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::BackendUnavailable`] if no adapter is found and
    /// [`ComputeError::Device`] if the device request fails.
    pub fn new() -> Result<Self, ComputeError> {
        let instance = wgpu::Instance::default();
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: None,
        }))
        .ok_or_else(|| ComputeError::BackendUnavailable("no compatible adapter found".into()))?;

        let info = adapter.get_info();
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Headless Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
            },
            None,
        ))
        .map_err(|err| ComputeError::Device(err.to_string()))?;

        tracing::info!(adapter = %info.name, backend = ?info.backend, "wgpu backend ready");

        let frame = FramePipeline::new(&device, TARGET_FORMAT);
        Ok(Self {
            device,
            queue,
            frame,
            target: Mutex::new(None),
        })
    }

    fn read_back(&self, target: &OffscreenTarget) -> Result<Framebuffer, ComputeError> {
        let slice = target.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            // The receiver only goes away if this frame was abandoned.
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|err| ComputeError::Readback(err.to_string()))?
            .map_err(|err| ComputeError::Readback(err.to_string()))?;

        let mut frame = Framebuffer::new(target.width, target.height);
        {
            let mapped = slice.get_mapped_range();
            let row_bytes = frame.row_bytes();
            for (dst, src) in frame
                .as_bytes_mut()
                .chunks_exact_mut(row_bytes)
                .zip(mapped.chunks(target.padded_row_bytes as usize))
            {
                dst.copy_from_slice(&src[..row_bytes]);
            }
        }
        target.readback.unmap();
        Ok(frame)
    }
}

impl ComputeBackend for WgpuBackend {
    fn name(&self) -> &'static str {
        "wgpu"
    }

    fn dispatch(&self, uniforms: &FrameUniforms) -> Result<Framebuffer, ComputeError> {
        let (width, height) = uniforms.pixel_size();
        Resolution::new(width, height)?;
        let max = self.device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(ComputeError::ResolutionTooLarge { width, height, max });
        }

        let mut cached = self.target.lock();
        if cached.as_ref().is_some_and(|t| !t.matches(width, height)) {
            *cached = None;
        }
        let target = cached.get_or_insert_with(|| {
            tracing::debug!(width, height, "allocating offscreen target");
            OffscreenTarget::new(&self.device, width, height)
        });

        self.frame.write_uniforms(&self.queue, uniforms);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Headless Frame Encoder"),
            });
        self.frame.encode(&mut encoder, &target.view);
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &target.readback,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(target.padded_row_bytes),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(Some(encoder.finish()));

        let frame = self.read_back(target)?;
        tracing::debug!(width, height, iteration = uniforms.iteration, "gpu frame read back");
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_row_bytes(1), 256);
        assert_eq!(padded_row_bytes(64), 256);
        assert_eq!(padded_row_bytes(65), 512);
        assert_eq!(padded_row_bytes(640), 2560);
    }
}
