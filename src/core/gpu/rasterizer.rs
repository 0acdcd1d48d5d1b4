// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! wgpu device, compute pipeline and buffers

use super::batch::{BatchQueue, DispatchParams, GpuLine, GpuTriangle};
use crate::core::error::{RenderError, Result};
use crate::core::math::Vec3;
use crate::core::raster::{FrameBuffer, FrameStats, ScreenLine, ScreenTriangle};
use crate::core::texture::{TextureHandle, TextureStore};

/// Workgroup edge length; must match `@workgroup_size` in the kernel
pub const WORKGROUP_SIZE: u32 = 16;

/// Storage buffer that grows to the largest upload seen so far
struct GrowableBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> Self {
        Self {
            label,
            buffer: Self::create(device, label, capacity),
            capacity,
        }
    }

    fn create(device: &wgpu::Device, label: &'static str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload `data`, reallocating first if it does not fit
    ///
    /// Empty uploads leave the buffer as is; the kernel reads nothing from it
    /// when the matching count is zero.
    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[u8]) {
        let size = data.len() as u64;
        if size > self.capacity {
            let capacity = size.next_power_of_two();
            log::debug!("Growing {} to {} bytes", self.label, capacity);
            self.buffer = Self::create(device, self.label, capacity);
            self.capacity = capacity;
        }
        if size > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }
    }
}

/// Colour and depth targets plus their readback copies
struct Targets {
    width: u32,
    height: u32,
    pixels: wgpu::Buffer,
    depth: wgpu::Buffer,
    pixels_staging: wgpu::Buffer,
    depth_staging: wgpu::Buffer,
}

impl Targets {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = (width.max(1) as u64) * (height.max(1) as u64) * 4;
        let storage = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::STORAGE
                    | wgpu::BufferUsages::COPY_SRC
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let staging = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        Self {
            width,
            height,
            pixels: storage("Raster Colour Buffer"),
            depth: storage("Raster Depth Buffer"),
            pixels_staging: staging("Raster Colour Staging Buffer"),
            depth_staging: staging("Raster Depth Staging Buffer"),
        }
    }

    fn byte_size(&self) -> u64 {
        self.width as u64 * self.height as u64 * 4
    }
}

/// Compute-shader rasterizer
///
/// Owns its own headless device, independent of any window surface.
///
/// # Examples
///
/// ```no_run
/// use twinraster::core::gpu::GpuRasterizer;
/// use twinraster::core::math::Vec3;
/// use twinraster::core::raster::{FrameBuffer, FrameStats};
/// use twinraster::core::texture::TextureStore;
///
/// let mut gpu = GpuRasterizer::new()?;
/// let mut fb = FrameBuffer::new(320, 240);
/// let mut stats = FrameStats::default();
///
/// gpu.begin_frame();
/// // queue triangles and lines here
/// gpu.render(&mut fb, &TextureStore::new(), Vec3::ONE, &mut stats)?;
/// # Ok::<(), twinraster::RenderError>(())
/// ```
pub struct GpuRasterizer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_name: String,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    params: wgpu::Buffer,
    triangles: GrowableBuffer,
    lines: GrowableBuffer,
    texels: GrowableBuffer,
    targets: Option<Targets>,
    batches: BatchQueue,
}

impl GpuRasterizer {
    /// Create a rasterizer on the default high-performance adapter
    ///
    /// # Errors
    ///
    /// [`RenderError::GpuInit`] if no adapter or device is available, or if
    /// the kernel fails validation.
    pub fn new() -> Result<Self> {
        pollster::block_on(Self::new_async())
    }

    pub async fn new_async() -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::GpuInit(format!("No suitable GPU adapter: {}", e)))?;
        let adapter_name = adapter.get_info().name;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Raster Compute Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| RenderError::GpuInit(format!("Failed to create device: {}", e)))?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Raster Compute Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rasterize.wgsl").into()),
        });

        let storage = |binding, read_only| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Raster Bind Group Layout"),
            entries: &[
                // Colour (read-write)
                storage(0, false),
                // Depth (read-write)
                storage(1, false),
                // Triangles
                storage(2, true),
                // Lines
                storage(3, true),
                // Texels
                storage(4, true),
                // Dispatch parameters
                wgpu::BindGroupLayoutEntry {
                    binding: 5,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Raster Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Raster Compute Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("rasterize"),
            compilation_options: Default::default(),
            cache: None,
        });

        if let Some(error) = device.pop_error_scope().await {
            return Err(RenderError::GpuInit(format!(
                "Compute pipeline failed validation: {}",
                error
            )));
        }

        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Raster Params Uniform Buffer"),
            size: std::mem::size_of::<DispatchParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Minimum sizes of one record each, so every binding is valid
        let triangles = GrowableBuffer::new(
            &device,
            "Raster Triangle Buffer",
            std::mem::size_of::<GpuTriangle>() as u64,
        );
        let lines = GrowableBuffer::new(
            &device,
            "Raster Line Buffer",
            std::mem::size_of::<GpuLine>() as u64,
        );
        let texels = GrowableBuffer::new(&device, "Raster Texel Buffer", 4);

        log::info!("GPU rasterizer initialized on {}", adapter_name);

        Ok(Self {
            device,
            queue,
            adapter_name,
            pipeline,
            bind_group_layout,
            params,
            triangles,
            lines,
            texels,
            targets: None,
            batches: BatchQueue::new(),
        })
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    /// Forget every primitive queued for the previous frame
    pub fn begin_frame(&mut self) {
        self.batches.clear();
    }

    pub fn submit_triangle(&mut self, triangle: &ScreenTriangle, texture: Option<TextureHandle>) {
        self.batches.push_triangle(triangle, texture);
    }

    pub fn submit_line(&mut self, line: &ScreenLine) {
        self.batches.push_line(line);
    }

    pub fn batches(&self) -> &BatchQueue {
        &self.batches
    }

    /// Draw every queued batch into `fb`
    ///
    /// The frame buffer's current contents are the starting point, so the
    /// background and anything drawn on the CPU beforehand are kept.
    ///
    /// # Arguments
    ///
    /// * `fb` - Read as the initial target and overwritten with the result
    /// * `textures` - Resolves the texture of each batch; a missing handle
    ///   falls back to vertex colour
    /// * `light_color` - Per-channel light tint
    /// * `stats` - Batch and dispatch counters are added here
    ///
    /// # Errors
    ///
    /// [`RenderError::GpuReadback`] if the result cannot be mapped.
    pub fn render(
        &mut self,
        fb: &mut FrameBuffer,
        textures: &TextureStore,
        light_color: Vec3,
        stats: &mut FrameStats,
    ) -> Result<()> {
        let (width, height) = (fb.width(), fb.height());
        if width == 0 || height == 0 {
            return Ok(());
        }
        if self.batches.is_empty() {
            log::trace!("No GPU batches this frame");
            return Ok(());
        }

        self.prepare_targets(width, height);
        let Some(targets) = self.targets.as_ref() else {
            return Ok(());
        };
        self.queue
            .write_buffer(&targets.pixels, 0, bytemuck::cast_slice(fb.pixels()));
        self.queue
            .write_buffer(&targets.depth, 0, bytemuck::cast_slice(fb.depths()));

        let base = DispatchParams::new(width, height, light_color);
        let mut dispatched = 0;

        let textured: Vec<(TextureHandle, Vec<GpuTriangle>)> = self
            .batches
            .textured()
            .map(|(handle, triangles)| (handle, triangles.to_vec()))
            .collect();
        for (handle, triangles) in &textured {
            let mut params = DispatchParams {
                triangle_count: triangles.len() as u32,
                ..base
            };
            match textures.get(*handle) {
                Some(texture) => {
                    params.texture_width = texture.width();
                    params.texture_height = texture.height();
                    params.use_texture = 1;
                    self.dispatch(&params, triangles, &[], texture.pixels())?;
                }
                None => {
                    log::warn!("Texture {:?} missing, drawing batch untextured", handle);
                    self.dispatch(&params, triangles, &[], &[0])?;
                }
            }
            dispatched += 1;
        }

        // Solid triangles and all lines go last
        let solid = self.batches.solid().to_vec();
        let lines = self.batches.lines().to_vec();
        if !solid.is_empty() || !lines.is_empty() {
            let params = DispatchParams {
                triangle_count: solid.len() as u32,
                line_count: lines.len() as u32,
                ..base
            };
            self.dispatch(&params, &solid, &lines, &[0])?;
            dispatched += 1;
        }

        stats.gpu_batches += self.batches.batch_count() as u32;
        stats.gpu_dispatches += dispatched;

        self.read_back(fb)
    }

    fn prepare_targets(&mut self, width: u32, height: u32) {
        let stale = self
            .targets
            .as_ref()
            .is_none_or(|t| t.width != width || t.height != height);
        if stale {
            log::debug!("Allocating GPU raster targets {}x{}", width, height);
            self.targets = Some(Targets::new(&self.device, width, height));
        }
    }

    /// Upload one batch and run the kernel over the whole frame
    fn dispatch(
        &mut self,
        params: &DispatchParams,
        triangles: &[GpuTriangle],
        lines: &[GpuLine],
        texels: &[u32],
    ) -> Result<()> {
        let Some(targets) = self.targets.as_ref() else {
            return Err(RenderError::GpuReadback("Targets not allocated".to_string()));
        };

        self.triangles
            .upload(&self.device, &self.queue, bytemuck::cast_slice(triangles));
        self.lines
            .upload(&self.device, &self.queue, bytemuck::cast_slice(lines));
        self.texels
            .upload(&self.device, &self.queue, bytemuck::cast_slice(texels));
        self.queue
            .write_buffer(&self.params, 0, bytemuck::cast_slice(&[*params]));

        // Bind group is rebuilt per dispatch since the input buffers may have grown
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Raster Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: targets.pixels.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: targets.depth.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.triangles.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: self.lines.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: self.texels.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: self.params.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Raster Compute Encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Raster Compute Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(
                params.width.div_ceil(WORKGROUP_SIZE),
                params.height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }
        self.queue.submit(std::iter::once(encoder.finish()));

        log::trace!(
            "Dispatched {} triangles, {} lines",
            params.triangle_count,
            params.line_count
        );
        Ok(())
    }

    /// Copy colour and depth back into `fb`
    fn read_back(&self, fb: &mut FrameBuffer) -> Result<()> {
        let Some(targets) = self.targets.as_ref() else {
            return Err(RenderError::GpuReadback("Targets not allocated".to_string()));
        };
        let size = targets.byte_size();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Raster Readback Encoder"),
            });
        encoder.copy_buffer_to_buffer(&targets.pixels, 0, &targets.pixels_staging, 0, size);
        encoder.copy_buffer_to_buffer(&targets.depth, 0, &targets.depth_staging, 0, size);
        self.queue.submit(std::iter::once(encoder.finish()));

        let (pixels, depths) = fb.buffers_mut();
        self.read_buffer(&targets.pixels_staging, pixels)?;
        self.read_buffer(&targets.depth_staging, depths)?;
        Ok(())
    }

    /// Map a staging buffer and copy its contents into `out`
    fn read_buffer<T: bytemuck::Pod>(&self, staging: &wgpu::Buffer, out: &mut [T]) -> Result<()> {
        let slice = staging.slice(..);
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .map_err(|e| RenderError::GpuReadback(format!("Device poll failed: {}", e)))?;

        match pollster::block_on(rx.receive()) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                return Err(RenderError::GpuReadback(format!("Buffer map failed: {}", e)));
            }
            None => {
                return Err(RenderError::GpuReadback(
                    "Map callback dropped without a result".to_string(),
                ));
            }
        }

        {
            let data = slice.get_mapped_range();
            out.copy_from_slice(bytemuck::cast_slice(&data[..]));
        }
        staging.unmap();
        Ok(())
    }
}

impl std::fmt::Debug for GpuRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuRasterizer")
            .field("adapter", &self.adapter_name)
            .field("queued_batches", &self.batches.batch_count())
            .finish_non_exhaustive()
    }
}
