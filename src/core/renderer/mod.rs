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

//! Frame orchestration
//!
//! [`Renderer`] owns the frame buffer, the texture store, the sky and both
//! rasterizers, and turns a camera plus a scene into one finished frame:
//!
//! 1. Build the [`FrameContext`] from the camera
//! 2. Clear to the star field (or flat space colour) and reset depth
//! 3. Submit the grid lines, then every visible object, through the active
//!    [`RenderBackend`]
//! 4. On the compute path, dispatch the queued batches and read back
//! 5. Fill the remaining background with the sky
//!
//! # Backend selection
//!
//! The compute rasterizer is created the first time the GPU backend is
//! requested. If that fails, or a later dispatch fails, the error is logged
//! once and the renderer stays on the CPU path for the rest of the session.

mod backends;
mod grid;

#[cfg(test)]
mod tests;

pub use backends::{ParallelBackend, ScalarBackend};
pub use grid::{Grid, GRID_COLOR, GRID_COLOR_DIM};

use std::path::Path;

use crate::core::camera::Camera;
use crate::core::config::{RenderConfig, RenderSettings};
use crate::core::error::Result;
use crate::core::gpu::GpuRasterizer;
use crate::core::raster::{
    FrameBuffer, FrameContext, FrameStats, Light, Pipeline, Rasterizer, StarField, SPACE_COLOR,
};
use crate::core::scene::{BackendKind, ObjectManager, RenderBackend, SceneContext};
use crate::core::texture::{Cubemap, Skybox, TextureStore};

/// Renders scenes into an owned [`FrameBuffer`]
pub struct Renderer {
    fb: FrameBuffer,
    pipeline: Pipeline,
    rasterizer: Rasterizer,
    gpu: Option<GpuRasterizer>,
    gpu_unavailable: bool,
    requested: BackendKind,
    textures: TextureStore,
    skybox: Option<Skybox>,
    stars: StarField,
    background: Vec<u32>,
    grid: Grid,
    settings: RenderSettings,
    light: Light,
    stats: FrameStats,
}

impl Renderer {
    /// Build a renderer from configuration
    ///
    /// Asset failures are logged and fall back to built-in defaults. The
    /// configured backend is requested through [`Renderer::set_backend`].
    pub fn new(config: &RenderConfig) -> Self {
        let (width, height) = (config.window.width, config.window.height);
        let mut textures = TextureStore::new();

        if let Some(path) = &config.assets.fallback_texture {
            match textures.load(path) {
                Ok(handle) => textures.set_fallback(Some(handle)),
                Err(e) => log::warn!("{}", e),
            }
        }

        let mut renderer = Self {
            fb: FrameBuffer::new(width, height),
            pipeline: Pipeline::default(),
            rasterizer: Rasterizer::new(),
            gpu: None,
            gpu_unavailable: false,
            requested: BackendKind::Cpu,
            textures,
            skybox: load_skybox(config),
            stars: config.stars,
            background: config.stars.render(width, height),
            grid: Grid::default(),
            settings: config.render.clone(),
            light: config.light,
            stats: FrameStats::default(),
        };
        renderer.set_backend(config.render.backend);
        log::info!(
            "Renderer ready: {}x{}, {} backend",
            width,
            height,
            renderer.active_backend()
        );
        renderer
    }

    /// Request a backend, returning the one actually in use
    pub fn set_backend(&mut self, kind: BackendKind) -> BackendKind {
        self.requested = kind;
        self.settings.backend = kind;
        if kind == BackendKind::Gpu && self.gpu.is_none() && !self.gpu_unavailable {
            match GpuRasterizer::new() {
                Ok(gpu) => {
                    log::info!("Compute rasterizer on {}", gpu.adapter_name());
                    self.gpu = Some(gpu);
                }
                Err(e) => {
                    log::error!("GPU backend unavailable, staying on CPU: {}", e);
                    self.gpu_unavailable = true;
                }
            }
        }
        self.active_backend()
    }

    pub fn requested_backend(&self) -> BackendKind {
        self.requested
    }

    pub fn active_backend(&self) -> BackendKind {
        match (self.requested, &self.gpu) {
            (BackendKind::Gpu, Some(_)) => BackendKind::Gpu,
            _ => BackendKind::Cpu,
        }
    }

    pub fn gpu_adapter_name(&self) -> Option<&str> {
        self.gpu.as_ref().map(GpuRasterizer::adapter_name)
    }

    /// Recreate the frame buffer and star field for a new size
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.fb.width(), self.fb.height()) {
            return;
        }
        self.fb.resize(width, height);
        self.background = self.stars.render(width, height);
    }

    /// Render one frame
    ///
    /// # Errors
    ///
    /// Only the compute path can fail, when its results cannot be read back.
    /// The GPU is dropped in that case and later frames use the CPU.
    pub fn render(&mut self, camera: &Camera, objects: &mut ObjectManager) -> Result<FrameStats> {
        let frame = camera.frame_context(self.fb.width(), self.fb.height(), self.light);
        self.stats = FrameStats::default();
        self.rasterizer.reset_stats();

        if self.settings.show_stars {
            self.fb.clear_with(&self.background);
        } else {
            self.fb.clear(SPACE_COLOR);
        }

        let grid = self.settings.show_grid.then_some(&self.grid);
        let environment = self.skybox.as_ref().map(Skybox::cubemap);
        let ctx = SceneContext::new(&frame, &self.textures).with_environment(environment);

        let active = self.active_backend();
        match (active, self.gpu.as_mut()) {
            (BackendKind::Gpu, Some(gpu)) => {
                gpu.begin_frame();
                let mut backend =
                    ParallelBackend::new(&self.pipeline, gpu, &frame, &mut self.stats);
                draw_scene(&mut backend, &ctx, objects, grid);

                if let Err(e) =
                    gpu.render(&mut self.fb, &self.textures, frame.light.color, &mut self.stats)
                {
                    log::error!("Compute frame failed, switching to CPU: {}", e);
                    self.gpu = None;
                    self.gpu_unavailable = true;
                    return Err(e);
                }
            }
            _ => {
                let mut backend = ScalarBackend::new(
                    &self.pipeline,
                    &mut self.rasterizer,
                    &mut self.fb,
                    &frame,
                    &self.textures,
                    &mut self.stats,
                );
                draw_scene(&mut backend, &ctx, objects, grid);
            }
        }

        if self.settings.show_skybox {
            if let Some(skybox) = &self.skybox {
                skybox.render(&mut self.fb, &frame);
            }
        }

        log::trace!("Frame done: {:?}", self.stats);
        Ok(self.stats)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureStore {
        &mut self.textures
    }

    /// Counters from the last frame
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Toggles take effect on the next frame
    ///
    /// The backend field is ignored here, see [`Renderer::set_backend`].
    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn light_mut(&mut self) -> &mut Light {
        &mut self.light
    }

    pub fn skybox(&self) -> Option<&Skybox> {
        self.skybox.as_ref()
    }

    pub fn set_skybox(&mut self, skybox: Option<Skybox>) {
        self.skybox = skybox;
    }

    /// Frame context the next frame would use, for tools and tests
    pub fn frame_context(&self, camera: &Camera) -> FrameContext {
        camera.frame_context(self.fb.width(), self.fb.height(), self.light)
    }

    /// Write the last frame to an image file
    pub fn save_screenshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.fb.save_png(path)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("width", &self.fb.width())
            .field("height", &self.fb.height())
            .field("requested", &self.requested)
            .field("active", &self.active_backend())
            .field("textures", &self.textures.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

fn draw_scene(
    backend: &mut dyn RenderBackend,
    ctx: &SceneContext<'_>,
    objects: &mut ObjectManager,
    grid: Option<&Grid>,
) {
    if let Some(grid) = grid {
        grid.submit(backend);
    }
    objects.render_all(ctx, backend);
}

/// Configured face images, else the built-in gradient
fn load_skybox(config: &RenderConfig) -> Option<Skybox> {
    if let Some(faces) = &config.assets.skybox {
        match Cubemap::load(faces.clone()) {
            Ok(cubemap) => return Some(Skybox::new(cubemap)),
            Err(e) => log::warn!("Skybox faces unavailable, using gradient: {}", e),
        }
    }
    match Skybox::procedural(config.render.skybox_size) {
        Ok(skybox) => Some(skybox),
        Err(e) => {
            log::warn!("No skybox: {}", e);
            None
        }
    }
}
