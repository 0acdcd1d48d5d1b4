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

//! twinraster application
//!
//! Owns the window, the presentation context, the egui overlay and the
//! scene. Each frame the scene is updated, rasterized by the active backend
//! into the CPU frame buffer, uploaded and shown with the overlay on top.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::core::camera::Camera;
use crate::core::config::RenderConfig;
use crate::core::error::{RenderError, Result};
use crate::core::renderer::Renderer;
use crate::core::scene::{BackendKind, ObjectManager};
use crate::frontend::demo::{load_model, populate_demo_scene};
use crate::frontend::frame_timer::FrameTimer;
use crate::frontend::input::InputHandler;
use crate::frontend::renderer::{DisplayRenderer, RenderContext};
use crate::frontend::ui::{UiAction, UiFrame, UiState};

/// Windowed renderer
///
/// # Example
///
/// ```no_run
/// use winit::event_loop::EventLoop;
/// use twinraster::core::config::RenderConfig;
/// use twinraster::frontend::Application;
///
/// let event_loop = EventLoop::new().unwrap();
/// let mut app = Application::new(RenderConfig::default(), None);
/// event_loop.run_app(&mut app).unwrap();
/// ```
pub struct Application {
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    egui_ctx: egui::Context,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    display_renderer: Option<DisplayRenderer>,
    renderer: Renderer,
    objects: ObjectManager,
    camera: Camera,
    config: RenderConfig,
    /// Where `config` came from, for "Open Config File"
    config_path: Option<PathBuf>,
    frame_timer: FrameTimer,
    /// Scene animation paused; the camera still moves
    paused: bool,
    input_handler: InputHandler,
    ui_state: UiState,
    exit_requested: bool,
    screenshot_count: u32,
}

impl Application {
    /// Build the renderer and the start-up scene
    ///
    /// The window itself is created when the event loop resumes.
    pub fn new(config: RenderConfig, config_path: Option<PathBuf>) -> Self {
        let mut renderer = Renderer::new(&config);
        let mut objects = ObjectManager::new();

        if let Err(e) = populate_demo_scene(&mut renderer, &mut objects) {
            log::error!("Failed to build demo scene: {}", e);
        }
        if let Some(path) = &config.assets.model {
            if let Err(e) = load_model(&mut renderer, &mut objects, path) {
                log::error!("{}", e);
            }
        }

        Self {
            window: None,
            render_context: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            egui_renderer: None,
            display_renderer: None,
            renderer,
            objects,
            camera: config.camera(),
            frame_timer: FrameTimer::new(config.window.target_fps),
            config,
            config_path,
            paused: false,
            input_handler: InputHandler::new(),
            ui_state: UiState::new(),
            exit_requested: false,
            screenshot_count: 0,
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn objects(&self) -> &ObjectManager {
        &self.objects
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume scene animation
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!(
            "Animation {}",
            if self.paused { "paused" } else { "resumed" }
        );
    }

    /// Put the camera back where the configuration places it
    pub fn reset_camera(&mut self) {
        self.camera = self.config.camera();
        log::info!("Camera reset");
    }

    /// Request a backend, logging when it falls back
    pub fn set_backend(&mut self, kind: BackendKind) {
        let active = self.renderer.set_backend(kind);
        if active != kind {
            log::warn!("{} backend unavailable, staying on {}", kind, active);
        } else {
            log::info!("Switched to {} backend", active);
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
                log::info!("Switched to windowed mode");
            } else {
                window.set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
                log::info!("Switched to fullscreen mode");
            }
        }
    }

    /// Write the last frame to `path`
    pub fn save_screenshot(&self, path: &Path) {
        match self.renderer.save_screenshot(path) {
            Ok(()) => log::info!("Saved screenshot to {}", path.display()),
            Err(e) => log::error!("{}", e),
        }
    }

    /// F12: numbered file in the working directory
    fn quick_screenshot(&mut self) {
        self.screenshot_count += 1;
        let path = PathBuf::from(format!("screenshot_{:03}.png", self.screenshot_count));
        self.save_screenshot(&path);
    }

    fn handle_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::None => {}
            UiAction::LoadModel => self.open_model_dialog(),
            UiAction::SaveScreenshot => self.open_screenshot_dialog(),
            UiAction::TogglePause => self.toggle_pause(),
            UiAction::ResetCamera => self.reset_camera(),
            UiAction::ToggleFullscreen => self.toggle_fullscreen(),
            UiAction::SetBackend(kind) => self.set_backend(kind),
            UiAction::OpenConfig => self.open_config_file(),
            UiAction::SaveKeyBindings => match self.input_handler.save_config() {
                Ok(()) => log::info!(
                    "Saved key bindings to {}",
                    self.input_handler.config_path().display()
                ),
                Err(e) => log::error!("Failed to save key bindings: {}", e),
            },
            UiAction::Exit => {
                self.exit_requested = true;
                log::info!("Exit requested from UI");
            }
        }
    }

    fn open_model_dialog(&mut self) {
        let path = rfd::FileDialog::new()
            .add_filter("Wavefront OBJ", &["obj", "OBJ"])
            .set_title("Load model")
            .pick_file();

        if let Some(path) = path {
            if let Err(e) = load_model(&mut self.renderer, &mut self.objects, &path) {
                log::error!("{}", e);
            }
        }
    }

    fn open_screenshot_dialog(&mut self) {
        let path = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_title("Save screenshot")
            .set_file_name("twinraster.png")
            .save_file();

        if let Some(path) = path {
            self.save_screenshot(&path);
        }
    }

    /// Open the config file in the system editor, writing defaults first if
    /// it does not exist yet
    fn open_config_file(&self) {
        let Some(path) = &self.config_path else {
            log::info!("No config file in use; start with --config to pick one");
            return;
        };
        if !path.exists() {
            if let Err(e) = self.config.save(path) {
                log::error!("{}", e);
                return;
            }
        }
        if let Err(e) = open::that(path) {
            log::error!("Failed to open {}: {}", path.display(), e);
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("twinraster")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ))
            .with_resizable(true);

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| RenderError::Surface(format!("Failed to create window: {}", e)))?,
        );

        let render_context = pollster::block_on(RenderContext::new(&window))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &render_context.device,
            render_context.surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let fb = self.renderer.framebuffer();
        let display_renderer = DisplayRenderer::new(
            &render_context.device,
            render_context.surface_config.format,
            fb.width(),
            fb.height(),
        );

        self.window = Some(window);
        self.render_context = Some(render_context);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        self.display_renderer = Some(display_renderer);

        log::info!("Application initialized successfully");
        Ok(())
    }

    /// Rasterize, present and draw the overlay
    fn render(&mut self) -> Result<()> {
        // A failed compute frame has already dropped the renderer back to
        // the CPU; the next frame will draw normally
        if let Err(e) = self.renderer.render(&self.camera, &mut self.objects) {
            log::error!("Frame failed: {}", e);
        }

        let not_ready = |what: &str| RenderError::Surface(format!("{} not initialized", what));
        let window = self.window.as_ref().ok_or_else(|| not_ready("Window"))?;
        let render_context = self
            .render_context
            .as_mut()
            .ok_or_else(|| not_ready("Render context"))?;
        let egui_state = self
            .egui_state
            .as_mut()
            .ok_or_else(|| not_ready("egui state"))?;
        let egui_renderer = self
            .egui_renderer
            .as_mut()
            .ok_or_else(|| not_ready("egui renderer"))?;
        let display_renderer = self
            .display_renderer
            .as_mut()
            .ok_or_else(|| not_ready("Display renderer"))?;

        let output = match render_context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (width, height) = render_context.size();
                render_context.resize(width, height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout while acquiring frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(RenderError::Surface(
                    "Surface out of memory while acquiring frame".to_string(),
                ));
            }
            Err(e) => {
                return Err(RenderError::Surface(format!(
                    "Failed to get surface texture: {:?}",
                    e
                )));
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        display_renderer.update_frame(
            &render_context.device,
            &render_context.queue,
            self.renderer.framebuffer(),
        );

        let raw_input = egui_state.take_egui_input(window);
        let paused = self.paused;
        let mut ui_action = UiAction::None;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_action = self.ui_state.render(
                ctx,
                UiFrame {
                    renderer: &mut self.renderer,
                    objects: &mut self.objects,
                    camera: &self.camera,
                    frame_timer: &self.frame_timer,
                    input: &self.input_handler,
                    paused,
                },
            );
        });

        egui_state.handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(
                &render_context.device,
                &render_context.queue,
                *id,
                image_delta,
            );
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                render_context.surface_config.width,
                render_context.surface_config.height,
            ],
            pixels_per_point: window.scale_factor() as f32,
        };

        let mut encoder =
            render_context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Present Encoder"),
                });

        display_renderer.render_display(
            &mut encoder,
            &view,
            &render_context.queue,
            render_context.size(),
        );

        egui_renderer.update_buffers(
            &render_context.device,
            &render_context.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu 0.33 wants a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        render_context
            .queue
            .submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();

        self.handle_ui_action(ui_action);
        Ok(())
    }

    /// Application hotkeys; returns whether the key was consumed
    fn handle_hotkey(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::KeyP => self.toggle_pause(),
            KeyCode::F5 => self.reset_camera(),
            KeyCode::F11 => self.toggle_fullscreen(),
            KeyCode::F12 => self.quick_screenshot(),
            _ => return false,
        }
        true
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new(RenderConfig::default(), None)
    }
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                // The frame keeps its configured resolution and is letterboxed
                if let Some(render_context) = &mut self.render_context {
                    render_context.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::Focused(false) => {
                self.input_handler.release_all();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    let pressed = event.state.is_pressed();
                    if pressed && !event.repeat && self.handle_hotkey(key_code) {
                        return;
                    }
                    self.input_handler.handle_keyboard(key_code, pressed);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                    event_loop.exit();
                }
            }
            _ => {}
        }

        if self.exit_requested {
            log::info!("Exiting application");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.frame_timer.should_run_frame() {
            let dt = self.frame_timer.tick();
            self.input_handler
                .apply(&mut self.camera, dt, &self.config.camera);
            if !self.paused {
                self.objects.update_all(dt);
            }
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(
            self.frame_timer.next_frame_instant(),
        ));
    }
}
