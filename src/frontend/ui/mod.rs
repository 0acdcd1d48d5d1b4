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

//! egui overlay
//!
//! Menu bar, status bar and the render and scene panels drawn over the
//! frame. Panels edit renderer settings and object transforms directly;
//! anything that needs the window, a file dialog or a new backend is returned
//! as a [`UiAction`] and handled by the application after the frame.

pub mod panels;

use crate::core::camera::Camera;
use crate::core::renderer::Renderer;
use crate::core::scene::{BackendKind, ObjectManager};
use crate::frontend::frame_timer::FrameTimer;
use crate::frontend::input::InputHandler;

/// Everything the overlay reads or edits during one frame
pub struct UiFrame<'a> {
    pub renderer: &'a mut Renderer,
    pub objects: &'a mut ObjectManager,
    pub camera: &'a Camera,
    pub frame_timer: &'a FrameTimer,
    pub input: &'a InputHandler,
    pub paused: bool,
}

/// Panel visibility
pub struct UiState {
    pub show_render_panel: bool,
    pub show_scene_panel: bool,
    pub show_about: bool,
    pub show_key_bindings: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            show_render_panel: true,
            show_scene_panel: true,
            show_about: false,
            show_key_bindings: false,
        }
    }

    /// Draw the whole overlay for one frame
    pub fn render(&mut self, ctx: &egui::Context, frame: UiFrame<'_>) -> UiAction {
        let mut action = UiAction::None;

        action = action.merge(panels::menu_bar::render_menu_bar(ctx, self, frame.paused));
        panels::status_bar::render_status_bar(ctx, &frame);

        if self.show_render_panel {
            action = action.merge(panels::render_panel::render_render_panel(ctx, frame.renderer));
        }
        if self.show_scene_panel {
            panels::scene_panel::render_scene_panel(ctx, frame.objects);
        }
        if self.show_about {
            self.render_about_dialog(ctx);
        }
        if self.show_key_bindings {
            self.render_key_bindings_dialog(ctx, frame.input);
        }

        // Frame shows through
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |_ui| {});

        action
    }

    fn render_about_dialog(&mut self, ctx: &egui::Context) {
        egui::Window::new("About twinraster")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("twinraster");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                ui.label("A real-time 3D renderer with matching CPU and");
                ui.label("GPU compute rasterizers.");
                ui.separator();
                ui.label("Licensed under the Apache License, Version 2.0");
                ui.separator();
                if ui.button("Close").clicked() {
                    self.show_about = false;
                }
            });
    }

    fn render_key_bindings_dialog(&mut self, ctx: &egui::Context, input: &InputHandler) {
        egui::Window::new("Key Bindings")
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Camera");
                egui::Grid::new("camera_bindings")
                    .striped(true)
                    .num_columns(2)
                    .show(ui, |ui| {
                        for (action, keys) in input.get_action_mappings() {
                            ui.label(action.to_string());
                            let keys = keys
                                .iter()
                                .map(|k| format!("{:?}", k))
                                .collect::<Vec<_>>()
                                .join(", ");
                            ui.label(keys);
                            ui.end_row();
                        }
                    });

                ui.separator();
                ui.heading("Application");
                ui.label("P:      Pause/Resume animation");
                ui.label("F5:     Reset camera");
                ui.label("F11:    Toggle fullscreen");
                ui.label("F12:    Screenshot");

                ui.separator();
                ui.label(format!("Bindings file: {}", input.config_path().display()));
                if ui.button("Close").clicked() {
                    self.show_key_bindings = false;
                }
            });
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Requests from the overlay, handled after the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    None,
    LoadModel,
    SaveScreenshot,
    TogglePause,
    ResetCamera,
    ToggleFullscreen,
    SetBackend(BackendKind),
    OpenConfig,
    SaveKeyBindings,
    Exit,
}

impl UiAction {
    /// Keep the first non-`None` action
    pub fn merge(self, other: UiAction) -> UiAction {
        match (self, other) {
            (UiAction::None, action) => action,
            (action, _) => action,
        }
    }
}
