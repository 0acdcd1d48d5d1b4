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

//! Render settings panel
//!
//! Backend choice, layer toggles, the light and last frame's counters.

use crate::core::math::Vec3;
use crate::core::renderer::Renderer;
use crate::core::scene::BackendKind;
use crate::frontend::ui::UiAction;

/// Draw the render panel
///
/// Backend switches are returned as [`UiAction::SetBackend`]; everything
/// else is edited in place.
pub fn render_render_panel(ctx: &egui::Context, renderer: &mut Renderer) -> UiAction {
    let mut action = UiAction::None;

    egui::SidePanel::left("render_panel")
        .resizable(true)
        .default_width(230.0)
        .show(ctx, |ui| {
            ui.heading("Backend");
            let requested = renderer.requested_backend();
            let mut choice = requested;
            ui.horizontal(|ui| {
                ui.radio_value(&mut choice, BackendKind::Cpu, "CPU");
                ui.radio_value(&mut choice, BackendKind::Gpu, "GPU compute");
            });
            if choice != requested {
                action = UiAction::SetBackend(choice);
            }
            if let Some(name) = renderer.gpu_adapter_name() {
                ui.label(format!("Adapter: {}", name));
            }
            ui.separator();

            ui.heading("Layers");
            let settings = renderer.settings_mut();
            ui.checkbox(&mut settings.show_grid, "Grid");
            ui.checkbox(&mut settings.show_skybox, "Skybox");
            ui.checkbox(&mut settings.show_stars, "Stars");
            ui.separator();

            ui.heading("Light");
            let light = renderer.light_mut();
            ui.add(egui::Slider::new(&mut light.ambient, 0.0..=1.0).text("Ambient"));
            ui.horizontal(|ui| {
                ui.label("Direction");
                edit_vec3(ui, &mut light.direction, 0.02);
            });
            let mut color = [light.color.x, light.color.y, light.color.z];
            ui.horizontal(|ui| {
                ui.label("Colour");
                if ui.color_edit_button_rgb(&mut color).changed() {
                    light.color = Vec3::new(color[0], color[1], color[2]);
                }
            });
            ui.separator();

            ui.heading("Last Frame");
            let stats = *renderer.stats();
            egui::Grid::new("frame_stats")
                .striped(true)
                .num_columns(2)
                .show(ui, |ui| {
                    let rows = [
                        ("Submitted", stats.triangles_submitted),
                        ("Clipped", stats.triangles_clipped),
                        ("Culled", stats.triangles_culled),
                        ("Drawn", stats.triangles_drawn),
                        ("Lines", stats.lines_drawn),
                        ("GPU batches", stats.gpu_batches),
                        ("GPU dispatches", stats.gpu_dispatches),
                    ];
                    for (label, value) in rows {
                        ui.label(label);
                        ui.label(value.to_string());
                        ui.end_row();
                    }
                });
        });

    action
}

/// Three drag values side by side; returns whether any changed
pub fn edit_vec3(ui: &mut egui::Ui, value: &mut Vec3, speed: f64) -> bool {
    let mut changed = false;
    changed |= ui
        .add(egui::DragValue::new(&mut value.x).speed(speed).prefix("x "))
        .changed();
    changed |= ui
        .add(egui::DragValue::new(&mut value.y).speed(speed).prefix("y "))
        .changed();
    changed |= ui
        .add(egui::DragValue::new(&mut value.z).speed(speed).prefix("z "))
        .changed();
    changed
}
