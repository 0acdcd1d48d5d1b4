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

//! Menu bar panel
//!
//! File, View, Scene and Help menus.

use crate::frontend::ui::{UiAction, UiState};

/// Draw the top menu bar, returning any triggered action
#[allow(deprecated)] // egui::menu::bar is deprecated but still functional
pub fn render_menu_bar(ctx: &egui::Context, ui_state: &mut UiState, paused: bool) -> UiAction {
    let mut action = UiAction::None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Load Model...").clicked() {
                    action = UiAction::LoadModel;
                    ui.close();
                }
                if ui.button("Save Screenshot... (F12)").clicked() {
                    action = UiAction::SaveScreenshot;
                    ui.close();
                }
                ui.separator();
                if ui.button("Open Config File").clicked() {
                    action = UiAction::OpenConfig;
                    ui.close();
                }
                if ui.button("Save Key Bindings").clicked() {
                    action = UiAction::SaveKeyBindings;
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    action = UiAction::Exit;
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut ui_state.show_render_panel, "Render Panel");
                ui.checkbox(&mut ui_state.show_scene_panel, "Scene Panel");
                ui.separator();
                if ui.button("Toggle Fullscreen (F11)").clicked() {
                    action = UiAction::ToggleFullscreen;
                    ui.close();
                }
            });

            ui.menu_button("Scene", |ui| {
                let pause_text = if paused {
                    "Resume Animation (P)"
                } else {
                    "Pause Animation (P)"
                };
                if ui.button(pause_text).clicked() {
                    action = UiAction::TogglePause;
                    ui.close();
                }
                if ui.button("Reset Camera (F5)").clicked() {
                    action = UiAction::ResetCamera;
                    ui.close();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("Key Bindings").clicked() {
                    ui_state.show_key_bindings = true;
                    ui.close();
                }
                if ui.button("About").clicked() {
                    ui_state.show_about = true;
                    ui.close();
                }
            });
        });
    });

    action
}
