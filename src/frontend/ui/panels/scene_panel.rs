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

//! Scene panel
//!
//! Lists top-level objects and edits their transforms. Setters go through
//! [`Transform`](crate::core::scene::Transform) so the cached world matrix is
//! invalidated.

use super::render_panel::edit_vec3;
use crate::core::scene::{ObjectHandle, ObjectManager};

pub fn render_scene_panel(ctx: &egui::Context, objects: &mut ObjectManager) {
    let mut removed: Option<ObjectHandle> = None;

    egui::SidePanel::right("scene_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Scene");
            ui.label(format!(
                "{} objects, {} triangles",
                objects.len(),
                objects.triangle_count()
            ));
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (handle, object) in objects.iter_mut() {
                    ui.push_id(handle, |ui| {
                        let triangles = object.triangle_count();
                        egui::CollapsingHeader::new(object.name().to_string())
                            .default_open(false)
                            .show(ui, |ui| {
                                ui.label(format!("{} triangles", triangles));
                                let transform = object.transform_mut();

                                let mut visible = transform.is_visible();
                                if ui.checkbox(&mut visible, "Visible").changed() {
                                    transform.set_visible(visible);
                                }

                                let mut position = transform.position();
                                ui.horizontal(|ui| {
                                    ui.label("Position");
                                    if edit_vec3(ui, &mut position, 0.05) {
                                        transform.set_position(position);
                                    }
                                });

                                let mut rotation = transform.rotation();
                                ui.horizontal(|ui| {
                                    ui.label("Rotation");
                                    if edit_vec3(ui, &mut rotation, 1.0) {
                                        transform.set_rotation(rotation);
                                    }
                                });

                                let mut scale = transform.scale();
                                ui.horizontal(|ui| {
                                    ui.label("Scale");
                                    if edit_vec3(ui, &mut scale, 0.01) {
                                        transform.set_scale(scale);
                                    }
                                });

                                if ui.button("Remove").clicked() {
                                    removed = Some(handle);
                                }
                            });
                    });
                }
            });
        });

    if let Some(handle) = removed {
        if let Some(object) = objects.remove(handle) {
            log::info!("Removed '{}' from the scene", object.name());
        }
    }
}
