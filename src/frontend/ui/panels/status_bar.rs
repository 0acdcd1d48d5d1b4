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

//! Status bar panel
//!
//! FPS, frame time, active backend, triangle counts and camera position.

use crate::frontend::ui::UiFrame;

pub fn render_status_bar(ctx: &egui::Context, frame: &UiFrame<'_>) {
    let stats = frame.renderer.stats();
    let requested = frame.renderer.requested_backend();
    let active = frame.renderer.active_backend();

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("FPS: {:.1}", frame.frame_timer.fps()));
            ui.separator();

            ui.label(format!("Frame: {:.2}ms", frame.frame_timer.frame_time_ms()));
            ui.separator();

            if requested == active {
                ui.label(format!("Backend: {}", active));
            } else {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!("Backend: {} ({} unavailable)", active, requested),
                );
            }
            ui.separator();

            ui.label(format!(
                "Triangles: {} drawn / {} in scene",
                stats.triangles_drawn,
                frame.objects.triangle_count()
            ));
            ui.separator();

            let p = frame.camera.position;
            ui.label(format!("Camera: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
            ui.separator();

            if frame.paused {
                ui.colored_label(egui::Color32::YELLOW, "⏸ PAUSED");
            } else {
                ui.colored_label(egui::Color32::GREEN, "▶ RUNNING");
            }
        });
    });
}
