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

//! Frontend module
//!
//! Window, presentation and overlay for the renderer. It uses winit for the
//! window, wgpu to show the frame and egui for the UI.
//!
//! # Architecture
//!
//! - [`Application`]: event loop handler owning the renderer and scene
//! - [`renderer`]: presentation context and the frame display pass
//! - [`ui`]: egui menu, status bar and panels
//! - [`input`]: key bindings for the fly camera
//! - [`frame_timer`]: frame pacing and frame time
//! - [`demo`]: start-up scene
//!
//! # Example
//!
//! ```no_run
//! use winit::event_loop::EventLoop;
//! use twinraster::core::config::RenderConfig;
//! use twinraster::frontend::Application;
//!
//! let event_loop = EventLoop::new().unwrap();
//! let mut app = Application::new(RenderConfig::default(), None);
//! event_loop.run_app(&mut app).unwrap();
//! ```

pub mod app;
pub mod demo;
pub mod frame_timer;
pub mod input;
pub mod renderer;
pub mod ui;
#[cfg(test)]
mod tests;

pub use app::Application;
pub use frame_timer::FrameTimer;
pub use input::{CameraAction, InputHandler};
pub use renderer::RenderContext;
