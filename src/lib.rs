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

//! twinraster: a real-time 3D renderer with two rasterizers
//!
//! One geometry pipeline (transform, near-plane clip, project, cull) feeds
//! either a scalar CPU fill or a wgpu compute-shader fill. Both produce the
//! same pixels for the same scene.
//!
//! # Architecture
//!
//! - [`core`]: the renderer itself, usable headless
//! - [`frontend`]: winit window, wgpu presentation and the egui overlay
//!
//! # Example
//!
//! ```no_run
//! use twinraster::core::camera::Camera;
//! use twinraster::core::config::RenderConfig;
//! use twinraster::core::renderer::Renderer;
//! use twinraster::core::scene::{MaterialMesh, ObjectManager};
//!
//! let config = RenderConfig::default();
//! let mut renderer = Renderer::new(&config);
//! let mut objects = ObjectManager::new();
//! objects.add(Box::new(MaterialMesh::cube("cube")));
//!
//! renderer.render(&Camera::default(), &mut objects)?;
//! renderer.save_screenshot("frame.png")?;
//! # Ok::<(), twinraster::RenderError>(())
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`core::error::Result<T>`], an alias for
//! `Result<T, RenderError>`.

pub mod core;
pub mod frontend;

// Re-export commonly used types
pub use core::error::{RenderError, Result};
