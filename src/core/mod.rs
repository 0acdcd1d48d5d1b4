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

//! Rendering core
//!
//! Everything needed to turn a scene into pixels without a window:
//!
//! - [`math`]: vectors and row-vector matrices
//! - [`raster`]: frame buffer, geometry stage, clipping and the CPU fill
//! - [`texture`]: 2D textures, cube maps and the skybox pass
//! - [`gpu`]: the wgpu compute rasterizer
//! - [`scene`]: objects, meshes, models and the backend seam
//! - [`renderer`]: per-frame orchestration across both backends
//! - [`camera`], [`config`], [`error`]: supporting types

pub mod camera;
pub mod config;
pub mod error;
pub mod gpu;
pub mod math;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod texture;
