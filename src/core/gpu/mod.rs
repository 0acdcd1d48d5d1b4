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

//! GPU compute rasterizer
//!
//! This module fills the same screen-space primitives as the CPU
//! [`Rasterizer`](crate::core::raster::Rasterizer), but on the GPU through a
//! wgpu compute pipeline.
//!
//! # Frame flow
//!
//! 1. [`GpuRasterizer::begin_frame`] empties the batch queue
//! 2. Screen triangles and lines are queued; triangles are grouped by texture
//! 3. [`GpuRasterizer::render`] uploads the current frame buffer, then runs one
//!    compute dispatch per texture batch and a final one for solid triangles
//!    and lines, each in its own submission
//! 4. Colour and depth are copied to staging buffers, mapped and written back
//!    into the [`FrameBuffer`](crate::core::raster::FrameBuffer)
//!
//! Consecutive submissions on one queue execute in order, so each batch sees
//! the depth written by the previous one.
//!
//! # Kernel
//!
//! The kernel runs one invocation per pixel (16×16 workgroups). Each
//! invocation tests every primitive of the batch against its own pixel, so
//! writes never race. A kernel that ran one invocation per triangle would
//! need an atomic depth test instead.
//!
//! Coverage, interpolation and colour rules are the CPU rules, written in
//! WGSL. Depth ties between primitives in different batches can resolve
//! differently from the CPU path, which draws strictly in submission order.

mod batch;
mod rasterizer;
#[cfg(test)]
mod tests;

pub use batch::{BatchQueue, DispatchParams, GpuLine, GpuTriangle, GpuVertex};
pub use rasterizer::{GpuRasterizer, WORKGROUP_SIZE};
