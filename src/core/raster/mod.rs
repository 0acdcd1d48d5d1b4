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

//! CPU rasterization and the shared geometry stage
//!
//! Primitives flow through this module in a fixed order:
//!
//! ```text
//! model-space triangle
//!   → Pipeline (lighting, view transform, near clip, projection, viewport, cull)
//!   → ScreenTriangle
//!   → Rasterizer::fill_triangle (CPU) or the compute kernel (GPU)
//!   → FrameBuffer::write_pixel (depth test)
//! ```
//!
//! The geometry stage is shared by both backends; only the fill differs.

pub mod background;
pub mod clip;
pub mod color;
pub mod framebuffer;
pub mod lighting;
pub mod pipeline;
pub mod rasterizer;
pub mod shader;
pub mod vertex;

#[cfg(test)]
mod tests;

pub use background::{StarField, SPACE_COLOR};
pub use clip::{clip_line, clip_triangle, ClippedTriangles};
pub use framebuffer::{FrameBuffer, DEPTH_FAR};
pub use lighting::{face_normal, Light};
pub use pipeline::{FrameStats, Pipeline, ScreenLine, ScreenTriangle};
pub use rasterizer::Rasterizer;
pub use shader::{FrameContext, PassThrough, PixelShader, SolidColor, Unshaded, VertexShader, WorldViewProjection};
pub use vertex::{Pixel, Vertex};
