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

//! Shader stages and per-frame state
//!
//! # Frame context
//!
//! [`FrameContext`] carries everything that is constant for one frame: view
//! and projection matrices, camera position, near plane, light and viewport.
//! It is built once by the renderer and passed by shared reference to every
//! stage. The world matrix changes per draw call and is passed alongside it.
//!
//! # Vertex stage
//!
//! A [`VertexShader`] runs in two steps so that near-plane clipping can sit
//! between them:
//!
//! 1. [`to_view`](VertexShader::to_view): model space to view space
//! 2. [`project`](VertexShader::project): view space to NDC, including the
//!    perspective divide
//!
//! # Pixel stage
//!
//! A [`PixelShader`] may rewrite the colour of a [`Pixel`]. Lines pass their
//! colour through it before drawing.

use super::lighting::Light;
use super::vertex::{Pixel, Vertex};
use crate::core::math::{Mat4, Vec3, Vec4};

/// Smallest |w| used as a perspective divisor
pub const W_EPSILON: f32 = 1e-5;

/// Immutable per-frame state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub view: Mat4,
    pub projection: Mat4,
    /// World-space camera position
    pub camera_position: Vec3,
    /// View-space distance of the near clipping plane
    pub near_plane: f32,
    pub light: Light,
    pub width: u32,
    pub height: u32,
}

impl FrameContext {
    /// Frame with identity matrices, useful for drawing in NDC directly
    pub fn identity(width: u32, height: u32) -> Self {
        Self {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            camera_position: Vec3::ZERO,
            near_plane: 0.1,
            light: Light::default(),
            width,
            height,
        }
    }

    /// Viewport mapping from NDC to integer pixel coordinates
    ///
    /// `x = trunc((x + 1) * width / 2)`, `y = trunc((1 - y) * height / 2)`.
    /// Depth, colour and UV pass through.
    #[inline]
    pub fn to_screen(&self, v: &Vertex) -> Vertex {
        let half_w = self.width as f32 * 0.5;
        let half_h = self.height as f32 * 0.5;
        Vertex {
            position: Vec4::new(
                ((v.position.x + 1.0) * half_w).trunc(),
                ((1.0 - v.position.y) * half_h).trunc(),
                v.position.z,
                1.0,
            ),
            ..*v
        }
    }
}

/// Vertex transform strategy
pub trait VertexShader: Send + Sync {
    /// Model space to view space
    fn to_view(&self, vertex: &Vertex, world: &Mat4, frame: &FrameContext) -> Vertex;

    /// View space to NDC
    fn project(&self, vertex: &Vertex, frame: &FrameContext) -> Vertex;

    /// Whether geometry is clipped against the near plane between the two steps
    fn clips_near_plane(&self) -> bool {
        true
    }
}

/// Standard world → view → projection transform
#[derive(Debug, Default, Clone, Copy)]
pub struct WorldViewProjection;

impl VertexShader for WorldViewProjection {
    fn to_view(&self, vertex: &Vertex, world: &Mat4, frame: &FrameContext) -> Vertex {
        vertex.transformed(&(*world * frame.view))
    }

    fn project(&self, vertex: &Vertex, frame: &FrameContext) -> Vertex {
        let clip = vertex.transformed(&frame.projection);
        let p = clip.position;
        let w = if p.w.abs() < W_EPSILON {
            W_EPSILON.copysign(p.w)
        } else {
            p.w
        };
        Vertex {
            position: Vec4::new(p.x / w, p.y / w, p.z / w, 1.0),
            ..clip
        }
    }
}

/// Leaves vertices untouched
///
/// Input is treated as NDC already. Near clipping is skipped because there is
/// no view space to clip in.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl VertexShader for PassThrough {
    fn to_view(&self, vertex: &Vertex, _world: &Mat4, _frame: &FrameContext) -> Vertex {
        *vertex
    }

    fn project(&self, vertex: &Vertex, _frame: &FrameContext) -> Vertex {
        *vertex
    }

    fn clips_near_plane(&self) -> bool {
        false
    }
}

/// Pixel colour strategy
pub trait PixelShader: Send + Sync {
    fn shade(&self, pixel: Pixel) -> Pixel {
        pixel
    }
}

/// Keeps the incoming colour
#[derive(Debug, Default, Clone, Copy)]
pub struct Unshaded;

impl PixelShader for Unshaded {}

/// Replaces every colour with a constant
#[derive(Debug, Clone, Copy)]
pub struct SolidColor(pub u32);

impl PixelShader for SolidColor {
    fn shade(&self, pixel: Pixel) -> Pixel {
        Pixel {
            color: self.0,
            ..pixel
        }
    }
}
