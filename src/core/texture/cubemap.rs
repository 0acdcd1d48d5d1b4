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

//! Cube maps
//!
//! # Face selection
//!
//! The component of the direction with the largest magnitude picks the axis.
//! Ties go to X, then Y, then Z. The sign of that component picks the face.
//!
//! # Face coordinates
//!
//! Each face maps the direction to `(ma, sc, tc)`: the major axis magnitude
//! and the two in-face coordinates. Then `u = (sc / ma + 1) / 2` and
//! `v = (tc / ma + 1) / 2`.
//!
//! | Face | ma | sc | tc |
//! |------|----|----|----|
//! | +X | x  | -z | -y |
//! | -X | -x | z  | -y |
//! | +Y | y  | x  | z  |
//! | -Y | -y | x  | -z |
//! | +Z | z  | x  | -y |
//! | -Z | -z | -x | -y |

use std::path::Path;

use super::texture2d::Texture;
use crate::core::error::Result;
use crate::core::math::{Vec3, NORMALIZE_EPSILON};
use crate::core::raster::color::BLACK;

/// One face of a cube map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX = 0,
    NegativeX = 1,
    PositiveY = 2,
    NegativeY = 3,
    PositiveZ = 4,
    NegativeZ = 5,
}

impl CubeFace {
    /// All faces in storage order
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Face hit by a direction
    pub fn from_direction(dir: Vec3) -> CubeFace {
        let (ax, ay, az) = (dir.x.abs(), dir.y.abs(), dir.z.abs());
        if ax >= ay && ax >= az {
            if dir.x > 0.0 {
                CubeFace::PositiveX
            } else {
                CubeFace::NegativeX
            }
        } else if ay >= az {
            if dir.y > 0.0 {
                CubeFace::PositiveY
            } else {
                CubeFace::NegativeY
            }
        } else if dir.z > 0.0 {
            CubeFace::PositiveZ
        } else {
            CubeFace::NegativeZ
        }
    }

    /// `(ma, sc, tc)` for a direction on this face
    #[inline]
    fn project(self, d: Vec3) -> (f32, f32, f32) {
        match self {
            CubeFace::PositiveX => (d.x, -d.z, -d.y),
            CubeFace::NegativeX => (-d.x, d.z, -d.y),
            CubeFace::PositiveY => (d.y, d.x, d.z),
            CubeFace::NegativeY => (-d.y, d.x, -d.z),
            CubeFace::PositiveZ => (d.z, d.x, -d.y),
            CubeFace::NegativeZ => (-d.z, -d.x, -d.y),
        }
    }

    /// Direction through face coordinate `(u, v)`
    ///
    /// Inverse of [`face_uv`] for a unit-distance face plane.
    pub fn direction(self, u: f32, v: f32) -> Vec3 {
        let sc = 2.0 * u - 1.0;
        let tc = 2.0 * v - 1.0;
        match self {
            CubeFace::PositiveX => Vec3::new(1.0, -tc, -sc),
            CubeFace::NegativeX => Vec3::new(-1.0, -tc, sc),
            CubeFace::PositiveY => Vec3::new(sc, 1.0, tc),
            CubeFace::NegativeY => Vec3::new(sc, -1.0, -tc),
            CubeFace::PositiveZ => Vec3::new(sc, -tc, 1.0),
            CubeFace::NegativeZ => Vec3::new(-sc, -tc, -1.0),
        }
    }
}

/// Face and clamped UV hit by a direction
///
/// # Examples
///
/// ```
/// use twinraster::core::math::Vec3;
/// use twinraster::core::texture::{face_uv, CubeFace};
///
/// let (face, u, v) = face_uv(Vec3::new(0.0, 0.0, -1.0));
/// assert_eq!(face, CubeFace::NegativeZ);
/// assert_eq!((u, v), (0.5, 0.5));
/// ```
pub fn face_uv(dir: Vec3) -> (CubeFace, f32, f32) {
    let face = CubeFace::from_direction(dir);
    let (ma, sc, tc) = face.project(dir);
    let u = ((sc / ma + 1.0) * 0.5).clamp(0.0, 1.0);
    let v = ((tc / ma + 1.0) * 0.5).clamp(0.0, 1.0);
    (face, u, v)
}

/// Mirror `incident` about `normal`: `I - 2 (N·I) N`
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - normal * (2.0 * normal.dot(incident))
}

/// Bend `incident` through a surface with relative index `eta` (n1 / n2)
///
/// Falls back to [`reflect`] on total internal reflection.
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Vec3 {
    let cos_i = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return reflect(incident, normal);
    }
    incident * eta - normal * (eta * cos_i + k.sqrt())
}

/// Six-face environment map
#[derive(Debug, Clone, Default)]
pub struct Cubemap {
    faces: [Option<Texture>; 6],
}

impl Cubemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all six faces, in [`CubeFace::ALL`] order
    pub fn load<P: AsRef<Path>>(paths: [P; 6]) -> Result<Self> {
        let mut cubemap = Self::new();
        for (face, path) in CubeFace::ALL.into_iter().zip(paths) {
            cubemap.set_face(face, Texture::load(path)?);
        }
        Ok(cubemap)
    }

    /// Build square faces from `f(face, u, v)`
    pub fn from_fn(size: u32, f: impl Fn(CubeFace, f32, f32) -> u32) -> Result<Self> {
        let mut cubemap = Self::new();
        let span = (size.max(2) - 1) as f32;
        for face in CubeFace::ALL {
            let texture = Texture::from_fn(format!("cubemap {:?}", face), size, size, |x, y| {
                f(face, x as f32 / span, y as f32 / span)
            })?;
            cubemap.set_face(face, texture);
        }
        Ok(cubemap)
    }

    pub fn set_face(&mut self, face: CubeFace, texture: Texture) {
        self.faces[face.index()] = Some(texture);
    }

    pub fn face(&self, face: CubeFace) -> Option<&Texture> {
        self.faces[face.index()].as_ref()
    }

    /// True only when all six faces are present
    pub fn is_loaded(&self) -> bool {
        self.faces.iter().all(Option::is_some)
    }

    /// Colour seen along `dir`
    ///
    /// Returns opaque black for a zero-length direction or an incomplete map.
    pub fn sample(&self, dir: Vec3) -> u32 {
        if dir.length() < NORMALIZE_EPSILON {
            return BLACK;
        }
        let (face, u, v) = face_uv(dir.normalize());
        match self.face(face) {
            Some(texture) if self.is_loaded() => texture.sample(u, v),
            _ => BLACK,
        }
    }
}
