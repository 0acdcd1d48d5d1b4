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

//! Near-plane clipping properties

use proptest::prelude::*;

use crate::core::math::Vec3;
use crate::core::raster::{clip_triangle, Vertex};

const NEAR: f32 = 0.1;

fn area_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a) * 0.5
}

fn vertex() -> impl Strategy<Value = Vertex> {
    (-5.0f32..5.0, -5.0f32..5.0, -5.0f32..5.0).prop_map(|(x, y, z)| Vertex::new(x, y, z))
}

#[test]
fn test_front_count_decides_output_count() {
    let front = |x: f32| Vertex::new(x, 0.0, 1.0);
    let behind = |x: f32| Vertex::new(x, 1.0, -1.0);

    assert_eq!(clip_triangle(&[behind(0.0), behind(1.0), behind(2.0)], NEAR).len(), 0);
    assert_eq!(clip_triangle(&[front(0.0), behind(1.0), behind(2.0)], NEAR).len(), 1);
    assert_eq!(clip_triangle(&[front(0.0), front(1.0), behind(2.0)], NEAR).len(), 2);
    assert_eq!(clip_triangle(&[front(0.0), front(1.0), front(2.0)], NEAR).len(), 1);
}

proptest! {
    #[test]
    fn test_clip_output_lies_in_front(a in vertex(), b in vertex(), c in vertex()) {
        let tri = [a, b, c];
        let front = tri.iter().filter(|v| v.position.z >= NEAR).count();
        let out = clip_triangle(&tri, NEAR);

        let expected = match front {
            0 => 0,
            1 | 3 => 1,
            _ => 2,
        };
        prop_assert_eq!(out.len(), expected);
        for v in out.iter().flatten() {
            prop_assert!(v.position.z >= NEAR - 1e-5);
        }
    }

    #[test]
    fn test_clip_never_grows_area_or_flips_winding(a in vertex(), b in vertex(), c in vertex()) {
        let input = area_normal(a.point(), b.point(), c.point());
        prop_assume!(input.length() > 1e-2);

        let out = clip_triangle(&[a, b, c], NEAR);
        let mut total = 0.0;
        for t in out.iter() {
            let n = area_normal(t[0].point(), t[1].point(), t[2].point());
            total += n.length();
            if n.length() > 1e-4 {
                prop_assert!(n.dot(input) > 0.0, "clipped triangle flipped winding");
            }
        }
        prop_assert!(total <= input.length() * (1.0 + 1e-3) + 1e-4);
    }
}
