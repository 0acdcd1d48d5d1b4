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

//! Letterbox scaling for the display pass

use proptest::prelude::*;

use crate::frontend::renderer::fit_scale;

#[test]
fn test_same_aspect_fills_target() {
    assert_eq!(fit_scale(640, 480, 1280, 960), [1.0, 1.0]);
}

#[test]
fn test_wide_target_is_pillarboxed() {
    let [sx, sy] = fit_scale(640, 480, 1280, 480);
    assert!((sx - 0.5).abs() < 1e-6);
    assert_eq!(sy, 1.0);
}

#[test]
fn test_tall_target_is_letterboxed() {
    let [sx, sy] = fit_scale(640, 480, 640, 960);
    assert_eq!(sx, 1.0);
    assert!((sy - 0.5).abs() < 1e-6);
}

#[test]
fn test_zero_sizes_fall_back_to_full() {
    assert_eq!(fit_scale(0, 480, 800, 600), [1.0, 1.0]);
    assert_eq!(fit_scale(640, 480, 800, 0), [1.0, 1.0]);
}

proptest! {
    #[test]
    fn test_fit_keeps_aspect_and_stays_inside(
        sw in 1u32..4096, sh in 1u32..4096, dw in 1u32..4096, dh in 1u32..4096,
    ) {
        let [sx, sy] = fit_scale(sw, sh, dw, dh);
        prop_assert!(sx > 0.0 && sx <= 1.0);
        prop_assert!(sy > 0.0 && sy <= 1.0);
        prop_assert!(sx == 1.0 || sy == 1.0);

        // Covered rectangle has the source aspect
        let shown = (sx * dw as f32) / (sy * dh as f32);
        let source = sw as f32 / sh as f32;
        prop_assert!((shown - source).abs() <= source * 1e-3);
    }
}
