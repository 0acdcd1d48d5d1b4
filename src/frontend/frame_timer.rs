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

//! Frame pacing
//!
//! Decides when the next frame is due, measures how long frames take and
//! hands the scene the elapsed time between frames.

use std::time::{Duration, Instant};

/// Longest step handed to the scene, so a stalled window does not teleport
/// spinning objects or the camera
pub const MAX_DELTA: f32 = 0.25;

/// Fixed-rate frame timer
///
/// # Example
///
/// ```
/// use twinraster::frontend::FrameTimer;
///
/// let mut timer = FrameTimer::new(60.0);
/// if timer.should_run_frame() {
///     let dt = timer.tick();
///     assert!(dt >= 0.0);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameTimer {
    target_frame_time: Duration,
    last_frame: Instant,
    frame_count: u64,
    fps: f32,
    frame_time_ms: f32,
    fps_start: Instant,
    fps_frame_count: u64,
}

impl FrameTimer {
    /// Create a timer for `target_fps` frames per second
    ///
    /// Rates below one frame per second are raised to one.
    pub fn new(target_fps: f64) -> Self {
        let target_fps = if target_fps.is_finite() {
            target_fps.max(1.0)
        } else {
            60.0
        };
        let now = Instant::now();

        Self {
            target_frame_time: Duration::from_secs_f64(1.0 / target_fps),
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            frame_time_ms: 0.0,
            fps_start: now,
            fps_frame_count: 0,
        }
    }

    /// Record a finished frame
    ///
    /// Returns the seconds since the previous tick, capped at [`MAX_DELTA`].
    /// The FPS reading is refreshed about once per second.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);

        self.frame_time_ms = elapsed.as_secs_f32() * 1000.0;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_start);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_start = now;
        }

        self.last_frame = now;
        elapsed.as_secs_f32().min(MAX_DELTA)
    }

    #[inline(always)]
    pub fn should_run_frame(&self) -> bool {
        Instant::now().duration_since(self.last_frame) >= self.target_frame_time
    }

    /// When the next frame is due, for `ControlFlow::WaitUntil`
    #[inline(always)]
    pub fn next_frame_instant(&self) -> Instant {
        self.last_frame + self.target_frame_time
    }

    #[inline(always)]
    pub fn target_frame_time(&self) -> Duration {
        self.target_frame_time
    }

    #[inline(always)]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Duration of the last frame in milliseconds
    #[inline(always)]
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    #[inline(always)]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(60.0)
    }
}
