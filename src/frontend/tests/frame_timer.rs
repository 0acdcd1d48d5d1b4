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

//! Unit tests for FrameTimer

use crate::frontend::frame_timer::{FrameTimer, MAX_DELTA};
use std::thread;
use std::time::Duration;

#[test]
fn test_frame_timer_new() {
    let timer = FrameTimer::new(60.0);
    assert_eq!(timer.fps(), 0.0);
    assert_eq!(timer.frame_time_ms(), 0.0);
    assert_eq!(timer.frame_count(), 0);
}

#[test]
fn test_target_frame_time_matches_rate() {
    let timer = FrameTimer::new(50.0);
    assert_eq!(timer.target_frame_time(), Duration::from_millis(20));
}

#[test]
fn test_invalid_rates_are_raised() {
    assert_eq!(FrameTimer::new(0.0).target_frame_time(), Duration::from_secs(1));
    assert_eq!(FrameTimer::new(-5.0).target_frame_time(), Duration::from_secs(1));
    assert_eq!(
        FrameTimer::new(f64::NAN).target_frame_time(),
        FrameTimer::new(60.0).target_frame_time()
    );
}

#[test]
fn test_tick_reports_elapsed_seconds() {
    let mut timer = FrameTimer::new(60.0);
    thread::sleep(Duration::from_millis(20));

    let dt = timer.tick();
    assert_eq!(timer.frame_count(), 1);
    assert!(timer.frame_time_ms() >= 20.0);
    assert!(dt >= 0.02 && dt <= MAX_DELTA);
}

#[test]
fn test_long_stall_is_capped() {
    let mut timer = FrameTimer::new(60.0);
    thread::sleep(Duration::from_millis(300));
    assert_eq!(timer.tick(), MAX_DELTA);
}

#[test]
fn test_should_run_after_target_elapsed() {
    let mut timer = FrameTimer::new(100.0);
    timer.tick();
    thread::sleep(Duration::from_millis(15));
    assert!(timer.should_run_frame());
    assert!(timer.next_frame_instant() <= std::time::Instant::now());
}

#[test]
fn test_frame_timer_fps_calculation() {
    let mut timer = FrameTimer::new(60.0);

    // 60 frames of 17ms cross the one second refresh
    for _ in 0..60 {
        thread::sleep(Duration::from_millis(17));
        timer.tick();
    }

    assert!(timer.fps() > 0.0);
    assert_eq!(timer.frame_count(), 60);
}

#[test]
fn test_frame_timer_default() {
    let timer = FrameTimer::default();
    assert_eq!(timer.frame_count(), 0);
}
