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

//! twinraster entry point
//!
//! Opens the interactive window, or with `--headless` renders a fixed
//! number of frames and writes the last one to a PNG.
//!
//! A `.env` file in the working directory is read first, so
//! `RUST_LOG` and `TWINRASTER_CONFIG` can be set there.

use std::path::PathBuf;

use clap::Parser;
use twinraster::core::config::RenderConfig;
use twinraster::core::renderer::Renderer;
use twinraster::core::scene::{BackendKind, ObjectManager};
use twinraster::frontend::demo::{load_model, populate_demo_scene};
use twinraster::frontend::Application;
use winit::event_loop::EventLoop;

#[derive(Parser, Debug)]
#[command(
    name = "twinraster",
    version,
    about = "Real-time 3D renderer with CPU and GPU compute rasterizers"
)]
struct Args {
    /// TOML configuration file (defaults to $TWINRASTER_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rasterizer backend: cpu or gpu
    #[arg(short, long)]
    backend: Option<BackendKind>,

    /// Frame buffer width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Frame buffer height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// OBJ model to add to the scene
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Render without a window
    #[arg(long)]
    headless: bool,

    /// Frames to render in headless mode
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Output image in headless mode
    #[arg(long, default_value = "twinraster.png")]
    screenshot: PathBuf,
}

impl Args {
    fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var_os("TWINRASTER_CONFIG").map(PathBuf::from))
    }

    /// Layer command-line overrides on top of the file
    fn apply(&self, config: &mut RenderConfig) {
        if let Some(backend) = self.backend {
            config.render.backend = backend;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(model) = &self.model {
            config.assets.model = Some(model.clone());
        }
    }
}

fn run_headless(config: &RenderConfig, args: &Args) -> twinraster::Result<()> {
    let mut renderer = Renderer::new(config);
    let mut objects = ObjectManager::new();
    populate_demo_scene(&mut renderer, &mut objects)?;
    if let Some(path) = &config.assets.model {
        load_model(&mut renderer, &mut objects, path)?;
    }

    let camera = config.camera();
    let dt = (1.0 / config.window.target_fps.max(1.0)) as f32;
    for frame in 0..args.frames.max(1) {
        if frame > 0 {
            objects.update_all(dt);
        }
        let stats = renderer.render(&camera, &mut objects)?;
        log::debug!("Frame {}: {:?}", frame, stats);
    }

    let stats = renderer.stats();
    log::info!(
        "Rendered {} frame(s) on {}: {} triangles drawn, {} culled, {} clipped",
        args.frames.max(1),
        renderer.active_backend(),
        stats.triangles_drawn,
        stats.triangles_culled,
        stats.triangles_clipped
    );

    renderer.save_screenshot(&args.screenshot)?;
    log::info!("Saved {}", args.screenshot.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config_path = args.config_path();

    let mut config = match &config_path {
        Some(path) => {
            log::info!("Config: {}", path.display());
            RenderConfig::load(path)?
        }
        None => RenderConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    if args.headless {
        run_headless(&config, &args)?;
        return Ok(());
    }

    log::info!("Starting twinraster...");
    let event_loop = EventLoop::new()?;
    let mut app = Application::new(config, config_path);
    event_loop.run_app(&mut app)?;

    Ok(())
}
