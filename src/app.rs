use crate::core::framebuffer::{PixelFormat, SurfaceSizeMismatch};
use crate::core::pipeline::Palette;
use crate::io::config::Config;
use crate::io::image::save_framebuffer;
use crate::pipeline::renderer::{FrameStats, Renderer};
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;
use crate::ui::input::{CONTROLS_HELP, KeyBindings, KeyboardController};
use log::{debug, info};
use minifb::{Window, WindowOptions};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
    #[error(transparent)]
    Surface(#[from] SurfaceSizeMismatch),
    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),
}

/// A loaded mesh together with everything needed to draw it.
pub struct Viewer {
    pub mesh: Mesh,
    pub context: RenderContext,
    pub renderer: Renderer,
    pub palette: Box<dyn Palette>,
}

impl Viewer {
    pub fn from_config(config: &Config, mesh: Mesh) -> Result<Self, AppError> {
        let light = config.build_light().map_err(AppError::Config)?;
        let palette = config.palette().map_err(AppError::Config)?;
        let mode = config.render_mode().map_err(AppError::Config)?;

        let mut renderer = Renderer::new(config.render.width, config.render.height);
        renderer.rasterizer.set_mode(mode);
        renderer.shading = config.shading_params();
        renderer.background = config.background();
        renderer.flip_y = config.render.flip_y;

        Ok(Self {
            mesh,
            context: RenderContext::new(config.build_camera(), light),
            renderer,
            palette,
        })
    }

    pub fn render(&mut self) -> FrameStats {
        self.renderer.render_frame(&self.mesh, &self.context, &self.palette)
    }
}

/// Runs the interactive viewer until the window closes or Escape is pressed.
pub fn run_gui(config: &Config, mesh: Mesh) -> Result<(), AppError> {
    let width = config.render.width;
    let height = config.render.height;
    let frame_delay = Duration::from_millis(config.render.frame_delay_ms);

    info!("Starting GUI mode ({}x{})...", width, height);
    for line in CONTROLS_HELP {
        info!("  {}", line);
    }

    let mut window = Window::new(
        "Software Rasterizer - Shuttle",
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;

    let mut viewer = Viewer::from_config(config, mesh)?;
    let controller = KeyboardController::new(KeyBindings::from_config(config));
    let mut buffer = vec![0u32; width * height];

    let mut frame_count = 0;
    let mut last_fps_update = Instant::now();

    while !KeyboardController::quit_requested(&window) {
        for command in controller.poll(&window) {
            debug!("Command: {:?}", command);
            viewer.context.apply(command);
        }

        let stats = viewer.render();
        viewer
            .renderer
            .framebuffer
            .present(PixelFormat::Xrgb8888, &mut buffer)?;
        window.update_with_buffer(&buffer, width, height)?;

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 2.0 {
            info!(
                "Average FPS: {:.1} ({} of {} faces drawn)",
                frame_count as f32 / last_fps_update.elapsed().as_secs_f32(),
                stats.drawn,
                stats.faces
            );
            frame_count = 0;
            last_fps_update = Instant::now();
        }

        thread::sleep(frame_delay);
    }

    info!("Window closed.");
    Ok(())
}

/// Renders a single frame without a window and writes it to `output`.
pub fn run_headless(config: &Config, mesh: Mesh, output: &str) -> Result<FrameStats, AppError> {
    info!("Starting headless render...");
    let start_time = Instant::now();

    let mut viewer = Viewer::from_config(config, mesh)?;
    let stats = viewer.render();
    info!(
        "Render completed in {:.2?}: {} faces, {} culled, {} skipped, {} drawn",
        start_time.elapsed(),
        stats.faces,
        stats.culled,
        stats.skipped,
        stats.drawn
    );

    info!("Saving output to '{}'...", output);
    save_framebuffer(&viewer.renderer.framebuffer, output)?;
    info!("Done.");
    Ok(stats)
}
