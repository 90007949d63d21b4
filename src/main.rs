use anyhow::Result;
use glam::Vec2;
use log::{error, info, warn};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{InputCommand, InputManager};
use engine::physics::WorldConfig;
use engine::renderer::Renderer;
use game::Scene;

/// Arena size in logical pixels
const WINDOW_WIDTH: u32 = 300;
const WINDOW_HEIGHT: u32 = 300;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Ball Drop...");

    let config = WorldConfig::default();
    let mut scene = Scene::new(config)?;
    info!(
        "World ready: gravity {}, restitution {}, platform at y={}",
        config.gravity, config.restitution, config.platform.y
    );

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Ball Drop")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    renderer.camera_mut().set_scale_factor(scale_factor as f32);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let screen = Vec2::new(position.x as f32, position.y as f32);
                    input.process_cursor_moved(renderer.camera().screen_to_world(screen));
                }
                WindowEvent::CursorLeft { .. } => input.process_cursor_left(),
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::RedrawRequested => {
                    for command in input.drain() {
                        match command {
                            InputCommand::Spawn(at) => {
                                scene.spawn_ball(at);
                            }
                            InputCommand::TogglePause => game_loop.toggle_pause(),
                            InputCommand::Quit => {
                                info!("Quit requested, shutting down...");
                                elwt.exit();
                            }
                        }
                    }

                    let dt = game_loop.begin_frame();
                    scene.update(dt);

                    if let Err(err) = renderer.render(&scene.shapes()) {
                        match err.downcast_ref::<wgpu::SurfaceError>() {
                            Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                warn!("Surface lost, reconfiguring");
                                renderer.reconfigure();
                            }
                            Some(wgpu::SurfaceError::OutOfMemory) => {
                                error!("GPU out of memory, shutting down");
                                elwt.exit();
                            }
                            _ => warn!("Frame dropped: {}", err),
                        }
                    }

                    if game_loop.frame_count() % 600 == 0 {
                        let world = scene.world();
                        info!(
                            "{:.0} fps ({:.1} ms frame), {} balls, {} contacts, {} steps, {:.1}s simulated{}",
                            game_loop.fps(),
                            game_loop.render_delta_time() * 1000.0,
                            world.body_count(),
                            world.collision_events().len(),
                            world.step_count(),
                            game_loop.simulated_time(),
                            if game_loop.is_paused() { " (paused)" } else { "" }
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
