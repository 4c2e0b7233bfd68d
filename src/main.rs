// Window host modules; the simulation itself lives in the library crate
pub mod state;
pub mod render;
pub mod input;
pub mod panel;

use crate::render::{CANVAS_MARGIN, PANEL_WIDTH};
use crate::state::State;
use color_life::{Controller, Event as SimEvent, SimulatorConfig};

use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};
use std::sync::Arc;
use std::time::Instant;

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, controller: Controller) -> anyhow::Result<()> {
    let mut state = State::new(window, controller).await?;

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, ref event }
                if window_id == state.window.id() =>
            {
                // Pass window-specific events to egui_winit FIRST
                let response = state.egui_winit_state.on_window_event(&state.window, event);

                if response.repaint {
                    state.window.request_redraw();
                }

                // Geometry changes and button releases must reach the host even when egui
                // claims them, otherwise a stroke could stay open.
                let passthrough = matches!(
                    event,
                    WindowEvent::Resized(_)
                        | WindowEvent::ScaleFactorChanged { .. }
                        | WindowEvent::MouseInput { state: ElementState::Released, .. }
                );
                if response.consumed && !passthrough {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                    }
                    WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                        state.controller.handle(SimEvent::DensityChanged(*scale_factor as f32));
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        input::handle_mouse_input(&mut state, *button, *element_state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut state, *position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state);
                    }
                    WindowEvent::KeyboardInput { event: key_event, .. } => {
                        input::handle_key(&mut state, key_event);
                    }
                    WindowEvent::RedrawRequested => {
                        // Advance the simulation if a tick is due, then draw the grid.
                        state.controller.poll(Instant::now());

                        let output_frame = match state.update_and_render() {
                            Ok(frame) => frame,
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::OutOfMemory) => {
                                // resize() was called internally if Lost.
                                log::warn!("Skipping frame due to surface error.");
                                state.window.request_redraw();
                                return;
                            }
                            Err(e @ (wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Outdated)) => {
                                // Temporary errors. Log and skip frame, request redraw.
                                log::warn!("Skipping frame due to surface {:?}", e);
                                state.window.request_redraw();
                                return;
                            }
                        };

                        // --- Egui Frame and UI Definition ---
                        let raw_input = state.egui_winit_state.take_egui_input(&state.window);
                        let ctx = state.egui_ctx.clone();
                        ctx.begin_frame(raw_input);
                        panel::draw_panel(&ctx, &mut state);
                        let full_output = ctx.end_frame();

                        state.paint_egui(output_frame, full_output);
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                state.window.request_redraw();
            }
            _ => ()
        }
    })?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = SimulatorConfig::from_env();
    config.validate()?;
    let canvas = config.canvas_size;
    let controller = Controller::new(config)?;

    let event_loop = EventLoop::new()?;

    let initial_size = winit::dpi::LogicalSize::new(
        (canvas + 2.0 * CANVAS_MARGIN + PANEL_WIDTH) as f64,
        (canvas + 2.0 * CANVAS_MARGIN) as f64,
    );

    let window = Arc::new(winit::window::WindowBuilder::new()
        .with_title("Game of Life")
        .with_inner_size(initial_size)
        .with_min_inner_size(initial_size)
        .build(&event_loop)?);

    pollster::block_on(run(event_loop, window, controller))
}
