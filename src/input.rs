use crate::state::State;
use color_life::Event;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{Key, NamedKey},
};

/// Converts a window position to canvas-relative pixels, or `None` outside the canvas.
pub fn canvas_local(position: PhysicalPosition<f64>, origin_px: f32, canvas_px: f32) -> Option<(f32, f32)> {
    let x = position.x as f32 - origin_px;
    let y = position.y as f32 - origin_px;
    if x < 0.0 || y < 0.0 || x >= canvas_px || y >= canvas_px {
        return None;
    }
    Some((x, y))
}

fn cursor_on_canvas(state: &State, position: PhysicalPosition<f64>) -> Option<(f32, f32)> {
    canvas_local(
        position,
        state.canvas_origin_px(),
        state.controller.coordinate_map().canvas_px() as f32,
    )
}

pub fn handle_mouse_input(state: &mut State, button: MouseButton, element_state: ElementState) {
    if button != MouseButton::Left {
        return;
    }
    match element_state {
        ElementState::Pressed => {
            let on_canvas = state.cursor_pos.and_then(|pos| cursor_on_canvas(state, pos));
            if let Some((x, y)) = on_canvas {
                state.is_left_mouse_pressed = true;
                state.controller.handle(Event::PointerPressed { x, y });
            }
        }
        ElementState::Released => {
            if state.is_left_mouse_pressed {
                state.is_left_mouse_pressed = false;
                state.controller.handle(Event::PointerReleased);
            }
        }
    }
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.cursor_pos = Some(position);

    // Toggle cells along the drag while the left button is held
    if state.is_left_mouse_pressed {
        if let Some((x, y)) = cursor_on_canvas(state, position) {
            state.controller.handle(Event::PointerDragged { x, y });
        }
    }
}

pub fn handle_cursor_left(state: &mut State) {
    state.cursor_pos = None;
    // The stroke stays open so a drag that briefly leaves the window can continue
}

pub fn handle_key(state: &mut State, event: &KeyEvent) {
    if event.state != ElementState::Pressed || event.repeat {
        return;
    }
    let action = match &event.logical_key {
        Key::Named(NamedKey::Space) => Event::PlayPause,
        Key::Named(NamedKey::Enter) => Event::Step,
        Key::Character(c) if c.as_str().eq_ignore_ascii_case("r") => Event::Reset,
        _ => return,
    };
    log::debug!("Keyboard shortcut: {:?}", action);
    state.controller.handle(action);
}
