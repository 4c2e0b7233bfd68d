use crate::render::PANEL_WIDTH;
use crate::state::State;
use color_life::{CellColor, Event};

/// Event for a size field that lost focus, or `None` when the text still names the
/// current size. Resizing clears the board, so a bare focus change must not emit one.
fn size_text_committed(text: &str, matrix_size: usize) -> Option<Event> {
    if text.trim() == matrix_size.to_string() {
        None
    } else {
        Some(Event::MatrixSizeText(text.to_string()))
    }
}

/// Builds the control panel and forwards every interaction to the controller.
pub fn draw_panel(ctx: &egui::Context, state: &mut State) {
    let snapshot = state.controller.snapshot();
    let running = snapshot.is_running;
    let iteration = snapshot.iteration;
    let live_cells = snapshot.live_cells;
    let matrix_size = snapshot.matrix_size;

    let mut events = Vec::new();
    let mut editing_size = false;

    egui::SidePanel::right("controls")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.heading("Game of Life");
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button(if running { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    events.push(Event::PlayPause);
                }
                if ui.add_enabled(!running, egui::Button::new("Step")).clicked() {
                    events.push(Event::Step);
                }
                if ui.button("Reset").clicked() {
                    events.push(Event::Reset);
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Paint color:");
                if egui::color_picker::color_edit_button_rgb(ui, &mut state.paint_rgb).changed() {
                    events.push(Event::PaintColorChanged(CellColor::from(state.paint_rgb)));
                }
            });
            ui.separator();

            ui.label("Grid size:");
            ui.horizontal(|ui| {
                if ui.button("−").clicked() {
                    events.push(Event::DecrementSize);
                }
                let response = ui.add(egui::TextEdit::singleline(&mut state.size_text).desired_width(60.0));
                if response.lost_focus() {
                    events.extend(size_text_committed(&state.size_text, matrix_size));
                }
                editing_size = response.has_focus();
                if ui.button("+").clicked() {
                    events.push(Event::IncrementSize);
                }
            });
            ui.separator();

            ui.label(format!("Grid: {0}x{0}", matrix_size));
            ui.label(format!("Iteration: {}", iteration));
            ui.label(format!("Live Cells: {}", live_cells));
            ui.separator();
            ui.small("Space: play/pause  Enter: step  R: reset");
        });

    for event in events {
        state.controller.handle(event);
    }

    if !editing_size {
        let current = state.controller.snapshot().matrix_size.to_string();
        if state.size_text != current {
            state.size_text = current;
        }
    }
}
