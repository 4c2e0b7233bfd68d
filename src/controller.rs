//! Interaction/state controller.
//!
//! The single owner of simulation state. The window host feeds it [`Event`]s and
//! reads a [`Snapshot`] back; it never touches the grid directly.

use crate::color::CellColor;
use crate::config::SimulatorConfig;
use crate::engine::{Simulation, TickReport};
use crate::grid::{Grid, GridError};
use crate::mapper::CoordinateMap;
use std::collections::HashSet;
use std::time::Instant;

/// One user action, as delivered by the window host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw text from the size field. Unparsable text falls back to the configured default.
    MatrixSizeText(String),
    /// Explicit new size.
    MatrixSizeChanged(usize),
    IncrementSize,
    DecrementSize,
    /// Pointer pressed at canvas-relative physical pixel `(x, y)`; starts a stroke.
    PointerPressed { x: f32, y: f32 },
    /// Pointer moved with the button held; toggles each cell once per stroke.
    PointerDragged { x: f32, y: f32 },
    PointerReleased,
    PaintColorChanged(CellColor),
    /// Display scale reported by the rendering layer.
    DensityChanged(f32),
    PlayPause,
    /// Advance exactly one generation while paused.
    Step,
    Reset,
}

/// Read-only view of the simulation state handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub matrix_size: usize,
    pub is_running: bool,
    pub iteration: u64,
    pub live_cells: usize,
    pub selected_color: CellColor,
    /// Changes every time the grid does.
    pub revision: u64,
}

pub struct Controller {
    config: SimulatorConfig,
    simulation: Simulation,
    map: CoordinateMap,
    density: f32,
    paint: CellColor,
    stroke: Option<HashSet<(usize, usize)>>,
    revision: u64,
}

impl Controller {
    /// Builds a controller from a configuration that already passed `validate`.
    pub fn new(config: SimulatorConfig) -> Result<Self, GridError> {
        let size = config.clamp_matrix_size(config.initial_matrix_size);
        let simulation = Simulation::new(size, config.tick_period)?;
        let density = 1.0;
        let map = CoordinateMap::rebuild(size, config.canvas_size, density);
        Ok(Self {
            paint: config.initial_paint_color,
            config,
            simulation,
            map,
            density,
            stroke: None,
            revision: 0,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn coordinate_map(&self) -> &CoordinateMap {
        &self.map
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let grid = self.simulation.grid();
        Snapshot {
            grid,
            matrix_size: grid.size(),
            is_running: self.simulation.is_running(),
            iteration: self.simulation.iteration(),
            live_cells: self.simulation.live_cells(),
            selected_color: self.paint,
            revision: self.revision,
        }
    }

    /// Applies one event and returns the resulting state.
    pub fn handle(&mut self, event: Event) -> Snapshot<'_> {
        match event {
            Event::MatrixSizeText(text) => {
                let size = match text.trim().parse::<usize>() {
                    Ok(size) => size,
                    Err(_) => {
                        log::warn!(
                            "Size input {:?} is not a number, using {}",
                            text,
                            self.config.fallback_matrix_size
                        );
                        self.config.fallback_matrix_size
                    }
                };
                self.resize(size);
            }
            Event::MatrixSizeChanged(size) => self.resize(size),
            Event::IncrementSize => self.resize(self.simulation.grid().size().saturating_add(1)),
            Event::DecrementSize => self.resize(self.simulation.grid().size().saturating_sub(1)),
            Event::PointerPressed { x, y } => {
                self.stroke = Some(HashSet::new());
                self.paint_at(x, y);
            }
            Event::PointerDragged { x, y } => {
                if self.stroke.is_some() {
                    self.paint_at(x, y);
                }
            }
            Event::PointerReleased => self.stroke = None,
            Event::PaintColorChanged(color) => self.paint = color,
            Event::DensityChanged(density) => {
                if density.is_finite() && density > 0.0 {
                    log::info!("Display density changed to {density:.2}");
                    self.density = density;
                    self.rebuild_map();
                } else {
                    log::warn!("Ignoring invalid display density {density}");
                }
            }
            Event::PlayPause => {
                if self.simulation.is_running() {
                    self.simulation.pause();
                } else {
                    self.simulation.play();
                }
            }
            Event::Step => {
                if !self.simulation.is_running() {
                    self.simulation.tick();
                    self.revision += 1;
                }
            }
            Event::Reset => {
                self.simulation.reset();
                self.stroke = None;
                self.revision += 1;
            }
        }
        self.snapshot()
    }

    /// Drives the periodic job; call once per event-loop iteration.
    pub fn poll(&mut self, now: Instant) -> Option<TickReport> {
        let report = self.simulation.poll(now)?;
        self.revision += 1;
        Some(report)
    }

    fn resize(&mut self, requested: usize) {
        let size = self.config.clamp_matrix_size(requested);
        if size != requested {
            log::warn!(
                "Grid size {} clamped to {} (bounds {}..={})",
                requested,
                size,
                self.config.min_matrix_size,
                self.config.max_matrix_size
            );
        }
        match self.simulation.resize(size) {
            Ok(()) => {
                self.stroke = None;
                self.revision += 1;
                self.rebuild_map();
            }
            Err(err) => log::error!("Resize to {size} rejected: {err}"),
        }
    }

    fn rebuild_map(&mut self) {
        self.map = CoordinateMap::rebuild(
            self.simulation.grid().size(),
            self.config.canvas_size,
            self.density,
        );
    }

    fn paint_at(&mut self, x: f32, y: f32) {
        let i = self.map.map_pixel_to_index(x);
        let j = self.map.map_pixel_to_index(y);

        if let Some(stroke) = self.stroke.as_mut() {
            if !stroke.insert((i, j)) {
                return;
            }
        }

        let paint = self.paint;
        match self.simulation.edit(|grid| grid.toggle(i, j, paint)) {
            Ok(_) => self.revision += 1,
            Err(err) => {
                // The map only yields indices below its matrix size, which tracks the grid.
                log::error!("Pointer mapped outside the grid: {err}");
                debug_assert!(false, "pointer mapped outside the grid: {err}");
            }
        }
    }
}
