//! Colored Game of Life engine.
//!
//! Cells are RGB colors (white is dead). Newborn cells blend the colors of their three
//! parents. The window host in `main.rs` drives a [`Controller`] with user events and
//! draws the snapshots it returns.

pub mod color;
pub mod config;
pub mod controller;
pub mod engine;
pub mod grid;
pub mod mapper;
pub mod neighbors;
pub mod rules;

pub use color::{blend, CellColor};
pub use config::{ConfigError, SimulatorConfig};
pub use controller::{Controller, Event, Snapshot};
pub use engine::{Phase, Simulation, SimulationJob, TickReport};
pub use grid::{Grid, GridError};
pub use mapper::CoordinateMap;
pub use neighbors::{live_neighbors, neighbor_coords, neighbors, Neighborhood};
pub use rules::{apply_rules, GameRules, Generation};
