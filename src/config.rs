//! Simulator settings with defaults and environment overrides.

use crate::color::CellColor;
use std::time::Duration;
use thiserror::Error;

/// Nominal canvas edge in logical units; physical pixels are this times the density.
pub const CANVAS_SIZE: f32 = 600.0;
pub const TICK_PERIOD: Duration = Duration::from_millis(100);
pub const DEFAULT_MATRIX_SIZE: usize = 100;
pub const MIN_MATRIX_SIZE: usize = 2;
pub const MAX_MATRIX_SIZE: usize = 600;

/// Errors raised while validating a [`SimulatorConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Static configuration for the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Canvas edge in logical units.
    pub canvas_size: f32,
    /// Fixed period between generations while running.
    pub tick_period: Duration,
    /// Grid size on start-up.
    pub initial_matrix_size: usize,
    /// Size used when typed size text does not parse.
    pub fallback_matrix_size: usize,
    /// Smallest size any resize may reach.
    pub min_matrix_size: usize,
    /// Largest size any resize may reach.
    pub max_matrix_size: usize,
    /// Color painted into dead cells before the user picks one.
    pub initial_paint_color: CellColor,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            tick_period: TICK_PERIOD,
            initial_matrix_size: DEFAULT_MATRIX_SIZE,
            fallback_matrix_size: DEFAULT_MATRIX_SIZE,
            min_matrix_size: MIN_MATRIX_SIZE,
            max_matrix_size: MAX_MATRIX_SIZE,
            initial_paint_color: CellColor::BLACK,
        }
    }
}

impl SimulatorConfig {
    /// Defaults overridden by any `COLOR_LIFE_*` environment variables that parse.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name. Values that fail to parse are skipped.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var::<f32, _>(&lookup, "COLOR_LIFE_CANVAS_SIZE") {
            self.canvas_size = v;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "COLOR_LIFE_TICK_MS") {
            self.tick_period = Duration::from_millis(ms);
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "COLOR_LIFE_MATRIX_SIZE") {
            self.initial_matrix_size = v;
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "COLOR_LIFE_MIN_SIZE") {
            self.min_matrix_size = v;
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "COLOR_LIFE_MAX_SIZE") {
            self.max_matrix_size = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_size.is_finite() && self.canvas_size > 0.0) {
            return Err(ConfigError::Invalid("canvas_size must be positive"));
        }
        if self.tick_period.is_zero() {
            return Err(ConfigError::Invalid("tick_period must be non-zero"));
        }
        if self.min_matrix_size < 1 {
            return Err(ConfigError::Invalid("min_matrix_size must be at least 1"));
        }
        if self.max_matrix_size < self.min_matrix_size {
            return Err(ConfigError::Invalid("max_matrix_size must not be below min_matrix_size"));
        }
        if !self.size_range_contains(self.initial_matrix_size) {
            return Err(ConfigError::Invalid("initial_matrix_size outside size bounds"));
        }
        if !self.size_range_contains(self.fallback_matrix_size) {
            return Err(ConfigError::Invalid("fallback_matrix_size outside size bounds"));
        }
        Ok(())
    }

    /// Clamps a requested grid size into `[min_matrix_size, max_matrix_size]`.
    pub fn clamp_matrix_size(&self, requested: usize) -> usize {
        requested.clamp(self.min_matrix_size, self.max_matrix_size)
    }

    fn size_range_contains(&self, size: usize) -> bool {
        (self.min_matrix_size..=self.max_matrix_size).contains(&size)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
