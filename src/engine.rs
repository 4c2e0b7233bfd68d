//! Simulation engine: the Idle/Running state machine and its periodic job.
//!
//! Ticks are driven by whoever owns the [`Simulation`] calling [`Simulation::poll`]
//! from its event loop. Every mutation goes through `&mut self`, so a tick and a
//! user edit can never interleave, and dropping the job in [`Simulation::pause`] or
//! [`Simulation::reset`] means no later poll can tick.

use crate::color::CellColor;
use crate::grid::{Grid, GridError};
use crate::rules::{apply_rules, GameRules};
use std::time::{Duration, Instant};

/// Repeating timer that exists only while the simulation runs.
#[derive(Debug, Clone)]
pub struct SimulationJob {
    period: Duration,
    next_due: Option<Instant>,
}

impl SimulationJob {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Returns true when a tick is due at `now` and re-arms one period later.
    ///
    /// The first poll only arms the timer. Missed periods are dropped instead of
    /// queued, so a slow frame produces one tick, not a burst.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            None => {
                self.next_due = Some(now + self.period);
                false
            }
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            Some(_) => false,
        }
    }
}

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// What a completed tick changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub iteration: u64,
    pub live_cells: usize,
    pub births: usize,
    pub deaths: usize,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    rules: GameRules,
    iteration: u64,
    live_cells: usize,
    period: Duration,
    job: Option<SimulationJob>,
}

impl Simulation {
    pub fn new(size: usize, period: Duration) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid::new(size)?,
            rules: GameRules::conway(),
            iteration: 0,
            live_cells: 0,
            period,
            job: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn live_cells(&self) -> usize {
        self.live_cells
    }

    pub fn phase(&self) -> Phase {
        if self.job.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.job.is_some()
    }

    /// Idle → Running. No-op when already running.
    pub fn play(&mut self) {
        if self.job.is_none() {
            log::info!("Simulation started at iteration {}", self.iteration);
            self.job = Some(SimulationJob::new(self.period));
        }
    }

    /// Running → Idle. Once this returns no tick can apply until the next `play`.
    pub fn pause(&mut self) {
        if self.job.take().is_some() {
            log::info!("Simulation paused at iteration {}", self.iteration);
        }
    }

    /// Stops the job and clears the board at its current size.
    pub fn reset(&mut self) {
        self.job = None;
        self.grid = Grid::from_cells(self.grid.size(), vec![CellColor::WHITE; self.grid.cells().len()]);
        self.iteration = 0;
        self.live_cells = 0;
        log::info!("Simulation reset ({0}x{0})", self.grid.size());
    }

    /// Stops the job and replaces the board with an empty one of `new_size`.
    pub fn resize(&mut self, new_size: usize) -> Result<(), GridError> {
        let grid = self.grid.resized(new_size)?;
        self.job = None;
        self.grid = grid;
        self.iteration = 0;
        self.live_cells = 0;
        log::info!("Grid resized to {0}x{0}", new_size);
        Ok(())
    }

    /// Applies a user edit to the current board.
    pub fn edit<F, T>(&mut self, f: F) -> Result<T, GridError>
    where
        F: FnOnce(&mut Grid) -> Result<T, GridError>,
    {
        let out = f(&mut self.grid)?;
        self.live_cells = self.grid.live_count();
        Ok(out)
    }

    /// Computes and installs the next generation in one step.
    pub fn tick(&mut self) -> TickReport {
        let generation = apply_rules(&self.grid, &self.rules);
        self.live_cells = generation.live_cells();
        self.grid = generation.grid;
        self.iteration += 1;

        let report = TickReport {
            iteration: self.iteration,
            live_cells: self.live_cells,
            births: generation.births,
            deaths: generation.deaths,
        };
        log::debug!(
            "Tick {}: {} live (+{} / -{})",
            report.iteration,
            report.live_cells,
            report.births,
            report.deaths
        );
        report
    }

    /// Runs one tick if running and the period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<TickReport> {
        let due = self.job.as_mut().map_or(false, |job| job.fire(now));
        if due {
            Some(self.tick())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    fn blinker() -> Simulation {
        let mut sim = Simulation::new(5, PERIOD).unwrap();
        sim.edit(|g| {
            g.set(2, 1, CellColor::BLACK)?;
            g.set(2, 2, CellColor::BLACK)?;
            g.set(2, 3, CellColor::BLACK)
        })
        .unwrap();
        sim
    }

    #[test]
    fn job_arms_then_fires_once_per_period() {
        let start = Instant::now();
        let mut job = SimulationJob::new(PERIOD);
        assert!(!job.fire(start));
        assert!(!job.fire(start + Duration::from_millis(50)));
        assert!(job.fire(start + PERIOD));
        assert!(!job.fire(start + PERIOD + Duration::from_millis(10)));
        assert!(job.fire(start + PERIOD * 2));
    }

    #[test]
    fn missed_periods_are_skipped() {
        let start = Instant::now();
        let mut job = SimulationJob::new(PERIOD);
        job.fire(start);
        let late = start + PERIOD * 10;
        assert!(job.fire(late));
        assert!(!job.fire(late + Duration::from_millis(1)));
    }

    #[test]
    fn poll_only_ticks_while_running() {
        let start = Instant::now();
        let mut sim = blinker();
        assert_eq!(sim.phase(), Phase::Idle);
        assert_eq!(sim.poll(start + PERIOD * 5), None);
        assert_eq!(sim.iteration(), 0);

        sim.play();
        assert_eq!(sim.phase(), Phase::Running);
        assert_eq!(sim.poll(start), None);
        let report = sim.poll(start + PERIOD).expect("tick due");
        assert_eq!(report.iteration, 1);
        assert_eq!(report.live_cells, 3);
    }

    #[test]
    fn pause_prevents_any_further_tick() {
        let start = Instant::now();
        let mut sim = blinker();
        sim.play();
        sim.poll(start);
        sim.pause();
        assert!(!sim.is_running());
        assert_eq!(sim.poll(start + PERIOD * 3), None);
        assert_eq!(sim.iteration(), 0);
    }

    #[test]
    fn reset_clears_board_and_counters() {
        let mut sim = blinker();
        sim.play();
        sim.tick();
        sim.tick();
        sim.reset();
        assert!(!sim.is_running());
        assert_eq!(sim.iteration(), 0);
        assert_eq!(sim.live_cells(), 0);
        assert_eq!(sim.grid().size(), 5);
        assert!(sim.grid().is_empty());
    }

    #[test]
    fn resize_stops_and_clears() {
        let mut sim = blinker();
        sim.play();
        sim.tick();
        sim.resize(8).unwrap();
        assert!(!sim.is_running());
        assert_eq!(sim.grid().size(), 8);
        assert!(sim.grid().is_empty());
        assert_eq!(sim.iteration(), 0);
        assert!(sim.resize(0).is_err());
        assert_eq!(sim.grid().size(), 8);
    }

    #[test]
    fn edit_keeps_live_count_in_sync() {
        let mut sim = Simulation::new(4, PERIOD).unwrap();
        sim.edit(|g| g.toggle(1, 1, CellColor::BLACK)).unwrap();
        assert_eq!(sim.live_cells(), 1);
        let err = sim.edit(|g| g.toggle(4, 0, CellColor::BLACK)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
        assert_eq!(sim.live_cells(), 1);
    }

    #[test]
    fn block_survives_many_ticks() {
        let c = CellColor::new(0.7, 0.2, 0.9);
        let mut sim = Simulation::new(6, PERIOD).unwrap();
        sim.edit(|g| {
            for (i, j) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
                g.set(i, j, c)?;
            }
            Ok(())
        })
        .unwrap();
        let before = sim.grid().clone();
        for expected in 1..=5 {
            let report = sim.tick();
            assert_eq!(report.iteration, expected);
            assert_eq!(sim.grid(), &before);
        }
        assert_eq!(sim.live_cells(), 4);
    }
}
