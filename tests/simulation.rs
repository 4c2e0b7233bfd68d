use color_life::{CellColor, Controller, Event, SimulatorConfig};
use std::time::{Duration, Instant};

const PERIOD: Duration = Duration::from_millis(100);

fn controller(size: usize) -> Controller {
    Controller::new(SimulatorConfig {
        initial_matrix_size: size,
        canvas_size: 600.0,
        tick_period: PERIOD,
        ..SimulatorConfig::default()
    })
    .expect("valid configuration")
}

/// Canvas pixel at the center of cell `k` for a grid of `size` over 600px.
fn center(size: usize, k: usize) -> f32 {
    let cell = 600.0 / size as f32;
    (k as f32 + 0.5) * cell
}

fn click(controller: &mut Controller, size: usize, i: usize, j: usize) {
    controller.handle(Event::PointerPressed {
        x: center(size, i),
        y: center(size, j),
    });
    controller.handle(Event::PointerReleased);
}

fn alive_cells(controller: &Controller) -> Vec<(usize, usize)> {
    let snapshot = controller.snapshot();
    let n = snapshot.matrix_size;
    let mut alive = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if snapshot.grid.get(i, j).is_some_and(|c| c.is_alive()) {
                alive.push((i, j));
            }
        }
    }
    alive
}

#[test]
fn blinker_oscillates_through_the_timer() {
    let mut controller = controller(3);
    for (i, j) in [(0, 1), (1, 1), (2, 1)] {
        click(&mut controller, 3, i, j);
    }
    assert_eq!(alive_cells(&controller), vec![(0, 1), (1, 1), (2, 1)]);

    let start = Instant::now();
    controller.handle(Event::PlayPause);
    assert!(controller.poll(start).is_none());

    let first = controller.poll(start + PERIOD).expect("first tick");
    assert_eq!(first.iteration, 1);
    assert_eq!(alive_cells(&controller), vec![(1, 0), (1, 1), (1, 2)]);

    let second = controller.poll(start + PERIOD * 2).expect("second tick");
    assert_eq!(second.iteration, 2);
    assert_eq!(alive_cells(&controller), vec![(0, 1), (1, 1), (2, 1)]);
    assert_eq!(controller.snapshot().live_cells, 3);
}

#[test]
fn block_is_stable_while_iteration_advances() {
    let mut controller = controller(6);
    let green = CellColor::new(0.1, 0.8, 0.3);
    controller.handle(Event::PaintColorChanged(green));
    for (i, j) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
        click(&mut controller, 6, i, j);
    }
    let before = controller.snapshot().grid.clone();

    for _ in 0..4 {
        controller.handle(Event::Step);
    }

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.iteration, 4);
    assert_eq!(snapshot.grid, &before);
    assert_eq!(snapshot.grid.get(2, 2), Some(green));
}

#[test]
fn newborn_blends_parent_colors() {
    let mut controller = controller(5);
    let palette = [
        CellColor::new(1.0, 0.0, 0.0),
        CellColor::new(0.0, 1.0, 0.0),
        CellColor::new(0.0, 0.0, 1.0),
    ];
    // Vertical blinker with a different color per cell.
    for (k, color) in palette.iter().enumerate() {
        controller.handle(Event::PaintColorChanged(*color));
        click(&mut controller, 5, 2, 1 + k);
    }

    let snapshot = controller.handle(Event::Step);
    let survivor = snapshot.grid.get(2, 2).expect("center cell");
    assert_eq!(survivor, palette[1]);

    for (i, j) in [(1, 2), (3, 2)] {
        let child = snapshot.grid.get(i, j).expect("newborn cell");
        for channel in child.to_array() {
            assert!((channel - 1.0 / 3.0).abs() < 1e-6, "({i}, {j}) channel {channel}");
        }
    }
}

#[test]
fn pause_stops_ticks_immediately() {
    let mut controller = controller(3);
    for (i, j) in [(0, 1), (1, 1), (2, 1)] {
        click(&mut controller, 3, i, j);
    }
    let start = Instant::now();
    controller.handle(Event::PlayPause);
    controller.poll(start);
    controller.handle(Event::PlayPause);

    for k in 1..10 {
        assert!(controller.poll(start + PERIOD * k).is_none());
    }
    assert_eq!(controller.snapshot().iteration, 0);
    assert_eq!(alive_cells(&controller), vec![(0, 1), (1, 1), (2, 1)]);
}

#[test]
fn reset_while_running_cannot_be_undone_by_a_late_tick() {
    let mut controller = controller(3);
    for (i, j) in [(0, 1), (1, 1), (2, 1)] {
        click(&mut controller, 3, i, j);
    }
    let start = Instant::now();
    controller.handle(Event::PlayPause);
    controller.poll(start);
    controller.poll(start + PERIOD);

    let snapshot = controller.handle(Event::Reset);
    assert!(!snapshot.is_running);
    assert_eq!(snapshot.iteration, 0);
    assert_eq!(snapshot.live_cells, 0);

    assert!(controller.poll(start + PERIOD * 5).is_none());
    assert!(alive_cells(&controller).is_empty());
}

#[test]
fn resizing_clears_the_pattern() {
    let mut controller = controller(10);
    click(&mut controller, 10, 4, 4);
    click(&mut controller, 10, 5, 4);

    let snapshot = controller.handle(Event::MatrixSizeText("12".to_string()));
    assert_eq!(snapshot.matrix_size, 12);
    assert_eq!(snapshot.live_cells, 0);
    assert!(alive_cells(&controller).is_empty());

    let snapshot = controller.handle(Event::MatrixSizeText("twelve".to_string()));
    assert_eq!(snapshot.matrix_size, 100);
}

#[test]
fn drag_stroke_paints_a_line() {
    let mut controller = controller(10);
    controller.handle(Event::PointerPressed { x: 5.0, y: 305.0 });
    for x in (5..600).step_by(7) {
        controller.handle(Event::PointerDragged { x: x as f32, y: 305.0 });
    }
    controller.handle(Event::PointerReleased);

    let expected: Vec<_> = (0..10).map(|i| (i, 5)).collect();
    assert_eq!(alive_cells(&controller), expected);
}
