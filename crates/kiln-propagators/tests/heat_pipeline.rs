//! Chains the three stages by hand, publishing each stage's output before
//! the next runs, and checks whole-step behaviour.

use kiln_core::{Boundaries, BoundaryCondition, HeatSource, MaterialId, Side};
use kiln_grid::Grid;
use kiln_propagator::Propagator;
use kiln_propagators::{BoundaryEnforcer, DiffusionStepper, Parallelism, SourceInjector};
use kiln_test_utils::{run_stage, uniform_grid, unit_material};

fn step_all(grid: &mut Grid, stages: &[&dyn Propagator], dt: f64) {
    for stage in stages {
        let mut out = run_stage(*stage, grid, dt).unwrap();
        grid.swap_temperature(&mut out).unwrap();
    }
}

#[test]
fn insulated_box_with_source_gains_exactly_the_injected_energy() {
    let mut grid = uniform_grid(16, 16, 20.0, MaterialId(0));
    let boundary = BoundaryEnforcer::new(&Boundaries::new());
    let sources = SourceInjector::new(&[HeatSource::new(50.0, 8, 8, 2)]).unwrap();
    let diffusion = DiffusionStepper::new(&[unit_material()], Parallelism::Rows);
    let dt = 0.1;

    let before = grid.total_heat();
    for _ in 0..25 {
        step_all(&mut grid, &[&boundary, &sources, &diffusion], dt);
    }
    let gained = grid.total_heat() - before;
    assert!((gained - 25.0 * 50.0 * dt).abs() < 0.05, "gained {gained}");
}

#[test]
fn fixed_edge_heats_interior_over_time() {
    let mut grid = uniform_grid(8, 8, 0.0, MaterialId(0));
    let boundary =
        BoundaryEnforcer::new(&Boundaries::new().with(Side::Top, BoundaryCondition::fixed(100.0)));
    let sources = SourceInjector::new(&[]).unwrap();
    let diffusion = DiffusionStepper::new(&[unit_material()], Parallelism::Sequential);

    let mut last = 0.0;
    for _ in 0..20 {
        step_all(&mut grid, &[&boundary, &sources, &diffusion], 0.2);
        let probe = grid.temperature_at(4, 3).unwrap();
        assert!(probe >= last);
        last = probe;
    }
    assert!(last > 0.0);
    assert!(grid.temperature().iter().all(|&t| (0.0..=100.0).contains(&t)));
}

#[test]
fn sentinel_only_grid_only_changes_where_clamped_or_injected() {
    let mut grid = uniform_grid(5, 5, 1.0, MaterialId::NONE);
    let boundary =
        BoundaryEnforcer::new(&Boundaries::new().with(Side::Left, BoundaryCondition::fixed(9.0)));
    let sources = SourceInjector::new(&[HeatSource::new(1.0, 2, 2, 1)]).unwrap();
    let diffusion = DiffusionStepper::new(&[unit_material()], Parallelism::Rows);

    step_all(&mut grid, &[&boundary, &sources, &diffusion], 1.0);

    for y in 0..5i64 {
        assert_eq!(grid.temperature_at(0, y), Some(9.0));
    }
    assert_eq!(grid.temperature_at(2, 2), Some(2.0));
    assert_eq!(grid.temperature_at(3, 3), Some(1.0));
}
