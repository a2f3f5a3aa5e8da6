//! Kiln Quickstart: a copper plate with an insulating brick wall.
//!
//! Demonstrates:
//!   1. Describing materials, regions, a heat source, and boundaries
//!   2. Building a Simulation from a Scenario
//!   3. Observing the grid between steps and stopping early
//!   4. Resetting and running to completion
//!
//! Run with:
//!   cargo run --example quickstart

use std::ops::ControlFlow;

use kiln_core::{Boundaries, BoundaryCondition, HeatSource, Material, MaterialId, Region};
use kiln_engine::{Scenario, Simulation};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// ─── Grid parameters ────────────────────────────────────────────

const WIDTH: u32 = 48;
const HEIGHT: u32 = 24;
const DT: f64 = 0.2;
const TOTAL_TIME: f64 = 40.0;

// ─── Materials (diffusivity = k / (rho * c)) ────────────────────

const COPPER: MaterialId = MaterialId(0);
const BRICK: MaterialId = MaterialId(1);

fn scenario() -> Scenario {
    let mut s = Scenario::new(WIDTH, HEIGHT);
    s.time_step = DT;
    s.total_time = TOTAL_TIME;
    s.initial_temperature = 20.0;
    s.materials = vec![
        Material::new("copper", 1.0, 1.0, 1.0).with_color([184, 115, 51]),
        Material::new("brick", 0.05, 1.0, 1.0).with_color([150, 60, 40]),
    ];
    s.regions = vec![
        Region::new(COPPER, 0, 0, WIDTH as i32, HEIGHT as i32),
        Region::new(BRICK, 24, 0, 2, HEIGHT as i32),
    ];
    s.heat_sources = vec![HeatSource::new(200.0, 10, 12, 3)];
    s.boundaries = Boundaries::from_named([
        ("right", BoundaryCondition::fixed(0.0)),
        ("top", BoundaryCondition::insulated()),
    ]);
    s
}

fn probe(sim: &Simulation, x: i64) -> f32 {
    sim.grid().temperature_at(x, HEIGHT as i64 / 2).unwrap_or(f32::NAN)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut sim = Simulation::new(scenario())?;
    println!(
        "{}x{} grid, {} steps of dt={DT}",
        sim.grid().width(),
        sim.grid().height(),
        sim.total_steps()
    );
    if let Some(bound) = sim.stability_bound() {
        println!("stable for dt <= {:.3} ({})", bound.max_dt, bound.propagator);
    }

    // Run until the cell just left of the wall passes 40 degrees.
    let ran = sim.run_until(|grid, step| {
        let t = grid.temperature_at(23, HEIGHT as i64 / 2).unwrap_or(0.0);
        if step.0 % 25 == 0 {
            println!("step {:>4}: wall-side temperature {t:.2}", step.0);
        }
        if t > 40.0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;
    println!(
        "stopped after {ran} steps (t = {:.1}); left of wall {:.2}, right of wall {:.2}",
        sim.elapsed_time(),
        probe(&sim, 23),
        probe(&sim, 26),
    );

    // Start over and run the whole scenario.
    sim.reset()?;
    sim.run()?;
    let m = sim.last_metrics();
    println!(
        "finished at step {} (t = {:.1}), total heat {:.1}, last step {}us",
        sim.current_step(),
        sim.elapsed_time(),
        m.total_heat,
        m.total_us
    );
    for (name, us) in &m.propagator_us {
        println!("  {name:<14}{us:>6}us");
    }
    println!("hot side probe {:.2}, cold side probe {:.2}", probe(&sim, 10), probe(&sim, 40));

    Ok(())
}
