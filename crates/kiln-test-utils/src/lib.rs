//! Test utilities and fixtures for Kiln development.
//!
//! Provides material and grid fixtures plus [`run_stage`], which executes a
//! single propagator against a grid the way the engine does (seeding the
//! output buffer for incremental stages) without building a simulation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use kiln_core::{Material, MaterialId, PropagatorError, Region, StepId};
use kiln_grid::{paint_regions, Grid};
use kiln_propagator::{Propagator, StepContext, WriteMode};

/// A material with diffusivity exactly 1.
pub fn unit_material() -> Material {
    Material::new("unit", 1.0, 1.0, 1.0)
}

/// A material with diffusivity `alpha`.
pub fn material_with_diffusivity(name: &str, alpha: f32) -> Material {
    Material::new(name, alpha, 1.0, 1.0)
}

/// A `width × height` grid at `temperature` with every cell painted `material`.
///
/// Panics if the dimensions are empty; this is a test fixture.
pub fn uniform_grid(width: u32, height: u32, temperature: f32, material: MaterialId) -> Grid {
    let mut grid = Grid::new(width, height, temperature).expect("non-empty grid");
    let whole = Region::new(material, 0, 0, width as i32, height as i32);
    let count = material.index().map_or(0, |i| i + 1);
    if count > 0 {
        paint_regions(&mut grid, &[whole], count).expect("material in range");
    }
    grid
}

/// Build a grid from explicit temperatures, every cell painted `material`.
pub fn grid_with_temperatures(
    width: u32,
    height: u32,
    temperature: Vec<f32>,
    material: MaterialId,
) -> Grid {
    let n = temperature.len();
    Grid::from_parts(width, height, temperature, vec![material; n]).expect("consistent lengths")
}

/// Run one propagator stage against `grid` and return its output buffer.
///
/// Incremental stages see an output seeded with the grid's temperature;
/// full stages see a buffer of NaN, so any cell they forget to write shows up.
pub fn run_stage(
    propagator: &dyn Propagator,
    grid: &Grid,
    dt: f64,
) -> Result<Vec<f32>, PropagatorError> {
    let mut output = match propagator.write_mode() {
        WriteMode::Incremental => grid.temperature().to_vec(),
        WriteMode::Full => vec![f32::NAN; grid.cell_count()],
    };
    let mut ctx = StepContext::new(
        grid.temperature(),
        &mut output,
        grid.material_ids(),
        grid.shape(),
        StepId(1),
        dt,
    )?;
    propagator.step(&mut ctx)?;
    Ok(output)
}

/// Sum of a temperature buffer, accumulated in f64.
pub fn heat(buffer: &[f32]) -> f64 {
    buffer.iter().map(|&t| t as f64).sum()
}
