//! Benchmark profiles for the Kiln heat-conduction framework.
//!
//! Provides pre-built [`Scenario`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 100x100 grid (10K cells), three materials, two sources
//! - [`stress_profile`]: 316x316 grid (~100K cells) for stress testing

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use kiln_core::{Boundaries, BoundaryCondition, HeatSource, Material, MaterialId, Region, Side};
use kiln_engine::Scenario;
use kiln_propagators::Parallelism;

/// Build a reference benchmark profile: 100x100 grid (10K cells).
///
/// dt=0.2 (within the stability limit 0.25 / max α = 0.25).
pub fn reference_profile(parallelism: Parallelism) -> Scenario {
    profile(100, parallelism)
}

/// Build a stress benchmark profile: 316x316 grid (~100K cells).
///
/// Same layout as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(parallelism: Parallelism) -> Scenario {
    profile(316, parallelism)
}

fn profile(size: u32, parallelism: Parallelism) -> Scenario {
    let n = size as i32;
    let mut s = Scenario::new(size, size);
    s.time_step = 0.2;
    s.total_time = f64::from(u32::MAX);
    s.initial_temperature = 20.0;
    s.materials = vec![
        Material::new("copper", 1.0, 1.0, 1.0),
        Material::new("steel", 0.2, 1.0, 1.0),
        Material::new("brick", 0.01, 1.0, 1.0),
    ];
    s.regions = vec![
        Region::new(MaterialId(0), 0, 0, n, n),
        Region::new(MaterialId(1), n / 4, n / 4, n / 2, n / 2),
        Region::new(MaterialId(2), n / 2, 0, 2, n),
    ];
    s.heat_sources = vec![
        HeatSource::new(500.0, n / 4, n / 2, n / 20 + 1),
        HeatSource::new(250.0, 3 * n / 4, n / 3, n / 25 + 1),
    ];
    s.boundaries = Boundaries::new()
        .with(Side::Top, BoundaryCondition::fixed(0.0))
        .with(Side::Bottom, BoundaryCondition::fixed(100.0));
    s.parallelism = parallelism;
    s
}
