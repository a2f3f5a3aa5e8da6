//! Kiln: explicit 2D heat conduction over heterogeneous materials.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Kiln sub-crates. For most users, adding `kiln` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use kiln::prelude::*;
//!
//! // A 32×16 copper plate, heated in the middle, with a cold right edge.
//! let mut scenario = Scenario::new(32, 16);
//! scenario.time_step = 0.2;
//! scenario.total_time = 10.0;
//! scenario.materials.push(Material::new("copper", 1.0, 1.0, 1.0));
//! scenario.regions.push(Region::new(MaterialId(0), 0, 0, 32, 16));
//! scenario.heat_sources.push(HeatSource::new(50.0, 16, 8, 3));
//! scenario.boundaries = Boundaries::new().with(Side::Right, BoundaryCondition::fixed(0.0));
//!
//! let mut sim = Simulation::new(scenario).unwrap();
//! let steps = sim.run().unwrap();
//! assert_eq!(steps, 50);
//! assert_eq!(sim.current_step(), StepId(50));
//! assert!(sim.grid().temperature_at(16, 8).unwrap() > 0.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `kiln-core` | IDs, materials, regions, sources, boundaries, errors |
//! | [`grid`] | `kiln-grid` | Grid state, shape, material painting |
//! | [`propagator`] | `kiln-propagator` | Propagator trait and pipeline validation |
//! | [`propagators`] | `kiln-propagators` | Boundary, source, and diffusion stages |
//! | [`engine`] | `kiln-engine` | Scenario description and the step loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`kiln-core`).
pub use kiln_core as types;

/// Grid state and material painting (`kiln-grid`).
///
/// [`grid::Grid`] holds the temperature and material-id arrays;
/// [`grid::paint_regions`] stamps materials at setup.
pub use kiln_grid as grid;

/// Propagator trait and pipeline validation (`kiln-propagator`).
///
/// The [`propagator::Propagator`] trait is the extension point for extra
/// per-step stages passed to [`engine::Simulation::with_pipeline`].
pub use kiln_propagator as propagator;

/// The standard stages (`kiln-propagators`).
///
/// [`propagators::BoundaryEnforcer`], [`propagators::SourceInjector`], and
/// [`propagators::DiffusionStepper`].
pub use kiln_propagators as propagators;

/// Scenario description and the step loop (`kiln-engine`).
pub use kiln_engine as engine;

/// Common imports for typical Kiln usage.
///
/// ```rust
/// use kiln::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use kiln_core::{
        Boundaries, BoundaryCondition, BoundaryKind, HeatSource, Material, MaterialId, Region,
        Side, StepId,
    };

    // Errors
    pub use kiln_core::{PropagatorError, StepError};

    // Grid
    pub use kiln_grid::{Grid, GridShape};

    // Propagator
    pub use kiln_propagator::{Propagator, StepContext, WriteMode};

    // Stages
    pub use kiln_propagators::Parallelism;

    // Engine
    pub use kiln_engine::{ConfigError, Scenario, Simulation, StepMetrics};
}
