//! The step loop.
//!
//! [`Simulation`] owns the grid and two working buffers. A step copies the
//! published temperature into the front buffer; each stage of the pipeline
//! reads the front buffer and writes the back one, and the two are swapped
//! between stages. The grid receives the front buffer only once every stage
//! has succeeded, so it always holds the state at a step boundary.
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`] (can be moved between threads). All mutating
//! methods take `&mut self`, and [`grid()`](Simulation::grid) borrows from
//! `self`, so the borrow checker guarantees nobody observes the grid while
//! a step is in flight.

use std::ops::ControlFlow;
use std::time::Instant;

use kiln_core::{Material, PropagatorError, StepError, StepId};
use kiln_grid::{paint_regions, Grid};
use kiln_propagator::{validate_pipeline, DtBound, PipelinePlan, Propagator, StepContext, WriteMode};
use kiln_propagators::{BoundaryEnforcer, DiffusionStepper, SourceInjector};

use crate::config::{ConfigError, Scenario};
use crate::metrics::StepMetrics;

// Compile-time assertion: Simulation is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

/// The standard pipeline for `scenario`: boundaries, then sources, then
/// diffusion.
pub fn default_pipeline(scenario: &Scenario) -> Result<Vec<Box<dyn Propagator>>, ConfigError> {
    let sources = SourceInjector::new(&scenario.heat_sources).map_err(|source| {
        let index = scenario
            .heat_sources
            .iter()
            .position(|s| s.validate().is_err())
            .unwrap_or_default();
        ConfigError::Source { index, source }
    })?;
    Ok(vec![
        Box::new(BoundaryEnforcer::new(&scenario.boundaries)),
        Box::new(sources),
        Box::new(DiffusionStepper::new(
            &scenario.materials,
            scenario.parallelism,
        )),
    ])
}

/// A running heat-conduction simulation.
///
/// # Example
///
/// ```
/// use kiln_core::{HeatSource, Material, MaterialId, Region};
/// use kiln_engine::{Scenario, Simulation};
///
/// let mut scenario = Scenario::new(16, 16);
/// scenario.materials.push(Material::new("steel", 0.5, 1.0, 1.0));
/// scenario.regions.push(Region::new(MaterialId(0), 0, 0, 16, 16));
/// scenario.heat_sources.push(HeatSource::new(10.0, 8, 8, 2));
///
/// let mut sim = Simulation::new(scenario).unwrap();
/// sim.run().unwrap();
/// assert!(sim.is_finished());
/// assert!(sim.grid().total_heat() > 0.0);
/// ```
pub struct Simulation {
    scenario: Scenario,
    grid: Grid,
    propagators: Vec<Box<dyn Propagator>>,
    plan: PipelinePlan,
    front: Vec<f32>,
    back: Vec<f32>,
    current_step: StepId,
    total_steps: u64,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `scenario`, build the grid, paint materials, and assemble
    /// the standard pipeline.
    pub fn new(scenario: Scenario) -> Result<Self, ConfigError> {
        scenario.validate()?;
        let propagators = default_pipeline(&scenario)?;
        Self::assemble(scenario, propagators)
    }

    /// Like [`new`](Self::new) but with a caller-supplied pipeline.
    pub fn with_pipeline(
        scenario: Scenario,
        propagators: Vec<Box<dyn Propagator>>,
    ) -> Result<Self, ConfigError> {
        scenario.validate()?;
        Self::assemble(scenario, propagators)
    }

    /// Build from a scenario that has already passed validation.
    fn assemble(
        scenario: Scenario,
        propagators: Vec<Box<dyn Propagator>>,
    ) -> Result<Self, ConfigError> {
        let plan = validate_pipeline(&propagators, scenario.time_step)?;
        let grid = build_grid(&scenario)?;
        let total_steps = scenario.step_count();

        if let Some(bound) = plan.dt_bound().filter(|_| plan.exceeds_stability_bound()) {
            tracing::warn!(
                dt = scenario.time_step,
                max_dt = bound.max_dt,
                propagator = %bound.propagator,
                "time step exceeds the explicit stability bound; expect oscillation"
            );
        }
        tracing::info!(
            width = scenario.width,
            height = scenario.height,
            materials = scenario.materials.len(),
            sources = scenario.heat_sources.len(),
            stages = plan.len(),
            steps = total_steps,
            dt = scenario.time_step,
            "simulation ready"
        );

        Ok(Self {
            front: vec![0.0; grid.cell_count()],
            back: vec![0.0; grid.cell_count()],
            scenario,
            grid,
            propagators,
            plan,
            current_step: StepId(0),
            total_steps,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Execute one full step of the pipeline.
    ///
    /// Returns the id of the step just completed.
    ///
    /// # Errors
    ///
    /// [`StepError::Finished`] once every configured step has run.
    /// [`StepError::PropagatorFailed`] if a stage fails; the grid and the
    /// step counter are left exactly as they were before the call.
    pub fn step(&mut self) -> Result<StepId, StepError> {
        if self.is_finished() {
            return Err(StepError::Finished);
        }
        let step_start = Instant::now();
        let next = self.current_step.next();
        let dt = self.scenario.time_step;

        self.front.copy_from_slice(self.grid.temperature());
        let mut propagator_us = Vec::with_capacity(self.propagators.len());
        for (i, prop) in self.propagators.iter().enumerate() {
            let prop_start = Instant::now();
            let failed = |reason: PropagatorError| StepError::PropagatorFailed {
                name: prop.name().to_string(),
                reason,
            };

            if self.plan.write_mode(i) == Some(WriteMode::Incremental) {
                self.back.copy_from_slice(&self.front);
            }
            let mut ctx = StepContext::new(
                &self.front,
                &mut self.back,
                self.grid.material_ids(),
                self.grid.shape(),
                next,
                dt,
            )
            .map_err(failed)?;
            prop.step(&mut ctx).map_err(failed)?;
            std::mem::swap(&mut self.front, &mut self.back);

            propagator_us.push((
                prop.name().to_string(),
                prop_start.elapsed().as_micros() as u64,
            ));
        }

        // Publish. Both buffers were sized from the grid, so this cannot fail.
        let (expected, actual) = (self.grid.cell_count(), self.front.len());
        self.grid
            .swap_temperature(&mut self.front)
            .map_err(|_| StepError::PropagatorFailed {
                name: "publish".to_string(),
                reason: PropagatorError::ShapeMismatch { expected, actual },
            })?;

        self.current_step = next;
        self.last_metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            propagator_us,
            total_heat: self.grid.total_heat(),
        };
        tracing::trace!(
            step = next.0,
            total_us = self.last_metrics.total_us,
            total_heat = self.last_metrics.total_heat,
            "step complete"
        );
        Ok(next)
    }

    /// Run every remaining step. Returns how many were run.
    pub fn run(&mut self) -> Result<u64, StepError> {
        self.run_until(|_, _| ControlFlow::Continue(()))
    }

    /// Run remaining steps, calling `observer` after each one.
    ///
    /// Stops early when `observer` returns [`ControlFlow::Break`]. Returns
    /// how many steps were run.
    pub fn run_until<F>(&mut self, mut observer: F) -> Result<u64, StepError>
    where
        F: FnMut(&Grid, StepId) -> ControlFlow<()>,
    {
        let start = Instant::now();
        let mut ran = 0u64;
        while !self.is_finished() {
            let id = self.step()?;
            ran += 1;
            if observer(&self.grid, id).is_break() {
                break;
            }
        }
        tracing::debug!(
            steps = ran,
            at_step = self.current_step.0,
            elapsed_ms = start.elapsed().as_millis() as u64,
            total_heat = self.grid.total_heat(),
            "run finished"
        );
        Ok(ran)
    }

    /// Restore the initial state: uniform temperature, repainted materials,
    /// step 0.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.grid = build_grid(&self.scenario)?;
        self.current_step = StepId(0);
        self.last_metrics = StepMetrics::default();
        Ok(())
    }

    /// The current grid state.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The scenario this simulation was built from.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// The material table.
    pub fn materials(&self) -> &[Material] {
        &self.scenario.materials
    }

    /// Last completed step (0 after construction or reset).
    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    /// Steps in a full run.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Simulated time so far.
    pub fn elapsed_time(&self) -> f64 {
        self.current_step.0 as f64 * self.scenario.time_step
    }

    /// Whether every configured step has run.
    pub fn is_finished(&self) -> bool {
        self.current_step.0 >= self.total_steps
    }

    /// The tightest advisory timestep bound in the pipeline, if any.
    pub fn stability_bound(&self) -> Option<&DtBound> {
        self.plan.dt_bound()
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("width", &self.grid.width())
            .field("height", &self.grid.height())
            .field("current_step", &self.current_step)
            .field("total_steps", &self.total_steps)
            .field("stages", &self.plan.len())
            .finish()
    }
}

fn build_grid(scenario: &Scenario) -> Result<Grid, ConfigError> {
    let mut grid = Grid::new(
        scenario.width,
        scenario.height,
        scenario.initial_temperature,
    )?;
    paint_regions(&mut grid, &scenario.regions, scenario.materials.len())?;
    Ok(grid)
}
