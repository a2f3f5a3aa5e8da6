//! Execution context passed to propagators during a step.
//!
//! [`StepContext`] pairs the frozen previous temperature buffer with a
//! separate mutable output buffer, plus the read-only material map, grid
//! shape, step id and timestep.

use kiln_core::{MaterialId, PropagatorError, StepId};
use kiln_grid::GridShape;

/// Execution context passed to each propagator's `step()` method.
///
/// # Double buffering
///
/// - **`previous()`** is the temperature published before this stage ran.
///   It is never written during the stage.
/// - **`output()`** is a distinct buffer of the same length. For
///   [`WriteMode::Incremental`](crate::WriteMode::Incremental) stages it
///   starts as a copy of `previous()`; for `Full` stages its contents are
///   unspecified.
///
/// Because the two never alias, every output cell can be computed
/// independently from the previous buffer.
pub struct StepContext<'a> {
    previous: &'a [f32],
    output: &'a mut [f32],
    material_ids: &'a [MaterialId],
    shape: GridShape,
    step_id: StepId,
    dt: f64,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the engine, not by propagators directly.
    /// For testing, see the fixtures in `kiln-test-utils`.
    ///
    /// Fails with [`PropagatorError::ShapeMismatch`] if any slice length
    /// differs from `shape.cell_count()`.
    pub fn new(
        previous: &'a [f32],
        output: &'a mut [f32],
        material_ids: &'a [MaterialId],
        shape: GridShape,
        step_id: StepId,
        dt: f64,
    ) -> Result<Self, PropagatorError> {
        let expected = shape.cell_count();
        for actual in [previous.len(), output.len(), material_ids.len()] {
            if actual != expected {
                return Err(PropagatorError::ShapeMismatch { expected, actual });
            }
        }
        Ok(Self {
            previous,
            output,
            material_ids,
            shape,
            step_id,
            dt,
        })
    }

    /// Frozen temperature from before this stage.
    ///
    /// The returned slice outlives the borrow of `self`, so it can be held
    /// alongside [`output`](Self::output).
    pub fn previous(&self) -> &'a [f32] {
        self.previous
    }

    /// Mutable output buffer for this stage.
    pub fn output(&mut self) -> &mut [f32] {
        self.output
    }

    /// Borrow the previous and output buffers at the same time.
    pub fn split(&mut self) -> (&[f32], &mut [f32]) {
        (self.previous, self.output)
    }

    /// Per-cell material ids, row-major.
    pub fn material_ids(&self) -> &'a [MaterialId] {
        self.material_ids
    }

    /// Grid dimensions.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Id of the step being computed (the first step is `StepId(1)`).
    pub fn step_id(&self) -> StepId {
        self.step_id
    }

    /// Configured timestep.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}
