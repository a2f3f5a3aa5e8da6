//! Reusable propagator test fixtures.
//!
//! Three standard propagators for pipeline validation and engine testing:
//!
//! - [`ConstPropagator`]: writes a constant to every cell (Full mode).
//! - [`NudgePropagator`]: adds a delta to one cell (Incremental mode).
//! - [`FailingPropagator`]: fails deterministically after N calls.

use kiln_core::PropagatorError;
use kiln_propagator::{Propagator, StepContext, WriteMode};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Writes a constant value to all cells (Full write mode).
pub struct ConstPropagator {
    pub name: String,
    pub value: f32,
}

impl ConstPropagator {
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Propagator for ConstPropagator {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::Full
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        ctx.output().fill(self.value);
        Ok(())
    }
}

/// Adds `delta` to a single cell and leaves the rest untouched.
///
/// Relies on the engine seeding the output buffer, so a broken
/// incremental seed shows up as garbage in the other cells.
pub struct NudgePropagator {
    pub name: String,
    pub index: usize,
    pub delta: f32,
}

impl NudgePropagator {
    pub fn new(name: impl Into<String>, index: usize, delta: f32) -> Self {
        Self {
            name: name.into(),
            index,
            delta,
        }
    }
}

impl Propagator for NudgePropagator {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::Incremental
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let out = ctx.output();
        let len = out.len();
        let cell = out
            .get_mut(self.index)
            .ok_or_else(|| PropagatorError::ExecutionFailed {
                reason: format!("cell {} out of range for {len} cells", self.index),
            })?;
        *cell += self.delta;
        Ok(())
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// On success it behaves like [`NudgePropagator`] on cell 0. Uses
/// `AtomicUsize` for the call counter so it satisfies `Send`.
pub struct FailingPropagator {
    pub name: String,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingPropagator {
    /// Create a propagator that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }
}

impl Propagator for FailingPropagator {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::Incremental
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(PropagatorError::ExecutionFailed {
                reason: format!(
                    "deliberate failure at step {} after {} successful calls",
                    ctx.step_id(),
                    self.succeed_count
                ),
            });
        }
        if let Some(first) = ctx.output().first_mut() {
            *first += 1.0;
        }
        Ok(())
    }
}
