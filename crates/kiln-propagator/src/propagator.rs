//! The [`Propagator`] trait and [`WriteMode`] enum.
//!
//! Propagators are stateless stages executed in sequence each step. Each
//! stage reads the frozen temperature published by the previous stage and
//! writes a complete output buffer, which the engine then publishes.

use crate::context::StepContext;
use kiln_core::PropagatorError;

/// Output buffer initialization strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Output buffer contents are unspecified. Propagator MUST write every cell.
    ///
    /// Used by stencil updates that compute each cell from the previous
    /// buffer (e.g. diffusion).
    Full,

    /// Output buffer seeded from the previous state via memcpy.
    /// Propagator modifies only the cells it needs to update.
    ///
    /// Used for sparse edits (boundary clamping, source injection).
    Incremental,
}

/// A stateless operator in the per-step pipeline.
///
/// # Contract
///
/// - `step()` MUST be deterministic: same inputs produce identical outputs.
/// - `step()` reads only `ctx.previous()` and writes only `ctx.output()`;
///   the two never alias, so cell updates within a step are independent.
/// - `&self`: propagators are stateless; mutable state lives in the grid.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores propagators as
/// `Vec<Box<dyn Propagator>>`.
///
/// # Examples
///
/// A propagator that cools every cell by a fixed amount:
///
/// ```
/// use kiln_propagator::{Propagator, StepContext, WriteMode};
/// use kiln_core::PropagatorError;
///
/// struct Chill(f32);
///
/// impl Propagator for Chill {
///     fn name(&self) -> &str { "chill" }
///
///     fn write_mode(&self) -> WriteMode { WriteMode::Full }
///
///     fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
///         let (prev, out) = ctx.split();
///         for (o, p) in out.iter_mut().zip(prev) {
///             *o = p - self.0;
///         }
///         Ok(())
///     }
/// }
///
/// assert_eq!(Chill(1.0).name(), "chill");
/// ```
pub trait Propagator: Send + 'static {
    /// Human-readable name for error reporting and logging.
    fn name(&self) -> &str;

    /// How the engine prepares the output buffer before `step()`.
    fn write_mode(&self) -> WriteMode;

    /// Largest timestep for which this propagator is numerically stable.
    ///
    /// Advisory: the engine reports when the configured `dt` exceeds it
    /// but never changes or rejects the step. Return `None` for no bound.
    fn max_dt(&self) -> Option<f64> {
        None
    }

    /// Execute the propagator for one step.
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError>;
}
