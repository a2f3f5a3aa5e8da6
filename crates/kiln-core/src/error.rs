//! Error types for the Kiln simulation framework.
//!
//! Organized by subsystem: material and heat-source validation
//! (setup time), propagator execution, and whole-step execution.

use std::error::Error;
use std::fmt;

use crate::id::MaterialId;

/// A material's physical properties are unusable by the solver.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialError {
    /// A property is NaN or infinite.
    NonFinite {
        /// Which property.
        property: &'static str,
        /// The offending value.
        value: f32,
    },
    /// Thermal conductivity is negative.
    NegativeConductivity {
        /// The offending value.
        value: f32,
    },
    /// Density or specific heat is zero or negative, so `k/(ρc)` is undefined.
    NonPositive {
        /// Which property.
        property: &'static str,
        /// The offending value.
        value: f32,
    },
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { property, value } => {
                write!(f, "{property} must be finite, got {value}")
            }
            Self::NegativeConductivity { value } => {
                write!(f, "thermal conductivity must be >= 0, got {value}")
            }
            Self::NonPositive { property, value } => {
                write!(f, "{property} must be > 0, got {value}")
            }
        }
    }
}

impl Error for MaterialError {}

/// A heat source cannot be applied.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceError {
    /// Radius is negative. A radius of zero is valid and injects nothing.
    NegativeRadius {
        /// The offending radius.
        radius: i32,
    },
    /// Power is NaN or infinite.
    NonFinitePower {
        /// The offending power.
        power: f32,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeRadius { radius } => {
                write!(f, "heat source radius must be >= 0, got {radius}")
            }
            Self::NonFinitePower { power } => {
                write!(f, "heat source power must be finite, got {power}")
            }
        }
    }
}

impl Error for SourceError {}

/// Errors from individual propagator execution.
///
/// Returned by `Propagator::step()` and wrapped in
/// [`StepError::PropagatorFailed`] by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropagatorError {
    /// The propagator's step function failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A cell carries a material id that is neither the sentinel nor in
    /// the material table.
    UnknownMaterial {
        /// Row-major index of the first offending cell.
        cell: usize,
        /// The id found there.
        material: MaterialId,
        /// Size of the material table.
        material_count: usize,
    },
    /// Input and output buffers disagree with the grid shape.
    ShapeMismatch {
        /// Cells expected from the grid shape.
        expected: usize,
        /// Cells actually provided.
        actual: usize,
    },
}

impl fmt::Display for PropagatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::UnknownMaterial {
                cell,
                material,
                material_count,
            } => write!(
                f,
                "cell {cell} has material {material}, table has {material_count} entries"
            ),
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "buffer has {actual} cells, grid expects {expected}")
            }
        }
    }
}

impl Error for PropagatorError {}

/// Errors from the engine while advancing one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A propagator returned an error. The grid keeps the state of the
    /// last completed step.
    PropagatorFailed {
        /// Name of the failing propagator.
        name: String,
        /// The underlying propagator error.
        reason: PropagatorError,
    },
    /// The configured number of steps has already been run.
    Finished,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropagatorFailed { name, reason } => {
                write!(f, "propagator '{name}' failed: {reason}")
            }
            Self::Finished => write!(f, "simulation already ran all steps"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PropagatorFailed { reason, .. } => Some(reason),
            Self::Finished => None,
        }
    }
}
