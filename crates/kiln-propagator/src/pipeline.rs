//! Pipeline validation and planning.
//!
//! [`validate_pipeline`] runs once at engine startup to check the propagator
//! list for structural errors and build the [`PipelinePlan`]: each stage's
//! write mode plus the tightest advisory stability bound.

use indexmap::IndexMap;

use crate::propagator::{Propagator, WriteMode};

use std::error::Error;
use std::fmt;

// ── Plan ───────────────────────────────────────────────────────────

/// The stability bound imposed by the most restrictive propagator.
#[derive(Debug, Clone, PartialEq)]
pub struct DtBound {
    /// Largest stable timestep.
    pub max_dt: f64,
    /// Which propagator imposes it.
    pub propagator: String,
}

/// Result of a successful [`validate_pipeline`] call.
///
/// Stage names are unique, so the plan is keyed by name in pipeline order.
#[derive(Debug)]
#[must_use]
pub struct PipelinePlan {
    stages: IndexMap<String, WriteMode>,
    dt_bound: Option<DtBound>,
    dt: f64,
}

impl PipelinePlan {
    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the plan covers zero stages. Never true for a validated plan.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Write mode of the stage at `index`.
    pub fn write_mode(&self, index: usize) -> Option<WriteMode> {
        self.stages.get_index(index).map(|(_, &m)| m)
    }

    /// Stage names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.stages.keys().map(String::as_str)
    }

    /// The tightest advisory `max_dt`, if any stage declares one.
    pub fn dt_bound(&self) -> Option<&DtBound> {
        self.dt_bound.as_ref()
    }

    /// Whether the validated `dt` exceeds the advisory stability bound.
    ///
    /// The explicit scheme oscillates without bound in that case; the
    /// engine reports it but runs the step as configured.
    pub fn exceeds_stability_bound(&self) -> bool {
        self.dt_bound
            .as_ref()
            .is_some_and(|bound| self.dt > bound.max_dt)
    }
}

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from pipeline validation (startup-time, not per-step).
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// No propagators registered.
    EmptyPipeline,

    /// Two propagators share a name, making error reports ambiguous.
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// The configured dt is not a valid timestep (NaN, infinity, zero, or negative).
    InvalidDt {
        /// The invalid dt value.
        value: f64,
    },

    /// A propagator's `max_dt()` returned a non-finite or non-positive value.
    InvalidMaxDt {
        /// Which propagator.
        propagator: String,
        /// The invalid max_dt value.
        value: f64,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPipeline => write!(f, "pipeline has no propagators"),
            Self::DuplicateName { name } => {
                write!(f, "propagator name '{name}' is used more than once")
            }
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::InvalidMaxDt { propagator, value } => {
                write!(
                    f,
                    "propagator '{propagator}' returned invalid max_dt: {value} \
                     (must be finite and positive)"
                )
            }
        }
    }
}

impl Error for PipelineError {}

// ── Validation ─────────────────────────────────────────────────────

/// Validate a propagator pipeline and build the [`PipelinePlan`].
///
/// Checks performed (all at startup, not per-step):
///
/// 1. `dt` is finite and positive.
/// 2. Pipeline is non-empty.
/// 3. Propagator names are unique.
/// 4. Every declared `max_dt` is finite and positive.
///
/// A `dt` above the tightest `max_dt` is *not* an error; see
/// [`PipelinePlan::exceeds_stability_bound`].
pub fn validate_pipeline(
    propagators: &[Box<dyn Propagator>],
    dt: f64,
) -> Result<PipelinePlan, PipelineError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(PipelineError::InvalidDt { value: dt });
    }

    if propagators.is_empty() {
        return Err(PipelineError::EmptyPipeline);
    }

    let mut stages: IndexMap<String, WriteMode> = IndexMap::with_capacity(propagators.len());
    for prop in propagators {
        let name = prop.name().to_string();
        if stages.contains_key(&name) {
            return Err(PipelineError::DuplicateName { name });
        }
        stages.insert(name, prop.write_mode());
    }

    let mut dt_bound: Option<DtBound> = None;
    for prop in propagators {
        if let Some(max) = prop.max_dt() {
            if !max.is_finite() || max <= 0.0 {
                return Err(PipelineError::InvalidMaxDt {
                    propagator: prop.name().to_string(),
                    value: max,
                });
            }
            if dt_bound.as_ref().is_none_or(|b| max < b.max_dt) {
                dt_bound = Some(DtBound {
                    max_dt: max,
                    propagator: prop.name().to_string(),
                });
            }
        }
    }

    Ok(PipelinePlan {
        stages,
        dt_bound,
        dt,
    })
}
