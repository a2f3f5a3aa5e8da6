//! Propagator trait and step context for Kiln simulations.
//!
//! A propagator is one stage of the per-step pipeline. The engine runs the
//! stages in order; each reads the temperature published by the stage
//! before it through a [`StepContext`] and fills a separate output buffer
//! which then becomes the published state.
//!
//! [`validate_pipeline`] checks a propagator list once at startup and
//! returns the [`PipelinePlan`] the engine executes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod pipeline;
pub mod propagator;

pub use context::StepContext;
pub use pipeline::{validate_pipeline, DtBound, PipelineError, PipelinePlan};
pub use propagator::{Propagator, WriteMode};
