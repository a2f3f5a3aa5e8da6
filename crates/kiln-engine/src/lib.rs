//! Simulation engine driving Kiln heat-conduction scenarios.
//!
//! A [`Scenario`] describes the domain, materials, sources, boundaries and
//! timing. [`Simulation`] validates it, paints the grid, and runs the
//! per-step pipeline (boundaries, sources, diffusion) with a double-buffered
//! publish after every stage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod simulation;

pub use config::{ConfigError, Scenario};
pub use metrics::StepMetrics;
pub use simulation::{default_pipeline, Simulation};
