//! The propagators that make up a Kiln heat-conduction step.
//!
//! # Pipeline order (each step)
//!
//! 1. [`BoundaryEnforcer`]: clamps fixed edges (Incremental).
//! 2. [`SourceInjector`]: adds `power * dt` per heat source (Incremental).
//! 3. [`DiffusionStepper`]: explicit 5-point diffusion (Full).
//!
//! Boundaries go first so the stencil sees the clamped edge values, and
//! diffusion goes last so injected heat starts spreading the same step.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod boundary;
pub mod diffusion;
pub mod heat_source;

pub use boundary::BoundaryEnforcer;
pub use diffusion::{face_diffusivity, DiffusionStepper, Parallelism};
pub use heat_source::{SourceInjector, Tap};
