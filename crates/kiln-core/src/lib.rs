//! Core types for the Kiln heat-conduction framework.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by the rest of the workspace: material and step
//! identifiers, materials, regions, heat sources, boundary conditions,
//! and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod id;
pub mod material;

pub use boundary::{Boundaries, BoundaryCondition, BoundaryKind, Side};
pub use error::{MaterialError, PropagatorError, SourceError, StepError};
pub use id::{MaterialId, StepId};
pub use material::{HeatSource, Material, Region};
