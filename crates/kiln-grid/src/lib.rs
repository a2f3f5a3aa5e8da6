//! Grid state for Kiln simulations.
//!
//! This crate owns the foundational mutable state of a simulation: the
//! [`Grid`], holding per-cell temperature and material id as flat
//! row-major arrays, plus its [`GridShape`] (dimensions, indexing, and
//! 4-connected stencil lookup) and the setup-time [`paint_regions`]
//! material painter.
//!
//! # Layout
//!
//! Cell `(x, y)` is stored at index `y * width + x` in both arrays.
//! Out-of-range lookups return the sentinel rather than failing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod painter;
pub mod shape;

pub use error::GridError;
pub use grid::Grid;
pub use painter::paint_regions;
pub use shape::GridShape;
