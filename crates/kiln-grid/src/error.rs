//! Error types for grid construction and material painting.

use kiln_core::MaterialId;
use std::fmt;

/// Errors arising from grid construction or setup-time mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// A dimension does not fit the `i32` coordinate range.
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The rejected value.
        value: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// An array's length disagrees with `width * height`.
    LengthMismatch {
        /// Which array.
        array: &'static str,
        /// `width * height`.
        expected: usize,
        /// The length provided.
        actual: usize,
    },
    /// A region or cell names a material outside the material list.
    UnknownMaterial {
        /// Position of the offending region in its list.
        region: usize,
        /// The material id it references.
        material: MaterialId,
        /// Length of the material list.
        material_count: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum {max}")
            }
            Self::LengthMismatch {
                array,
                expected,
                actual,
            } => write!(
                f,
                "{array} has {actual} entries, grid has {expected} cells"
            ),
            Self::UnknownMaterial {
                region,
                material,
                material_count,
            } => write!(
                f,
                "region {region} references material {material}, \
                 but only {material_count} materials are defined"
            ),
        }
    }
}

impl std::error::Error for GridError {}
