//! Grid dimensions, row-major indexing, and 4-connected stencil lookup.

use crate::error::GridError;
use smallvec::SmallVec;

/// Dimensions of a rectangular grid.
///
/// Cell `(x, y)` lives at flat index `y * width + x`. Both dimensions are
/// non-zero and fit in `i32`, so signed coordinate arithmetic never
/// overflows for in-range offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridShape {
    width: u32,
    height: u32,
}

impl GridShape {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Validate and create a shape.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `width * height`.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Flat index of `(x, y)`, or `None` if out of bounds.
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// `(x, y)` of a flat index. The index must be below `cell_count()`.
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }

    /// Flat indices of the existing 4-connected neighbours of `(x, y)`.
    ///
    /// Neighbours outside the grid are omitted, so edge cells have three
    /// and corner cells two. Order is north, south, west, east.
    pub fn neighbours(&self, x: u32, y: u32) -> SmallVec<[usize; 4]> {
        let w = self.width as usize;
        let i = y as usize * w + x as usize;
        let mut out = SmallVec::new();
        if y > 0 {
            out.push(i - w);
        }
        if y + 1 < self.height {
            out.push(i + w);
        }
        if x > 0 {
            out.push(i - 1);
        }
        if x + 1 < self.width {
            out.push(i + 1);
        }
        out
    }
}
