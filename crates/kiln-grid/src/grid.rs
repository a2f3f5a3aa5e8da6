//! The grid state: per-cell temperature and material identity.

use crate::error::GridError;
use crate::shape::GridShape;
use kiln_core::MaterialId;

/// Dense row-major temperature and material-id arrays.
///
/// The grid exclusively owns both arrays. Material ids are written only
/// during setup (see [`paint_regions`](crate::paint_regions)); temperature
/// is replaced wholesale each pipeline stage via
/// [`swap_temperature`](Grid::swap_temperature), so readers between steps
/// never observe a partially updated field.
///
/// # Examples
///
/// ```
/// use kiln_grid::Grid;
/// use kiln_core::MaterialId;
///
/// let grid = Grid::new(4, 3, 20.0).unwrap();
/// assert_eq!(grid.cell_count(), 12);
/// assert_eq!(grid.temperature_at(3, 2), Some(20.0));
/// assert_eq!(grid.material_at(1, 1), MaterialId::NONE);
/// assert_eq!(grid.material_at(-1, 0), MaterialId::NONE);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    shape: GridShape,
    temperature: Vec<f32>,
    material_ids: Vec<MaterialId>,
}

impl Grid {
    /// A grid at uniform `initial_temperature` with no materials assigned.
    pub fn new(width: u32, height: u32, initial_temperature: f32) -> Result<Self, GridError> {
        let shape = GridShape::new(width, height)?;
        let n = shape.cell_count();
        Ok(Self {
            shape,
            temperature: vec![initial_temperature; n],
            material_ids: vec![MaterialId::NONE; n],
        })
    }

    /// Assemble a grid from existing arrays.
    ///
    /// Both arrays must have exactly `width * height` entries.
    pub fn from_parts(
        width: u32,
        height: u32,
        temperature: Vec<f32>,
        material_ids: Vec<MaterialId>,
    ) -> Result<Self, GridError> {
        let shape = GridShape::new(width, height)?;
        let expected = shape.cell_count();
        if temperature.len() != expected {
            return Err(GridError::LengthMismatch {
                array: "temperature",
                expected,
                actual: temperature.len(),
            });
        }
        if material_ids.len() != expected {
            return Err(GridError::LengthMismatch {
                array: "material_ids",
                expected,
                actual: material_ids.len(),
            });
        }
        Ok(Self {
            shape,
            temperature,
            material_ids,
        })
    }

    /// Grid dimensions.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.shape.width()
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.shape.height()
    }

    /// `width * height`.
    pub fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }

    /// Current temperatures, row-major.
    pub fn temperature(&self) -> &[f32] {
        &self.temperature
    }

    /// Mutable temperatures, for collaborators that reset or perturb state
    /// between steps. The slice length is fixed.
    pub fn temperature_mut(&mut self) -> &mut [f32] {
        &mut self.temperature
    }

    /// Per-cell material ids, row-major.
    pub fn material_ids(&self) -> &[MaterialId] {
        &self.material_ids
    }

    pub(crate) fn material_ids_mut(&mut self) -> &mut [MaterialId] {
        &mut self.material_ids
    }

    /// Material at `(x, y)`, or [`MaterialId::NONE`] when out of bounds or unset.
    pub fn material_at(&self, x: i64, y: i64) -> MaterialId {
        self.shape
            .index(x, y)
            .map_or(MaterialId::NONE, |i| self.material_ids[i])
    }

    /// Temperature at `(x, y)`, or `None` when out of bounds.
    pub fn temperature_at(&self, x: i64, y: i64) -> Option<f32> {
        self.shape.index(x, y).map(|i| self.temperature[i])
    }

    /// Publish a fully computed temperature buffer.
    ///
    /// Swaps `buffer` with the grid's temperature array; afterwards
    /// `buffer` holds the previous state and may be reused as the next
    /// output buffer.
    pub fn swap_temperature(&mut self, buffer: &mut Vec<f32>) -> Result<(), GridError> {
        if buffer.len() != self.temperature.len() {
            return Err(GridError::LengthMismatch {
                array: "temperature buffer",
                expected: self.temperature.len(),
                actual: buffer.len(),
            });
        }
        std::mem::swap(&mut self.temperature, buffer);
        Ok(())
    }

    /// Sum of all cell temperatures, accumulated in `f64`.
    pub fn total_heat(&self) -> f64 {
        self.temperature.iter().map(|&t| t as f64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_uniform_and_unset() {
        let g = Grid::new(5, 4, 12.5).unwrap();
        assert_eq!(g.width(), 5);
        assert_eq!(g.height(), 4);
        assert_eq!(g.temperature().len(), 20);
        assert_eq!(g.material_ids().len(), 20);
        assert!(g.temperature().iter().all(|&t| t == 12.5));
        assert!(g.material_ids().iter().all(|m| m.is_none()));
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(Grid::new(0, 3, 0.0), Err(GridError::EmptyGrid));
    }

    #[test]
    fn from_parts_rejects_mismatched_lengths() {
        let err = Grid::from_parts(3, 3, vec![0.0; 8], vec![MaterialId::NONE; 9]).unwrap_err();
        assert_eq!(
            err,
            GridError::LengthMismatch {
                array: "temperature",
                expected: 9,
                actual: 8
            }
        );
        let err = Grid::from_parts(3, 3, vec![0.0; 9], vec![MaterialId(0); 10]).unwrap_err();
        assert!(matches!(
            err,
            GridError::LengthMismatch {
                array: "material_ids",
                ..
            }
        ));
    }

    #[test]
    fn material_at_out_of_bounds_is_sentinel() {
        let g = Grid::from_parts(2, 2, vec![0.0; 4], vec![MaterialId(0); 4]).unwrap();
        assert_eq!(g.material_at(1, 1), MaterialId(0));
        for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2), (i64::MAX, 0), (i64::MIN, 1)] {
            assert_eq!(g.material_at(x, y), MaterialId::NONE, "({x}, {y})");
        }
    }

    #[test]
    fn swap_temperature_publishes_and_returns_old() {
        let mut g = Grid::new(2, 2, 1.0).unwrap();
        let mut buf = vec![5.0; 4];
        g.swap_temperature(&mut buf).unwrap();
        assert_eq!(g.temperature(), &[5.0; 4]);
        assert_eq!(buf, vec![1.0; 4]);
    }

    #[test]
    fn swap_temperature_rejects_wrong_length() {
        let mut g = Grid::new(2, 2, 1.0).unwrap();
        let mut buf = vec![5.0; 3];
        assert!(g.swap_temperature(&mut buf).is_err());
        assert_eq!(g.temperature(), &[1.0; 4]);
    }

    #[test]
    fn total_heat_sums_cells() {
        let mut g = Grid::new(3, 1, 0.0).unwrap();
        g.temperature_mut().copy_from_slice(&[1.0, 2.0, 3.5]);
        assert!((g.total_heat() - 6.5).abs() < 1e-12);
    }

    // ── Property tests ──────────────────────────────────────────

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn material_at_outside_is_always_sentinel(
            w in 1u32..16,
            h in 1u32..16,
            x in -64i64..64,
            y in -64i64..64,
        ) {
            let g = Grid::from_parts(
                w, h,
                vec![0.0; (w * h) as usize],
                vec![MaterialId(0); (w * h) as usize],
            ).unwrap();
            let inside = x >= 0 && y >= 0 && x < w as i64 && y < h as i64;
            if inside {
                prop_assert_eq!(g.material_at(x, y), MaterialId(0));
            } else {
                prop_assert_eq!(g.material_at(x, y), MaterialId::NONE);
            }
        }
    }
}
