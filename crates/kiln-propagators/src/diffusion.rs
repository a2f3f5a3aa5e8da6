//! Explicit finite-volume heat diffusion across heterogeneous materials.
//!
//! Each step computes, for every cell,
//!
//! ```text
//! flux      = Σ_n α_face(cell, n) · (T[n] - T[cell])
//! T_new     = T[cell] + dt · flux
//! ```
//!
//! over the 4-connected neighbours `n` that exist. Cells on the domain edge
//! just have fewer terms, which is a natural zero-flux boundary.
//!
//! # Face diffusivity
//!
//! `α_face` is the harmonic mean `2ab / (a + b)` of the two cells'
//! diffusivities. A thin low-conductivity layer therefore throttles the
//! flux between two good conductors, and any face touching a cell with
//! `α = 0` (including sentinel cells) carries no flux at all. The face
//! value is symmetric, so heat leaving one cell arrives in its neighbour
//! and the total is conserved with insulated edges.
//!
//! # Stability
//!
//! Forward Euler on unit spacing is stable only while
//! `dt · max(α) · (1/dx² + 1/dy²) <= 0.5`, i.e. `dt <= 0.25 / max(α)`.
//! [`DiffusionStepper::max_stable_dt`] reports that bound; violating it
//! produces growing oscillation rather than an error.

use kiln_core::{Material, MaterialId, PropagatorError};
use kiln_grid::GridShape;
use kiln_propagator::{Propagator, StepContext, WriteMode};
use rayon::prelude::*;

/// How the stepper spreads one step's cell updates across threads.
///
/// Both modes produce bit-identical output: every cell is a pure function
/// of the previous buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Update every row on the calling thread.
    Sequential,
    /// Update rows in parallel on the rayon global pool.
    #[default]
    Rows,
}

/// The diffusion stage.
///
/// Holds the diffusivity of every material, indexed by [`MaterialId`].
/// Materials are expected to have passed [`Material::validate`].
#[derive(Clone, Debug)]
pub struct DiffusionStepper {
    diffusivity: Vec<f32>,
    parallelism: Parallelism,
}

impl DiffusionStepper {
    /// Build a stepper for a material table.
    pub fn new(materials: &[Material], parallelism: Parallelism) -> Self {
        Self {
            diffusivity: materials.iter().map(Material::diffusivity).collect(),
            parallelism,
        }
    }

    /// Diffusivity of `id`, or zero for the sentinel and ids past the table.
    pub fn diffusivity(&self, id: MaterialId) -> f32 {
        id.index()
            .and_then(|i| self.diffusivity.get(i).copied())
            .unwrap_or(0.0)
    }

    /// Largest `dt` for which the explicit update stays stable, or `None`
    /// if no material diffuses.
    pub fn max_stable_dt(&self) -> Option<f64> {
        let max_alpha = self.diffusivity.iter().copied().fold(0.0f32, f32::max);
        if max_alpha > 0.0 {
            Some(0.25 / max_alpha as f64)
        } else {
            None
        }
    }

    /// The configured execution mode.
    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// First cell whose material id is neither the sentinel nor in the
    /// table this stepper was built from.
    pub fn check_material_ids(&self, material_ids: &[MaterialId]) -> Result<(), PropagatorError> {
        let count = self.diffusivity.len();
        match material_ids
            .iter()
            .position(|id| id.index().is_some_and(|i| i >= count))
        {
            Some(cell) => Err(PropagatorError::UnknownMaterial {
                cell,
                material: material_ids[cell],
                material_count: count,
            }),
            None => Ok(()),
        }
    }

    /// Advance `previous` by `dt` into `output`.
    ///
    /// All three slices must hold `shape.cell_count()` elements. `output`
    /// is fully overwritten. Fails without touching `output` if a cell
    /// references a material outside the table.
    pub fn step_into(
        &self,
        previous: &[f32],
        output: &mut [f32],
        material_ids: &[MaterialId],
        shape: GridShape,
        dt: f64,
    ) -> Result<(), PropagatorError> {
        self.check_material_ids(material_ids)?;
        let width = shape.width() as usize;
        let dt = dt as f32;
        let update = |(y, row): (usize, &mut [f32])| {
            self.update_row(y, row, previous, material_ids, shape, dt);
        };
        match self.parallelism {
            Parallelism::Sequential => output.chunks_mut(width).enumerate().for_each(update),
            Parallelism::Rows => output.par_chunks_mut(width).enumerate().for_each(update),
        }
        Ok(())
    }

    fn update_row(
        &self,
        y: usize,
        row: &mut [f32],
        previous: &[f32],
        material_ids: &[MaterialId],
        shape: GridShape,
        dt: f32,
    ) {
        let width = row.len();
        for (x, out) in row.iter_mut().enumerate() {
            let i = y * width + x;
            let t = previous[i];
            let a = self.diffusivity(material_ids[i]);
            let mut flux = 0.0f32;
            if a > 0.0 {
                for n in shape.neighbours(x as u32, y as u32) {
                    let face = face_diffusivity(a, self.diffusivity(material_ids[n]));
                    flux += face * (previous[n] - t);
                }
            }
            *out = t + dt * flux;
        }
    }
}

/// Harmonic mean of two diffusivities; zero if either is non-positive.
pub fn face_diffusivity(a: f32, b: f32) -> f32 {
    if a <= 0.0 || b <= 0.0 {
        0.0
    } else {
        2.0 * a * b / (a + b)
    }
}

impl Propagator for DiffusionStepper {
    fn name(&self) -> &str {
        "diffusion"
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::Full
    }

    fn max_dt(&self) -> Option<f64> {
        self.max_stable_dt()
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let shape = ctx.shape();
        let dt = ctx.dt();
        let previous = ctx.previous();
        let material_ids = ctx.material_ids();
        self.step_into(previous, ctx.output(), material_ids, shape, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::Region;
    use kiln_grid::{paint_regions, Grid};
    use kiln_test_utils::{
        grid_with_temperatures, heat, material_with_diffusivity, run_stage, uniform_grid,
        unit_material,
    };
    use proptest::prelude::*;

    fn stepper(materials: &[Material]) -> DiffusionStepper {
        DiffusionStepper::new(materials, Parallelism::Sequential)
    }

    #[test]
    fn face_is_harmonic_mean() {
        assert_eq!(face_diffusivity(1.0, 1.0), 1.0);
        assert!((face_diffusivity(1.0, 3.0) - 1.5).abs() < 1e-6);
        assert_eq!(face_diffusivity(0.0, 5.0), 0.0);
        assert_eq!(face_diffusivity(5.0, 0.0), 0.0);
    }

    #[test]
    fn face_is_dominated_by_the_poor_conductor() {
        let face = face_diffusivity(100.0, 0.01);
        assert!(face < 0.021);
    }

    #[test]
    fn sentinel_and_unknown_ids_have_zero_diffusivity() {
        let s = stepper(&[unit_material()]);
        assert_eq!(s.diffusivity(MaterialId(0)), 1.0);
        assert_eq!(s.diffusivity(MaterialId::NONE), 0.0);
        assert_eq!(s.diffusivity(MaterialId(7)), 0.0);
    }

    #[test]
    fn out_of_table_cell_fails_the_step() {
        let grid = Grid::from_parts(
            3,
            1,
            vec![1.0, 0.0, 0.0],
            vec![MaterialId(0), MaterialId(5), MaterialId(0)],
        )
        .unwrap();
        let err = run_stage(&stepper(&[unit_material()]), &grid, 0.1).unwrap_err();
        assert_eq!(
            err,
            PropagatorError::UnknownMaterial {
                cell: 1,
                material: MaterialId(5),
                material_count: 1,
            }
        );
    }

    #[test]
    fn step_into_leaves_output_alone_on_unknown_material() {
        let s = stepper(&[unit_material()]);
        let shape = GridShape::new(2, 1).unwrap();
        let mut out = vec![-3.0f32; 2];
        let result = s.step_into(
            &[1.0, 2.0],
            &mut out,
            &[MaterialId::NONE, MaterialId(1)],
            shape,
            0.1,
        );
        assert!(result.is_err());
        assert_eq!(out, vec![-3.0, -3.0]);
        assert!(s.check_material_ids(&[MaterialId::NONE, MaterialId(0)]).is_ok());
    }

    #[test]
    fn max_stable_dt_uses_fastest_material() {
        let s = stepper(&[
            material_with_diffusivity("slow", 0.5),
            material_with_diffusivity("fast", 2.0),
        ]);
        assert_eq!(s.max_stable_dt(), Some(0.125));
        assert_eq!(s.max_dt(), Some(0.125));
    }

    #[test]
    fn max_stable_dt_none_without_diffusing_material() {
        assert_eq!(stepper(&[]).max_stable_dt(), None);
        assert_eq!(
            stepper(&[material_with_diffusivity("inert", 0.0)]).max_stable_dt(),
            None
        );
    }

    #[test]
    fn uniform_field_is_unchanged() {
        let grid = uniform_grid(6, 4, 42.5, MaterialId(0));
        let out = run_stage(&stepper(&[unit_material()]), &grid, 0.2).unwrap();
        assert!(out.iter().all(|&t| t == 42.5));
    }

    #[test]
    fn single_hot_cell_spreads_to_neighbours() {
        let mut temps = vec![0.0; 9];
        temps[4] = 1.0;
        let grid = grid_with_temperatures(3, 3, temps, MaterialId(0));
        let out = run_stage(&stepper(&[unit_material()]), &grid, 0.1).unwrap();
        assert!((out[4] - 0.6).abs() < 1e-6);
        for n in [1, 3, 5, 7] {
            assert!((out[n] - 0.1).abs() < 1e-6);
        }
        for c in [0, 2, 6, 8] {
            assert_eq!(out[c], 0.0);
        }
    }

    #[test]
    fn edge_cell_uses_only_existing_neighbours() {
        // 1x3 strip: the left end has a single neighbour.
        let grid = grid_with_temperatures(3, 1, vec![1.0, 0.0, 0.0], MaterialId(0));
        let out = run_stage(&stepper(&[unit_material()]), &grid, 0.25).unwrap();
        assert_eq!(out, vec![0.75, 0.25, 0.0]);
    }

    #[test]
    fn sentinel_cells_are_perfect_insulators() {
        // Hot left column, sentinel wall in the middle, cold right column.
        let mut grid = Grid::new(3, 3, 0.0).unwrap();
        paint_regions(
            &mut grid,
            &[
                Region::new(MaterialId(0), 0, 0, 1, 3),
                Region::new(MaterialId(0), 2, 0, 1, 3),
            ],
            1,
        )
        .unwrap();
        for y in 0..3 {
            grid.temperature_mut()[y * 3] = 100.0;
            grid.temperature_mut()[y * 3 + 1] = 50.0;
        }
        let out = run_stage(&stepper(&[unit_material()]), &grid, 0.1).unwrap();
        for y in 0..3 {
            assert_eq!(out[y * 3], 100.0);
            assert_eq!(out[y * 3 + 1], 50.0);
            assert_eq!(out[y * 3 + 2], 0.0);
        }
    }

    #[test]
    fn poor_conductor_slows_transfer() {
        let fast = [unit_material()];
        let mixed = [unit_material(), material_with_diffusivity("brick", 0.01)];

        let hot_left = vec![1.0, 0.0];
        let same = grid_with_temperatures(2, 1, hot_left.clone(), MaterialId(0));
        let layered =
            Grid::from_parts(2, 1, hot_left, vec![MaterialId(0), MaterialId(1)]).unwrap();

        let a = run_stage(&stepper(&fast), &same, 0.1).unwrap();
        let b = run_stage(&stepper(&mixed), &layered, 0.1).unwrap();
        assert!(b[1] < a[1]);
        assert!(b[1] > 0.0);
    }

    #[test]
    fn output_is_fully_written() {
        let grid = uniform_grid(7, 5, 1.0, MaterialId::NONE);
        let out = run_stage(&stepper(&[unit_material()]), &grid, 0.1).unwrap();
        assert!(out.iter().all(|t| t.is_finite()));
    }

    fn random_grid(w: u32, h: u32, temps: Vec<f32>, ids: Vec<i32>) -> Grid {
        let ids = ids.into_iter().map(MaterialId).collect();
        Grid::from_parts(w, h, temps, ids).unwrap()
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
            let n = (w * h) as usize;
            (
                prop::collection::vec(-100.0f32..100.0, n),
                prop::collection::vec(-1i32..3, n),
            )
                .prop_map(move |(t, ids)| random_grid(w, h, t, ids))
        })
    }

    fn table() -> Vec<Material> {
        vec![
            material_with_diffusivity("a", 1.0),
            material_with_diffusivity("b", 0.3),
            material_with_diffusivity("c", 0.05),
        ]
    }

    proptest! {
        #[test]
        fn diffusion_conserves_heat(grid in arb_grid()) {
            let s = stepper(&table());
            let dt = s.max_stable_dt().unwrap();
            let out = run_stage(&s, &grid, dt).unwrap();
            let before = heat(grid.temperature());
            let after = heat(&out);
            prop_assert!((before - after).abs() < 1e-2, "{before} vs {after}");
        }

        #[test]
        fn sequential_and_rows_are_bit_identical(grid in arb_grid()) {
            let seq = DiffusionStepper::new(&table(), Parallelism::Sequential);
            let par = DiffusionStepper::new(&table(), Parallelism::Rows);
            let a = run_stage(&seq, &grid, 0.2).unwrap();
            let b = run_stage(&par, &grid, 0.2).unwrap();
            let a_bits: Vec<u32> = a.iter().map(|t| t.to_bits()).collect();
            let b_bits: Vec<u32> = b.iter().map(|t| t.to_bits()).collect();
            prop_assert_eq!(a_bits, b_bits);
        }

        #[test]
        fn stable_step_stays_within_previous_range(grid in arb_grid()) {
            let s = stepper(&table());
            let dt = s.max_stable_dt().unwrap();
            let out = run_stage(&s, &grid, dt).unwrap();
            let lo = grid.temperature().iter().copied().fold(f32::INFINITY, f32::min);
            let hi = grid.temperature().iter().copied().fold(f32::NEG_INFINITY, f32::max);
            for t in out {
                prop_assert!(t >= lo - 1e-3 && t <= hi + 1e-3);
            }
        }
    }
}
