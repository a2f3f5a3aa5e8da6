//! Fixed-temperature edge clamping.

use kiln_core::{Boundaries, BoundaryKind, PropagatorError, Side};
use kiln_grid::GridShape;
use kiln_propagator::{Propagator, StepContext, WriteMode};

/// Clamps edge rows and columns to fixed temperatures.
///
/// Sides are applied in [`Side::ALL`] order (top, bottom, left, right), so
/// when two fixed sides meet at a corner the left/right value is the one
/// that survives. Insulated sides, sides with an unrecognized type, and
/// absent sides are left alone: the diffusion stencil treats the missing
/// neighbour as zero flux.
///
/// ```
/// use kiln_core::{Boundaries, BoundaryCondition, Side};
/// use kiln_propagators::BoundaryEnforcer;
///
/// let boundaries = Boundaries::new()
///     .with(Side::Top, BoundaryCondition::fixed(100.0))
///     .with(Side::Left, BoundaryCondition::insulated());
/// let enforcer = BoundaryEnforcer::new(&boundaries);
/// assert_eq!(enforcer.clamps(), &[(Side::Top, 100.0)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BoundaryEnforcer {
    clamps: Vec<(Side, f32)>,
}

impl BoundaryEnforcer {
    /// Resolve a boundary mapping into the ordered list of edges to clamp.
    pub fn new(boundaries: &Boundaries) -> Self {
        let mut clamps = Vec::with_capacity(boundaries.len());
        for (side, bc) in boundaries.ordered() {
            match &bc.kind {
                BoundaryKind::Fixed { value } => clamps.push((side, *value)),
                BoundaryKind::Insulated => {}
                BoundaryKind::Unrecognized { name } => {
                    tracing::warn!(%side, kind = %name, "unrecognized boundary type, leaving edge untouched");
                }
            }
        }
        Self { clamps }
    }

    /// The fixed sides and their values, in application order.
    pub fn clamps(&self) -> &[(Side, f32)] {
        &self.clamps
    }

    /// Overwrite the fixed edges of `temperature` in place.
    pub fn apply(&self, temperature: &mut [f32], shape: GridShape) {
        let w = shape.width() as usize;
        let h = shape.height() as usize;
        for &(side, value) in &self.clamps {
            match side {
                Side::Top => temperature[..w].fill(value),
                Side::Bottom => temperature[(h - 1) * w..h * w].fill(value),
                Side::Left => {
                    for row in temperature.chunks_exact_mut(w) {
                        row[0] = value;
                    }
                }
                Side::Right => {
                    for row in temperature.chunks_exact_mut(w) {
                        row[w - 1] = value;
                    }
                }
            }
        }
    }
}

impl Propagator for BoundaryEnforcer {
    fn name(&self) -> &str {
        "boundary"
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::Incremental
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let shape = ctx.shape();
        self.apply(ctx.output(), shape);
        Ok(())
    }
}
