//! Radial heat injection.
//!
//! Each [`HeatSource`] spreads `power * dt` over the disk of cells within
//! `radius` of its center, weighted by a linear falloff `1 - dist/radius`
//! and normalised so the shares sum to one. The whole stencil is computed
//! before any cell is touched; cells that fall off the grid simply lose
//! their share, so a source hanging over an edge injects proportionally
//! less.

use kiln_core::{HeatSource, PropagatorError, SourceError};
use kiln_propagator::{Propagator, StepContext, WriteMode};

/// Below this total weight a source is treated as degenerate and skipped.
pub const MIN_TOTAL_WEIGHT: f64 = 1e-5;

/// One cell of a source's stencil.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    /// Column offset from the source center.
    pub dx: i32,
    /// Row offset from the source center.
    pub dy: i32,
    /// Fraction of the source's energy this cell receives.
    pub share: f64,
}

#[derive(Clone, Debug)]
struct Stamp {
    x: i64,
    y: i64,
    power: f64,
    taps: Vec<Tap>,
}

/// Adds energy from radial heat sources every step.
///
/// Overlapping sources accumulate additively in list order.
#[derive(Clone, Debug, Default)]
pub struct SourceInjector {
    stamps: Vec<Stamp>,
}

impl SourceInjector {
    /// Validate the sources and precompute their stencils.
    ///
    /// # Errors
    ///
    /// Returns the first [`SourceError`] among `sources` (negative radius
    /// or non-finite power).
    pub fn new(sources: &[HeatSource]) -> Result<Self, SourceError> {
        let mut stamps = Vec::with_capacity(sources.len());
        for source in sources {
            source.validate()?;
            let taps = Self::footprint(source);
            if taps.is_empty() {
                tracing::debug!(
                    x = source.x,
                    y = source.y,
                    radius = source.radius,
                    "degenerate heat source skipped"
                );
                continue;
            }
            stamps.push(Stamp {
                x: source.x as i64,
                y: source.y as i64,
                power: source.power as f64,
                taps,
            });
        }
        Ok(Self { stamps })
    }

    /// Normalised weight stencil for `source`.
    ///
    /// Lists every offset `(dx, dy)` with `sqrt(dx² + dy²) <= radius`, with
    /// shares summing to one. Empty when the total weight is below
    /// [`MIN_TOTAL_WEIGHT`]; in particular a radius of zero or less gives
    /// an empty stencil.
    pub fn footprint(source: &HeatSource) -> Vec<Tap> {
        let r = source.radius;
        if r <= 0 {
            return Vec::new();
        }
        let radius = r as f64;

        let mut taps = Vec::new();
        let mut total = 0.0f64;
        for dy in -r..=r {
            for dx in -r..=r {
                let dist = ((dx as f64).powi(2) + (dy as f64).powi(2)).sqrt();
                if dist > radius {
                    continue;
                }
                let w = 1.0 - dist / radius;
                total += w;
                taps.push(Tap { dx, dy, share: w });
            }
        }

        if total < MIN_TOTAL_WEIGHT {
            return Vec::new();
        }
        for tap in &mut taps {
            tap.share /= total;
        }
        taps
    }

    /// Number of sources that inject energy.
    pub fn active_sources(&self) -> usize {
        self.stamps.len()
    }
}

impl Propagator for SourceInjector {
    fn name(&self) -> &str {
        "heat_sources"
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::Incremental
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), PropagatorError> {
        let shape = ctx.shape();
        let dt = ctx.dt();
        let out = ctx.output();
        for stamp in &self.stamps {
            let energy = stamp.power * dt;
            for tap in &stamp.taps {
                if let Some(i) = shape.index(stamp.x + tap.dx as i64, stamp.y + tap.dy as i64) {
                    out[i] += (energy * tap.share) as f32;
                }
            }
        }
        Ok(())
    }
}
