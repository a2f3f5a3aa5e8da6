//! Scenario description, validation, and error types.
//!
//! [`Scenario`] is the input for constructing a [`Simulation`](crate::Simulation).
//! [`validate()`](Scenario::validate) checks every structural invariant at
//! startup so the step loop itself never has to.

use std::error::Error;
use std::fmt;

use kiln_core::{Boundaries, HeatSource, Material, MaterialError, Region, SourceError};
use kiln_grid::{GridError, GridShape};
use kiln_propagator::PipelineError;
use kiln_propagators::Parallelism;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`Scenario::validate()`] or simulation setup.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Grid construction or material painting failed.
    Grid(GridError),
    /// Propagator pipeline validation failed.
    Pipeline(PipelineError),
    /// Width or height is zero.
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// `time_step` is NaN, infinite, zero, or negative.
    InvalidTimeStep {
        /// The invalid value.
        value: f64,
    },
    /// `total_time` is NaN, infinite, or negative.
    InvalidTotalTime {
        /// The invalid value.
        value: f64,
    },
    /// `initial_temperature` is NaN or infinite.
    InvalidInitialTemperature {
        /// The invalid value.
        value: f32,
    },
    /// A material failed validation.
    Material {
        /// Position in [`Scenario::materials`].
        index: usize,
        /// What was wrong with it.
        source: MaterialError,
    },
    /// A heat source failed validation.
    Source {
        /// Position in [`Scenario::heat_sources`].
        index: usize,
        /// What was wrong with it.
        source: SourceError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Pipeline(e) => write!(f, "pipeline: {e}"),
            Self::EmptyGrid { width, height } => {
                write!(f, "grid {width}x{height} has no cells")
            }
            Self::InvalidTimeStep { value } => {
                write!(f, "time_step must be finite and positive, got {value}")
            }
            Self::InvalidTotalTime { value } => {
                write!(f, "total_time must be finite and >= 0, got {value}")
            }
            Self::InvalidInitialTemperature { value } => {
                write!(f, "initial_temperature must be finite, got {value}")
            }
            Self::Material { index, source } => write!(f, "material {index}: {source}"),
            Self::Source { index, source } => write!(f, "heat source {index}: {source}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Pipeline(e) => Some(e),
            Self::Material { source, .. } => Some(source),
            Self::Source { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PipelineError> for ConfigError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

// ── Scenario ───────────────────────────────────────────────────────

/// Relative slack when turning `total_time / time_step` into a step count.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Everything needed to set up and run one simulation.
///
/// Read-only once a simulation is built from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Explicit timestep. Must satisfy the stepper's stability bound for
    /// meaningful results; this is checked only as a warning.
    pub time_step: f64,
    /// Simulated duration. The run takes `floor(total_time / time_step)` steps.
    pub total_time: f64,
    /// Uniform starting temperature.
    pub initial_temperature: f32,
    /// Material table. `MaterialId(n)` refers to `materials[n]`.
    pub materials: Vec<Material>,
    /// Rectangles painted in order at setup; later ones win.
    pub regions: Vec<Region>,
    /// Sources applied every step.
    pub heat_sources: Vec<HeatSource>,
    /// Edge conditions. Absent sides are insulated.
    pub boundaries: Boundaries,
    /// Threading mode for the diffusion stage. Default: [`Parallelism::Rows`].
    pub parallelism: Parallelism,
}

impl Scenario {
    /// A `width × height` scenario with no materials, sources, or fixed
    /// edges, a timestep of 0.1 and a total time of 1.0.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            time_step: 0.1,
            total_time: 1.0,
            initial_temperature: 0.0,
            materials: Vec::new(),
            regions: Vec::new(),
            heat_sources: Vec::new(),
            boundaries: Boundaries::new(),
            parallelism: Parallelism::default(),
        }
    }

    /// Validate all structural invariants.
    ///
    /// Region material references are checked here too, so that a
    /// scenario which validates always paints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid must have at least one cell and fit the coordinate range.
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        GridShape::new(self.width, self.height)?;
        // 2. Timing.
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ConfigError::InvalidTimeStep {
                value: self.time_step,
            });
        }
        if !self.total_time.is_finite() || self.total_time < 0.0 {
            return Err(ConfigError::InvalidTotalTime {
                value: self.total_time,
            });
        }
        if !self.initial_temperature.is_finite() {
            return Err(ConfigError::InvalidInitialTemperature {
                value: self.initial_temperature,
            });
        }
        // 3. Materials.
        for (index, material) in self.materials.iter().enumerate() {
            material
                .validate()
                .map_err(|source| ConfigError::Material { index, source })?;
        }
        // 4. Regions must reference a defined material.
        let count = self.materials.len();
        for (region, r) in self.regions.iter().enumerate() {
            if !r.material.index().is_some_and(|i| i < count) {
                return Err(GridError::UnknownMaterial {
                    region,
                    material: r.material,
                    material_count: count,
                }
                .into());
            }
        }
        // 5. Heat sources.
        for (index, source) in self.heat_sources.iter().enumerate() {
            source
                .validate()
                .map_err(|source| ConfigError::Source { index, source })?;
        }
        Ok(())
    }

    /// Number of steps a full run takes: `floor(total_time / time_step)`.
    ///
    /// A quotient within a relative `1e-9` of a whole number counts as that
    /// number, so `0.3 / 0.01` runs 30 steps rather than 29.
    ///
    /// Only meaningful for a scenario that passes [`validate`](Self::validate).
    pub fn step_count(&self) -> u64 {
        let ratio = self.total_time / self.time_step;
        let nearest = ratio.round();
        let steps = if (ratio - nearest).abs() <= STEP_COUNT_TOLERANCE * nearest.max(1.0) {
            nearest
        } else {
            ratio.floor()
        };
        if steps.is_finite() && steps > 0.0 {
            steps as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::MaterialId;

    fn valid() -> Scenario {
        let mut s = Scenario::new(10, 8);
        s.materials.push(Material::new("copper", 400.0, 8960.0, 385.0));
        s.regions.push(Region::new(MaterialId(0), 0, 0, 10, 8));
        s.heat_sources.push(HeatSource::new(5.0, 3, 3, 2));
        s
    }

    #[test]
    fn valid_scenario_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn empty_grid_rejected() {
        let mut s = valid();
        s.height = 0;
        assert_eq!(
            s.validate(),
            Err(ConfigError::EmptyGrid {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn oversized_grid_rejected() {
        let mut s = valid();
        s.width = u32::MAX;
        assert!(matches!(
            s.validate(),
            Err(ConfigError::Grid(GridError::DimensionTooLarge { .. }))
        ));
    }

    #[test]
    fn bad_time_step_rejected() {
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let mut s = valid();
            s.time_step = dt;
            assert!(matches!(
                s.validate(),
                Err(ConfigError::InvalidTimeStep { .. })
            ));
        }
    }

    #[test]
    fn bad_total_time_rejected() {
        let mut s = valid();
        s.total_time = -1.0;
        assert!(matches!(
            s.validate(),
            Err(ConfigError::InvalidTotalTime { .. })
        ));
    }

    #[test]
    fn nan_initial_temperature_rejected() {
        let mut s = valid();
        s.initial_temperature = f32::NAN;
        assert!(matches!(
            s.validate(),
            Err(ConfigError::InvalidInitialTemperature { .. })
        ));
    }

    #[test]
    fn bad_material_reports_index() {
        let mut s = valid();
        s.materials.push(Material::new("void", 1.0, 0.0, 1.0));
        let err = s.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Material { index: 1, .. }));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("material 1:"));
    }

    #[test]
    fn region_with_unknown_material_rejected() {
        let mut s = valid();
        s.regions.push(Region::new(MaterialId(3), 0, 0, 1, 1));
        assert_eq!(
            s.validate(),
            Err(ConfigError::Grid(GridError::UnknownMaterial {
                region: 1,
                material: MaterialId(3),
                material_count: 1,
            }))
        );
    }

    #[test]
    fn region_with_sentinel_material_rejected() {
        let mut s = valid();
        s.regions.push(Region::new(MaterialId::NONE, 0, 0, 1, 1));
        assert!(matches!(
            s.validate(),
            Err(ConfigError::Grid(GridError::UnknownMaterial { .. }))
        ));
    }

    #[test]
    fn negative_radius_reports_index() {
        let mut s = valid();
        s.heat_sources.push(HeatSource::new(1.0, 0, 0, -1));
        assert_eq!(
            s.validate(),
            Err(ConfigError::Source {
                index: 1,
                source: SourceError::NegativeRadius { radius: -1 },
            })
        );
    }

    #[test]
    fn step_count_floors() {
        let mut s = valid();
        s.time_step = 0.3;
        s.total_time = 1.0;
        assert_eq!(s.step_count(), 3);
        s.total_time = 0.0;
        assert_eq!(s.step_count(), 0);
        s.time_step = 0.25;
        s.total_time = 1.0;
        assert_eq!(s.step_count(), 4);
    }

    #[test]
    fn step_count_absorbs_decimal_rounding() {
        let mut s = valid();
        for (total, dt, expected) in [(0.3, 0.01, 30), (0.7, 0.1, 7), (1.0, 0.3, 3), (0.05, 0.1, 0)] {
            s.total_time = total;
            s.time_step = dt;
            assert_eq!(s.step_count(), expected, "{total} / {dt}");
        }
    }
}
