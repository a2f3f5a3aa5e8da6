//! Materials, rectangular material regions, and radial heat sources.

use crate::error::{MaterialError, SourceError};
use crate::id::MaterialId;

/// A conducting material.
///
/// Referenced from regions and grid cells by [`MaterialId`], which is the
/// material's index in the scenario's material list.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Display name.
    pub name: String,
    /// Thermal conductivity `k`.
    pub conductivity: f32,
    /// Density `ρ`.
    pub density: f32,
    /// Specific heat capacity `c`.
    pub specific_heat: f32,
    /// Display color as RGB. Unused by the solver.
    pub color: [u8; 3],
}

impl Material {
    /// Create a material with a neutral grey display color.
    pub fn new(
        name: impl Into<String>,
        conductivity: f32,
        density: f32,
        specific_heat: f32,
    ) -> Self {
        Self {
            name: name.into(),
            conductivity,
            density,
            specific_heat,
            color: [128, 128, 128],
        }
    }

    /// Replace the display color.
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Thermal diffusivity `α = k / (ρ·c)`.
    ///
    /// Only meaningful for a material that passes [`validate`](Self::validate).
    pub fn diffusivity(&self) -> f32 {
        self.conductivity / (self.density * self.specific_heat)
    }

    /// Check that the diffusivity is defined and non-negative.
    pub fn validate(&self) -> Result<(), MaterialError> {
        for (property, value) in [
            ("thermal conductivity", self.conductivity),
            ("density", self.density),
            ("specific heat", self.specific_heat),
        ] {
            if !value.is_finite() {
                return Err(MaterialError::NonFinite { property, value });
            }
        }
        if self.conductivity < 0.0 {
            return Err(MaterialError::NegativeConductivity {
                value: self.conductivity,
            });
        }
        if self.density <= 0.0 {
            return Err(MaterialError::NonPositive {
                property: "density",
                value: self.density,
            });
        }
        if self.specific_heat <= 0.0 {
            return Err(MaterialError::NonPositive {
                property: "specific heat",
                value: self.specific_heat,
            });
        }
        // ρ·c can underflow to zero in f32 even when both are positive.
        let alpha = self.diffusivity();
        if !alpha.is_finite() {
            return Err(MaterialError::NonFinite {
                property: "diffusivity",
                value: alpha,
            });
        }
        Ok(())
    }
}

/// A rectangle of cells stamped with one material at setup.
///
/// Coordinates may lie partly or wholly outside the grid; the painter
/// clips them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Material to paint.
    pub material: MaterialId,
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
}

impl Region {
    /// Create a region.
    pub fn new(material: MaterialId, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            material,
            x,
            y,
            width,
            height,
        }
    }
}

/// A circular heat source applied every step.
///
/// Injects `power * dt` per step, spread over the disk of `radius` cells
/// around `(x, y)` with a linear falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatSource {
    /// Energy per unit time.
    pub power: f32,
    /// Center column.
    pub x: i32,
    /// Center row.
    pub y: i32,
    /// Radius in cells.
    pub radius: i32,
}

impl HeatSource {
    /// Create a heat source.
    pub fn new(power: f32, x: i32, y: i32, radius: i32) -> Self {
        Self {
            power,
            x,
            y,
            radius,
        }
    }

    /// Reject negative radii and non-finite power.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.radius < 0 {
            return Err(SourceError::NegativeRadius {
                radius: self.radius,
            });
        }
        if !self.power.is_finite() {
            return Err(SourceError::NonFinitePower { power: self.power });
        }
        Ok(())
    }
}
