//! Derivation inputs: the grammar parameters and the plot they apply to.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Valid range of [`GardenParams::paths_intensity`].
pub const PATHS_INTENSITY_RANGE: std::ops::RangeInclusive<u32> = 1..=5;

/// Plot units per meter.
pub const UNITS_PER_METER: f32 = 10.0;

/// Unused border kept around the working rectangle on every side.
pub const PLOT_MARGIN: f32 = 10.0;

/// Accepted plot width in meters.
pub const WIDTH_METERS_RANGE: (f32, f32) = (10.0, 75.0);

/// Accepted plot height in meters.
pub const HEIGHT_METERS_RANGE: (f32, f32) = (10.0, 60.0);

/// Parameters steering a derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GardenParams {
    /// Subdivision depth given to the root AREA.
    pub divisions: u32,
    /// Path intensity in `1..=5`. Higher values make water rarer.
    pub paths_intensity: u32,
    /// Bias towards flower compositions in `[0, 1]`.
    pub flowers_bias: f32,
    /// Bias towards tree clusters in `[0, 1]`.
    pub trees_bias: f32,
}

impl Default for GardenParams {
    fn default() -> Self {
        Self {
            divisions: 3,
            paths_intensity: 3,
            flowers_bias: 0.5,
            trees_bias: 0.5,
        }
    }
}

impl GardenParams {
    pub fn new(divisions: u32, paths_intensity: u32, flowers_bias: f32, trees_bias: f32) -> Self {
        Self {
            divisions,
            paths_intensity,
            flowers_bias,
            trees_bias,
        }
    }

    pub fn with_divisions(mut self, divisions: u32) -> Self {
        self.divisions = divisions;
        self
    }

    pub fn with_paths_intensity(mut self, paths_intensity: u32) -> Self {
        self.paths_intensity = paths_intensity;
        self
    }

    pub fn with_flowers_bias(mut self, flowers_bias: f32) -> Self {
        self.flowers_bias = flowers_bias;
        self
    }

    pub fn with_trees_bias(mut self, trees_bias: f32) -> Self {
        self.trees_bias = trees_bias;
        self
    }

    /// Validates the parameters, returning an error if any is out of range.
    pub fn validate(&self) -> Result<()> {
        if !PATHS_INTENSITY_RANGE.contains(&self.paths_intensity) {
            return Err(Error::InvalidConfig(format!(
                "paths_intensity must be in 1..=5, got {}",
                self.paths_intensity
            )));
        }
        if !(0.0..=1.0).contains(&self.flowers_bias) {
            return Err(Error::InvalidConfig(format!(
                "flowers_bias must be in [0, 1], got {}",
                self.flowers_bias
            )));
        }
        if !(0.0..=1.0).contains(&self.trees_bias) {
            return Err(Error::InvalidConfig(format!(
                "trees_bias must be in [0, 1], got {}",
                self.trees_bias
            )));
        }
        Ok(())
    }
}

/// Drawable plot in units, with the margin left free around the garden.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plot {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Plot {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margin: PLOT_MARGIN,
        }
    }

    /// Plot from a size in meters, clamped to the accepted range and converted
    /// at [`UNITS_PER_METER`].
    pub fn from_meters(width_m: f32, height_m: f32) -> Self {
        let width_m = width_m.clamp(WIDTH_METERS_RANGE.0, WIDTH_METERS_RANGE.1);
        let height_m = height_m.clamp(HEIGHT_METERS_RANGE.0, HEIGHT_METERS_RANGE.1);
        Self::new(width_m * UNITS_PER_METER, height_m * UNITS_PER_METER)
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Area the garden is laid out in: the plot minus the margin on each side.
    pub fn working_rect(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.width - 2.0 * self.margin,
            self.height - 2.0 * self.margin,
        )
    }

    /// Validates the plot, returning an error if the working rectangle is empty.
    pub fn validate(&self) -> Result<()> {
        validate_working_rect(&self.working_rect())
    }
}

/// Rejects working rectangles that are non-finite or have no area.
pub fn validate_working_rect(rect: &Rect) -> Result<()> {
    let finite = [rect.x, rect.y, rect.w, rect.h].iter().all(|v| v.is_finite());
    if !finite {
        return Err(Error::InvalidPlot(format!(
            "working rectangle must be finite, got {rect:?}"
        )));
    }
    if !rect.is_positive() {
        return Err(Error::InvalidPlot(format!(
            "working rectangle must have a positive extent, got {} x {}",
            rect.w, rect.h
        )));
    }
    Ok(())
}
