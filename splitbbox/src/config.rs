//! Configuration for 1D and 2D integration.
//!
//! Both configs derive serde traits with `#[serde(default)]`, so partial YAML
//! or JSON documents deserialize with the remaining fields at their defaults.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of bins per axis.
pub const DEFAULT_BINS: usize = 100;

/// Branch cut of the circular axis 1 (azimuthal angle, radians).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChiDiscontinuity {
    /// Axis 1 spans [-π, π).
    #[default]
    AtPi,
    /// Axis 1 spans [0, 2π).
    AtZero,
}

impl ChiDiscontinuity {
    /// Lower and upper limit of the circular axis.
    #[inline]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            ChiDiscontinuity::AtPi => (-PI, PI),
            ChiDiscontinuity::AtZero => (0.0, TAU),
        }
    }
}

/// Sentinel raw intensity marking pixels without data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dummy {
    pub value: f32,
    /// Pixels with `|raw - value| <= tolerance` are dropped. 0.0 means exact match.
    #[serde(default)]
    pub tolerance: f32,
}

impl Dummy {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            tolerance: 0.0,
        }
    }

    /// Checked by the config `validate()`, which also covers deserialized values.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub fn matches(&self, raw: f32) -> bool {
        (raw as f64 - self.value as f64).abs() <= self.tolerance as f64
    }
}

/// Parameters of a 1D integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Integrate1dConfig {
    /// Number of output bins. 0 is treated as 1.
    pub bins: usize,
    /// Explicit axis-0 range; overrides the scanned range and negative clamping.
    pub pos0_range: Option<(f64, f64)>,
    /// Keep only pixels whose axis-1 footprint intersects this range.
    /// Requires axis-1 geometry.
    pub pos1_range: Option<(f64, f64)>,
    pub dummy: Option<Dummy>,
    /// Fill value for bins without contributions when no dummy is configured.
    pub empty: f64,
    /// Divisor applied to every averaged bin.
    pub normalization_factor: f64,
    /// Keep negative axis-0 footprint ends. When false and no `pos0_range` is
    /// given, each footprint is clamped to `>= 0` before scanning and splitting.
    pub allow_pos0_neg: bool,
}

impl Default for Integrate1dConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            pos0_range: None,
            pos1_range: None,
            dummy: None,
            empty: 0.0,
            normalization_factor: 1.0,
            allow_pos0_neg: false,
        }
    }
}

impl Integrate1dConfig {
    pub fn new(bins: usize) -> Self {
        Self {
            bins,
            ..Default::default()
        }
    }

    pub fn with_pos0_range(mut self, min: f64, max: f64) -> Self {
        self.pos0_range = Some((min, max));
        self
    }

    pub fn with_pos1_range(mut self, min: f64, max: f64) -> Self {
        self.pos1_range = Some((min, max));
        self
    }

    pub fn with_dummy(mut self, dummy: Dummy) -> Self {
        self.dummy = Some(dummy);
        self
    }

    pub fn with_empty(mut self, empty: f64) -> Self {
        self.empty = empty;
        self
    }

    pub fn with_normalization_factor(mut self, factor: f64) -> Self {
        self.normalization_factor = factor;
        self
    }

    pub fn with_allow_pos0_neg(mut self, allow: bool) -> Self {
        self.allow_pos0_neg = allow;
        self
    }

    /// Value written to bins that received no contribution.
    #[inline]
    pub fn fill_value(&self) -> f64 {
        fill_value(self.dummy, self.empty)
    }

    pub fn validate(&self) -> Result<()> {
        validate_range(0, self.pos0_range)?;
        validate_range(1, self.pos1_range)?;
        validate_dummy(self.dummy)?;
        validate_normalization(self.normalization_factor)
    }
}

/// Parameters of a 2D integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Integrate2dConfig {
    /// Number of bins along axis 0. 0 is treated as 1.
    pub bins0: usize,
    /// Number of bins along axis 1. 0 is treated as 1.
    pub bins1: usize,
    pub pos0_range: Option<(f64, f64)>,
    pub pos1_range: Option<(f64, f64)>,
    pub dummy: Option<Dummy>,
    pub empty: f64,
    pub normalization_factor: f64,
    pub allow_pos0_neg: bool,
    pub chi_discontinuity: ChiDiscontinuity,
}

impl Default for Integrate2dConfig {
    fn default() -> Self {
        Self {
            bins0: DEFAULT_BINS,
            bins1: 36,
            pos0_range: None,
            pos1_range: None,
            dummy: None,
            empty: 0.0,
            normalization_factor: 1.0,
            allow_pos0_neg: false,
            chi_discontinuity: ChiDiscontinuity::AtPi,
        }
    }
}

impl Integrate2dConfig {
    pub fn new(bins0: usize, bins1: usize) -> Self {
        Self {
            bins0,
            bins1,
            ..Default::default()
        }
    }

    pub fn with_pos0_range(mut self, min: f64, max: f64) -> Self {
        self.pos0_range = Some((min, max));
        self
    }

    pub fn with_pos1_range(mut self, min: f64, max: f64) -> Self {
        self.pos1_range = Some((min, max));
        self
    }

    pub fn with_dummy(mut self, dummy: Dummy) -> Self {
        self.dummy = Some(dummy);
        self
    }

    pub fn with_empty(mut self, empty: f64) -> Self {
        self.empty = empty;
        self
    }

    pub fn with_normalization_factor(mut self, factor: f64) -> Self {
        self.normalization_factor = factor;
        self
    }

    pub fn with_allow_pos0_neg(mut self, allow: bool) -> Self {
        self.allow_pos0_neg = allow;
        self
    }

    pub fn with_chi_discontinuity(mut self, chi_discontinuity: ChiDiscontinuity) -> Self {
        self.chi_discontinuity = chi_discontinuity;
        self
    }

    #[inline]
    pub fn fill_value(&self) -> f64 {
        fill_value(self.dummy, self.empty)
    }

    pub fn validate(&self) -> Result<()> {
        validate_range(0, self.pos0_range)?;
        validate_range(1, self.pos1_range)?;
        validate_dummy(self.dummy)?;
        validate_normalization(self.normalization_factor)
    }
}

fn fill_value(dummy: Option<Dummy>, empty: f64) -> f64 {
    dummy.map_or(empty, |d| d.value as f64)
}

fn validate_range(axis: usize, range: Option<(f64, f64)>) -> Result<()> {
    match range {
        Some((min, max)) if !min.is_finite() || !max.is_finite() => {
            Err(Error::InvalidRange { axis, min, max })
        }
        _ => Ok(()),
    }
}

fn validate_dummy(dummy: Option<Dummy>) -> Result<()> {
    match dummy {
        Some(d) if d.tolerance.is_nan() || d.tolerance < 0.0 => {
            Err(Error::InvalidDummyTolerance(d.tolerance))
        }
        _ => Ok(()),
    }
}

fn validate_normalization(factor: f64) -> Result<()> {
    if factor == 0.0 || !factor.is_finite() {
        return Err(Error::InvalidNormalization(factor));
    }
    Ok(())
}
