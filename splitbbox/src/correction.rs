//! Per-pixel filtering and intensity corrections.
//!
//! Order per pixel: mask, dummy test on the raw value, dark subtraction, then
//! division by flat, polarization and solid angle. Zeros in the divisors are a
//! caller contract and are not guarded.

use crate::config::Dummy;
use crate::error::{check_len, Result};

/// Optional per-pixel correction arrays. `None` means "no correction".
#[derive(Debug, Clone, Copy, Default)]
pub struct Corrections<'a> {
    /// `true` excludes the pixel entirely.
    pub mask: Option<&'a [bool]>,
    pub dark: Option<&'a [f32]>,
    pub flat: Option<&'a [f32]>,
    pub polarization: Option<&'a [f32]>,
    pub solid_angle: Option<&'a [f32]>,
}

impl<'a> Corrections<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_mask(mut self, mask: &'a [bool]) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_dark(mut self, dark: &'a [f32]) -> Self {
        self.dark = Some(dark);
        self
    }

    pub fn with_flat(mut self, flat: &'a [f32]) -> Self {
        self.flat = Some(flat);
        self
    }

    pub fn with_polarization(mut self, polarization: &'a [f32]) -> Self {
        self.polarization = Some(polarization);
        self
    }

    pub fn with_solid_angle(mut self, solid_angle: &'a [f32]) -> Self {
        self.solid_angle = Some(solid_angle);
        self
    }

    pub(crate) fn validate(&self, len: usize) -> Result<()> {
        check_len("mask", self.mask, len)?;
        check_len("dark", self.dark, len)?;
        check_len("flat", self.flat, len)?;
        check_len("polarization", self.polarization, len)?;
        check_len("solid_angle", self.solid_angle, len)
    }
}

/// Corrections resolved into capability flags and plain slices once per call,
/// so the per-pixel path has no `Option` unwrapping.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CorrectionPipeline<'a> {
    check_mask: bool,
    check_dummy: bool,
    do_dark: bool,
    do_flat: bool,
    do_polarization: bool,
    do_solid_angle: bool,
    mask: &'a [bool],
    dark: &'a [f32],
    flat: &'a [f32],
    polarization: &'a [f32],
    solid_angle: &'a [f32],
    dummy: Dummy,
}

impl<'a> CorrectionPipeline<'a> {
    pub fn new(corrections: &Corrections<'a>, dummy: Option<Dummy>) -> Self {
        Self {
            check_mask: corrections.mask.is_some(),
            check_dummy: dummy.is_some(),
            do_dark: corrections.dark.is_some(),
            do_flat: corrections.flat.is_some(),
            do_polarization: corrections.polarization.is_some(),
            do_solid_angle: corrections.solid_angle.is_some(),
            mask: corrections.mask.unwrap_or(&[]),
            dark: corrections.dark.unwrap_or(&[]),
            flat: corrections.flat.unwrap_or(&[]),
            polarization: corrections.polarization.unwrap_or(&[]),
            solid_angle: corrections.solid_angle.unwrap_or(&[]),
            dummy: dummy.unwrap_or(Dummy::new(0.0)),
        }
    }

    #[inline]
    pub fn is_masked(&self, idx: usize) -> bool {
        self.check_mask && self.mask[idx]
    }

    /// Corrected intensity of pixel `idx`, or `None` when it is masked or a dummy.
    #[inline]
    pub fn apply(&self, idx: usize, raw: f32) -> Option<f64> {
        if self.is_masked(idx) {
            return None;
        }
        if self.check_dummy && self.dummy.matches(raw) {
            return None;
        }

        let mut value = raw as f64;
        if self.do_dark {
            value -= self.dark[idx] as f64;
        }
        if self.do_flat {
            value /= self.flat[idx] as f64;
        }
        if self.do_polarization {
            value /= self.polarization[idx] as f64;
        }
        if self.do_solid_angle {
            value /= self.solid_angle[idx] as f64;
        }
        Some(value)
    }
}
