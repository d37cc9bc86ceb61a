//! Borrowed per-pixel coordinate arrays.

use crate::error::{check_len, Result};
use crate::range::Bounds;

/// Centers and half-widths of every pixel along one axis.
#[derive(Debug, Clone, Copy)]
pub struct AxisGeometry<'a> {
    pub pos: &'a [f64],
    /// Center-to-edge distance of each footprint.
    pub delta: &'a [f64],
}

impl<'a> AxisGeometry<'a> {
    pub fn new(pos: &'a [f64], delta: &'a [f64]) -> Self {
        Self { pos, delta }
    }

    /// Footprint `[pos - delta, pos + delta]` of pixel `idx`.
    #[inline]
    pub fn footprint(&self, idx: usize) -> Bounds {
        let (pos, delta) = (self.pos[idx], self.delta[idx]);
        Bounds::new(pos - delta, pos + delta)
    }

    fn validate(&self, names: [&'static str; 2], len: usize) -> Result<()> {
        check_len(names[0], Some(self.pos), len)?;
        check_len(names[1], Some(self.delta), len)
    }
}

/// Pixel geometry: axis 0 always, axis 1 for 2D integration or 1D sector filtering.
#[derive(Debug, Clone, Copy)]
pub struct PixelGeometry<'a> {
    pub axis0: AxisGeometry<'a>,
    pub axis1: Option<AxisGeometry<'a>>,
}

impl<'a> PixelGeometry<'a> {
    pub fn new(pos0: &'a [f64], delta_pos0: &'a [f64]) -> Self {
        Self {
            axis0: AxisGeometry::new(pos0, delta_pos0),
            axis1: None,
        }
    }

    pub fn with_axis1(mut self, pos1: &'a [f64], delta_pos1: &'a [f64]) -> Self {
        self.axis1 = Some(AxisGeometry::new(pos1, delta_pos1));
        self
    }

    pub(crate) fn validate(&self, len: usize) -> Result<()> {
        self.axis0.validate(["pos0", "delta_pos0"], len)?;
        if let Some(axis1) = &self.axis1 {
            axis1.validate(["pos1", "delta_pos1"], len)?;
        }
        Ok(())
    }
}
