//! 1D and 2D integration entry points.
//!
//! Each call runs in two phases separated by a hard barrier:
//!
//! 1. Validate every input, then scan the footprints of unmasked pixels to
//!    resolve the axis ranges (parallel reduction).
//! 2. Correct, locate and deposit every pixel into thread-private
//!    accumulators (`par_fold_chunked`), merge them, and normalize.

use common::parallel::par_fold_chunked;

use crate::accumulator::{Accumulator1d, Accumulator2d, Histogram1d, Histogram2d};
use crate::config::{Integrate1dConfig, Integrate2dConfig};
use crate::correction::{CorrectionPipeline, Corrections};
use crate::error::{Error, Result};
use crate::geometry::{AxisGeometry, PixelGeometry};
use crate::range::{scan_bounds, AxisRange, Bounds};
use crate::splitter::{deposit_1d, AxisSpan, Footprint2d};


/// Bounds used when no pixel is available for the range scan.
fn fallback_bounds(axis: &AxisGeometry, len: usize) -> Bounds {
    if len == 0 {
        tracing::warn!("No pixels to integrate");
        Bounds::new(0.0, 0.0)
    } else {
        tracing::warn!("All pixels are masked, range falls back to the first pixel");
        axis.footprint(0)
    }
}

/// Axis-0 footprint of pixel `idx`, with negative ends raised to 0 when
/// `clamp_negative` is set.
#[inline]
fn footprint0(axis0: &AxisGeometry, idx: usize, clamp_negative: bool) -> Bounds {
    let footprint = axis0.footprint(idx);
    if clamp_negative {
        footprint.non_negative()
    } else {
        footprint
    }
}

/// Negative axis-0 positions are clamped per pixel unless they are allowed or
/// an explicit axis-0 range is given.
#[inline]
fn clamps_pos0(allow_pos0_neg: bool, pos0_range: Option<(f64, f64)>) -> bool {
    !allow_pos0_neg && pos0_range.is_none()
}

/// Histograms `weights` along axis 0, splitting each pixel over the bins its
/// footprint overlaps.
///
/// With `config.pos1_range` set, only pixels whose axis-1 footprint intersects
/// that range contribute; this requires axis-1 geometry.
pub fn integrate_1d(
    weights: &[f32],
    geometry: &PixelGeometry,
    corrections: &Corrections,
    config: &Integrate1dConfig,
) -> Result<Histogram1d> {
    let len = weights.len();
    config.validate()?;
    geometry.validate(len)?;
    corrections.validate(len)?;

    let sector = match (config.pos1_range, geometry.axis1) {
        (Some((a, b)), Some(axis1)) => Some((Bounds::ordered(a, b), axis1)),
        (Some(_), None) => {
            return Err(Error::MissingAxis1 {
                reason: "pos1_range filtering needs axis-1 footprints",
            });
        }
        (None, _) => None,
    };

    let axis0 = geometry.axis0;
    let clamp0 = clamps_pos0(config.allow_pos0_neg, config.pos0_range);
    let scanned = scan_bounds(
        len,
        corrections.mask,
        |idx| footprint0(&axis0, idx, clamp0),
        Bounds::union,
    )
    .unwrap_or_else(|| fallback_bounds(&axis0, len));
    let axis = AxisRange::resolve(
        scanned,
        config.pos0_range,
        !config.allow_pos0_neg,
        config.bins,
    );

    tracing::debug!(
        pixels = len,
        bins = axis.bins,
        min = axis.min,
        max = axis.max,
        bin_width = axis.bin_width,
        sector = ?config.pos1_range,
        "Integrating 1D"
    );

    let pipeline = CorrectionPipeline::new(corrections, config.dummy);
    let acc = par_fold_chunked(
        len,
        || Accumulator1d::new(axis.bins),
        |acc, chunk| {
            for idx in chunk {
                if let Some((range1, axis1)) = &sector {
                    if !axis1.footprint(idx).intersects(range1) {
                        continue;
                    }
                }
                let Some(value) = pipeline.apply(idx, weights[idx]) else {
                    continue;
                };
                let Some(span) = AxisSpan::from_bounds(footprint0(&axis0, idx, clamp0), &axis) else {
                    continue;
                };
                deposit_1d(span, value, acc);
                acc.mark_pixel();
            }
        },
        Accumulator1d::merge,
    );

    tracing::debug!(accumulated = acc.pixels(), "1D accumulation done");

    Ok(acc.finalize(&axis, config.normalization_factor, config.fill_value()))
}

/// Histograms `weights` over axis 0 × axis 1, splitting each pixel over the
/// bins its rectangular footprint overlaps.
///
/// Axis 1 is circular: footprints are truncated at the branch cut selected by
/// `config.chi_discontinuity` before the range scan and the accumulation.
pub fn integrate_2d(
    weights: &[f32],
    geometry: &PixelGeometry,
    corrections: &Corrections,
    config: &Integrate2dConfig,
) -> Result<Histogram2d> {
    let len = weights.len();
    config.validate()?;
    geometry.validate(len)?;
    corrections.validate(len)?;

    let axis0 = geometry.axis0;
    let axis1 = geometry.axis1.ok_or(Error::MissingAxis1 {
        reason: "2D integration bins along axis 1",
    })?;

    let clamp0 = clamps_pos0(config.allow_pos0_neg, config.pos0_range);
    let (cut_lo, cut_hi) = config.chi_discontinuity.bounds();
    let footprint1 = |idx: usize| axis1.footprint(idx).clamp_to(cut_lo, cut_hi);

    let [scanned0, scanned1] = scan_bounds(
        len,
        corrections.mask,
        |idx| [footprint0(&axis0, idx, clamp0), footprint1(idx)],
        |a, b| [a[0].union(b[0]), a[1].union(b[1])],
    )
    .unwrap_or_else(|| {
        let fallback0 = fallback_bounds(&axis0, len);
        let fallback1 = if len == 0 {
            Bounds::new(0.0, 0.0)
        } else {
            footprint1(0)
        };
        [fallback0, fallback1]
    });

    let range0 = AxisRange::resolve(
        scanned0,
        config.pos0_range,
        !config.allow_pos0_neg,
        config.bins0,
    );
    let range1 = AxisRange::resolve(scanned1, config.pos1_range, false, config.bins1);

    tracing::debug!(
        pixels = len,
        bins0 = range0.bins,
        bins1 = range1.bins,
        min0 = range0.min,
        max0 = range0.max,
        min1 = range1.min,
        max1 = range1.max,
        chi_discontinuity = ?config.chi_discontinuity,
        "Integrating 2D"
    );

    let pipeline = CorrectionPipeline::new(corrections, config.dummy);
    let acc = par_fold_chunked(
        len,
        || Accumulator2d::new(range0.bins, range1.bins),
        |acc, chunk| {
            for idx in chunk {
                let Some(value) = pipeline.apply(idx, weights[idx]) else {
                    continue;
                };
                let Some(footprint) = Footprint2d::locate(
                    footprint0(&axis0, idx, clamp0),
                    footprint1(idx),
                    &range0,
                    &range1,
                ) else {
                    continue;
                };
                footprint.deposit(value, acc);
                acc.mark_pixel();
            }
        },
        Accumulator2d::merge,
    );

    tracing::debug!(accumulated = acc.pixels(), "2D accumulation done");

    Ok(acc.finalize(
        &range0,
        &range1,
        config.normalization_factor,
        config.fill_value(),
    ))
}
