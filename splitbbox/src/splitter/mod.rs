//! Bounding-box overlap between pixel footprints and output bins.
//!
//! Every footprint is located on each axis independently as an [`AxisSpan`]:
//! the first and last bin it touches plus the fraction of its width that falls
//! in each of them. Fractions are relative to the full (unclipped) footprint
//! width, so the fractions of one pixel sum to its in-range share: exactly 1
//! when the footprint lies inside the range, less when clipped at an edge.
//!
//! In 2D the fraction deposited in bin `(b0, b1)` is the product of the two
//! axis fractions, which equals the overlap area divided by the footprint area.

use crate::accumulator::{Accumulator1d, Accumulator2d};
use crate::range::{AxisRange, Bounds};


/// Overlap of one footprint with the bins of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpan {
    pub first: usize,
    pub last: usize,
    /// Fraction in `first`. When `first == last` this is the whole contribution.
    pub first_frac: f64,
    /// Fraction in `last`.
    pub last_frac: f64,
    /// Fraction in every bin strictly between `first` and `last`.
    pub inner_frac: f64,
}

impl AxisSpan {
    fn single(bin: usize, fraction: f64) -> Self {
        Self {
            first: bin,
            last: bin,
            first_frac: fraction,
            last_frac: fraction,
            inner_frac: 0.0,
        }
    }

    /// Locates the fractional-bin interval `[fmin, fmax]` on an axis of `bins` bins.
    ///
    /// Returns `None` when the interval has no overlap with `[0, bins)`.
    /// A zero-width interval contributes fraction 1 to the bin containing it.
    pub fn locate(fmin: f64, fmax: f64, bins: usize) -> Option<Self> {
        let edge = bins as f64;
        // Negated comparisons also reject NaN coordinates.
        if !(fmax >= 0.0 && fmin < edge) {
            return None;
        }

        let width = fmax - fmin;
        if width <= 0.0 {
            let center = 0.5 * (fmin + fmax);
            return Some(Self::single((center as usize).min(bins - 1), 1.0));
        }

        let lo = fmin.max(0.0);
        let hi = fmax.min(edge);
        if hi <= lo {
            return None;
        }

        let first = (lo as usize).min(bins - 1);
        // A footprint ending exactly on a bin edge does not touch the next bin.
        let last = (hi.ceil() as usize).saturating_sub(1).clamp(first, bins - 1);

        if first == last {
            return Some(Self::single(first, (hi - lo) / width));
        }

        Some(Self {
            first,
            last,
            first_frac: ((first + 1) as f64 - lo) / width,
            last_frac: (hi - last as f64) / width,
            inner_frac: 1.0 / width,
        })
    }

    /// Locates a footprint given in axis coordinates.
    #[inline]
    pub fn from_bounds(footprint: Bounds, axis: &AxisRange) -> Option<Self> {
        Self::locate(
            axis.fractional_bin(footprint.lower),
            axis.fractional_bin(footprint.upper),
            axis.bins,
        )
    }

    #[inline]
    pub fn is_single(&self) -> bool {
        self.first == self.last
    }

    #[inline]
    pub fn fraction(&self, bin: usize) -> f64 {
        if bin == self.first {
            self.first_frac
        } else if bin == self.last {
            self.last_frac
        } else {
            self.inner_frac
        }
    }

    /// `(bin, fraction)` for every touched bin, in ascending order.
    #[inline]
    pub fn bins(self) -> impl Iterator<Item = (usize, f64)> {
        (self.first..=self.last).map(move |bin| (bin, self.fraction(bin)))
    }

    /// Sum of all fractions.
    pub fn total(&self) -> f64 {
        self.bins().map(|(_, fraction)| fraction).sum()
    }
}

/// Adds `value` split by `span` into a 1D accumulator.
#[inline]
pub fn deposit_1d(span: AxisSpan, value: f64, acc: &mut Accumulator1d) {
    if span.is_single() {
        acc.add(span.first, value, span.first_frac);
        return;
    }
    for (bin, fraction) in span.bins() {
        acc.add(bin, value, fraction);
    }
}

/// Structural case of a 2D footprint: which axes it spreads over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitCase {
    /// One bin on both axes.
    Single,
    /// Several bins along axis 0, one along axis 1.
    SpreadAxis0,
    /// One bin along axis 0, several along axis 1.
    SpreadAxis1,
    /// Several bins along both axes.
    SpreadBoth,
}

impl SplitCase {
    #[inline]
    pub fn classify(span0: &AxisSpan, span1: &AxisSpan) -> Self {
        match (span0.is_single(), span1.is_single()) {
            (true, true) => SplitCase::Single,
            (false, true) => SplitCase::SpreadAxis0,
            (true, false) => SplitCase::SpreadAxis1,
            (false, false) => SplitCase::SpreadBoth,
        }
    }
}

/// A pixel footprint located on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint2d {
    pub span0: AxisSpan,
    pub span1: AxisSpan,
    pub case: SplitCase,
}

impl Footprint2d {
    /// Returns `None` when the footprint misses the range on either axis.
    #[inline]
    pub fn locate(
        footprint0: Bounds,
        footprint1: Bounds,
        axis0: &AxisRange,
        axis1: &AxisRange,
    ) -> Option<Self> {
        let span0 = AxisSpan::from_bounds(footprint0, axis0)?;
        let span1 = AxisSpan::from_bounds(footprint1, axis1)?;
        Some(Self {
            span0,
            span1,
            case: SplitCase::classify(&span0, &span1),
        })
    }

    /// Adds `value` split over every touched bin of a 2D accumulator.
    ///
    /// Corner bins get the product of the two edge fractions, edge bins the
    /// product of an edge fraction and an inner fraction, and interior bins
    /// `1 / area` (both inner fractions).
    #[inline]
    pub fn deposit(&self, value: f64, acc: &mut Accumulator2d) {
        let (span0, span1) = (self.span0, self.span1);
        match self.case {
            SplitCase::Single => {
                acc.add(span0.first, span1.first, value, span0.first_frac * span1.first_frac);
            }
            SplitCase::SpreadAxis0 => {
                let f1 = span1.first_frac;
                for (b0, f0) in span0.bins() {
                    acc.add(b0, span1.first, value, f0 * f1);
                }
            }
            SplitCase::SpreadAxis1 => {
                let f0 = span0.first_frac;
                for (b1, f1) in span1.bins() {
                    acc.add(span0.first, b1, value, f0 * f1);
                }
            }
            SplitCase::SpreadBoth => {
                for (b1, f1) in span1.bins() {
                    for (b0, f0) in span0.bins() {
                        acc.add(b0, b1, value, f0 * f1);
                    }
                }
            }
        }
    }

    /// Sum of the fractions [`Footprint2d::deposit`] distributes.
    pub fn total(&self) -> f64 {
        self.span0.total() * self.span1.total()
    }
}
