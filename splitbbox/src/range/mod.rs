//! Axis range resolution.
//!
//! The range of each axis is fixed before any pixel is accumulated: either the
//! caller supplies it, or it is the union of all unmasked pixel footprints.
//! Two upper limits are kept per axis:
//!
//! - `max` is the user-visible limit; bin centers end half a bin below it.
//! - `upper_bound` is `max` nudged outward by one f32 epsilon and defines the
//!   bin width, so a footprint ending exactly at `max` still falls inside the
//!   last bin instead of on its outer edge.

use rayon::prelude::*;


/// Relative nudge applied by [`upper_bound`].
const UPPER_BOUND_SCALE: f64 = 1.0 + f32::EPSILON as f64;

/// Moves `max` slightly outward (towards +∞).
#[inline]
pub fn upper_bound(max: f64) -> f64 {
    if max > 0.0 {
        max * UPPER_BOUND_SCALE
    } else if max < 0.0 {
        max / UPPER_BOUND_SCALE
    } else {
        f32::EPSILON as f64
    }
}

/// Closed interval `[lower, upper]` covered by one footprint or a set of footprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    #[inline]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Builds bounds from a range given in either order.
    #[inline]
    pub fn ordered(a: f64, b: f64) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.lower.min(other.lower), self.upper.max(other.upper))
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.upper >= other.lower && self.lower <= other.upper
    }

    /// Clamps both ends into `[lo, hi]`. A footprint lying entirely outside
    /// collapses to zero width at the nearer limit.
    #[inline]
    pub fn clamp_to(self, lo: f64, hi: f64) -> Self {
        debug_assert!(lo <= hi);
        Self::new(self.lower.clamp(lo, hi), self.upper.clamp(lo, hi))
    }

    /// Raises negative ends to 0.
    #[inline]
    pub fn non_negative(self) -> Self {
        Self::new(self.lower.max(0.0), self.upper.max(0.0))
    }
}

/// Scans the footprints of all unmasked pixels in parallel and merges them with `union`.
///
/// Returns `None` when there are no unmasked pixels.
pub fn scan_bounds<T, F, U>(len: usize, mask: Option<&[bool]>, footprint: F, union: U) -> Option<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
    U: Fn(T, T) -> T + Sync + Send,
{
    (0..len)
        .into_par_iter()
        .filter(|&idx| !mask.is_some_and(|m| m[idx]))
        .map(footprint)
        .reduce_with(union)
}

/// Binning of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower edge of the first bin.
    pub min: f64,
    /// Requested upper limit: explicit range maximum or scanned maximum.
    pub max: f64,
    /// `max` after [`upper_bound`] rounding; the last bin ends here.
    pub upper_bound: f64,
    pub bins: usize,
    pub bin_width: f64,
}

impl AxisRange {
    /// `bins == 0` is clamped to 1.
    pub fn new(min: f64, max: f64, bins: usize) -> Self {
        let bins = bins.max(1);
        let upper_bound = upper_bound(max);
        let bin_width = (upper_bound - min) / bins as f64;
        debug_assert!(
            bin_width > 0.0,
            "bin width must be positive: min={min}, max={max}"
        );
        Self {
            min,
            max,
            upper_bound,
            bins,
            bin_width,
        }
    }

    /// Resolves an axis from scanned footprint bounds and an optional explicit range.
    ///
    /// An explicit range always wins. Without one, `clamp_negative` raises a
    /// negative scanned minimum (and maximum) to 0. Both paths order the bounds,
    /// so the bin width is never negative.
    pub fn resolve(
        scanned: Bounds,
        explicit: Option<(f64, f64)>,
        clamp_negative: bool,
        bins: usize,
    ) -> Self {
        let bounds = match explicit {
            Some((a, b)) => {
                if a > b {
                    tracing::warn!(min = a, max = b, "Inverted range, swapping bounds");
                }
                Bounds::ordered(a, b)
            }
            None if clamp_negative => {
                let clamped = scanned.non_negative();
                Bounds::ordered(clamped.lower, clamped.upper)
            }
            None => Bounds::ordered(scanned.lower, scanned.upper),
        };
        Self::new(bounds.lower, bounds.upper, bins)
    }

    /// Position of `value` in units of bins, relative to `min`.
    #[inline]
    pub fn fractional_bin(&self, value: f64) -> f64 {
        (value - self.min) / self.bin_width
    }

    /// `bins` evenly spaced centers from `min + width/2` to `max - width/2`.
    ///
    /// A degenerate range (`max == min`) has no room for that span; its centers
    /// are spaced one bin width apart from `min + width/2` instead.
    pub fn bin_centers(&self) -> Vec<f64> {
        let half = 0.5 * self.bin_width;
        let start = self.min + half;
        if self.bins == 1 {
            return vec![start];
        }
        let stop = self.max - half;
        let step = if stop > start {
            (stop - start) / (self.bins - 1) as f64
        } else {
            self.bin_width
        };
        (0..self.bins).map(|i| start + step * i as f64).collect()
    }
}
