//! Weighted-sum accumulators and their normalization into histograms.
//!
//! An accumulator holds, per bin, the sum of corrected intensity times overlap
//! fraction (`sum`) and the sum of overlap fractions (`count`). Parallel
//! workers each fill a private accumulator; partial accumulators are merged
//! before [`Accumulator1d::finalize`] / [`Accumulator2d::finalize`] compute
//! `sum / count / normalization_factor` per bin.

use common::buffer2::Buffer2;
use rayon::prelude::*;

use crate::range::AxisRange;


/// Bins with `count` at or below this are treated as empty.
pub const COUNT_EPSILON: f64 = 1e-10;

#[inline]
fn average(sum: f64, count: f64, normalization_factor: f64, fill_value: f64) -> f64 {
    if count > COUNT_EPSILON {
        sum / count / normalization_factor
    } else {
        fill_value
    }
}

/// Result of a 1D integration. All vectors have one entry per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram1d {
    /// Bin centers along axis 0.
    pub bin_centers: Vec<f64>,
    /// Averaged intensity, or the fill value for empty bins.
    pub intensity: Vec<f64>,
    /// Accumulated intensity times overlap fraction.
    pub sum: Vec<f64>,
    /// Accumulated overlap fraction.
    pub count: Vec<f64>,
}

/// Result of a 2D integration.
///
/// Grids have width `bins0` and height `bins1` and are indexed as
/// `grid[(bin0, bin1)]`. Storage is row-major with one row per axis-1 bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    pub bin_centers0: Vec<f64>,
    pub bin_centers1: Vec<f64>,
    pub intensity: Buffer2<f64>,
    pub sum: Buffer2<f64>,
    pub count: Buffer2<f64>,
}

/// Running sums for a 1D histogram.
#[derive(Debug, Clone)]
pub struct Accumulator1d {
    sum: Vec<f64>,
    count: Vec<f64>,
    /// Pixels deposited (not fractions).
    pixels: usize,
}

impl Accumulator1d {
    pub fn new(bins: usize) -> Self {
        Self {
            sum: vec![0.0; bins],
            count: vec![0.0; bins],
            pixels: 0,
        }
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.sum.len()
    }

    #[inline]
    pub fn add(&mut self, bin: usize, value: f64, fraction: f64) {
        self.sum[bin] += value * fraction;
        self.count[bin] += fraction;
    }

    /// Records that one more pixel was deposited.
    #[inline]
    pub fn mark_pixel(&mut self) {
        self.pixels += 1;
    }

    #[inline]
    pub fn pixels(&self) -> usize {
        self.pixels
    }

    pub fn sum(&self) -> &[f64] {
        &self.sum
    }

    pub fn count(&self) -> &[f64] {
        &self.count
    }

    /// Combines two partial accumulators.
    pub fn merge(mut self, other: Self) -> Self {
        assert_eq!(self.bins(), other.bins(), "bin count mismatch");
        for (a, b) in self.sum.iter_mut().zip(&other.sum) {
            *a += b;
        }
        for (a, b) in self.count.iter_mut().zip(&other.count) {
            *a += b;
        }
        self.pixels += other.pixels;
        self
    }

    pub fn finalize(self, axis: &AxisRange, normalization_factor: f64, fill_value: f64) -> Histogram1d {
        debug_assert_eq!(axis.bins, self.bins());
        let intensity = self
            .sum
            .iter()
            .zip(&self.count)
            .map(|(&s, &c)| average(s, c, normalization_factor, fill_value))
            .collect();

        Histogram1d {
            bin_centers: axis.bin_centers(),
            intensity,
            sum: self.sum,
            count: self.count,
        }
    }
}

/// Running sums for a 2D histogram, `bins0` wide and `bins1` high.
#[derive(Debug, Clone)]
pub struct Accumulator2d {
    sum: Buffer2<f64>,
    count: Buffer2<f64>,
    pixels: usize,
}

impl Accumulator2d {
    pub fn new(bins0: usize, bins1: usize) -> Self {
        Self {
            sum: Buffer2::new_default(bins0, bins1),
            count: Buffer2::new_default(bins0, bins1),
            pixels: 0,
        }
    }

    #[inline]
    pub fn add(&mut self, bin0: usize, bin1: usize, value: f64, fraction: f64) {
        *self.sum.get_mut(bin0, bin1) += value * fraction;
        *self.count.get_mut(bin0, bin1) += fraction;
    }

    #[inline]
    pub fn mark_pixel(&mut self) {
        self.pixels += 1;
    }

    #[inline]
    pub fn pixels(&self) -> usize {
        self.pixels
    }

    pub fn sum(&self) -> &Buffer2<f64> {
        &self.sum
    }

    pub fn count(&self) -> &Buffer2<f64> {
        &self.count
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.sum.add_assign(&other.sum);
        self.count.add_assign(&other.count);
        self.pixels += other.pixels;
        self
    }

    pub fn finalize(
        self,
        axis0: &AxisRange,
        axis1: &AxisRange,
        normalization_factor: f64,
        fill_value: f64,
    ) -> Histogram2d {
        let width = self.sum.width();
        let height = self.sum.height();
        debug_assert_eq!((axis0.bins, axis1.bins), (width, height));

        let sum_pixels = self.sum.pixels();
        let count_pixels = self.count.pixels();
        let mut intensity = vec![fill_value; width * height];

        // Row-parallel normalization
        intensity
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, out_row)| {
                let row_start = y * width;
                for (x, out) in out_row.iter_mut().enumerate() {
                    let idx = row_start + x;
                    *out = average(
                        sum_pixels[idx],
                        count_pixels[idx],
                        normalization_factor,
                        fill_value,
                    );
                }
            });

        Histogram2d {
            bin_centers0: axis0.bin_centers(),
            bin_centers1: axis1.bin_centers(),
            intensity: Buffer2::new(width, height, intensity),
            sum: self.sum,
            count: self.count,
        }
    }
}
