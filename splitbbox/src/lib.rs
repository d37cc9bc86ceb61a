//! Splitbbox - bounding-box pixel splitting for area-detector integration.
//!
//! Converts per-pixel intensities plus angular coordinates into 1D or 2D
//! histograms. Each pixel is a rectangular footprint `center ± half-width`;
//! its corrected intensity is shared between every bin the footprint overlaps,
//! weighted by the fractional overlap.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use splitbbox::{integrate_1d, Corrections, Integrate1dConfig, PixelGeometry};
//!
//! let geometry = PixelGeometry::new(&two_theta, &delta_two_theta);
//! let corrections = Corrections::none().with_mask(&mask).with_flat(&flat);
//! let config = Integrate1dConfig::new(1000).with_pos0_range(0.0, 0.6);
//!
//! let pattern = integrate_1d(&intensities, &geometry, &corrections, &config)?;
//! println!("{} bins", pattern.intensity.len());
//! ```

pub mod accumulator;
pub mod config;
pub mod correction;
pub mod error;
pub mod geometry;
pub mod integrate;
pub mod range;
pub mod splitter;

#[cfg(test)]
pub(crate) mod testing;

pub use accumulator::{Histogram1d, Histogram2d, COUNT_EPSILON};
pub use config::{ChiDiscontinuity, Dummy, Integrate1dConfig, Integrate2dConfig};
pub use correction::Corrections;
pub use error::{Error, Result};
pub use geometry::{AxisGeometry, PixelGeometry};
pub use integrate::{integrate_1d, integrate_2d};
pub use range::AxisRange;

pub use common::buffer2::Buffer2;
