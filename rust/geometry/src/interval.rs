// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-dimensional intervals along a wall

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed numeric range `[min, max]` along a single axis
///
/// `min <= max` always holds: the constructor orders its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearInterval {
    pub min: f64,
    pub max: f64,
}

impl LinearInterval {
    /// Create an interval, swapping the bounds if they arrive reversed
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Zero-width interval at a single value
    #[inline]
    pub fn at(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Interval starting at `start` spanning `width`
    #[inline]
    pub fn from_start(start: f64, width: f64) -> Self {
        Self::new(start, start + width)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Closed containment: `min <= value <= max`
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Open containment: `min < value < max`
    #[inline]
    pub fn interior_contains(&self, value: f64) -> bool {
        self.min < value && value < self.max
    }

    /// True if either endpoint of `other` falls strictly inside this interval
    ///
    /// This is the test the wall allocator uses to decide which free section
    /// a usage lands in. An `other` that exactly covers this interval does
    /// not count.
    #[inline]
    pub fn has_endpoint_inside(&self, other: &LinearInterval) -> bool {
        self.interior_contains(other.min) || self.interior_contains(other.max)
    }

    /// True if the two intervals share more than a single boundary point
    #[inline]
    pub fn overlaps(&self, other: &LinearInterval) -> bool {
        self.min < other.max && other.min < self.max
    }

    /// Smallest interval covering both
    #[inline]
    pub fn merge(&self, other: &LinearInterval) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the interval so it includes `value`
    #[inline]
    pub fn extend_to(&mut self, value: f64) {
        if self.min > value {
            self.min = value;
        }
        if self.max < value {
            self.max = value;
        }
    }

    /// Interval shifted by a constant offset
    #[inline]
    pub fn offset(&self, by: f64) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }
}

impl fmt::Display for LinearInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
