// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Texture plane ranges

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::bounds::{Axis, BoundingVolume};
use crate::{Error, Result};

/// Per-axis min/max used to map spatial coordinates into UV space
///
/// An axis whose range is zero is not part of the texture plane and is
/// skipped when UVs are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneRange {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl PlaneRange {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// Degenerate range collapsed onto a single point
    pub fn at_point(point: &Point3<f64>) -> Self {
        Self::new(point.x, point.x, point.y, point.y, point.z, point.z)
    }

    /// Range matching a bounding volume, so UVs land in `[0, 1]`
    pub fn from_bounds(bounds: &BoundingVolume) -> Result<Self> {
        if bounds.is_empty() {
            return Err(Error::EmptyBoundingVolume);
        }
        Ok(Self::new(
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y,
            bounds.min_z,
            bounds.max_z,
        ))
    }

    /// Horizontal plane, one texture repeat per unit on X and Z
    pub fn unit_xz() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0, 0.0, 1.0)
    }

    /// Vertical plane facing Z, one repeat per unit on X and Y
    pub fn unit_xy() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Vertical plane facing X, one repeat per unit on Z and Y
    pub fn unit_zy() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0, 0.0, 1.0)
    }

    #[inline]
    pub fn x_range(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn y_range(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn z_range(&self) -> f64 {
        self.max_z - self.min_z
    }

    /// `(min, range)` for an axis
    #[inline]
    pub fn axis(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.min_x, self.x_range()),
            Axis::Y => (self.min_y, self.y_range()),
            Axis::Z => (self.min_z, self.z_range()),
        }
    }
}
