// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding volume grown from a point stream

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::interval::LinearInterval;
use crate::{Error, Result};

/// Spatial axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn of(self, point: &Point3<f64>) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }
}

/// Axis-aligned 3D box built incrementally with [`BoundingVolume::extend`]
///
/// Until the first point is folded in the volume is empty and every range
/// query reports zero width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolume {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
    /// Number of points folded in so far
    count: usize,
}

impl BoundingVolume {
    /// Create an empty volume
    pub fn new() -> Self {
        Self {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
            min_z: 0.0,
            max_z: 0.0,
            count: 0,
        }
    }

    /// Fold every point of an iterator into a fresh volume
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut volume = Self::new();
        for point in points {
            volume.extend(point);
        }
        volume
    }

    /// Grow the box to include `point`
    #[inline]
    pub fn extend(&mut self, point: &Point3<f64>) {
        if self.count == 0 {
            self.min_x = point.x;
            self.max_x = point.x;
            self.min_y = point.y;
            self.max_y = point.y;
            self.min_z = point.z;
            self.max_z = point.z;
        } else {
            self.min_x = self.min_x.min(point.x);
            self.max_x = self.max_x.max(point.x);
            self.min_y = self.min_y.min(point.y);
            self.max_y = self.max_y.max(point.y);
            self.min_z = self.min_z.min(point.z);
            self.max_z = self.max_z.max(point.z);
        }
        self.count += 1;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of points folded in (duplicates included)
    #[inline]
    pub fn point_count(&self) -> usize {
        self.count
    }

    /// `max - min` along an axis, zero when the volume is empty
    #[inline]
    pub fn axis_range(&self, axis: Axis) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let (min, max) = self.raw_bounds(axis);
        max - min
    }

    /// Min/max along an axis, `None` when the volume is empty
    #[inline]
    pub fn axis_interval(&self, axis: Axis) -> Option<LinearInterval> {
        if self.is_empty() {
            return None;
        }
        let (min, max) = self.raw_bounds(axis);
        Some(LinearInterval { min, max })
    }

    /// Like [`axis_interval`](Self::axis_interval) but failing loudly
    pub fn require_axis(&self, axis: Axis) -> Result<LinearInterval> {
        self.axis_interval(axis).ok_or(Error::EmptyBoundingVolume)
    }

    /// Lower bound scaled about the tracking origin by `shrink`
    pub fn shrunk_min(&self, axis: Axis, shrink: f64) -> Result<f64> {
        Ok(self.require_axis(axis)?.min * shrink)
    }

    /// Upper bound scaled about the tracking origin by `shrink`
    pub fn shrunk_max(&self, axis: Axis, shrink: f64) -> Result<f64> {
        Ok(self.require_axis(axis)?.max * shrink)
    }

    /// Shrunk min/max along an axis as one interval
    pub fn shrunk_interval(&self, axis: Axis, shrink: f64) -> Result<LinearInterval> {
        let interval = self.require_axis(axis)?;
        Ok(LinearInterval::new(interval.min * shrink, interval.max * shrink))
    }

    /// Minimum corner, `None` when empty
    pub fn min_point(&self) -> Option<Point3<f64>> {
        (!self.is_empty()).then(|| Point3::new(self.min_x, self.min_y, self.min_z))
    }

    /// Maximum corner, `None` when empty
    pub fn max_point(&self) -> Option<Point3<f64>> {
        (!self.is_empty()).then(|| Point3::new(self.max_x, self.max_y, self.max_z))
    }

    #[inline]
    fn raw_bounds(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.min_x, self.max_x),
            Axis::Y => (self.min_y, self.max_y),
            Axis::Z => (self.min_z, self.max_z),
        }
    }
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Point3<f64>> for BoundingVolume {
    fn extend<T: IntoIterator<Item = Point3<f64>>>(&mut self, iter: T) {
        for point in iter {
            BoundingVolume::extend(self, &point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(-5.0, 0.0, -5.0),
            Point3::new(5.0, 0.0, -5.0),
            Point3::new(5.0, 0.0, 5.0),
            Point3::new(-5.0, 0.0, 5.0),
        ]
    }

    #[test]
    fn test_empty_volume_reports_zero_width() {
        let volume = BoundingVolume::new();
        assert!(volume.is_empty());
        assert_eq!(volume.axis_range(Axis::X), 0.0);
        assert!(volume.axis_interval(Axis::Z).is_none());
        assert_eq!(volume.shrunk_min(Axis::X, 0.9), Err(Error::EmptyBoundingVolume));
        assert!(volume.min_point().is_none());
    }

    #[test]
    fn test_single_point_has_zero_range() {
        let mut volume = BoundingVolume::new();
        volume.extend(&Point3::new(3.0, -1.0, 2.0));
        assert!(!volume.is_empty());
        assert_eq!(volume.axis_range(Axis::X), 0.0);
        assert_eq!(volume.require_axis(Axis::Y).unwrap(), LinearInterval::at(-1.0));
    }

    #[test]
    fn test_extend_is_order_independent() {
        let points = square();
        let forward = BoundingVolume::from_points(&points);
        let backward = BoundingVolume::from_points(points.iter().rev());
        assert_eq!(forward.min_point(), backward.min_point());
        assert_eq!(forward.max_point(), backward.max_point());
        assert_relative_eq!(forward.axis_range(Axis::X), 10.0);
        assert_relative_eq!(forward.axis_range(Axis::Z), 10.0);
        assert_eq!(forward.axis_range(Axis::Y), 0.0);
    }

    #[test]
    fn test_extend_is_idempotent() {
        let mut volume = BoundingVolume::from_points(&square());
        let before = (volume.min_point(), volume.max_point());
        for point in square() {
            volume.extend(&point);
        }
        assert_eq!(before, (volume.min_point(), volume.max_point()));
    }

    #[test]
    fn test_shrunk_coordinates_scale_about_origin() {
        let volume = BoundingVolume::from_points(&square());
        assert_relative_eq!(volume.shrunk_min(Axis::X, 0.9).unwrap(), -4.5);
        assert_relative_eq!(volume.shrunk_max(Axis::Z, 0.9).unwrap(), 4.5);
        let shrunk = volume.shrunk_interval(Axis::X, 0.5).unwrap();
        assert_relative_eq!(shrunk.length(), 5.0);
    }

    #[test]
    fn test_std_extend_trait() {
        let mut volume = BoundingVolume::new();
        Extend::extend(&mut volume, square());
        assert_eq!(volume.point_count(), 4);
        assert_eq!(volume.min_point(), Some(Point3::new(-5.0, 0.0, -5.0)));
    }
}
