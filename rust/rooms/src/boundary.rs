// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Play-space boundary acquisition
//!
//! The tracking subsystem owns calibration; this module only defines the
//! seam ([`BoundarySource`]) and converts raw chaperone corners into world
//! points.

use nalgebra::{Point3, Rotation3, Vector3};
use playspace_geometry::BoundingVolume;
use serde::{Deserialize, Serialize};

use crate::config::RoomConfig;
use crate::error::{Error, Result};

/// Ordered play-space outline with at least 3 points
///
/// Deserialized polygons go through [`BoundaryPolygon::new`], so a record
/// with fewer than 3 points is rejected while parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundaryPolygon")]
pub struct BoundaryPolygon {
    points: Vec<Point3<f64>>,
}

#[derive(Deserialize)]
struct RawBoundaryPolygon {
    points: Vec<Point3<f64>>,
}

impl TryFrom<RawBoundaryPolygon> for BoundaryPolygon {
    type Error = Error;

    fn try_from(raw: RawBoundaryPolygon) -> Result<Self> {
        Self::new(raw.points)
    }
}

impl BoundaryPolygon {
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.len() < 3 {
            return Err(playspace_geometry::Error::DegeneratePolygon {
                count: points.len(),
            }
            .into());
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// New polygon with the traversal order reversed
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Bounding volume of every boundary point
    pub fn bounds(&self) -> BoundingVolume {
        BoundingVolume::from_points(&self.points)
    }
}

/// Supplies the play-space boundary for one room build
pub trait BoundarySource {
    /// Fetch the boundary, or fail with [`Error::CalibrationUnavailable`]
    fn boundary(&mut self) -> Result<BoundaryPolygon>;
}

impl BoundarySource for BoundaryPolygon {
    fn boundary(&mut self) -> Result<BoundaryPolygon> {
        Ok(self.clone())
    }
}

/// Default yaw between tracker space and room space
pub const DEFAULT_CHAPERONE_ANGLE_OFFSET: f64 = 90.0;

/// Raw chaperone corners as reported by the tracker
///
/// Each corner is `[v0, v1, v2]` in tracker order; the world point is
/// `(v2, v1, v0)` yawed about +Y by the angle offset. `corners: None`
/// models a tracker that has not been calibrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaperoneBounds {
    pub corners: Option<Vec<[f32; 3]>>,
    pub angle_offset_degrees: f64,
}

impl ChaperoneBounds {
    pub fn new(corners: Vec<[f32; 3]>) -> Self {
        Self {
            corners: Some(corners),
            angle_offset_degrees: DEFAULT_CHAPERONE_ANGLE_OFFSET,
        }
    }

    /// Tracker that never reported live collision bounds
    pub fn uncalibrated() -> Self {
        Self {
            corners: None,
            angle_offset_degrees: DEFAULT_CHAPERONE_ANGLE_OFFSET,
        }
    }

    /// Corners yawed by the room configuration's chaperone angle offset
    pub fn from_config(corners: Vec<[f32; 3]>, config: &RoomConfig) -> Self {
        Self::new(corners).with_angle_offset(config.chaperone_angle_offset_degrees)
    }

    pub fn with_angle_offset(mut self, degrees: f64) -> Self {
        self.angle_offset_degrees = degrees;
        self
    }

    /// Convert one tracker corner into a room-space point
    pub fn corner_to_point(&self, corner: [f32; 3]) -> Point3<f64> {
        let raw = Point3::new(corner[2] as f64, corner[1] as f64, corner[0] as f64);
        let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), self.angle_offset_degrees.to_radians());
        yaw * raw
    }
}

impl BoundarySource for ChaperoneBounds {
    fn boundary(&mut self) -> Result<BoundaryPolygon> {
        let corners = self.corners.as_ref().ok_or_else(|| {
            Error::CalibrationUnavailable(
                "no live collision bounds; make sure tracking is up and the space is calibrated"
                    .to_string(),
            )
        })?;
        if corners.is_empty() {
            return Err(Error::CalibrationUnavailable(
                "tracker reported no chaperone points".to_string(),
            ));
        }

        let points = corners.iter().map(|&c| self.corner_to_point(c)).collect();
        BoundaryPolygon::new(points)
    }
}
