// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall generation from the play-space bounding box
//!
//! Walls are a little smaller than the bounding box of the boundary. The
//! strip between the tracked area and the walls is left for scenery.

use nalgebra::Point3;
use playspace_geometry::{
    mesh_from_polygon, Axis, BoundingVolume, LinearInterval, Mesh, PlaneRange,
};
use serde::{Deserialize, Serialize};

use crate::allocator::WallSpaceAllocator;
use crate::error::{Error, Result};
use crate::types::WallSide;

/// Floor elevation of every wall's bottom edge
pub const FLOOR_HEIGHT: f64 = 0.0;

/// One of the four room walls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub side: WallSide,
    /// Corners in order: start floor, start ceiling, end ceiling, end floor
    pub quad: [Point3<f64>; 4],
    /// Spatial axes mapped to UV space
    pub uv_plane: PlaneRange,
    /// Yaw applied to features hung on this wall
    pub rotation_degrees: f64,
    pub is_exterior: bool,
    /// World coordinate of the wall plane on the axis it does not run along
    pub plane_offset: f64,
    pub mesh: Mesh,
    pub free_space: WallSpaceAllocator,
}

impl Wall {
    pub fn index(&self) -> usize {
        self.side.index()
    }

    /// Axis the wall runs along
    pub fn dominant_axis(&self) -> Axis {
        self.side.dominant_axis()
    }

    /// Height of the top edge
    pub fn top(&self) -> f64 {
        self.quad[1].y
    }
}

/// Builds the four walls of a room from a bounding volume
#[derive(Debug, Clone)]
pub struct WallBuilder {
    pub shrink_factor: f64,
    pub ceiling_height: f64,
    /// Offset added to world coordinates to get wall interval coordinates
    pub adjustment: f64,
    pub exterior: [bool; 4],
}

impl WallBuilder {
    pub fn new(shrink_factor: f64, ceiling_height: f64, adjustment: f64) -> Self {
        Self {
            shrink_factor,
            ceiling_height,
            adjustment,
            exterior: [false; 4],
        }
    }

    pub fn with_exterior(mut self, exterior: [bool; 4]) -> Self {
        self.exterior = exterior;
        self
    }

    /// Walls in order -Z, +X, +Z, -X
    pub fn build(&self, bounds: &BoundingVolume) -> Result<Vec<Wall>> {
        if !(self.shrink_factor > 0.0 && self.shrink_factor <= 1.0) {
            return Err(Error::InvalidShrinkFactor(self.shrink_factor));
        }
        let x = bounds.shrunk_interval(Axis::X, self.shrink_factor)?;
        let z = bounds.shrunk_interval(Axis::Z, self.shrink_factor)?;

        WallSide::ALL
            .iter()
            .map(|&side| self.build_wall(side, x, z))
            .collect()
    }

    fn build_wall(&self, side: WallSide, x: LinearInterval, z: LinearInterval) -> Result<Wall> {
        // Floor-level (x, z) start and end of each wall
        let (start, end, plane_offset, uv_plane) = match side {
            WallSide::NegZ => ((x.min, z.min), (x.max, z.min), z.min, PlaneRange::unit_xy()),
            WallSide::PosX => ((x.max, z.min), (x.max, z.max), x.max, PlaneRange::unit_zy()),
            WallSide::PosZ => ((x.max, z.max), (x.min, z.max), z.max, PlaneRange::unit_xy()),
            WallSide::NegX => ((x.min, z.max), (x.min, z.min), x.min, PlaneRange::unit_zy()),
        };

        let quad = [
            Point3::new(start.0, FLOOR_HEIGHT, start.1),
            Point3::new(start.0, self.ceiling_height, start.1),
            Point3::new(end.0, self.ceiling_height, end.1),
            Point3::new(end.0, FLOOR_HEIGHT, end.1),
        ];
        let mesh = mesh_from_polygon(&quad, &uv_plane)?;

        let usable = match side.dominant_axis() {
            Axis::Z => z,
            _ => x,
        };
        let free_space = WallSpaceAllocator::new(usable.offset(self.adjustment));

        let is_exterior = self.exterior[side.index()];
        tracing::debug!(
            wall = side.index(),
            exterior = is_exterior,
            free = %free_space.initial_extent(),
            "Built wall"
        );

        Ok(Wall {
            side,
            quad,
            uv_plane,
            rotation_degrees: side.rotation_degrees(),
            is_exterior,
            plane_offset,
            mesh,
            free_space,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_bounds(half: f64) -> BoundingVolume {
        BoundingVolume::from_points(&[
            Point3::new(-half, 0.0, -half),
            Point3::new(half, 0.0, -half),
            Point3::new(half, 0.0, half),
            Point3::new(-half, 0.0, half),
        ])
    }

    #[test]
    fn test_empty_bounds_fail_loudly() {
        let result = WallBuilder::new(0.9, 2.5, 0.6).build(&BoundingVolume::new());
        assert!(matches!(
            result,
            Err(Error::Geometry(playspace_geometry::Error::EmptyBoundingVolume))
        ));
    }

    #[test]
    fn test_shrink_factor_out_of_range() {
        let result = WallBuilder::new(1.1, 2.5, 0.6).build(&square_bounds(5.0));
        assert!(matches!(result, Err(Error::InvalidShrinkFactor(_))));
    }

    #[test]
    fn test_wall_quads_follow_shrunk_box() {
        let walls = WallBuilder::new(0.9, 2.5, 0.6).build(&square_bounds(5.0)).unwrap();
        assert_eq!(walls.len(), 4);

        let w0 = &walls[0];
        assert_eq!(w0.quad[0], Point3::new(-4.5, 0.0, -4.5));
        assert_eq!(w0.quad[2], Point3::new(4.5, 2.5, -4.5));
        assert_relative_eq!(w0.plane_offset, -4.5);

        let w1 = &walls[1];
        assert_eq!(w1.quad[0], Point3::new(4.5, 0.0, -4.5));
        assert_eq!(w1.quad[3], Point3::new(4.5, 0.0, 4.5));

        let w3 = &walls[3];
        assert_eq!(w3.quad[0], Point3::new(-4.5, 0.0, 4.5));
        assert_eq!(w3.quad[3], Point3::new(-4.5, 0.0, -4.5));
    }

    #[test]
    fn test_allocators_seeded_with_adjusted_extent() {
        let walls = WallBuilder::new(0.9, 2.5, 0.6).build(&square_bounds(5.0)).unwrap();
        for wall in &walls {
            let seed = wall.free_space.initial_extent();
            assert_relative_eq!(seed.min, 0.6 - 4.5, epsilon = 1e-9);
            assert_relative_eq!(seed.max, 0.6 + 4.5, epsilon = 1e-9);
            assert_eq!(wall.free_space.len(), 1);
        }
    }

    #[test]
    fn test_rotation_and_exterior_flags() {
        let walls = WallBuilder::new(0.9, 3.0, 0.0)
            .with_exterior([true, false, false, true])
            .build(&square_bounds(2.0))
            .unwrap();
        let rotations: Vec<f64> = walls.iter().map(|w| w.rotation_degrees).collect();
        assert_eq!(rotations, vec![180.0, 270.0, 0.0, 90.0]);
        let exterior: Vec<bool> = walls.iter().map(|w| w.is_exterior).collect();
        assert_eq!(exterior, vec![true, false, false, true]);
        assert!(walls.iter().all(|w| w.top() == 3.0));
    }

    #[test]
    fn test_wall_uvs_use_vertical_planes() {
        let walls = WallBuilder::new(1.0, 2.0, 0.0).build(&square_bounds(1.0)).unwrap();
        // Wall 0 maps X and Y; its ceiling-end corner is (1, 2)
        assert_eq!(walls[0].mesh.uv(2), Some((1.0, 2.0)));
        // Wall 1 maps Z and Y
        assert_eq!(walls[1].mesh.uv(2), Some((1.0, 2.0)));
        assert_eq!(walls[1].mesh.uv(0), Some((-1.0, 0.0)));
        assert_eq!(walls[0].mesh.triangle_count(), 2);
    }
}
