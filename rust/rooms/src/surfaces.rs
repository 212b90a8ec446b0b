// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor and ceiling meshes

use nalgebra::Point3;
use playspace_geometry::{mesh_from_polygon, Axis, BoundingVolume, Mesh, PlaneRange};

use crate::boundary::BoundaryPolygon;
use crate::config::UvMode;
use crate::error::Result;

fn uv_range(points: &[Point3<f64>], mode: UvMode) -> Result<PlaneRange> {
    match mode {
        UvMode::Tiled => Ok(PlaneRange::unit_xz()),
        UvMode::Fitted => Ok(PlaneRange::from_bounds(&BoundingVolume::from_points(points))?),
    }
}

/// Floor mesh covering the whole play-space boundary
///
/// The boundary is walked in reverse so the floor faces the opposite way to
/// the raw boundary polygon.
pub fn build_floor(boundary: &BoundaryPolygon, mode: UvMode) -> Result<Mesh> {
    let reversed = boundary.reversed();
    let range = uv_range(reversed.points(), mode)?;
    let mesh = mesh_from_polygon(reversed.points(), &range)?;
    tracing::debug!(
        points = reversed.len(),
        triangles = mesh.triangle_count(),
        "Built floor"
    );
    Ok(mesh)
}

/// Flat ceiling spanning the shrunk bounding box at `height`
pub fn build_ceiling(
    bounds: &BoundingVolume,
    shrink_factor: f64,
    height: f64,
    mode: UvMode,
) -> Result<Mesh> {
    let x = bounds.shrunk_interval(Axis::X, shrink_factor)?;
    let z = bounds.shrunk_interval(Axis::Z, shrink_factor)?;

    let corners = [
        Point3::new(x.max, height, z.min),
        Point3::new(x.min, height, z.min),
        Point3::new(x.min, height, z.max),
        Point3::new(x.max, height, z.max),
    ];
    let range = uv_range(&corners, mode)?;
    Ok(mesh_from_polygon(&corners, &range)?)
}
