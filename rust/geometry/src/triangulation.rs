// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Boundary polygons arrive from the tracker already ordered around the play
//! area, so no point sorting or ear clipping is needed: the polygon is closed
//! by walking inward from both ends of the point list at once.

use crate::bounds::Axis;
use crate::mesh::{calculate_normals, Mesh};
use crate::plane::PlaneRange;
use crate::{Error, Point2, Point3, Result};

/// UV axis priority: the first two axes with a non-zero range fill (u, v)
const UV_AXIS_ORDER: [Axis; 3] = [Axis::X, Axis::Z, Axis::Y];

/// Dual-end fan triangulation of an `n`-point closed polygon
///
/// For `i` in `1..n/2` emits `(i, n-i, i+1)` and `(i, w, n-i)`, where `w` is
/// `0` on the first step and `n-i+1` afterwards. Odd `n` gets one residual
/// triangle `(half, half+1, half-1)`. Always returns exactly `n - 2`
/// triangles.
pub fn dual_end_fan(n: usize) -> Result<Vec<u32>> {
    if n < 3 {
        return Err(Error::DegeneratePolygon { count: n });
    }

    let half = n / 2;
    let mut indices = Vec::with_capacity((n - 2) * 3);

    for i in 1..half {
        indices.push(i as u32);
        indices.push((n - i) as u32);
        indices.push((i + 1) as u32);

        let wrapped = if i == 1 { 0 } else { n - i + 1 };
        indices.push(i as u32);
        indices.push(wrapped as u32);
        indices.push((n - i) as u32);
    }

    if n % 2 == 1 {
        tracing::debug!(points = n, half, "Odd point count, closing middle gap");
        indices.push(half as u32);
        indices.push((half + 1) as u32);
        indices.push((half - 1) as u32);
    }

    Ok(indices)
}

/// Map each point into UV space using the first two non-degenerate axes
///
/// Axes are tried in X, Z, Y order. A zero-range axis is skipped rather than
/// divided by; slots left unfilled are `0.0`.
pub fn assign_uvs(points: &[Point3<f64>], range: &PlaneRange) -> Vec<Point2<f64>> {
    let axes: Vec<(Axis, f64, f64)> = UV_AXIS_ORDER
        .iter()
        .map(|&axis| {
            let (min, extent) = range.axis(axis);
            (axis, min, extent)
        })
        .filter(|&(_, _, extent)| extent.abs() > f64::EPSILON)
        .take(2)
        .collect();

    points
        .iter()
        .map(|point| {
            let mut uv = [0.0f64; 2];
            for (slot, &(axis, min, extent)) in axes.iter().enumerate() {
                uv[slot] = (axis.of(point) - min) / extent;
            }
            Point2::new(uv[0], uv[1])
        })
        .collect()
}

/// Build a textured mesh from a closed boundary polygon
///
/// Triangles follow [`dual_end_fan`], UVs follow [`assign_uvs`], and
/// per-vertex normals are recomputed before returning.
pub fn mesh_from_polygon(points: &[Point3<f64>], range: &PlaneRange) -> Result<Mesh> {
    let indices = dual_end_fan(points.len())?;
    let uvs = assign_uvs(points, range);

    let mut mesh = Mesh::with_capacity(points.len(), indices.len());
    for (point, uv) in points.iter().zip(uvs) {
        mesh.add_vertex(*point, uv);
    }
    for triangle in indices.chunks_exact(3) {
        mesh.add_triangle(triangle[0], triangle[1], triangle[2]);
    }
    calculate_normals(&mut mesh);

    Ok(mesh)
}
