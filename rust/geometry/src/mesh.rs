// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Textured triangle mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Texture coordinates (u, v)
    pub uvs: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with its texture coordinate
    ///
    /// The normal slot is zeroed; run [`calculate_normals`] once all
    /// triangles are in place.
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, uv: Point2<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.extend_from_slice(&[0.0, 0.0, 0.0]);

        self.uvs.push(uv.x as f32);
        self.uvs.push(uv.y as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Merge another mesh into this one
    #[inline]
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = self.vertex_count() as u32;

        self.positions.reserve(other.positions.len());
        self.normals.reserve(other.normals.len());
        self.uvs.reserve(other.uvs.len());
        self.indices.reserve(other.indices.len());

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of vertex `index`
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<Point3<f64>> {
        let chunk = self.positions.get(index * 3..index * 3 + 3)?;
        Some(Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64))
    }

    /// Texture coordinate of vertex `index`
    #[inline]
    pub fn uv(&self, index: usize) -> Option<(f32, f32)> {
        let chunk = self.uvs.get(index * 2..index * 2 + 2)?;
        Some((chunk[0], chunk[1]))
    }

    /// Normal of vertex `index`
    #[inline]
    pub fn normal(&self, index: usize) -> Option<Vector3<f64>> {
        let chunk = self.normals.get(index * 3..index * 3 + 3)?;
        Some(Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64))
    }

    /// Vertex indices of triangle `index`
    #[inline]
    pub fn triangle(&self, index: usize) -> Option<[u32; 3]> {
        let chunk = self.indices.get(index * 3..index * 3 + 3)?;
        Some([chunk[0], chunk[1], chunk[2]])
    }

    /// Unnormalized face normal of triangle `index` (right-hand rule)
    pub fn face_normal(&self, index: usize) -> Option<Vector3<f64>> {
        let [i0, i1, i2] = self.triangle(index)?;
        let v0 = self.vertex(i0 as usize)?;
        let v1 = self.vertex(i1 as usize)?;
        let v2 = self.vertex(i2 as usize)?;
        Some((v1 - v0).cross(&(v2 - v0)))
    }

    /// Check that every index refers to an existing vertex
    pub fn validate_indices(&self) -> Result<()> {
        let vertex_count = self.vertex_count();
        match self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            Some(&index) => Err(Error::IndexOutOfRange {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Calculate bounds (min, max)
    #[inline]
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Recompute per-vertex normals as the normalized sum of adjacent face normals
///
/// Vertices not referenced by any triangle, or whose faces cancel out, get a
/// zero normal.
pub fn calculate_normals(mesh: &mut Mesh) {
    let vertex_count = mesh.vertex_count();
    if vertex_count == 0 {
        return;
    }

    let mut normals = vec![Vector3::<f64>::zeros(); vertex_count];

    // Accumulate face normals
    for triangle in mesh.indices.chunks_exact(3) {
        let (i0, i1, i2) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        let (Some(v0), Some(v1), Some(v2)) = (mesh.vertex(i0), mesh.vertex(i1), mesh.vertex(i2))
        else {
            continue;
        };

        let normal = (v1 - v0).cross(&(v2 - v0));

        normals[i0] += normal;
        normals[i1] += normal;
        normals[i2] += normal;
    }

    // Normalize and write back
    mesh.normals.clear();
    mesh.normals.reserve(vertex_count * 3);

    for normal in normals {
        let normalized = normal.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
        mesh.normals.push(normalized.x as f32);
        mesh.normals.push(normalized.y as f32);
        mesh.normals.push(normalized.z as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), Point2::new(0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), Point2::new(1.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0), Point2::new(0.0, 1.0));
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), Point2::new(0.25, 0.5));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 0.0]);
        assert_eq!(mesh.uv(0), Some((0.25, 0.5)));
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut mesh1 = unit_triangle();
        let mesh2 = unit_triangle();

        mesh1.merge(&mesh2);
        assert_eq!(mesh1.vertex_count(), 6);
        assert_eq!(mesh1.triangle_count(), 2);
        assert_eq!(mesh1.triangle(1), Some([3, 4, 5]));
        assert_eq!(mesh1.uvs.len(), 12);
        assert!(mesh1.validate_indices().is_ok());
    }

    #[test]
    fn test_validate_indices_reports_out_of_range() {
        let mut mesh = unit_triangle();
        mesh.add_triangle(0, 2, 7);
        assert_eq!(
            mesh.validate_indices(),
            Err(Error::IndexOutOfRange {
                index: 7,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_calculate_normals_counter_clockwise_faces_up() {
        let mut mesh = unit_triangle();
        calculate_normals(&mut mesh);
        for i in 0..3 {
            let normal = mesh.normal(i).unwrap();
            assert_relative_eq!(normal.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_zero_normal() {
        let mut mesh = unit_triangle();
        mesh.add_vertex(Point3::new(5.0, 5.0, 5.0), Point2::new(0.0, 0.0));
        calculate_normals(&mut mesh);
        assert_eq!(mesh.normal(3), Some(Vector3::zeros()));
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn test_bounds() {
        let (min, max) = unit_triangle().bounds();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
    }
}
