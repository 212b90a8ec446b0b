// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Playspace Geometry
//!
//! Geometry primitives for building a room inside a tracked play-space
//! boundary: one-dimensional wall intervals, incrementally grown bounding
//! volumes, UV plane ranges, and dual-end fan triangulation of boundary
//! polygons into textured meshes.

pub mod bounds;
pub mod error;
pub mod interval;
pub mod mesh;
pub mod plane;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use bounds::{Axis, BoundingVolume};
pub use error::{Error, Result};
pub use interval::LinearInterval;
pub use mesh::{calculate_normals, Mesh};
pub use plane::PlaneRange;
pub use triangulation::{assign_uvs, dual_end_fan, mesh_from_polygon};
