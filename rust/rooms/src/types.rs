// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types shared by the room builders

use nalgebra::{Point3, Vector3};
use playspace_geometry::{Axis, LinearInterval, Mesh};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Room tag carried for external policy decisions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoomType {
    Foyer,
    Basement,
    #[default]
    Ground,
    Upper,
}

/// One of the four walls, in build order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// Wall 0, along X at the minimum Z edge
    NegZ,
    /// Wall 1, along Z at the maximum X edge
    PosX,
    /// Wall 2, along X at the maximum Z edge
    PosZ,
    /// Wall 3, along Z at the minimum X edge
    NegX,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [WallSide::NegZ, WallSide::PosX, WallSide::PosZ, WallSide::NegX];

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::WallIndexOutOfRange(index))
    }

    pub fn index(self) -> usize {
        match self {
            WallSide::NegZ => 0,
            WallSide::PosX => 1,
            WallSide::PosZ => 2,
            WallSide::NegX => 3,
        }
    }

    /// Yaw applied to features on this wall so they face into the room
    pub fn rotation_degrees(self) -> f64 {
        match self {
            WallSide::NegZ => 180.0,
            WallSide::PosX => 270.0,
            WallSide::PosZ => 0.0,
            WallSide::NegX => 90.0,
        }
    }

    /// Axis the wall runs along; free-space intervals live on this axis
    pub fn dominant_axis(self) -> Axis {
        match self {
            WallSide::NegZ | WallSide::PosZ => Axis::X,
            WallSide::PosX | WallSide::NegX => Axis::Z,
        }
    }

    /// Unit vector pointing from the wall into the room
    pub fn inward(self) -> Vector3<f64> {
        match self {
            WallSide::NegZ => Vector3::z(),
            WallSide::PosX => -Vector3::x(),
            WallSide::PosZ => -Vector3::z(),
            WallSide::NegX => Vector3::x(),
        }
    }
}

/// Kind of feature hung on a wall
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Door,
    Window,
}

impl FeatureKind {
    /// Doors go on interior walls, windows on exterior walls
    pub fn allowed_on(self, is_exterior: bool) -> bool {
        match self {
            FeatureKind::Door => !is_exterior,
            FeatureKind::Window => is_exterior,
        }
    }
}

/// Where a door or window ended up, handed to the instantiation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturePlacement {
    pub kind: FeatureKind,
    /// Asset name chosen for this room
    pub asset: String,
    pub wall_index: usize,
    pub position: Point3<f64>,
    /// Yaw in degrees
    pub rotation_degrees: f64,
    /// Wall section consumed, on the wall's dominant axis
    pub span: LinearInterval,
    /// Anchor for a window light, just inside and below the window
    pub light_anchor: Option<Point3<f64>>,
}

/// Floor or ceiling mesh with its chosen material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    pub mesh: Mesh,
    pub material: Option<String>,
}
