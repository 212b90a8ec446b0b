// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Procedural rooms inside a tracked play-space
//!
//! This crate provides a complete pipeline for:
//! 1. Acquiring the play-space boundary (chaperone corners or a fixed polygon)
//! 2. Fitting four walls inside the boundary's shrunk bounding box
//! 3. Meshing the floor from the boundary and the ceiling from the box
//! 4. Placing doors on interior walls and windows on exterior walls without
//!    overlaps
//!
//! # Usage
//!
//! ```rust,ignore
//! use playspace_rooms::{generate_room, ChaperoneBounds, RoomConfig};
//!
//! let config = RoomConfig::from_json(&json)?;
//! let mut chaperone = ChaperoneBounds::from_config(corners, &config);
//! let room = generate_room(config, &mut chaperone, seed)?;
//!
//! for door in &room.doors {
//!     println!("{} at {:?}", door.asset, door.position);
//! }
//! ```

pub mod allocator;
pub mod boundary;
pub mod config;
pub mod error;
pub mod features;
pub mod room_builder;
pub mod surfaces;
pub mod types;
pub mod walls;

// Re-export commonly used types and functions
pub use allocator::{CommitOutcome, WallSpaceAllocator};
pub use boundary::{BoundaryPolygon, BoundarySource, ChaperoneBounds};
pub use config::{FeatureAsset, MaterialPalette, RoomConfig, UvMode, WallPolicy};
pub use error::{Error, Result};
pub use features::{FeaturePlacer, FeatureSpec};
pub use room_builder::{generate_room, GeneratedRoom, RoomBuilder};
pub use surfaces::{build_ceiling, build_floor};
pub use types::{FeatureKind, FeaturePlacement, RoomType, Surface, WallSide};
pub use walls::{Wall, WallBuilder};
