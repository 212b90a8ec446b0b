// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room build session
//!
//! A [`RoomBuilder`] owns the configuration and the random source for one or
//! more room builds. Every build runs the same fixed sequence so a seeded
//! RNG reproduces the same room:
//!
//! 1. boundary polygon from the [`BoundarySource`]
//! 2. walls from the boundary's bounding volume
//! 3. floor and ceiling meshes
//! 4. floor, wall and ceiling materials
//! 5. door asset, then doors on interior walls
//! 6. window asset, then windows on exterior walls

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use playspace_geometry::{BoundingVolume, Mesh};

use crate::boundary::{BoundaryPolygon, BoundarySource};
use crate::config::{MaterialPalette, RoomConfig};
use crate::error::Result;
use crate::features::{FeaturePlacer, FeatureSpec};
use crate::surfaces::{build_ceiling, build_floor};
use crate::types::{FeaturePlacement, RoomType, Surface};
use crate::walls::{Wall, WallBuilder};

/// Everything produced for one room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRoom {
    pub room_type: RoomType,
    /// Bounds of the boundary polygon the room was fitted into
    pub bounds: BoundingVolume,
    pub floor: Surface,
    pub ceiling: Surface,
    pub walls: Vec<Wall>,
    /// Material shared by all four walls
    pub wall_material: Option<String>,
    pub doors: Vec<FeaturePlacement>,
    pub windows: Vec<FeaturePlacement>,
}

impl GeneratedRoom {
    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// All placements, doors first
    pub fn placements(&self) -> impl Iterator<Item = &FeaturePlacement> {
        self.doors.iter().chain(&self.windows)
    }

    /// Floor, ceiling and walls merged into one mesh
    pub fn combined_mesh(&self) -> Mesh {
        let mut mesh = self.floor.mesh.clone();
        mesh.merge(&self.ceiling.mesh);
        for wall in &self.walls {
            mesh.merge(&wall.mesh);
        }
        mesh
    }
}

/// Builds rooms from a configuration and an injected RNG
pub struct RoomBuilder<R: Rng> {
    config: RoomConfig,
    rng: R,
}

impl<R: Rng> RoomBuilder<R> {
    /// Validates `config` up front so builds only fail on boundary problems
    pub fn new(config: RoomConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Fetch a boundary from `source` and build a room inside it
    pub fn build<S: BoundarySource + ?Sized>(&mut self, source: &mut S) -> Result<GeneratedRoom> {
        let boundary = source.boundary()?;
        self.build_from_polygon(&boundary)
    }

    pub fn build_from_polygon(&mut self, boundary: &BoundaryPolygon) -> Result<GeneratedRoom> {
        let config = &self.config;
        let rng = &mut self.rng;
        let bounds = boundary.bounds();

        let mut walls = WallBuilder::new(
            config.shrink_factor,
            config.ceiling_height,
            config.wall_adjustment,
        )
        .with_exterior(config.walls.exterior)
        .build(&bounds)?;

        let floor_mesh = build_floor(boundary, config.uv_mode)?;
        let ceiling_mesh = build_ceiling(
            &bounds,
            config.shrink_factor,
            config.ceiling_height,
            config.uv_mode,
        )?;

        let floor = Surface {
            mesh: floor_mesh,
            material: MaterialPalette::pick(&config.materials.floor, rng),
        };
        let wall_material = MaterialPalette::pick(&config.materials.walls, rng);
        let ceiling = Surface {
            mesh: ceiling_mesh,
            material: MaterialPalette::pick(&config.materials.ceiling, rng),
        };

        let mut placer = FeaturePlacer::new(config.window_inset);

        let doors = match config.doors.choose(rng) {
            Some(asset) => {
                let spec = FeatureSpec::door(asset, config.door_elevation);
                placer.place_all(&mut walls, &spec, &config.walls, rng)
            }
            None => {
                tracing::warn!("No door assets configured, skipping doors");
                Vec::new()
            }
        };
        let windows = match config.windows.choose(rng) {
            Some(asset) => {
                let spec = FeatureSpec::window(asset, config.ceiling_height);
                placer.place_all(&mut walls, &spec, &config.walls, rng)
            }
            None => {
                tracing::warn!("No window assets configured, skipping windows");
                Vec::new()
            }
        };

        tracing::info!(
            room_type = ?config.room_type,
            boundary_points = boundary.len(),
            doors = doors.len(),
            windows = windows.len(),
            "Generated room"
        );

        Ok(GeneratedRoom {
            room_type: config.room_type,
            bounds,
            floor,
            ceiling,
            walls,
            wall_material,
            doors,
            windows,
        })
    }
}

/// One-shot build with a seeded [`StdRng`]
pub fn generate_room<S: BoundarySource + ?Sized>(
    config: RoomConfig,
    source: &mut S,
    seed: u64,
) -> Result<GeneratedRoom> {
    RoomBuilder::new(config, StdRng::seed_from_u64(seed))?.build(source)
}
