// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window placement
//!
//! Each wall carries a [`WallSpaceAllocator`](crate::allocator::WallSpaceAllocator).
//! A feature asks its wall for a free section wide enough, picks a random
//! offset inside it, and books the span so later features cannot overlap.

use nalgebra::{Point3, Vector3};
use playspace_geometry::{Axis, LinearInterval};
use rand::Rng;

use crate::config::{FeatureAsset, WallPolicy};
use crate::types::{FeatureKind, FeaturePlacement};
use crate::walls::Wall;

/// Distance a window light sits in front of its window
pub const LIGHT_INSET: f64 = 0.2;
/// Distance a window light sits below its window
pub const LIGHT_DROP: f64 = 0.5;

/// One feature kind with its chosen asset, ready to place
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSpec {
    pub kind: FeatureKind,
    pub asset: String,
    /// Span the feature occupies along the wall
    pub width: f64,
    /// Anchor height above the floor
    pub elevation: f64,
}

impl FeatureSpec {
    pub fn door(asset: &FeatureAsset, elevation: f64) -> Self {
        Self {
            kind: FeatureKind::Door,
            asset: asset.name.clone(),
            width: asset.width(),
            elevation,
        }
    }

    /// Windows hang two thirds of the way up the wall
    pub fn window(asset: &FeatureAsset, ceiling_height: f64) -> Self {
        Self {
            kind: FeatureKind::Window,
            asset: asset.name.clone(),
            width: asset.width(),
            elevation: ceiling_height * 2.0 / 3.0,
        }
    }
}

/// Places features on walls, one per wall per pass
#[derive(Debug, Clone, Default)]
pub struct FeaturePlacer {
    window_inset: f64,
    doors_placed: usize,
    windows_placed: usize,
}

impl FeaturePlacer {
    pub fn new(window_inset: f64) -> Self {
        Self {
            window_inset,
            ..Default::default()
        }
    }

    pub fn door_count(&self) -> usize {
        self.doors_placed
    }

    pub fn window_count(&self) -> usize {
        self.windows_placed
    }

    /// Try to place one feature on `wall`
    ///
    /// Returns `None` when no free section is longer than the feature, or
    /// when the chosen span could not be booked; the wall is left untouched
    /// in both cases.
    pub fn place_on_wall<R: Rng + ?Sized>(
        &mut self,
        wall: &mut Wall,
        spec: &FeatureSpec,
        rng: &mut R,
    ) -> Option<FeaturePlacement> {
        let Some(section) = wall.free_space.query(spec.width) else {
            tracing::debug!(
                wall = wall.index(),
                kind = ?spec.kind,
                width = spec.width,
                "No free section fits feature"
            );
            return None;
        };

        let lo = section.min;
        let hi = section.max - spec.width;
        let offset = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        let span = LinearInterval::from_start(offset, spec.width);
        if !wall.free_space.commit_usage(span).is_split() {
            // Rounding at large coordinates can leave a span with no interior
            // endpoint; it was never booked, so nothing is placed
            return None;
        }

        let mut position = match wall.dominant_axis() {
            Axis::Z => Point3::new(wall.plane_offset, spec.elevation, offset),
            _ => Point3::new(offset, spec.elevation, wall.plane_offset),
        };
        let inward = wall.side.inward();
        let light_anchor = match spec.kind {
            FeatureKind::Door => {
                self.doors_placed += 1;
                None
            }
            FeatureKind::Window => {
                self.windows_placed += 1;
                position += inward * self.window_inset;
                Some(position + inward * LIGHT_INSET - Vector3::y() * LIGHT_DROP)
            }
        };

        tracing::debug!(
            wall = wall.index(),
            kind = ?spec.kind,
            asset = %spec.asset,
            span = %span,
            "Placed feature"
        );

        Some(FeaturePlacement {
            kind: spec.kind,
            asset: spec.asset.clone(),
            wall_index: wall.index(),
            position,
            rotation_degrees: wall.rotation_degrees,
            span,
            light_anchor,
        })
    }

    /// Offer `spec` to every eligible wall in order, at most one per wall
    ///
    /// A wall is eligible when its exterior flag suits the feature kind. The
    /// random draw against the wall's chance is only made for eligible walls.
    pub fn place_all<R: Rng + ?Sized>(
        &mut self,
        walls: &mut [Wall],
        spec: &FeatureSpec,
        policy: &WallPolicy,
        rng: &mut R,
    ) -> Vec<FeaturePlacement> {
        let mut placements = Vec::new();
        for wall in walls.iter_mut() {
            if !spec.kind.allowed_on(wall.is_exterior) {
                continue;
            }
            let chance = policy.chance(spec.kind, wall.index());
            if rng.gen::<f64>() >= chance {
                tracing::debug!(wall = wall.index(), kind = ?spec.kind, chance, "Skipped by chance");
                continue;
            }
            if let Some(placement) = self.place_on_wall(wall, spec, rng) {
                placements.push(placement);
            }
        }
        placements
    }
}
