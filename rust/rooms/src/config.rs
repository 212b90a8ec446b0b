// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room generation configuration

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::boundary::DEFAULT_CHAPERONE_ANGLE_OFFSET;
use crate::error::{Error, Result};
use crate::types::{FeatureKind, RoomType};

/// How floor and ceiling textures are stretched over the surface
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UvMode {
    /// One texture repeat per metre on each horizontal axis
    #[default]
    Tiled,
    /// Texture stretched once over the surface's bounds, UVs in [0, 1]
    Fitted,
}

/// Per-wall classification and placement odds, indexed by wall 0..4
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WallPolicy {
    /// Exterior walls take windows, interior walls take doors
    pub exterior: [bool; 4],
    /// Chance in [0, 1] that an interior wall gets a door
    pub door_chance: [f64; 4],
    /// Chance in [0, 1] that an exterior wall gets a window
    pub window_chance: [f64; 4],
}

impl WallPolicy {
    pub fn chance(&self, kind: FeatureKind, wall_index: usize) -> f64 {
        let table = match kind {
            FeatureKind::Door => &self.door_chance,
            FeatureKind::Window => &self.window_chance,
        };
        table.get(wall_index).copied().unwrap_or(0.0)
    }

    pub fn is_exterior(&self, wall_index: usize) -> bool {
        self.exterior.get(wall_index).copied().unwrap_or(false)
    }
}

impl Default for WallPolicy {
    fn default() -> Self {
        Self {
            exterior: [false; 4],
            door_chance: [1.0; 4],
            window_chance: [0.9; 4],
        }
    }
}

/// Material names to pick from, per surface
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialPalette {
    pub floor: Vec<String>,
    pub walls: Vec<String>,
    pub ceiling: Vec<String>,
}

impl MaterialPalette {
    /// Uniform pick from a list; `None` for an empty list
    pub fn pick<R: Rng + ?Sized>(choices: &[String], rng: &mut R) -> Option<String> {
        choices.choose(rng).cloned()
    }
}

/// Door or window asset, sized from its render bounds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureAsset {
    pub name: String,
    pub bounds_min: [f64; 3],
    pub bounds_max: [f64; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f64; 3],
}

fn unit_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl FeatureAsset {
    pub fn new(name: impl Into<String>, bounds_min: [f64; 3], bounds_max: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            bounds_min,
            bounds_max,
            scale: unit_scale(),
        }
    }

    /// Asset of a given width along X, unit scale
    pub fn with_width(name: impl Into<String>, width: f64) -> Self {
        Self::new(name, [-width / 2.0, 0.0, -0.05], [width / 2.0, 1.0, 0.05])
    }

    pub fn scaled(mut self, scale: [f64; 3]) -> Self {
        self.scale = scale;
        self
    }

    /// Footprint along the wall: X extent of the bounds times X scale
    pub fn width(&self) -> f64 {
        (self.bounds_max[0] - self.bounds_min[0]) * self.scale[0]
    }
}

/// Everything a room build needs besides the boundary and the RNG
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub room_type: RoomType,
    /// Walls sit at this fraction of the boundary's bounding box
    pub shrink_factor: f64,
    /// Floor-to-ceiling height in metres
    pub ceiling_height: f64,
    /// Offset between world coordinates and wall interval coordinates
    pub wall_adjustment: f64,
    /// Yaw between tracker space and room space
    pub chaperone_angle_offset_degrees: f64,
    pub walls: WallPolicy,
    /// Height at which doors are anchored
    pub door_elevation: f64,
    /// How far windows sit inward from their wall plane
    pub window_inset: f64,
    pub uv_mode: UvMode,
    pub materials: MaterialPalette,
    pub doors: Vec<FeatureAsset>,
    pub windows: Vec<FeatureAsset>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            room_type: RoomType::default(),
            shrink_factor: 0.9, // 90%
            ceiling_height: 2.5,
            wall_adjustment: 0.6,
            chaperone_angle_offset_degrees: DEFAULT_CHAPERONE_ANGLE_OFFSET,
            walls: WallPolicy::default(),
            door_elevation: 1.05,
            window_inset: 0.05,
            uv_mode: UvMode::default(),
            materials: MaterialPalette::default(),
            doors: vec![FeatureAsset::new("door", [-1.25, 0.0, -0.1], [1.25, 5.25, 0.1])
                .scaled([0.4, 0.4, 0.6])],
            windows: vec![FeatureAsset::with_width("window", 1.2)],
        }
    }
}

impl RoomConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RoomConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.shrink_factor > 0.0 && self.shrink_factor <= 1.0) {
            return Err(Error::InvalidShrinkFactor(self.shrink_factor));
        }
        if !(self.ceiling_height.is_finite() && self.ceiling_height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "ceiling height must be positive, got {}",
                self.ceiling_height
            )));
        }
        if !self.wall_adjustment.is_finite() || !self.door_elevation.is_finite() {
            return Err(Error::InvalidConfig(
                "wall adjustment and door elevation must be finite".to_string(),
            ));
        }
        if !(self.window_inset.is_finite() && self.window_inset >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "window inset must be non-negative, got {}",
                self.window_inset
            )));
        }
        let chances = self.walls.door_chance.iter().chain(&self.walls.window_chance);
        if let Some(bad) = chances.copied().find(|c| !(0.0..=1.0).contains(c)) {
            return Err(Error::InvalidConfig(format!(
                "placement chance must be in [0, 1], got {}",
                bad
            )));
        }
        for asset in self.doors.iter().chain(&self.windows) {
            let width = asset.width();
            if !(width.is_finite() && width > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "asset '{}' has non-positive width {}",
                    asset.name, width
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_are_valid() {
        let config = RoomConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.doors[0].width(), 1.0);
        assert_relative_eq!(config.windows[0].width(), 1.2);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = RoomConfig::from_json(
            r#"{
                "room_type": "Basement",
                "shrink_factor": 0.8,
                "walls": { "exterior": [true, false, true, false] }
            }"#,
        )
        .unwrap();
        assert_eq!(config.room_type, RoomType::Basement);
        assert_eq!(config.shrink_factor, 0.8);
        assert_eq!(config.ceiling_height, 2.5);
        assert!(config.walls.is_exterior(2));
        assert_eq!(config.walls.window_chance, [0.9; 4]);
    }

    #[test]
    fn test_rejects_bad_shrink_factor() {
        let result = RoomConfig::from_json(r#"{ "shrink_factor": 1.5 }"#);
        assert!(matches!(result, Err(Error::InvalidShrinkFactor(s)) if s == 1.5));

        let config = RoomConfig {
            shrink_factor: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidShrinkFactor(_))));
    }

    #[test]
    fn test_rejects_out_of_range_chance() {
        let mut config = RoomConfig::default();
        config.walls.window_chance[3] = 1.2;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_width_asset() {
        let mut config = RoomConfig::default();
        config.windows.push(FeatureAsset::new("flat", [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        assert!(matches!(
            RoomConfig::from_json("{ not json"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_policy() {
        let mut config = RoomConfig::default();
        config.walls.exterior = [true, true, false, false];
        let parsed = RoomConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed.walls, config.walls);
    }

    #[test]
    fn test_palette_pick() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(MaterialPalette::pick(&[], &mut rng), None);
        let choices = vec!["oak".to_string(), "tile".to_string()];
        let picked = MaterialPalette::pick(&choices, &mut rng).unwrap();
        assert!(choices.contains(&picked));
    }

    #[test]
    fn test_policy_lookup() {
        let policy = WallPolicy::default();
        assert_eq!(policy.chance(FeatureKind::Door, 2), 1.0);
        assert_eq!(policy.chance(FeatureKind::Window, 0), 0.9);
        assert_eq!(policy.chance(FeatureKind::Window, 9), 0.0);
        assert!(!policy.is_exterior(9));
    }
}
