// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for room generation.

/// Result type alias for room generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a room build.
///
/// A feature that does not fit on a wall is not an error: placement simply
/// returns `None` for that wall.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tracking collaborator could not supply a boundary polygon.
    #[error("play-space calibration unavailable: {0}")]
    CalibrationUnavailable(String),

    /// The room configuration failed validation.
    #[error("invalid room configuration: {0}")]
    InvalidConfig(String),

    /// Walls are inset by a factor that must lie in (0, 1].
    #[error("shrink factor must be in (0, 1], got {0}")]
    InvalidShrinkFactor(f64),

    /// Wall index outside 0..4.
    #[error("wall index {0} out of range, rooms have 4 walls")]
    WallIndexOutOfRange(usize),

    /// Polygon or bounding volume problem raised by the geometry layer.
    #[error("geometry error: {0}")]
    Geometry(#[from] playspace_geometry::Error),

    /// Configuration JSON could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
