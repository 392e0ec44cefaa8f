#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for measuring token distances on a gridded tabletop."]
#![doc = ""]
#![doc = "This crate provides pure Euclidean distance and two grid-counting rules (PHB and DMG),"]
#![doc = "all of which take elevation into account, and ranks targets by distance from a source."]

extern crate alloc;

use alloc::string::String;
use core::fmt;
use libm::{fabs, floor, round, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub mod rank;

pub use error::DistanceError;
pub use rank::{RankOrder, RankedPair, rank_targets};

/// A token position on the scene.
///
/// `x` and `y` are raw world units (scene pixels); `elevation` is already in
/// game distance units (e.g. feet), not grid spaces.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal world position.
    pub x: f64,
    /// Vertical (screen) world position.
    pub y: f64,
    /// Height above the scene, in distance units.
    #[cfg_attr(feature = "serde", serde(default))]
    pub elevation: f64,
}

impl Position {
    /// Construct a new position.
    pub const fn new(x: f64, y: f64, elevation: f64) -> Self {
        Position { x, y, elevation }
    }

    /// Check that every coordinate is finite.
    ///
    /// # Errors
    ///
    /// Returns `Err(DistanceError::NonFinitePosition)` if any coordinate is NaN or infinite.
    pub fn validate(&self) -> Result<(), DistanceError> {
        if self.x.is_finite() && self.y.is_finite() && self.elevation.is_finite() {
            Ok(())
        } else {
            Err(DistanceError::NonFinitePosition("coordinates must be finite"))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.1}, y: {:.1}, elevation: {:.1})", self.x, self.y, self.elevation)
    }
}

/// Raw grid parameters, as read from a scene before validation.
///
/// Serialized with the scene's key names: `size`, `distance` and `units`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    /// World units (pixels) per grid cell.
    #[cfg_attr(feature = "serde", serde(rename = "size"))]
    pub cell_size: f64,
    /// Distance represented by one grid cell.
    #[cfg_attr(feature = "serde", serde(rename = "distance"))]
    pub unit_distance: f64,
    /// Label of the distance unit, e.g. `"ft"`.
    #[cfg_attr(feature = "serde", serde(rename = "units", default))]
    pub unit_label: String,
}

/// Validated grid configuration for one scene.
///
/// Only obtainable through [`GridConfig::new`] (or deserialization, which
/// runs the same checks), so every distance function can divide by
/// `cell_size` and `unit_distance` without producing NaN or infinity.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridParams", into = "GridParams"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    cell_size: f64,
    unit_distance: f64,
    unit_label: String,
}

impl GridConfig {
    /// Construct a new grid configuration.
    ///
    /// # Arguments
    ///
    /// * `cell_size`: World units (pixels) per grid cell.
    /// * `unit_distance`: Distance one grid cell represents (e.g. 5 for 5 ft squares).
    /// * `unit_label`: Label of the distance unit.
    ///
    /// # Errors
    ///
    /// Returns `Err(DistanceError::InvalidCellSize)` if `cell_size` is not a positive finite number.
    /// Returns `Err(DistanceError::InvalidUnitDistance)` if `unit_distance` is not a positive finite number.
    pub fn new(
        cell_size: f64,
        unit_distance: f64,
        unit_label: impl Into<String>,
    ) -> Result<Self, DistanceError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(DistanceError::InvalidCellSize("must be positive and finite"));
        }
        if !(unit_distance.is_finite() && unit_distance > 0.0) {
            return Err(DistanceError::InvalidUnitDistance("must be positive and finite"));
        }
        Ok(GridConfig {
            cell_size,
            unit_distance,
            unit_label: unit_label.into(),
        })
    }

    /// Returns the world units per grid cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the distance represented by one grid cell.
    pub fn unit_distance(&self) -> f64 {
        self.unit_distance
    }

    /// Returns the distance unit label.
    pub fn unit_label(&self) -> &str {
        &self.unit_label
    }
}

impl TryFrom<GridParams> for GridConfig {
    type Error = DistanceError;

    fn try_from(params: GridParams) -> Result<Self, Self::Error> {
        GridConfig::new(params.cell_size, params.unit_distance, params.unit_label)
    }
}

impl From<GridConfig> for GridParams {
    fn from(grid: GridConfig) -> Self {
        GridParams {
            cell_size: grid.cell_size,
            unit_distance: grid.unit_distance,
            unit_label: grid.unit_label,
        }
    }
}

impl fmt::Display for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grid (cell: {} px, {} {} per cell)",
            self.cell_size, self.unit_distance, self.unit_label
        )
    }
}

/// A named, positioned entity on the scene.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Display name.
    pub name: String,
    /// Current position.
    pub position: Position,
}

impl Token {
    /// Construct a new token.
    ///
    /// # Errors
    ///
    /// Returns `Err(DistanceError::NonFinitePosition)` if `position` has a NaN or infinite coordinate.
    pub fn new(name: impl Into<String>, position: Position) -> Result<Self, DistanceError> {
        position.validate()?;
        Ok(Token {
            name: name.into(),
            position,
        })
    }
}

/// The three measurements for one (source, target) pair.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistanceResult {
    /// True 3D straight-line distance.
    pub euclid: f64,
    /// Distance under the PHB rule (diagonals cost one space).
    pub phb: f64,
    /// Distance under the DMG rule (every second diagonal costs two spaces).
    pub dmg: f64,
}

impl fmt::Display for DistanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(PHB: {}, Euclidean: {:.2}, DMG: {})", self.phb, self.euclid, self.dmg)
    }
}

/// Whole grid spaces moved along each axis, sorted ascending.
///
/// Counts stay `f64` so scenes of any finite size neither saturate nor overflow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpaceCounts(pub [f64; 3]);

impl SpaceCounts {
    /// The largest per-axis count.
    pub fn longest(&self) -> f64 {
        self.0[2]
    }

    /// The middle per-axis count: the number of diagonal moves that can be
    /// blended with the longest axis.
    pub fn median(&self) -> f64 {
        self.0[1]
    }
}

/// Round half-up a non-negative ratio into a whole number of spaces.
fn to_spaces(displacement: f64, per_space: f64) -> f64 {
    round(fabs(displacement) / per_space)
}

/// Count the grid spaces moved along x, y and elevation, sorted ascending.
///
/// x and y are divided by the cell size; elevation is divided by the unit
/// distance since it is already stored in distance units.
pub fn space_counts(source: Position, target: Position, grid: &GridConfig) -> SpaceCounts {
    let mut counts = [
        to_spaces(target.x - source.x, grid.cell_size),
        to_spaces(target.y - source.y, grid.cell_size),
        to_spaces(target.elevation - source.elevation, grid.unit_distance),
    ];
    counts.sort_unstable_by(f64::total_cmp);
    SpaceCounts(counts)
}

/// True 3D straight-line distance, in distance units. Never rounded.
pub fn euclidean_distance(source: Position, target: Position, grid: &GridConfig) -> f64 {
    let lateral_x = fabs(target.x - source.x) / grid.cell_size * grid.unit_distance;
    let lateral_y = fabs(target.y - source.y) / grid.cell_size * grid.unit_distance;
    let lateral = sqrt(lateral_x * lateral_x + lateral_y * lateral_y);
    // Elevation is already in distance units.
    let vertical = fabs(target.elevation - source.elevation);
    sqrt(lateral * lateral + vertical * vertical)
}

/// PHB rule: any move off a single axis is a diagonal and costs one space,
/// so the distance is the longest axis count.
pub fn phb_distance(source: Position, target: Position, grid: &GridConfig) -> f64 {
    let counts = space_counts(source, target, grid);
    counts.longest() * grid.unit_distance
}

/// DMG rule: every second diagonal move costs an extra space.
///
/// The median axis count is the number of diagonal moves, so the total is
/// `longest + floor(median / 2)` spaces.
pub fn dmg_distance(source: Position, target: Position, grid: &GridConfig) -> f64 {
    let counts = space_counts(source, target, grid);
    let extra_spaces = floor(counts.median() / 2.0);
    (counts.longest() + extra_spaces) * grid.unit_distance
}

/// Measure one pair with all three rules from the same snapshot.
pub fn measure(source: Position, target: Position, grid: &GridConfig) -> DistanceResult {
    DistanceResult {
        euclid: euclidean_distance(source, target, grid),
        phb: phb_distance(source, target, grid),
        dmg: dmg_distance(source, target, grid),
    }
}

/// Distance measurement conventions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceRule {
    /// Straight line through 3D space.
    Euclidean,
    /// Diagonals cost the same as straight moves: the longest axis wins.
    Phb,
    /// Alternating diagonals: every second diagonal costs double.
    Dmg,
}

impl DistanceRule {
    /// Every rule, in the order reports print them.
    pub const ALL: [DistanceRule; 3] = [DistanceRule::Phb, DistanceRule::Euclidean, DistanceRule::Dmg];

    /// Distance between `source` and `target` under this rule.
    pub fn distance(&self, source: Position, target: Position, grid: &GridConfig) -> f64 {
        match self {
            DistanceRule::Euclidean => euclidean_distance(source, target, grid),
            DistanceRule::Phb => phb_distance(source, target, grid),
            DistanceRule::Dmg => dmg_distance(source, target, grid),
        }
    }
}

impl fmt::Display for DistanceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistanceRule::Euclidean => "Euclidean",
            DistanceRule::Phb => "PHB",
            DistanceRule::Dmg => "DMG",
        };
        f.pad(name)
    }
}
