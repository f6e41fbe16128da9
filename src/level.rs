//! Level data records
//!
//! A level is a JSON document of tile coordinates plus two physics scalars.
//! Levels are validated when loaded so the simulation never sees a partial or
//! out-of-range world.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer grid position, serialized as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePos(pub i32, pub i32);

/// Errors raised while loading level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed level data in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("level list is empty")]
    NoLevels,

    #[error("world dimensions must be positive, got {width}x{height} tiles")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("level has no goal markers")]
    MissingGoal,

    #[error("{group} tile ({x}, {y}) lies outside the {width}x{height} world")]
    OutOfBounds {
        group: &'static str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("invalid physics: gravity {gravity}, terminal velocity {terminal_velocity}")]
    InvalidPhysics { gravity: f32, terminal_velocity: f32 },
}

/// Parsed contents of one level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    /// World width in tiles
    pub width: i32,
    /// World height in tiles
    pub height: i32,
    /// Hero start tile
    pub start: TilePos,
    /// Goal markers; the first is the primary door
    pub flag_locs: Vec<TilePos>,
    #[serde(default)]
    pub grass_locs: Vec<TilePos>,
    #[serde(default)]
    pub block_locs: Vec<TilePos>,
    #[serde(default)]
    pub dirt_locs: Vec<TilePos>,
    #[serde(default)]
    pub gold_locs: Vec<TilePos>,
    #[serde(default)]
    pub bronze_locs: Vec<TilePos>,
    /// Ground patrollers
    #[serde(default)]
    pub spikeman_locs: Vec<TilePos>,
    /// Flyers
    #[serde(default)]
    pub flyman_locs: Vec<TilePos>,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Maximum vertical speed
    pub terminal_velocity: f32,
}

impl LevelData {
    /// Parse and validate a level from JSON text
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(json).map_err(|source| LevelError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        level.validate()?;
        Ok(level)
    }

    /// Read, parse and validate a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, &path.display().to_string())
    }

    /// Check dimensions, physics and that every tile lies inside the world
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(LevelError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.gravity.is_finite()
            || self.gravity < 0.0
            || !self.terminal_velocity.is_finite()
            || self.terminal_velocity <= 0.0
        {
            return Err(LevelError::InvalidPhysics {
                gravity: self.gravity,
                terminal_velocity: self.terminal_velocity,
            });
        }
        if self.flag_locs.is_empty() {
            return Err(LevelError::MissingGoal);
        }

        self.check_bounds("start", std::slice::from_ref(&self.start))?;
        for (group, tiles) in self.tile_groups() {
            self.check_bounds(group, tiles)?;
        }
        Ok(())
    }

    fn tile_groups(&self) -> [(&'static str, &[TilePos]); 8] {
        [
            ("flag", self.flag_locs.as_slice()),
            ("grass", self.grass_locs.as_slice()),
            ("block", self.block_locs.as_slice()),
            ("dirt", self.dirt_locs.as_slice()),
            ("gold", self.gold_locs.as_slice()),
            ("bronze", self.bronze_locs.as_slice()),
            ("spikeman", self.spikeman_locs.as_slice()),
            ("flyman", self.flyman_locs.as_slice()),
        ]
    }

    fn check_bounds(&self, group: &'static str, tiles: &[TilePos]) -> Result<(), LevelError> {
        match tiles
            .iter()
            .find(|t| t.0 < 0 || t.1 < 0 || t.0 >= self.width || t.1 >= self.height)
        {
            Some(&TilePos(x, y)) => Err(LevelError::OutOfBounds {
                group,
                x,
                y,
                width: self.width,
                height: self.height,
            }),
            None => Ok(()),
        }
    }
}

/// The ordered sequence of levels in one playthrough
#[derive(Debug, Clone)]
pub struct LevelSet {
    levels: Vec<LevelData>,
}

impl LevelSet {
    /// Build from already parsed levels, validating each
    pub fn new(levels: Vec<LevelData>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Load every file in order; the first failure aborts the whole set
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, LevelError> {
        let levels = paths
            .iter()
            .map(LevelData::load)
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} levels", levels.len());
        Self::new(levels)
    }

    /// Opening level; a constructed set always has one
    pub fn first(&self) -> &LevelData {
        &self.levels[0]
    }

    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
