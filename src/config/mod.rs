//! Generation configuration and its pre-check.
//!
//! A `GenerationConfig` is a plain serde value. Files can be RON or JSON;
//! missing fields fall back to `Default`. `validate` runs before any random
//! draw so a bad config never perturbs a seeded stream.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::board::JumpKind;
use crate::constants::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board size must be positive")]
    ZeroBoardSize,
    #[error("columns must be positive")]
    ZeroColumns,
    #[error("board size {board_size} is not divisible by {columns} columns")]
    RaggedBoard { board_size: u32, columns: u32 },
    #[error("{kind} count range is inverted: min {min} > max {max}")]
    InvertedCountRange { kind: JumpKind, min: u32, max: u32 },
    #[error("{kind} lengths must be positive")]
    ZeroLength { kind: JumpKind },
    #[error("{kind} length range is inverted: min {min} > max {max}")]
    InvertedLengthRange { kind: JumpKind, min: u32, max: u32 },
    #[error("start tile range {min}..={max} is not within 1..={board_size}")]
    StartRangeOutOfBounds { min: u32, max: u32, board_size: u32 },
    #[error("balance tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f32),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parameter bundle for one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    // Board shape
    pub board_size: u32,
    pub columns: u32,

    // Ladders
    pub min_ladders: u32,
    pub max_ladders: u32,
    pub min_ladder_length: u32,
    pub max_ladder_length: u32,

    // Snakes
    pub min_snakes: u32,
    pub max_snakes: u32,
    pub min_snake_length: u32,
    pub max_snake_length: u32,

    // Placement rules
    pub blocked_tiles: BTreeSet<u32>,
    pub min_distance_between_jumps: u32,
    pub min_start_tile: u32,
    pub max_start_tile: u32,

    // Balance
    pub balance_jumps: bool,
    pub balance_ratio: f32,
    pub balance_tolerance: f32,

    // Limits (seed 0 = fresh entropy per generator)
    pub seed: u64,
    pub max_generation_attempts: u32,
    pub max_placement_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            columns: DEFAULT_COLUMNS,
            min_ladders: DEFAULT_MIN_LADDERS,
            max_ladders: DEFAULT_MAX_LADDERS,
            min_ladder_length: DEFAULT_MIN_LADDER_LENGTH,
            max_ladder_length: DEFAULT_MAX_LADDER_LENGTH,
            min_snakes: DEFAULT_MIN_SNAKES,
            max_snakes: DEFAULT_MAX_SNAKES,
            min_snake_length: DEFAULT_MIN_SNAKE_LENGTH,
            max_snake_length: DEFAULT_MAX_SNAKE_LENGTH,
            blocked_tiles: BTreeSet::from([1, DEFAULT_BOARD_SIZE]),
            min_distance_between_jumps: DEFAULT_MIN_DISTANCE_BETWEEN_JUMPS,
            min_start_tile: 2,
            max_start_tile: DEFAULT_BOARD_SIZE - 1,
            balance_jumps: false,
            balance_ratio: DEFAULT_BALANCE_RATIO,
            balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
            seed: 0,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl GenerationConfig {
    /// Defaults resized to `board_size`: first and last tiles blocked,
    /// starts drawn from the tiles in between.
    pub fn for_board(board_size: u32, columns: u32) -> Self {
        Self {
            board_size,
            columns,
            blocked_tiles: BTreeSet::from([1, board_size]),
            min_start_tile: 2.min(board_size),
            max_start_tile: board_size.saturating_sub(1).max(1),
            ..Self::default()
        }
    }

    /// Count range for a category
    pub fn count_range(&self, kind: JumpKind) -> (u32, u32) {
        match kind {
            JumpKind::Ladder => (self.min_ladders, self.max_ladders),
            JumpKind::Snake => (self.min_snakes, self.max_snakes),
        }
    }

    /// Length range for a category
    pub fn length_range(&self, kind: JumpKind) -> (u32, u32) {
        match kind {
            JumpKind::Ladder => (self.min_ladder_length, self.max_ladder_length),
            JumpKind::Snake => (self.min_snake_length, self.max_snake_length),
        }
    }

    /// Structural pre-check; generation refuses to start on failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::ZeroBoardSize);
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.board_size % self.columns != 0 {
            return Err(ConfigError::RaggedBoard {
                board_size: self.board_size,
                columns: self.columns,
            });
        }

        for kind in [JumpKind::Ladder, JumpKind::Snake] {
            let (min, max) = self.count_range(kind);
            if min > max {
                return Err(ConfigError::InvertedCountRange { kind, min, max });
            }

            let (min, max) = self.length_range(kind);
            if min == 0 || max == 0 {
                return Err(ConfigError::ZeroLength { kind });
            }
            if min > max {
                return Err(ConfigError::InvertedLengthRange { kind, min, max });
            }
        }

        let start_ok = self.min_start_tile >= 1
            && self.max_start_tile <= self.board_size
            && self.min_start_tile <= self.max_start_tile;
        if !start_ok {
            return Err(ConfigError::StartRangeOutOfBounds {
                min: self.min_start_tile,
                max: self.max_start_tile,
                board_size: self.board_size,
            });
        }

        if !(self.balance_tolerance >= 0.0 && self.balance_tolerance.is_finite()) {
            return Err(ConfigError::InvalidTolerance(self.balance_tolerance));
        }

        Ok(())
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.ron` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::from_ron_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
