//! Centralized tuning constants for the board generator.
//!
//! Defaults for `GenerationConfig` and the balance sentinel live here so the
//! validator, generator and bridge agree on a single source of truth.

// =====================================================
// Board Shape
// =====================================================

/// Classic 10x10 board
pub const DEFAULT_BOARD_SIZE: u32 = 100;

pub const DEFAULT_COLUMNS: u32 = 10;

// =====================================================
// Jump Counts & Lengths
// =====================================================

pub const DEFAULT_MIN_LADDERS: u32 = 4;
pub const DEFAULT_MAX_LADDERS: u32 = 8;
pub const DEFAULT_MIN_LADDER_LENGTH: u32 = 5;
pub const DEFAULT_MAX_LADDER_LENGTH: u32 = 30;

pub const DEFAULT_MIN_SNAKES: u32 = 4;
pub const DEFAULT_MAX_SNAKES: u32 = 8;
pub const DEFAULT_MIN_SNAKE_LENGTH: u32 = 5;
pub const DEFAULT_MAX_SNAKE_LENGTH: u32 = 30;

/// Minimum |a - b| between the start tiles of any two jumps
pub const DEFAULT_MIN_DISTANCE_BETWEEN_JUMPS: u32 = 2;

// =====================================================
// Balance
// =====================================================

/// Neutral target: ladders advance as far as snakes set back
pub const DEFAULT_BALANCE_RATIO: f32 = 1.0;

/// Allowed |ratio - target| for a board to count as balanced
pub const DEFAULT_BALANCE_TOLERANCE: f32 = 0.3;

/// Slack added to the tolerance so `|ratio - target| <= tolerance` stays
/// inclusive under f32 rounding (1.2 - 0.9 rounds above 0.3)
pub const BALANCE_EPSILON: f32 = f32::EPSILON * 4.0;

/// Ratio reported when a board has ladders but no snakes (no division by zero)
pub const BALANCE_RATIO_SENTINEL: f32 = 999.0;

/// Ratio reported when a board has neither ladder advancement nor snake setback
pub const BALANCE_RATIO_NEUTRAL: f32 = 1.0;

// =====================================================
// Generation Limits
// =====================================================

/// Whole-board retries before giving up
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 100;

/// Per-jump retries before a single placement is skipped
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 50;

// =====================================================
// Playout Simulation
// =====================================================

pub const DIE_FACES: u32 = 6;

/// Turn cap for a single simulated playout
pub const DEFAULT_MAX_PLAYOUT_TURNS: u32 = 1_000;
