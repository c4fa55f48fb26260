//! Structural legality of jumps and jump sets, plus the balance ratio.
//!
//! Everything here is a pure function over borrowed data, so concurrent
//! generators can share it freely.

use std::collections::{BTreeSet, HashSet};

use crate::board::{Jump, JumpKind};
use crate::constants::{BALANCE_EPSILON, BALANCE_RATIO_NEUTRAL, BALANCE_RATIO_SENTINEL};

/// Why a jump or jump set was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("jump {from}->{to} leaves the board (tiles 1..={board_size})")]
    OutOfBounds { from: u32, to: u32, board_size: u32 },
    #[error("jump starts and ends on tile {0}")]
    SameTile(u32),
    #[error("ladder {from}->{to} does not advance")]
    LadderNotAscending { from: u32, to: u32 },
    #[error("snake {from}->{to} does not retreat")]
    SnakeNotDescending { from: u32, to: u32 },
    #[error("two jumps start on tile {0}")]
    DuplicateStart(u32),
    #[error("jump {from}->{to} lands on the start of another jump")]
    ChainedJump { from: u32, to: u32 },
}

/// Check one jump against board bounds and its own direction flag
pub fn validate_jump(jump: &Jump, board_size: u32) -> Result<(), ValidationError> {
    let in_bounds = |tile: u32| (1..=board_size).contains(&tile);
    if !in_bounds(jump.from) || !in_bounds(jump.to) {
        return Err(ValidationError::OutOfBounds {
            from: jump.from,
            to: jump.to,
            board_size,
        });
    }

    if jump.from == jump.to {
        return Err(ValidationError::SameTile(jump.from));
    }

    match jump.kind() {
        JumpKind::Ladder if jump.to <= jump.from => Err(ValidationError::LadderNotAscending {
            from: jump.from,
            to: jump.to,
        }),
        JumpKind::Snake if jump.to >= jump.from => Err(ValidationError::SnakeNotDescending {
            from: jump.from,
            to: jump.to,
        }),
        _ => Ok(()),
    }
}

/// Check every jump individually, then the cross-jump rules:
/// unique start tiles and no jump landing on another jump's start.
pub fn validate_jump_set(jumps: &[Jump], board_size: u32) -> Result<(), ValidationError> {
    for jump in jumps {
        validate_jump(jump, board_size)?;
    }

    let mut starts = HashSet::with_capacity(jumps.len());
    for jump in jumps {
        if !starts.insert(jump.from) {
            return Err(ValidationError::DuplicateStart(jump.from));
        }
    }

    // from != to for every jump at this point, so membership means "another" jump
    if let Some(chained) = jumps.iter().find(|j| starts.contains(&j.to)) {
        return Err(ValidationError::ChainedJump {
            from: chained.from,
            to: chained.to,
        });
    }

    Ok(())
}

pub fn is_tile_blocked(tile: u32, blocked_tiles: &BTreeSet<u32>) -> bool {
    blocked_tiles.contains(&tile)
}

/// Single gate for incremental placement of a new jump starting at `tile`.
///
/// Rejects blocked tiles, tiles already used as either endpoint of an existing
/// jump, and tiles closer than `min_distance` to an existing jump's start.
pub fn can_place_jump_at(
    tile: u32,
    existing: &[Jump],
    blocked_tiles: &BTreeSet<u32>,
    min_distance: u32,
) -> bool {
    if is_tile_blocked(tile, blocked_tiles) {
        return false;
    }

    existing
        .iter()
        .all(|j| !j.touches(tile) && j.from.abs_diff(tile) >= min_distance)
}

/// Total ladder advancement divided by total snake setback.
///
/// No snakes: `BALANCE_RATIO_SENTINEL` if any ladder advances, otherwise the
/// neutral `1.0`.
pub fn calculate_balance_ratio(jumps: &[Jump]) -> f32 {
    let (mut advance, mut setback) = (0u64, 0u64);
    for jump in jumps {
        if jump.is_ladder {
            advance += u64::from(jump.length());
        } else {
            setback += u64::from(jump.length());
        }
    }

    if setback == 0 {
        return if advance > 0 {
            BALANCE_RATIO_SENTINEL
        } else {
            BALANCE_RATIO_NEUTRAL
        };
    }

    advance as f32 / setback as f32
}

/// Inclusive on both ends: a ratio exactly `tolerance` away from the target
/// is balanced.
pub fn is_balanced(jumps: &[Jump], target_ratio: f32, tolerance: f32) -> bool {
    (calculate_balance_ratio(jumps) - target_ratio).abs() <= tolerance + BALANCE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_BALANCE_TOLERANCE;

    fn blocked(tiles: &[u32]) -> BTreeSet<u32> {
        tiles.iter().copied().collect()
    }

    #[test]
    fn test_valid_ladder_and_snake() {
        assert!(validate_jump(&Jump::ladder(2, 40), 100).is_ok());
        assert!(validate_jump(&Jump::snake(99, 1), 100).is_ok());
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(matches!(
            validate_jump(&Jump::ladder(0, 10), 100),
            Err(ValidationError::OutOfBounds { .. })
        ));
        assert!(matches!(
            validate_jump(&Jump::ladder(90, 101), 100),
            Err(ValidationError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_same_tile() {
        assert_eq!(
            validate_jump(&Jump::ladder(50, 50), 100),
            Err(ValidationError::SameTile(50))
        );
    }

    #[test]
    fn test_direction_must_match_flag() {
        assert_eq!(
            validate_jump(&Jump::ladder(50, 20), 100),
            Err(ValidationError::LadderNotAscending { from: 50, to: 20 })
        );
        assert_eq!(
            validate_jump(&Jump::snake(20, 50), 100),
            Err(ValidationError::SnakeNotDescending { from: 20, to: 50 })
        );
    }

    #[test]
    fn test_set_duplicate_start() {
        let jumps = vec![Jump::ladder(10, 30), Jump::snake(10, 3)];
        assert_eq!(
            validate_jump_set(&jumps, 100),
            Err(ValidationError::DuplicateStart(10))
        );
    }

    #[test]
    fn test_set_chained_jump() {
        // ladder lands on the snake's mouth
        let jumps = vec![Jump::ladder(10, 30), Jump::snake(30, 5)];
        assert_eq!(
            validate_jump_set(&jumps, 100),
            Err(ValidationError::ChainedJump { from: 10, to: 30 })
        );
    }

    #[test]
    fn test_set_shared_destination_is_allowed() {
        let jumps = vec![Jump::ladder(10, 30), Jump::snake(50, 30)];
        assert!(validate_jump_set(&jumps, 100).is_ok());
    }

    #[test]
    fn test_set_reports_individual_failure() {
        let jumps = vec![Jump::ladder(10, 30), Jump::snake(5, 8)];
        assert!(matches!(
            validate_jump_set(&jumps, 100),
            Err(ValidationError::SnakeNotDescending { .. })
        ));
    }

    #[test]
    fn test_empty_set_is_valid() {
        assert!(validate_jump_set(&[], 100).is_ok());
    }

    #[test]
    fn test_tile_blocked() {
        let set = blocked(&[1, 100]);
        assert!(is_tile_blocked(1, &set));
        assert!(is_tile_blocked(100, &set));
        assert!(!is_tile_blocked(50, &set));
    }

    #[test]
    fn test_can_place_rejects_blocked_and_occupied() {
        let existing = vec![Jump::ladder(10, 30)];
        let set = blocked(&[1, 100]);
        assert!(!can_place_jump_at(1, &existing, &set, 0));
        assert!(!can_place_jump_at(10, &existing, &set, 0));
        assert!(!can_place_jump_at(30, &existing, &set, 0));
        assert!(can_place_jump_at(50, &existing, &set, 0));
    }

    #[test]
    fn test_can_place_respects_min_distance() {
        let existing = vec![Jump::ladder(10, 30)];
        let set = BTreeSet::new();
        assert!(!can_place_jump_at(12, &existing, &set, 3));
        assert!(can_place_jump_at(13, &existing, &set, 3));
        assert!(!can_place_jump_at(8, &existing, &set, 3));
        // distance is measured from starts only
        assert!(can_place_jump_at(31, &existing, &set, 3));
    }

    #[test]
    fn test_balance_ratio_empty_is_neutral() {
        assert_eq!(calculate_balance_ratio(&[]), 1.0);
    }

    #[test]
    fn test_balance_ratio_only_ladders_is_sentinel() {
        let ratio = calculate_balance_ratio(&[Jump::ladder(2, 22)]);
        assert_eq!(ratio, BALANCE_RATIO_SENTINEL);
        assert!(ratio.is_finite());
    }

    #[test]
    fn test_balance_ratio_only_snakes_is_zero() {
        assert_eq!(calculate_balance_ratio(&[Jump::snake(40, 20)]), 0.0);
    }

    #[test]
    fn test_balance_ratio_mixed() {
        let jumps = vec![Jump::ladder(2, 32), Jump::snake(60, 40)];
        assert!((calculate_balance_ratio(&jumps) - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_is_balanced_tolerance() {
        let jumps = vec![Jump::ladder(2, 32), Jump::snake(60, 40)]; // 1.5
        assert!(is_balanced(&jumps, 1.2, DEFAULT_BALANCE_TOLERANCE));
        assert!(!is_balanced(&jumps, 1.0, DEFAULT_BALANCE_TOLERANCE));
        assert!(is_balanced(&jumps, 1.5, 0.0));
    }

    #[test]
    fn test_is_balanced_at_lower_boundary() {
        // advance 9, setback 10 -> 0.9, exactly 0.3 below the target
        let jumps = vec![Jump::ladder(2, 11), Jump::snake(40, 30)];
        assert!((calculate_balance_ratio(&jumps) - 0.9).abs() < f32::EPSILON);
        assert!(is_balanced(&jumps, 1.2, 0.3));
        assert!(!is_balanced(&jumps, 1.2, 0.29));
    }
}
