//! Jump placement: one category at a time, one jump at a time.
//!
//! Each single placement draws a start tile, then a length, and retries up to
//! `max_placement_attempts` times. A jump that never fits is skipped; the
//! category only fails if fewer than its configured minimum were placed.

use rand::Rng;
use tracing::{debug, trace};

use super::AttemptRejection;
use crate::board::{Jump, JumpKind, JumpSet};
use crate::config::GenerationConfig;
use crate::validator::{can_place_jump_at, is_tile_blocked, validate_jump, ValidationError};

/// Why one placement try was thrown away
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementRejection {
    #[error("no placement attempts budgeted")]
    NoBudget,
    #[error("start tile {0} is blocked, occupied or too close to another jump")]
    StartUnavailable(u32),
    #[error("target {to} from {from} is off the board")]
    TargetOutOfBounds { from: u32, to: u32 },
    #[error("invalid jump: {0}")]
    InvalidJump(#[from] ValidationError),
    #[error("target tile {0} is blocked")]
    TargetBlocked(u32),
    #[error("target tile {0} is an endpoint of another jump")]
    TargetOccupied(u32),
}

/// A single jump that could not be placed within its attempt budget
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not place a {kind} after {attempts} attempts (last: {last})")]
pub struct PlacementFailure {
    pub kind: JumpKind,
    pub attempts: u32,
    pub last: PlacementRejection,
}

/// Try to add `count` jumps of `kind` to `jumps`.
///
/// Returns how many were placed, or a shortfall if that is below the
/// category minimum.
pub(crate) fn place_category<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GenerationConfig,
    kind: JumpKind,
    count: u32,
    jumps: &mut JumpSet,
) -> Result<u32, AttemptRejection> {
    let (required, _) = config.count_range(kind);
    let mut placed = 0;
    let mut cause = None;

    for _ in 0..count {
        match place_single_jump(rng, config, kind, jumps.as_slice()) {
            Ok(jump) => {
                jumps.push(jump);
                placed += 1;
            }
            Err(failure) => {
                trace!(%failure, "placement skipped");
                cause = Some(failure);
            }
        }
    }

    if placed < required {
        return Err(AttemptRejection::Shortfall {
            kind,
            requested: count,
            placed,
            required,
            cause,
        });
    }

    debug!(%kind, requested = count, placed, "category placed");
    Ok(placed)
}

/// Place one jump of `kind` against `existing`, retrying on rejection.
pub(crate) fn place_single_jump<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GenerationConfig,
    kind: JumpKind,
    existing: &[Jump],
) -> Result<Jump, PlacementFailure> {
    let mut last = PlacementRejection::NoBudget;
    for _ in 0..config.max_placement_attempts {
        match try_place(rng, config, kind, existing) {
            Ok(jump) => return Ok(jump),
            Err(rejection) => last = rejection,
        }
    }

    Err(PlacementFailure {
        kind,
        attempts: config.max_placement_attempts,
        last,
    })
}

fn try_place<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GenerationConfig,
    kind: JumpKind,
    existing: &[Jump],
) -> Result<Jump, PlacementRejection> {
    let from = rng.gen_range(config.min_start_tile..=config.max_start_tile);
    if !can_place_jump_at(
        from,
        existing,
        &config.blocked_tiles,
        config.min_distance_between_jumps,
    ) {
        return Err(PlacementRejection::StartUnavailable(from));
    }

    let (min_length, max_length) = config.length_range(kind);
    let length = rng.gen_range(min_length..=max_length);
    let to = match kind {
        JumpKind::Ladder => from.saturating_add(length).min(config.board_size),
        JumpKind::Snake => from.saturating_sub(length).max(1),
    };
    if !(1..=config.board_size).contains(&to) {
        return Err(PlacementRejection::TargetOutOfBounds { from, to });
    }

    let jump = Jump::new(from, to, kind);
    validate_jump(&jump, config.board_size)?;

    if is_tile_blocked(to, &config.blocked_tiles) {
        return Err(PlacementRejection::TargetBlocked(to));
    }
    if existing.iter().any(|j| j.touches(to)) {
        return Err(PlacementRejection::TargetOccupied(to));
    }

    Ok(jump)
}
