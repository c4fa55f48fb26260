//! Seeded board generation.
//!
//! `BoardGenerator` owns a configuration and a xoshiro stream. Each call to
//! `generate` rewinds the stream to the generator's seed, then runs whole-board
//! attempts until one candidate passes placement, set validation and (if
//! enabled) the balance check. Rejected attempts are logged and retried;
//! only a bad config or an exhausted budget reaches the caller.
//!
//! Seed 0 derives a fresh seed once, at construction.

pub mod placement;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::board::{JumpKind, JumpSet};
use crate::config::{ConfigError, GenerationConfig};
use crate::logging::TimingSpan;
use crate::validator::{calculate_balance_ratio, is_balanced, validate_jump_set, ValidationError};

pub use placement::{PlacementFailure, PlacementRejection};

/// Why one whole-board attempt was abandoned (recovered by retrying)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttemptRejection {
    #[error(
        "placed {placed} of {requested} requested {kind}s, {required} required{}",
        describe_cause(.cause)
    )]
    Shortfall {
        kind: JumpKind,
        requested: u32,
        placed: u32,
        required: u32,
        cause: Option<PlacementFailure>,
    },
    #[error("candidate board failed validation: {0}")]
    InvalidSet(#[from] ValidationError),
    #[error("balance ratio {ratio:.3} is outside {target:.3} +/- {tolerance:.3}")]
    Unbalanced {
        ratio: f32,
        target: f32,
        tolerance: f32,
    },
}

fn describe_cause(cause: &Option<PlacementFailure>) -> String {
    match cause {
        Some(failure) => format!(" ({failure})"),
        None => String::new(),
    }
}

/// Failures surfaced to the caller
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error(
        "no valid board after {attempts} generation attempts{}",
        describe_last(.last_rejection)
    )]
    Exhausted {
        attempts: u32,
        last_rejection: Option<AttemptRejection>,
    },
}

fn describe_last(last: &Option<AttemptRejection>) -> String {
    match last {
        Some(rejection) => format!("; last rejection: {rejection}"),
        None => String::new(),
    }
}

/// An accepted board plus what is needed to reproduce it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedBoard {
    pub jumps: JumpSet,
    pub seed: u64,
    /// 1-based generation attempt that produced the board
    pub attempt: u32,
    pub balance_ratio: f32,
}

pub struct BoardGenerator {
    config: GenerationConfig,
    seed: u64,
    rng: Xoshiro256PlusPlus,
}

impl BoardGenerator {
    /// Seeded from `config.seed` (0 = fresh entropy)
    pub fn new(config: GenerationConfig) -> Self {
        let seed = config.seed;
        Self::with_seed(config, seed)
    }

    /// Seeded from `seed`, overriding `config.seed` (0 = fresh entropy)
    pub fn with_seed(config: GenerationConfig, seed: u64) -> Self {
        let seed = if seed == 0 { entropy_seed() } else { seed };
        Self {
            config,
            seed,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Effective (never zero) seed
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Switch to a new seed for subsequent calls (0 = fresh entropy)
    pub fn reseed(&mut self, seed: u64) {
        self.seed = if seed == 0 { entropy_seed() } else { seed };
        self.rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);
    }

    /// Jumps only
    pub fn generate_board(&mut self) -> Result<JumpSet, GenerationError> {
        self.generate().map(|board| board.jumps)
    }

    /// Run the attempt loop; first accepted candidate wins.
    pub fn generate(&mut self) -> Result<GeneratedBoard, GenerationError> {
        let _span = TimingSpan::new("generate_board");

        self.config.validate()?;
        self.rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);

        let attempts = self.config.max_generation_attempts;
        let mut last_rejection = None;

        for attempt in 1..=attempts {
            match self.run_attempt() {
                Ok(jumps) => {
                    let balance_ratio = calculate_balance_ratio(jumps.as_slice());
                    info!(
                        seed = self.seed,
                        attempt,
                        ladders = jumps.ladders().count(),
                        snakes = jumps.snakes().count(),
                        balance_ratio,
                        "board generated"
                    );
                    return Ok(GeneratedBoard {
                        jumps,
                        seed: self.seed,
                        attempt,
                        balance_ratio,
                    });
                }
                Err(rejection) => {
                    debug!(attempt, %rejection, "attempt abandoned");
                    last_rejection = Some(rejection);
                }
            }
        }

        warn!(seed = self.seed, attempts, "generation exhausted");
        Err(GenerationError::Exhausted {
            attempts,
            last_rejection,
        })
    }

    fn run_attempt(&mut self) -> Result<JumpSet, AttemptRejection> {
        let mut jumps = JumpSet::new();

        for kind in [JumpKind::Ladder, JumpKind::Snake] {
            let (min, max) = self.config.count_range(kind);
            let count = self.rng.gen_range(min..=max);
            placement::place_category(&mut self.rng, &self.config, kind, count, &mut jumps)?;
        }

        let config = &self.config;

        validate_jump_set(jumps.as_slice(), config.board_size)?;

        if config.balance_jumps
            && !is_balanced(
                jumps.as_slice(),
                config.balance_ratio,
                config.balance_tolerance,
            )
        {
            return Err(AttemptRejection::Unbalanced {
                ratio: calculate_balance_ratio(jumps.as_slice()),
                target: config.balance_ratio,
                tolerance: config.balance_tolerance,
            });
        }

        Ok(jumps)
    }
}

/// One-shot generation from `config` (seed taken from the config)
pub fn generate_board(config: &GenerationConfig) -> Result<GeneratedBoard, GenerationError> {
    BoardGenerator::new(config.clone()).generate()
}

/// Deterministic, non-zero child seed for stream `index` of `base`
pub fn derive_seed(base: u64, index: u64) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(index.to_le_bytes());
    digest_to_seed(&hasher.finalize())
}

fn entropy_seed() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha3_256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(COUNTER.fetch_add(1, Ordering::Relaxed).to_le_bytes());
    digest_to_seed(&hasher.finalize())
}

fn digest_to_seed(digest: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes).max(1)
}
