//! Monte-Carlo Difficulty Analysis
//!
//! Generates many boards from one configuration (seeds derived from a base
//! seed), plays each one out with a simulated die, and aggregates how
//! generous or punishing the configuration is. Uses rayon to spread runs
//! across CPU cores; results are deterministic for a fixed base seed.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::JumpSet;
use crate::config::{ConfigError, GenerationConfig};
use crate::constants::{
    BALANCE_RATIO_NEUTRAL, BALANCE_RATIO_SENTINEL, DEFAULT_MAX_PLAYOUT_TURNS, DIE_FACES,
};
use crate::generation::{derive_seed, BoardGenerator};
use crate::presets::DifficultyTier;
use crate::validator::calculate_balance_ratio;

/// Stream index reserved for playout dice (board seeds use 0..runs)
const PLAYOUT_STREAM: u64 = u64::MAX;

/// Configuration for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub runs: u32,
    pub base_seed: u64,
    pub playouts_per_board: u32,
    pub max_playout_turns: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            runs: 200,
            base_seed: 42,
            playouts_per_board: 20,
            max_playout_turns: DEFAULT_MAX_PLAYOUT_TURNS,
        }
    }
}

/// Overall feel of a configuration, from pooled advancement / setback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyGrade {
    Relaxed, // ratio >= 1.5
    Fair,    // ratio >= 0.9
    Tense,   // ratio >= 0.6
    Brutal,  // ratio < 0.6
}

impl DifficultyGrade {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio >= 1.5 {
            Self::Relaxed
        } else if ratio >= 0.9 {
            Self::Fair
        } else if ratio >= 0.6 {
            Self::Tense
        } else {
            Self::Brutal
        }
    }
}

/// Aggregated results of an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyReport {
    pub runs: u32,
    pub successes: u32,
    pub success_rate: f32,
    /// Total advancement / total setback over all accepted boards
    pub pooled_ratio: f32,
    pub min_ratio: f32,
    pub max_ratio: f32,
    pub mean_ladders: f32,
    pub mean_snakes: f32,
    pub mean_advancement: f32,
    pub mean_setback: f32,
    pub mean_turns: f32,
    pub unfinished_playouts: u32,
    pub grade: DifficultyGrade,
}

/// Per-board sample (one successful run)
#[derive(Debug, Clone)]
struct BoardSample {
    ladders: u32,
    snakes: u32,
    advancement: u32,
    setback: u32,
    ratio: f32,
    finished_turns: Vec<u32>,
    unfinished: u32,
}

/// Move one token from off-board (tile 0) to the last tile with a d6.
///
/// Rolls that overshoot the last tile are wasted; landing on a jump's start
/// follows it. Returns turns taken, or `None` if `max_turns` runs out.
pub fn simulate_playout<R: Rng + ?Sized>(
    jumps: &JumpSet,
    board_size: u32,
    rng: &mut R,
    max_turns: u32,
) -> Option<u32> {
    let mut position = 0u32;
    for turn in 1..=max_turns {
        let roll = rng.gen_range(1..=DIE_FACES);
        if position + roll <= board_size {
            position += roll;
            if let Some(jump) = jumps.jump_from(position) {
                position = jump.to;
            }
        }
        if position == board_size {
            return Some(turn);
        }
    }
    None
}

/// Run the analysis for one configuration
pub fn analyze_config(
    config: &GenerationConfig,
    analysis: &AnalysisConfig,
) -> Result<DifficultyReport, ConfigError> {
    config.validate()?;

    let samples: Vec<Option<BoardSample>> = (0..analysis.runs)
        .into_par_iter()
        .map(|run| {
            let seed = derive_seed(analysis.base_seed, u64::from(run));
            sample_board(config, seed, analysis)
        })
        .collect();

    let report = aggregate(&samples, analysis.runs);
    info!(
        runs = report.runs,
        successes = report.successes,
        pooled_ratio = report.pooled_ratio,
        mean_turns = report.mean_turns,
        grade = ?report.grade,
        "difficulty analysis complete"
    );
    Ok(report)
}

/// Apply each built-in tier to `base` and analyze it
pub fn compare_tiers(
    base: &GenerationConfig,
    analysis: &AnalysisConfig,
) -> Result<Vec<(DifficultyTier, DifficultyReport)>, ConfigError> {
    DifficultyTier::built_in()
        .iter()
        .map(|tier| {
            let mut config = base.clone();
            tier.apply(&mut config);
            analyze_config(&config, analysis).map(|report| (*tier, report))
        })
        .collect()
}

fn sample_board(
    config: &GenerationConfig,
    seed: u64,
    analysis: &AnalysisConfig,
) -> Option<BoardSample> {
    let mut generator = BoardGenerator::with_seed(config.clone(), seed);
    let jumps = generator.generate_board().ok()?;

    let mut dice = Xoshiro256PlusPlus::seed_from_u64(derive_seed(seed, PLAYOUT_STREAM));
    let mut finished_turns = Vec::with_capacity(analysis.playouts_per_board as usize);
    let mut unfinished = 0;
    for _ in 0..analysis.playouts_per_board {
        match simulate_playout(
            &jumps,
            config.board_size,
            &mut dice,
            analysis.max_playout_turns,
        ) {
            Some(turns) => finished_turns.push(turns),
            None => unfinished += 1,
        }
    }

    Some(BoardSample {
        ladders: jumps.ladders().count() as u32,
        snakes: jumps.snakes().count() as u32,
        advancement: jumps.total_advancement(),
        setback: jumps.total_setback(),
        ratio: calculate_balance_ratio(jumps.as_slice()),
        finished_turns,
        unfinished,
    })
}

fn aggregate(samples: &[Option<BoardSample>], runs: u32) -> DifficultyReport {
    let accepted: Vec<&BoardSample> = samples.iter().flatten().collect();
    let successes = accepted.len() as u32;

    if accepted.is_empty() {
        return DifficultyReport {
            runs,
            successes: 0,
            success_rate: 0.0,
            pooled_ratio: BALANCE_RATIO_NEUTRAL,
            min_ratio: 0.0,
            max_ratio: 0.0,
            mean_ladders: 0.0,
            mean_snakes: 0.0,
            mean_advancement: 0.0,
            mean_setback: 0.0,
            mean_turns: 0.0,
            unfinished_playouts: 0,
            grade: DifficultyGrade::Fair,
        };
    }

    let n = accepted.len() as f32;
    let mean = |f: fn(&BoardSample) -> u32| accepted.iter().map(|s| f(s) as f32).sum::<f32>() / n;

    let total_advancement: u64 = accepted.iter().map(|s| u64::from(s.advancement)).sum();
    let total_setback: u64 = accepted.iter().map(|s| u64::from(s.setback)).sum();
    let pooled_ratio = match (total_advancement, total_setback) {
        (0, 0) => BALANCE_RATIO_NEUTRAL,
        (_, 0) => BALANCE_RATIO_SENTINEL,
        (a, s) => a as f32 / s as f32,
    };

    let min_ratio = accepted.iter().map(|s| s.ratio).fold(f32::MAX, f32::min);
    let max_ratio = accepted.iter().map(|s| s.ratio).fold(f32::MIN, f32::max);

    let turns: Vec<u32> = accepted
        .iter()
        .flat_map(|s| s.finished_turns.iter().copied())
        .collect();
    let mean_turns = if turns.is_empty() {
        0.0
    } else {
        turns.iter().map(|&t| t as f32).sum::<f32>() / turns.len() as f32
    };

    DifficultyReport {
        runs,
        successes,
        success_rate: successes as f32 / runs.max(1) as f32,
        pooled_ratio,
        min_ratio,
        max_ratio,
        mean_ladders: mean(|s| s.ladders),
        mean_snakes: mean(|s| s.snakes),
        mean_advancement: mean(|s| s.advancement),
        mean_setback: mean(|s| s.setback),
        mean_turns,
        unfinished_playouts: accepted.iter().map(|s| s.unfinished).sum(),
        grade: DifficultyGrade::from_ratio(pooled_ratio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Jump;

    fn small_analysis() -> AnalysisConfig {
        AnalysisConfig {
            runs: 40,
            playouts_per_board: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_playout_without_jumps_finishes() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let turns = simulate_playout(&JumpSet::new(), 100, &mut rng, 1_000).unwrap();
        // at most 6 per roll, so at least 17 turns
        assert!(turns >= 17);
    }

    #[test]
    fn test_playout_follows_ladder_to_finish() {
        // every first roll lands on a ladder to the last tile
        let jumps = JumpSet::from(
            (1..=6)
                .map(|tile| Jump::ladder(tile, 100))
                .collect::<Vec<_>>(),
        );
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        assert_eq!(simulate_playout(&jumps, 100, &mut rng, 10), Some(1));
    }

    #[test]
    fn test_playout_turn_cap() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        assert_eq!(simulate_playout(&JumpSet::new(), 100, &mut rng, 3), None);
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(DifficultyGrade::from_ratio(2.0), DifficultyGrade::Relaxed);
        assert_eq!(DifficultyGrade::from_ratio(1.0), DifficultyGrade::Fair);
        assert_eq!(DifficultyGrade::from_ratio(0.7), DifficultyGrade::Tense);
        assert_eq!(DifficultyGrade::from_ratio(0.2), DifficultyGrade::Brutal);
    }

    #[test]
    fn test_analysis_small() {
        let report = analyze_config(&GenerationConfig::default(), &small_analysis()).unwrap();
        assert_eq!(report.runs, 40);
        assert!(report.successes > 0);
        assert!(report.max_ratio >= report.min_ratio);
        assert!(report.mean_ladders >= 4.0);
        assert!(report.mean_turns > 0.0);
    }

    #[test]
    fn test_deterministic_results() {
        let config = GenerationConfig::default();
        let r1 = analyze_config(&config, &small_analysis()).unwrap();
        let r2 = analyze_config(&config, &small_analysis()).unwrap();
        assert_eq!(r1.successes, r2.successes);
        assert_eq!(r1.pooled_ratio, r2.pooled_ratio);
        assert_eq!(r1.mean_turns, r2.mean_turns);
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let config = GenerationConfig {
            columns: 0,
            ..Default::default()
        };
        assert!(matches!(
            analyze_config(&config, &small_analysis()),
            Err(ConfigError::ZeroColumns)
        ));
    }

    #[test]
    fn test_unplaceable_config_reports_zero_successes() {
        let config = GenerationConfig {
            min_start_tile: 5,
            max_start_tile: 5,
            min_ladders: 2,
            max_ladders: 2,
            max_generation_attempts: 3,
            ..Default::default()
        };
        let report = analyze_config(&config, &small_analysis()).unwrap();
        assert_eq!(report.successes, 0);
        assert_eq!(report.success_rate, 0.0);
    }

    #[test]
    fn test_harder_tiers_have_lower_pooled_ratio() {
        let reports = compare_tiers(&GenerationConfig::default(), &small_analysis()).unwrap();
        assert_eq!(reports.len(), 4);
        let easy = &reports[0].1;
        let extreme = &reports[3].1;
        assert!(easy.pooled_ratio > extreme.pooled_ratio);
        assert_eq!(extreme.grade, DifficultyGrade::Brutal);
    }

    #[test]
    fn test_report_serialization() {
        let report = analyze_config(&GenerationConfig::default(), &small_analysis()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let restored: DifficultyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.runs, report.runs);
    }
}
