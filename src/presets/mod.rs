//! Difficulty presets
//!
//! A preset overrides the count, length, balance-target and spacing fields of
//! a `GenerationConfig` right before generation. Board dimensions, attempt
//! budgets and the seed are never touched.
//!
//! Tiers (Easy -> Extreme) shift monotonically toward fewer, shorter ladders,
//! more and longer snakes, and a lower target balance ratio.

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    Extreme,
    Custom, // leaves the caller's config untouched
}

impl DifficultyTier {
    pub fn all() -> &'static [DifficultyTier] {
        &[
            Self::Easy,
            Self::Medium,
            Self::Hard,
            Self::Extreme,
            Self::Custom,
        ]
    }

    /// Built-in tiers only (excludes Custom)
    pub fn built_in() -> &'static [DifficultyTier] {
        &[Self::Easy, Self::Medium, Self::Hard, Self::Extreme]
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::Easy),
            1 => Some(Self::Medium),
            2 => Some(Self::Hard),
            3 => Some(Self::Extreme),
            4 => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Extreme => "Extreme",
            Self::Custom => "Custom",
        }
    }

    /// Override bundle for this tier; `None` for Custom.
    pub fn preset(&self) -> Option<DifficultyPreset> {
        let preset = match self {
            Self::Easy => DifficultyPreset {
                name: "Easy".into(),
                description: "Plenty of long ladders, a few short snakes.".into(),
                min_ladders: 6,
                max_ladders: 8,
                min_ladder_length: 10,
                max_ladder_length: 30,
                min_snakes: 3,
                max_snakes: 4,
                min_snake_length: 5,
                max_snake_length: 15,
                balance_ratio: 2.0,
                min_distance_between_jumps: 3,
            },
            Self::Medium => DifficultyPreset {
                name: "Medium".into(),
                description: "Ladders and snakes roughly even.".into(),
                min_ladders: 5,
                max_ladders: 7,
                min_ladder_length: 8,
                max_ladder_length: 25,
                min_snakes: 5,
                max_snakes: 6,
                min_snake_length: 8,
                max_snake_length: 25,
                balance_ratio: 1.2,
                min_distance_between_jumps: 2,
            },
            Self::Hard => DifficultyPreset {
                name: "Hard".into(),
                description: "Snakes outnumber ladders and bite deeper.".into(),
                min_ladders: 4,
                max_ladders: 5,
                min_ladder_length: 5,
                max_ladder_length: 20,
                min_snakes: 7,
                max_snakes: 8,
                min_snake_length: 10,
                max_snake_length: 35,
                balance_ratio: 0.8,
                min_distance_between_jumps: 2,
            },
            Self::Extreme => DifficultyPreset {
                name: "Extreme".into(),
                description: "A handful of short ladders among long, numerous snakes.".into(),
                min_ladders: 2,
                max_ladders: 3,
                min_ladder_length: 5,
                max_ladder_length: 12,
                min_snakes: 9,
                max_snakes: 11,
                min_snake_length: 20,
                max_snake_length: 45,
                balance_ratio: 0.5,
                min_distance_between_jumps: 1,
            },
            Self::Custom => return None,
        };
        Some(preset)
    }

    /// Apply this tier's preset onto `config` (no-op for Custom)
    pub fn apply(&self, config: &mut GenerationConfig) {
        if let Some(preset) = self.preset() {
            preset.apply(config);
        }
    }
}

/// Named override bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub name: String,
    pub description: String,
    pub min_ladders: u32,
    pub max_ladders: u32,
    pub min_ladder_length: u32,
    pub max_ladder_length: u32,
    pub min_snakes: u32,
    pub max_snakes: u32,
    pub min_snake_length: u32,
    pub max_snake_length: u32,
    pub balance_ratio: f32,
    pub min_distance_between_jumps: u32,
}

impl DifficultyPreset {
    /// Copy this preset's fields onto `config`
    pub fn apply(&self, config: &mut GenerationConfig) {
        config.min_ladders = self.min_ladders;
        config.max_ladders = self.max_ladders;
        config.min_ladder_length = self.min_ladder_length;
        config.max_ladder_length = self.max_ladder_length;
        config.min_snakes = self.min_snakes;
        config.max_snakes = self.max_snakes;
        config.min_snake_length = self.min_snake_length;
        config.max_snake_length = self.max_snake_length;
        config.balance_ratio = self.balance_ratio;
        config.min_distance_between_jumps = self.min_distance_between_jumps;
    }

    /// Load an externally authored preset
    pub fn from_ron_str(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

/// Presets for every built-in tier, in Easy -> Extreme order
pub fn built_in_presets() -> Vec<DifficultyPreset> {
    DifficultyTier::built_in()
        .iter()
        .filter_map(|t| t.preset())
        .collect()
}
