//! Snakes & Ladders - Procedural Core Library
//!
//! Deterministic board generation for Snakes & Ladders:
//! - Jump data model (ladders advance, snakes retreat)
//! - Structural validation and balance ratio
//! - Seeded generator with per-jump and whole-board retry budgets
//! - Difficulty presets (Easy -> Extreme, Custom)
//! - Monte-Carlo difficulty analysis
//! - FFI bridge for engine integration
//!
//! Rendering, animation and networking belong to the host; it consumes the
//! finished `JumpSet`.

pub mod balance;
pub mod board;
pub mod bridge;
pub mod config;
pub mod constants;
pub mod generation;
pub mod logging;
pub mod presets;
pub mod validator;

pub use board::{Jump, JumpKind, JumpSet};
pub use config::{ConfigError, GenerationConfig};
pub use generation::{generate_board, BoardGenerator, GeneratedBoard, GenerationError};
pub use presets::{DifficultyPreset, DifficultyTier};
