//! Command-line board generator.
//!
//!   snakes-gen [--config board.ron] [--tier extreme] [--seed 42] [--analyze 500]
//!
//! A flag given without a valid value is an error. Prints the generated board (or the difficulty report with `--analyze`) as
//! JSON on stdout.

use anyhow::{bail, Context, Result};

use snakes_core::balance::{self, AnalysisConfig};
use snakes_core::logging;
use snakes_core::{BoardGenerator, DifficultyTier, GenerationConfig};

fn main() -> Result<()> {
    logging::init_tracing_default();

    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config")? {
        Some(path) => GenerationConfig::load(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => GenerationConfig::default(),
    };

    if let Some(name) = parse_str_arg(&args, "--tier")? {
        let Some(tier) = DifficultyTier::from_name(&name) else {
            bail!("unknown difficulty tier: {name}");
        };
        tier.apply(&mut config);
    }

    if let Some(seed) = parse_arg(&args, "--seed")? {
        config.seed = seed;
    }

    if let Some(runs) = parse_arg(&args, "--analyze")? {
        let analysis = AnalysisConfig {
            runs: u32::try_from(runs).context("--analyze run count too large")?,
            base_seed: if config.seed == 0 { 42 } else { config.seed },
            ..Default::default()
        };
        let report = balance::analyze_config(&config, &analysis)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut generator = BoardGenerator::new(config);
    let board = generator
        .generate()
        .with_context(|| format!("board generation failed (seed {})", generator.seed()))?;

    eprintln!(
        "seed {} | attempt {} | {} ladders, {} snakes | balance ratio {:.2}",
        board.seed,
        board.attempt,
        board.jumps.ladders().count(),
        board.jumps.snakes().count(),
        board.balance_ratio,
    );
    println!("{}", serde_json::to_string_pretty(&board)?);
    Ok(())
}

/// Numeric value following `flag`. A flag with a missing or unparseable
/// value is an error, not an absent flag.
fn parse_arg(args: &[String], flag: &str) -> Result<Option<u64>> {
    let Some(val) = parse_str_arg(args, flag)? else {
        return Ok(None);
    };
    val.parse::<u64>()
        .map(Some)
        .with_context(|| format!("{flag} expects a non-negative integer, got {val:?}"))
}

fn parse_str_arg(args: &[String], flag: &str) -> Result<Option<String>> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(val) if !val.starts_with("--") => Ok(Some(val.clone())),
        _ => bail!("{flag} requires a value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("snakes-gen")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_absent_flags_are_none() {
        let args = args(&["--tier", "easy"]);
        assert_eq!(parse_arg(&args, "--seed").unwrap(), None);
        assert_eq!(parse_str_arg(&args, "--config").unwrap(), None);
    }

    #[test]
    fn test_flag_values_parse() {
        let args = args(&["--seed", "42", "--config", "board.ron", "--analyze", "500"]);
        assert_eq!(parse_arg(&args, "--seed").unwrap(), Some(42));
        assert_eq!(parse_arg(&args, "--analyze").unwrap(), Some(500));
        assert_eq!(
            parse_str_arg(&args, "--config").unwrap().as_deref(),
            Some("board.ron")
        );
    }

    #[test]
    fn test_unparseable_seed_is_an_error() {
        let err = parse_arg(&args(&["--seed", "abc"]), "--seed").unwrap_err();
        assert!(err.to_string().contains("--seed"), "{err}");
        assert!(parse_arg(&args(&["--analyze", "-3"]), "--analyze").is_err());
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(parse_arg(&args(&["--seed"]), "--seed").is_err());
        assert!(parse_str_arg(&args(&["--config", "--seed", "4"]), "--config").is_err());
    }
}
