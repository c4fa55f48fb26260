//! FFI Bridge Layer: board generator <-> host renderer
//!
//! C-ABI functions a game engine can call via DLL/shared-object loading.
//! Data crosses the boundary as JSON. All functions returning `*mut c_char`
//! hand over a heap-allocated string; the caller must free it with
//! `free_string`. Null input pointers yield null (or -1.0), never a crash.

use serde::{Deserialize, Serialize};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::balance::{self, AnalysisConfig, DifficultyReport};
use crate::board::JumpSet;
use crate::config::GenerationConfig;
use crate::generation::{self, GeneratedBoard};
use crate::logging::{self, LogLevel, TracingConfig};
use crate::presets::{built_in_presets, DifficultyTier};
use crate::validator;

// ========================
// Data transfer types
// ========================

/// Generation response: either `board` or `error` is set
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardResponse {
    pub ok: bool,
    pub board: Option<GeneratedBoard>,
    pub error: Option<String>,
}

impl BoardResponse {
    fn success(board: GeneratedBoard) -> Self {
        Self {
            ok: true,
            board: Some(board),
            error: None,
        }
    }

    fn failure(error: impl ToString) -> Self {
        Self {
            ok: false,
            board: None,
            error: Some(error.to_string()),
        }
    }
}

/// Analysis response: either `report` or `error` is set
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub ok: bool,
    pub report: Option<DifficultyReport>,
    pub error: Option<String>,
}

impl AnalysisResponse {
    fn success(report: DifficultyReport) -> Self {
        Self {
            ok: true,
            report: Some(report),
            error: None,
        }
    }

    fn failure(error: impl ToString) -> Self {
        Self {
            ok: false,
            report: None,
            error: Some(error.to_string()),
        }
    }
}

/// Validation response for a caller-supplied jump list
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub error: Option<String>,
    pub balance_ratio: f32,
}

// ========================
// Helper: safe JSON return
// ========================

fn json_to_cstring<T: Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn parse_cstr(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_owned()) }
}

fn generate_from_json(config_json: &str, tier: Option<DifficultyTier>) -> BoardResponse {
    let mut config = match GenerationConfig::from_json_str(config_json) {
        Ok(config) => config,
        Err(e) => return BoardResponse::failure(e),
    };
    if let Some(tier) = tier {
        tier.apply(&mut config);
    }

    match generation::generate_board(&config) {
        Ok(board) => BoardResponse::success(board),
        Err(e) => BoardResponse::failure(e),
    }
}

// ========================
// C-ABI: Core
// ========================

/// Version string
#[no_mangle]
pub extern "C" fn get_version() -> *mut c_char {
    CString::new(env!("CARGO_PKG_VERSION"))
        .unwrap_or_default()
        .into_raw()
}

/// Free a string allocated by Rust.
/// ptr must come from a prior call into this library, or be null.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

/// Install a stderr log subscriber (0=trace .. 4=error). First call wins.
#[no_mangle]
pub extern "C" fn init_logging(level_id: u32) {
    logging::init_tracing(&TracingConfig::with_level(LogLevel::from_id(level_id)));
}

// ========================
// C-ABI: Board Generation
// ========================

/// Generate a board from a JSON `GenerationConfig` (missing fields default)
#[no_mangle]
pub extern "C" fn generate_board_json(config_json: *const c_char) -> *mut c_char {
    let Some(json) = parse_cstr(config_json) else {
        return std::ptr::null_mut();
    };
    json_to_cstring(&generate_from_json(&json, None))
}

/// Apply difficulty tier `tier_id` (0=Easy .. 3=Extreme, 4=Custom), then generate
#[no_mangle]
pub extern "C" fn generate_board_with_tier(
    config_json: *const c_char,
    tier_id: u32,
) -> *mut c_char {
    let Some(json) = parse_cstr(config_json) else {
        return std::ptr::null_mut();
    };
    let response = match DifficultyTier::from_id(tier_id) {
        Some(tier) => generate_from_json(&json, Some(tier)),
        None => BoardResponse::failure(format!("unknown difficulty tier id {tier_id}")),
    };
    json_to_cstring(&response)
}

/// All built-in presets (Easy -> Extreme) as a JSON array
#[no_mangle]
pub extern "C" fn list_difficulty_presets() -> *mut c_char {
    json_to_cstring(&built_in_presets())
}

// ========================
// C-ABI: Validation
// ========================

/// Validate a JSON jump list (`[{"from":..,"to":..,"is_ladder":..}]`)
#[no_mangle]
pub extern "C" fn validate_jump_set_json(jumps_json: *const c_char, board_size: u32) -> *mut c_char {
    let Some(json) = parse_cstr(jumps_json) else {
        return std::ptr::null_mut();
    };
    let response = match JumpSet::from_json(&json) {
        Some(jumps) => {
            let result = validator::validate_jump_set(jumps.as_slice(), board_size);
            ValidationResponse {
                valid: result.is_ok(),
                error: result.err().map(|e| e.to_string()),
                balance_ratio: validator::calculate_balance_ratio(jumps.as_slice()),
            }
        }
        None => ValidationResponse {
            valid: false,
            error: Some("malformed jump list".into()),
            balance_ratio: -1.0,
        },
    };
    json_to_cstring(&response)
}

/// Balance ratio of a JSON jump list, -1.0 on bad input
#[no_mangle]
pub extern "C" fn calculate_balance_ratio_json(jumps_json: *const c_char) -> f32 {
    parse_cstr(jumps_json)
        .and_then(|json| JumpSet::from_json(&json))
        .map(|jumps| validator::calculate_balance_ratio(jumps.as_slice()))
        .unwrap_or(-1.0)
}

// ========================
// C-ABI: Difficulty Analysis
// ========================

/// Monte-Carlo report for a JSON config over `runs` seeds derived from `base_seed`
#[no_mangle]
pub extern "C" fn analyze_config_json(
    config_json: *const c_char,
    runs: u32,
    base_seed: u64,
) -> *mut c_char {
    let Some(json) = parse_cstr(config_json) else {
        return std::ptr::null_mut();
    };
    let config = match GenerationConfig::from_json_str(&json) {
        Ok(config) => config,
        Err(e) => return json_to_cstring(&AnalysisResponse::failure(e)),
    };
    let analysis = AnalysisConfig {
        runs,
        base_seed,
        ..Default::default()
    };
    let response = match balance::analyze_config(&config, &analysis) {
        Ok(report) => AnalysisResponse::success(report),
        Err(e) => AnalysisResponse::failure(e),
    };
    json_to_cstring(&response)
}
