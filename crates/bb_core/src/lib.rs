//! # bb_core - Deterministic Baseball Game Simulation Engine
//!
//! Plate-appearance level baseball simulation for a season-length game.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result)
//! - Odds-ratio matchup model against a league baseline
//! - Pitcher fatigue, bullpen usage, W/L/SV/HLD/BS credits
//! - Full box scores with team totals
//! - One day of games in parallel, merged into season tables
//! - JSON API for easy integration

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Stat tables take many parameters
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{
    simulate_day_json, simulate_game_json, DayRequest, DayResponse, GameRequest, GameResponse,
    SCHEMA_VERSION,
};
pub use error::{GameError, Result};

// Re-export engine entry points
pub use engine::{
    run_day, simulate_day, simulate_game, DayPlan, DayReport, EngineConfig, GameEngine,
    ScheduledGame,
};

// Re-export models
pub use models::{
    BatterStats, BoxScore, Decisions, GamePlan, GameResult, LeagueBaseline, PitcherStats,
    PlayerId, SeasonState, Side, TeamSetup,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
