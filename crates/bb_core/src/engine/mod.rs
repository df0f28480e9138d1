pub mod at_bat; // 타석 결과: on base / BB / HR / 3B / 2B / HBP / 1B, 아웃 유형
pub mod bases; // 8-slot baserunner state machine
pub mod config;
pub mod day; // rayon worker-per-game + post-day merge
pub mod game;
pub mod in_play; // DP / FC / SF refinement and runner movement
pub mod pitching; // fatigue, bullpen order, W/L/SV/HLD/BS
pub mod probability;
pub mod stats;

#[cfg(test)]
mod game_contracts_test;

pub use at_bat::{AtBatResolver, Situation};
pub use bases::Bases;
pub use config::{AtBatConfig, EngineConfig, FatigueConfig, RulesConfig};
pub use day::{derive_game_seed, run_day, simulate_day, DayPlan, DayReport, GameFailure, ScheduledGame};
pub use game::{simulate_game, GameEngine};
pub use pitching::{DecisionTracker, PitchingStaff};
pub use probability::{matchup_probability, matchup_probability_in_environment};
pub use stats::StatsCalculator;
