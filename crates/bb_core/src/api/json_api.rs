use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::config::EngineConfig;
use crate::engine::day::{run_day, DayPlan, GameFailure, ScheduledGame};
use crate::engine::game::simulate_game;
use crate::error::{GameError, Result};
use crate::models::{GamePlan, GameResult, LeagueBaseline, SeasonState, TeamSetup};

pub const SCHEMA_VERSION: u8 = 1;

/// Reads only the version, so an old or future payload is rejected as such
/// instead of as a shape mismatch.
#[derive(Debug, Deserialize)]
struct SchemaProbe {
    schema_version: u8,
}

fn check_schema(request_json: &str) -> Result<()> {
    let probe: SchemaProbe = serde_json::from_str(request_json)?;
    if probe.schema_version != SCHEMA_VERSION {
        return Err(GameError::UnsupportedSchema {
            found: probe.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(())
}

// ============================================================================
// Single game
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub away_team: TeamSetup,
    pub home_team: TeamSetup,
    #[serde(default)]
    pub league: LeagueBaseline,
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub game_number: u32,
    #[serde(default)]
    pub play_by_play: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub result: GameResult,
}

/// JSON API - play one game.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    check_schema(request_json)?;
    let request: GameRequest = serde_json::from_str(request_json)?;

    let GameRequest {
        seed,
        away_team,
        home_team,
        league,
        config,
        game_number,
        play_by_play,
        ..
    } = request;
    debug!(seed, away = %away_team.name, home = %home_team.name, "simulate_game_json");

    let plan = GamePlan {
        away: away_team,
        home: home_team,
        league,
        seed,
        game_number,
        play_by_play,
    };
    let result = simulate_game(plan, &config)?;

    let response = GameResponse {
        schema_version: SCHEMA_VERSION,
        result,
    };
    serde_json::to_string(&response).map_err(|e| GameError::Serialization(e.to_string()))
}

// ============================================================================
// One day
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRequest {
    pub schema_version: u8,
    pub season_seed: u64,
    pub day: u32,
    pub games: Vec<ScheduledGame>,
    #[serde(default)]
    pub league: LeagueBaseline,
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub play_by_play: bool,
    /// Season tables to merge into. Starts empty when absent.
    #[serde(default)]
    pub season: Option<SeasonState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayResponse {
    pub schema_version: u8,
    pub day: u32,
    pub results: Vec<GameResult>,
    pub failures: Vec<GameFailure>,
    /// Season tables after this day's merge
    pub season: SeasonState,
}

/// JSON API - play one day of games and merge them into the season.
pub fn simulate_day_json(request_json: &str) -> Result<String> {
    check_schema(request_json)?;
    let request: DayRequest = serde_json::from_str(request_json)?;

    let DayRequest {
        season_seed,
        day,
        games,
        league,
        config,
        play_by_play,
        season,
        ..
    } = request;
    debug!(season_seed, day, games = games.len(), "simulate_day_json");

    let plan = DayPlan {
        season_seed,
        day,
        games,
        league,
        play_by_play,
    };
    let mut season = season.unwrap_or_default();
    let report = run_day(&plan, &config, &mut season)?;

    let response = DayResponse {
        schema_version: SCHEMA_VERSION,
        day: report.day,
        results: report.results,
        failures: report.failures,
        season,
    };
    serde_json::to_string(&response).map_err(|e| GameError::Serialization(e.to_string()))
}
