//! One day of games.
//!
//! Games are independent: each gets its own seed and generator and runs on a
//! rayon worker. Nothing touches the season tables until every game has
//! finished; the merge afterwards is a per-key sum.

use std::hash::{Hash, Hasher};

use fxhash::FxHasher;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::EngineConfig;
use super::game::GameEngine;
use crate::error::Result;
use crate::models::{GamePlan, GameResult, LeagueBaseline, SeasonState, TeamSetup};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub away: TeamSetup,
    pub home: TeamSetup,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub season_seed: u64,
    pub day: u32,
    pub games: Vec<ScheduledGame>,
    #[serde(default)]
    pub league: LeagueBaseline,
    #[serde(default)]
    pub play_by_play: bool,
}

/// A game dropped from the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameFailure {
    pub game_number: u32,
    pub away_team: String,
    pub home_team: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u32,
    /// Completed games in schedule order
    pub results: Vec<GameResult>,
    pub failures: Vec<GameFailure>,
}

/// Per-game seed from (season seed, day, slot).
///
/// FxHasher output does not change between Rust releases, unlike
/// `DefaultHasher`, so replays stay stable.
#[inline]
pub fn derive_game_seed(season_seed: u64, day: u32, index: usize) -> u64 {
    let mut hasher = FxHasher::default();
    season_seed.hash(&mut hasher);
    day.hash(&mut hasher);
    (index as u64).hash(&mut hasher);
    hasher.finish()
}

impl DayPlan {
    /// Game plans in schedule order. Game numbers start at 1.
    pub fn game_plans(&self) -> Vec<GamePlan> {
        self.games
            .iter()
            .enumerate()
            .map(|(i, game)| GamePlan {
                away: game.away.clone(),
                home: game.home.clone(),
                league: self.league.clone(),
                seed: derive_game_seed(self.season_seed, self.day, i),
                game_number: i as u32 + 1,
                play_by_play: self.play_by_play,
            })
            .collect()
    }
}

/// Play every game of the day in parallel.
///
/// Game-local failures (bad rates, an exhausted pen) are logged and reported
/// in `failures`; the rest of the day still counts. Anything else is an
/// engine fault and fails the day.
pub fn simulate_day(plan: &DayPlan, config: &EngineConfig) -> Result<DayReport> {
    let outcomes: Vec<(u32, String, String, Result<GameResult>)> = plan
        .game_plans()
        .into_par_iter()
        .map(|game| {
            let number = game.game_number;
            let away = game.away.name.clone();
            let home = game.home.name.clone();
            let result = GameEngine::new(game, config.clone()).and_then(GameEngine::simulate);
            (number, away, home, result)
        })
        .collect();

    let mut report = DayReport {
        day: plan.day,
        ..DayReport::default()
    };
    for (game_number, away_team, home_team, outcome) in outcomes {
        match outcome {
            Ok(result) => report.results.push(result),
            Err(err) if err.is_game_local() => {
                warn!(
                    day = plan.day,
                    game = game_number,
                    away = %away_team,
                    home = %home_team,
                    error = %err,
                    "game skipped"
                );
                report.failures.push(GameFailure {
                    game_number,
                    away_team,
                    home_team,
                    error: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        day = plan.day,
        completed = report.results.len(),
        failed = report.failures.len(),
        "day complete"
    );
    Ok(report)
}

/// Simulate the day, then fold the completed games into `season`.
pub fn run_day(plan: &DayPlan, config: &EngineConfig, season: &mut SeasonState) -> Result<DayReport> {
    let report = simulate_day(plan, config)?;
    season.merge_all(&report.results);
    Ok(report)
}
