//! Game rules and managerial thresholds

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::models::player::ensure_non_negative;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Regulation length (기본: 9)
    pub regulation_innings: u8,

    // === Extra innings ===
    /// Previous batter starts on 2nd in extra innings
    pub extra_inning_runner: bool,
    /// First inning that gets the runner (기본: 10)
    pub extra_inning_runner_from: u8,

    // === Baserunning ===
    /// Runners take an extra base on a two-out single or double
    pub two_out_extra_base: bool,
    pub stolen_bases: bool,
    /// Multiplier on a runner's steal attempt rate per opportunity (기본: 1.7)
    pub steal_attempt_scale: f64,

    // === Manager thresholds ===
    /// Close game: hitting team inning at least this (기본: 7)
    pub close_game_inning: u8,
    /// Close game: pitching team ahead by at most this (기본: 3)
    pub close_game_max_lead: i32,
    /// Save situation: hitting team inning at least this (기본: 8)
    pub save_situation_inning: u8,
    /// Save situation: lead at most runners on base plus this (기본: 2)
    pub save_situation_cushion: i32,
    /// A closer who records fewer outs than this leaves room for a hold (기본: 6)
    pub hold_max_closer_outs: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            regulation_innings: 9,
            extra_inning_runner: true,
            extra_inning_runner_from: 10,
            two_out_extra_base: true,
            stolen_bases: true,
            steal_attempt_scale: 1.7,
            close_game_inning: 7,
            close_game_max_lead: 3,
            save_situation_inning: 8,
            save_situation_cushion: 2,
            hold_max_closer_outs: 6,
        }
    }
}

impl RulesConfig {
    /// Pre-2020 rules: no free runner, conservative baserunning
    pub fn classic() -> Self {
        Self {
            extra_inning_runner: false,
            two_out_extra_base: false,
            ..Self::default()
        }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.regulation_innings == 0 {
            return Err(GameError::InvalidStatistic {
                name: "rules.regulation_innings",
                value: 0.0,
            });
        }
        ensure_non_negative("rules.steal_attempt_scale", self.steal_attempt_scale)?;
        Ok(())
    }
}
