//! Read-only rate snapshots supplied by the season layer.
//!
//! Rates are plain probabilities in `[0, 1]`. Component rates for hit types
//! are shares of the player's times on base; strikeout rate is a share of
//! outs. The engine never mutates these; in-game state lives elsewhere.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GameError, Result};

/// Stable player identifier. Zero is reserved and never a valid player.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fielding position for the lineup card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FieldPosition {
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
    #[default]
    #[serde(rename = "DH")]
    DesignatedHitter,
}

impl FieldPosition {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            FieldPosition::Catcher => "C",
            FieldPosition::FirstBase => "1B",
            FieldPosition::SecondBase => "2B",
            FieldPosition::ThirdBase => "3B",
            FieldPosition::Shortstop => "SS",
            FieldPosition::LeftField => "LF",
            FieldPosition::CenterField => "CF",
            FieldPosition::RightField => "RF",
            FieldPosition::DesignatedHitter => "DH",
        }
    }
}

/// Batter rate snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatterStats {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub position: FieldPosition,
    /// On-base percentage
    pub obp: f64,
    /// BB / times on base
    pub walk_rate: f64,
    /// HBP / times on base
    pub hbp_rate: f64,
    /// HR / times on base
    pub home_run_rate: f64,
    /// 3B / times on base
    pub triple_rate: f64,
    /// 2B / times on base
    pub double_rate: f64,
    /// SO / outs
    pub strikeout_rate: f64,
    /// GIDP / AB
    #[serde(default)]
    pub gidp_rate: f64,
    /// (SB + CS) / (H + BB)
    #[serde(default)]
    pub steal_attempt_rate: f64,
    /// SB / (SB + CS)
    #[serde(default)]
    pub steal_success_rate: f64,
    /// Season condition, 0..=100. Carried for the season layer's lineup
    /// choices; the engine only checks the range.
    #[serde(default = "full_condition")]
    pub condition: f64,
}

/// Pitcher rate snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitcherStats {
    pub id: PlayerId,
    pub name: String,
    /// On-base percentage allowed
    pub obp_allowed: f64,
    /// BB / times on base allowed
    pub walk_rate: f64,
    /// HBP / times on base allowed
    pub hbp_rate: f64,
    /// HR / times on base allowed
    pub home_run_rate: f64,
    /// SO / outs recorded
    pub strikeout_rate: f64,
    /// Average batters faced per appearance; sets the in-game workload scale.
    pub avg_batters_faced: f64,
    /// Season condition, 0..=100. Scales the usual outing on entry, and
    /// relievers at or below the availability threshold are left out of the
    /// bullpen.
    #[serde(default = "full_condition")]
    pub condition: f64,
    /// Slot in the starting rotation (0-based), if a starter. Shown in the
    /// play-by-play.
    #[serde(default)]
    pub rotation_index: Option<u8>,
}

fn full_condition() -> f64 {
    100.0
}

/// League baselines for the odds-ratio model.
///
/// `*_batting` fields are the league's hitters, `*_pitching` the league's
/// pitchers. Hit-type shares have no pitcher-side data and use the same value
/// on both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueBaseline {
    pub obp_batting: f64,
    pub obp_pitching: f64,
    pub walk_rate_batting: f64,
    pub walk_rate_pitching: f64,
    pub hbp_rate_batting: f64,
    pub hbp_rate_pitching: f64,
    pub home_run_rate_batting: f64,
    pub home_run_rate_pitching: f64,
    pub triple_rate: f64,
    pub double_rate: f64,
    pub strikeout_rate_batting: f64,
    pub strikeout_rate_pitching: f64,
    pub steal_success_rate: f64,
}

impl Default for LeagueBaseline {
    /// Recent MLB-like league averages.
    fn default() -> Self {
        Self {
            obp_batting: 0.312,
            obp_pitching: 0.312,
            walk_rate_batting: 0.197,
            walk_rate_pitching: 0.197,
            hbp_rate_batting: 0.028,
            hbp_rate_pitching: 0.028,
            home_run_rate_batting: 0.073,
            home_run_rate_pitching: 0.073,
            triple_rate: 0.006,
            double_rate: 0.124,
            strikeout_rate_batting: 0.326,
            strikeout_rate_pitching: 0.326,
            steal_success_rate: 0.79,
        }
    }
}

/// Rejects NaN and anything outside `[0, 1]`.
pub(crate) fn ensure_rate(name: &'static str, value: f64) -> Result<f64> {
    if value.is_nan() || !(0.0..=1.0).contains(&value) {
        return Err(GameError::InvalidStatistic { name, value });
    }
    Ok(value)
}

/// Finite and not negative. For scales and thresholds that are not
/// probabilities.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(GameError::InvalidStatistic { name, value });
    }
    Ok(value)
}

/// Condition lives on a 0..=100 scale.
pub(crate) fn ensure_condition(name: &'static str, value: f64) -> Result<f64> {
    if value.is_nan() || !(0.0..=100.0).contains(&value) {
        return Err(GameError::InvalidStatistic { name, value });
    }
    Ok(value)
}

impl BatterStats {
    pub fn validate(&self) -> Result<()> {
        ensure_rate("obp", self.obp)?;
        ensure_rate("walk_rate", self.walk_rate)?;
        ensure_rate("hbp_rate", self.hbp_rate)?;
        ensure_rate("home_run_rate", self.home_run_rate)?;
        ensure_rate("triple_rate", self.triple_rate)?;
        ensure_rate("double_rate", self.double_rate)?;
        ensure_rate("strikeout_rate", self.strikeout_rate)?;
        ensure_rate("gidp_rate", self.gidp_rate)?;
        ensure_rate("steal_attempt_rate", self.steal_attempt_rate)?;
        ensure_rate("steal_success_rate", self.steal_success_rate)?;
        ensure_condition("condition", self.condition)?;
        Ok(())
    }
}

impl PitcherStats {
    pub fn validate(&self) -> Result<()> {
        ensure_rate("obp_allowed", self.obp_allowed)?;
        ensure_rate("walk_rate", self.walk_rate)?;
        ensure_rate("hbp_rate", self.hbp_rate)?;
        ensure_rate("home_run_rate", self.home_run_rate)?;
        ensure_rate("strikeout_rate", self.strikeout_rate)?;
        if !(self.avg_batters_faced.is_finite() && self.avg_batters_faced > 0.0) {
            return Err(GameError::InvalidStatistic {
                name: "avg_batters_faced",
                value: self.avg_batters_faced,
            });
        }
        ensure_condition("condition", self.condition)?;
        Ok(())
    }
}

impl LeagueBaseline {
    pub fn validate(&self) -> Result<()> {
        ensure_rate("league.obp_batting", self.obp_batting)?;
        ensure_rate("league.obp_pitching", self.obp_pitching)?;
        ensure_rate("league.walk_rate_batting", self.walk_rate_batting)?;
        ensure_rate("league.walk_rate_pitching", self.walk_rate_pitching)?;
        ensure_rate("league.hbp_rate_batting", self.hbp_rate_batting)?;
        ensure_rate("league.hbp_rate_pitching", self.hbp_rate_pitching)?;
        ensure_rate("league.home_run_rate_batting", self.home_run_rate_batting)?;
        ensure_rate("league.home_run_rate_pitching", self.home_run_rate_pitching)?;
        ensure_rate("league.triple_rate", self.triple_rate)?;
        ensure_rate("league.double_rate", self.double_rate)?;
        ensure_rate("league.strikeout_rate_batting", self.strikeout_rate_batting)?;
        ensure_rate("league.strikeout_rate_pitching", self.strikeout_rate_pitching)?;
        ensure_rate("league.steal_success_rate", self.steal_success_rate)?;
        Ok(())
    }
}
