//! Plate-appearance draw parameters

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::models::player::ensure_rate;

/// Batted-ball split and in-play probabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AtBatConfig {
    // === Batted ball split (league) ===
    /// 땅볼 비율 (기본: 0.429)
    pub ground_ball_rate: f64,
    /// 뜬공 비율 (기본: 0.372)
    pub fly_ball_rate: f64,
    /// 라인드라이브 비율 (기본: 0.199)
    pub line_drive_rate: f64,

    // === In-play refinements ===
    /// Fielder's choice on a non-DP ground ball with a runner on 1st (기본: 0.10)
    pub fielders_choice_rate: f64,
    /// Runner on 3rd tags and scores on a fly ball (기본: 0.20)
    pub sac_fly_rate: f64,

    /// Resolve draws against the league rate as environment odds.
    /// When false every draw uses the neutral four-rate form.
    pub use_environment_odds: bool,
}

impl Default for AtBatConfig {
    fn default() -> Self {
        Self {
            ground_ball_rate: 0.429,
            fly_ball_rate: 0.372,
            line_drive_rate: 0.199,
            fielders_choice_rate: 0.10,
            sac_fly_rate: 0.20,
            use_environment_odds: true,
        }
    }
}

impl AtBatConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_rate("at_bat.ground_ball_rate", self.ground_ball_rate)?;
        ensure_rate("at_bat.fly_ball_rate", self.fly_ball_rate)?;
        ensure_rate("at_bat.line_drive_rate", self.line_drive_rate)?;
        let split = self.ground_ball_rate + self.fly_ball_rate + self.line_drive_rate;
        if split <= 0.0 {
            return Err(GameError::InvalidStatistic {
                name: "at_bat.batted_ball_split",
                value: split,
            });
        }
        ensure_rate("at_bat.fielders_choice_rate", self.fielders_choice_rate)?;
        ensure_rate("at_bat.sac_fly_rate", self.sac_fly_rate)?;
        Ok(())
    }
}
