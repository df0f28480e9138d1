//! Pitcher fatigue and bullpen availability

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::models::player::{ensure_condition, ensure_non_negative, ensure_rate};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    /// Workload share (batters faced / usual, in %) where the OBP penalty starts (기본: 70)
    pub penalty_onset_pct: f64,
    /// OBP penalty per workload % past the onset (기본: 0.001)
    pub penalty_per_pct: f64,
    /// Pull the pitcher at or below this condition (기본: 5)
    pub change_threshold: f64,
    /// Relievers at or below this season condition sit out (기본: 33)
    pub unavailable_threshold: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            penalty_onset_pct: 70.0,
            penalty_per_pct: 0.001,
            change_threshold: 5.0,
            unavailable_threshold: 33.0,
        }
    }
}

impl FatigueConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("fatigue.penalty_onset_pct", self.penalty_onset_pct)?;
        ensure_rate("fatigue.penalty_per_pct", self.penalty_per_pct)?;
        ensure_condition("fatigue.unavailable_threshold", self.unavailable_threshold)?;
        // 100 이상이면 등판 즉시 교체
        ensure_condition("fatigue.change_threshold", self.change_threshold)?;
        if self.change_threshold >= 100.0 {
            return Err(GameError::InvalidStatistic {
                name: "fatigue.change_threshold",
                value: self.change_threshold,
            });
        }
        Ok(())
    }
}
