//! # Engine Configuration Module
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! ## 사용법
//! ```rust
//! use bb_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let classic = EngineConfig::classic();
//! assert!(!classic.rules.extra_inning_runner);
//! assert!(config.rules.extra_inning_runner);
//! ```

mod at_bat_config;
mod fatigue_config;
mod rules_config;

pub use at_bat_config::AtBatConfig;
pub use fatigue_config::FatigueConfig;
pub use rules_config::RulesConfig;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Full engine settings. Missing sections fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub at_bat: AtBatConfig,
    #[serde(default)]
    pub fatigue: FatigueConfig,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl EngineConfig {
    /// 현대 규칙 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// No extra-inning runner, no two-out extra base
    pub fn classic() -> Self {
        Self {
            rules: RulesConfig::classic(),
            ..Self::default()
        }
    }

    /// 테스트용: 상황 랜덤 최소화
    pub fn deterministic() -> Self {
        let mut cfg = Self::classic();
        cfg.rules.stolen_bases = false;
        cfg
    }

    /// Every probability in `[0, 1]`, a usable batted-ball split, and a
    /// fatigue threshold a fresh pitcher is above.
    pub fn validate(&self) -> Result<()> {
        self.at_bat.validate()?;
        self.fatigue.validate()?;
        self.rules.validate()
    }
}

// ========== Tests ==========
