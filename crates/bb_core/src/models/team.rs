//! Team setup for one game: lineup card plus pitching staff order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::player::{BatterStats, PitcherStats, PlayerId};
use crate::error::{GameError, Result};

pub const LINEUP_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Away => 0,
            Side::Home => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }
}

/// Everything one club brings to a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSetup {
    pub name: String,
    /// Batting order, leadoff first. Exactly nine.
    pub lineup: Vec<BatterStats>,
    pub starting_pitcher: PitcherStats,
    /// Late-inning relievers, best first.
    #[serde(default)]
    pub closers: Vec<PitcherStats>,
    /// Middle relievers in the order they come out of the pen.
    #[serde(default)]
    pub middle_relievers: Vec<PitcherStats>,
}

impl TeamSetup {
    /// Lineup size, id uniqueness and every rate in range.
    pub fn validate(&self) -> Result<()> {
        if self.lineup.len() != LINEUP_SIZE {
            return Err(GameError::InvalidLineup {
                team: self.name.clone(),
                reason: format!("expected {} batters, got {}", LINEUP_SIZE, self.lineup.len()),
            });
        }

        let mut seen: HashSet<PlayerId> = HashSet::new();
        for batter in &self.lineup {
            if !seen.insert(batter.id) {
                return Err(GameError::InvalidLineup {
                    team: self.name.clone(),
                    reason: format!("batter {} listed twice", batter.id),
                });
            }
            batter.validate()?;
        }

        // 투수는 타순과 별도 (DH)
        let mut pitchers: HashSet<PlayerId> = HashSet::new();
        for pitcher in self.pitchers() {
            if !pitchers.insert(pitcher.id) {
                return Err(GameError::InvalidLineup {
                    team: self.name.clone(),
                    reason: format!("pitcher {} listed twice", pitcher.id),
                });
            }
            pitcher.validate()?;
        }
        Ok(())
    }

    /// Starter first, then closers, then middle relievers.
    pub fn pitchers(&self) -> impl Iterator<Item = &PitcherStats> {
        std::iter::once(&self.starting_pitcher)
            .chain(self.closers.iter())
            .chain(self.middle_relievers.iter())
    }
}
