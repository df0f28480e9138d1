//! Game input and output records.

use serde::{Deserialize, Serialize};

use super::box_score::BoxScore;
use super::player::{LeagueBaseline, PlayerId};
use super::team::{Side, TeamSetup};

/// Everything needed to play one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePlan {
    pub away: TeamSetup,
    pub home: TeamSetup,
    #[serde(default)]
    pub league: LeagueBaseline,
    pub seed: u64,
    #[serde(default)]
    pub game_number: u32,
    /// Record a play-by-play log
    #[serde(default)]
    pub play_by_play: bool,
}

/// Pitchers credited at the end of a game.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Decisions {
    pub winning_pitcher: PlayerId,
    pub losing_pitcher: PlayerId,
    pub save: Option<PlayerId>,
    pub holds: Vec<PlayerId>,
    pub blown_saves: Vec<PlayerId>,
}

/// Runs per inning. The home side has no entry for an unplayed bottom half.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineScore {
    pub away: Vec<u32>,
    pub home: Vec<u32>,
}

impl LineScore {
    pub fn side(&self, side: Side) -> &[u32] {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut Vec<u32> {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub game_number: u32,
    pub seed: u64,
    pub away_team: String,
    pub home_team: String,
    pub away_score: u32,
    pub home_score: u32,
    /// Half-innings batted, away then home
    pub innings: [u8; 2],
    pub winner: Side,
    pub decisions: Decisions,
    pub line_score: LineScore,
    pub away_box: BoxScore,
    pub home_box: BoxScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_by_play: Option<Vec<String>>,
}

impl GameResult {
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Away => self.away_score,
            Side::Home => self.home_score,
        }
    }

    pub fn box_score(&self, side: Side) -> &BoxScore {
        match side {
            Side::Away => &self.away_box,
            Side::Home => &self.home_box,
        }
    }

    pub fn team_name(&self, side: Side) -> &str {
        match side {
            Side::Away => &self.away_team,
            Side::Home => &self.home_team,
        }
    }

    pub fn is_extra_innings(&self) -> bool {
        self.innings[0] > 9
    }

    /// "BOS 5, NYY 3 (10)"
    pub fn summary(&self) -> String {
        let extra = if self.is_extra_innings() {
            format!(" ({})", self.innings[0])
        } else {
            String::new()
        };
        format!(
            "{} {}, {} {}{}",
            self.away_team, self.away_score, self.home_team, self.home_score, extra
        )
    }
}
