//! Season tables, written only by the post-day merge.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::box_score::{BattingLine, PitchingLine};
use super::game_result::GameResult;
use super::player::PlayerId;
use super::team::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

/// Season totals keyed by team name and player id.
///
/// Merging is a sum per key, so the order games are merged in does not
/// change the result. Conditions are the exception: they are replaced per
/// merge batch, not summed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeasonState {
    pub games_merged: u32,
    pub standings: BTreeMap<String, TeamRecord>,
    pub batting: BTreeMap<PlayerId, BattingLine>,
    pub pitching: BTreeMap<PlayerId, PitchingLine>,
    /// Condition at the end of each pitcher's latest merge batch (one day).
    /// Two outings in one batch keep the lower value.
    pub pitcher_condition: BTreeMap<PlayerId, f64>,
}

impl SeasonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, team: &str) -> TeamRecord {
        self.standings.get(team).copied().unwrap_or_default()
    }

    /// Fold a batch of games, normally one day's, into the season tables.
    pub fn merge_all<'a>(&mut self, results: impl IntoIterator<Item = &'a GameResult>) {
        let mut conditions: BTreeMap<PlayerId, f64> = BTreeMap::new();
        for result in results {
            self.merge_totals(result, &mut conditions);
        }
        self.pitcher_condition.extend(conditions);
    }

    fn merge_totals(&mut self, result: &GameResult, conditions: &mut BTreeMap<PlayerId, f64>) {
        for side in [Side::Away, Side::Home] {
            let won = result.winner == side;
            let entry = self
                .standings
                .entry(result.team_name(side).to_string())
                .or_default();
            if won {
                entry.wins += 1;
            } else {
                entry.losses += 1;
            }
            entry.runs_scored += result.score(side);
            entry.runs_allowed += result.score(side.opponent());

            let box_score = result.box_score(side);
            for row in &box_score.batting {
                self.batting
                    .entry(row.player_id)
                    .and_modify(|season| season.absorb(row))
                    .or_insert_with(|| BattingLine {
                        rates: None,
                        ..row.clone()
                    });
            }
            for row in &box_score.pitching {
                self.pitching
                    .entry(row.player_id)
                    .and_modify(|season| season.absorb(row))
                    .or_insert_with(|| PitchingLine {
                        rates: None,
                        ..row.clone()
                    });
                // 더블헤더: 더 지친 쪽
                conditions
                    .entry(row.player_id)
                    .and_modify(|c| *c = c.min(row.condition))
                    .or_insert(row.condition);
            }
        }
        self.games_merged += 1;
    }
}
