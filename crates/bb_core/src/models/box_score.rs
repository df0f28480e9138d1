//! Per-game box score rows.
//!
//! Rows are created on a player's first appearance and never removed. Order is
//! order of appearance; lookups go by stable player id.

use serde::{Deserialize, Serialize};

use super::outcome::{Outcome, PlayCode};
use super::player::{BatterStats, PitcherStats, PlayerId};
use crate::error::{GameError, Result};

/// Derived batting rates, filled in at finalization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BattingRates {
    pub avg: f64,
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BattingLine {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub g: u32,
    pub ab: u32,
    pub r: u32,
    pub h: u32,
    #[serde(rename = "2b")]
    pub doubles: u32,
    #[serde(rename = "3b")]
    pub triples: u32,
    pub hr: u32,
    pub rbi: u32,
    pub sb: u32,
    pub cs: u32,
    pub bb: u32,
    pub so: u32,
    pub sf: u32,
    pub hbp: u32,
    pub gidp: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<BattingRates>,
}

impl BattingLine {
    pub fn new(batter: &BatterStats) -> Self {
        Self {
            player_id: batter.id,
            name: batter.name.clone(),
            position: batter.position.abbreviation().to_string(),
            g: 1,
            ..Default::default()
        }
    }

    pub fn singles(&self) -> u32 {
        self.h.saturating_sub(self.doubles + self.triples + self.hr)
    }

    pub fn total_bases(&self) -> u32 {
        self.singles() + 2 * self.doubles + 3 * self.triples + 4 * self.hr
    }

    /// Apply one plate appearance. Calling twice for the same outcome double
    /// counts; the caller owns that.
    pub fn apply(&mut self, outcome: &Outcome) {
        // 볼넷, 사구, 희생플라이는 타수 제외
        if !matches!(
            outcome.code,
            PlayCode::Walk | PlayCode::HitByPitch | PlayCode::SacFly
        ) {
            self.ab += 1;
        }
        if outcome.code.is_hit() {
            self.h += 1;
        }
        match outcome.code {
            PlayCode::Double => self.doubles += 1,
            PlayCode::Triple => self.triples += 1,
            PlayCode::HomeRun => self.hr += 1,
            PlayCode::Walk => self.bb += 1,
            PlayCode::HitByPitch => self.hbp += 1,
            PlayCode::Strikeout => self.so += 1,
            PlayCode::SacFly => self.sf += 1,
            PlayCode::DoublePlay => self.gidp += 1,
            _ => {}
        }
        self.rbi += u32::from(outcome.rbis);
    }

    /// Add another line's counting stats into this one.
    pub fn absorb(&mut self, other: &BattingLine) {
        self.g += other.g;
        self.ab += other.ab;
        self.r += other.r;
        self.h += other.h;
        self.doubles += other.doubles;
        self.triples += other.triples;
        self.hr += other.hr;
        self.rbi += other.rbi;
        self.sb += other.sb;
        self.cs += other.cs;
        self.bb += other.bb;
        self.so += other.so;
        self.sf += other.sf;
        self.hbp += other.hbp;
        self.gidp += other.gidp;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchingRates {
    /// Innings pitched in scorebook notation ("6.2" = six and two thirds).
    pub ip: String,
    pub era: f64,
    pub whip: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchingLine {
    pub player_id: PlayerId,
    pub name: String,
    pub g: u32,
    pub gs: u32,
    pub outs: u32,
    pub batters_faced: u32,
    pub h: u32,
    #[serde(rename = "2b")]
    pub doubles: u32,
    #[serde(rename = "3b")]
    pub triples: u32,
    pub hr: u32,
    pub er: u32,
    pub bb: u32,
    pub so: u32,
    pub hbp: u32,
    pub w: u32,
    pub l: u32,
    pub sv: u32,
    pub bs: u32,
    pub hld: u32,
    /// Condition when the pitcher left the game (or at the final out).
    pub condition: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<PitchingRates>,
}

impl PitchingLine {
    pub fn new(pitcher: &PitcherStats, starter: bool) -> Self {
        Self {
            player_id: pitcher.id,
            name: pitcher.name.clone(),
            g: 1,
            gs: u32::from(starter),
            condition: pitcher.condition,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, outcome: &Outcome) {
        self.batters_faced += 1;
        self.outs += u32::from(outcome.outs_on_play);
        if outcome.code.is_hit() {
            self.h += 1;
        }
        match outcome.code {
            PlayCode::Double => self.doubles += 1,
            PlayCode::Triple => self.triples += 1,
            PlayCode::HomeRun => self.hr += 1,
            PlayCode::Walk => self.bb += 1,
            PlayCode::HitByPitch => self.hbp += 1,
            PlayCode::Strikeout => self.so += 1,
            _ => {}
        }
        self.er += u32::from(outcome.runs);
    }

    pub fn absorb(&mut self, other: &PitchingLine) {
        self.g += other.g;
        self.gs += other.gs;
        self.outs += other.outs;
        self.batters_faced += other.batters_faced;
        self.h += other.h;
        self.doubles += other.doubles;
        self.triples += other.triples;
        self.hr += other.hr;
        self.er += other.er;
        self.bb += other.bb;
        self.so += other.so;
        self.hbp += other.hbp;
        self.w += other.w;
        self.l += other.l;
        self.sv += other.sv;
        self.bs += other.bs;
        self.hld += other.hld;
    }
}

/// One team's box score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxScore {
    pub team: String,
    pub batting: Vec<BattingLine>,
    pub pitching: Vec<PitchingLine>,
    /// Team aggregate rows, present once the game is finalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batting_totals: Option<BattingLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitching_totals: Option<PitchingLine>,
}

impl BoxScore {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            ..Default::default()
        }
    }

    /// Create the batter's row on first appearance.
    pub fn add_batter(&mut self, batter: &BatterStats) {
        if self.batting_index(batter.id).is_none() {
            self.batting.push(BattingLine::new(batter));
        }
    }

    pub fn add_pitcher(&mut self, pitcher: &PitcherStats, starter: bool) {
        if self.pitching_index(pitcher.id).is_none() {
            self.pitching.push(PitchingLine::new(pitcher, starter));
        }
    }

    fn batting_index(&self, id: PlayerId) -> Option<usize> {
        self.batting.iter().position(|row| row.player_id == id)
    }

    fn pitching_index(&self, id: PlayerId) -> Option<usize> {
        self.pitching.iter().position(|row| row.player_id == id)
    }

    pub fn batting_line(&self, id: PlayerId) -> Option<&BattingLine> {
        self.batting_index(id).map(|i| &self.batting[i])
    }

    pub fn pitching_line(&self, id: PlayerId) -> Option<&PitchingLine> {
        self.pitching_index(id).map(|i| &self.pitching[i])
    }

    pub fn batting_line_mut(&mut self, id: PlayerId) -> Result<&mut BattingLine> {
        self.batting
            .iter_mut()
            .find(|row| row.player_id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn pitching_line_mut(&mut self, id: PlayerId) -> Result<&mut PitchingLine> {
        self.pitching
            .iter_mut()
            .find(|row| row.player_id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn record_batting(&mut self, batter: PlayerId, outcome: &Outcome) -> Result<()> {
        self.batting_line_mut(batter)?.apply(outcome);
        Ok(())
    }

    pub fn record_pitching(&mut self, pitcher: PlayerId, outcome: &Outcome) -> Result<()> {
        self.pitching_line_mut(pitcher)?.apply(outcome);
        Ok(())
    }

    pub fn record_run(&mut self, runner: PlayerId) -> Result<()> {
        self.batting_line_mut(runner)?.r += 1;
        Ok(())
    }

    pub fn record_steal(&mut self, runner: PlayerId, success: bool) -> Result<()> {
        let row = self.batting_line_mut(runner)?;
        if success {
            row.sb += 1;
        } else {
            row.cs += 1;
        }
        Ok(())
    }

    /// Caught-stealing out, credited to the pitcher on the mound.
    pub fn record_caught_stealing_out(&mut self, pitcher: PlayerId) -> Result<()> {
        self.pitching_line_mut(pitcher)?.outs += 1;
        Ok(())
    }

    pub fn set_condition(&mut self, pitcher: PlayerId, condition: f64) -> Result<()> {
        self.pitching_line_mut(pitcher)?.condition = condition;
        Ok(())
    }

    pub fn total_runs(&self) -> u32 {
        self.batting.iter().map(|row| row.r).sum()
    }

    pub fn total_outs_recorded(&self) -> u32 {
        self.pitching.iter().map(|row| row.outs).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::team::fixtures::{batter, pitcher};

    #[test]
    fn test_walk_is_not_an_at_bat() {
        let mut line = BattingLine::new(&batter(1, 0.3));
        line.apply(&Outcome::new(PlayCode::Walk));
        line.apply(&Outcome::new(PlayCode::HitByPitch));
        line.apply(&Outcome::new(PlayCode::SacFly).with_runs(1));
        assert_eq!(line.ab, 0);
        assert_eq!(line.bb, 1);
        assert_eq!(line.hbp, 1);
        assert_eq!(line.sf, 1);
        assert_eq!(line.rbi, 1);
    }

    #[test]
    fn test_hit_columns() {
        let mut line = BattingLine::new(&batter(1, 0.3));
        line.apply(&Outcome::new(PlayCode::Single));
        line.apply(&Outcome::new(PlayCode::Double));
        line.apply(&Outcome::new(PlayCode::HomeRun).with_runs(2));
        line.apply(&Outcome::new(PlayCode::Strikeout));
        assert_eq!(line.ab, 4);
        assert_eq!(line.h, 3);
        assert_eq!(line.singles(), 1);
        assert_eq!(line.total_bases(), 7);
        assert_eq!(line.rbi, 2);
        assert_eq!(line.so, 1);
    }

    #[test]
    fn test_pitching_line_mirrors_plate_appearance() {
        let mut line = PitchingLine::new(&pitcher(50, 20.0), true);
        line.apply(&Outcome::new(PlayCode::DoublePlay).with_runs(1));
        line.apply(&Outcome::new(PlayCode::Walk));
        assert_eq!(line.gs, 1);
        assert_eq!(line.batters_faced, 2);
        assert_eq!(line.outs, 2);
        assert_eq!(line.er, 1);
        assert_eq!(line.bb, 1);
    }

    #[test]
    fn test_rows_created_once() {
        let mut bs = BoxScore::new("Away");
        let b = batter(1, 0.3);
        bs.add_batter(&b);
        bs.record_run(b.id).unwrap();
        bs.add_batter(&b);
        assert_eq!(bs.batting.len(), 1);
        assert_eq!(bs.total_runs(), 1);
    }

    #[test]
    fn test_unknown_player() {
        let mut bs = BoxScore::new("Away");
        assert_eq!(
            bs.record_run(PlayerId(9)),
            Err(GameError::UnknownPlayer(PlayerId(9)))
        );
    }
}
