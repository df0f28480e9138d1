//! Pitching staff: in-game fatigue, bullpen order, and pitcher-of-record
//! bookkeeping for win / loss / save / hold / blown save.

use tracing::debug;

use super::config::{FatigueConfig, RulesConfig};
use crate::error::{GameError, Result};
use crate::models::{BoxScore, Decisions, PitcherStats, PlayerId, Side, TeamSetup};

// ============================================================================
// Fatigue
// ============================================================================

/// Batters faced as a percentage of the pitcher's usual outing.
#[inline]
pub fn workload_pct(batters_faced: u32, avg_batters_faced: f64) -> f64 {
    if avg_batters_faced <= 0.0 {
        return 100.0;
    }
    f64::from(batters_faced) / avg_batters_faced * 100.0
}

/// Condition 0..=100 after `batters_faced`.
#[inline]
pub fn condition_for(batters_faced: u32, avg_batters_faced: f64) -> f64 {
    (100.0 - workload_pct(batters_faced, avg_batters_faced)).max(0.0)
}

/// OBP penalty once the pitcher is past the onset share of a usual outing.
#[inline]
pub fn in_game_fatigue(batters_faced: u32, avg_batters_faced: f64, cfg: &FatigueConfig) -> f64 {
    let pct = workload_pct(batters_faced, avg_batters_faced);
    if pct >= cfg.penalty_onset_pct {
        (pct - cfg.penalty_onset_pct) * cfg.penalty_per_pct
    } else {
        0.0
    }
}

/// The pitcher on the mound.
#[derive(Debug, Clone)]
pub struct ActivePitcher {
    pub stats: PitcherStats,
    /// Usual outing scaled by the condition brought into the game
    pub workload: f64,
    pub batters_faced: u32,
    pub condition: f64,
}

impl ActivePitcher {
    fn new(stats: PitcherStats) -> Self {
        // 컨디션 50이면 평소 상대 타자 수의 절반에서 지침
        let workload = stats.avg_batters_faced * stats.condition / 100.0;
        Self {
            stats,
            workload,
            batters_faced: 0,
            condition: 100.0,
        }
    }
}

// ============================================================================
// Bullpen
// ============================================================================

/// Relievers not yet used, in selection order.
#[derive(Debug, Clone, Default)]
pub struct Bullpen {
    closers: Vec<PitcherStats>,
    middle_relievers: Vec<PitcherStats>,
}

impl Bullpen {
    /// Relievers at or below `unavailable_threshold` season condition sit out.
    pub fn new(
        closers: &[PitcherStats],
        middle_relievers: &[PitcherStats],
        unavailable_threshold: f64,
    ) -> Self {
        let available = |p: &&PitcherStats| p.condition > unavailable_threshold;
        Self {
            closers: closers.iter().filter(available).cloned().collect(),
            middle_relievers: middle_relievers.iter().filter(available).cloned().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.closers.len() + self.middle_relievers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Next arm for `inning`.
    ///
    /// Late regulation innings go to closer `regulation - inning` (8th gets
    /// the setup man, 9th the closer) when enough closers remain to cover the
    /// rest of regulation. Extra innings take the next closer. Everything else
    /// goes to the next middle reliever, or the last closer once the middle
    /// relief is gone.
    pub fn next_reliever(&mut self, inning: u8, regulation: u8) -> Option<PitcherStats> {
        let n = self.closers.len();
        if inning <= regulation {
            let needed = usize::from(regulation - inning) + 1;
            if n >= needed {
                return Some(self.closers.remove(needed - 1));
            }
        } else if n >= 1 {
            return Some(self.closers.remove(0));
        }
        if self.middle_relievers.is_empty() {
            // 중계 소진: 남은 마무리 중 가장 뒤 순번
            self.closers.pop()
        } else {
            Some(self.middle_relievers.remove(0))
        }
    }
}

// ============================================================================
// Staff
// ============================================================================

#[derive(Debug, Clone)]
pub struct PitchingStaff {
    team: String,
    current: ActivePitcher,
    bullpen: Bullpen,
    /// Order of appearance, starter first.
    used: Vec<PlayerId>,
    /// The latest change happened in a save situation.
    save_situation: bool,
}

impl PitchingStaff {
    pub fn new(team: &TeamSetup, fatigue: &FatigueConfig) -> Self {
        Self {
            team: team.name.clone(),
            current: ActivePitcher::new(team.starting_pitcher.clone()),
            bullpen: Bullpen::new(
                &team.closers,
                &team.middle_relievers,
                fatigue.unavailable_threshold,
            ),
            used: vec![team.starting_pitcher.id],
            save_situation: false,
        }
    }

    pub fn current(&self) -> &ActivePitcher {
        &self.current
    }

    pub fn current_id(&self) -> PlayerId {
        self.current.stats.id
    }

    pub fn starter_id(&self) -> PlayerId {
        self.used[0]
    }

    pub fn pitchers_used(&self) -> &[PlayerId] {
        &self.used
    }

    pub fn in_save_situation(&self) -> bool {
        self.save_situation
    }

    pub fn set_save_situation(&mut self, active: bool) {
        self.save_situation = active;
    }

    /// OBP penalty for the next plate appearance.
    pub fn fatigue_penalty(&self, cfg: &FatigueConfig) -> f64 {
        in_game_fatigue(self.current.batters_faced, self.current.workload, cfg)
    }

    /// Count one batter faced. Returns the new condition.
    pub fn record_batter_faced(&mut self) -> f64 {
        self.current.batters_faced += 1;
        self.current.condition = condition_for(self.current.batters_faced, self.current.workload);
        self.current.condition
    }

    pub fn is_fatigued(&self, cfg: &FatigueConfig) -> bool {
        self.current.condition <= cfg.change_threshold
    }

    /// Bring in the next reliever. Returns the departing pitcher's id and
    /// condition, or `None` when the pen is empty.
    pub fn change_pitcher(&mut self, inning: u8, rules: &RulesConfig) -> Option<(PlayerId, f64)> {
        let next = self.bullpen.next_reliever(inning, rules.regulation_innings)?;
        let departing = std::mem::replace(&mut self.current, ActivePitcher::new(next));
        self.used.push(self.current.stats.id);
        debug!(
            team = %self.team,
            leaving = %departing.stats.name,
            entering = %self.current.stats.name,
            inning,
            "pitching change"
        );
        Some((departing.stats.id, departing.condition))
    }

    /// Fatigue change that must happen. An empty pen is an error.
    pub fn force_change(&mut self, inning: u8, rules: &RulesConfig) -> Result<(PlayerId, f64)> {
        self.change_pitcher(inning, rules)
            .ok_or_else(|| GameError::RosterExhausted {
                team: self.team.clone(),
            })
    }
}

// ============================================================================
// Decisions
// ============================================================================

/// Tracks the pitcher of record through every lead change of the game.
#[derive(Debug, Clone, Default)]
pub struct DecisionTracker {
    winning: Option<PlayerId>,
    losing: Option<PlayerId>,
    /// Pitching side and pitcher, in the order the saves were blown
    blown_saves: Vec<(Side, PlayerId)>,
}

impl DecisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `runs` take the hitting team from tied-or-behind to ahead.
    pub fn is_lead_change(hitting_score: u32, pitching_score: u32, runs: u32) -> bool {
        hitting_score <= pitching_score && pitching_score < hitting_score + runs
    }

    /// Record a lead change. The hitting side's pitcher becomes the pitcher
    /// of record for the win, the pitching side's for the loss.
    pub fn lead_change(&mut self, hitting_pitcher: PlayerId, pitching_pitcher: PlayerId) {
        self.winning = Some(hitting_pitcher);
        self.losing = Some(pitching_pitcher);
    }

    pub fn blown_save(&mut self, side: Side, pitcher: PlayerId) {
        if !self.blown_saves.contains(&(side, pitcher)) {
            self.blown_saves.push((side, pitcher));
        }
    }

    /// Settle W/L/SV/HLD/BS and write them into the box scores.
    pub fn settle(
        &self,
        winner: Side,
        winner_staff: &PitchingStaff,
        winner_box: &mut BoxScore,
        loser_box: &mut BoxScore,
        rules: &RulesConfig,
    ) -> Result<Decisions> {
        let (winning, losing) = match (self.winning, self.losing) {
            (Some(w), Some(l)) => (w, l),
            _ => {
                return Err(GameError::InconsistentBaseState(
                    "game ended without a lead change".to_string(),
                ))
            }
        };

        winner_box.pitching_line_mut(winning)?.w += 1;
        loser_box.pitching_line_mut(losing)?.l += 1;
        for &(side, pitcher) in &self.blown_saves {
            // 블론세이브는 어느 팀이든 기록
            let box_score = if side == winner {
                &mut *winner_box
            } else {
                &mut *loser_box
            };
            box_score.pitching_line_mut(pitcher)?.bs += 1;
        }

        let used = winner_staff.pitchers_used();
        let finisher = winner_staff.current_id();
        let save = if winner_staff.in_save_situation() && finisher != winning {
            Some(finisher)
        } else {
            None
        };

        let mut holds = Vec::new();
        if let Some(closer) = save {
            winner_box.pitching_line_mut(closer)?.sv += 1;
            let closer_outs = winner_box.pitching_line_mut(closer)?.outs;
            if closer_outs < rules.hold_max_closer_outs && used.len() >= 2 {
                let setup = used[used.len() - 2];
                let setup_outs = winner_box.pitching_line_mut(setup)?.outs;
                if setup != winner_staff.starter_id() && setup != winning && setup_outs > 0 {
                    winner_box.pitching_line_mut(setup)?.hld += 1;
                    holds.push(setup);
                }
            }
        }

        Ok(Decisions {
            winning_pitcher: winning,
            losing_pitcher: losing,
            save,
            holds,
            blown_saves: self.blown_saves.iter().map(|&(_, id)| id).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::team::fixtures::{pitcher, team};
    use crate::models::{Outcome, PlayCode};

    #[test]
    fn test_condition_drops_with_workload() {
        assert_eq!(condition_for(0, 20.0), 100.0);
        assert!((condition_for(10, 20.0) - 50.0).abs() < 1e-9);
        assert_eq!(condition_for(40, 20.0), 0.0);
    }

    #[test]
    fn test_fatigue_penalty_starts_at_onset() {
        let cfg = FatigueConfig::default();
        assert_eq!(in_game_fatigue(13, 20.0, &cfg), 0.0); // 65%
        assert!((in_game_fatigue(16, 20.0, &cfg) - 0.01).abs() < 1e-9); // 80%
    }

    #[test]
    fn test_bullpen_closer_order() {
        let closers = vec![pitcher(60, 5.0), pitcher(61, 5.0)];
        let middle = vec![pitcher(70, 12.0), pitcher(71, 12.0)];

        let mut pen = Bullpen::new(&closers, &middle, 33.0);
        // 7회: 마무리 2명으로는 7-8-9 못 막음 -> 중계
        assert_eq!(pen.next_reliever(7, 9).map(|p| p.id), Some(PlayerId(70)));
        // 8회: 셋업 (두 번째 마무리)
        assert_eq!(pen.next_reliever(8, 9).map(|p| p.id), Some(PlayerId(61)));
        // 9회: 마무리
        assert_eq!(pen.next_reliever(9, 9).map(|p| p.id), Some(PlayerId(60)));
        assert_eq!(pen.next_reliever(9, 9).map(|p| p.id), Some(PlayerId(71)));
        assert!(pen.next_reliever(9, 9).is_none());
    }

    #[test]
    fn test_bullpen_extra_innings_takes_next_closer() {
        let closers = vec![pitcher(60, 5.0), pitcher(61, 5.0)];
        let mut pen = Bullpen::new(&closers, &[], 33.0);
        assert_eq!(pen.next_reliever(11, 9).map(|p| p.id), Some(PlayerId(60)));
    }

    #[test]
    fn test_bullpen_falls_back_to_closers() {
        let closers = vec![pitcher(60, 5.0), pitcher(61, 5.0)];
        let mut pen = Bullpen::new(&closers, &[], 33.0);
        assert_eq!(pen.next_reliever(3, 9).map(|p| p.id), Some(PlayerId(61)));
        assert_eq!(pen.next_reliever(4, 9).map(|p| p.id), Some(PlayerId(60)));
        assert!(pen.is_empty());
    }

    #[test]
    fn test_tired_relievers_unavailable() {
        let mut tired = pitcher(70, 12.0);
        tired.condition = 30.0;
        let pen = Bullpen::new(&[], &[tired, pitcher(71, 12.0)], 33.0);
        assert_eq!(pen.remaining(), 1);
    }

    #[test]
    fn test_fatigue_change_with_empty_pen_fails() {
        let mut t = team("Tired", 100);
        t.closers.clear();
        t.middle_relievers.clear();
        let mut staff = PitchingStaff::new(&t, &FatigueConfig::default());
        let rules = RulesConfig::default();
        assert!(staff.change_pitcher(5, &rules).is_none());
        assert_eq!(
            staff.force_change(5, &rules),
            Err(GameError::RosterExhausted {
                team: "Tired".to_string()
            })
        );
        assert_eq!(staff.current_id(), t.starting_pitcher.id);
    }

    #[test]
    fn test_staff_records_condition() {
        let t = team("Away", 100);
        let cfg = FatigueConfig::default();
        let mut staff = PitchingStaff::new(&t, &cfg);
        for _ in 0..24 {
            staff.record_batter_faced();
        }
        // starter averages 25 batters: 24 faced -> condition 4
        assert!(staff.is_fatigued(&cfg));
        let (out, condition) = staff.change_pitcher(6, &RulesConfig::default()).unwrap();
        assert_eq!(out, t.starting_pitcher.id);
        assert!(condition <= 5.0);
        assert_eq!(staff.pitchers_used().len(), 2);
        assert!(!staff.is_fatigued(&cfg));
    }

    #[test]
    fn test_low_condition_tires_sooner() {
        let cfg = FatigueConfig::default();
        let fresh_team = team("Fresh", 100);
        let mut tired_team = team("Tired", 300);
        tired_team.starting_pitcher.condition = 40.0;

        let mut fresh = PitchingStaff::new(&fresh_team, &cfg);
        let mut tired = PitchingStaff::new(&tired_team, &cfg);
        // 25 * 0.4 = 10 batters
        assert!((tired.current().workload - 10.0).abs() < 1e-9);
        for _ in 0..9 {
            fresh.record_batter_faced();
            tired.record_batter_faced();
        }
        assert!(!tired.is_fatigued(&cfg));
        assert!(tired.fatigue_penalty(&cfg) > fresh.fatigue_penalty(&cfg));
        fresh.record_batter_faced();
        tired.record_batter_faced();
        assert!(tired.is_fatigued(&cfg));
        assert!(!fresh.is_fatigued(&cfg));
        assert!((fresh.current().condition - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_lead_change_rule() {
        assert!(DecisionTracker::is_lead_change(2, 3, 2));
        assert!(DecisionTracker::is_lead_change(3, 3, 1));
        assert!(!DecisionTracker::is_lead_change(2, 3, 1)); // 동점만
        assert!(!DecisionTracker::is_lead_change(4, 3, 1)); // 이미 리드
    }

    fn finished_staff() -> (PitchingStaff, BoxScore) {
        let t = team("Win", 100);
        let mut staff = PitchingStaff::new(&t, &FatigueConfig::default());
        let mut bs = BoxScore::new("Win");
        bs.add_pitcher(&t.starting_pitcher, true);
        let rules = RulesConfig::default();
        staff.change_pitcher(8, &rules);
        staff.change_pitcher(9, &rules);
        for id in staff.pitchers_used().to_vec() {
            let stats = t.pitchers().find(|p| p.id == id).cloned().unwrap();
            bs.add_pitcher(&stats, false);
            bs.record_pitching(id, &Outcome::new(PlayCode::Strikeout)).unwrap();
        }
        staff.set_save_situation(true);
        (staff, bs)
    }

    #[test]
    fn test_save_and_hold() {
        let (staff, mut win_box) = finished_staff();
        let mut lose_box = BoxScore::new("Lose");
        let loser = pitcher(900, 25.0);
        lose_box.add_pitcher(&loser, true);

        let starter = staff.starter_id();
        let mut tracker = DecisionTracker::new();
        tracker.lead_change(starter, loser.id);
        let d = tracker
            .settle(Side::Home, &staff, &mut win_box, &mut lose_box, &RulesConfig::default())
            .unwrap();

        assert_eq!(d.winning_pitcher, starter);
        assert_eq!(d.save, Some(staff.current_id()));
        let setup = staff.pitchers_used()[1];
        assert_eq!(d.holds, vec![setup]);
        assert_eq!(win_box.pitching_line(starter).unwrap().w, 1);
        assert_eq!(lose_box.pitching_line(loser.id).unwrap().l, 1);
    }

    #[test]
    fn test_winner_cannot_also_save() {
        let (staff, mut win_box) = finished_staff();
        let mut lose_box = BoxScore::new("Lose");
        let loser = pitcher(900, 25.0);
        lose_box.add_pitcher(&loser, true);

        let mut tracker = DecisionTracker::new();
        tracker.lead_change(staff.current_id(), loser.id);
        let d = tracker
            .settle(Side::Home, &staff, &mut win_box, &mut lose_box, &RulesConfig::default())
            .unwrap();
        assert_eq!(d.save, None);
        assert!(d.holds.is_empty());
    }

    #[test]
    fn test_settle_without_lead_change_fails() {
        let (staff, mut win_box) = finished_staff();
        let mut lose_box = BoxScore::new("Lose");
        assert!(DecisionTracker::new()
            .settle(Side::Home, &staff, &mut win_box, &mut lose_box, &RulesConfig::default())
            .is_err());
    }

    #[test]
    fn test_blown_save_goes_to_its_own_side() {
        let (staff, mut win_box) = finished_staff();
        let starter = staff.starter_id();
        // 원정팀 투수가 홈 선발과 같은 id
        let mut lose_box = BoxScore::new("Lose");
        let loser = pitcher(starter.0, 25.0);
        lose_box.add_pitcher(&loser, true);

        let mut tracker = DecisionTracker::new();
        tracker.lead_change(starter, loser.id);
        tracker.blown_save(Side::Away, loser.id);
        tracker.blown_save(Side::Away, loser.id);
        let d = tracker
            .settle(Side::Home, &staff, &mut win_box, &mut lose_box, &RulesConfig::default())
            .unwrap();

        assert_eq!(d.blown_saves, vec![loser.id]);
        assert_eq!(lose_box.pitching_line(loser.id).unwrap().bs, 1);
        assert_eq!(win_box.pitching_line(starter).unwrap().bs, 0);
        assert_eq!(win_box.pitching_line(starter).unwrap().w, 1);
    }
}
