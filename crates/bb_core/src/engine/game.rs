//! Game loop: half-inning state machine.
//!
//! ```text
//! HalfInningActive -> HalfInningComplete -> (next half) ... -> GameComplete
//! ```
//!
//! One half-inning: extra-inning runner (if enabled), then until three outs:
//! pitching change check, stolen base attempt, plate appearance, run and
//! lead-change bookkeeping, batting order advance, walk-off check.
//!
//! The game owns its generator; the same plan and config always produce the
//! same result.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use super::at_bat::{AtBatResolver, Situation};
use super::bases::{Bases, FIRST, SECOND, THIRD};
use super::config::EngineConfig;
use super::in_play;
use super::pitching::{DecisionTracker, PitchingStaff};
use super::probability::{chance, matchup_probability, matchup_probability_in_environment};
use super::stats::StatsCalculator;
use crate::error::{GameError, Result};
use crate::models::{
    BoxScore, GamePlan, GameResult, LeagueBaseline, LineScore, Side, TeamSetup, LINEUP_SIZE,
};

struct TeamState {
    setup: TeamSetup,
    staff: PitchingStaff,
    box_score: BoxScore,
    /// Lineup slot due up next (0-based)
    order_index: usize,
}

impl TeamState {
    fn new(setup: TeamSetup, config: &EngineConfig) -> Self {
        let staff = PitchingStaff::new(&setup, &config.fatigue);
        let mut box_score = BoxScore::new(setup.name.clone());
        box_score.add_pitcher(&setup.starting_pitcher, true);
        Self {
            setup,
            staff,
            box_score,
            order_index: 0,
        }
    }
}

pub struct GameEngine {
    config: EngineConfig,
    league: LeagueBaseline,
    seed: u64,
    game_number: u32,
    rng: ChaCha8Rng,
    /// [away, home]
    teams: [TeamState; 2],
    bases: Bases,
    batting: Side,
    outs: u8,
    /// Inning each side bats next, starting at 1
    innings: [u8; 2],
    score: [u32; 2],
    line_score: LineScore,
    decisions: DecisionTracker,
    log: Option<Vec<String>>,
}

impl GameEngine {
    pub fn new(plan: GamePlan, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        plan.league.validate()?;
        plan.away.validate()?;
        plan.home.validate()?;

        let GamePlan {
            away,
            home,
            league,
            seed,
            game_number,
            play_by_play,
        } = plan;

        let teams = [TeamState::new(away, &config), TeamState::new(home, &config)];
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            league,
            seed,
            game_number,
            teams,
            bases: Bases::new(),
            batting: Side::Away,
            outs: 0,
            innings: [1, 1],
            score: [0, 0],
            line_score: LineScore::default(),
            decisions: DecisionTracker::new(),
            log: play_by_play.then(Vec::new),
            config,
        })
    }

    /// Play the game to completion.
    pub fn simulate(mut self) -> Result<GameResult> {
        if self.log.is_some() {
            let line = format!(
                "{} at {}",
                self.teams[0].setup.name, self.teams[1].setup.name
            );
            self.note(line);
            for side in [Side::Away, Side::Home] {
                let line = starter_line(&self.teams[side.index()].setup);
                self.note(line);
            }
        }
        while !self.is_game_end() {
            self.sim_half_inning()?;
        }
        self.finish()
    }

    // ========================================================================
    // Situation helpers
    // ========================================================================

    fn pitching(&self) -> Side {
        self.batting.opponent()
    }

    /// Score from the pitching team's side: positive when it leads.
    fn score_diff(&self) -> i64 {
        i64::from(self.score[self.pitching().index()]) - i64::from(self.score[self.batting.index()])
    }

    fn batting_inning(&self) -> u8 {
        self.innings[self.batting.index()]
    }

    fn close_game(&self) -> bool {
        let rules = &self.config.rules;
        let diff = self.score_diff();
        (0..=i64::from(rules.close_game_max_lead)).contains(&diff)
            && self.batting_inning() >= rules.close_game_inning
    }

    fn save_situation(&self) -> bool {
        let rules = &self.config.rules;
        let diff = self.score_diff();
        let cushion = self.bases.num_runners() as i64 + i64::from(rules.save_situation_cushion);
        diff > 0 && diff <= cushion && self.batting_inning() >= rules.save_situation_inning
    }

    /// Ends only after regulation, never tied. After a top half the home team
    /// must already lead.
    fn is_game_end(&self) -> bool {
        let regulation = self.config.rules.regulation_innings;
        let [away_inning, home_inning] = self.innings;
        let [away, home] = self.score;
        if away_inning <= regulation || home_inning < regulation {
            return false;
        }
        if away_inning != home_inning && away >= home {
            return false;
        }
        away != home
    }

    fn is_walk_off(&self) -> bool {
        self.batting == Side::Home
            && self.batting_inning() >= self.config.rules.regulation_innings
            && self.score[1] > self.score[0]
    }

    fn note(&mut self, line: String) {
        if let Some(log) = self.log.as_mut() {
            log.push(line);
        }
    }

    // ========================================================================
    // Half inning
    // ========================================================================

    fn sim_half_inning(&mut self) -> Result<()> {
        let bat = self.batting.index();
        let inning = self.innings[bat];
        let mut switched = false;
        self.line_score.side_mut(self.batting).push(0);

        if self.log.is_some() {
            let half = if self.batting == Side::Away { "Top" } else { "Bottom" };
            let line = format!("{} {}: {} batting", half, inning, self.teams[bat].setup.name);
            self.note(line);
        }

        self.place_extra_inning_runner();

        while self.outs < 3 {
            switched = self.pitching_check(switched)?;
            self.stolen_base_attempt()?;
            if self.outs >= 3 {
                break;
            }
            self.sim_plate_appearance()?;
            if self.is_walk_off() {
                if self.log.is_some() {
                    let line = format!("Walk-off! {} win", self.teams[1].setup.name);
                    self.note(line);
                }
                break;
            }
        }

        self.bases.clear_bases();
        if self.log.is_some() {
            let line = format!(
                "End of {} {}: {} {}, {} {}",
                if self.batting == Side::Away { "top" } else { "bottom" },
                inning,
                self.teams[0].setup.name,
                self.score[0],
                self.teams[1].setup.name,
                self.score[1]
            );
            self.note(line);
        }
        self.innings[bat] += 1;
        self.outs = 0;
        self.batting = self.batting.opponent();
        Ok(())
    }

    /// Previous batter starts on 2nd in extra innings.
    fn place_extra_inning_runner(&mut self) {
        let rules = &self.config.rules;
        if !rules.extra_inning_runner || self.batting_inning() < rules.extra_inning_runner_from {
            return;
        }
        let bat = self.batting.index();
        let team = &self.teams[bat];
        let prior = (team.order_index + LINEUP_SIZE - 1) % LINEUP_SIZE;
        let runner = team.setup.lineup[prior].clone();

        self.bases.add_runner_to_base(SECOND, runner.id, &runner.name);
        self.teams[bat].box_score.add_batter(&runner);
        if self.log.is_some() {
            self.note(format!("{} starts the inning on 2nd", runner.name));
        }
    }

    /// Fatigue forces a change; a close game or save situation triggers one
    /// change per half-inning. Returns whether a change has happened this half.
    fn pitching_check(&mut self, switched: bool) -> Result<bool> {
        let pit = self.pitching().index();
        let inning = self.batting_inning();
        let fatigued = self.teams[pit].staff.is_fatigued(&self.config.fatigue) && self.outs < 3;
        let situational = !switched && (self.close_game() || self.save_situation());
        if !fatigued && !situational {
            return Ok(switched);
        }

        let change = if fatigued {
            Some(self.teams[pit].staff.force_change(inning, &self.config.rules)?)
        } else {
            self.teams[pit].staff.change_pitcher(inning, &self.config.rules)
        };
        let Some((departing, condition)) = change else {
            // 불펜 소진: 상황 교체는 현 투수 유지
            return Ok(switched);
        };

        let save_situation = self.save_situation();
        let team = &mut self.teams[pit];
        team.box_score.set_condition(departing, condition)?;
        let entering = team.staff.current().stats.clone();
        team.box_score.add_pitcher(&entering, false);
        team.staff.set_save_situation(save_situation);

        if self.log.is_some() {
            let line = format!(
                "Pitching change: {} enters for {}",
                entering.name, self.teams[pit].setup.name
            );
            self.note(line);
        }
        Ok(true)
    }

    fn stolen_base_attempt(&mut self) -> Result<()> {
        if !self.config.rules.stolen_bases || !self.bases.is_eligible_for_stolen_base() {
            return Ok(());
        }
        let Some(runner_id) = self.bases.runner_on(FIRST) else {
            return Ok(());
        };
        let bat = self.batting.index();
        let pit = self.pitching().index();
        let (attempt_rate, success_rate, name) = {
            let runner = self.teams[bat]
                .setup
                .lineup
                .iter()
                .find(|b| b.id == runner_id)
                .ok_or(GameError::UnknownPlayer(runner_id))?;
            (
                runner.steal_attempt_rate,
                runner.steal_success_rate,
                runner.name.clone(),
            )
        };

        let attempt = (attempt_rate * self.config.rules.steal_attempt_scale).min(1.0);
        if !chance(&mut self.rng, attempt) {
            return Ok(());
        }
        let p = steal_success_probability(
            success_rate,
            &self.league,
            self.config.at_bat.use_environment_odds,
        )?;

        if chance(&mut self.rng, p) {
            self.bases.push_a_runner(FIRST, SECOND);
            self.teams[bat].box_score.record_steal(runner_id, true)?;
            if self.log.is_some() {
                self.note(format!("{} stole 2nd", name));
            }
        } else {
            self.teams[bat].box_score.record_steal(runner_id, false)?;
            self.bases.remove_runner(FIRST);
            self.outs += 1;
            let pitcher = self.teams[pit].staff.current_id();
            self.teams[pit].box_score.record_caught_stealing_out(pitcher)?;
            if self.log.is_some() {
                let line = format!("{} caught stealing, {} out", name, self.outs);
                self.note(line);
            }
        }
        Ok(())
    }

    fn sim_plate_appearance(&mut self) -> Result<()> {
        let bat = self.batting.index();
        let pit = self.pitching().index();
        let batter = self.teams[bat].setup.lineup[self.teams[bat].order_index].clone();
        self.teams[bat].box_score.add_batter(&batter);
        self.bases.new_ab(batter.id, &batter.name)?;

        let situation = Situation {
            outs: self.outs,
            runner_on_first: self.bases.is_runner_on(FIRST),
            runner_on_third: self.bases.is_runner_on(THIRD),
            pitcher_fatigue: self.teams[pit].staff.fatigue_penalty(&self.config.fatigue),
        };
        let resolver = AtBatResolver::new(&self.league, &self.config.at_bat);
        let outcome = resolver.resolve(
            &mut self.rng,
            &batter,
            &self.teams[pit].staff.current().stats,
            &situation,
        )?;

        let outs_before = self.outs;
        let outcome = in_play::apply_to_bases(
            outcome,
            &mut self.bases,
            outs_before,
            self.config.rules.two_out_extra_base,
        )?;
        self.outs = (self.outs + outcome.outs_on_play).min(3);
        let scorers = self.bases.take_runs();

        let pitcher_id = self.teams[pit].staff.current_id();
        let condition = self.teams[pit].staff.record_batter_faced();
        let pitching_box = &mut self.teams[pit].box_score;
        pitching_box.record_pitching(pitcher_id, &outcome)?;
        pitching_box.set_condition(pitcher_id, condition)?;
        let batting_box = &mut self.teams[bat].box_score;
        batting_box.record_batting(batter.id, &outcome)?;
        for id in &scorers {
            batting_box.record_run(*id)?;
        }

        trace!(
            game = self.game_number,
            batter = %batter.name,
            play = outcome.code.abbreviation(),
            outs = self.outs,
            runs = outcome.runs,
            "plate appearance"
        );

        if self.log.is_some() {
            let pitcher_name = self.teams[pit].staff.current().stats.name.clone();
            let mut line = format!(
                "{} {} vs {} ({} out)",
                batter.name,
                outcome.code.describe(),
                pitcher_name,
                self.outs
            );
            if !scorers.is_empty() {
                let names: Vec<&str> =
                    scorers.iter().map(|id| self.bases.runner_name(*id)).collect();
                line.push_str(&format!(", {} scored", names.join(", ")));
            }
            let runners = self.bases.describe_runners();
            if !runners.is_empty() && self.outs < 3 {
                line.push_str(&format!(". {}", runners));
            }
            self.note(line);
        }

        if outcome.runs > 0 {
            self.credit_runs(u32::from(outcome.runs));
        }
        self.teams[bat].order_index = (self.teams[bat].order_index + 1) % LINEUP_SIZE;
        Ok(())
    }

    /// Add runs to the hitting side, tracking lead changes and blown saves.
    fn credit_runs(&mut self, runs: u32) {
        let bat = self.batting.index();
        let pitching = self.pitching();
        let pit = pitching.index();
        if DecisionTracker::is_lead_change(self.score[bat], self.score[pit], runs) {
            let hitting_pitcher = self.teams[bat].staff.current_id();
            let pitching_pitcher = self.teams[pit].staff.current_id();
            self.decisions.lead_change(hitting_pitcher, pitching_pitcher);
            if self.teams[pit].staff.in_save_situation() {
                self.decisions.blown_save(pitching, pitching_pitcher);
                self.teams[pit].staff.set_save_situation(false);
            }
        }
        self.score[bat] += runs;
        if let Some(inning_runs) = self.line_score.side_mut(self.batting).last_mut() {
            *inning_runs += runs;
        }
    }

    // ========================================================================
    // Game complete
    // ========================================================================

    fn finish(mut self) -> Result<GameResult> {
        let winner = if self.score[1] > self.score[0] {
            Side::Home
        } else {
            Side::Away
        };

        let [away, home] = &mut self.teams;
        let (win_team, lose_team) = match winner {
            Side::Away => (away, home),
            Side::Home => (home, away),
        };
        let decisions = self.decisions.settle(
            winner,
            &win_team.staff,
            &mut win_team.box_score,
            &mut lose_team.box_score,
            &self.config.rules,
        )?;

        let calculator = StatsCalculator::new();
        for team in self.teams.iter_mut() {
            calculator.finalize(&mut team.box_score);
        }

        let [away, home] = self.teams;
        let mut result = GameResult {
            game_number: self.game_number,
            seed: self.seed,
            away_team: away.setup.name,
            home_team: home.setup.name,
            away_score: self.score[0],
            home_score: self.score[1],
            innings: [self.innings[0] - 1, self.innings[1] - 1],
            winner,
            decisions,
            line_score: self.line_score,
            away_box: away.box_score,
            home_box: home.box_score,
            play_by_play: self.log,
        };
        let summary = result.summary();
        if let Some(log) = result.play_by_play.as_mut() {
            log.push(format!("Final: {}", summary));
        }

        debug!(
            game = result.game_number,
            seed = result.seed,
            summary = %summary,
            "game complete"
        );
        Ok(result)
    }
}

fn starter_line(team: &TeamSetup) -> String {
    let pitcher = &team.starting_pitcher;
    match pitcher.rotation_index {
        Some(slot) => format!(
            "{} starter: {} (rotation #{})",
            team.name,
            pitcher.name,
            u32::from(slot) + 1
        ),
        None => format!("{} starter: {}", team.name, pitcher.name),
    }
}

/// Stolen base success. No catcher data: the league rate stands in on the
/// defensive side.
fn steal_success_probability(
    runner_rate: f64,
    league: &LeagueBaseline,
    use_environment_odds: bool,
) -> Result<f64> {
    let lg = league.steal_success_rate;
    if use_environment_odds {
        matchup_probability_in_environment(runner_rate, lg, lg, lg, lg)
    } else {
        matchup_probability(runner_rate, lg, lg, lg)
    }
}

/// Convenience wrapper: build and run one game.
pub fn simulate_game(plan: GamePlan, config: &EngineConfig) -> Result<GameResult> {
    GameEngine::new(plan, config.clone())?.simulate()
}
