//! Plate-appearance outcome resolver.
//!
//! A chain of yes/no draws, each an odds-ratio matchup against the league:
//! on base? -> walk? -> home run? -> triple? -> double? -> hit by pitch? ->
//! single. An out is a strikeout or a batted ball typed by the league
//! ground / fly / line split, then handed to the in-play resolver for
//! situational refinement.
//!
//! Stateless; all randomness comes from the caller's generator.

use rand::Rng;

use super::config::AtBatConfig;
use super::in_play;
use super::probability::{chance, matchup_probability, matchup_probability_in_environment};
use crate::error::Result;
use crate::models::player::ensure_rate;
use crate::models::{BatterStats, LeagueBaseline, Outcome, PitcherStats, PlayCode};

/// Game state the resolver needs at the moment of the pitch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Situation {
    pub outs: u8,
    pub runner_on_first: bool,
    pub runner_on_third: bool,
    /// OBP added to both sides by a tiring pitcher.
    pub pitcher_fatigue: f64,
}

pub struct AtBatResolver<'a> {
    league: &'a LeagueBaseline,
    config: &'a AtBatConfig,
}

impl<'a> AtBatResolver<'a> {
    pub fn new(league: &'a LeagueBaseline, config: &'a AtBatConfig) -> Self {
        Self { league, config }
    }

    /// One matchup draw. The league hitter rate doubles as the environment.
    fn draw<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        hitter: f64,
        pitcher: f64,
        league_hitter: f64,
        league_pitcher: f64,
    ) -> Result<bool> {
        let p = if self.config.use_environment_odds {
            matchup_probability_in_environment(
                hitter,
                pitcher,
                league_hitter,
                league_pitcher,
                league_hitter,
            )?
        } else {
            matchup_probability(hitter, pitcher, league_hitter, league_pitcher)?
        };
        Ok(chance(rng, p))
    }

    /// Resolve a plate appearance to an outcome. Runs are not filled in yet.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        batter: &BatterStats,
        pitcher: &PitcherStats,
        situation: &Situation,
    ) -> Result<Outcome> {
        let lg = self.league;
        let fatigue = situation.pitcher_fatigue.max(0.0);
        let batter_obp = (ensure_rate("obp", batter.obp)? + fatigue).min(1.0);
        let pitcher_obp = (ensure_rate("obp_allowed", pitcher.obp_allowed)? + fatigue).min(1.0);

        if self.draw(rng, batter_obp, pitcher_obp, lg.obp_batting, lg.obp_pitching)? {
            let code = self.on_base_type(rng, batter, pitcher)?;
            return Ok(Outcome::new(code));
        }

        let strikeout = self.draw(
            rng,
            batter.strikeout_rate,
            pitcher.strikeout_rate,
            lg.strikeout_rate_batting,
            lg.strikeout_rate_pitching,
        )?;
        if strikeout {
            return Ok(Outcome::new(PlayCode::Strikeout));
        }

        let batted = Outcome::new(self.batted_ball(rng));
        Ok(in_play::classify_out(
            rng,
            batted,
            situation,
            batter,
            self.config,
        ))
    }

    fn on_base_type<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        batter: &BatterStats,
        pitcher: &PitcherStats,
    ) -> Result<PlayCode> {
        let lg = self.league;
        if self.draw(
            rng,
            batter.walk_rate,
            pitcher.walk_rate,
            lg.walk_rate_batting,
            lg.walk_rate_pitching,
        )? {
            return Ok(PlayCode::Walk);
        }
        if self.draw(
            rng,
            batter.home_run_rate,
            pitcher.home_run_rate,
            lg.home_run_rate_batting,
            lg.home_run_rate_pitching,
        )? {
            return Ok(PlayCode::HomeRun);
        }
        // 3루타/2루타는 투수 데이터 없음: 리그 값 사용
        if self.draw(rng, batter.triple_rate, lg.triple_rate, lg.triple_rate, lg.triple_rate)? {
            return Ok(PlayCode::Triple);
        }
        if self.draw(rng, batter.double_rate, lg.double_rate, lg.double_rate, lg.double_rate)? {
            return Ok(PlayCode::Double);
        }
        if self.draw(
            rng,
            batter.hbp_rate,
            pitcher.hbp_rate,
            lg.hbp_rate_batting,
            lg.hbp_rate_pitching,
        )? {
            return Ok(PlayCode::HitByPitch);
        }
        Ok(PlayCode::Single)
    }

    fn batted_ball<R: Rng + ?Sized>(&self, rng: &mut R) -> PlayCode {
        let total =
            self.config.ground_ball_rate + self.config.fly_ball_rate + self.config.line_drive_rate;
        let roll = rng.gen::<f64>() * total;
        if roll < self.config.ground_ball_rate {
            PlayCode::GroundOut
        } else if roll < self.config.ground_ball_rate + self.config.fly_ball_rate {
            PlayCode::FlyOut
        } else {
            PlayCode::LineOut
        }
    }
}
