//! In-play resolver.
//!
//! `classify_out` refines a generic batted-ball out into the defensive play
//! (first match wins, at most one reclassification). `apply_to_bases` moves
//! the runners for any outcome and stamps the runs it produced.

use rand::Rng;

use super::at_bat::Situation;
use super::bases::{Bases, BATTER, FIRST};
use super::config::AtBatConfig;
use super::probability::chance;
use crate::error::Result;
use crate::models::{BatterStats, Outcome, PlayCode};

pub fn classify_out<R: Rng + ?Sized>(
    rng: &mut R,
    outcome: Outcome,
    situation: &Situation,
    batter: &BatterStats,
    config: &AtBatConfig,
) -> Outcome {
    match outcome.code {
        PlayCode::FlyOut => {
            if situation.runner_on_third
                && situation.outs < 2
                && chance(rng, config.sac_fly_rate)
            {
                outcome.reclassify(PlayCode::SacFly)
            } else {
                outcome
            }
        }
        PlayCode::GroundOut if situation.runner_on_first => {
            if situation.outs <= 1 && chance(rng, batter.gidp_rate) {
                outcome.reclassify(PlayCode::DoublePlay)
            } else if chance(rng, config.fielders_choice_rate) {
                outcome.reclassify(PlayCode::FieldersChoice)
            } else {
                outcome
            }
        }
        // 삼진, 라인드라이브, 주자 없는 땅볼
        _ => outcome,
    }
}

/// Move runners for `outcome` given the outs before the play.
///
/// A play that makes the third out moves nobody and scores nothing. Returns
/// the outcome with runs and RBIs filled in; the runs stay pending on `bases`
/// until the caller consumes them.
pub fn apply_to_bases(
    outcome: Outcome,
    bases: &mut Bases,
    outs_before: u8,
    two_out_extra_base: bool,
) -> Result<Outcome> {
    let outs_after = outs_before + outcome.outs_on_play;
    if outs_after >= 3 {
        bases.remove_runner(BATTER);
        return Ok(outcome.with_runs(0));
    }

    match outcome.code {
        PlayCode::Walk | PlayCode::HitByPitch => {
            bases.walk_or_hbp();
        }
        PlayCode::SacFly => {
            bases.tag_up(outs_after);
        }
        PlayCode::DoublePlay => {
            bases.remove_runners(&[BATTER, FIRST]);
            bases.advance_runners(1);
        }
        PlayCode::FieldersChoice => {
            // 1루 주자 아웃, 타자 1루
            bases.remove_runner(FIRST);
            bases.advance_runners(1);
        }
        PlayCode::GroundOut => {
            bases.remove_runner(BATTER);
            bases.advance_runners(1);
        }
        PlayCode::Strikeout | PlayCode::FlyOut | PlayCode::LineOut => {
            bases.remove_runner(BATTER);
        }
        PlayCode::Single | PlayCode::Double | PlayCode::Triple | PlayCode::HomeRun => {
            if two_out_extra_base
                && outs_before == 2
                && matches!(outcome.code, PlayCode::Single | PlayCode::Double)
            {
                bases.two_out_extra_base();
            }
            bases.advance_runners(usize::from(outcome.bases_to_advance));
        }
    }

    bases.remove_runner(BATTER);
    let runs = bases.runs_scored();
    Ok(outcome.with_runs(runs))
}
