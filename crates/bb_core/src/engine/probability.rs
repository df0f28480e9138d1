//! Matchup probability (log5 / odds-ratio)
//!
//! All functions are pure. A hitter's rate and a pitcher's rate are combined
//! relative to the league's rates for the same statistic:
//!
//! ```text
//! odds = [h/(1-h) * p/(1-p)] / [lh/(1-lh) * lp/(1-lp)] * env/(1-env)
//! ```
//!
//! With `env = 0.5` the environment odds are 1 and equal rates give exactly
//! 0.5. With `env` set to the league rate, a league-average hitter facing a
//! league-average pitcher reproduces the league rate.

use rand::Rng;

use crate::error::Result;
use crate::models::player::ensure_rate;

/// Inputs are clamped to `(EPSILON, 1 - EPSILON)` before taking odds.
pub const EPSILON: f64 = 1e-6;

/// Neutral environment (odds = 1).
pub const NEUTRAL_ENVIRONMENT: f64 = 0.5;

#[inline]
fn odds(rate: f64) -> f64 {
    let r = rate.clamp(EPSILON, 1.0 - EPSILON);
    r / (1.0 - r)
}

/// Four-rate matchup probability. Result lies strictly inside `(0, 1)`.
///
/// # Example
/// ```
/// use bb_core::engine::probability::matchup_probability;
///
/// let p = matchup_probability(0.320, 0.310, 0.330, 0.340).unwrap();
/// assert!((p - 0.454523).abs() < 1e-6);
/// assert_eq!(matchup_probability(0.3, 0.3, 0.3, 0.3).unwrap(), 0.5);
/// ```
pub fn matchup_probability(
    hitter_rate: f64,
    pitcher_rate: f64,
    league_hitter_rate: f64,
    league_pitcher_rate: f64,
) -> Result<f64> {
    matchup_probability_in_environment(
        hitter_rate,
        pitcher_rate,
        league_hitter_rate,
        league_pitcher_rate,
        NEUTRAL_ENVIRONMENT,
    )
}

/// Matchup probability scaled by environment odds `env / (1 - env)`.
pub fn matchup_probability_in_environment(
    hitter_rate: f64,
    pitcher_rate: f64,
    league_hitter_rate: f64,
    league_pitcher_rate: f64,
    environment_rate: f64,
) -> Result<f64> {
    let h = ensure_rate("hitter_rate", hitter_rate)?;
    let p = ensure_rate("pitcher_rate", pitcher_rate)?;
    let lh = ensure_rate("league_hitter_rate", league_hitter_rate)?;
    let lp = ensure_rate("league_pitcher_rate", league_pitcher_rate)?;
    let env = ensure_rate("environment_rate", environment_rate)?;

    let combined = odds(h) * odds(p) / (odds(lh) * odds(lp)) * odds(env);
    let prob = combined / (1.0 + combined);

    // 극단값에서도 (0,1) 유지
    Ok(prob.clamp(EPSILON, 1.0 - EPSILON))
}

/// Bernoulli draw.
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}
